//! UBX session layer.
//!
//! This is the layer most callers use. A [`Session`] wraps a byte link,
//! decodes incoming frames, routes them through a class-keyed handler
//! registry, caches what the receiver reports, and offers blocking
//! request helpers (poll, wait for ACK, set configuration) with a timeout
//! and a cancel flag.

pub mod class;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod handlers;
pub mod receiver;
pub mod requests;
pub mod session;

pub use config::SessionConfig;
pub use dispatch::{ClassTable, Dispatched, Dispatcher, Handler};
pub use error::{ErrorCode, Result, SessionError};
pub use event::{Event, EventListener};
pub use receiver::{
    ChipsetVersion, DynamicPlatformModel, FixMode, GnssSelection, PortConfig, Receiver,
    ReceiverConfig, ReceiverInfo,
};
pub use requests::{cfg_nav5_set, cfg_rate_set};
pub use session::{Acknowledgement, Session};
