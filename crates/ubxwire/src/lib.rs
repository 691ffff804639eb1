//! UBX binary protocol for u-blox GNSS receivers.
//!
//! ubxwire synchronizes on a raw serial byte stream, reassembles and
//! verifies UBX frames, routes them to per-class handlers, and encodes
//! requests with a correct checksum.
//!
//! # Crate Structure
//!
//! - [`transport`]: Byte link capability (streams, serial ports, in-memory peers)
//! - [`frame`]: Checksum, frame encoding and the byte-at-a-time decoder
//! - [`session`]: Class dispatch, receiver state and blocking request helpers

/// Re-export transport types.
pub mod transport {
    pub use ubxwire_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use ubxwire_frame::*;
}

/// Re-export session types.
pub mod session {
    pub use ubxwire_session::*;
}

pub use ubxwire_frame::Message;
pub use ubxwire_session::{Event, Session, SessionConfig, SessionError};
