//! Byte link capability for UBX sessions.
//!
//! A session never opens devices itself. It is handed something that can
//! pull whatever bytes are currently available and push bytes out:
//! - any `Read + Write` stream via [`StreamLink`]
//! - a serial device via [`serial::open_serial`] (behind the `serial` feature)
//! - an in-memory peer via [`MemoryLink`] for tests and dry runs
//!
//! This is the lowest layer of ubxwire. Everything else builds on top of
//! the [`ByteLink`] trait provided here.

pub mod error;
pub mod memory;
pub mod traits;

#[cfg(feature = "serial")]
pub mod serial;

pub use error::{Result, TransportError};
pub use memory::MemoryLink;
pub use traits::{ByteLink, NullLink, StreamLink};

#[cfg(feature = "serial")]
pub use serial::{open_serial, SerialSettings};
