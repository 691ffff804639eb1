//! UBX frame checksum, encoding and byte-at-a-time decoding.
//!
//! Every UBX frame on the wire is:
//! - 2 sync bytes `0xB5 0x62` for stream synchronization
//! - a class byte and an id byte
//! - a 2-byte little-endian payload length
//! - the payload
//! - a 2-byte Fletcher-style checksum over class, id, length and payload
//!
//! The decoder is fed one byte at a time and never blocks, so it can sit
//! directly behind a UART interrupt or a non-blocking serial read.

pub mod checksum;
pub mod codec;
pub mod decoder;
pub mod error;

#[cfg(feature = "async")]
pub mod async_codec;

pub use checksum::checksum;
pub use codec::{
    encode_frame, encode_to_vec, FrameConfig, Message, CHECKSUM_SIZE, DEFAULT_PAYLOAD_CAPACITY,
    HEADER_SIZE, SYNC_1, SYNC_2,
};
pub use decoder::{DecodeState, FrameDecoder};
pub use error::{FrameError, Result};

#[cfg(feature = "async")]
pub use async_codec::UbxCodec;
