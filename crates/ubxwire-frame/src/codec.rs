use bytes::{BufMut, Bytes, BytesMut};

use crate::checksum::checksum;
use crate::error::{FrameError, Result};

/// First sync byte (`µ`).
pub const SYNC_1: u8 = 0xB5;

/// Second sync byte (`b`).
pub const SYNC_2: u8 = 0x62;

/// Frame header: sync (2) + class (1) + id (1) + length (2) = 6 bytes.
pub const HEADER_SIZE: usize = 6;

/// Trailing checksum bytes.
pub const CHECKSUM_SIZE: usize = 2;

/// Default receive payload capacity.
///
/// Large enough for MON-VER with a handful of extension strings, which is
/// the largest message the session interprets.
pub const DEFAULT_PAYLOAD_CAPACITY: usize = 1024;

/// A UBX message: class/id routing plus payload and checksum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Message class.
    pub class: u8,
    /// Message id within the class.
    pub id: u8,
    /// Payload length as carried on the wire.
    pub length: u16,
    /// Payload bytes. Shorter than `length` only for a truncated receive.
    pub payload: Bytes,
    /// First checksum byte.
    pub ck_a: u8,
    /// Second checksum byte.
    pub ck_b: u8,
}

impl Message {
    /// Create a message; length and checksum are derived from the payload.
    ///
    /// Payloads longer than `u16::MAX` are rejected by [`encode_frame`], the
    /// length field saturates here.
    pub fn new(class: u8, id: u8, payload: impl Into<Bytes>) -> Self {
        let payload = payload.into();
        let length = u16::try_from(payload.len()).unwrap_or(u16::MAX);
        let (ck_a, ck_b) = checksum(class, id, length, &payload);
        Self {
            class,
            id,
            length,
            payload,
            ck_a,
            ck_b,
        }
    }

    /// Create an empty-payload poll request for `class`/`id`.
    pub fn poll(class: u8, id: u8) -> Self {
        Self::new(class, id, Bytes::new())
    }

    /// The total wire size of this frame (header + payload + checksum).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.length as usize + CHECKSUM_SIZE
    }

    /// True if fewer payload bytes were kept than the header declared.
    pub fn is_truncated(&self) -> bool {
        self.payload.len() < self.length as usize
    }

    /// Checksum computed over the current class/id/length/payload.
    pub fn computed_checksum(&self) -> (u8, u8) {
        checksum(self.class, self.id, self.length, &self.payload)
    }

    /// True if the stored checksum bytes match the contents.
    pub fn checksum_ok(&self) -> bool {
        self.computed_checksum() == (self.ck_a, self.ck_b)
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::poll(0, 0)
    }
}

/// Encode a message into the wire format.
///
/// The checksum is always recomputed from class, id and payload; the
/// message's own `ck_a`/`ck_b` are ignored.
///
/// Wire format:
/// ```text
/// ┌───────────┬───────┬──────┬───────────┬─────────────┬────────────┐
/// │ Sync (2B) │ Class │ Id   │ Length    │ Payload     │ CK_A  CK_B │
/// │ 0xB5 0x62 │ (1B)  │ (1B) │ (2B LE)   │ (Length B)  │ (1B)  (1B) │
/// └───────────┴───────┴──────┴───────────┴─────────────┴────────────┘
/// ```
pub fn encode_frame(message: &Message, dst: &mut BytesMut) -> Result<()> {
    let payload = message.payload.as_ref();
    let length = u16::try_from(payload.len()).map_err(|_| FrameError::PayloadTooLarge {
        size: payload.len(),
        max: u16::MAX as usize,
    })?;
    let (ck_a, ck_b) = checksum(message.class, message.id, length, payload);

    dst.reserve(HEADER_SIZE + payload.len() + CHECKSUM_SIZE);
    dst.put_u8(SYNC_1);
    dst.put_u8(SYNC_2);
    dst.put_u8(message.class);
    dst.put_u8(message.id);
    dst.put_u16_le(length);
    dst.put_slice(payload);
    dst.put_u8(ck_a);
    dst.put_u8(ck_b);
    Ok(())
}

/// Encode a message into a freshly allocated buffer.
pub fn encode_to_vec(message: &Message) -> Result<Vec<u8>> {
    let mut buf = BytesMut::with_capacity(message.wire_size());
    encode_frame(message, &mut buf)?;
    Ok(buf.to_vec())
}

/// Configuration for the frame decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    /// Maximum payload bytes kept per frame. Default: 1024.
    pub payload_capacity: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            payload_capacity: DEFAULT_PAYLOAD_CAPACITY,
        }
    }
}
