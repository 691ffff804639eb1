use bytes::{BufMut, BytesMut};

use crate::checksum::checksum;
use crate::codec::{FrameConfig, Message, SYNC_1, SYNC_2};
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 256;

/// Where the decoder is within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    AwaitSync1,
    AwaitSync2,
    AwaitClass,
    AwaitId,
    AwaitLengthLow,
    AwaitLengthHigh,
    /// Payload bytes still expected, including any that will be dropped.
    AwaitPayload {
        remaining: u16,
    },
    AwaitChecksumA,
    AwaitChecksumB,
}

/// Reassembles UBX frames from a byte stream, one byte at a time.
///
/// Bytes outside a frame are skipped until the sync pair is seen. A broken
/// sync pair silently restarts the hunt. Every completed frame, valid or not,
/// returns the decoder to [`DecodeState::AwaitSync1`].
#[derive(Debug)]
pub struct FrameDecoder {
    state: DecodeState,
    class: u8,
    id: u8,
    length: u16,
    payload: BytesMut,
    consumed: usize,
    overflowed: bool,
    ck_a: u8,
    config: FrameConfig,
}

impl FrameDecoder {
    /// Create a decoder with default configuration.
    pub fn new() -> Self {
        Self::with_config(FrameConfig::default())
    }

    /// Create a decoder with explicit configuration.
    pub fn with_config(config: FrameConfig) -> Self {
        Self {
            state: DecodeState::AwaitSync1,
            class: 0,
            id: 0,
            length: 0,
            payload: BytesMut::with_capacity(config.payload_capacity.min(INITIAL_BUFFER_CAPACITY)),
            consumed: 0,
            overflowed: false,
            ck_a: 0,
            config,
        }
    }

    /// Consume one byte.
    ///
    /// Returns `Ok(Some(message))` when the byte completes a frame whose
    /// checksum verifies. Errors never stop the decoder:
    /// - [`FrameError::ReceiveOverflow`] for each payload byte past capacity;
    ///   the byte is dropped but still counted toward the declared length
    /// - [`FrameError::Checksum`] when a completed frame fails verification
    /// - [`FrameError::ReceiveOverflow`] at completion if a truncated frame
    ///   happens to verify anyway; it is never handed out
    pub fn feed(&mut self, byte: u8) -> Result<Option<Message>> {
        match self.state {
            DecodeState::AwaitSync1 => {
                if byte == SYNC_1 {
                    self.state = DecodeState::AwaitSync2;
                }
            }
            DecodeState::AwaitSync2 => {
                if byte == SYNC_2 {
                    self.state = DecodeState::AwaitClass;
                } else {
                    tracing::trace!(byte, "sync pair broken, resynchronizing");
                    self.state = DecodeState::AwaitSync1;
                }
            }
            DecodeState::AwaitClass => {
                self.class = byte;
                self.state = DecodeState::AwaitId;
            }
            DecodeState::AwaitId => {
                self.id = byte;
                self.state = DecodeState::AwaitLengthLow;
            }
            DecodeState::AwaitLengthLow => {
                self.length = u16::from(byte);
                self.state = DecodeState::AwaitLengthHigh;
            }
            DecodeState::AwaitLengthHigh => {
                self.length |= u16::from(byte) << 8;
                self.payload.clear();
                self.consumed = 0;
                self.overflowed = false;
                self.state = if self.length == 0 {
                    DecodeState::AwaitChecksumA
                } else {
                    DecodeState::AwaitPayload {
                        remaining: self.length,
                    }
                };
            }
            DecodeState::AwaitPayload { remaining } => {
                let overflow = self.consumed >= self.config.payload_capacity;
                if overflow {
                    self.overflowed = true;
                } else {
                    self.payload.put_u8(byte);
                }
                self.consumed += 1;

                let remaining = remaining - 1;
                self.state = if remaining == 0 {
                    DecodeState::AwaitChecksumA
                } else {
                    DecodeState::AwaitPayload { remaining }
                };

                if overflow {
                    return Err(FrameError::ReceiveOverflow {
                        declared: self.length as usize,
                        capacity: self.config.payload_capacity,
                    });
                }
            }
            DecodeState::AwaitChecksumA => {
                self.ck_a = byte;
                self.state = DecodeState::AwaitChecksumB;
            }
            DecodeState::AwaitChecksumB => {
                self.state = DecodeState::AwaitSync1;
                return self.complete(byte).map(Some);
            }
        }

        Ok(None)
    }

    fn complete(&mut self, ck_b: u8) -> Result<Message> {
        let payload = self.payload.split().freeze();
        let expected = checksum(self.class, self.id, self.length, &payload);
        let received = (self.ck_a, ck_b);

        if expected != received {
            return Err(FrameError::Checksum {
                class: self.class,
                id: self.id,
                expected,
                received,
            });
        }

        if self.overflowed {
            return Err(FrameError::ReceiveOverflow {
                declared: self.length as usize,
                capacity: self.config.payload_capacity,
            });
        }

        Ok(Message {
            class: self.class,
            id: self.id,
            length: self.length,
            payload,
            ck_a: self.ck_a,
            ck_b,
        })
    }

    /// Drop any partial frame and wait for a new sync pair.
    pub fn reset(&mut self) {
        self.state = DecodeState::AwaitSync1;
        self.payload.clear();
        self.consumed = 0;
        self.overflowed = false;
    }

    /// Current decode state.
    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// True between the first sync byte and the last checksum byte.
    pub fn in_frame(&self) -> bool {
        self.state != DecodeState::AwaitSync1
    }

    /// Update the payload capacity for subsequent frames.
    pub fn set_payload_capacity(&mut self, payload_capacity: usize) {
        self.config.payload_capacity = payload_capacity;
    }

    /// Current decoder configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}
