/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The received checksum does not match the one computed over the frame.
    #[error(
        "checksum mismatch on class 0x{class:02x} id 0x{id:02x} \
         (expected {expected:02x?}, received {received:02x?})"
    )]
    Checksum {
        class: u8,
        id: u8,
        expected: (u8, u8),
        received: (u8, u8),
    },

    /// A payload byte arrived past the local payload capacity and was dropped.
    #[error("receive overflow ({declared} byte payload, capacity {capacity})")]
    ReceiveOverflow { declared: usize, capacity: usize },

    /// The payload does not fit the 16-bit length field.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FrameError>;
