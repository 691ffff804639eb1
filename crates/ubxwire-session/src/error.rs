use std::time::Duration;

use serde::Serialize;
use ubxwire_frame::FrameError;

/// Errors that can occur in session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The session has no link to send through or pull from.
    #[error("session has no link attached")]
    NullHandle,

    /// A received frame failed its checksum.
    #[error("checksum mismatch on class 0x{class:02x} id 0x{id:02x}")]
    Checksum { class: u8, id: u8 },

    /// The session was closed or never set up.
    #[error("session not initialized")]
    NotInitialized,

    /// A payload exceeded the local receive capacity.
    #[error("receive overflow ({declared} byte payload, capacity {capacity})")]
    ReceiveOverflow { declared: usize, capacity: usize },

    /// The receiver rejected a request.
    #[error("request class 0x{class:02x} id 0x{id:02x} rejected (NAK)")]
    Nak { class: u8, id: u8 },

    /// A blocking wait ran past its deadline.
    #[error("wait timed out after {0:?}")]
    Timeout(Duration),

    /// A blocking wait was cancelled through the session's cancel flag.
    #[error("wait cancelled")]
    Cancelled,

    /// Frame-level error that is not a decode-time condition.
    #[error("frame error: {0}")]
    Frame(FrameError),

    /// The link failed to pull or push bytes.
    #[error("link error: {0}")]
    Link(#[from] std::io::Error),
}

impl SessionError {
    /// Numeric classification of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NullHandle | SessionError::Link(_) => ErrorCode::NullHandle,
            SessionError::Checksum { .. } => ErrorCode::Checksum,
            SessionError::NotInitialized => ErrorCode::NotInitialized,
            SessionError::ReceiveOverflow { .. } => ErrorCode::ReceiveOverflow,
            SessionError::Nak { .. } => ErrorCode::Nak,
            SessionError::Timeout(_) | SessionError::Cancelled => ErrorCode::Timeout,
            SessionError::Frame(err) => match err {
                FrameError::Checksum { .. } => ErrorCode::Checksum,
                FrameError::ReceiveOverflow { .. } => ErrorCode::ReceiveOverflow,
                FrameError::PayloadTooLarge { .. } => ErrorCode::ReceiveOverflow,
                FrameError::Io(_) => ErrorCode::NullHandle,
            },
        }
    }
}

impl From<FrameError> for SessionError {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::Checksum { class, id, .. } => SessionError::Checksum { class, id },
            FrameError::ReceiveOverflow { declared, capacity } => {
                SessionError::ReceiveOverflow { declared, capacity }
            }
            FrameError::Io(io) => SessionError::Link(io),
            other => SessionError::Frame(other),
        }
    }
}

/// The session's "last error" record.
///
/// Numeric values are stable so they can be logged or exported unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(i8)]
pub enum ErrorCode {
    #[default]
    Ok = 0,
    NullHandle = -1,
    Checksum = -2,
    NotInitialized = -3,
    ReceiveOverflow = -4,
    UnknownClass = -5,
    Nak = -6,
    Timeout = -7,
}

impl ErrorCode {
    /// Raw numeric value.
    pub fn as_i8(self) -> i8 {
        self as i8
    }

    /// True for [`ErrorCode::Ok`].
    pub fn is_ok(self) -> bool {
        self == ErrorCode::Ok
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
