use std::path::PathBuf;

/// Errors that can occur while setting up or driving a byte link.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to open the device at the given path.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An I/O error occurred on the link.
    #[error("link I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;
