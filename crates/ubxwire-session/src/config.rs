use std::time::Duration;

use ubxwire_frame::FrameConfig;

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Decoder settings.
    pub frame: FrameConfig,

    /// Deadline for blocking waits. `None` waits until the condition is met
    /// or the cancel flag is raised. Default: 5 s.
    pub wait_timeout: Option<Duration>,

    /// Sleep between pump passes that pulled nothing. Default: 1 ms.
    pub idle_backoff: Duration,

    /// Bytes requested from the link per pull. Default: 256.
    pub pull_chunk: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frame: FrameConfig::default(),
            wait_timeout: Some(Duration::from_secs(5)),
            idle_backoff: Duration::from_millis(1),
            pull_chunk: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.frame.payload_capacity, 1024);
        assert_eq!(config.wait_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.pull_chunk, 256);
    }
}
