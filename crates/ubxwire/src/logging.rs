use clap::ValueEnum;
use tracing::level_filters::LevelFilter;

/// Environment variable consulted when `--log-level` is not given.
pub const LOG_LEVEL_ENV: &str = "UBXWIRE_LOG";

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }

    /// Explicit flag wins, then `UBXWIRE_LOG`, then `warn`.
    pub fn resolve(explicit: Option<LogLevel>, env_value: Option<&str>) -> LogLevel {
        explicit
            .or_else(|| env_value.and_then(|v| LogLevel::from_str(v.trim(), true).ok()))
            .unwrap_or(LogLevel::Warn)
    }
}

/// Install the stderr subscriber. Stdout stays reserved for command output.
pub fn init_logging(format: LogFormat, level: LogLevel) {
    if level == LogLevel::Off {
        return;
    }

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level.as_filter())
        .with_ansi(false)
        .with_target(false);

    // A second init (tests, embedding) keeps the first subscriber.
    match format {
        LogFormat::Text => {
            let _ = builder.try_init();
        }
        LogFormat::Json => {
            let _ = builder.json().try_init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_level_beats_environment() {
        assert_eq!(
            LogLevel::resolve(Some(LogLevel::Debug), Some("trace")),
            LogLevel::Debug
        );
    }

    #[test]
    fn environment_level_is_case_insensitive() {
        assert_eq!(LogLevel::resolve(None, Some(" INFO ")), LogLevel::Info);
        assert_eq!(LogLevel::resolve(None, Some("off")), LogLevel::Off);
    }

    #[test]
    fn unknown_or_missing_level_falls_back_to_warn() {
        assert_eq!(LogLevel::resolve(None, Some("loud")), LogLevel::Warn);
        assert_eq!(LogLevel::resolve(None, None), LogLevel::Warn);
    }
}
