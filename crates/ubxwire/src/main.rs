mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel, LOG_LEVEL_ENV};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "ubxwire", version, about = "UBX protocol tool for u-blox GNSS receivers")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr). Defaults to $UBXWIRE_LOG, then warn.
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    let env_level = std::env::var(LOG_LEVEL_ENV).ok();
    init_logging(
        cli.log_format,
        LogLevel::resolve(cli.log_level, env_level.as_deref()),
    );

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decode_subcommand() {
        let cli = Cli::try_parse_from(["ubxwire", "decode", "--hex", "B5 62 05 01 02 00 06 24 32 5B"])
            .expect("decode args should parse");
        assert!(matches!(cli.command, Command::Decode(_)));
    }

    #[test]
    fn rejects_conflicting_decode_inputs() {
        let err = Cli::try_parse_from([
            "ubxwire",
            "decode",
            "--hex",
            "B5 62",
            "--file",
            "capture.ubx",
        ])
        .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn parses_encode_with_payload() {
        let cli = Cli::try_parse_from(["ubxwire", "encode", "06", "24", "00", "01"])
            .expect("encode args should parse");
        let Command::Encode(args) = cli.command else {
            panic!("expected encode");
        };
        assert_eq!(args.class, "06");
        assert_eq!(args.payload, vec!["00", "01"]);
    }

    #[test]
    fn parses_set_model_with_link_options() {
        let cli = Cli::try_parse_from([
            "ubxwire",
            "set-model",
            "automotive",
            "--fix-mode",
            "3d",
            "--port",
            "/dev/ttyACM0",
            "--timeout",
            "2s",
        ])
        .expect("set-model args should parse");
        let Command::SetModel(args) = cli.command else {
            panic!("expected set-model");
        };
        assert_eq!(
            args.model,
            ubxwire_session::DynamicPlatformModel::Automotive
        );
        assert_eq!(args.fix_mode, ubxwire_session::FixMode::ThreeDOnly);
        assert_eq!(args.link.timeout, "2s");
    }

    #[test]
    fn rejects_unknown_platform_model() {
        let err = Cli::try_parse_from(["ubxwire", "set-model", "submarine"])
            .expect_err("unknown model should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
