use clap::{Args, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use ubxwire_session::{DynamicPlatformModel, FixMode, Session, SessionConfig};
use ubxwire_transport::{open_serial, ByteLink, SerialSettings};

use crate::exit::{transport_error, CliError, CliResult};
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod hex;
pub mod info;
pub mod listen;
pub mod script;
pub mod set_model;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode UBX frames from a hex string or a binary capture.
    Decode(DecodeArgs),
    /// Encode a single UBX frame.
    Encode(EncodeArgs),
    /// Run a command script against a receiver.
    Script(ScriptArgs),
    /// Query receiver version and navigation configuration.
    Info(InfoArgs),
    /// Set the dynamic platform model and fix mode.
    SetModel(SetModelArgs),
    /// Print every message received until interrupted.
    Listen(ListenArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Script(args) => script::run(args, format),
        Command::Info(args) => info::run(args, format),
        Command::SetModel(args) => set_model::run(args, format),
        Command::Listen(args) => listen::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Serial link options shared by commands that talk to a receiver.
#[derive(Args, Debug, Clone)]
pub struct LinkArgs {
    /// Serial device (e.g. /dev/ttyACM0, COM3).
    #[arg(long, short = 'p', env = "UBXWIRE_PORT")]
    pub port: Option<PathBuf>,
    /// Baud rate.
    #[arg(long, short = 'b', default_value = "9600", env = "UBXWIRE_BAUD")]
    pub baud: u32,
    /// How long to wait for each reply (e.g. 5s, 500ms).
    #[arg(long, default_value = "5s")]
    pub timeout: String,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Hex bytes, e.g. "B5 62 05 01 02 00 06 24 32 5B".
    #[arg(long, conflicts_with = "file")]
    pub hex: Option<String>,
    /// Binary capture file.
    #[arg(long, conflicts_with = "hex")]
    pub file: Option<PathBuf>,
    /// Receive payload capacity in bytes.
    #[arg(long, default_value = "1024")]
    pub capacity: usize,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Message class (hex, e.g. 06).
    pub class: String,
    /// Message id (hex, e.g. 24).
    pub id: String,
    /// Payload bytes (hex).
    pub payload: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ScriptArgs {
    /// Script file: `>` lines send, `<` lines wait for ACK, `;` lines are comments.
    pub path: PathBuf,
    #[command(flatten)]
    pub link: LinkArgs,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub link: LinkArgs,
}

#[derive(Args, Debug)]
pub struct SetModelArgs {
    /// portable, stationary, pedestrian, automotive, sea, airborne1g, airborne2g, airborne4g.
    #[arg(value_parser = parse_model)]
    pub model: DynamicPlatformModel,
    /// 2d, 3d or auto.
    #[arg(long, default_value = "auto", value_parser = parse_fix_mode)]
    pub fix_mode: FixMode,
    #[command(flatten)]
    pub link: LinkArgs,
}

#[derive(Args, Debug)]
pub struct ListenArgs {
    /// Exit after receiving N messages.
    #[arg(long)]
    pub count: Option<usize>,
    #[command(flatten)]
    pub link: LinkArgs,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

fn parse_model(input: &str) -> Result<DynamicPlatformModel, String> {
    DynamicPlatformModel::from_name(input).ok_or_else(|| format!("unknown platform model: {input}"))
}

fn parse_fix_mode(input: &str) -> Result<FixMode, String> {
    FixMode::from_name(input).ok_or_else(|| format!("unknown fix mode: {input}"))
}

/// Open the serial link and wrap it in a session.
pub fn open_session(link: &LinkArgs) -> CliResult<Session<impl ByteLink>> {
    let config = SessionConfig {
        wait_timeout: Some(parse_duration(&link.timeout)?),
        ..SessionConfig::default()
    };
    let path = link.port.clone().ok_or_else(|| {
        CliError::usage("no serial port given (use --port or UBXWIRE_PORT)")
    })?;
    let settings = SerialSettings {
        path,
        baud_rate: link.baud,
        ..SerialSettings::default()
    };
    let port = open_serial(&settings).map_err(|err| transport_error("open failed", err))?;
    Ok(Session::new(port, config))
}

/// Parse `500ms`, `5s` or a bare number of seconds.
pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::usage("duration must not be empty"));
    }

    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (number, unit) = input.split_at(split);

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::usage(format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::usage("duration must be greater than zero"));
    }

    match unit.trim() {
        "ms" => Ok(Duration::from_millis(value)),
        "" | "s" => Ok(Duration::from_secs(value)),
        other => Err(CliError::usage(format!("unsupported duration unit: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_seconds_and_millis() {
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("150ms").unwrap(), Duration::from_millis(150));
        assert_eq!(parse_duration("3").unwrap(), Duration::from_secs(3));
    }

    #[test]
    fn parse_duration_rejects_invalid_values() {
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("bad").is_err());
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn parse_duration_rejects_unknown_units() {
        for input in ["5m", "2h", "10us", "3 min"] {
            let err = parse_duration(input).unwrap_err();
            assert_eq!(err.code, crate::exit::USAGE);
            assert!(err.message.contains("unsupported duration unit"), "{input}");
        }
        assert_eq!(parse_duration("250 ms").unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn missing_port_is_usage_error() {
        let link = LinkArgs {
            port: None,
            baud: 9600,
            timeout: "1s".to_string(),
        };
        let err = open_session(&link).err().unwrap();
        assert_eq!(err.code, crate::exit::USAGE);
    }

    #[test]
    fn model_names_parse() {
        assert_eq!(parse_model("sea").unwrap(), DynamicPlatformModel::Sea);
        assert!(parse_model("boat").is_err());
        assert_eq!(parse_fix_mode("2d").unwrap(), FixMode::TwoDOnly);
    }
}
