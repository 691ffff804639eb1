use std::fs;

use ubxwire_frame::{DecodeState, FrameConfig};
use ubxwire_session::{ErrorCode, Session, SessionConfig, SessionError};

use crate::cmd::hex::parse_bytes;
use crate::cmd::DecodeArgs;
use crate::exit::{io_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_records, MessageRecord, OutputFormat, RecordCollector};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let bytes = resolve_input(&args)?;
    let config = SessionConfig {
        frame: FrameConfig {
            payload_capacity: args.capacity,
        },
        ..SessionConfig::default()
    };

    let records = decode_bytes(&bytes, config)?;
    print_records(&records, format);

    let failed = records.iter().any(|r| r.error.is_some());
    Ok(if failed { DATA_INVALID } else { SUCCESS })
}

fn resolve_input(args: &DecodeArgs) -> CliResult<Vec<u8>> {
    if let Some(hex) = &args.hex {
        return parse_bytes(hex).map_err(CliError::usage);
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Err(CliError::usage("nothing to decode (use --hex or --file)"))
}

/// Run bytes through a detached session and collect one record per frame.
pub fn decode_bytes(bytes: &[u8], config: SessionConfig) -> CliResult<Vec<MessageRecord>> {
    let collector = RecordCollector::new();
    let mut session = Session::detached(config).with_listener(collector.clone());

    for &byte in bytes {
        let completing = session.decode_state() == DecodeState::AwaitChecksumB;
        let before = collector.len();

        match session.feed(byte) {
            Ok(()) | Err(SessionError::ReceiveOverflow { .. }) => {}
            Err(err) => {
                return Err(CliError::new(
                    crate::exit::INTERNAL,
                    format!("decode failed: {err}"),
                ))
            }
        }

        if completing && session.last_error() != ErrorCode::Ok {
            if collector.len() > before {
                collector.mark_last(session.last_error());
            } else {
                collector.push(MessageRecord::rejected(session.last_error()));
            }
        }
    }

    Ok(collector.drain())
}
