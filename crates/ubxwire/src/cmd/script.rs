//! Line-oriented command scripts.
//!
//! ```text
//! ; poll the navigation engine settings
//! > 06 24
//! < 06 24
//! ; set automotive model, auto fix mode
//! > 06 24 05 00 04 03 00 00 ...
//! ```
//!
//! `>` sends `CLASS ID [PAYLOAD...]`, `<` waits for the ACK of `CLASS ID`.
//! Replies to a send stay queued on the link until the next `<` line.
//! Other lines are ignored. A malformed line or a failing step is reported
//! and the script continues.

use std::fs;

use serde::Serialize;
use ubxwire_frame::Message;
use ubxwire_session::{Session, SessionError};
use ubxwire_transport::ByteLink;

use crate::cmd::hex::{parse_byte, parse_bytes};
use crate::cmd::{open_session, ScriptArgs};
use crate::exit::{io_error, session_error, CliError, CliResult, SUCCESS};
use crate::output::{display_name, print_json, OutputFormat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Send { line: usize, message: Message },
    ExpectAck { line: usize, class: u8, id: u8 },
    /// A `>`/`<` line that could not be parsed.
    Malformed { line: usize, error: String },
}

#[derive(Debug, Serialize)]
pub struct StepOutcome {
    pub line: usize,
    pub action: &'static str,
    pub message: String,
    pub ok: bool,
    pub error: Option<String>,
    #[serde(skip)]
    pub exit_code: i32,
}

pub fn run(args: ScriptArgs, format: OutputFormat) -> CliResult<i32> {
    let text = fs::read_to_string(&args.path)
        .map_err(|err| io_error(&format!("failed reading {}", args.path.display()), err))?;
    let steps = parse(&text);
    let mut session = open_session(&args.link)?;

    let outcomes = execute(&mut session, &steps);
    for outcome in &outcomes {
        print_outcome(outcome, format);
    }

    Ok(outcomes
        .iter()
        .find(|o| !o.ok)
        .map(|o| o.exit_code)
        .unwrap_or(SUCCESS))
}

/// Parse a script. Malformed `>`/`<` lines become [`Step::Malformed`].
pub fn parse(text: &str) -> Vec<Step> {
    let mut steps = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let Some(kind) = raw.chars().next() else {
            continue;
        };
        let rest = &raw[kind.len_utf8()..];

        let parsed = match kind {
            '>' => parse_send(rest).map(|message| Step::Send { line, message }),
            '<' => parse_class_id(&mut rest.split_whitespace())
                .map(|(class, id)| Step::ExpectAck { line, class, id }),
            _ => continue,
        };
        steps.push(parsed.unwrap_or_else(|error| Step::Malformed { line, error }));
    }

    steps
}

fn parse_send(rest: &str) -> Result<Message, String> {
    let mut tokens = rest.split_whitespace();
    let (class, id) = parse_class_id(&mut tokens)?;
    let payload = parse_bytes(&tokens.collect::<Vec<_>>().join(" "))
        .map_err(|err| format!("invalid payload: {err}"))?;
    Ok(Message::new(class, id, payload))
}

fn parse_class_id<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<(u8, u8), String> {
    let class = parse_byte(tokens.next().unwrap_or_default())
        .map_err(|err| format!("invalid message class: {err}"))?;
    let id = parse_byte(tokens.next().unwrap_or_default())
        .map_err(|err| format!("invalid message id: {err}"))?;
    Ok((class, id))
}

/// Run every step, collecting outcomes.
pub fn execute<L: ByteLink>(session: &mut Session<L>, steps: &[Step]) -> Vec<StepOutcome> {
    steps
        .iter()
        .map(|step| match step {
            Step::Send { line, message } => {
                tracing::info!(line, class = message.class, id = message.id, "sending");
                let result = session.send(message);
                outcome(*line, "send", display_name(message.class, message.id), result)
            }
            Step::ExpectAck { line, class, id } => {
                tracing::info!(line, class, id, "awaiting ack");
                let result = session.wait_for_ack(*class, *id);
                outcome(*line, "expect-ack", display_name(*class, *id), result)
            }
            Step::Malformed { line, error } => {
                let cli = CliError::usage(format!("line {line}: {error}"));
                tracing::warn!(line, error = %cli, "script line skipped");
                StepOutcome {
                    line: *line,
                    action: "parse",
                    message: String::new(),
                    ok: false,
                    error: Some(cli.message),
                    exit_code: cli.code,
                }
            }
        })
        .collect()
}

fn outcome(
    line: usize,
    action: &'static str,
    message: String,
    result: Result<(), SessionError>,
) -> StepOutcome {
    match result {
        Ok(()) => StepOutcome {
            line,
            action,
            message,
            ok: true,
            error: None,
            exit_code: SUCCESS,
        },
        Err(err) => {
            let cli = session_error(&format!("line {line}"), err);
            tracing::warn!(line, error = %cli, "script step failed");
            StepOutcome {
                line,
                action,
                message,
                ok: false,
                error: Some(cli.message),
                exit_code: cli.code,
            }
        }
    }
}

fn print_outcome(outcome: &StepOutcome, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(outcome),
        _ => match &outcome.error {
            None => println!("line {}: {} {} ok", outcome.line, outcome.action, outcome.message),
            Some(err) => println!(
                "line {}: {} {} failed: {err}",
                outcome.line, outcome.action, outcome.message
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ubxwire_frame::encode_to_vec;
    use ubxwire_session::SessionConfig;
    use ubxwire_transport::MemoryLink;

    use super::*;

    const SCRIPT: &str = "\
; comment
> 06 24
< 06 24
# ignored
> 06 08 E8 03 01 00 01 00
< 06 08
";

    #[test]
    fn parses_send_and_expect_lines() {
        let steps = parse(SCRIPT);
        assert_eq!(steps.len(), 4);
        assert_eq!(
            steps[0],
            Step::Send {
                line: 2,
                message: Message::poll(0x06, 0x24)
            }
        );
        assert_eq!(
            steps[3],
            Step::ExpectAck {
                line: 6,
                class: 0x06,
                id: 0x08
            }
        );
        let Step::Send { message, .. } = &steps[2] else {
            panic!("expected send step");
        };
        assert_eq!(message.length, 6);
    }

    #[test]
    fn malformed_line_is_kept_with_its_line_number() {
        let steps = parse("; ok\n> 0G 24\n<\n> 06 24\n");
        assert_eq!(steps.len(), 3);
        assert!(matches!(&steps[0], Step::Malformed { line: 2, error } if error.contains("class")));
        assert!(matches!(&steps[1], Step::Malformed { line: 3, .. }));
        assert_eq!(
            steps[2],
            Step::Send {
                line: 4,
                message: Message::poll(0x06, 0x24)
            }
        );
    }

    #[test]
    fn malformed_line_does_not_stop_the_script() {
        let link = MemoryLink::new().with_responder(|sent: &[u8]| {
            encode_to_vec(&Message::new(0x05, 0x01, vec![sent[2], sent[3]])).unwrap()
        });
        let config = SessionConfig {
            wait_timeout: Some(Duration::from_millis(100)),
            ..SessionConfig::default()
        };
        let mut session = Session::new(link, config);

        let outcomes = execute(&mut session, &parse("> 06 2\n> 06 24\n< 06 24\n"));
        let ok: Vec<bool> = outcomes.iter().map(|o| o.ok).collect();
        assert_eq!(ok, vec![false, true, true]);
        assert_eq!(outcomes[0].exit_code, crate::exit::USAGE);
        assert!(outcomes[0].error.as_deref().unwrap_or_default().starts_with("line 1:"));
    }

    #[test]
    fn executes_against_acking_peer() {
        let link = MemoryLink::new().with_responder(|sent: &[u8]| {
            let (class, id) = (sent[2], sent[3]);
            let ack_id = if id == 0x08 { 0x00 } else { 0x01 };
            encode_to_vec(&Message::new(0x05, ack_id, vec![class, id])).unwrap()
        });
        let config = SessionConfig {
            wait_timeout: Some(Duration::from_millis(100)),
            ..SessionConfig::default()
        };
        let mut session = Session::new(link, config);

        let outcomes = execute(&mut session, &parse(SCRIPT));
        let ok: Vec<bool> = outcomes.iter().map(|o| o.ok).collect();
        assert_eq!(ok, vec![true, true, true, false]);
        assert_eq!(outcomes[3].exit_code, crate::exit::REJECTED);
    }
}
