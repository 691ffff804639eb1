use serde::Serialize;
use ubxwire_frame::{encode_to_vec, Message};

use crate::cmd::hex::{format_bytes, parse_byte, parse_bytes};
use crate::cmd::EncodeArgs;
use crate::exit::{frame_error, CliError, CliResult, SUCCESS};
use crate::output::{display_name, print_json, print_raw, OutputFormat};

#[derive(Serialize)]
struct EncodeOutput {
    name: String,
    class: u8,
    id: u8,
    length: usize,
    ck_a: u8,
    ck_b: u8,
    frame: String,
}

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let message = build_message(&args)?;
    let wire = encode_to_vec(&message).map_err(|err| frame_error("encode failed", err))?;

    match format {
        OutputFormat::Raw => print_raw(&wire),
        OutputFormat::Json => print_json(&EncodeOutput {
            name: display_name(message.class, message.id),
            class: message.class,
            id: message.id,
            length: message.payload.len(),
            ck_a: message.ck_a,
            ck_b: message.ck_b,
            frame: format_bytes(&wire),
        }),
        OutputFormat::Table | OutputFormat::Pretty => println!("{}", format_bytes(&wire)),
    }
    Ok(SUCCESS)
}

fn build_message(args: &EncodeArgs) -> CliResult<Message> {
    let class = parse_byte(&args.class).map_err(|err| CliError::usage(format!("class: {err}")))?;
    let id = parse_byte(&args.id).map_err(|err| CliError::usage(format!("id: {err}")))?;
    let payload =
        parse_bytes(&args.payload.join(" ")).map_err(|err| CliError::usage(format!("payload: {err}")))?;
    Ok(Message::new(class, id, payload))
}
