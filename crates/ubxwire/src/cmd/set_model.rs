use serde::Serialize;
use ubxwire_session::{DynamicPlatformModel, FixMode};

use crate::cmd::{open_session, SetModelArgs};
use crate::exit::{session_error, CliResult, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Serialize)]
struct SetModelOutput {
    dynamic_platform_model: DynamicPlatformModel,
    fix_mode: FixMode,
    acknowledged: bool,
}

pub fn run(args: SetModelArgs, format: OutputFormat) -> CliResult<i32> {
    let mut session = open_session(&args.link)?;
    session
        .set_dynamic_model(args.model, args.fix_mode)
        .map_err(|err| session_error("set model failed", err))?;

    match format {
        OutputFormat::Json => print_json(&SetModelOutput {
            dynamic_platform_model: args.model,
            fix_mode: args.fix_mode,
            acknowledged: true,
        }),
        _ => println!("{:?} / {:?} acknowledged", args.model, args.fix_mode),
    }
    Ok(SUCCESS)
}
