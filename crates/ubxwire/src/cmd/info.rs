use serde::Serialize;
use ubxwire_session::{ChipsetVersion, DynamicPlatformModel, FixMode, Session, SessionError};
use ubxwire_transport::ByteLink;

use crate::cmd::{open_session, InfoArgs};
use crate::exit::{session_error, CliResult, SUCCESS};
use crate::output::{print_fields, print_json, OutputFormat};

#[derive(Debug, Serialize)]
pub struct InfoOutput {
    pub chipset_version: ChipsetVersion,
    pub software_version: String,
    pub hardware_version: String,
    pub extensions: Vec<String>,
    pub dynamic_platform_model: DynamicPlatformModel,
    pub fix_mode: FixMode,
    pub measurement_rate_ms: u16,
    pub navigation_rate: u16,
    pub time_reference: u16,
}

pub fn run(args: InfoArgs, format: OutputFormat) -> CliResult<i32> {
    let mut session = open_session(&args.link)?;
    let info = query(&mut session).map_err(|err| session_error("query failed", err))?;
    print_info(&info, format);
    Ok(SUCCESS)
}

/// Poll MON-VER, CFG-NAV5 and CFG-RATE and snapshot the receiver cache.
pub fn query<L: ByteLink>(session: &mut Session<L>) -> Result<InfoOutput, SessionError> {
    session.poll_mon_version()?;
    session.poll_cfg_nav5()?;
    session.poll_cfg_rate()?;

    let rx = session.receiver();
    Ok(InfoOutput {
        chipset_version: rx.info.chipset_version,
        software_version: rx.info.software_version.clone(),
        hardware_version: rx.info.hardware_version.clone(),
        extensions: rx.info.extensions.clone(),
        dynamic_platform_model: rx.config.dynamic_platform_model,
        fix_mode: rx.config.fix_mode,
        measurement_rate_ms: rx.config.measurement_rate,
        navigation_rate: rx.config.navigation_rate,
        time_reference: rx.config.time_reference,
    })
}

fn print_info(info: &InfoOutput, format: OutputFormat) {
    if let OutputFormat::Json = format {
        print_json(info);
        return;
    }
    let fields = [
        ("chipset", info.chipset_version.name().to_string()),
        ("software", info.software_version.clone()),
        ("hardware", info.hardware_version.clone()),
        ("extensions", info.extensions.join(", ")),
        ("dynamic model", format!("{:?}", info.dynamic_platform_model)),
        ("fix mode", format!("{:?}", info.fix_mode)),
        ("measurement rate", format!("{} ms", info.measurement_rate_ms)),
        ("navigation rate", info.navigation_rate.to_string()),
        ("time reference", info.time_reference.to_string()),
    ];
    print_fields(&fields, format);
}
