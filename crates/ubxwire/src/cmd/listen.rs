use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ubxwire_session::{Session, SessionError};
use ubxwire_transport::ByteLink;

use crate::cmd::{open_session, ListenArgs};
use crate::exit::{session_error, CliError, CliResult, SUCCESS};
use crate::output::{print_records, OutputFormat, RecordCollector};

pub fn run(args: ListenArgs, format: OutputFormat) -> CliResult<i32> {
    let collector = RecordCollector::new();
    let mut session = open_session(&args.link)?.with_listener(collector.clone());

    let stop = Arc::new(AtomicBool::new(false));
    install_ctrlc_handler(stop.clone())?;
    session.set_cancel_flag(stop.clone());

    listen(&mut session, &collector, args.count, &stop, |records| {
        print_records(records, format)
    })
    .map_err(|err| session_error("receive failed", err))?;
    Ok(SUCCESS)
}

/// Pump until `count` messages were seen or `stop` is raised, handing each
/// batch of records to `emit`.
pub fn listen<L, F>(
    session: &mut Session<L>,
    collector: &RecordCollector,
    count: Option<usize>,
    stop: &AtomicBool,
    mut emit: F,
) -> Result<usize, SessionError>
where
    L: ByteLink,
    F: FnMut(&[crate::output::MessageRecord]),
{
    let mut printed = 0usize;
    let idle = session.config().idle_backoff;

    while !stop.load(Ordering::SeqCst) {
        let pulled = session.pump()?;

        let mut records = collector.drain();
        if let Some(limit) = count {
            records.truncate(limit.saturating_sub(printed));
        }
        if !records.is_empty() {
            emit(&records);
            printed = printed.saturating_add(records.len());
        }

        if count.is_some_and(|limit| printed >= limit) {
            break;
        }
        if pulled == 0 {
            std::thread::sleep(idle);
        }
    }

    Ok(printed)
}

fn install_ctrlc_handler(stop: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        stop.store(true, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}
