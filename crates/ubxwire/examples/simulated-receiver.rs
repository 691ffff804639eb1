//! Drive a session against an in-memory receiver.
//!
//! ```text
//! cargo run -p ubxwire --example simulated-receiver
//! ```

use std::time::Duration;

use ubxwire::frame::{encode_to_vec, Message};
use ubxwire::session::{class, DynamicPlatformModel, Event, FixMode};
use ubxwire::transport::MemoryLink;
use ubxwire::{Session, SessionConfig, SessionError};

fn reply(class: u8, id: u8, payload: &[u8]) -> Vec<u8> {
    encode_to_vec(&Message::new(class, id, payload.to_vec())).unwrap_or_default()
}

fn ack(class: u8, id: u8, accepted: bool) -> Vec<u8> {
    let ack_id = if accepted {
        class::ack::ACK
    } else {
        class::ack::NAK
    };
    reply(class::ACK, ack_id, &[class, id])
}

/// A receiver that answers polls and accepts every model except airborne.
fn receiver() -> MemoryLink {
    MemoryLink::new().with_responder(|sent: &[u8]| {
        let Some(msg) = sent.get(2..6) else {
            return Vec::new();
        };
        let (cls, id, len) = (msg[0], msg[1], u16::from_le_bytes([msg[2], msg[3]]));
        match (cls, id, len) {
            (class::MON, class::mon::VER, 0) => {
                let mut ver = vec![0u8; 40];
                let sw = b"ROM CORE 3.01";
                ver[..sw.len()].copy_from_slice(sw);
                ver[30..38].copy_from_slice(b"00080000");
                reply(cls, id, &ver)
            }
            (class::CFG, class::cfg::NAV5, 0) => {
                let mut nav5 = vec![0u8; 36];
                nav5[2] = 0;
                nav5[3] = 3;
                let mut out = reply(cls, id, &nav5);
                out.extend(ack(cls, id, true));
                out
            }
            (class::CFG, class::cfg::NAV5, _) => {
                let model = sent.get(8).copied().unwrap_or_default();
                ack(cls, id, model < 6)
            }
            _ => Vec::new(),
        }
    })
}

fn main() -> Result<(), SessionError> {
    let config = SessionConfig {
        wait_timeout: Some(Duration::from_millis(500)),
        ..SessionConfig::default()
    };
    let mut session = Session::new(receiver(), config).with_listener(|event: Event, msg: &Message| {
        println!(
            "event {event} from class 0x{:02X} id 0x{:02X} ({} bytes)",
            msg.class, msg.id, msg.length
        );
    });

    session.poll_mon_version()?;
    println!(
        "chipset {} running {}",
        session.chipset_version().name(),
        session.software_version()
    );

    session.poll_cfg_nav5()?;
    println!(
        "model {:?}, fix mode {:?}",
        session.dynamic_platform_model(),
        session.fix_mode()
    );

    session.set_dynamic_model(DynamicPlatformModel::Automotive, FixMode::Auto)?;
    println!("automotive model accepted");

    match session.set_dynamic_model(DynamicPlatformModel::Airborne4G, FixMode::Auto) {
        Err(SessionError::Nak { .. }) => println!("airborne model rejected"),
        other => println!("unexpected result: {other:?}"),
    }

    Ok(())
}
