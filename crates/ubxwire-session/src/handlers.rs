//! Payload handlers for the messages the session interprets.
//!
//! Each handler reads fixed payload offsets into the [`Receiver`] cache and
//! returns the event to raise. Fields are only updated when the payload is
//! long enough to contain them; the event is raised either way.

use ubxwire_frame::Message;

use crate::event::Event;
use crate::receiver::{
    ChipsetVersion, DynamicPlatformModel, FixMode, GnssSelection, PortConfig, Receiver,
};

/// Width of the software version field read from MON-VER.
pub const SW_VERSION_LEN: usize = 24;
/// Offset of the hardware id in MON-VER.
pub const HW_VERSION_OFFSET: usize = 30;
/// Width of the hardware id field.
pub const HW_VERSION_LEN: usize = 10;
/// Offset of the first MON-VER extension string.
pub const EXTENSION_OFFSET: usize = 40;
/// Width of each MON-VER extension string.
pub const EXTENSION_LEN: usize = 30;

pub fn ack(_msg: &Message, _rx: &mut Receiver) -> Option<Event> {
    Some(Event::ReceivedAck)
}

pub fn nak(_msg: &Message, _rx: &mut Receiver) -> Option<Event> {
    Some(Event::ReceivedNak)
}

pub fn mon_ver(msg: &Message, rx: &mut Receiver) -> Option<Event> {
    let payload = msg.payload.as_ref();

    if !payload.is_empty() {
        rx.info.software_version = c_string(&payload[..SW_VERSION_LEN.min(payload.len())]);
    }
    if let Some(field) = payload.get(HW_VERSION_OFFSET..) {
        let field = &field[..HW_VERSION_LEN.min(field.len())];
        rx.info.hardware_version = c_string(field);
        rx.info.chipset_version = ChipsetVersion::from_hardware_id(&rx.info.hardware_version);
    }
    rx.info.extensions = payload
        .get(EXTENSION_OFFSET..)
        .unwrap_or_default()
        .chunks(EXTENSION_LEN)
        .map(c_string)
        .filter(|ext| !ext.is_empty())
        .collect();

    tracing::debug!(
        software = %rx.info.software_version,
        hardware = %rx.info.hardware_version,
        chipset = ?rx.info.chipset_version,
        "receiver version"
    );
    Some(Event::ReceivedMonVersion)
}

pub fn mon_gnss(msg: &Message, rx: &mut Receiver) -> Option<Event> {
    if let [_, supported, default_gnss, enabled, simultaneous, ..] = msg.payload.as_ref() {
        rx.info.gnss = Some(GnssSelection {
            supported: *supported,
            default_gnss: *default_gnss,
            enabled: *enabled,
            simultaneous: *simultaneous,
        });
    }
    Some(Event::ReceivedMonGnss)
}

pub fn cfg_nav5(msg: &Message, rx: &mut Receiver) -> Option<Event> {
    if let [_, _, model, fix, ..] = msg.payload.as_ref() {
        rx.config.dynamic_platform_model = DynamicPlatformModel::from_u8(*model);
        rx.config.fix_mode = FixMode::from_u8(*fix);
    }
    Some(Event::ReceivedCfgNav5)
}

pub fn cfg_rate(msg: &Message, rx: &mut Receiver) -> Option<Event> {
    let payload = msg.payload.as_ref();
    if let (Some(meas), Some(nav)) = (le_u16(payload, 0), le_u16(payload, 2)) {
        rx.config.measurement_rate = meas;
        rx.config.navigation_rate = nav;
    }
    if let Some(time_ref) = le_u16(payload, 4) {
        rx.config.time_reference = time_ref;
    }
    Some(Event::ReceivedCfgRate)
}

pub fn cfg_prt(msg: &Message, rx: &mut Receiver) -> Option<Event> {
    let payload = msg.payload.as_ref();
    if let (Some(&port_id), Some(baud_rate), Some(in_mask), Some(out_mask)) = (
        payload.first(),
        le_u32(payload, 8),
        le_u16(payload, 12),
        le_u16(payload, 14),
    ) {
        rx.config.port = Some(PortConfig {
            port_id,
            baud_rate,
            in_proto_mask: in_mask,
            out_proto_mask: out_mask,
        });
    }
    Some(Event::ReceivedCfgPrt)
}

pub fn cfg_nmea(_msg: &Message, _rx: &mut Receiver) -> Option<Event> {
    Some(Event::ReceivedCfgNmea)
}

/// Recognized message with no payload interpretation.
pub fn ignore(_msg: &Message, _rx: &mut Receiver) -> Option<Event> {
    None
}

/// Bytes up to the first NUL, lossily decoded.
fn c_string(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}

fn le_u16(payload: &[u8], offset: usize) -> Option<u16> {
    let bytes = payload.get(offset..offset + 2)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn le_u32(payload: &[u8], offset: usize) -> Option<u32> {
    let bytes = payload.get(offset..offset + 4)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
