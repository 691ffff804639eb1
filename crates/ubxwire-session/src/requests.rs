//! Request helpers for the configuration and monitoring messages the
//! session interprets.

use ubxwire_frame::Message;
use ubxwire_transport::ByteLink;

use crate::class::{self, cfg, mon};
use crate::error::Result;
use crate::event::Event;
use crate::receiver::{DynamicPlatformModel, FixMode};
use crate::session::Session;

/// CFG-NAV5 payload size.
pub const CFG_NAV5_LEN: usize = 36;

const NAV5_MASK_DYN: u16 = 0x0001;
const NAV5_MASK_FIX_MODE: u16 = 0x0004;

/// Build a CFG-NAV5 set request. Parameters left `NotSet` are masked out.
pub fn cfg_nav5_set(model: DynamicPlatformModel, fix_mode: FixMode) -> Message {
    let mut payload = vec![0u8; CFG_NAV5_LEN];
    let mut mask = 0u16;

    if let Some(code) = model.code() {
        mask |= NAV5_MASK_DYN;
        payload[2] = code;
    }
    if let Some(code) = fix_mode.code() {
        mask |= NAV5_MASK_FIX_MODE;
        payload[3] = code;
    }
    payload[..2].copy_from_slice(&mask.to_le_bytes());

    Message::new(class::CFG, cfg::NAV5, payload)
}

/// Build a CFG-RATE set request.
pub fn cfg_rate_set(measurement_ms: u16, navigation_cycles: u16, time_reference: u16) -> Message {
    let mut payload = Vec::with_capacity(6);
    payload.extend_from_slice(&measurement_ms.to_le_bytes());
    payload.extend_from_slice(&navigation_cycles.to_le_bytes());
    payload.extend_from_slice(&time_reference.to_le_bytes());
    Message::new(class::CFG, cfg::RATE, payload)
}

impl<L: ByteLink> Session<L> {
    /// Poll CFG-NAV5 and wait for the ACK. The reply updates the dynamic
    /// platform model and fix mode.
    pub fn poll_cfg_nav5(&mut self) -> Result<()> {
        self.poll_for_ack(class::CFG, cfg::NAV5)
    }

    /// Poll CFG-PRT and wait for the ACK.
    pub fn poll_cfg_port(&mut self) -> Result<()> {
        self.poll_for_ack(class::CFG, cfg::PRT)
    }

    /// Poll CFG-RATE and wait for the ACK.
    pub fn poll_cfg_rate(&mut self) -> Result<()> {
        self.poll_for_ack(class::CFG, cfg::RATE)
    }

    /// Poll MON-VER and wait for the reply. MON messages are not
    /// acknowledged.
    pub fn poll_mon_version(&mut self) -> Result<()> {
        self.poll_for_event(class::MON, mon::VER, Event::ReceivedMonVersion)
    }

    /// Poll MON-GNSS and wait for the reply.
    pub fn poll_mon_gnss(&mut self) -> Result<()> {
        self.poll_for_event(class::MON, mon::GNSS, Event::ReceivedMonGnss)
    }

    /// Set the dynamic platform model and fix mode and wait for the ACK.
    pub fn set_dynamic_model(&mut self, model: DynamicPlatformModel, fix_mode: FixMode) -> Result<()> {
        tracing::info!(?model, ?fix_mode, "setting navigation engine model");
        self.send_and_wait_for_ack(&cfg_nav5_set(model, fix_mode))
    }

    /// Set the measurement period and navigation rate and wait for the ACK.
    pub fn set_measurement_rate(
        &mut self,
        measurement_ms: u16,
        navigation_cycles: u16,
        time_reference: u16,
    ) -> Result<()> {
        tracing::info!(measurement_ms, navigation_cycles, time_reference, "setting measurement rate");
        self.send_and_wait_for_ack(&cfg_rate_set(measurement_ms, navigation_cycles, time_reference))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::class::ack;
    use crate::config::SessionConfig;
    use crate::error::SessionError;
    use crate::handlers::tests::mon_ver_payload;
    use crate::receiver::ChipsetVersion;
    use crate::session::tests::{frame, peer, recording};

    fn config() -> SessionConfig {
        SessionConfig {
            wait_timeout: Some(Duration::from_millis(200)),
            ..SessionConfig::default()
        }
    }

    /// A receiver that knows a few configuration values.
    fn simulated_receiver() -> ubxwire_transport::MemoryLink {
        peer(|cls, id, payload| {
            let ack_for = |accepted: bool| {
                let ack_id = if accepted { ack::ACK } else { ack::NAK };
                frame(class::ACK, ack_id, &[cls, id])
            };
            match (cls, id, payload.is_empty()) {
                (class::CFG, cfg::NAV5, true) => {
                    let mut nav5 = vec![0u8; CFG_NAV5_LEN];
                    nav5[2] = 3;
                    nav5[3] = 2;
                    vec![frame(cls, id, &nav5), ack_for(true)]
                }
                (class::CFG, cfg::RATE, true) => {
                    vec![frame(cls, id, &[0xC8, 0x00, 0x05, 0x00, 0x00, 0x00]), ack_for(true)]
                }
                (class::CFG, cfg::PRT, true) => {
                    let mut prt = vec![0u8; 20];
                    prt[0] = 1;
                    prt[8..12].copy_from_slice(&38400u32.to_le_bytes());
                    prt[12] = 0x01;
                    prt[14] = 0x01;
                    vec![frame(cls, id, &prt), ack_for(true)]
                }
                (class::MON, mon::VER, true) => {
                    vec![frame(cls, id, &mon_ver_payload("ROM SPG 5.10", "00190000", &["PROTVER=34.10"]))]
                }
                (class::MON, mon::GNSS, true) => {
                    vec![frame(cls, id, &[0x00, 0x0F, 0x0F, 0x0B, 0x04, 0, 0, 0])]
                }
                (class::CFG, cfg::NAV5, false) => vec![ack_for(payload[2] != 1)],
                (class::CFG, _, false) => vec![ack_for(true)],
                _ => Vec::new(),
            }
        })
    }

    #[test]
    fn set_dynamic_model_payload_layout() {
        let msg = cfg_nav5_set(DynamicPlatformModel::Automotive, FixMode::Auto);
        assert_eq!(msg.payload.len(), CFG_NAV5_LEN);
        assert_eq!(&msg.payload[..4], &[0x05, 0x00, 0x04, 0x03]);
        assert!(msg.payload[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn unset_fields_are_masked_out() {
        let msg = cfg_nav5_set(DynamicPlatformModel::Sea, FixMode::NotSet);
        assert_eq!(&msg.payload[..4], &[0x01, 0x00, 0x05, 0x00]);
    }

    #[test]
    fn rate_payload_is_little_endian() {
        let msg = cfg_rate_set(1000, 1, 1);
        assert_eq!(msg.payload.as_ref(), &[0xE8, 0x03, 0x01, 0x00, 0x01, 0x00]);
    }

    #[test]
    fn poll_cfg_nav5_updates_config() {
        let mut session = Session::new(simulated_receiver(), config());
        session.poll_cfg_nav5().unwrap();
        assert_eq!(session.dynamic_platform_model(), DynamicPlatformModel::Pedestrian);
        assert_eq!(session.fix_mode(), FixMode::ThreeDOnly);
    }

    #[test]
    fn poll_cfg_rate_and_port() {
        let mut session = Session::new(simulated_receiver(), config());
        session.poll_cfg_rate().unwrap();
        session.poll_cfg_port().unwrap();
        assert_eq!(session.measurement_rate(), 200);
        assert_eq!(session.navigation_rate(), 5);
        assert_eq!(session.port_config().map(|p| p.baud_rate), Some(38400));
    }

    #[test]
    fn poll_mon_version_and_gnss() {
        let (mut session, events) = recording(Session::new(simulated_receiver(), config()));
        session.poll_mon_version().unwrap();
        session.poll_mon_gnss().unwrap();

        assert_eq!(session.software_version(), "ROM SPG 5.10");
        assert_eq!(session.hardware_version(), "00190000");
        assert_eq!(session.chipset_version(), ChipsetVersion::Unknown);
        assert_eq!(session.gnss_selection().map(|g| g.simultaneous), Some(4));
        assert_eq!(
            *events.lock().unwrap(),
            vec![Event::ReceivedMonVersion, Event::ReceivedMonGnss]
        );
    }

    #[test]
    fn set_requests_wait_for_ack() {
        let mut session = Session::new(simulated_receiver(), config());
        session
            .set_dynamic_model(DynamicPlatformModel::Airborne1G, FixMode::Auto)
            .unwrap();
        session.set_measurement_rate(100, 1, 0).unwrap();

        let sent = session.link_mut().unwrap().take_sent();
        let first = frame(class::CFG, cfg::NAV5, &cfg_nav5_set(DynamicPlatformModel::Airborne1G, FixMode::Auto).payload);
        assert_eq!(&sent[..first.len()], first.as_slice());
    }

    #[test]
    fn rejected_request_returns_nak() {
        let mut session = Session::new(simulated_receiver(), config());
        let err = session
            .set_dynamic_model(DynamicPlatformModel::Other(1), FixMode::Auto)
            .unwrap_err();
        assert!(matches!(err, SessionError::Nak { class: class::CFG, id: cfg::NAV5 }));
    }
}
