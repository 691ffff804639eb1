use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use ubxwire_frame::{checksum, DecodeState, FrameDecoder, FrameError, Message, SYNC_1, SYNC_2};
use ubxwire_transport::{ByteLink, NullLink};

use crate::class;
use crate::config::SessionConfig;
use crate::dispatch::{Dispatched, Dispatcher};
use crate::error::{ErrorCode, Result, SessionError};
use crate::event::{Event, EventListener};
use crate::receiver::{
    ChipsetVersion, DynamicPlatformModel, FixMode, GnssSelection, PortConfig, Receiver,
};

/// The request an ACK or NAK referred to, as echoed in its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Acknowledgement {
    pub class: u8,
    pub id: u8,
    pub accepted: bool,
}

/// What the current blocking wait is looking for.
#[derive(Debug, Default)]
struct Watch {
    event: Option<Event>,
    event_seen: bool,
    ack: Option<(u8, u8)>,
    ack_outcome: Option<bool>,
}

/// A UBX session over one byte link.
///
/// The session owns the decoder, the handler registry and the receiver
/// cache. It is driven by one thread: bytes go in through [`Session::feed`]
/// or [`Session::pump`], frames go out through [`Session::send`]. The
/// blocking helpers loop over `pump` until their condition is met, the
/// configured timeout elapses, or the cancel flag is raised.
pub struct Session<L = NullLink> {
    link: Option<L>,
    initialized: bool,
    config: SessionConfig,
    decoder: FrameDecoder,
    dispatcher: Dispatcher,
    receiver: Receiver,
    listener: Option<Box<dyn EventListener + Send>>,
    cancel: Arc<AtomicBool>,
    rx_buf: Vec<u8>,
    watch: Watch,

    last_error: ErrorCode,
    last_event: Event,
    last_message: Option<Message>,
    last_ack: Option<Acknowledgement>,
    outgoing: Message,
}

impl Session<NullLink> {
    /// Create a session with no link, for offline decoding.
    ///
    /// `feed` works as usual; anything that needs the link returns
    /// [`SessionError::NullHandle`].
    pub fn detached(config: SessionConfig) -> Self {
        Self::build(None, config)
    }
}

impl<L: ByteLink> Session<L> {
    /// Create a session over `link` with the standard handlers.
    pub fn new(link: L, config: SessionConfig) -> Self {
        Self::build(Some(link), config)
    }

    fn build(link: Option<L>, config: SessionConfig) -> Self {
        Self {
            link,
            initialized: true,
            decoder: FrameDecoder::with_config(config.frame),
            dispatcher: Dispatcher::standard(),
            receiver: Receiver::default(),
            listener: None,
            cancel: Arc::new(AtomicBool::new(false)),
            rx_buf: vec![0u8; config.pull_chunk.max(1)],
            watch: Watch::default(),
            last_error: ErrorCode::Ok,
            last_event: Event::None,
            last_message: None,
            last_ack: None,
            outgoing: Message::default(),
            config,
        }
    }

    /// Attach an event listener.
    pub fn with_listener(mut self, listener: impl EventListener + Send + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Replace the handler registry.
    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// Share a cancel flag with another thread. Raising it makes any
    /// blocking wait return [`SessionError::Cancelled`].
    pub fn set_cancel_flag(&mut self, flag: Arc<AtomicBool>) {
        self.cancel = flag;
    }

    /// The flag currently checked by blocking waits.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Consume one received byte.
    ///
    /// Checksum failures and unknown classes are recorded as the last error
    /// and do not fail the call. A payload byte past capacity fails with
    /// [`SessionError::ReceiveOverflow`]; decoding continues regardless.
    pub fn feed(&mut self, byte: u8) -> Result<()> {
        if !self.initialized {
            return Err(SessionError::NotInitialized);
        }

        match self.decoder.feed(byte) {
            Ok(None) => Ok(()),
            Ok(Some(msg)) => {
                self.process(msg);
                Ok(())
            }
            Err(FrameError::Checksum {
                class,
                id,
                expected,
                received,
            }) => {
                tracing::warn!(class, id, ?expected, ?received, "checksum mismatch");
                self.last_error = ErrorCode::Checksum;
                Ok(())
            }
            Err(FrameError::ReceiveOverflow { declared, capacity }) => {
                if self.decoder.in_frame() {
                    tracing::trace!(declared, capacity, "payload byte dropped");
                } else {
                    tracing::warn!(declared, capacity, "oversized frame discarded");
                }
                self.last_error = ErrorCode::ReceiveOverflow;
                Err(SessionError::ReceiveOverflow { declared, capacity })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Pull whatever the link has and feed every byte. Returns the number
    /// of bytes pulled.
    pub fn pump(&mut self) -> Result<usize> {
        if !self.initialized {
            return Err(SessionError::NotInitialized);
        }
        let link = self.link.as_mut().ok_or(SessionError::NullHandle)?;
        let pulled = link.pull(&mut self.rx_buf)?;

        for i in 0..pulled {
            let byte = self.rx_buf[i];
            match self.feed(byte) {
                Ok(()) | Err(SessionError::ReceiveOverflow { .. }) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(pulled)
    }

    fn process(&mut self, msg: Message) {
        tracing::debug!(
            class = msg.class,
            id = msg.id,
            length = msg.length,
            "frame received"
        );
        if let Some(listener) = self.listener.as_mut() {
            listener.on_message(&msg);
        }
        self.last_message = Some(msg.clone());

        match self.dispatcher.dispatch(&msg, &mut self.receiver) {
            Dispatched::Handled(event) => {
                self.last_error = ErrorCode::Ok;
                if msg.class == class::ACK {
                    self.correlate_ack(&msg);
                }
                if let Some(event) = event {
                    self.raise(event, &msg);
                }
            }
            Dispatched::UnhandledId => {
                self.last_error = ErrorCode::Ok;
            }
            Dispatched::UnknownClass => {
                tracing::warn!(class = msg.class, id = msg.id, "unknown message class");
                self.last_error = ErrorCode::UnknownClass;
            }
        }
    }

    fn correlate_ack(&mut self, msg: &Message) {
        let [acked_class, acked_id, ..] = msg.payload.as_ref() else {
            return;
        };
        let ack = Acknowledgement {
            class: *acked_class,
            id: *acked_id,
            accepted: msg.id == class::ack::ACK,
        };
        tracing::debug!(class = ack.class, id = ack.id, accepted = ack.accepted, "acknowledgement");

        if self.watch.ack == Some((ack.class, ack.id)) {
            self.watch.ack_outcome = Some(ack.accepted);
        }
        self.last_ack = Some(ack);
    }

    fn raise(&mut self, event: Event, msg: &Message) {
        self.last_event = event;
        if self.watch.event == Some(event) {
            self.watch.event_seen = true;
        }
        if let Some(listener) = self.listener.as_mut() {
            listener.on_event(event, msg);
        }
    }

    /// Raise an event explicitly, e.g. one of the debug events.
    pub fn notify(&mut self, event: Event) {
        let msg = self.last_message.clone().unwrap_or_default();
        self.raise(event, &msg);
    }

    /// Encode and push a message.
    ///
    /// The checksum and length are computed from the payload; the message's
    /// own `length`, `ck_a` and `ck_b` are not trusted.
    pub fn send(&mut self, msg: &Message) -> Result<()> {
        if !self.initialized {
            return Err(SessionError::NotInitialized);
        }
        let link = self.link.as_mut().ok_or(SessionError::NullHandle)?;

        let payload = msg.payload.as_ref();
        let length = u16::try_from(payload.len()).map_err(|_| {
            SessionError::Frame(FrameError::PayloadTooLarge {
                size: payload.len(),
                max: u16::MAX as usize,
            })
        })?;
        let (ck_a, ck_b) = checksum(msg.class, msg.id, length, payload);
        let [len_lo, len_hi] = length.to_le_bytes();

        for byte in [SYNC_1, SYNC_2, msg.class, msg.id, len_lo, len_hi] {
            link.push_byte(byte)?;
        }
        if !payload.is_empty() {
            link.push_buffer(payload)?;
        }
        link.push_byte(ck_a)?;
        link.push_byte(ck_b)?;
        link.flush()?;

        tracing::debug!(class = msg.class, id = msg.id, length, "frame sent");
        Ok(())
    }

    /// The outgoing message buffer used by [`Session::send_outgoing`].
    pub fn outgoing_mut(&mut self) -> &mut Message {
        &mut self.outgoing
    }

    /// Send the outgoing message buffer.
    pub fn send_outgoing(&mut self) -> Result<()> {
        let msg = self.outgoing.clone();
        self.send(&msg)
    }

    /// Send an empty-payload request for `class`/`id`.
    pub fn poll(&mut self, class: u8, id: u8) -> Result<()> {
        self.outgoing = Message::poll(class, id);
        self.send_outgoing()
    }

    /// Pump until `target` is raised.
    pub fn wait_for_event(&mut self, target: Event) -> Result<()> {
        self.arm_event(target);
        self.await_watch(|watch| watch.event_seen)
    }

    /// Pump until the receiver acknowledges `class`/`id`.
    ///
    /// ACK and NAK frames for other requests are ignored. A NAK for this
    /// request returns [`SessionError::Nak`].
    pub fn wait_for_ack(&mut self, class: u8, id: u8) -> Result<()> {
        self.arm_ack(class, id);
        self.await_ack(class, id)
    }

    /// Send a message and wait for its ACK.
    pub fn send_and_wait_for_ack(&mut self, msg: &Message) -> Result<()> {
        self.arm_ack(msg.class, msg.id);
        self.send(msg)?;
        self.await_ack(msg.class, msg.id)
    }

    /// Poll `class`/`id` and wait for `event`.
    pub(crate) fn poll_for_event(&mut self, class: u8, id: u8, event: Event) -> Result<()> {
        self.arm_event(event);
        self.poll(class, id)?;
        self.await_watch(|watch| watch.event_seen)
    }

    /// Poll `class`/`id` and wait for its ACK.
    pub(crate) fn poll_for_ack(&mut self, class: u8, id: u8) -> Result<()> {
        self.arm_ack(class, id);
        self.poll(class, id)?;
        self.await_ack(class, id)
    }

    fn arm_event(&mut self, target: Event) {
        self.watch = Watch {
            event: Some(target),
            ..Watch::default()
        };
    }

    fn arm_ack(&mut self, class: u8, id: u8) {
        self.watch = Watch {
            ack: Some((class, id)),
            ..Watch::default()
        };
    }

    fn await_ack(&mut self, class: u8, id: u8) -> Result<()> {
        self.await_watch(|watch| watch.ack_outcome.is_some())?;
        if self.watch.ack_outcome == Some(true) {
            Ok(())
        } else {
            self.last_error = ErrorCode::Nak;
            Err(SessionError::Nak { class, id })
        }
    }

    fn await_watch(&mut self, done: impl Fn(&Watch) -> bool) -> Result<()> {
        let started = Instant::now();
        loop {
            let pulled = self.pump()?;
            if done(&self.watch) {
                return Ok(());
            }
            if self.cancel.load(Ordering::Relaxed) {
                tracing::debug!("wait cancelled");
                return Err(SessionError::Cancelled);
            }
            if let Some(timeout) = self.config.wait_timeout {
                if started.elapsed() >= timeout {
                    tracing::debug!(?timeout, "wait timed out");
                    self.last_error = ErrorCode::Timeout;
                    return Err(SessionError::Timeout(timeout));
                }
            }
            if pulled == 0 {
                std::thread::sleep(self.config.idle_backoff);
            }
        }
    }

    /// Mark the session uninitialized and hand back its link.
    pub fn close(&mut self) -> Option<L> {
        self.initialized = false;
        self.decoder.reset();
        self.watch = Watch::default();
        self.link.take()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn link(&self) -> Option<&L> {
        self.link.as_ref()
    }

    pub fn link_mut(&mut self) -> Option<&mut L> {
        self.link.as_mut()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    /// Cached receiver attributes.
    pub fn receiver(&self) -> &Receiver {
        &self.receiver
    }

    pub fn chipset_version(&self) -> ChipsetVersion {
        self.receiver.info.chipset_version
    }

    pub fn software_version(&self) -> &str {
        &self.receiver.info.software_version
    }

    pub fn hardware_version(&self) -> &str {
        &self.receiver.info.hardware_version
    }

    pub fn dynamic_platform_model(&self) -> DynamicPlatformModel {
        self.receiver.config.dynamic_platform_model
    }

    pub fn fix_mode(&self) -> FixMode {
        self.receiver.config.fix_mode
    }

    pub fn measurement_rate(&self) -> u16 {
        self.receiver.config.measurement_rate
    }

    pub fn navigation_rate(&self) -> u16 {
        self.receiver.config.navigation_rate
    }

    pub fn time_reference(&self) -> u16 {
        self.receiver.config.time_reference
    }

    pub fn port_config(&self) -> Option<PortConfig> {
        self.receiver.config.port
    }

    pub fn gnss_selection(&self) -> Option<GnssSelection> {
        self.receiver.info.gnss
    }

    pub fn last_error(&self) -> ErrorCode {
        self.last_error
    }

    pub fn last_event(&self) -> Event {
        self.last_event
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.last_message.as_ref()
    }

    pub fn last_ack(&self) -> Option<Acknowledgement> {
        self.last_ack
    }

    pub fn decode_state(&self) -> DecodeState {
        self.decoder.state()
    }
}

impl<L> std::fmt::Debug for Session<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("attached", &self.link.is_some())
            .field("initialized", &self.initialized)
            .field("state", &self.decoder.state())
            .field("last_error", &self.last_error)
            .field("last_event", &self.last_event)
            .field("receiver", &self.receiver)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use ubxwire_frame::{encode_to_vec, FrameConfig};
    use ubxwire_transport::MemoryLink;

    use super::*;
    use crate::handlers::tests::mon_ver_payload;

    pub(crate) fn frame(class: u8, id: u8, payload: &[u8]) -> Vec<u8> {
        encode_to_vec(&Message::new(class, id, payload.to_vec())).unwrap()
    }

    /// A link whose peer answers every frame the session sends.
    pub(crate) fn peer<F>(reply: F) -> MemoryLink
    where
        F: Fn(u8, u8, &[u8]) -> Vec<Vec<u8>> + Send + 'static,
    {
        MemoryLink::new().with_responder(move |sent: &[u8]| {
            let payload = &sent[6..sent.len() - 2];
            reply(sent[2], sent[3], payload).concat()
        })
    }

    pub(crate) fn recording<L: ByteLink>(session: Session<L>) -> (Session<L>, Arc<Mutex<Vec<Event>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let session =
            session.with_listener(move |event: Event, _msg: &Message| sink.lock().unwrap().push(event));
        (session, events)
    }

    fn feed_all<L: ByteLink>(session: &mut Session<L>, bytes: &[u8]) {
        for &byte in bytes {
            let _ = session.feed(byte);
        }
    }

    fn quick() -> SessionConfig {
        SessionConfig {
            wait_timeout: Some(Duration::from_millis(50)),
            ..SessionConfig::default()
        }
    }

    #[test]
    fn resyncs_across_garbage_between_frames() {
        let mut wire = frame(class::ACK, class::ack::ACK, &[0x06, 0x24]);
        wire.extend([0xFF, 0xFF]);
        wire.extend(frame(class::ACK, class::ack::NAK, &[0x06, 0x24]));

        let (mut session, events) = recording(Session::detached(SessionConfig::default()));
        for &byte in &wire {
            session.feed(byte).unwrap();
        }

        assert_eq!(
            *events.lock().unwrap(),
            vec![Event::ReceivedAck, Event::ReceivedNak]
        );
        assert_eq!(session.last_error(), ErrorCode::Ok);
        assert_eq!(session.decode_state(), DecodeState::AwaitSync1);
    }

    #[test]
    fn corrupted_checksum_records_error_without_event() {
        let mut wire = frame(class::ACK, class::ack::ACK, &[0x06, 0x24]);
        let last = wire.len() - 1;
        wire[last] ^= 0xFF;

        let (mut session, events) = recording(Session::detached(SessionConfig::default()));
        for &byte in &wire {
            session.feed(byte).unwrap();
        }

        assert_eq!(session.last_error(), ErrorCode::Checksum);
        assert_eq!(session.last_event(), Event::None);
        assert!(events.lock().unwrap().is_empty());
        assert_eq!(session.decode_state(), DecodeState::AwaitSync1);
    }

    #[test]
    fn zero_length_goes_straight_to_checksum() {
        let wire = frame(class::CFG, class::cfg::NAV5, &[]);
        let mut session = Session::detached(SessionConfig::default());
        feed_all(&mut session, &wire[..6]);
        assert_eq!(session.decode_state(), DecodeState::AwaitChecksumA);
        feed_all(&mut session, &wire[6..]);
        assert_eq!(session.last_event(), Event::ReceivedCfgNav5);
    }

    #[test]
    fn unknown_class_is_recorded_and_cleared_by_next_frame() {
        let mut session = Session::detached(SessionConfig::default());
        for byte in frame(class::TIM, 0x01, &[1, 2, 3]) {
            assert!(session.feed(byte).is_ok());
        }
        assert_eq!(session.last_error(), ErrorCode::UnknownClass);
        assert_eq!(session.last_message().map(|m| m.class), Some(class::TIM));

        feed_all(&mut session, &frame(class::CFG, class::cfg::TP5, &[0; 4]));
        assert_eq!(session.last_error(), ErrorCode::Ok);
        assert_eq!(session.last_event(), Event::None);
    }

    #[test]
    fn overflow_drops_bytes_and_keeps_alignment() {
        let config = SessionConfig {
            frame: FrameConfig {
                payload_capacity: 4,
            },
            ..SessionConfig::default()
        };
        let (mut session, events) = recording(Session::detached(config));
        let oversized = frame(class::CFG, class::cfg::RATE, &[0xE8, 0x03, 0x01, 0x00, 0x01, 0x00]);

        let mut overflows = 0;
        for &byte in &oversized {
            if let Err(SessionError::ReceiveOverflow { declared, capacity }) = session.feed(byte) {
                assert_eq!((declared, capacity), (6, 4));
                overflows += 1;
            }
        }
        assert_eq!(overflows, 2);
        assert!(events.lock().unwrap().is_empty());
        assert_eq!(session.measurement_rate(), 0);
        assert_eq!(session.decode_state(), DecodeState::AwaitSync1);

        feed_all(&mut session, &frame(class::ACK, class::ack::ACK, &[0x06, 0x08]));
        assert_eq!(*events.lock().unwrap(), vec![Event::ReceivedAck]);
    }

    #[test]
    fn closed_session_is_not_initialized() {
        let mut session = Session::new(MemoryLink::new(), SessionConfig::default());
        assert!(session.close().is_some());
        assert!(!session.is_initialized());
        assert!(matches!(session.feed(0xB5), Err(SessionError::NotInitialized)));
        assert!(matches!(
            session.poll(class::MON, class::mon::VER),
            Err(SessionError::NotInitialized)
        ));
        assert!(matches!(session.pump(), Err(SessionError::NotInitialized)));
    }

    #[test]
    fn detached_session_has_no_link() {
        let mut session = Session::detached(SessionConfig::default());
        assert!(matches!(
            session.poll(class::MON, class::mon::VER),
            Err(SessionError::NullHandle)
        ));
        assert!(matches!(
            session.wait_for_event(Event::ReceivedMonVersion),
            Err(SessionError::NullHandle)
        ));
    }

    #[test]
    fn poll_writes_empty_frame() {
        let mut session = Session::new(MemoryLink::new(), SessionConfig::default());
        session.poll(class::CFG, class::cfg::NAV5).unwrap();
        assert_eq!(
            session.link().unwrap().sent(),
            &[0xB5, 0x62, 0x06, 0x24, 0x00, 0x00, 0x2A, 0x84]
        );
    }

    #[test]
    fn send_outgoing_uses_payload_length() {
        let mut session = Session::new(MemoryLink::new(), SessionConfig::default());
        {
            let out = session.outgoing_mut();
            out.class = class::CFG;
            out.id = class::cfg::RATE;
            out.length = 99;
            out.payload = vec![0xE8, 0x03, 0x01, 0x00, 0x01, 0x00].into();
        }
        session.send_outgoing().unwrap();
        assert_eq!(
            session.link().unwrap().sent(),
            frame(class::CFG, class::cfg::RATE, &[0xE8, 0x03, 0x01, 0x00, 0x01, 0x00]).as_slice()
        );
    }

    #[test]
    fn wait_for_ack_accepts_matching_ack() {
        let link = MemoryLink::with_inbound(&frame(class::ACK, class::ack::ACK, &[0x06, 0x24]));
        let mut session = Session::new(link, quick());
        session.wait_for_ack(0x06, 0x24).unwrap();
        assert_eq!(
            session.last_ack(),
            Some(Acknowledgement {
                class: 0x06,
                id: 0x24,
                accepted: true
            })
        );
    }

    #[test]
    fn wait_for_ack_reports_nak() {
        let link = MemoryLink::with_inbound(&frame(class::ACK, class::ack::NAK, &[0x06, 0x24]));
        let mut session = Session::new(link, quick());
        let err = session.wait_for_ack(0x06, 0x24).unwrap_err();
        assert!(matches!(err, SessionError::Nak { class: 0x06, id: 0x24 }));
        assert_eq!(session.last_error(), ErrorCode::Nak);
    }

    #[test]
    fn wait_for_ack_skips_acks_for_other_requests() {
        let mut inbound = frame(class::ACK, class::ack::NAK, &[0x06, 0x08]);
        inbound.extend(frame(class::ACK, class::ack::ACK, &[0x06, 0x24]));
        let mut session = Session::new(MemoryLink::with_inbound(&inbound).with_max_pull(3), quick());
        session.wait_for_ack(0x06, 0x24).unwrap();
    }

    #[test]
    fn send_and_wait_for_ack_against_peer() {
        let link = peer(|cls, id, _payload| vec![frame(class::ACK, class::ack::ACK, &[cls, id])]);
        let mut session = Session::new(link, quick());
        session
            .send_and_wait_for_ack(&Message::new(class::CFG, class::cfg::RATE, vec![0xC8, 0x00, 1, 0, 1, 0]))
            .unwrap();
        assert_eq!(session.last_event(), Event::ReceivedAck);
    }

    #[test]
    fn wait_times_out_when_nothing_arrives() {
        let mut session = Session::new(MemoryLink::new(), quick());
        let err = session.wait_for_event(Event::ReceivedMonVersion).unwrap_err();
        assert!(matches!(err, SessionError::Timeout(_)));
        assert_eq!(session.last_error(), ErrorCode::Timeout);
    }

    #[test]
    fn wait_honours_cancel_flag() {
        let config = SessionConfig {
            wait_timeout: None,
            ..SessionConfig::default()
        };
        let mut session = Session::new(MemoryLink::new(), config);
        let flag = Arc::new(AtomicBool::new(true));
        session.set_cancel_flag(Arc::clone(&flag));
        let err = session.wait_for_ack(0x06, 0x24).unwrap_err();
        assert!(matches!(err, SessionError::Cancelled));
    }

    #[test]
    fn mon_ver_classifies_chipset() {
        let mut session = Session::detached(SessionConfig::default());
        let payload = mon_ver_payload("EXT CORE 1.00 (61b2dd)", "00090000", &[]);
        feed_all(&mut session, &frame(class::MON, class::mon::VER, &payload));
        assert_eq!(session.chipset_version(), ChipsetVersion::Ublox9);
        assert_eq!(session.software_version(), "EXT CORE 1.00 (61b2dd)");

        let payload = mon_ver_payload("1.00", "00990000", &[]);
        feed_all(&mut session, &frame(class::MON, class::mon::VER, &payload));
        assert_eq!(session.chipset_version(), ChipsetVersion::Unknown);
        assert_eq!(session.last_error(), ErrorCode::Ok);
    }

    #[test]
    fn decoded_message_reencodes_identically() {
        let wire = frame(class::CFG, class::cfg::NAV5, &[0xFF, 0xFF, 0x04, 0x03, 0x00, 0x00]);
        let mut session = Session::detached(SessionConfig::default());
        feed_all(&mut session, &wire);
        let decoded = session.last_message().unwrap();
        assert_eq!(encode_to_vec(decoded).unwrap(), wire);
    }

    #[test]
    fn reencoding_is_stable_across_classes_ids_and_lengths() {
        const CAPACITY: usize = 64;
        let config = SessionConfig {
            frame: FrameConfig {
                payload_capacity: CAPACITY,
            },
            ..SessionConfig::default()
        };
        let mut session = Session::detached(config);

        for cls in [class::ACK, class::CFG, class::MON, class::NAV, 0x7F] {
            for id in [0x00, 0x01, 0x24, 0xFF] {
                for len in [0, 1, 2, CAPACITY - 1, CAPACITY] {
                    let payload: Vec<u8> = (0..len).map(|i| (i as u8).wrapping_mul(37) ^ id).collect();
                    let wire = frame(cls, id, &payload);
                    feed_all(&mut session, &wire);

                    let decoded = session.last_message().unwrap();
                    assert_eq!(decoded.payload.as_ref(), payload.as_slice(), "{cls:02X} {id:02X} len {len}");
                    assert_eq!(encode_to_vec(decoded).unwrap(), wire, "{cls:02X} {id:02X} len {len}");
                }
            }
        }
    }

    #[test]
    fn notify_reaches_listener() {
        let (mut session, events) = recording(Session::detached(SessionConfig::default()));
        session.notify(Event::DebugMessage1);
        assert_eq!(*events.lock().unwrap(), vec![Event::DebugMessage1]);
        assert_eq!(session.last_event(), Event::DebugMessage1);
    }
}
