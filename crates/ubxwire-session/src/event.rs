use serde::Serialize;
use ubxwire_frame::Message;

/// Which semantic message was just fully processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u16)]
pub enum Event {
    #[default]
    None = 0,
    ReceivedAck = 1,
    ReceivedNak = 2,
    ReceivedCfgNav5 = 3,
    ReceivedCfgNmea = 4,
    ReceivedCfgPrt = 5,
    ReceivedCfgRate = 6,
    ReceivedMonGnss = 7,
    ReceivedMonVersion = 8,

    /// Free for application-level debug notifications.
    DebugMessage1 = 1000,
    DebugMessage2 = 1001,
}

impl Event {
    /// Numeric event code.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Look an event up by its numeric code.
    pub fn from_code(code: u16) -> Option<Self> {
        let event = match code {
            0 => Event::None,
            1 => Event::ReceivedAck,
            2 => Event::ReceivedNak,
            3 => Event::ReceivedCfgNav5,
            4 => Event::ReceivedCfgNmea,
            5 => Event::ReceivedCfgPrt,
            6 => Event::ReceivedCfgRate,
            7 => Event::ReceivedMonGnss,
            8 => Event::ReceivedMonVersion,
            1000 => Event::DebugMessage1,
            1001 => Event::DebugMessage2,
            _ => return None,
        };
        Some(event)
    }

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            Event::None => "none",
            Event::ReceivedAck => "ack",
            Event::ReceivedNak => "nak",
            Event::ReceivedCfgNav5 => "cfg-nav5",
            Event::ReceivedCfgNmea => "cfg-nmea",
            Event::ReceivedCfgPrt => "cfg-prt",
            Event::ReceivedCfgRate => "cfg-rate",
            Event::ReceivedMonGnss => "mon-gnss",
            Event::ReceivedMonVersion => "mon-ver",
            Event::DebugMessage1 => "debug-1",
            Event::DebugMessage2 => "debug-2",
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Receives session notifications.
///
/// `on_event` fires once per raised event with the message that produced
/// it. `on_message` fires for every frame that passed its checksum, before
/// dispatch.
pub trait EventListener {
    fn on_event(&mut self, event: Event, message: &Message);

    fn on_message(&mut self, _message: &Message) {}
}

impl<F> EventListener for F
where
    F: FnMut(Event, &Message),
{
    fn on_event(&mut self, event: Event, message: &Message) {
        self(event, message)
    }
}
