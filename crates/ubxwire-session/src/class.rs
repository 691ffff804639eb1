//! UBX message class and id codes.
//!
//! Only the ids the session knows how to route are listed per class. Unlisted
//! ids within a registered class are accepted and ignored.

/// Navigation results.
pub const NAV: u8 = 0x01;
/// Receiver manager messages.
pub const RXM: u8 = 0x02;
/// Information messages.
pub const INF: u8 = 0x04;
/// Acknowledgements of configuration requests.
pub const ACK: u8 = 0x05;
/// Configuration input.
pub const CFG: u8 = 0x06;
/// Firmware update messages.
pub const UPD: u8 = 0x09;
/// Monitoring messages.
pub const MON: u8 = 0x0A;
/// AssistNow aiding messages.
pub const AID: u8 = 0x0B;
/// Timing messages.
pub const TIM: u8 = 0x0D;
/// External sensor fusion messages.
pub const ESF: u8 = 0x10;
/// Multiple GNSS assistance messages.
pub const MGA: u8 = 0x13;
/// Logging messages.
pub const LOG: u8 = 0x21;
/// Security feature messages.
pub const SEC: u8 = 0x27;
/// High rate navigation results.
pub const HNR: u8 = 0x28;

pub mod ack {
    pub const NAK: u8 = 0x00;
    pub const ACK: u8 = 0x01;
}

pub mod cfg {
    pub const PRT: u8 = 0x00;
    pub const MSG: u8 = 0x01;
    pub const INF: u8 = 0x02;
    pub const RST: u8 = 0x04;
    pub const DAT: u8 = 0x06;
    pub const RATE: u8 = 0x08;
    pub const CFG: u8 = 0x09;
    pub const RXM: u8 = 0x11;
    pub const ANT: u8 = 0x13;
    pub const SBAS: u8 = 0x16;
    pub const NMEA: u8 = 0x17;
    pub const USB: u8 = 0x1B;
    pub const ODO: u8 = 0x1E;
    pub const NAVX5: u8 = 0x23;
    pub const NAV5: u8 = 0x24;
    pub const TP5: u8 = 0x31;
    pub const RINV: u8 = 0x34;
    pub const ITFM: u8 = 0x39;
    pub const PM2: u8 = 0x3B;
    pub const GNSS: u8 = 0x3E;
    pub const LOGFILTER: u8 = 0x47;
    pub const TXSLOT: u8 = 0x53;
    pub const PWR: u8 = 0x57;
    pub const HNR: u8 = 0x5C;
    pub const ESRC: u8 = 0x60;
    pub const DOSC: u8 = 0x61;
    pub const SMGR: u8 = 0x62;
    pub const GEOFENCE: u8 = 0x69;
    pub const DGNSS: u8 = 0x70;
    pub const PMS: u8 = 0x86;
    pub const SLAS: u8 = 0x8D;
    pub const BATCH: u8 = 0x93;
}

pub mod mon {
    pub const IO: u8 = 0x02;
    pub const VER: u8 = 0x04;
    pub const MSGPP: u8 = 0x06;
    pub const RXBUF: u8 = 0x07;
    pub const TXBUF: u8 = 0x08;
    pub const HW: u8 = 0x09;
    pub const HW2: u8 = 0x0B;
    pub const RXR: u8 = 0x21;
    pub const PATCH: u8 = 0x27;
    pub const GNSS: u8 = 0x28;
    pub const SMGR: u8 = 0x2E;
    pub const BATCH: u8 = 0x32;
}

pub mod nav {
    pub const POSECEF: u8 = 0x01;
    pub const POSLLH: u8 = 0x02;
    pub const STATUS: u8 = 0x03;
    pub const DOP: u8 = 0x04;
    pub const ATT: u8 = 0x05;
    pub const SOL: u8 = 0x06;
    pub const PVT: u8 = 0x07;
    pub const ODO: u8 = 0x09;
    pub const RESETODO: u8 = 0x10;
    pub const VELECEF: u8 = 0x11;
    pub const VELNED: u8 = 0x12;
    pub const HPPOSECEF: u8 = 0x13;
    pub const HPPOSLLH: u8 = 0x14;
    pub const TIMEGPS: u8 = 0x20;
    pub const TIMEUTC: u8 = 0x21;
    pub const CLOCK: u8 = 0x22;
    pub const TIMEGLO: u8 = 0x23;
    pub const TIMEBDS: u8 = 0x24;
    pub const TIMEGAL: u8 = 0x25;
    pub const TIMELS: u8 = 0x26;
    pub const SVINFO: u8 = 0x30;
    pub const DGPS: u8 = 0x31;
    pub const SBAS: u8 = 0x32;
    pub const ORB: u8 = 0x34;
    pub const SAT: u8 = 0x35;
    pub const GEOFENCE: u8 = 0x39;
    pub const SVIN: u8 = 0x3B;
    pub const RELPOSNED: u8 = 0x3C;
    pub const AOPSTATUS: u8 = 0x60;
    pub const EOE: u8 = 0x61;
}

/// Returns a human-readable name for a class byte.
pub fn class_name(class: u8) -> &'static str {
    match class {
        NAV => "NAV",
        RXM => "RXM",
        INF => "INF",
        ACK => "ACK",
        CFG => "CFG",
        UPD => "UPD",
        MON => "MON",
        AID => "AID",
        TIM => "TIM",
        ESF => "ESF",
        MGA => "MGA",
        LOG => "LOG",
        SEC => "SEC",
        HNR => "HNR",
        _ => "UNKNOWN",
    }
}

/// Returns `CLASS-ID` for the messages the session interprets, else `None`.
pub fn message_name(class: u8, id: u8) -> Option<&'static str> {
    let name = match (class, id) {
        (ACK, ack::ACK) => "ACK-ACK",
        (ACK, ack::NAK) => "ACK-NAK",
        (CFG, cfg::ANT) => "CFG-ANT",
        (CFG, cfg::MSG) => "CFG-MSG",
        (CFG, cfg::NAV5) => "CFG-NAV5",
        (CFG, cfg::NMEA) => "CFG-NMEA",
        (CFG, cfg::PRT) => "CFG-PRT",
        (CFG, cfg::RATE) => "CFG-RATE",
        (MON, mon::BATCH) => "MON-BATCH",
        (MON, mon::GNSS) => "MON-GNSS",
        (MON, mon::HW) => "MON-HW",
        (MON, mon::HW2) => "MON-HW2",
        (MON, mon::IO) => "MON-IO",
        (MON, mon::MSGPP) => "MON-MSGPP",
        (MON, mon::PATCH) => "MON-PATCH",
        (MON, mon::RXBUF) => "MON-RXBUF",
        (MON, mon::RXR) => "MON-RXR",
        (MON, mon::SMGR) => "MON-SMGR",
        (MON, mon::TXBUF) => "MON-TXBUF",
        (MON, mon::VER) => "MON-VER",
        (NAV, nav::PVT) => "NAV-PVT",
        (NAV, nav::STATUS) => "NAV-STATUS",
        _ => return None,
    };
    Some(name)
}
