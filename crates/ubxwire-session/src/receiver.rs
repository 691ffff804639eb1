use serde::Serialize;

/// Coarse receiver generation, derived from the MON-VER hardware id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ChipsetVersion {
    #[default]
    NotSet,
    Antaris,
    Antaris4,
    Ublox5,
    Ublox6_1,
    Ublox6_2,
    Ublox7,
    Ublox8,
    Ublox9,
    Unknown,
}

const HARDWARE_IDS: &[(&str, ChipsetVersion)] = &[
    ("00000040", ChipsetVersion::Antaris),
    ("00040001", ChipsetVersion::Antaris4),
    ("00040005", ChipsetVersion::Ublox5),
    ("00040006", ChipsetVersion::Ublox6_1),
    ("00040007", ChipsetVersion::Ublox6_2),
    ("00070000", ChipsetVersion::Ublox7),
    ("00080000", ChipsetVersion::Ublox8),
    ("00090000", ChipsetVersion::Ublox9),
];

impl ChipsetVersion {
    /// Classify a hardware id string. Unrecognized ids map to `Unknown`.
    pub fn from_hardware_id(id: &str) -> Self {
        HARDWARE_IDS
            .iter()
            .find(|(known, _)| *known == id)
            .map(|(_, version)| *version)
            .unwrap_or(ChipsetVersion::Unknown)
    }

    pub fn name(self) -> &'static str {
        match self {
            ChipsetVersion::NotSet => "not set",
            ChipsetVersion::Antaris => "Antaris",
            ChipsetVersion::Antaris4 => "Antaris 4",
            ChipsetVersion::Ublox5 => "u-blox 5",
            ChipsetVersion::Ublox6_1 => "u-blox 6 (6.01)",
            ChipsetVersion::Ublox6_2 => "u-blox 6 (6.02)",
            ChipsetVersion::Ublox7 => "u-blox 7",
            ChipsetVersion::Ublox8 => "u-blox 8",
            ChipsetVersion::Ublox9 => "u-blox 9",
            ChipsetVersion::Unknown => "unknown",
        }
    }
}

/// Receiver motion profile (CFG-NAV5 `dynModel`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum DynamicPlatformModel {
    #[default]
    NotSet,
    Portable,
    Stationary,
    Pedestrian,
    Automotive,
    Sea,
    Airborne1G,
    Airborne2G,
    Airborne4G,
    Other(u8),
}

impl DynamicPlatformModel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Portable,
            2 => Self::Stationary,
            3 => Self::Pedestrian,
            4 => Self::Automotive,
            5 => Self::Sea,
            6 => Self::Airborne1G,
            7 => Self::Airborne2G,
            8 => Self::Airborne4G,
            other => Self::Other(other),
        }
    }

    /// Wire value, `None` for `NotSet`.
    pub fn code(self) -> Option<u8> {
        match self {
            Self::NotSet => None,
            Self::Portable => Some(0),
            Self::Stationary => Some(2),
            Self::Pedestrian => Some(3),
            Self::Automotive => Some(4),
            Self::Sea => Some(5),
            Self::Airborne1G => Some(6),
            Self::Airborne2G => Some(7),
            Self::Airborne4G => Some(8),
            Self::Other(value) => Some(value),
        }
    }

    /// Parse a model name as used on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        let model = match name.to_ascii_lowercase().as_str() {
            "portable" => Self::Portable,
            "stationary" => Self::Stationary,
            "pedestrian" => Self::Pedestrian,
            "automotive" => Self::Automotive,
            "sea" => Self::Sea,
            "airborne1g" => Self::Airborne1G,
            "airborne2g" => Self::Airborne2G,
            "airborne4g" => Self::Airborne4G,
            _ => return None,
        };
        Some(model)
    }
}

/// 2D/3D solution mode (CFG-NAV5 `fixMode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum FixMode {
    #[default]
    NotSet,
    TwoDOnly,
    ThreeDOnly,
    Auto,
    Other(u8),
}

impl FixMode {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::TwoDOnly,
            2 => Self::ThreeDOnly,
            3 => Self::Auto,
            other => Self::Other(other),
        }
    }

    pub fn code(self) -> Option<u8> {
        match self {
            Self::NotSet => None,
            Self::TwoDOnly => Some(1),
            Self::ThreeDOnly => Some(2),
            Self::Auto => Some(3),
            Self::Other(value) => Some(value),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let mode = match name.to_ascii_lowercase().as_str() {
            "2d" | "2d-only" => Self::TwoDOnly,
            "3d" | "3d-only" => Self::ThreeDOnly,
            "auto" => Self::Auto,
            _ => return None,
        };
        Some(mode)
    }
}

/// Port settings echoed by CFG-PRT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PortConfig {
    pub port_id: u8,
    pub baud_rate: u32,
    pub in_proto_mask: u16,
    pub out_proto_mask: u16,
}

/// Constellation masks reported by MON-GNSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GnssSelection {
    pub supported: u8,
    pub default_gnss: u8,
    pub enabled: u8,
    pub simultaneous: u8,
}

/// Identity reported by MON-VER and MON-GNSS.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReceiverInfo {
    pub chipset_version: ChipsetVersion,
    pub software_version: String,
    pub hardware_version: String,
    /// Extension strings following the fixed MON-VER fields.
    pub extensions: Vec<String>,
    pub gnss: Option<GnssSelection>,
}

/// Navigation configuration echoed by CFG-NAV5, CFG-RATE and CFG-PRT.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReceiverConfig {
    pub dynamic_platform_model: DynamicPlatformModel,
    pub fix_mode: FixMode,
    /// Measurement period in milliseconds.
    pub measurement_rate: u16,
    /// Measurement cycles per navigation solution.
    pub navigation_rate: u16,
    pub time_reference: u16,
    pub port: Option<PortConfig>,
}

/// Cached receiver attributes, written only by message handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Receiver {
    pub info: ReceiverInfo,
    pub config: ReceiverConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_hardware_ids() {
        assert_eq!(
            ChipsetVersion::from_hardware_id("00090000"),
            ChipsetVersion::Ublox9
        );
        assert_eq!(
            ChipsetVersion::from_hardware_id("00040007"),
            ChipsetVersion::Ublox6_2
        );
        assert_eq!(
            ChipsetVersion::from_hardware_id("00000040"),
            ChipsetVersion::Antaris
        );
    }

    #[test]
    fn unknown_hardware_id_is_not_an_error() {
        assert_eq!(
            ChipsetVersion::from_hardware_id("00190000"),
            ChipsetVersion::Unknown
        );
        assert_eq!(ChipsetVersion::from_hardware_id(""), ChipsetVersion::Unknown);
    }

    #[test]
    fn dynamic_model_codes() {
        assert_eq!(DynamicPlatformModel::from_u8(0), DynamicPlatformModel::Portable);
        assert_eq!(DynamicPlatformModel::from_u8(1), DynamicPlatformModel::Other(1));
        assert_eq!(DynamicPlatformModel::Airborne4G.code(), Some(8));
        assert_eq!(DynamicPlatformModel::NotSet.code(), None);
        assert_eq!(
            DynamicPlatformModel::from_name("Automotive"),
            Some(DynamicPlatformModel::Automotive)
        );
    }

    #[test]
    fn fix_mode_codes() {
        assert_eq!(FixMode::from_u8(3), FixMode::Auto);
        assert_eq!(FixMode::from_u8(0), FixMode::Other(0));
        assert_eq!(FixMode::TwoDOnly.code(), Some(1));
        assert_eq!(FixMode::from_name("3d"), Some(FixMode::ThreeDOnly));
        assert_eq!(FixMode::from_name("4d"), None);
    }
}
