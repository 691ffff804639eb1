//! Serial device links.
//!
//! Ports are opened 8N1 without flow control, matching what u-blox
//! receivers expect on their UART. The read timeout is kept short so that
//! `pull` behaves as "whatever is available now".

use std::path::PathBuf;
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};

use crate::error::{Result, TransportError};
use crate::traits::StreamLink;

/// Settings used to open a serial device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialSettings {
    /// Device path (e.g. `/dev/ttyUSB0`, `COM3`).
    pub path: PathBuf,
    /// Baud rate. u-blox factory default is 9600.
    pub baud_rate: u32,
    /// How long a single read may wait for the first byte.
    pub read_timeout: Duration,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/dev/ttyUSB0"),
            baud_rate: 9600,
            read_timeout: Duration::from_millis(10),
        }
    }
}

/// Open a serial device and wrap it as a byte link.
pub fn open_serial(settings: &SerialSettings) -> Result<StreamLink<Box<dyn SerialPort>>> {
    let path = settings.path.to_string_lossy().into_owned();
    let port = serialport::new(path, settings.baud_rate)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .timeout(settings.read_timeout)
        .open()
        .map_err(|err| TransportError::Open {
            path: settings.path.clone(),
            source: err.into(),
        })?;

    tracing::debug!(
        path = %settings.path.display(),
        baud = settings.baud_rate,
        "serial port opened"
    );
    Ok(StreamLink::new(port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_match_receiver_factory_baud() {
        let settings = SerialSettings::default();
        assert_eq!(settings.baud_rate, 9600);
        assert!(settings.read_timeout < Duration::from_secs(1));
    }

    #[test]
    fn opening_missing_device_reports_path() {
        let settings = SerialSettings {
            path: PathBuf::from("/nonexistent/ubxwire-tty"),
            ..SerialSettings::default()
        };
        let err = open_serial(&settings).unwrap_err();
        assert!(std::error::Error::source(&err).is_some());
        match err {
            TransportError::Open { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent/ubxwire-tty"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
