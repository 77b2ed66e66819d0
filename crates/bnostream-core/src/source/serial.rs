//! Serial device discovery and access.
//!
//! Discovery matches enumerated ports on their USB vendor/product ids and
//! picks the first match. `find_device` works on a plain port list so the
//! matching rule can be exercised without hardware.

use std::fmt;
use std::io::BufReader;
use std::time::Duration;

use serialport::{SerialPort, SerialPortInfo, SerialPortType};
use tracing::info;

use super::{LineFrameSource, SourceError};

/// Arduino LLC USB vendor id.
pub const ARDUINO_VID: u16 = 0x2341;
/// Product id reported by the sensor board.
pub const ARDUINO_PID: u16 = 0x0043;
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Poll interval of the serial driver; timeouts are retried by the framer.
const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Line framer over an open serial port.
pub type SerialFrameSource = LineFrameSource<BufReader<Box<dyn SerialPort>>>;

/// USB vendor/product id pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIds {
    pub vid: u16,
    pub pid: u16,
}

impl DeviceIds {
    pub const ARDUINO: DeviceIds = DeviceIds {
        vid: ARDUINO_VID,
        pid: ARDUINO_PID,
    };

    pub fn matches(&self, port: &PortInfo) -> bool {
        port.usb.as_ref() == Some(self)
    }
}

impl Default for DeviceIds {
    fn default() -> Self {
        Self::ARDUINO
    }
}

impl fmt::Display for DeviceIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:{:04x}", self.vid, self.pid)
    }
}

/// Enumerated serial port. `usb` is `None` for non-USB ports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortInfo {
    pub name: String,
    pub usb: Option<DeviceIds>,
}

impl From<SerialPortInfo> for PortInfo {
    fn from(info: SerialPortInfo) -> Self {
        let usb = match info.port_type {
            SerialPortType::UsbPort(usb) => Some(DeviceIds {
                vid: usb.vid,
                pid: usb.pid,
            }),
            _ => None,
        };
        Self {
            name: info.port_name,
            usb,
        }
    }
}

/// Return the first port matching `ids`.
///
/// # Errors
/// Returns `SourceError::DeviceNotFound` when no port matches.
///
/// # Examples
/// ```
/// use bnostream_core::serial::{DeviceIds, PortInfo, find_device};
///
/// let ports = vec![
///     PortInfo { name: "/dev/ttyS0".to_string(), usb: None },
///     PortInfo { name: "/dev/ttyACM0".to_string(), usb: Some(DeviceIds::ARDUINO) },
/// ];
/// let port = find_device(&ports, DeviceIds::ARDUINO)?;
/// assert_eq!(port.name, "/dev/ttyACM0");
/// # Ok::<(), bnostream_core::SourceError>(())
/// ```
pub fn find_device(ports: &[PortInfo], ids: DeviceIds) -> Result<PortInfo, SourceError> {
    info!(%ids, candidates = ports.len(), "searching for serial device");
    let port = ports
        .iter()
        .find(|port| ids.matches(port))
        .cloned()
        .ok_or(SourceError::DeviceNotFound {
            vid: ids.vid,
            pid: ids.pid,
        })?;
    info!(port = %port.name, "found sensor");
    Ok(port)
}

pub fn available_ports() -> Result<Vec<PortInfo>, SourceError> {
    let ports = serialport::available_ports().map_err(|e| SourceError::Serial {
        context: "port enumeration",
        message: e.to_string(),
    })?;
    Ok(ports.into_iter().map(PortInfo::from).collect())
}

pub fn open_port(name: &str, baud_rate: u32) -> Result<SerialFrameSource, SourceError> {
    let port = serialport::new(name, baud_rate)
        .timeout(READ_TIMEOUT)
        .open()
        .map_err(|e| SourceError::Serial {
            context: "port open",
            message: format!("{name}: {e}"),
        })?;
    info!(port = name, baud_rate, "serial port opened");
    Ok(LineFrameSource::new(BufReader::new(port)))
}

/// Enumerate ports, pick the one matching `ids` and open it.
pub fn discover_and_open(ids: DeviceIds, baud_rate: u32) -> Result<SerialFrameSource, SourceError> {
    let ports = available_ports()?;
    let device = find_device(&ports, ids)?;
    open_port(&device.name, baud_rate)
}
