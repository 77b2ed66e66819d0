//! bnostream core library: decoding of BNO motion-sensor telemetry.
//!
//! The sensor board writes one fixed-size binary packet per reading to a
//! serial link, each followed by a newline byte. This crate turns that byte
//! stream into `SensorEvent`s:
//! frame sources split the stream into lines, the packet decoder
//! (layout/reader/parser) validates and deserializes each line, and
//! `EventSource` ties both into a lazy iterator. Decoding is byte-oriented and
//! side-effect free; all device I/O lives in `source`.
//!
//! Invariants:
//! - A frame is decoded iff it is exactly `packet::PACKET_SIZE` bytes long.
//! - Malformed frames are dropped and logged; they never end the stream.
//! - The end of the device stream is an error (`SourceError::Closed`); the
//!   frame source is released on every exit path.
//!
//! # Examples
//! ```no_run
//! use bnostream_core::EventSource;
//! use bnostream_core::serial::{DEFAULT_BAUD_RATE, DeviceIds, discover_and_open};
//!
//! let events = EventSource::connect(|| discover_and_open(DeviceIds::ARDUINO, DEFAULT_BAUD_RATE))?;
//! for event in events {
//!     println!("{}", event?);
//! }
//! # Ok::<(), bnostream_core::SourceError>(())
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

mod capture;
pub mod packet;
mod source;

pub use capture::{CaptureReport, decode_capture, decode_capture_file};
pub use packet::error::DecodeError;
pub use source::serial;
pub use source::{EventSource, FrameSource, LineFrameSource, SourceError};

/// Current capture report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Three decoded fixed-point components.
///
/// For orientation readings the same components are read as roll, pitch and
/// heading.
///
/// # Examples
/// ```
/// use bnostream_core::Vector3;
///
/// let v = Vector3::new(1.5, -2.0, 359.99);
/// assert_eq!(v.roll(), v.x);
/// assert_eq!(v.heading(), 359.99);
/// assert_eq!(v.to_string(), "(1.50, -2.00, 359.99)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn roll(&self) -> f64 {
        self.x
    }

    pub const fn pitch(&self) -> f64 {
        self.y
    }

    pub const fn heading(&self) -> f64 {
        self.z
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// One fully decoded sensor reading.
///
/// Serialized with `orientation` as `{roll, pitch, heading}`.
///
/// # Examples
/// ```
/// use bnostream_core::{SensorEvent, Vector3};
///
/// let event = SensorEvent {
///     acceleration: Vector3::new(1.0, 0.0, 0.0),
///     gyro: Vector3::new(0.5, 0.0, 0.0),
///     magnetic: Vector3::new(0.0, 0.0, 0.0),
///     orientation: Vector3::new(0.0, 0.0, 90.0),
///     temperature: 2.5,
/// };
/// assert!(event.to_string().contains("heading=90.00"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorEvent {
    /// Linear acceleration (x, y, z).
    pub acceleration: Vector3,
    /// Angular rate (x, y, z).
    pub gyro: Vector3,
    /// Magnetic field (x, y, z).
    pub magnetic: Vector3,
    /// Euler angles; read through `roll()`, `pitch()`, `heading()`.
    #[serde(with = "orientation_fields")]
    pub orientation: Vector3,
    /// Board temperature.
    pub temperature: f64,
}

impl fmt::Display for SensorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "acceleration={}", self.acceleration)?;
        writeln!(f, "gyro={}", self.gyro)?;
        writeln!(f, "magnetic={}", self.magnetic)?;
        writeln!(
            f,
            "orientation=(roll={:.2}, pitch={:.2}, heading={:.2})",
            self.orientation.roll(),
            self.orientation.pitch(),
            self.orientation.heading()
        )?;
        write!(f, "temperature={:.2}", self.temperature)
    }
}

mod orientation_fields {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Vector3;

    #[derive(Serialize, Deserialize)]
    struct Orientation {
        roll: f64,
        pitch: f64,
        heading: f64,
    }

    pub fn serialize<S: Serializer>(value: &Vector3, serializer: S) -> Result<S::Ok, S::Error> {
        Orientation {
            roll: value.roll(),
            pitch: value.pitch(),
            heading: value.heading(),
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vector3, D::Error> {
        let o = Orientation::deserialize(deserializer)?;
        Ok(Vector3::new(o.roll, o.pitch, o.heading))
    }
}
