use super::error::DecodeError;
use super::layout::{self, Field};
use super::reader::PacketReader;
use crate::{SensorEvent, Vector3};

/// Decode one fixed-point scalar (exactly `SCALAR_SIZE` bytes).
///
/// # Examples
/// ```
/// use bnostream_core::packet::decode_scalar;
///
/// assert_eq!(decode_scalar(&250i16.to_le_bytes()).unwrap(), 2.5);
/// assert!(decode_scalar(&[1]).is_err());
/// ```
pub fn decode_scalar(bytes: &[u8]) -> Result<f64, DecodeError> {
    let reader = PacketReader::new(bytes);
    reader.require_exact_len(layout::SCALAR_SIZE)?;
    let raw = reader.read_i16_le(0..layout::SCALAR_SIZE)?;
    Ok(f64::from(raw) / layout::FIXED_POINT_SCALE)
}

/// Decode three consecutive scalars from the head of `bytes`.
pub fn decode_vector3(bytes: &[u8]) -> Result<Vector3, DecodeError> {
    let reader = PacketReader::new(bytes);
    let scalar = |index: usize| {
        let start = index * layout::SCALAR_SIZE;
        reader
            .read_slice(start..start + layout::SCALAR_SIZE)
            .and_then(decode_scalar)
    };
    Ok(Vector3::new(scalar(0)?, scalar(1)?, scalar(2)?))
}

/// Deserialize a full packet into a `SensorEvent`.
///
/// The caller is expected to have checked `is_valid_packet`; a short buffer
/// surfaces as `DecodeError::MalformedField` rather than a panic.
///
/// # Examples
/// ```
/// use bnostream_core::packet::{PACKET_SIZE, decode_packet};
///
/// let event = decode_packet(&[0u8; PACKET_SIZE]).unwrap();
/// assert_eq!(event.temperature, 0.0);
/// ```
pub fn decode_packet(bytes: &[u8]) -> Result<SensorEvent, DecodeError> {
    let reader = PacketReader::new(bytes);
    let vector = |field: Field| {
        reader
            .read_slice(field.span().range())
            .and_then(decode_vector3)
    };

    Ok(SensorEvent {
        acceleration: vector(Field::Acceleration)?,
        gyro: vector(Field::Gyro)?,
        magnetic: vector(Field::Magnetic)?,
        orientation: vector(Field::Orientation)?,
        temperature: decode_scalar(reader.read_slice(Field::Temperature.span().range())?)?,
    })
}

/// Framing check: a frame is a packet iff it has exactly `PACKET_SIZE` bytes.
pub fn is_valid_packet(bytes: &[u8]) -> bool {
    bytes.len() == layout::PACKET_SIZE
}
