use super::error::DecodeError;

/// Bounds-checked reads over a packet (or field) slice.
///
/// All offsets are relative to the start of the wrapped slice. Scalars are
/// little-endian, matching the sensor firmware.
pub struct PacketReader<'a> {
    payload: &'a [u8],
}

impl<'a> PacketReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn require_exact_len(&self, expected: usize) -> Result<(), DecodeError> {
        if self.payload.len() != expected {
            return Err(DecodeError::MalformedField {
                expected,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], DecodeError> {
        self.payload
            .get(range.clone())
            .ok_or(DecodeError::MalformedField {
                expected: range.end,
                actual: self.payload.len(),
            })
    }

    pub fn read_i16_le(&self, range: std::ops::Range<usize>) -> Result<i16, DecodeError> {
        let bytes = self.read_slice(range)?;
        if bytes.len() != 2 {
            return Err(DecodeError::MalformedField {
                expected: 2,
                actual: bytes.len(),
            });
        }
        Ok(i16::from_le_bytes([bytes[0], bytes[1]]))
    }
}

#[cfg(test)]
mod tests {
    use super::PacketReader;
    use crate::packet::error::DecodeError;

    #[test]
    fn read_i16_le_negative() {
        let bytes = (-1234i16).to_le_bytes();
        let reader = PacketReader::new(&bytes);
        assert_eq!(reader.read_i16_le(0..2).unwrap(), -1234);
    }

    #[test]
    fn read_slice_out_of_bounds() {
        let bytes = [0u8; 3];
        let reader = PacketReader::new(&bytes);
        let err = reader.read_slice(2..4).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MalformedField {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn require_exact_len_rejects_longer_input() {
        let bytes = [0u8; 3];
        let reader = PacketReader::new(&bytes);
        assert!(reader.require_exact_len(3).is_ok());
        assert!(matches!(
            reader.require_exact_len(2),
            Err(DecodeError::MalformedField { expected: 2, actual: 3 })
        ));
    }
}
