//! Sensor packet decoding.
//!
//! Follows the same layering for every wire format:
//! - `layout`: byte offsets, sizes and constants (source of truth)
//! - `reader`: bounds-checked byte access and byte-order conventions
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! Packets are 26 bytes of little-endian `i16` fixed-point values (1/100
//! resolution). There is no checksum: size is the only framing check, so a
//! corrupted frame that still has 26 bytes decodes as a valid reading.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use layout::{Field, FieldSpan, PACKET_SIZE, SCALAR_SIZE};
pub use parser::{decode_packet, decode_scalar, decode_vector3, is_valid_packet};
