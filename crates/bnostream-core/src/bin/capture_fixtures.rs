use std::fs;
use std::path::{Path, PathBuf};

const PACKET_SIZE: usize = 26;
const FRAME_TERMINATOR: u8 = b'\n';

/// Raw field values: acceleration, gyro, magnetic, orientation, temperature.
type RawPacket = [i16; 13];

const REFERENCE: RawPacket = [100, 0, 0, 50, 0, 0, 0, 0, 0, 0, 0, 0, 250];
const TILTED: RawPacket = [
    -981, 12, 3, 1, -2, 3, -3200, 1500, 4100, -4500, 1200, 27000, 2350,
];
const LEVEL: RawPacket = [0, 0, 981, 0, 0, 0, 220, -130, -480, 0, 0, 9000, 2400];
// gyro x = 10 encodes as 0x0a 0x00 and collides with the terminator
const COLLIDING: RawPacket = [100, 0, 0, 10, 0, 0, 0, 0, 0, 0, 0, 0, 250];

fn main() -> Result<(), String> {
    let root = PathBuf::from("tests/golden");
    write_capture(&root.join("clean").join("input.bin"), &[REFERENCE, TILTED, LEVEL], None)?;
    write_capture(
        &root.join("split_packets").join("input.bin"),
        &[REFERENCE, COLLIDING, LEVEL],
        Some(&[1, 2, 3, 4, 5]),
    )?;
    Ok(())
}

fn encode(packet: &RawPacket) -> Vec<u8> {
    let bytes: Vec<u8> = packet.iter().flat_map(|v| v.to_le_bytes()).collect();
    debug_assert_eq!(bytes.len(), PACKET_SIZE);
    bytes
}

fn write_capture(path: &Path, packets: &[RawPacket], trailer: Option<&[u8]>) -> Result<(), String> {
    let mut dump = Vec::new();
    for packet in packets {
        dump.extend_from_slice(&encode(packet));
        dump.push(FRAME_TERMINATOR);
    }
    if let Some(trailer) = trailer {
        dump.extend_from_slice(trailer);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| format!("failed to create {}: {}", parent.display(), err))?;
    }
    fs::write(path, dump).map_err(|err| format!("failed to write {}: {}", path.display(), err))
}
