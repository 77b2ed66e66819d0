use std::fs;
use std::io::Cursor;
use std::time::{SystemTime, UNIX_EPOCH};

use bnostream_core::packet::{Field, PACKET_SIZE};
use bnostream_core::{EventSource, LineFrameSource, SourceError, decode_capture_file};

fn stream_of(frames: &[Vec<u8>]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for frame in frames {
        bytes.extend_from_slice(frame);
        bytes.push(b'\n');
    }
    bytes
}

fn packet_with_accel_x(value: i16) -> Vec<u8> {
    let mut frame = vec![0u8; PACKET_SIZE];
    frame[Field::Acceleration.span().offset..][..2].copy_from_slice(&value.to_le_bytes());
    frame
}

#[test]
fn malformed_frames_do_not_interrupt_the_stream() {
    let frames = vec![
        packet_with_accel_x(100),
        vec![0x11; 10],
        packet_with_accel_x(200),
        vec![0x11; 40],
        packet_with_accel_x(300),
    ];
    let source = LineFrameSource::new(Cursor::new(stream_of(&frames)));
    let mut events = EventSource::new(source);

    let mut decoded = Vec::new();
    for item in events.by_ref() {
        match item {
            Ok(event) => decoded.push(event.acceleration.x),
            Err(SourceError::Closed) => break,
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    assert_eq!(decoded, vec![1.0, 2.0, 3.0]);
    assert_eq!(events.frames_dropped(), 2);
    assert!(events.is_closed());
}

#[test]
fn connect_uses_the_collaborator() {
    let bytes = stream_of(&[packet_with_accel_x(-50)]);
    let mut events = EventSource::connect(|| Ok(LineFrameSource::new(Cursor::new(bytes)))).unwrap();

    let event = events.next().unwrap().unwrap();
    assert_eq!(event.acceleration.x, -0.5);
    assert!(matches!(events.next(), Some(Err(SourceError::Closed))));
}

#[test]
fn capture_file_missing_is_io_error() {
    let mut path = std::env::temp_dir();
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    path.push(format!("bnostream_missing_{unique}.bin"));
    let _ = fs::remove_file(&path);

    let err = decode_capture_file(&path).unwrap_err();
    assert!(matches!(err, SourceError::Io(_)));
}
