//! Offline decoding of recorded serial dumps.
//!
//! A dump is the raw byte stream as captured from the port (for example with
//! `cat /dev/ttyACM0 > dump.bin`). It is run through the same `EventSource`
//! as the live stream; reaching the end of the file ends the capture normally.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::source::{EventSource, LineFrameSource, SourceError};
use crate::{REPORT_VERSION, SensorEvent};

/// Decoded contents of a recorded dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureReport {
    /// Report schema version.
    pub report_version: u32,
    /// Frames seen, including dropped ones.
    pub frames_total: u64,
    /// Frames rejected by the size check.
    pub frames_dropped: u64,
    /// Decoded events in stream order.
    pub events: Vec<SensorEvent>,
}

/// Decode every packet in `reader` until end of stream.
///
/// # Errors
/// Returns the first read error; the end of the stream is not an error here.
pub fn decode_capture<R: BufRead>(reader: R) -> Result<CaptureReport, SourceError> {
    let mut source = EventSource::new(LineFrameSource::new(reader));
    let mut events = Vec::new();
    for item in source.by_ref() {
        match item {
            Ok(event) => events.push(event),
            Err(SourceError::Closed) => break,
            Err(err) => return Err(err),
        }
    }

    Ok(CaptureReport {
        report_version: REPORT_VERSION,
        frames_total: source.frames_read(),
        frames_dropped: source.frames_dropped(),
        events,
    })
}

pub fn decode_capture_file(path: &Path) -> Result<CaptureReport, SourceError> {
    let file = File::open(path)?;
    decode_capture(BufReader::new(file))
}
