//! Frame sources and the event loop built on top of them.
//!
//! A `FrameSource` yields raw line-delimited frames; `EventSource` turns them
//! into validated `SensorEvent`s. Device I/O (serial enumeration and port
//! access) lives in `serial`, line framing in `line`.

mod events;
mod line;
pub mod serial;

pub use events::EventSource;
pub use line::LineFrameSource;

use thiserror::Error;

use crate::packet::error::DecodeError;

/// Producer of raw frames with the line terminator already stripped.
///
/// `Ok(None)` means the underlying stream ended.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<Vec<u8>>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serial port error ({context}): {message}")]
    Serial {
        context: &'static str,
        message: String,
    },
    #[error("no serial device matches {vid:04x}:{pid:04x}")]
    DeviceNotFound { vid: u16, pid: u16 },
    #[error("stream closed by device")]
    Closed,
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}
