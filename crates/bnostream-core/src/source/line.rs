use std::io::{BufRead, ErrorKind};

use tracing::debug;

use super::{FrameSource, SourceError};
use crate::packet::layout::{FRAME_TERMINATOR, PACKET_SIZE};

/// Splits a byte stream on `FRAME_TERMINATOR`.
///
/// Read timeouts are retried, so a quiet device blocks the caller instead of
/// failing. Bytes received before a timeout stay part of the pending frame.
pub struct LineFrameSource<R> {
    reader: R,
}

impl<R: BufRead> LineFrameSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> FrameSource for LineFrameSource<R> {
    fn next_frame(&mut self) -> Result<Option<Vec<u8>>, SourceError> {
        let mut frame = Vec::with_capacity(PACKET_SIZE + 1);
        loop {
            match self.reader.read_until(FRAME_TERMINATOR, &mut frame) {
                Ok(0) if frame.is_empty() => return Ok(None),
                Ok(_) => break,
                Err(err) if err.kind() == ErrorKind::TimedOut => {
                    debug!(pending = frame.len(), "read timed out, waiting for more data");
                }
                Err(err) => return Err(err.into()),
            }
        }
        if frame.last() == Some(&FRAME_TERMINATOR) {
            frame.pop();
        }
        Ok(Some(frame))
    }
}
