use std::iter::FusedIterator;

use tracing::{debug, warn};

use super::{FrameSource, SourceError};
use crate::SensorEvent;
use crate::packet::{PACKET_SIZE, decode_packet, is_valid_packet};

/// Lazy, single-pass sequence of decoded sensor events.
///
/// Frames whose size is not `PACKET_SIZE` are dropped with a warning; this
/// is how a terminator byte inside a payload (which splits one packet into
/// two fragments) is absorbed. The end of the stream is reported as
/// `SourceError::Closed`. After the first error the frame source is dropped
/// and the iterator only returns `None`.
///
/// # Examples
/// ```
/// use std::io::Cursor;
///
/// use bnostream_core::{EventSource, LineFrameSource, SourceError};
///
/// let mut stream = vec![0u8; 26];
/// stream.push(b'\n');
/// stream.extend_from_slice(b"junk\n");
///
/// let mut events = EventSource::new(LineFrameSource::new(Cursor::new(stream)));
/// assert!(events.next().unwrap().is_ok());
/// assert!(matches!(events.next(), Some(Err(SourceError::Closed))));
/// assert!(events.next().is_none());
/// assert_eq!(events.frames_dropped(), 1);
/// ```
pub struct EventSource<S> {
    source: Option<S>,
    frames_read: u64,
    frames_dropped: u64,
    events_decoded: u64,
}

impl<S: FrameSource> EventSource<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Some(source),
            frames_read: 0,
            frames_dropped: 0,
            events_decoded: 0,
        }
    }

    /// Acquire a frame source through `open` (typically device discovery).
    ///
    /// # Errors
    /// Propagates the collaborator's error, e.g. `SourceError::DeviceNotFound`.
    pub fn connect<F>(open: F) -> Result<Self, SourceError>
    where
        F: FnOnce() -> Result<S, SourceError>,
    {
        Ok(Self::new(open()?))
    }

    /// Whether the underlying source has been released.
    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    pub fn frames_dropped(&self) -> u64 {
        self.frames_dropped
    }

    pub fn events_decoded(&self) -> u64 {
        self.events_decoded
    }

    fn next_event(&mut self) -> Result<Option<SensorEvent>, SourceError> {
        let Some(source) = self.source.as_mut() else {
            return Ok(None);
        };
        loop {
            let frame = source.next_frame()?.ok_or(SourceError::Closed)?;
            self.frames_read += 1;
            if !is_valid_packet(&frame) {
                self.frames_dropped += 1;
                warn!(
                    size = frame.len(),
                    expected = PACKET_SIZE,
                    "dropping frame: size mismatch"
                );
                continue;
            }
            let event = decode_packet(&frame)?;
            self.events_decoded += 1;
            debug!(frame = self.frames_read, "decoded sensor event");
            return Ok(Some(event));
        }
    }
}

impl<S: FrameSource> Iterator for EventSource<S> {
    type Item = Result<SensorEvent, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_event() {
            Ok(event) => event.map(Ok),
            Err(err) => {
                self.source = None;
                Some(Err(err))
            }
        }
    }
}

impl<S: FrameSource> FusedIterator for EventSource<S> {}
