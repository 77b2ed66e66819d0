use thiserror::Error;

/// Errors returned by packet decoding.
///
/// Decoding only fails when a caller hands the decoder a slice that does not
/// match the layout, which means frame validation was skipped.
///
/// # Examples
/// ```
/// use bnostream_core::DecodeError;
///
/// let err = DecodeError::MalformedField { expected: 2, actual: 1 };
/// assert!(err.to_string().contains("malformed field"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("malformed field: need {expected} bytes, got {actual}")]
    MalformedField { expected: usize, actual: usize },
}
