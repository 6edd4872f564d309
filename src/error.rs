use thiserror::Error;

/// Codec Error
#[derive(Debug, Error)]
pub enum Error {
    /// IO Error
    #[error(transparent)]
    Stream(#[from] std::io::Error),

    /// Boundary pattern too long
    #[error("boundary pattern is too long, got `{0}` bytes")]
    PatternTooLong(usize),

    /// Empty boundary pattern
    #[error("boundary pattern is empty")]
    EmptyPattern,

    /// Missing part name
    #[error("content disposition carries no part name")]
    MissingName,

    /// Malformed segment
    #[error("malformed segment: {0}")]
    MalformedSegment(&'static str),

    /// Missing closing delimiter
    #[error("stream ended without a closing delimiter")]
    MalformedStream,

    /// Segment too large
    #[error("segment is too large, limit to `{0}`")]
    SegmentTooLarge(usize),

    /// Parts too many
    #[error("parts is too many, limit to `{0}`")]
    PartsTooMany(usize),

    /// Not a multipart/form-data content type
    #[error("content type is not multipart/form-data")]
    NotMultipart,

    /// Missing boundary parameter
    #[error("content type carries no boundary parameter")]
    MissingBoundary,
}
