use thiserror::Error;

/// Validation failure raised while building a [`RangeKeyMap`](crate::RangeKeyMap).
///
/// Construction is all-or-nothing: any of these rejects the whole input
/// mapping, and the offending key(s) are rendered into the message.
/// Payloads are pre-rendered strings so the error type stays non-generic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConstructError {
    /// A span key whose left boundary exceeds (or cannot be compared to)
    /// its right boundary.
    #[error("invalid span {key}: left boundary must be comparable to and not exceed the right boundary")]
    InvalidSpan { key: String },

    /// Two entries share the same left boundary, regardless of their
    /// right boundaries. Two points at the same position land here too.
    #[error("duplicated left boundary: {first} and {second}")]
    DuplicateLeftBoundary { first: String, second: String },

    /// Two segments cover a common key.
    #[error("overlap detected: {prev} and {next}")]
    Overlap { prev: String, next: String },

    /// A boundary that cannot be ordered against the others (for float
    /// keys, a NaN boundary).
    #[error("boundary {key} is not comparable with the other boundaries")]
    IncomparableBoundary { key: String },
}
