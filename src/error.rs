//! Error types for gen-content-parser.
//!
//! Cascade misses (undecodable JSON, missing table rows, no HTML block) are
//! never errors: they surface as `None` plus a warning on the record. Only the
//! conditions below are reported through `Result`.

/// Error type for assembly operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Raw generation bytes could not be decoded as text.
    #[error("Input is not decodable text: {0}")]
    Encoding(String),

    /// An assembled record broke one of its output invariants.
    #[error("Content record invariant violated: {0}")]
    InvariantViolation(String),
}

/// Result type alias for assembly operations.
pub type Result<T> = std::result::Result<T, Error>;
