//! Error types for the document generator.
//!
//! This module defines all error types that can occur while preparing
//! content and assembling the output file.

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Signature image could not be decoded or re-encoded.
    ///
    /// Raised before any serialization starts; the caller can retry the
    /// document without a signature.
    #[error("Image error: {0}")]
    Image(String),

    /// The object graph violated an internal invariant (undefined object
    /// number, non-contiguous numbering). Indicates a builder bug, not bad
    /// input.
    #[error("Invalid object graph: {0}")]
    InvalidStructure(String),

    /// An entry list received from a collaborator failed to parse.
    #[error("Invalid entry list: {0}")]
    EntryParse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
