//! Error types for conversion operations.

use thiserror::Error;

/// Result type for conversion operations.
pub type ScribeResult<T> = Result<T, ScribeError>;

/// Errors that can occur while converting blocks or wrapping documents.
#[derive(Debug, Error)]
pub enum ScribeError {
    /// A stroke used a color name that has no entry in the palette.
    #[error("Unknown pen color: {color}")]
    UnknownColor {
        /// The offending color name as it appeared on the block.
        color: String,
    },

    /// A block could not be mapped to an element.
    #[error("Failed to convert block #{index} ({kind}): {source}")]
    Block {
        /// Position of the block in the input sequence.
        index: usize,
        /// Name of the block kind.
        kind: String,
        /// The underlying mapping failure.
        #[source]
        source: Box<ScribeError>,
    },

    /// A note did not contain a fenced drawing block.
    #[error("Note does not contain an embedded drawing")]
    MissingDrawing,

    /// Document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
