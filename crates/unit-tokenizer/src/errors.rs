//! # Error Types

use std::path::PathBuf;

/// Errors from unit-tokenizer operations.
#[derive(Debug, thiserror::Error)]
pub enum UnitTokenizerError {
    /// `fit` was called on a batch that is empty or contains only empty sequences.
    #[error("training data is empty")]
    EmptyTrainingData,

    /// `target_vocab_size` did not exceed the initial vocabulary size.
    #[error(
        "target vocab size ({target}) must be greater than the initial vocab size ({initial})"
    )]
    TargetVocabTooSmall {
        /// The requested target vocabulary size.
        target: usize,
        /// The initial vocabulary size computed from the training batch.
        initial: usize,
    },

    /// `encode`, `decode`, or `save` was called before the tokenizer was fitted or loaded.
    #[error("tokenizer must be fitted or loaded before this operation")]
    NotFitted,

    /// A batch could not be validated against the `Vec<Vec<Unit>>` shape.
    #[error("malformed batch: {0}")]
    MalformedBatch(String),

    /// A persisted file (vocab snapshot or line-oriented integer file) did not conform to
    /// its expected format.
    #[error("malformed file {path}: {reason}")]
    MalformedFile {
        /// The file that failed to parse.
        path: PathBuf,
        /// Why parsing failed.
        reason: String,
    },

    /// An I/O error from a file adapter or persistence call.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// An error while encoding/decoding the JSON persistence format.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type for unit-tokenizer operations.
pub type UTResult<T> = Result<T, UnitTokenizerError>;
