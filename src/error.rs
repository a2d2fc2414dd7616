//! Error types for the formant filter bank.

use thiserror::Error;

/// Result type for formant operations.
pub type FormantResult<T> = Result<T, FormantError>;

/// Errors raised by control-rate operations.
///
/// Nothing on the audio path returns these. Numeric degeneracy in the filter
/// design is clamped instead of reported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormantError {
    /// Formant index outside the bank.
    #[error("formant index {index} out of range (bank has {count} formants)")]
    FormantIndex {
        /// The rejected index.
        index: usize,
        /// Number of formants in the bank.
        count: usize,
    },

    /// Sample rate unusable for filter design.
    #[error("invalid sample rate: {rate} Hz")]
    SampleRate {
        /// The rejected sample rate.
        rate: f32,
    },

    /// Output buffer does not match the query length.
    #[error("buffer length mismatch: expected {expected}, found {found}")]
    LengthMismatch {
        /// Number of query frequencies.
        expected: usize,
        /// Length of the supplied output buffer.
        found: usize,
    },

    /// The realtime queue had no room for a coefficient update.
    #[error("coefficient queue is full")]
    QueueFull,
}

impl FormantError {
    /// Creates a formant index error for a bank of `count` formants.
    pub fn index(index: usize, count: usize) -> Self {
        Self::FormantIndex { index, count }
    }
}
