//! Error types for batch alignment.
//!
//! Batch-level failures abort the whole batch: the caller must not read the
//! output buffer after an `Err`. Per-pair faults (UTF-8 decoding) carry the
//! offending pair index so the caller can retry or drop that one entry.

use thiserror::Error;

use crate::backend::Backend;

/// A fault attributable to a single pair in a batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PairError {
    /// One side of a pair is not valid UTF-8 (strict decoding, never coerced).
    #[error("pair {pair}: invalid UTF-8 in the {which} sequence at byte {valid_up_to}")]
    InvalidUtf8 {
        /// Index of the pair within the batch.
        pair: usize,
        /// Which side failed: `"left"` or `"right"`.
        which: &'static str,
        /// Length of the valid prefix, in bytes.
        valid_up_to: usize,
    },
}

/// A batch-level failure. No partial output survives any of these.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The two input arrays, or the output buffer, disagree on length.
    #[error("length mismatch: {left} left sequences, {right} right, {out} output slots")]
    LengthMismatch {
        left: usize,
        right: usize,
        out: usize,
    },

    /// The selected backend cannot amortize its launch overhead on this batch.
    /// Raised at batch-construction time, before any computation starts.
    #[error("{backend:?} backend requires at least {required} pairs, got {actual}")]
    BatchTooSmall {
        backend: Backend,
        required: usize,
        actual: usize,
    },

    /// The fork-join worker pool could not be constructed.
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    /// A pair-localized fault that aborted the batch.
    #[error(transparent)]
    Pair(#[from] PairError),
}

pub type Result<T> = std::result::Result<T, BatchError>;
