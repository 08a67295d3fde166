//! # pairalign
//!
//! Batched pairwise sequence alignment: Hamming distance, Levenshtein
//! (edit) distance, and affine-gap Needleman-Wunsch / Smith-Waterman
//! scores, computed over large batches of byte-string pairs with
//! bit-identical results on every execution backend.
//!
//! ## Layout
//!
//! - [`kernels`] — scalar reference DP kernels and the per-worker scratch
//!   workspace (rolling rows, reused across pairs).
//! - [`costs`] — substitution models (unary or dense 256x256 matrix) and
//!   gap models (linear or affine open/extend).
//! - [`utf8`] — adapter running the distance kernels over decoded Unicode
//!   scalar values; malformed UTF-8 is an error, never coerced.
//! - [`batch`] — the batch execution engine: N independent pairs, one
//!   result each, fork-join parallelism over contiguous chunks.
//! - [`backend`] / [`simd`] — backend selection and runtime SIMD detection.
//! - [`harness`] — testing-time backend equivalence checker.
//!
//! ## Quick start
//!
//! ```
//! use pairalign::backend::Backend;
//! use pairalign::batch::{AlignTask, BatchEngine};
//!
//! let engine = BatchEngine::new(Backend::Scalar)?;
//! let left: Vec<&[u8]> = vec![b"kitten", b"abc"];
//! let right: Vec<&[u8]> = vec![b"sitting", b"abc"];
//! let mut out = vec![0i64; 2];
//! engine.run(AlignTask::Levenshtein { bound: None }, &left, &right, &mut out)?;
//! assert_eq!(out, vec![3, 0]);
//! # Ok::<(), pairalign::error::BatchError>(())
//! ```

pub mod backend;
pub mod batch;
pub mod costs;
pub mod error;
pub mod harness;
pub mod kernels;
pub mod simd;
pub mod utf8;

pub use backend::{detect_backend, Backend};
pub use batch::{AlignTask, BatchEngine, BatchReport};
pub use costs::{GapModel, SubstitutionMatrix, SubstitutionModel};
pub use error::{BatchError, PairError};
pub use kernels::{BoundedDistance, Scratch};
