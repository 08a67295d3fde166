//! Batch execution engine.
//!
//! A [`BatchEngine`] is constructed once per backend (its worker pool is
//! amortized across calls) and then drives N independent pair computations
//! per [`BatchEngine::run`] call. The contract, identical on every backend:
//!
//! - `output[i]` is the result for `(left[i], right[i])`, regardless of
//!   which worker computed it or in what order workers finished;
//! - the only state shared between pairs is the read-only cost model;
//! - scratch rows are owned per worker for the worker's lifetime, never
//!   allocated per pair;
//! - on `Err` the batch is aborted whole and the output buffer contents are
//!   unspecified — callers must not read them.

use rayon::prelude::*;

use crate::backend::Backend;
use crate::costs::{GapModel, SubstitutionModel};
use crate::error::{BatchError, PairError, Result};
use crate::kernels::{affine, hamming, levenshtein, Scratch};
use crate::simd::{engine_lanes, SimdEngine};
use crate::utf8;

/// One alignment operation over a whole batch. Bounds are inclusive; a
/// bounded entry that exceeds its bound is written as `bound + 1`.
#[derive(Debug, Clone, Copy)]
pub enum AlignTask<'m> {
    /// Byte Hamming distance over the overlapping prefix; see
    /// [`crate::kernels::hamming`] for the convention.
    Hamming { bound: Option<usize> },
    /// Hamming distance over decoded code points.
    HammingUtf8 { bound: Option<usize> },
    /// Byte Levenshtein distance.
    Levenshtein { bound: Option<usize> },
    /// Levenshtein distance over decoded code points.
    LevenshteinUtf8 { bound: Option<usize> },
    /// Affine-gap global alignment score.
    NeedlemanWunsch {
        subs: &'m SubstitutionModel,
        gap: GapModel,
    },
    /// Affine-gap local alignment score.
    SmithWaterman {
        subs: &'m SubstitutionModel,
        gap: GapModel,
    },
}

/// Per-call statistics for the reporting collaborator. Not part of any
/// correctness contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    /// Number of pairs computed.
    pub pairs: usize,
    /// Total input bytes across both sides.
    pub bytes: u64,
    /// DP cell-update metric: `sum(len(a_i) * len(b_i))`.
    pub cell_updates: u64,
    /// Wrapping sum of the output values, for diffing baseline vs
    /// accelerated batches cheaply.
    pub checksum: u64,
}

/// Batch engine bound to one backend.
pub struct BatchEngine {
    backend: Backend,
    pool: Option<rayon::ThreadPool>,
}

impl BatchEngine {
    /// Build an engine for `backend`. Multi-core execution (including the
    /// GPU fallback path) spawns its worker pool here, once.
    pub fn new(backend: Backend) -> Result<Self> {
        Self::build(backend, None)
    }

    /// Build with an explicit worker count (multi-core path only).
    pub fn with_threads(backend: Backend, threads: usize) -> Result<Self> {
        Self::build(backend, Some(threads))
    }

    fn build(backend: Backend, threads: Option<usize>) -> Result<Self> {
        let pool = match backend.effective() {
            Backend::MultiCore => {
                let mut builder = rayon::ThreadPoolBuilder::new();
                if let Some(threads) = threads {
                    builder = builder.num_threads(threads);
                }
                let pool = builder.build()?;
                log::debug!(
                    "batch engine: {} with {} workers",
                    backend.description(),
                    pool.current_num_threads()
                );
                Some(pool)
            }
            _ => None,
        };
        Ok(Self { backend, pool })
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Compute one result per pair into `out`.
    ///
    /// `left`, `right`, and `out` must all have length N; the input slices
    /// stay caller-owned and are only read for the duration of this call.
    pub fn run(
        &self,
        task: AlignTask<'_>,
        left: &[&[u8]],
        right: &[&[u8]],
        out: &mut [i64],
    ) -> Result<BatchReport> {
        if left.len() != right.len() || left.len() != out.len() {
            return Err(BatchError::LengthMismatch {
                left: left.len(),
                right: right.len(),
                out: out.len(),
            });
        }
        let n = left.len();
        // Capacity check happens against the *requested* backend, before any
        // computation starts.
        if n < self.backend.min_batch() {
            return Err(BatchError::BatchTooSmall {
                backend: self.backend,
                required: self.backend.min_batch(),
                actual: n,
            });
        }

        match self.backend.effective() {
            Backend::Scalar => run_range(task, left, right, out, 0)?,
            Backend::Simd(engine) => run_lane_grouped(task, left, right, out, engine)?,
            Backend::MultiCore => self.run_forked(task, left, right, out)?,
            // `effective()` never yields Gpu.
            Backend::Gpu => unreachable!("gpu resolves to a cpu path"),
        }

        Ok(report(left, right, out))
    }

    /// Fork-join over contiguous chunks, one chunk per worker. Each worker
    /// owns one scratch for its whole partition and writes only to its own
    /// disjoint output range, so no synchronization is needed on writes.
    fn run_forked(
        &self,
        task: AlignTask<'_>,
        left: &[&[u8]],
        right: &[&[u8]],
        out: &mut [i64],
    ) -> std::result::Result<(), PairError> {
        let pool = self
            .pool
            .as_ref()
            .expect("multi-core engine always holds a pool");
        let workers = pool.current_num_threads().max(1);
        let chunk = out.len().div_ceil(workers).max(1);
        pool.install(|| {
            out.par_chunks_mut(chunk)
                .enumerate()
                .try_for_each(|(chunk_index, out_chunk)| {
                    let start = chunk_index * chunk;
                    let end = start + out_chunk.len();
                    run_range(task, &left[start..end], &right[start..end], out_chunk, start)
                })
        })
    }
}

/// Sequential execution over `out`, with pair indices offset by `base` so
/// per-pair errors stay attributable within the full batch.
fn run_range(
    task: AlignTask<'_>,
    left: &[&[u8]],
    right: &[&[u8]],
    out: &mut [i64],
    base: usize,
) -> std::result::Result<(), PairError> {
    let mut scratch = Scratch::new();
    for (i, ((a, b), slot)) in left.iter().zip(right).zip(out.iter_mut()).enumerate() {
        *slot = compute_one(task, a, b, base + i, &mut scratch)?;
    }
    Ok(())
}

/// Single-threaded SIMD-aware schedule: pairs are visited in groups of
/// similar length sized to the engine's lane count, so vector loops (the
/// Hamming word path today, lockstep DP lanes as they land) waste as few
/// lanes as possible. Results still land at their original indices.
fn run_lane_grouped(
    task: AlignTask<'_>,
    left: &[&[u8]],
    right: &[&[u8]],
    out: &mut [i64],
    engine: SimdEngine,
) -> std::result::Result<(), PairError> {
    let mut order: Vec<usize> = (0..left.len()).collect();
    order.sort_by_key(|&i| left[i].len().max(right[i].len()));

    let mut scratch = Scratch::new();
    for group in order.chunks(engine_lanes(engine)) {
        for &i in group {
            out[i] = compute_one(task, left[i], right[i], i, &mut scratch)?;
        }
    }
    Ok(())
}

/// One pair, one result. The single source of truth every backend routes
/// through; backend equivalence follows from pairs being independent.
fn compute_one(
    task: AlignTask<'_>,
    a: &[u8],
    b: &[u8],
    pair: usize,
    scratch: &mut Scratch,
) -> std::result::Result<i64, PairError> {
    let value = match task {
        AlignTask::Hamming { bound: None } => hamming::hamming(a, b) as i64,
        AlignTask::Hamming { bound: Some(bound) } => {
            hamming::hamming_bounded(a, b, bound).to_sentinel(bound) as i64
        }
        AlignTask::HammingUtf8 { bound } => {
            utf8::with_decoded(a, b, pair, scratch, |l, r, _| match bound {
                None => hamming::hamming_of(l, r) as i64,
                Some(bound) => hamming::hamming_of_bounded(l, r, bound).to_sentinel(bound) as i64,
            })?
        }
        AlignTask::Levenshtein { bound: None } => levenshtein::distance_of(a, b, scratch) as i64,
        AlignTask::Levenshtein { bound: Some(bound) } => {
            levenshtein::distance_of_bounded(a, b, bound, scratch).to_sentinel(bound) as i64
        }
        AlignTask::LevenshteinUtf8 { bound } => {
            utf8::with_decoded(a, b, pair, scratch, |l, r, s| match bound {
                None => levenshtein::distance_of(l, r, s) as i64,
                Some(bound) => {
                    levenshtein::distance_of_bounded(l, r, bound, s).to_sentinel(bound) as i64
                }
            })?
        }
        AlignTask::NeedlemanWunsch { subs, gap } => {
            affine::needleman_wunsch(a, b, subs, gap, scratch) as i64
        }
        AlignTask::SmithWaterman { subs, gap } => {
            affine::smith_waterman(a, b, subs, gap, scratch) as i64
        }
    };
    debug_assert!(
        !matches!(
            task,
            AlignTask::Hamming { .. } | AlignTask::Levenshtein { .. }
        ) || value >= 0,
        "distance kernels never go negative"
    );
    Ok(value)
}

fn report(left: &[&[u8]], right: &[&[u8]], out: &[i64]) -> BatchReport {
    let mut bytes = 0u64;
    let mut cell_updates = 0u64;
    for (a, b) in left.iter().zip(right) {
        bytes += (a.len() + b.len()) as u64;
        cell_updates += a.len() as u64 * b.len() as u64;
    }
    let checksum = out
        .iter()
        .fold(0u64, |acc, &v| acc.wrapping_add(v as u64));
    BatchReport {
        pairs: out.len(),
        bytes,
        cell_updates,
        checksum,
    }
}
