//! Execution backend selection.
//!
//! A `Backend` is chosen once, at batch-engine construction, and every batch
//! dispatched through that engine runs on it. All backends satisfy the same
//! contract: `output[i]` is the result for `pairs[i]`, bit-identical to the
//! scalar baseline. The equivalence harness (`crate::harness`) is the
//! authority on that claim.

use crate::simd::{detect_simd_engine, engine_description, SimdEngine};

/// Default minimum batch size for the GPU backend. Below this the launch
/// overhead dominates and the request is rejected up front.
pub const GPU_MIN_BATCH: usize = 1024;

/// Compute backend for batch alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Sequential reference baseline. Always available; every other backend
    /// is validated against it.
    Scalar,
    /// Single-threaded execution with SIMD-aware scheduling: pairs are
    /// grouped by similar length into lane-width clusters and the Hamming
    /// kernel takes its word-parallel fast path.
    Simd(SimdEngine),
    /// Fork-join execution over a fixed worker pool; pairs are partitioned
    /// into contiguous chunks, one chunk per worker.
    MultiCore,
    /// GPU offload. Requires `n >= GPU_MIN_BATCH`; currently resolves to the
    /// multi-core path after the capacity check, as an integration point
    /// for a device-queue executor.
    Gpu,
}

impl Backend {
    /// Resolve the requested backend to the one that will actually run.
    /// GPU resolves to multi-core until a device executor is wired in; the
    /// capacity check still applies to the *requested* backend.
    pub fn effective(&self) -> Backend {
        match self {
            Backend::Gpu => {
                log::debug!("gpu backend requested, routing to multi-core executor");
                Backend::MultiCore
            }
            other => *other,
        }
    }

    /// Minimum batch size this backend accepts. CPU paths take any size,
    /// including the empty batch.
    pub fn min_batch(&self) -> usize {
        match self {
            Backend::Gpu => GPU_MIN_BATCH,
            _ => 0,
        }
    }

    pub fn description(&self) -> String {
        match self {
            Backend::Scalar => "scalar baseline".to_string(),
            Backend::Simd(engine) => format!("simd-aware ({})", engine_description(*engine)),
            Backend::MultiCore => "multi-core fork-join".to_string(),
            Backend::Gpu => "gpu (capacity-checked, multi-core fallback)".to_string(),
        }
    }
}

/// Detect the best generally-available backend: multi-core when more than
/// one CPU is present, otherwise SIMD-aware single-threaded.
pub fn detect_backend() -> Backend {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    if cores > 1 {
        Backend::MultiCore
    } else {
        Backend::Simd(detect_simd_engine())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpu_resolves_to_multicore() {
        assert_eq!(Backend::Gpu.effective(), Backend::MultiCore);
        assert_eq!(Backend::Gpu.min_batch(), GPU_MIN_BATCH);
    }

    #[test]
    fn cpu_backends_resolve_to_themselves() {
        assert_eq!(Backend::Scalar.effective(), Backend::Scalar);
        assert_eq!(Backend::MultiCore.effective(), Backend::MultiCore);
        assert_eq!(Backend::Scalar.min_batch(), 0);
    }

    #[test]
    fn detection_returns_runnable_backend() {
        let backend = detect_backend();
        assert!(!backend.description().is_empty());
        assert_ne!(backend.effective(), Backend::Gpu);
    }
}
