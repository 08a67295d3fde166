//! Runtime SIMD engine detection.
//!
//! The SIMD-aware backend groups pairs of similar length into lane-width
//! batches so vector loops waste as few lanes as possible. This module
//! detects the widest engine the CPU supports and reports the matching
//! lane counts.

/// Available SIMD engine widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimdEngine {
    /// 128-bit (SSE2/NEON), always available on supported targets.
    Engine128,
    /// 256-bit (AVX2), x86_64 only.
    #[cfg(target_arch = "x86_64")]
    Engine256,
}

/// Detects the widest SIMD engine available at runtime.
///
/// Environment overrides for testing (x86_64 only):
/// - `PAIRALIGN_FORCE_SSE=1`: force the 128-bit engine.
pub fn detect_simd_engine() -> SimdEngine {
    #[cfg(target_arch = "x86_64")]
    {
        if std::env::var("PAIRALIGN_FORCE_SSE")
            .map(|v| v == "1")
            .unwrap_or(false)
        {
            log::info!("PAIRALIGN_FORCE_SSE=1: using 128-bit engine");
            return SimdEngine::Engine128;
        }
        if is_x86_feature_detected!("avx2") {
            return SimdEngine::Engine256;
        }
        SimdEngine::Engine128
    }

    #[cfg(not(target_arch = "x86_64"))]
    {
        SimdEngine::Engine128
    }
}

/// Human-readable engine description, for logs and bench output.
pub fn engine_description(engine: SimdEngine) -> &'static str {
    match engine {
        SimdEngine::Engine128 => {
            #[cfg(target_arch = "x86_64")]
            {
                "SSE2 (128-bit, 16 byte lanes)"
            }
            #[cfg(not(target_arch = "x86_64"))]
            {
                "NEON (128-bit, 16 byte lanes)"
            }
        }
        #[cfg(target_arch = "x86_64")]
        SimdEngine::Engine256 => "AVX2 (256-bit, 32 byte lanes)",
    }
}

/// Byte-lane count for an engine; also the pair-group size the SIMD-aware
/// backend uses when clustering pairs of similar length.
pub fn engine_lanes(engine: SimdEngine) -> usize {
    match engine {
        SimdEngine::Engine128 => 16,
        #[cfg(target_arch = "x86_64")]
        SimdEngine::Engine256 => 32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_yields_described_engine() {
        let engine = detect_simd_engine();
        assert!(!engine_description(engine).is_empty());
        assert!(engine_lanes(engine) >= 16);
    }

    #[test]
    fn lane_counts() {
        assert_eq!(engine_lanes(SimdEngine::Engine128), 16);
        #[cfg(target_arch = "x86_64")]
        assert_eq!(engine_lanes(SimdEngine::Engine256), 32);
    }
}
