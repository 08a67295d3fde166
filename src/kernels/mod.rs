//! Scalar DP kernels and their shared scratch workspace.
//!
//! Every kernel here is the reference implementation: accelerated backends
//! are validated against these, elementwise, by `crate::harness`.

pub mod affine;
pub mod hamming;
pub mod levenshtein;

/// Result of a bounded distance kernel.
///
/// The bound is inclusive: `Within(d)` is returned exactly when the true
/// distance `d <= bound`, otherwise `Exceeded`. A bounded kernel never
/// returns a wrong finite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundedDistance {
    Within(usize),
    Exceeded,
}

impl BoundedDistance {
    /// Collapse to an integer for flat output buffers: `Exceeded` maps to
    /// the documented sentinel `bound + 1`.
    #[inline]
    pub fn to_sentinel(self, bound: usize) -> usize {
        match self {
            BoundedDistance::Within(d) => d,
            BoundedDistance::Exceeded => bound + 1,
        }
    }
}

/// Reusable per-worker buffers for the DP kernels.
///
/// A worker owns one `Scratch` for its lifetime and reuses it across every
/// pair it processes; nothing allocates per pair once the buffers have grown
/// to the batch's high-water mark. Capacity is kept across `clear`-style
/// reuse, matching the rolling-row memory model: two `usize` rows for
/// Levenshtein, three pairs of `i32` rows for the affine states, and two
/// code-point buffers for the UTF-8 adapter.
#[derive(Default)]
pub struct Scratch {
    /// Levenshtein rolling rows, sized `min(n, m) + 1`.
    pub(crate) dist_prev: Vec<usize>,
    pub(crate) dist_curr: Vec<usize>,
    /// Affine-state rolling rows (M, Ix, Iy), sized `m + 1`.
    pub(crate) m_prev: Vec<i32>,
    pub(crate) m_curr: Vec<i32>,
    pub(crate) ix_prev: Vec<i32>,
    pub(crate) ix_curr: Vec<i32>,
    pub(crate) iy_prev: Vec<i32>,
    pub(crate) iy_curr: Vec<i32>,
    /// Decoded code points for the UTF-8 adapter.
    pub(crate) left_runes: Vec<u32>,
    pub(crate) right_runes: Vec<u32>,
}

impl Scratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resize the distance rows to `len` slots, reusing capacity.
    pub(crate) fn distance_rows(&mut self, len: usize) -> (&mut [usize], &mut [usize]) {
        self.dist_prev.clear();
        self.dist_prev.resize(len, 0);
        self.dist_curr.clear();
        self.dist_curr.resize(len, 0);
        (self.dist_prev.as_mut_slice(), self.dist_curr.as_mut_slice())
    }
}
