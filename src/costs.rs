//! Substitution and gap cost models.
//!
//! A cost model is constructed once and shared read-only across every worker
//! of every batch that uses it; nothing here mutates after construction.
//! Distances (Hamming, Levenshtein) use fixed unit costs and ignore these
//! models; the alignment scoring kernels (Needleman-Wunsch, Smith-Waterman)
//! take both a substitution model and a gap model.

/// Dense 256x256 substitution matrix indexed by byte-value pairs.
///
/// Entries are `i8`, matching the range of the standard biological matrices
/// (BLOSUM62 fits comfortably); scores accumulate in `i32` inside the DP.
pub struct SubstitutionMatrix {
    scores: Box<[i8; 256 * 256]>,
}

impl SubstitutionMatrix {
    /// Build from a flat row-major 256x256 table: `scores[a * 256 + b]`.
    pub fn from_flat(scores: Box<[i8; 256 * 256]>) -> Self {
        Self { scores }
    }

    /// Build by evaluating `f(a, b)` for every byte pair.
    pub fn from_fn(f: impl Fn(u8, u8) -> i8) -> Self {
        let mut scores = vec![0i8; 256 * 256];
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                scores[a as usize * 256 + b as usize] = f(a, b);
            }
        }
        let scores: Box<[i8; 256 * 256]> = scores
            .into_boxed_slice()
            .try_into()
            .expect("length is 256*256 by construction");
        Self { scores }
    }

    #[inline(always)]
    pub fn score(&self, a: u8, b: u8) -> i32 {
        self.scores[a as usize * 256 + b as usize] as i32
    }
}

impl std::fmt::Debug for SubstitutionMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubstitutionMatrix").finish_non_exhaustive()
    }
}

/// Substitution cost model: a uniform match/mismatch pair, or a full matrix.
#[derive(Debug)]
pub enum SubstitutionModel {
    /// One score for equal bytes, one for unequal bytes.
    Unary { matched: i8, mismatched: i8 },
    /// Per-byte-pair scores (e.g. BLOSUM62 widened to 256x256).
    Matrix(SubstitutionMatrix),
}

impl SubstitutionModel {
    /// Uniform model. Distances use non-negative mismatch costs; scoring
    /// kernels typically use a positive match and negative mismatch.
    pub fn unary(matched: i8, mismatched: i8) -> Self {
        Self::Unary {
            matched,
            mismatched,
        }
    }

    /// Expand a unary model into a dense matrix. Matrix-only execution paths
    /// use this so unary requests go through the same lookup.
    pub fn to_matrix(&self) -> SubstitutionMatrix {
        match self {
            Self::Unary {
                matched,
                mismatched,
            } => {
                let (m, x) = (*matched, *mismatched);
                SubstitutionMatrix::from_fn(|a, b| if a == b { m } else { x })
            }
            Self::Matrix(mat) => SubstitutionMatrix {
                scores: mat.scores.clone(),
            },
        }
    }

    #[inline(always)]
    pub fn score(&self, a: u8, b: u8) -> i32 {
        match self {
            Self::Unary {
                matched,
                mismatched,
            } => {
                if a == b {
                    *matched as i32
                } else {
                    *mismatched as i32
                }
            }
            Self::Matrix(mat) => mat.score(a, b),
        }
    }
}

/// Gap cost model: linear per-character, or affine open/extend.
///
/// A gap of length `L` under the affine model costs `open + (L-1) * extend`.
/// `extend <= open` is typical but not enforced; any combination computes
/// correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapModel {
    /// One penalty per gap character.
    Linear(i32),
    /// `open` charged for the first character of a gap, `extend` for each
    /// subsequent character.
    Affine { open: i32, extend: i32 },
}

impl GapModel {
    /// Resolve to `(open, extend)`; linear is the degenerate `open == extend`.
    #[inline]
    pub fn open_extend(&self) -> (i32, i32) {
        match *self {
            GapModel::Linear(g) => (g, g),
            GapModel::Affine { open, extend } => (open, extend),
        }
    }
}
