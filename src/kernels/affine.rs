//! Affine-gap global (Needleman-Wunsch) and local (Smith-Waterman) scoring.
//!
//! Three synchronized rolling rows per state: `M` (ending in a
//! match/mismatch), `Ix` (ending in a gap in the inner sequence), `Iy`
//! (ending in a gap in the outer sequence). A gap of length `L` costs
//! `open + (L-1) * extend`. Rows are sized by the shorter sequence; when the
//! second operand is longer the pair is transposed and the score function
//! flipped, which leaves both the global and the local optimum unchanged.
//!
//! Both kernels always run the three-state form, for linear gaps too
//! (`GapModel::Linear(g)` is the degenerate `open == extend == g`). The gap
//! states chain only from `M` or themselves, never from each other, so an
//! insertion followed directly by a deletion is not a legal path: a
//! substitution cannot be undercut by a pair of opposite gaps, no matter
//! how the costs compare. A single-state recurrence admits exactly that
//! path and is therefore not a safe shortcut.

use super::Scratch;
use crate::costs::{GapModel, SubstitutionModel};

/// Low enough to act as minus infinity, high enough that per-cell additions
/// cannot wrap.
const NEG_INF: i32 = i32::MIN / 4;

#[inline(always)]
fn max3(a: i32, b: i32, c: i32) -> i32 {
    a.max(b).max(c)
}

fn resize_state_rows(scratch: &mut Scratch, width: usize) {
    for row in [
        &mut scratch.m_prev,
        &mut scratch.m_curr,
        &mut scratch.ix_prev,
        &mut scratch.ix_curr,
        &mut scratch.iy_prev,
        &mut scratch.iy_curr,
    ] {
        row.clear();
        row.resize(width, 0);
    }
}

/// Global alignment score over arbitrary elements with a caller-supplied
/// substitution score function.
pub fn nw_of<T: Copy>(
    a: &[T],
    b: &[T],
    score: impl Fn(T, T) -> i32,
    gap: GapModel,
    scratch: &mut Scratch,
) -> i32 {
    if b.len() <= a.len() {
        nw_core(a, b, |x, y| score(x, y), gap, scratch)
    } else {
        nw_core(b, a, |x, y| score(y, x), gap, scratch)
    }
}

/// Local alignment score over arbitrary elements. Always >= 0: the empty
/// alignment is a legal candidate.
pub fn sw_of<T: Copy>(
    a: &[T],
    b: &[T],
    score: impl Fn(T, T) -> i32,
    gap: GapModel,
    scratch: &mut Scratch,
) -> i32 {
    if b.len() <= a.len() {
        sw_core(a, b, |x, y| score(x, y), gap, scratch)
    } else {
        sw_core(b, a, |x, y| score(y, x), gap, scratch)
    }
}

/// Byte-sequence global alignment under a substitution model.
pub fn needleman_wunsch(
    a: &[u8],
    b: &[u8],
    subs: &SubstitutionModel,
    gap: GapModel,
    scratch: &mut Scratch,
) -> i32 {
    nw_of(a, b, |x, y| subs.score(x, y), gap, scratch)
}

/// Byte-sequence local alignment under a substitution model.
pub fn smith_waterman(
    a: &[u8],
    b: &[u8],
    subs: &SubstitutionModel,
    gap: GapModel,
    scratch: &mut Scratch,
) -> i32 {
    sw_of(a, b, |x, y| subs.score(x, y), gap, scratch)
}

/// Cost of one contiguous gap spanning `len` characters.
#[inline]
fn gap_run(len: usize, open: i32, extend: i32) -> i32 {
    debug_assert!(len > 0);
    open + (len as i32 - 1) * extend
}

fn nw_core<T: Copy>(
    outer: &[T],
    inner: &[T],
    score: impl Fn(T, T) -> i32,
    gap: GapModel,
    scratch: &mut Scratch,
) -> i32 {
    let (open, extend) = gap.open_extend();
    let (n, m) = (outer.len(), inner.len());
    if m == 0 {
        return if n == 0 { 0 } else { gap_run(n, open, extend) };
    }

    resize_state_rows(scratch, m + 1);
    scratch.m_prev[0] = 0;
    scratch.ix_prev[0] = NEG_INF;
    scratch.iy_prev[0] = NEG_INF;
    for j in 1..=m {
        scratch.m_prev[j] = NEG_INF;
        scratch.ix_prev[j] = NEG_INF;
        scratch.iy_prev[j] = gap_run(j, open, extend);
    }

    for (i, oc) in outer.iter().enumerate() {
        scratch.m_curr[0] = NEG_INF;
        scratch.ix_curr[0] = gap_run(i + 1, open, extend);
        scratch.iy_curr[0] = NEG_INF;
        for (j, ic) in inner.iter().enumerate() {
            let diag = max3(
                scratch.m_prev[j],
                scratch.ix_prev[j],
                scratch.iy_prev[j],
            );
            scratch.m_curr[j + 1] = diag + score(*oc, *ic);
            scratch.ix_curr[j + 1] =
                (scratch.m_prev[j + 1] + open).max(scratch.ix_prev[j + 1] + extend);
            scratch.iy_curr[j + 1] =
                (scratch.m_curr[j] + open).max(scratch.iy_curr[j] + extend);
        }
        std::mem::swap(&mut scratch.m_prev, &mut scratch.m_curr);
        std::mem::swap(&mut scratch.ix_prev, &mut scratch.ix_curr);
        std::mem::swap(&mut scratch.iy_prev, &mut scratch.iy_curr);
    }

    max3(scratch.m_prev[m], scratch.ix_prev[m], scratch.iy_prev[m])
}

fn sw_core<T: Copy>(
    outer: &[T],
    inner: &[T],
    score: impl Fn(T, T) -> i32,
    gap: GapModel,
    scratch: &mut Scratch,
) -> i32 {
    let (open, extend) = gap.open_extend();
    let m = inner.len();
    if m == 0 || outer.is_empty() {
        return 0;
    }

    resize_state_rows(scratch, m + 1);
    for j in 0..=m {
        scratch.m_prev[j] = 0;
        scratch.ix_prev[j] = NEG_INF;
        scratch.iy_prev[j] = NEG_INF;
    }

    // Single pass; the score-only variant needs no second sweep.
    let mut best = 0;
    for oc in outer.iter() {
        scratch.m_curr[0] = 0;
        scratch.ix_curr[0] = NEG_INF;
        scratch.iy_curr[0] = NEG_INF;
        for (j, ic) in inner.iter().enumerate() {
            let diag = max3(
                scratch.m_prev[j],
                scratch.ix_prev[j],
                scratch.iy_prev[j],
            );
            let cell = (diag + score(*oc, *ic)).max(0);
            scratch.m_curr[j + 1] = cell;
            scratch.ix_curr[j + 1] =
                (scratch.m_prev[j + 1] + open).max(scratch.ix_prev[j + 1] + extend);
            scratch.iy_curr[j + 1] =
                (scratch.m_curr[j] + open).max(scratch.iy_curr[j] + extend);
            best = best.max(cell);
        }
        std::mem::swap(&mut scratch.m_prev, &mut scratch.m_curr);
        std::mem::swap(&mut scratch.ix_prev, &mut scratch.ix_curr);
        std::mem::swap(&mut scratch.iy_prev, &mut scratch.iy_curr);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unary(matched: i8, mismatched: i8) -> SubstitutionModel {
        SubstitutionModel::unary(matched, mismatched)
    }

    #[test]
    fn nw_identical_sequences_zero_cost_matches() {
        let mut scratch = Scratch::new();
        let subs = unary(0, -1);
        let score = needleman_wunsch(
            b"ACGT",
            b"ACGT",
            &subs,
            GapModel::Linear(-2),
            &mut scratch,
        );
        assert_eq!(score, 0);
    }

    #[test]
    fn nw_empty_sides() {
        let mut scratch = Scratch::new();
        let subs = unary(0, -1);
        let gap = GapModel::Affine {
            open: -4,
            extend: -1,
        };
        assert_eq!(needleman_wunsch(b"", b"", &subs, gap, &mut scratch), 0);
        // One contiguous gap of length 3: -4 + 2 * -1.
        assert_eq!(needleman_wunsch(b"ACG", b"", &subs, gap, &mut scratch), -6);
        assert_eq!(needleman_wunsch(b"", b"ACG", &subs, gap, &mut scratch), -6);
    }

    #[test]
    fn nw_single_substitution_vs_gap_tradeoff() {
        let mut scratch = Scratch::new();
        let subs = unary(1, -1);
        // Mismatch (-1) beats open+close gaps (2 * -3) on "adc" vs "abc".
        let gap = GapModel::Linear(-3);
        let score = needleman_wunsch(b"abc", b"adc", &subs, gap, &mut scratch);
        assert_eq!(score, 1 + 1 - 1);
    }

    #[test]
    fn nw_prefers_one_long_gap_under_affine() {
        let mut scratch = Scratch::new();
        let subs = unary(1, -2);
        let affine = GapModel::Affine {
            open: -3,
            extend: -1,
        };
        // "AACCGG" vs "AAGG": best is 4 matches and one gap of length 2.
        let score = needleman_wunsch(b"AACCGG", b"AAGG", &subs, affine, &mut scratch);
        assert_eq!(score, 4 - 4);
    }

    #[test]
    fn nw_affine_degeneracy_matches_linear() {
        let mut scratch = Scratch::new();
        let subs = unary(2, -1);
        let pairs: [(&[u8], &[u8]); 4] = [
            (b"ACGTACGT", b"ACGT"),
            (b"GATTACA", b"GCATGCU"),
            (b"A", b""),
            (b"TTTT", b"TTTT"),
        ];
        for (a, b) in pairs {
            let linear = needleman_wunsch(a, b, &subs, GapModel::Linear(-2), &mut scratch);
            let affine = needleman_wunsch(
                a,
                b,
                &subs,
                GapModel::Affine {
                    open: -2,
                    extend: -2,
                },
                &mut scratch,
            );
            assert_eq!(linear, affine, "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn nw_opposite_gaps_cannot_replace_a_substitution() {
        let mut scratch = Scratch::new();
        // Mismatch (-5) costs more than a deletion plus an insertion
        // (2 * -2), but the gap states never chain through each other, so
        // the substitution path is the only alignment of "A" with "B".
        let subs = unary(0, -5);
        for gap in [
            GapModel::Linear(-2),
            GapModel::Affine {
                open: -2,
                extend: -2,
            },
        ] {
            assert_eq!(
                needleman_wunsch(b"A", b"B", &subs, gap, &mut scratch),
                -5,
                "{gap:?}"
            );
        }
        // Matched characters around the mismatch change nothing.
        assert_eq!(
            needleman_wunsch(b"CAC", b"CBC", &subs, GapModel::Linear(-2), &mut scratch),
            -5
        );
    }

    #[test]
    fn nw_transposition_invariant() {
        let mut scratch = Scratch::new();
        let subs = unary(1, -1);
        let gap = GapModel::Affine {
            open: -4,
            extend: -1,
        };
        let ab = needleman_wunsch(b"ACGTGTCA", b"ACCA", &subs, gap, &mut scratch);
        let ba = needleman_wunsch(b"ACCA", b"ACGTGTCA", &subs, gap, &mut scratch);
        assert_eq!(ab, ba);
    }

    #[test]
    fn sw_shared_substring_beats_global() {
        let mut scratch = Scratch::new();
        let subs = unary(2, -1);
        let gap = GapModel::Affine {
            open: -4,
            extend: -1,
        };
        let local = smith_waterman(b"ACGTACGT", b"TTACGTTT", &subs, gap, &mut scratch);
        let global = needleman_wunsch(b"ACGTACGT", b"TTACGTTT", &subs, gap, &mut scratch);
        // The shared "TACGT" run scores 10 locally.
        assert_eq!(local, 10);
        assert!(local > global);
    }

    #[test]
    fn sw_floors_at_zero() {
        let mut scratch = Scratch::new();
        let subs = unary(1, -2);
        let gap = GapModel::Linear(-2);
        // No common characters: empty local alignment wins.
        assert_eq!(smith_waterman(b"AAAA", b"TTTT", &subs, gap, &mut scratch), 0);
        assert_eq!(smith_waterman(b"", b"ACGT", &subs, gap, &mut scratch), 0);
    }

    #[test]
    fn sw_matrix_scoring() {
        let mut scratch = Scratch::new();
        let mat = SubstitutionModel::Matrix(crate::costs::SubstitutionMatrix::from_fn(|a, b| {
            if a == b {
                3
            } else {
                -3
            }
        }));
        // Classic textbook example: match +3 / mismatch -3 / gap -2 gives 13.
        let score = smith_waterman(b"GGTTGACTA", b"TGTTACGG", &mat, GapModel::Linear(-2), &mut scratch);
        assert_eq!(score, 13);
    }
}
