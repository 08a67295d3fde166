//! Levenshtein (edit) distance, two-row Wagner-Fischer.
//!
//! The rolling rows are sized by the shorter sequence, the common prefix and
//! suffix are trimmed before the DP (neither affects the distance), and the
//! caller supplies the scratch rows so batch execution reuses memory across
//! pairs. The bounded variant exits as soon as the minimum value in the
//! current row proves the final distance must exceed the bound; whenever the
//! true distance is within the bound it agrees exactly with the unbounded
//! kernel.

use super::{BoundedDistance, Scratch};

/// Drop the shared prefix and suffix; the edit distance of the remainder
/// equals the edit distance of the originals.
fn trim<'s, T: Eq>(a: &'s [T], b: &'s [T]) -> (&'s [T], &'s [T]) {
    let prefix = a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count();
    let (a, b) = (&a[prefix..], &b[prefix..]);
    let suffix = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    (&a[..a.len() - suffix], &b[..b.len() - suffix])
}

/// Edit distance over arbitrary comparable elements (bytes, code points).
/// O(n*m) time, O(min(n, m)) scratch.
pub fn distance_of<T: Eq>(a: &[T], b: &[T], scratch: &mut Scratch) -> usize {
    let (a, b) = trim(a, b);
    let (longer, shorter) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if shorter.is_empty() {
        return longer.len();
    }

    let width = shorter.len() + 1;
    let (mut prev, mut curr) = scratch.distance_rows(width);
    for (j, slot) in prev.iter_mut().enumerate() {
        *slot = j;
    }

    for (i, lc) in longer.iter().enumerate() {
        curr[0] = i + 1;
        for (j, sc) in shorter.iter().enumerate() {
            let substitution = prev[j] + usize::from(lc != sc);
            let deletion = prev[j + 1];
            let insertion = curr[j];
            curr[j + 1] = substitution.min(deletion.min(insertion) + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[shorter.len()]
}

/// Bounded edit distance. The bound is inclusive: `Within(d)` iff `d <= bound`.
///
/// Two early exits, both exact:
/// - the length difference alone already exceeds the bound;
/// - every entry of the current DP row exceeds the bound (row values never
///   decrease toward the final cell, so the final distance must too).
pub fn distance_of_bounded<T: Eq>(
    a: &[T],
    b: &[T],
    bound: usize,
    scratch: &mut Scratch,
) -> BoundedDistance {
    let (a, b) = trim(a, b);
    let (longer, shorter) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if longer.len() - shorter.len() > bound {
        return BoundedDistance::Exceeded;
    }
    if shorter.is_empty() {
        // Within the bound per the length check above.
        return BoundedDistance::Within(longer.len());
    }

    let width = shorter.len() + 1;
    let (mut prev, mut curr) = scratch.distance_rows(width);
    for (j, slot) in prev.iter_mut().enumerate() {
        *slot = j;
    }

    for (i, lc) in longer.iter().enumerate() {
        curr[0] = i + 1;
        let mut row_min = curr[0];
        for (j, sc) in shorter.iter().enumerate() {
            let substitution = prev[j] + usize::from(lc != sc);
            let deletion = prev[j + 1];
            let insertion = curr[j];
            let cell = substitution.min(deletion.min(insertion) + 1);
            curr[j + 1] = cell;
            row_min = row_min.min(cell);
        }
        if row_min > bound {
            return BoundedDistance::Exceeded;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let distance = prev[shorter.len()];
    if distance > bound {
        BoundedDistance::Exceeded
    } else {
        BoundedDistance::Within(distance)
    }
}

/// Byte edit distance with caller-supplied scratch.
#[inline]
pub fn levenshtein_with(a: &[u8], b: &[u8], scratch: &mut Scratch) -> usize {
    distance_of(a, b, scratch)
}

/// Byte edit distance, self-contained. Batch callers should prefer
/// [`levenshtein_with`] with a reused [`Scratch`].
pub fn levenshtein(a: &[u8], b: &[u8]) -> usize {
    distance_of(a, b, &mut Scratch::new())
}

/// Bounded byte edit distance with caller-supplied scratch.
#[inline]
pub fn levenshtein_bounded(
    a: &[u8],
    b: &[u8],
    bound: usize,
    scratch: &mut Scratch,
) -> BoundedDistance {
    distance_of_bounded(a, b, bound, scratch)
}
