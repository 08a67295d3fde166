//! Hamming distance over the overlapping prefix.
//!
//! Convention: only the first `min(len(a), len(b))` positions are compared;
//! the length difference is *not* counted as mismatches. Callers that want
//! to penalize the tail can add `len(a).abs_diff(len(b))` themselves. This
//! convention is uniform across all backends.
//!
//! The byte kernel takes a word-parallel fast path: eight bytes are compared
//! per 64-bit word and the differing-byte count is extracted with a popcount.
//! It is bit-identical to the byte loop and needs no allocation.

use super::BoundedDistance;

const HIGH_BITS: u64 = 0x8080_8080_8080_8080;
const LOW_SEVEN: u64 = 0x7f7f_7f7f_7f7f_7f7f;

/// Count of nonzero bytes in `x`: a byte lane with any bit set carries into
/// (or already holds) its high bit after the add-or below.
#[inline(always)]
fn nonzero_bytes(x: u64) -> usize {
    let high = ((x & LOW_SEVEN).wrapping_add(LOW_SEVEN) | x) & HIGH_BITS;
    high.count_ones() as usize
}

/// Byte Hamming distance over the overlapping prefix. O(min(n, m)) time,
/// no allocation.
pub fn hamming(a: &[u8], b: &[u8]) -> usize {
    let len = a.len().min(b.len());
    let (a, b) = (&a[..len], &b[..len]);

    let mut distance = 0;
    let mut chunks_a = a.chunks_exact(8);
    let mut chunks_b = b.chunks_exact(8);
    for (ca, cb) in chunks_a.by_ref().zip(chunks_b.by_ref()) {
        let wa = u64::from_le_bytes(ca.try_into().expect("chunk is 8 bytes"));
        let wb = u64::from_le_bytes(cb.try_into().expect("chunk is 8 bytes"));
        distance += nonzero_bytes(wa ^ wb);
    }
    distance
        + chunks_a
            .remainder()
            .iter()
            .zip(chunks_b.remainder())
            .filter(|(x, y)| x != y)
            .count()
}

/// Bounded byte Hamming distance. Returns the exact distance when it is
/// `<= bound` (inclusive), otherwise [`BoundedDistance::Exceeded`] as soon
/// as the running count proves it.
pub fn hamming_bounded(a: &[u8], b: &[u8], bound: usize) -> BoundedDistance {
    let len = a.len().min(b.len());
    let mut distance = 0;
    let mut i = 0;
    // Word steps while the budget allows; the final words fall back to the
    // byte loop so the early exit stays exact.
    while i + 8 <= len && distance + 8 <= bound {
        let wa = u64::from_le_bytes(a[i..i + 8].try_into().expect("8-byte window"));
        let wb = u64::from_le_bytes(b[i..i + 8].try_into().expect("8-byte window"));
        distance += nonzero_bytes(wa ^ wb);
        i += 8;
    }
    for (x, y) in a[i..len].iter().zip(&b[i..len]) {
        distance += usize::from(x != y);
        if distance > bound {
            return BoundedDistance::Exceeded;
        }
    }
    if distance > bound {
        BoundedDistance::Exceeded
    } else {
        BoundedDistance::Within(distance)
    }
}

/// Hamming distance over arbitrary comparable elements; the UTF-8 adapter
/// runs this over decoded code points.
pub fn hamming_of<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.iter().zip(b.iter()).filter(|(x, y)| x != y).count()
}

/// Bounded variant of [`hamming_of`].
pub fn hamming_of_bounded<T: PartialEq>(a: &[T], b: &[T], bound: usize) -> BoundedDistance {
    let mut distance = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        distance += usize::from(x != y);
        if distance > bound {
            return BoundedDistance::Exceeded;
        }
    }
    BoundedDistance::Within(distance)
}
