//! UTF-8 adapter: runs the distance kernels over decoded Unicode scalar
//! values instead of raw bytes.
//!
//! Decoding is strict. Malformed UTF-8 surfaces as
//! [`PairError::InvalidUtf8`] with the offending side and the length of the
//! valid prefix; it is never coerced or replaced. The adapter changes units
//! only: the same generic DP kernels run over `u32` code points.

use crate::error::PairError;
use crate::kernels::{hamming, levenshtein, BoundedDistance, Scratch};

pub(crate) fn decode_into(
    bytes: &[u8],
    out: &mut Vec<u32>,
    pair: usize,
    which: &'static str,
) -> Result<(), PairError> {
    out.clear();
    let text = std::str::from_utf8(bytes).map_err(|e| PairError::InvalidUtf8 {
        pair,
        which,
        valid_up_to: e.valid_up_to(),
    })?;
    out.extend(text.chars().map(u32::from));
    Ok(())
}

/// Decode both sides into the scratch rune buffers and run `f` over them.
/// The buffers are taken out of the scratch for the duration of `f` so the
/// kernel can still borrow the DP rows mutably.
pub(crate) fn with_decoded<R>(
    a: &[u8],
    b: &[u8],
    pair: usize,
    scratch: &mut Scratch,
    f: impl FnOnce(&[u32], &[u32], &mut Scratch) -> R,
) -> Result<R, PairError> {
    let mut left = std::mem::take(&mut scratch.left_runes);
    let mut right = std::mem::take(&mut scratch.right_runes);
    let result = decode_into(a, &mut left, pair, "left")
        .and_then(|()| decode_into(b, &mut right, pair, "right"))
        .map(|()| f(&left, &right, scratch));
    scratch.left_runes = left;
    scratch.right_runes = right;
    result
}

/// Hamming distance over code points of the overlapping prefix.
pub fn hamming_utf8(a: &[u8], b: &[u8], scratch: &mut Scratch) -> Result<usize, PairError> {
    with_decoded(a, b, 0, scratch, |l, r, _| hamming::hamming_of(l, r))
}

/// Bounded Hamming distance over code points (inclusive bound).
pub fn hamming_utf8_bounded(
    a: &[u8],
    b: &[u8],
    bound: usize,
    scratch: &mut Scratch,
) -> Result<BoundedDistance, PairError> {
    with_decoded(a, b, 0, scratch, |l, r, _| {
        hamming::hamming_of_bounded(l, r, bound)
    })
}

/// Levenshtein distance over code points.
pub fn levenshtein_utf8(a: &[u8], b: &[u8], scratch: &mut Scratch) -> Result<usize, PairError> {
    with_decoded(a, b, 0, scratch, |l, r, s| levenshtein::distance_of(l, r, s))
}

/// Bounded Levenshtein distance over code points (inclusive bound).
pub fn levenshtein_utf8_bounded(
    a: &[u8],
    b: &[u8],
    bound: usize,
    scratch: &mut Scratch,
) -> Result<BoundedDistance, PairError> {
    with_decoded(a, b, 0, scratch, |l, r, s| {
        levenshtein::distance_of_bounded(l, r, bound, s)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_point_units_not_bytes() {
        let mut scratch = Scratch::new();
        // "é" is two bytes but one code point.
        let byte_distance = levenshtein::levenshtein("héllo".as_bytes(), b"hello");
        let rune_distance =
            levenshtein_utf8("héllo".as_bytes(), b"hello", &mut scratch).unwrap();
        assert_eq!(byte_distance, 2);
        assert_eq!(rune_distance, 1);
    }

    #[test]
    fn hamming_over_runes() {
        let mut scratch = Scratch::new();
        let a = "καλημέρα".as_bytes();
        let b = "καλησπέρα".as_bytes();
        // Prefix-only convention over decoded code points.
        let d = hamming_utf8(a, b, &mut scratch).unwrap();
        assert_eq!(d, hamming::hamming_of(
            &"καλημέρα".chars().map(u32::from).collect::<Vec<_>>(),
            &"καλησπέρα".chars().map(u32::from).collect::<Vec<_>>(),
        ));
    }

    #[test]
    fn malformed_utf8_is_an_error() {
        let mut scratch = Scratch::new();
        let bad = [0x61, 0x62, 0xFF, 0x63];
        let err = levenshtein_utf8(&bad, b"abc", &mut scratch).unwrap_err();
        match err {
            PairError::InvalidUtf8 {
                which, valid_up_to, ..
            } => {
                assert_eq!(which, "left");
                assert_eq!(valid_up_to, 2);
            }
        }
        let err = levenshtein_utf8(b"abc", &bad, &mut scratch).unwrap_err();
        assert!(matches!(err, PairError::InvalidUtf8 { which: "right", .. }));
    }

    #[test]
    fn bounded_utf8_monotonicity() {
        let mut scratch = Scratch::new();
        let a = "grüße".as_bytes();
        let b = "gruesse".as_bytes();
        let d = levenshtein_utf8(a, b, &mut scratch).unwrap();
        assert_eq!(
            levenshtein_utf8_bounded(a, b, d, &mut scratch).unwrap(),
            BoundedDistance::Within(d)
        );
        assert_eq!(
            levenshtein_utf8_bounded(a, b, d - 1, &mut scratch).unwrap(),
            BoundedDistance::Exceeded
        );
    }
}
