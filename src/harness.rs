//! Backend equivalence harness.
//!
//! Testing- and benchmark-time only: drives the same batch through a
//! baseline engine and a candidate engine and checks elementwise equality
//! of the outputs. On failure it reports the first mismatching index, both
//! input strings, and both computed values. Every accelerated backend must
//! pass this against the scalar baseline, for every cost-model and gap-model
//! combination, before it is benchmarked or shipped. Not part of the
//! production call path.

use thiserror::Error;

use crate::batch::{AlignTask, BatchEngine};
use crate::error::BatchError;

/// First point of divergence between two backends on one batch.
#[derive(Debug)]
pub struct Mismatch {
    pub index: usize,
    pub left: Vec<u8>,
    pub right: Vec<u8>,
    pub baseline: i64,
    pub candidate: i64,
}

impl std::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "backend mismatch at pair {}: baseline={} candidate={}",
            self.index, self.baseline, self.candidate
        )?;
        writeln!(f, "  left  ({} bytes): {:?}", self.left.len(), String::from_utf8_lossy(&self.left))?;
        write!(f, "  right ({} bytes): {:?}", self.right.len(), String::from_utf8_lossy(&self.right))
    }
}

#[derive(Debug, Error)]
pub enum HarnessError {
    /// One of the engines failed the batch outright.
    #[error(transparent)]
    Batch(#[from] BatchError),
    /// The engines disagree on at least one pair.
    #[error("{0}")]
    Mismatch(Box<Mismatch>),
}

/// Run `task` over the batch on both engines and verify elementwise
/// equality. Batch-level errors must agree too: if the baseline rejects the
/// batch, the candidate must reject it the same way.
pub fn check_equivalence(
    baseline: &BatchEngine,
    candidate: &BatchEngine,
    task: AlignTask<'_>,
    left: &[&[u8]],
    right: &[&[u8]],
) -> Result<(), HarnessError> {
    let mut expected = vec![0i64; left.len()];
    let mut actual = vec![0i64; left.len()];

    let base_report = baseline.run(task, left, right, &mut expected);
    let cand_report = candidate.run(task, left, right, &mut actual);
    match (base_report, cand_report) {
        (Ok(base), Ok(cand)) => {
            for (i, (&e, &a)) in expected.iter().zip(&actual).enumerate() {
                if e != a {
                    return Err(HarnessError::Mismatch(Box::new(Mismatch {
                        index: i,
                        left: left[i].to_vec(),
                        right: right[i].to_vec(),
                        baseline: e,
                        candidate: a,
                    })));
                }
            }
            debug_assert_eq!(base.checksum, cand.checksum);
            Ok(())
        }
        (Err(e), _) => Err(e.into()),
        (_, Err(e)) => Err(e.into()),
    }
}

/// Panicking wrapper for test code.
pub fn assert_equivalent(
    baseline: &BatchEngine,
    candidate: &BatchEngine,
    task: AlignTask<'_>,
    left: &[&[u8]],
    right: &[&[u8]],
) {
    if let Err(err) = check_equivalence(baseline, candidate, task, left, right) {
        panic!("{err}");
    }
}
