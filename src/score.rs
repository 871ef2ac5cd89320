//! Sentence-level attachment scoring
//!
//! Compares predicted arcs and labels against gold, position by position,
//! under an ignore-mask. A label only counts as correct when its arc is
//! also correct, so `labeled_correct <= unlabeled_correct` always holds.

use crate::error::{Error, Result};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Per-sentence attachment counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SentenceScore {
    /// Positions where the predicted arc matches gold
    pub unlabeled_correct: usize,
    /// Positions where both the arc and the label match gold
    pub labeled_correct: usize,
    /// Positions not excluded by the mask
    pub scored: usize,
}

impl Add for SentenceScore {
    type Output = SentenceScore;

    fn add(self, rhs: SentenceScore) -> SentenceScore {
        SentenceScore {
            unlabeled_correct: self.unlabeled_correct + rhs.unlabeled_correct,
            labeled_correct: self.labeled_correct + rhs.labeled_correct,
            scored: self.scored + rhs.scored,
        }
    }
}

impl AddAssign for SentenceScore {
    fn add_assign(&mut self, rhs: SentenceScore) {
        *self = *self + rhs;
    }
}

impl Sum for SentenceScore {
    fn sum<I: Iterator<Item = SentenceScore>>(iter: I) -> SentenceScore {
        iter.fold(SentenceScore::default(), Add::add)
    }
}

/// Score one sentence's predictions against gold
///
/// All five sequences carry one entry per real token (root excluded) and
/// must have equal length. Inputs are never mutated. A sentence whose
/// tokens are all masked contributes `(0, 0, 0)` rather than an error.
///
/// Arc and label types only need equality, so callers may pass the
/// model driver's integer ids or the corpus reader's label strings.
pub fn score_sentence<A, L>(
    pred_arcs: &[A],
    pred_labels: &[L],
    gold_arcs: &[A],
    gold_labels: &[L],
    mask: &[bool],
) -> Result<SentenceScore>
where
    A: PartialEq,
    L: PartialEq,
{
    let n = gold_arcs.len();
    for found in [pred_arcs.len(), pred_labels.len(), gold_labels.len(), mask.len()] {
        if found != n {
            return Err(Error::LengthMismatch { expected: n, found });
        }
    }

    let mut score = SentenceScore::default();
    for i in 0..n {
        if mask[i] {
            continue;
        }
        score.scored += 1;
        if pred_arcs[i] == gold_arcs[i] {
            score.unlabeled_correct += 1;
            if pred_labels[i] == gold_labels[i] {
                score.labeled_correct += 1;
            }
        }
    }
    Ok(score)
}
