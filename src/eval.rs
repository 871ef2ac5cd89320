//! Corpus-level evaluation
//!
//! Folds sentence-level attachment counts across a gold corpus and a
//! system-output corpus into UAS/LAS. The two corpora are aligned by
//! position, not by content; any misalignment is a reported error.

use crate::conllu::ConlluReader;
use crate::error::{Error, Result};
use crate::mask::{MaskPolicy, ignore_mask};
use crate::score::{SentenceScore, score_sentence};
use crate::sentence::Sentence;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// F1-shaped accuracy for one attachment metric
///
/// Attachment scoring is an exact per-token match, so precision, recall,
/// and f1 coincide; all three are kept for downstream consumers that
/// expect an F1-shaped result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metric {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl Metric {
    fn exact_match(correct: usize, total: usize) -> Self {
        let value = correct as f64 / total as f64;
        Self {
            precision: value,
            recall: value,
            f1: value,
        }
    }
}

/// Final corpus-level attachment scores, ratios in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttachmentScores {
    pub uas: Metric,
    pub las: Metric,
    /// Tokens that survived the ignore-mask
    pub scored_tokens: usize,
    pub sentences: usize,
}

/// Running totals over one evaluation run
///
/// Mutated only by sequentially folding sentence scores, then finalized
/// once. The fold is a commutative sum, so per-sentence scores may be
/// computed in parallel as long as each sentence is added exactly once.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreAccumulator {
    total: SentenceScore,
    sentences: usize,
}

impl ScoreAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, score: SentenceScore) {
        self.total += score;
        self.sentences += 1;
    }

    /// Finalize into corpus-level scores
    ///
    /// A corpus with zero scored tokens has no defined ratio; that is the
    /// `NoScoredTokens` error, not a 0% score.
    pub fn finish(self) -> Result<AttachmentScores> {
        if self.total.scored == 0 {
            return Err(Error::NoScoredTokens);
        }
        Ok(AttachmentScores {
            uas: Metric::exact_match(self.total.unlabeled_correct, self.total.scored),
            las: Metric::exact_match(self.total.labeled_correct, self.total.scored),
            scored_tokens: self.total.scored,
            sentences: self.sentences,
        })
    }

    pub fn totals(&self) -> SentenceScore {
        self.total
    }
}

/// Evaluation result in the shape downstream consumers expect
///
/// `LAS` and `UAS` are percentages in [0, 100]; `raw` is a short
/// human-readable count summary.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    #[serde(rename = "LAS")]
    pub las: f64,
    #[serde(rename = "UAS")]
    pub uas: f64,
    pub raw: String,
}

impl From<AttachmentScores> for Evaluation {
    fn from(scores: AttachmentScores) -> Self {
        Self {
            las: scores.las.f1 * 100.0,
            uas: scores.uas.f1 * 100.0,
            raw: format!(
                "{} sentences, {} scored tokens",
                scores.sentences, scores.scored_tokens
            ),
        }
    }
}

/// Evaluate a system-output sentence stream against a gold stream
///
/// Streams are consumed once, in lockstep; sentence pairs are matched by
/// position. The ignore-mask is computed from the gold tag sequence.
pub fn evaluate<G, S>(gold: G, system: S, policy: MaskPolicy) -> Result<AttachmentScores>
where
    G: IntoIterator<Item = Result<Sentence>>,
    S: IntoIterator<Item = Result<Sentence>>,
{
    let mut gold = gold.into_iter();
    let mut system = system.into_iter();
    let mut accumulator = ScoreAccumulator::new();
    let mut index = 0;

    loop {
        match (gold.next(), system.next()) {
            (None, None) => break,
            (Some(g), Some(s)) => {
                let g = g?;
                let s = s?;
                index += 1;
                if g.len() != s.len() {
                    return Err(Error::TokenCountMismatch {
                        index,
                        gold: g.len(),
                        system: s.len(),
                    });
                }
                let mask = ignore_mask(&g.upos_tags(), policy);
                let score =
                    score_sentence(&s.heads(), &s.deprels(), &g.heads(), &g.deprels(), &mask)?;
                debug!(
                    sentence = index,
                    scored = score.scored,
                    unlabeled_correct = score.unlabeled_correct,
                    labeled_correct = score.labeled_correct,
                    "scored sentence"
                );
                accumulator.add(score);
            }
            (Some(_), None) => {
                return Err(Error::SentenceCountMismatch {
                    gold: index + 1 + gold.count(),
                    system: index,
                });
            }
            (None, Some(_)) => {
                return Err(Error::SentenceCountMismatch {
                    gold: index,
                    system: index + 1 + system.count(),
                });
            }
        }
    }

    accumulator.finish()
}

/// Evaluate a system-output corpus file against a gold corpus file
pub fn evaluate_files(
    gold_path: impl AsRef<Path>,
    system_path: impl AsRef<Path>,
    policy: MaskPolicy,
) -> Result<Evaluation> {
    let gold = ConlluReader::from_file(gold_path.as_ref())?;
    let system = ConlluReader::from_file(system_path.as_ref())?;

    let scores = evaluate(gold, system, policy)?;
    info!(
        uas = scores.uas.f1 * 100.0,
        las = scores.las.f1 * 100.0,
        sentences = scores.sentences,
        scored_tokens = scores.scored_tokens,
        "evaluation complete"
    );
    Ok(scores.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLD: &str = "1\tdogs\tdog\tNOUN\tNNS\t_\t2\tnsubj\t_\t_\n\
        2\tsleep\tsleep\tVERB\tVBP\t_\t0\troot\t_\t_\n\
        3\t.\t.\tPUNCT\t.\t_\t2\tpunct\t_\t_\n\
        \n";

    // Same labels, but the final arc attaches to token 3 instead of 2.
    const SYSTEM: &str = "1\tdogs\tdog\tNOUN\tNNS\t_\t2\tnsubj\t_\t_\n\
        2\tsleep\tsleep\tVERB\tVBP\t_\t0\troot\t_\t_\n\
        3\t.\t.\tPUNCT\t.\t_\t3\tpunct\t_\t_\n\
        \n";

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_punct_masked_example() {
        let scores = evaluate(
            ConlluReader::from_str(GOLD),
            ConlluReader::from_str(SYSTEM),
            MaskPolicy::IgnorePunct,
        )
        .unwrap();

        assert_eq!(scores.scored_tokens, 2);
        assert_close(scores.uas.f1, 1.0);
        assert_close(scores.las.f1, 1.0);
        assert_close(scores.uas.precision, scores.uas.recall);
    }

    #[test]
    fn test_unmasked_example() {
        let scores = evaluate(
            ConlluReader::from_str(GOLD),
            ConlluReader::from_str(SYSTEM),
            MaskPolicy::KeepAll,
        )
        .unwrap();

        assert_eq!(scores.scored_tokens, 3);
        assert_close(scores.uas.f1, 2.0 / 3.0);
        assert_close(scores.las.f1, 2.0 / 3.0);

        let result: Evaluation = scores.into();
        assert_close(result.uas, 200.0 / 3.0);
        assert_close(result.las, 200.0 / 3.0);
    }

    #[test]
    fn test_perfect_self_evaluation() {
        let result = evaluate(
            ConlluReader::from_str(GOLD),
            ConlluReader::from_str(GOLD),
            MaskPolicy::KeepAll,
        )
        .unwrap();
        assert_close(result.uas.f1, 1.0);
        assert_close(result.las.f1, 1.0);
    }

    #[test]
    fn test_corpus_totals_are_sums() {
        let two = format!("{}{}", GOLD, GOLD);
        let two_sys = format!("{}{}", SYSTEM, SYSTEM);

        let single = evaluate(
            ConlluReader::from_str(GOLD),
            ConlluReader::from_str(SYSTEM),
            MaskPolicy::KeepAll,
        )
        .unwrap();
        let double = evaluate(
            ConlluReader::from_str(&two),
            ConlluReader::from_str(&two_sys),
            MaskPolicy::KeepAll,
        )
        .unwrap();

        assert_eq!(double.scored_tokens, 2 * single.scored_tokens);
        assert_eq!(double.sentences, 2 * single.sentences);
        assert_close(double.uas.f1, single.uas.f1);
    }

    #[test]
    fn test_accumulator_fold() {
        let mut acc = ScoreAccumulator::new();
        acc.add(SentenceScore {
            unlabeled_correct: 2,
            labeled_correct: 1,
            scored: 3,
        });
        acc.add(SentenceScore::default()); // fully masked sentence still counts
        assert_eq!(acc.totals().scored, 3);

        let scores = acc.finish().unwrap();
        assert_eq!(scores.sentences, 2);
        assert_close(scores.uas.f1, 2.0 / 3.0);
        assert_close(scores.las.f1, 1.0 / 3.0);
    }

    #[test]
    fn test_sentence_count_mismatch() {
        let two = format!("{}{}", GOLD, GOLD);
        let err = evaluate(
            ConlluReader::from_str(&two),
            ConlluReader::from_str(SYSTEM),
            MaskPolicy::KeepAll,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::SentenceCountMismatch { gold: 2, system: 1 }
        ));

        let err = evaluate(
            ConlluReader::from_str(GOLD),
            ConlluReader::from_str(&two),
            MaskPolicy::KeepAll,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::SentenceCountMismatch { gold: 1, system: 2 }
        ));
    }

    #[test]
    fn test_token_count_mismatch() {
        let short = "1\tdogs\tdog\tNOUN\tNNS\t_\t2\tnsubj\t_\t_\n\
            2\tsleep\tsleep\tVERB\tVBP\t_\t0\troot\t_\t_\n\
            \n";
        let err = evaluate(
            ConlluReader::from_str(GOLD),
            ConlluReader::from_str(short),
            MaskPolicy::KeepAll,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::TokenCountMismatch {
                index: 1,
                gold: 3,
                system: 2
            }
        ));
    }

    #[test]
    fn test_empty_corpus_is_an_error() {
        let err = evaluate(
            ConlluReader::from_str(""),
            ConlluReader::from_str(""),
            MaskPolicy::KeepAll,
        )
        .unwrap_err();
        assert!(matches!(err, Error::NoScoredTokens));
    }

    #[test]
    fn test_fully_masked_corpus_is_an_error() {
        let punct_only = "1\t.\t.\tPUNCT\t.\t_\t0\troot\t_\t_\n\n";
        let err = evaluate(
            ConlluReader::from_str(punct_only),
            ConlluReader::from_str(punct_only),
            MaskPolicy::IgnorePunct,
        )
        .unwrap_err();
        assert!(matches!(err, Error::NoScoredTokens));
    }

    #[test]
    fn test_result_shape() {
        let scores = evaluate(
            ConlluReader::from_str(GOLD),
            ConlluReader::from_str(GOLD),
            MaskPolicy::IgnorePunct,
        )
        .unwrap();
        let result: Evaluation = scores.into();
        let json = serde_json::to_value(&result).unwrap();

        assert_close(json["LAS"].as_f64().unwrap(), 100.0);
        assert_close(json["UAS"].as_f64().unwrap(), 100.0);
        assert!(json["raw"].is_string());
    }

    #[test]
    fn test_evaluate_files() {
        let dir = tempfile::tempdir().unwrap();
        let gold_path = dir.path().join("gold.conllu");
        let sys_path = dir.path().join("system.conllu");
        std::fs::write(&gold_path, GOLD).unwrap();
        std::fs::write(&sys_path, SYSTEM).unwrap();

        let result = evaluate_files(&gold_path, &sys_path, MaskPolicy::IgnorePunct).unwrap();
        assert_close(result.uas, 100.0);
        assert_close(result.las, 100.0);
    }
}
