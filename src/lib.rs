//! Treescore: UAS/LAS evaluation for dependency parses
//!
//! A toolkit for scoring predicted dependency trees against gold-standard
//! CoNLL-U treebanks. The training/inference driver that produces the
//! predictions lives elsewhere; this crate owns the corpus data model,
//! the streaming reader/writer, the ignore-mask policy, and the metric
//! computation.

pub mod conllu; // CoNLL-U streaming reader and writer
pub mod error; // Crate-wide error taxonomy
pub mod eval; // Corpus-level UAS/LAS aggregation
pub mod mask; // Token ignore-mask policy (punctuation)
pub mod score; // Sentence-level attachment counts
pub mod sentence; // Token and sentence data model

// Re-exports for convenience
pub use conllu::{ConlluReader, read_file, write_file, write_sentences};
pub use error::{Error, Result};
pub use eval::{AttachmentScores, Evaluation, Metric, ScoreAccumulator, evaluate, evaluate_files};
pub use mask::{MaskPolicy, ignore_mask};
pub use score::{SentenceScore, score_sentence};
pub use sentence::{MISSING, Sentence, Token, TokenId};
