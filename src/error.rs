//! Error types for parsing and evaluation

use thiserror::Error;

/// Errors produced while reading CoNLL-U data or scoring parses.
#[derive(Debug, Error)]
pub enum Error {
    /// The corpus file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A token line did not follow the CoNLL-U format.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Prediction sequences handed to the scorer disagree in length.
    #[error("sequence length mismatch: expected {expected} entries, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// Gold and system corpora contain different numbers of sentences.
    #[error("corpora are not aligned: gold has {gold} sentences, system has {system}")]
    SentenceCountMismatch { gold: usize, system: usize },

    /// A gold/system sentence pair contains different numbers of tokens.
    #[error(
        "sentence {index} is not aligned: gold has {gold} tokens, system has {system}"
    )]
    TokenCountMismatch {
        index: usize,
        gold: usize,
        system: usize,
    },

    /// Every token in the corpus was masked out, so no ratio is defined.
    /// Distinct from a legitimate score of zero.
    #[error("no scored tokens in corpus")]
    NoScoredTokens,
}

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result type alias for treescore operations.
pub type Result<T> = std::result::Result<T, Error>;
