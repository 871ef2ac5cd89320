//! Ignore-mask policy for scoring
//!
//! Dependency parsing convention excludes punctuation from UAS/LAS:
//! punctuation attachment is linguistically underspecified and inflates
//! apparent accuracy. The mask is a pure function of the token tags and the
//! policy flag; `true` marks a token as excluded from scoring.

use rustc_hash::FxHashSet;
use std::sync::LazyLock;

/// Tags treated as punctuation: the UD coarse tag plus the PTB
/// punctuation xpos tags.
static PUNCT_TAGS: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    ["PUNCT", "``", "''", ",", ".", ":"].into_iter().collect()
});

/// Which tokens are excluded from scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskPolicy {
    /// Score every token
    KeepAll,
    /// Exclude punctuation tokens
    #[default]
    IgnorePunct,
}

impl MaskPolicy {
    /// Whether a token with this tag is excluded from scoring
    pub fn is_ignored(&self, tag: &str) -> bool {
        match self {
            MaskPolicy::KeepAll => false,
            MaskPolicy::IgnorePunct => PUNCT_TAGS.contains(tag),
        }
    }
}

/// Compute the ignore-mask for one sentence
///
/// `tags` holds one part-of-speech tag per real token (root excluded);
/// the result is aligned 1:1 with it.
pub fn ignore_mask<S: AsRef<str>>(tags: &[S], policy: MaskPolicy) -> Vec<bool> {
    tags.iter()
        .map(|tag| policy.is_ignored(tag.as_ref()))
        .collect()
}
