//! Sentence and token data structures
//!
//! A sentence is an ordered sequence of tokens with a synthetic root token
//! (id 0) prepended. Sentences are built once from a parsed token table and
//! are read-only afterwards.

/// Sentinel string for absent CoNLL-U field values
pub const MISSING: &str = "_";

/// 1-based token position within a sentence; 0 is reserved for the root
pub type TokenId = usize;

/// A single token with the ten CoNLL-U fields
///
/// All string fields hold the raw field value; absent values hold the `_`
/// sentinel. `deps` and `misc` are pass-through annotations, never
/// interpreted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub id: TokenId,
    pub form: String,
    pub lemma: String,
    pub upos: String,
    pub xpos: String,
    pub feats: String,
    /// Id of the governing token; 0 attaches to the root
    pub head: TokenId,
    pub deprel: String,
    pub deps: String,
    pub misc: String,
}

impl Token {
    /// Create a token with the given core attributes; the pass-through
    /// fields default to the `_` sentinel.
    pub fn new(id: TokenId, form: &str, lemma: &str, upos: &str, head: TokenId, deprel: &str) -> Self {
        Self {
            id,
            form: form.to_string(),
            lemma: lemma.to_string(),
            upos: upos.to_string(),
            xpos: MISSING.to_string(),
            feats: MISSING.to_string(),
            head,
            deprel: deprel.to_string(),
            deps: MISSING.to_string(),
            misc: MISSING.to_string(),
        }
    }

    /// The fixed synthetic root token (id 0)
    pub fn root() -> Self {
        Self {
            id: 0,
            form: "<ROOT>".to_string(),
            lemma: "<ROOT>".to_string(),
            upos: "ROOT".to_string(),
            xpos: "ROOT".to_string(),
            feats: MISSING.to_string(),
            head: 0,
            deprel: "root".to_string(),
            deps: MISSING.to_string(),
            misc: MISSING.to_string(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.id == 0
    }
}

/// A dependency-annotated sentence
///
/// `tokens[0]` is always the synthetic root; real tokens follow in surface
/// order with ids starting at 1. Treeness (acyclicity, connectivity) is not
/// validated; malformed head assignments pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    tokens: Vec<Token>,
}

impl Sentence {
    /// Build a sentence from the real tokens of one parse unit, prepending
    /// the root. Returns `None` when `real_tokens` is empty: a sentence that
    /// reduced to the root alone is discarded rather than propagated.
    pub fn from_tokens(real_tokens: Vec<Token>) -> Option<Self> {
        if real_tokens.is_empty() {
            return None;
        }
        let mut tokens = Vec::with_capacity(real_tokens.len() + 1);
        tokens.push(Token::root());
        tokens.extend(real_tokens);
        Some(Self { tokens })
    }

    /// Number of real tokens (root excluded)
    pub fn len(&self) -> usize {
        self.tokens.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All tokens, root first
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Real tokens in surface order, root excluded
    pub fn words(&self) -> &[Token] {
        &self.tokens[1..]
    }

    /// Get a token by its id (0 = root)
    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id)
    }

    /// Head ids of the real tokens, aligned with `words()`
    pub fn heads(&self) -> Vec<TokenId> {
        self.words().iter().map(|t| t.head).collect()
    }

    /// Relation labels of the real tokens, aligned with `words()`
    pub fn deprels(&self) -> Vec<&str> {
        self.words().iter().map(|t| t.deprel.as_str()).collect()
    }

    /// Coarse part-of-speech tags of the real tokens, aligned with `words()`
    pub fn upos_tags(&self) -> Vec<&str> {
        self.words().iter().map(|t| t.upos.as_str()).collect()
    }
}
