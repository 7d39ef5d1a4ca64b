//! Core data types: dependency-annotated tokens and sentences.
//!
//! A [`Token`] mirrors one row of a CoNLL-U annotation; a [`Sentence`] is the
//! ordered token list plus its comment metadata. All metric computation
//! treats tokens whose `upos` is `PUNCT`, `SYM`, or `_` as uncounted: they
//! keep their place in the tree but never enter counts, chains, or spans.

use serde::{Deserialize, Serialize};

/// One dependency-annotated token.
///
/// `id` is the token's 1-based position within its sentence; `head` is the id
/// of the governing token, with `0` marking the sentence root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: usize,
    pub form: String,
    #[serde(default)]
    pub lemma: String,
    pub upos: String,
    #[serde(default)]
    pub xpos: Option<String>,
    #[serde(default)]
    pub feats: Option<String>,
    pub head: usize,
    pub deprel: String,
    #[serde(default)]
    pub deps: Option<String>,
    #[serde(default)]
    pub misc: Option<String>,
}

impl Token {
    /// Create a token from the fields the metrics actually read; the lemma
    /// defaults to the surface form and the remaining CoNLL-U columns stay
    /// empty.
    pub fn new(
        id: usize,
        form: impl Into<String>,
        upos: impl Into<String>,
        head: usize,
        deprel: impl Into<String>,
    ) -> Self {
        let form = form.into();
        Self {
            id,
            lemma: form.clone(),
            form,
            upos: upos.into(),
            xpos: None,
            feats: None,
            head,
            deprel: deprel.into(),
            deps: None,
            misc: None,
        }
    }

    /// Replace the default lemma.
    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = lemma.into();
        self
    }

    /// Whether this token counts as a word. Punctuation, symbols, and
    /// tokens with an unset tag keep their tree position but are excluded
    /// from every count, chain, and span.
    pub fn is_word(&self) -> bool {
        !matches!(self.upos.as_str(), "PUNCT" | "SYM" | "_")
    }

    /// Whether this token is the sentence root (`head = 0`).
    pub fn is_root(&self) -> bool {
        self.head == 0
    }
}

/// An ordered sequence of tokens plus the sentence-level metadata carried by
/// CoNLL-U comment lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub tokens: Vec<Token>,
    /// `# sent_id = ...` metadata, when present.
    #[serde(default)]
    pub sent_id: Option<String>,
    /// `# text = ...` metadata, when present.
    #[serde(default)]
    pub text: Option<String>,
}

impl Sentence {
    /// Create a sentence from bare tokens, with no metadata.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            sent_id: None,
            text: None,
        }
    }

    /// Number of countable (non-punctuation) tokens.
    pub fn word_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_word()).count()
    }

    /// The sentence's surface text: the `# text` metadata when present,
    /// otherwise the space-joined token forms.
    pub fn surface_text(&self) -> String {
        match &self.text {
            Some(text) => text.clone(),
            None => self
                .tokens
                .iter()
                .map(|t| t.form.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}
