//! Crate-wide error type and result alias.
//!
//! Every fallible operation in the crate returns [`Result`]. Fatal analysis
//! conditions (malformed annotations, broken trees, empty corpora, stale
//! clause vocabulary) are distinct variants so callers can tell which check
//! rejected the input.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// All errors produced while reading annotations or computing metrics.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A CoNLL-U line could not be parsed.
    #[error("CoNLL-U line {line}: {message}")]
    Parse { line: usize, message: String },

    /// No token in the sentence has `head = 0`.
    #[error("sentence has no root token (head = 0)")]
    MissingRoot,

    /// More than one token in the sentence has `head = 0`.
    #[error("sentence has multiple root tokens (ids {first} and {second})")]
    MultipleRoots { first: usize, second: usize },

    /// A token's `head` does not refer to any token id in the sentence.
    #[error("token {id} has head {head}, which is not a token id in the sentence")]
    HeadOutOfRange { id: usize, head: usize },

    /// Token ids must be the sequence 1..=n in surface order.
    #[error("token at position {position} has id {id}, expected id {position}")]
    NonSequentialIds { position: usize, id: usize },

    /// The head relation contains a cycle, leaving tokens unreachable from
    /// the root.
    #[error("token {id} is unreachable from the root (cyclic head relation)")]
    UnreachableToken { id: usize },

    /// Wraps any per-sentence failure with the sentence's position in the
    /// corpus (0-based).
    #[error("sentence {index}: {source}")]
    Sentence {
        index: usize,
        #[source]
        source: Box<AnalysisError>,
    },

    /// Every sentence in the corpus is degenerate (no countable tokens), so
    /// no corpus-level denominator exists.
    #[error("corpus has no countable tokens")]
    EmptyCorpus,

    /// A clause head carries a relation label outside the fixed clause
    /// vocabulary. The vocabulary is stale relative to the annotation scheme
    /// and the corpus must not be silently undercounted.
    #[error("clause relation {label:?} is not in the clause vocabulary")]
    UnknownClauseRelation { label: String },

    /// The corpus has countable tokens but not a single noun-phrase head, so
    /// phrase-length statistics are undefined.
    #[error("corpus contains no noun phrases")]
    NounPhraseFreeCorpus,

    /// JSON serialization of a result failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Attach a 0-based sentence index to a per-sentence failure.
    pub fn in_sentence(self, index: usize) -> Self {
        AnalysisError::Sentence {
            index,
            source: Box::new(self),
        }
    }
}
