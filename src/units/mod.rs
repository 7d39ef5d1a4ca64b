//! Syntactic units: clauses, T-units, and noun phrases.
//!
//! A unit is a head token plus the descendant tokens that belong to its
//! span. Heads are found by [`classify_token`]; spans are built by
//! [`SpanExtractor`] (clauses, T-units) and [`NounPhraseExtractor`]
//! (noun phrases).

mod noun_phrases;
mod spans;

pub use noun_phrases::NounPhraseExtractor;
pub use spans::SpanExtractor;

use serde::{Deserialize, Serialize};

use crate::types::Token;

/// One extracted unit: a head token and its span.
///
/// `dependent_ids` is sorted ascending; `text` joins the surface forms of
/// head and dependents in ascending id order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub head_id: usize,
    pub dependent_ids: Vec<usize>,
    /// The head token's dependency relation label.
    pub relation: String,
    pub text: String,
}

impl Unit {
    /// Number of tokens in the span (head plus dependents).
    pub fn span_len(&self) -> usize {
        self.dependent_ids.len() + 1
    }

    /// Whether the span extends beyond the bare head.
    pub fn is_complex(&self) -> bool {
        !self.dependent_ids.is_empty()
    }
}

/// Head roles a single token can take. T-unit heads are always clause heads
/// as well; noun-phrase headship is independent of both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeadRoles {
    pub clause: bool,
    pub t_unit: bool,
    pub noun_phrase: bool,
}

/// Classify one countable token.
///
/// - T-unit head (and clause head): `root`, `parataxis`, or a coordinated
///   verb (`conj` on a VERB).
/// - Clause head only: one of the subordinate clause relations, or `xcomp`
///   on a VERB.
/// - Noun-phrase head: NOUN, PROPN, or PRON.
///
/// Relation labels match exactly; a subtype such as `ccomp:cleft` is not
/// `ccomp`.
pub fn classify_token(token: &Token) -> HeadRoles {
    let t_unit = matches!(token.deprel.as_str(), "root" | "parataxis")
        || (token.deprel == "conj" && token.upos == "VERB");

    let clause = t_unit
        || matches!(
            token.deprel.as_str(),
            "advcl"
                | "advcl:relcl"
                | "acl"
                | "acl:relcl"
                | "ccomp"
                | "nsubj:outer"
                | "csubj:outer"
                | "csubj"
        )
        || (token.deprel == "xcomp" && token.upos == "VERB");

    let noun_phrase = matches!(token.upos.as_str(), "NOUN" | "PROPN" | "PRON");

    HeadRoles {
        clause,
        t_unit,
        noun_phrase,
    }
}

/// Token lookup by id. Valid only for sentences whose ids are 1..=n, which
/// tree construction guarantees.
pub(crate) fn token_at(tokens: &[Token], id: usize) -> &Token {
    &tokens[id - 1]
}

/// Surface text of a span: forms of head + dependents in ascending id order,
/// joined with single spaces.
pub(crate) fn span_text(tokens: &[Token], head_id: usize, dependent_ids: &[usize]) -> String {
    let mut ids = dependent_ids.to_vec();
    ids.push(head_id);
    ids.sort_unstable();
    ids.iter()
        .map(|&id| token_at(tokens, id).form.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
