//! Noun-phrase extraction.
//!
//! A noun phrase is a nominal head plus the descendants reachable through
//! NP-internal relations only. The relation whitelist gates both inclusion
//! and further descent, so a clause hanging off a noun never leaks into the
//! phrase. Heads already absorbed into an earlier phrase are dropped.

use rustc_hash::FxHashSet;

use crate::tree::DepTree;
use crate::types::Token;

use super::{span_text, token_at, Unit};

/// Relations a token may carry to stay inside its governor's noun phrase.
fn is_np_internal(deprel: &str) -> bool {
    matches!(
        deprel,
        "nmod"
            | "nmod:poss"
            | "nmod:tmod"
            | "appos"
            | "amod"
            | "nummod"
            | "nummod:gov"
            | "det"
            | "case"
    )
}

/// Builds noun-phrase spans for one sentence.
#[derive(Debug, Clone, Copy)]
pub struct NounPhraseExtractor<'a> {
    tokens: &'a [Token],
    tree: &'a DepTree,
}

impl<'a> NounPhraseExtractor<'a> {
    /// The tokens must be the ones the tree was built from.
    pub fn new(tokens: &'a [Token], tree: &'a DepTree) -> Self {
        Self { tokens, tree }
    }

    /// Extract one phrase per head id, skipping heads already covered by an
    /// earlier phrase. Head ids must arrive in ascending order, so the
    /// outermost phrase is built first and subsumed heads are recognized.
    pub fn extract(&self, head_ids: &[usize]) -> Vec<Unit> {
        let mut absorbed: FxHashSet<usize> = FxHashSet::default();
        let mut phrases = Vec::new();

        for &head_id in head_ids {
            if absorbed.contains(&head_id) {
                continue;
            }
            let mut dependent_ids = self.modifier_descendants(head_id);
            dependent_ids.sort_unstable();
            absorbed.extend(dependent_ids.iter().copied());

            phrases.push(Unit {
                head_id,
                relation: token_at(self.tokens, head_id).deprel.clone(),
                text: span_text(self.tokens, head_id, &dependent_ids),
                dependent_ids,
            });
        }

        phrases
    }

    /// Iterative descent gated by the NP-internal whitelist: a child outside
    /// it is skipped with its whole subtree.
    fn modifier_descendants(&self, head_id: usize) -> Vec<usize> {
        let mut collected = Vec::new();
        let mut stack: Vec<usize> = self.tree.children(head_id).to_vec();

        while let Some(id) = stack.pop() {
            let token = token_at(self.tokens, id);
            if !token.is_word() || !is_np_internal(&token.deprel) {
                continue;
            }
            collected.push(id);
            stack.extend_from_slice(self.tree.children(id));
        }

        collected
    }
}
