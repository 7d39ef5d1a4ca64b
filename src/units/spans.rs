//! Clause and T-unit span extraction.
//!
//! Every clause (or T-unit) head owns the part of its subtree that is not
//! claimed by another head. Descent stops at boundary ids and at
//! punctuation, and a stopped child hides its entire subtree, so the spans
//! of different heads never overlap.

use rustc_hash::FxHashSet;

use crate::tree::DepTree;
use crate::types::Token;

use super::{span_text, token_at, Unit};

/// Builds clause or T-unit spans for one sentence.
///
/// The same extractor serves both unit kinds: the caller passes the full
/// head set of the kind being extracted, and that set doubles as the
/// boundary set for pruning.
#[derive(Debug, Clone, Copy)]
pub struct SpanExtractor<'a> {
    tokens: &'a [Token],
    tree: &'a DepTree,
}

impl<'a> SpanExtractor<'a> {
    /// The tokens must be the ones the tree was built from.
    pub fn new(tokens: &'a [Token], tree: &'a DepTree) -> Self {
        Self { tokens, tree }
    }

    /// Extract one unit per head id, in the given order.
    pub fn extract(&self, head_ids: &[usize]) -> Vec<Unit> {
        let boundaries: FxHashSet<usize> = head_ids.iter().copied().collect();
        head_ids
            .iter()
            .map(|&head_id| self.build_unit(head_id, &boundaries))
            .collect()
    }

    fn build_unit(&self, head_id: usize, boundaries: &FxHashSet<usize>) -> Unit {
        let mut dependent_ids = self.descendants(head_id, boundaries);
        dependent_ids.sort_unstable();
        Unit {
            head_id,
            relation: token_at(self.tokens, head_id).deprel.clone(),
            text: span_text(self.tokens, head_id, &dependent_ids),
            dependent_ids,
        }
    }

    /// Iterative descent from the head. A child that is a boundary or is
    /// not a word is skipped together with its whole subtree.
    fn descendants(&self, head_id: usize, boundaries: &FxHashSet<usize>) -> Vec<usize> {
        let mut collected = Vec::new();
        let mut stack: Vec<usize> = self.tree.children(head_id).to_vec();

        while let Some(id) = stack.pop() {
            if boundaries.contains(&id) || !token_at(self.tokens, id).is_word() {
                continue;
            }
            collected.push(id);
            stack.extend_from_slice(self.tree.children(id));
        }

        collected
    }
}
