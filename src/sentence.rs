//! Per-sentence analysis.
//!
//! [`SentenceAnalysis::analyze`] makes a single pass over the tokens,
//! classifying heads and building the POS chain, relation chain, and
//! dependency distances as it goes, then runs the span extractors and the
//! tree metrics. The result is immutable and owns no reference into the
//! sentence.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tree::DepTree;
use crate::types::Sentence;
use crate::units::{classify_token, NounPhraseExtractor, SpanExtractor, Unit};

/// Everything measured on one sentence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentenceAnalysis {
    /// Surface text (metadata when present, reconstructed otherwise).
    pub text: String,
    /// Number of countable tokens. 0 marks a degenerate sentence.
    pub word_count: usize,
    pub clauses: Vec<Unit>,
    pub t_units: Vec<Unit>,
    pub noun_phrases: Vec<Unit>,
    /// Universal POS tags of the countable tokens, in surface order.
    pub pos_chain: Vec<String>,
    /// Relation labels of the countable tokens, in surface order.
    pub deprel_chain: Vec<String>,
    /// `abs(head - id)` per countable token; the root contributes its id.
    pub dependency_distances: Vec<usize>,
    /// Longest root-to-leaf path over the full tree, punctuation included.
    pub tree_depth: usize,
    /// Countable ids that govern no countable token, ascending.
    pub terminal_ids: Vec<usize>,
    /// Countable ids that govern at least one countable token, ascending.
    pub nonterminal_ids: Vec<usize>,
}

impl SentenceAnalysis {
    /// Analyze one sentence.
    ///
    /// Degenerate sentences (no countable tokens) analyze cleanly to a
    /// result with `word_count` 0; excluding them is the aggregator's job.
    /// A sentence with no tokens at all yields the all-empty analysis
    /// without building a tree.
    pub fn analyze(sentence: &Sentence) -> Result<Self> {
        if sentence.tokens.is_empty() {
            return Ok(Self {
                text: sentence.surface_text(),
                ..Self::default()
            });
        }

        let tree = DepTree::build(&sentence.tokens)?;

        let mut clause_heads = Vec::new();
        let mut t_unit_heads = Vec::new();
        let mut np_heads = Vec::new();
        let mut pos_chain = Vec::new();
        let mut deprel_chain = Vec::new();
        let mut dependency_distances = Vec::new();
        let mut word_ids = Vec::new();
        let mut governor_ids: FxHashSet<usize> = FxHashSet::default();

        for token in &sentence.tokens {
            if !token.is_word() {
                continue;
            }
            word_ids.push(token.id);
            pos_chain.push(token.upos.clone());
            deprel_chain.push(token.deprel.clone());
            dependency_distances.push(token.id.abs_diff(token.head));
            governor_ids.insert(token.head);

            let roles = classify_token(token);
            if roles.t_unit {
                t_unit_heads.push(token.id);
            }
            if roles.clause {
                clause_heads.push(token.id);
            }
            if roles.noun_phrase {
                np_heads.push(token.id);
            }
        }

        let (nonterminal_ids, terminal_ids): (Vec<usize>, Vec<usize>) = word_ids
            .iter()
            .copied()
            .partition(|id| governor_ids.contains(id));

        let spans = SpanExtractor::new(&sentence.tokens, &tree);
        let clauses = spans.extract(&clause_heads);
        let t_units = spans.extract(&t_unit_heads);
        let noun_phrases =
            NounPhraseExtractor::new(&sentence.tokens, &tree).extract(&np_heads);

        Ok(Self {
            text: sentence.surface_text(),
            word_count: word_ids.len(),
            clauses,
            t_units,
            noun_phrases,
            pos_chain,
            deprel_chain,
            dependency_distances,
            tree_depth: tree.depth(),
            terminal_ids,
            nonterminal_ids,
        })
    }

    /// A sentence with no countable tokens contributes nothing to a corpus.
    pub fn is_degenerate(&self) -> bool {
        self.word_count == 0
    }
}
