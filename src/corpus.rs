//! Corpus-level aggregation.
//!
//! Sentences are analyzed independently (in parallel for large corpora) and
//! folded through a local accumulator into a single [`CorpusAnalysis`].
//! Every derived ratio is computed from global sums, never from averages of
//! per-sentence ratios. Degenerate sentences (no countable tokens) are
//! excluded before the fold.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::conllu;
use crate::distance;
use crate::error::{AnalysisError, Result};
use crate::sentence::SentenceAnalysis;
use crate::types::Sentence;

/// Below this many sentences, parallel dispatch costs more than it saves.
const PARALLEL_THRESHOLD: usize = 128;

/// Enter a tracing span for an aggregation stage (when the `tracing` feature
/// is enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("corpus_stage", stage = $name).entered();
    };
}

// ─── Clause relation vocabulary ─────────────────────────────────────────────

/// The fixed vocabulary of relation labels a clause head may carry.
///
/// The set is closed: a clause head with any other label means the
/// vocabulary is stale relative to the annotation scheme, and counting must
/// fail rather than mislabel the clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClauseRelation {
    #[serde(rename = "root")]
    Root,
    #[serde(rename = "acl")]
    Acl,
    #[serde(rename = "acl:relcl")]
    AclRelcl,
    #[serde(rename = "advcl")]
    Advcl,
    #[serde(rename = "advcl:relcl")]
    AdvclRelcl,
    #[serde(rename = "ccomp")]
    Ccomp,
    #[serde(rename = "csubj")]
    Csubj,
    #[serde(rename = "csubj:outer")]
    CsubjOuter,
    #[serde(rename = "nsubj:outer")]
    NsubjOuter,
    #[serde(rename = "parataxis")]
    Parataxis,
    #[serde(rename = "xcomp")]
    Xcomp,
    #[serde(rename = "conj")]
    Conj,
}

impl ClauseRelation {
    /// All known relations, in reporting order.
    pub const ALL: [ClauseRelation; 12] = [
        ClauseRelation::Root,
        ClauseRelation::Acl,
        ClauseRelation::AclRelcl,
        ClauseRelation::Advcl,
        ClauseRelation::AdvclRelcl,
        ClauseRelation::Ccomp,
        ClauseRelation::Csubj,
        ClauseRelation::CsubjOuter,
        ClauseRelation::NsubjOuter,
        ClauseRelation::Parataxis,
        ClauseRelation::Xcomp,
        ClauseRelation::Conj,
    ];

    /// Look up a relation label, rejecting anything outside the vocabulary.
    pub fn from_label(label: &str) -> Result<Self> {
        let relation = match label {
            "root" => ClauseRelation::Root,
            "acl" => ClauseRelation::Acl,
            "acl:relcl" => ClauseRelation::AclRelcl,
            "advcl" => ClauseRelation::Advcl,
            "advcl:relcl" => ClauseRelation::AdvclRelcl,
            "ccomp" => ClauseRelation::Ccomp,
            "csubj" => ClauseRelation::Csubj,
            "csubj:outer" => ClauseRelation::CsubjOuter,
            "nsubj:outer" => ClauseRelation::NsubjOuter,
            "parataxis" => ClauseRelation::Parataxis,
            "xcomp" => ClauseRelation::Xcomp,
            "conj" => ClauseRelation::Conj,
            _ => {
                return Err(AnalysisError::UnknownClauseRelation {
                    label: label.to_string(),
                })
            }
        };
        Ok(relation)
    }

    /// The label as it appears in annotations.
    pub fn as_label(self) -> &'static str {
        match self {
            ClauseRelation::Root => "root",
            ClauseRelation::Acl => "acl",
            ClauseRelation::AclRelcl => "acl:relcl",
            ClauseRelation::Advcl => "advcl",
            ClauseRelation::AdvclRelcl => "advcl:relcl",
            ClauseRelation::Ccomp => "ccomp",
            ClauseRelation::Csubj => "csubj",
            ClauseRelation::CsubjOuter => "csubj:outer",
            ClauseRelation::NsubjOuter => "nsubj:outer",
            ClauseRelation::Parataxis => "parataxis",
            ClauseRelation::Xcomp => "xcomp",
            ClauseRelation::Conj => "conj",
        }
    }
}

impl fmt::Display for ClauseRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Per-relation clause counter over the fixed vocabulary.
#[derive(Debug, Clone, Default)]
struct ClauseCounter {
    counts: [usize; 12],
}

impl ClauseCounter {
    fn record(&mut self, label: &str) -> Result<()> {
        let relation = ClauseRelation::from_label(label)?;
        self.counts[relation as usize] += 1;
        Ok(())
    }

    fn count(&self, relation: ClauseRelation) -> usize {
        self.counts[relation as usize]
    }
}

// ─── Result types ───────────────────────────────────────────────────────────

/// Count and corpus share of one clause relation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClauseTypeStat {
    pub relation: ClauseRelation,
    pub count: usize,
    /// `count / total clause count`; 0 when the corpus has no clauses.
    pub share: f64,
}

/// Distribution of per-sentence tree depths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DepthStats {
    pub mean: f64,
    /// Midpoint of the two central values when the count is even.
    pub median: f64,
    pub min: usize,
    pub max: usize,
}

impl DepthStats {
    /// Compute the distribution; an empty slice yields all zeros.
    pub fn from_depths(depths: &[usize]) -> Self {
        if depths.is_empty() {
            return Self::default();
        }
        let mut sorted = depths.to_vec();
        sorted.sort_unstable();
        let n = sorted.len();
        let median = if n % 2 == 1 {
            sorted[n / 2] as f64
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0
        };
        Self {
            mean: sorted.iter().sum::<usize>() as f64 / n as f64,
            median,
            min: sorted[0],
            max: sorted[n - 1],
        }
    }
}

/// All corpus-level metrics, plus the retained per-sentence analyses.
///
/// Immutable after construction. Length and density ratios divide global
/// sums; the coordination/subordination ratios define a zero denominator as
/// 0 rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusAnalysis {
    /// Non-degenerate sentences.
    pub sentence_count: usize,
    /// Countable tokens across the corpus.
    pub word_count: usize,
    pub clause_count: usize,
    pub t_unit_count: usize,

    pub mean_sentence_length: f64,
    pub mean_clause_length: f64,
    pub mean_t_unit_length: f64,
    pub clauses_per_sentence: f64,
    pub clauses_per_t_unit: f64,

    /// One entry per vocabulary relation, in [`ClauseRelation::ALL`] order.
    pub clause_types: Vec<ClauseTypeStat>,

    pub tree_depth: DepthStats,
    /// Mean of `abs(head - id)` over every countable token.
    pub mean_dependency_distance: f64,
    /// Countable tokens per terminal token, each sentence contributing its
    /// distinct ids once.
    pub node_terminal_ratio: f64,

    /// Mean pairwise edit distance between sentence POS chains.
    pub mean_pos_chain_distance: f64,
    /// Mean pairwise edit distance between sentence relation chains.
    pub mean_deprel_chain_distance: f64,

    /// Clauses beyond each sentence's main clause. Signed: pathological
    /// corpora can have fewer clauses than sentences.
    pub combined_clauses: i64,
    pub coordinate_clauses: i64,
    pub subordinate_clauses: i64,
    pub coordinate_combined_ratio: f64,
    pub subordinate_combined_ratio: f64,
    pub coordinate_subordinate_ratio: f64,
    pub coordinate_sentence_ratio: f64,
    pub subordinate_sentence_ratio: f64,

    pub mean_np_length: f64,
    /// Fraction of noun phrases longer than the bare head.
    pub complex_np_ratio: f64,

    /// The analyses the metrics were folded from, degenerate sentences
    /// excluded.
    pub sentences: Vec<SentenceAnalysis>,
}

impl CorpusAnalysis {
    /// Parse a CoNLL-U document and analyze it.
    pub fn from_conllu(input: &str) -> Result<Self> {
        let sentences = conllu::parse(input)?;
        Self::from_sentences(&sentences)
    }

    /// Analyze an already-parsed sentence collection.
    pub fn from_sentences(sentences: &[Sentence]) -> Result<Self> {
        let analyses = analyze_sentences(sentences)?;
        Self::from_analyses(analyses)
    }

    /// Aggregate per-sentence analyses into corpus metrics.
    ///
    /// Degenerate analyses are skipped here. Fails with
    /// [`AnalysisError::EmptyCorpus`] when nothing countable remains, with
    /// [`AnalysisError::UnknownClauseRelation`] on a stale clause
    /// vocabulary, and with [`AnalysisError::NounPhraseFreeCorpus`] when no
    /// sentence contains a noun phrase.
    pub fn from_analyses(analyses: Vec<SentenceAnalysis>) -> Result<Self> {
        trace_stage!("aggregate");
        let total = analyses.len();
        let kept: Vec<SentenceAnalysis> = analyses
            .into_iter()
            .filter(|analysis| !analysis.is_degenerate())
            .collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            kept = kept.len(),
            skipped = total - kept.len(),
            "aggregating sentence analyses"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = total;

        let mut accumulator = CorpusAccumulator::default();
        for analysis in &kept {
            accumulator.fold(analysis)?;
        }
        accumulator.finish(kept)
    }
}

/// Run the per-sentence analysis over a whole corpus.
///
/// Sentences are independent, so large corpora are mapped in parallel; the
/// result order always matches the input order. Errors carry the 0-based
/// index of the failing sentence.
pub fn analyze_sentences(sentences: &[Sentence]) -> Result<Vec<SentenceAnalysis>> {
    trace_stage!("analyze");
    if sentences.len() < PARALLEL_THRESHOLD {
        sentences
            .iter()
            .enumerate()
            .map(|(index, sentence)| analyze_indexed(index, sentence))
            .collect()
    } else {
        sentences
            .par_iter()
            .enumerate()
            .map(|(index, sentence)| analyze_indexed(index, sentence))
            .collect()
    }
}

fn analyze_indexed(index: usize, sentence: &Sentence) -> Result<SentenceAnalysis> {
    SentenceAnalysis::analyze(sentence).map_err(|err| err.in_sentence(index))
}

// ─── Accumulator ────────────────────────────────────────────────────────────

/// Running sums for one aggregation pass. Local to the fold; never shared.
#[derive(Debug, Default)]
struct CorpusAccumulator {
    sentence_count: usize,
    word_count: usize,
    clause_count: usize,
    t_unit_count: usize,
    terminal_count: usize,
    distance_sum: u64,
    tree_depths: Vec<usize>,
    np_length_sum: usize,
    np_count: usize,
    complex_np_count: usize,
    clause_counter: ClauseCounter,
}

impl CorpusAccumulator {
    fn fold(&mut self, analysis: &SentenceAnalysis) -> Result<()> {
        self.sentence_count += 1;
        self.word_count += analysis.word_count;
        self.clause_count += analysis.clauses.len();
        self.t_unit_count += analysis.t_units.len();
        self.terminal_count += analysis.terminal_ids.len();
        self.distance_sum += analysis
            .dependency_distances
            .iter()
            .map(|&d| d as u64)
            .sum::<u64>();
        self.tree_depths.push(analysis.tree_depth);

        for phrase in &analysis.noun_phrases {
            self.np_length_sum += phrase.span_len();
            self.np_count += 1;
            if phrase.is_complex() {
                self.complex_np_count += 1;
            }
        }
        for clause in &analysis.clauses {
            self.clause_counter.record(&clause.relation)?;
        }
        Ok(())
    }

    fn finish(self, sentences: Vec<SentenceAnalysis>) -> Result<CorpusAnalysis> {
        if self.word_count == 0 {
            return Err(AnalysisError::EmptyCorpus);
        }
        if self.np_count == 0 {
            return Err(AnalysisError::NounPhraseFreeCorpus);
        }

        let words = self.word_count as f64;
        let clauses = self.clause_count as f64;
        let t_units = self.t_unit_count as f64;
        let sentence_total = self.sentence_count as f64;

        let clause_types = ClauseRelation::ALL
            .iter()
            .map(|&relation| {
                let count = self.clause_counter.count(relation);
                let share = if self.clause_count == 0 {
                    0.0
                } else {
                    count as f64 / clauses
                };
                ClauseTypeStat {
                    relation,
                    count,
                    share,
                }
            })
            .collect();

        let pos_chains: Vec<&[String]> = sentences
            .iter()
            .map(|analysis| analysis.pos_chain.as_slice())
            .collect();
        let deprel_chains: Vec<&[String]> = sentences
            .iter()
            .map(|analysis| analysis.deprel_chain.as_slice())
            .collect();

        let combined_clauses = self.clause_count as i64 - self.sentence_count as i64;
        let coordinate_clauses = (self.clause_counter.count(ClauseRelation::Conj)
            + self.clause_counter.count(ClauseRelation::Parataxis))
            as i64;
        let subordinate_clauses = combined_clauses - coordinate_clauses;

        Ok(CorpusAnalysis {
            sentence_count: self.sentence_count,
            word_count: self.word_count,
            clause_count: self.clause_count,
            t_unit_count: self.t_unit_count,
            mean_sentence_length: words / sentence_total,
            mean_clause_length: words / clauses,
            mean_t_unit_length: words / t_units,
            clauses_per_sentence: clauses / sentence_total,
            clauses_per_t_unit: clauses / t_units,
            clause_types,
            tree_depth: DepthStats::from_depths(&self.tree_depths),
            mean_dependency_distance: self.distance_sum as f64 / words,
            node_terminal_ratio: words / self.terminal_count as f64,
            mean_pos_chain_distance: distance::mean_pairwise(&pos_chains),
            mean_deprel_chain_distance: distance::mean_pairwise(&deprel_chains),
            combined_clauses,
            coordinate_clauses,
            subordinate_clauses,
            coordinate_combined_ratio: ratio(coordinate_clauses, combined_clauses),
            subordinate_combined_ratio: ratio(subordinate_clauses, combined_clauses),
            coordinate_subordinate_ratio: ratio(coordinate_clauses, subordinate_clauses),
            coordinate_sentence_ratio: coordinate_clauses as f64 / sentence_total,
            subordinate_sentence_ratio: subordinate_clauses as f64 / sentence_total,
            mean_np_length: self.np_length_sum as f64 / self.np_count as f64,
            complex_np_ratio: self.complex_np_count as f64 / self.np_count as f64,
            sentences,
        })
    }
}

/// A zero denominator yields 0, not an error.
fn ratio(numerator: i64, denominator: i64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
