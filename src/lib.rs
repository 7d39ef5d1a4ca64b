//! Syntactic complexity metrics over dependency-parsed text.
//!
//! Input is a CoNLL-U document; output is a [`CorpusAnalysis`] holding
//! corpus-level indices (production-unit lengths and densities, clause
//! typology, tree shape, sentence similarity, noun-phrase complexity)
//! together with the per-sentence detail they were folded from.
//!
//! Sentences are analyzed independently and in parallel for large corpora,
//! so results never depend on corpus order or thread count.
//!
//! # Example
//!
//! ```
//! use synmetrics::CorpusAnalysis;
//!
//! let conllu = "\
//! 1\tBirds\tbird\tNOUN\t_\t_\t2\tnsubj\t_\t_
//! 2\tsing\tsing\tVERB\t_\t_\t0\troot\t_\t_
//! ";
//! let analysis = CorpusAnalysis::from_conllu(conllu)?;
//! assert_eq!(analysis.sentence_count, 1);
//! assert_eq!(analysis.word_count, 2);
//! assert_eq!(analysis.clause_count, 1);
//! # Ok::<(), synmetrics::AnalysisError>(())
//! ```

pub mod conllu;
pub mod corpus;
pub mod distance;
pub mod error;
pub mod report;
pub mod sentence;
pub mod tree;
pub mod types;
pub mod units;

pub use corpus::{analyze_sentences, ClauseRelation, ClauseTypeStat, CorpusAnalysis, DepthStats};
pub use error::{AnalysisError, Result};
pub use report::{render, render_with, to_json, ReportOptions};
pub use sentence::SentenceAnalysis;
pub use tree::DepTree;
pub use types::{Sentence, Token};
pub use units::{classify_token, HeadRoles, NounPhraseExtractor, SpanExtractor, Unit};
