//! Plain-text and JSON rendering of a [`CorpusAnalysis`].

use std::fmt;

use crate::corpus::CorpusAnalysis;
use crate::error::Result;

/// Rendering knobs for the plain-text report.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// Decimal places for fractional metrics.
    pub decimals: usize,
    /// Keep clause-type rows whose count is zero.
    pub include_zero_shares: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            decimals: 2,
            include_zero_shares: false,
        }
    }
}

impl ReportOptions {
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_zero_shares(mut self, include: bool) -> Self {
        self.include_zero_shares = include;
        self
    }
}

/// Render the report with default options.
pub fn render(analysis: &CorpusAnalysis) -> String {
    render_with(analysis, &ReportOptions::default())
}

/// Render the report as aligned label/value lines, grouped by topic.
pub fn render_with(analysis: &CorpusAnalysis, options: &ReportOptions) -> String {
    let p = options.decimals;
    let row = |label: &str, value: String| format!("  {label:<34} {value}");
    let num = |value: f64| format!("{value:.p$}");

    let mut lines = vec![
        "counts".to_string(),
        row("sentences", analysis.sentence_count.to_string()),
        row("words", analysis.word_count.to_string()),
        row("clauses", analysis.clause_count.to_string()),
        row("t-units", analysis.t_unit_count.to_string()),
        String::new(),
        "length and density".to_string(),
        row("mean sentence length", num(analysis.mean_sentence_length)),
        row("mean clause length", num(analysis.mean_clause_length)),
        row("mean t-unit length", num(analysis.mean_t_unit_length)),
        row("clauses per sentence", num(analysis.clauses_per_sentence)),
        row("clauses per t-unit", num(analysis.clauses_per_t_unit)),
        String::new(),
        "clause types".to_string(),
    ];

    for stat in &analysis.clause_types {
        if stat.count == 0 && !options.include_zero_shares {
            continue;
        }
        lines.push(row(
            stat.relation.as_label(),
            format!("{} ({:.p$}%)", stat.count, stat.share * 100.0),
        ));
    }

    lines.extend([
        String::new(),
        "tree shape".to_string(),
        row("tree depth mean", num(analysis.tree_depth.mean)),
        row("tree depth median", num(analysis.tree_depth.median)),
        row("tree depth min", analysis.tree_depth.min.to_string()),
        row("tree depth max", analysis.tree_depth.max.to_string()),
        row(
            "mean dependency distance",
            num(analysis.mean_dependency_distance),
        ),
        row("node/terminal ratio", num(analysis.node_terminal_ratio)),
        String::new(),
        "sentence similarity".to_string(),
        row(
            "mean POS chain distance",
            num(analysis.mean_pos_chain_distance),
        ),
        row(
            "mean relation chain distance",
            num(analysis.mean_deprel_chain_distance),
        ),
        String::new(),
        "coordination and subordination".to_string(),
        row("combined clauses", analysis.combined_clauses.to_string()),
        row(
            "coordinate clauses",
            analysis.coordinate_clauses.to_string(),
        ),
        row(
            "subordinate clauses",
            analysis.subordinate_clauses.to_string(),
        ),
        row(
            "coordinate/combined",
            num(analysis.coordinate_combined_ratio),
        ),
        row(
            "subordinate/combined",
            num(analysis.subordinate_combined_ratio),
        ),
        row(
            "coordinate/subordinate",
            num(analysis.coordinate_subordinate_ratio),
        ),
        row(
            "coordinate per sentence",
            num(analysis.coordinate_sentence_ratio),
        ),
        row(
            "subordinate per sentence",
            num(analysis.subordinate_sentence_ratio),
        ),
        String::new(),
        "noun phrases".to_string(),
        row("mean NP length", num(analysis.mean_np_length)),
        row("complex NP ratio", num(analysis.complex_np_ratio)),
    ]);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Serialize the full analysis, per-sentence detail included, as pretty JSON.
pub fn to_json(analysis: &CorpusAnalysis) -> Result<String> {
    Ok(serde_json::to_string_pretty(analysis)?)
}

impl fmt::Display for CorpusAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}
