//! End-to-end tests: CoNLL-U text in, corpus metrics and reports out.

use synmetrics::{conllu, render, render_with, to_json, AnalysisError, CorpusAnalysis, ReportOptions};

/// Four sentences: two ordinary ones, one with a multiword-token range and
/// a contraction, and one consisting of punctuation only.
const SAMPLE: &str = include_str!("fixtures/sample.conllu");

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_parse_skips_ranges_and_empty_nodes() {
    let sentences = conllu::parse(SAMPLE).unwrap();
    assert_eq!(sentences.len(), 4);

    assert_eq!(sentences[0].sent_id.as_deref(), Some("s1"));
    assert_eq!(
        sentences[0].text.as_deref(),
        Some("This is a text containing two sentences.")
    );
    // The empty node 5.1 carries no tree position.
    assert_eq!(sentences[1].tokens.len(), 6);
    // The range line 1-2 is orthography, not a syntactic token.
    assert_eq!(sentences[2].tokens.len(), 4);
    assert_eq!(sentences[2].tokens[0].form, "Do");
}

#[test]
fn test_corpus_metrics_from_conllu() {
    let analysis = CorpusAnalysis::from_conllu(SAMPLE).unwrap();

    // The punctuation-only sentence is excluded everywhere.
    assert_eq!(analysis.sentence_count, 3);
    assert_eq!(analysis.sentences.len(), 3);
    assert_eq!(analysis.word_count, 15);
    assert_eq!(analysis.clause_count, 4);
    assert_eq!(analysis.t_unit_count, 3);

    assert!(close(analysis.mean_sentence_length, 5.0));
    assert!(close(analysis.mean_clause_length, 3.75));
    assert!(close(analysis.mean_t_unit_length, 5.0));
    assert!(close(analysis.clauses_per_sentence, 4.0 / 3.0));
    assert!(close(analysis.clauses_per_t_unit, 4.0 / 3.0));

    assert!(close(analysis.tree_depth.mean, 8.0 / 3.0));
    assert!(close(analysis.tree_depth.median, 2.0));
    assert_eq!(analysis.tree_depth.min, 2);
    assert_eq!(analysis.tree_depth.max, 4);

    assert!(close(analysis.mean_dependency_distance, 35.0 / 15.0));
    assert!(close(analysis.node_terminal_ratio, 1.5));

    assert!(close(analysis.mean_pos_chain_distance, 4.0));
    assert!(close(analysis.mean_deprel_chain_distance, 14.0 / 3.0));

    assert_eq!(analysis.combined_clauses, 1);
    assert_eq!(analysis.coordinate_clauses, 0);
    assert_eq!(analysis.subordinate_clauses, 1);
    assert!(close(analysis.subordinate_combined_ratio, 1.0));
    assert!(close(analysis.subordinate_sentence_ratio, 1.0 / 3.0));

    // Noun phrase lengths across the corpus: 1, 2, 2, 1, 3.
    assert!(close(analysis.mean_np_length, 1.8));
    assert!(close(analysis.complex_np_ratio, 0.6));
}

#[test]
fn test_clause_typology_from_conllu() {
    let analysis = CorpusAnalysis::from_conllu(SAMPLE).unwrap();
    let root = analysis
        .clause_types
        .iter()
        .find(|stat| stat.relation.as_label() == "root")
        .unwrap();
    assert_eq!(root.count, 3);
    assert!(close(root.share, 0.75));

    let acl = analysis
        .clause_types
        .iter()
        .find(|stat| stat.relation.as_label() == "acl")
        .unwrap();
    assert_eq!(acl.count, 1);
    assert!(close(acl.share, 0.25));
}

#[test]
fn test_sentence_detail_survives_aggregation() {
    let analysis = CorpusAnalysis::from_conllu(SAMPLE).unwrap();
    let first = &analysis.sentences[0];
    assert_eq!(
        first.text,
        "This is a text containing two sentences."
    );
    assert_eq!(first.word_count, 7);
    assert_eq!(first.tree_depth, 4);
    assert_eq!(first.terminal_ids, vec![1, 2, 3, 6]);

    let contraction = &analysis.sentences[2];
    assert_eq!(contraction.word_count, 3);
    assert_eq!(contraction.clauses.len(), 1);
    assert!(contraction.noun_phrases.is_empty());
}

#[test]
fn test_report_rendering() {
    let analysis = CorpusAnalysis::from_conllu(SAMPLE).unwrap();
    let report = render(&analysis);
    assert!(report.contains("mean sentence length"));
    assert!(report.contains("5.00"));
    assert!(report.contains("acl"));
    assert!(!report.contains("ccomp"));

    let verbose = render_with(&analysis, &ReportOptions::default().with_zero_shares(true));
    assert!(verbose.contains("ccomp"));
}

#[test]
fn test_json_export() {
    let analysis = CorpusAnalysis::from_conllu(SAMPLE).unwrap();
    let json = to_json(&analysis).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["word_count"], 15);
    assert_eq!(value["clause_types"].as_array().unwrap().len(), 12);
    assert_eq!(value["sentences"].as_array().unwrap().len(), 3);
}

#[test]
fn test_malformed_line_reports_its_position() {
    let doc = "1\tword\tword\tNOUN\t_\t_\t0\troot\t_\n";
    match conllu::parse(doc) {
        Err(AnalysisError::Parse { line, .. }) => assert_eq!(line, 1),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_invalid_tree_reports_sentence_index() {
    let doc = concat!(
        "1\tfine\tfine\tNOUN\t_\t_\t0\troot\t_\t_\n",
        "\n",
        "1\tbad\tbad\tNOUN\t_\t_\t9\tnsubj\t_\t_\n",
    );
    match CorpusAnalysis::from_conllu(doc) {
        Err(AnalysisError::Sentence { index, source }) => {
            assert_eq!(index, 1);
            assert!(matches!(
                *source,
                AnalysisError::HeadOutOfRange { id: 1, head: 9 }
            ));
        }
        other => panic!("expected an indexed sentence error, got {other:?}"),
    }
}

#[test]
fn test_empty_document_is_an_empty_corpus() {
    assert!(matches!(
        CorpusAnalysis::from_conllu(""),
        Err(AnalysisError::EmptyCorpus)
    ));
    assert!(matches!(
        CorpusAnalysis::from_conllu("# text = nothing here\n"),
        Err(AnalysisError::EmptyCorpus)
    ));
}
