//! CoNLL-U reader.
//!
//! Parses the 10-column tab-separated CoNLL-U format into [`Sentence`]
//! values. Comment lines (`# key = value`) become sentence metadata, blank
//! lines close a sentence, `_` placeholders map to empty optional columns.
//!
//! Multiword-token ranges (`1-2`) and empty nodes (`5.1`) carry no head
//! attachment of their own and are skipped: the dependency tree is defined
//! over the basic word lines only.

use crate::error::{AnalysisError, Result};
use crate::types::{Sentence, Token};

/// Parse a complete CoNLL-U document into sentences.
///
/// Comment-only blocks are dropped; a sentence must contain at least one
/// token line. Errors carry the 1-based line number of the offending line.
pub fn parse(input: &str) -> Result<Vec<Sentence>> {
    let mut sentences = Vec::new();
    let mut current = Sentence::default();

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim_end_matches('\r');

        if line.is_empty() {
            flush(&mut current, &mut sentences);
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            read_metadata(comment, &mut current);
            continue;
        }

        if let Some(token) = parse_token_line(line, line_no)? {
            current.tokens.push(token);
        }
    }
    flush(&mut current, &mut sentences);

    Ok(sentences)
}

fn flush(current: &mut Sentence, sentences: &mut Vec<Sentence>) {
    if !current.tokens.is_empty() {
        sentences.push(std::mem::take(current));
    } else {
        // Drop stray metadata that precedes no token lines.
        *current = Sentence::default();
    }
}

fn read_metadata(comment: &str, sentence: &mut Sentence) {
    // Comments without '=' (e.g. "# newdoc") carry no key/value pair.
    if let Some((key, value)) = comment.split_once('=') {
        match key.trim() {
            "sent_id" => sentence.sent_id = Some(value.trim().to_string()),
            "text" => sentence.text = Some(value.trim().to_string()),
            _ => {}
        }
    }
}

/// Parse one token line. Returns `None` for multiword-token ranges and
/// empty nodes.
fn parse_token_line(line: &str, line_no: usize) -> Result<Option<Token>> {
    let columns: Vec<&str> = line.split('\t').collect();
    if columns.len() != 10 {
        return Err(AnalysisError::Parse {
            line: line_no,
            message: format!(
                "expected 10 tab-separated fields, found {}",
                columns.len()
            ),
        });
    }

    let id_field = columns[0];
    if id_field.contains('-') || id_field.contains('.') {
        return Ok(None);
    }

    let id = parse_number(id_field, "token id", line_no)?;
    if id == 0 {
        return Err(AnalysisError::Parse {
            line: line_no,
            message: "token id must be positive".to_string(),
        });
    }
    let head = parse_number(columns[6], "head", line_no)?;

    Ok(Some(Token {
        id,
        form: columns[1].to_string(),
        lemma: columns[2].to_string(),
        upos: columns[3].to_string(),
        xpos: optional(columns[4]),
        feats: optional(columns[5]),
        head,
        deprel: columns[7].to_string(),
        deps: optional(columns[8]),
        misc: optional(columns[9]),
    }))
}

fn parse_number(field: &str, what: &str, line_no: usize) -> Result<usize> {
    field.parse().map_err(|_| AnalysisError::Parse {
        line: line_no,
        message: format!("invalid {what} {field:?}"),
    })
}

fn optional(field: &str) -> Option<String> {
    if field == "_" {
        None
    } else {
        Some(field.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, form: &str, upos: &str, head: &str, deprel: &str) -> String {
        [id, form, form, upos, "_", "_", head, deprel, "_", "_"].join("\t")
    }

    fn sample() -> String {
        let mut doc = String::new();
        doc.push_str("# sent_id = s1\n");
        doc.push_str("# text = The cat sleeps.\n");
        doc.push_str(&line("1", "The", "DET", "3", "det"));
        doc.push('\n');
        doc.push_str(&line("2", "cat", "NOUN", "3", "nsubj"));
        doc.push('\n');
        doc.push_str(&line("3", "sleeps", "VERB", "0", "root"));
        doc.push('\n');
        doc.push_str(&line("4", ".", "PUNCT", "3", "punct"));
        doc.push('\n');
        doc.push('\n');
        doc.push_str("# sent_id = s2\n");
        doc.push_str(&line("1", "Yes", "INTJ", "0", "root"));
        doc.push('\n');
        doc
    }

    #[test]
    fn test_parses_sentences_and_metadata() {
        let sentences = parse(&sample()).unwrap();
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].sent_id.as_deref(), Some("s1"));
        assert_eq!(sentences[0].text.as_deref(), Some("The cat sleeps."));
        assert_eq!(sentences[0].tokens.len(), 4);
        assert_eq!(sentences[0].tokens[2].form, "sleeps");
        assert_eq!(sentences[0].tokens[2].head, 0);
        assert_eq!(sentences[1].tokens.len(), 1);
    }

    #[test]
    fn test_final_sentence_without_trailing_blank_line() {
        let doc = line("1", "Hi", "INTJ", "0", "root");
        let sentences = parse(&doc).unwrap();
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn test_skips_multiword_ranges_and_empty_nodes() {
        let mut doc = String::new();
        doc.push_str(&line("1-2", "don't", "_", "_", "_"));
        doc.push('\n');
        doc.push_str(&line("1", "do", "AUX", "0", "root"));
        doc.push('\n');
        doc.push_str(&line("2", "n't", "PART", "1", "advmod"));
        doc.push('\n');
        doc.push_str(&line("2.1", "ghost", "VERB", "_", "_"));
        doc.push('\n');

        let sentences = parse(&doc).unwrap();
        assert_eq!(sentences.len(), 1);
        let ids: Vec<usize> = sentences[0].tokens.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_underscore_maps_to_none_for_optional_columns() {
        let sentences = parse(&line("1", "Hi", "INTJ", "0", "root")).unwrap();
        let token = &sentences[0].tokens[0];
        assert_eq!(token.xpos, None);
        assert_eq!(token.feats, None);
        assert_eq!(token.misc, None);
    }

    #[test]
    fn test_column_count_error_reports_line_number() {
        let doc = format!("{}\n1\tbroken\tline\n", line("1", "Hi", "INTJ", "0", "root"));
        let err = parse(&doc).unwrap_err();
        match err {
            AnalysisError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_unset_head_on_word_line_is_an_error() {
        let doc = ["1", "Hi", "hi", "INTJ", "_", "_", "_", "root", "_", "_"].join("\t");
        assert!(parse(&doc).is_err());
    }

    #[test]
    fn test_zero_token_id_is_an_error() {
        let doc = line("0", "Hi", "INTJ", "0", "root");
        assert!(parse(&doc).is_err());
    }

    #[test]
    fn test_tolerates_crlf_line_endings() {
        let doc = format!("{}\r\n\r\n{}\r\n", line("1", "Hi", "INTJ", "0", "root"), line("1", "No", "INTJ", "0", "root"));
        let sentences = parse(&doc).unwrap();
        assert_eq!(sentences.len(), 2);
    }

    #[test]
    fn test_comment_only_block_is_dropped() {
        let doc = format!("# text = orphaned\n\n{}\n", line("1", "Hi", "INTJ", "0", "root"));
        let sentences = parse(&doc).unwrap();
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].text, None);
    }
}
