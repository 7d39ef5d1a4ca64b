//! Edit distance over label sequences.
//!
//! POS chains and relation chains are compared pairwise with plain
//! Levenshtein distance (insert/delete/substitute, unit cost). The DP keeps
//! two rows, so memory stays linear in the shorter-side length.

/// Levenshtein distance between two label sequences.
pub fn levenshtein<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev_row: Vec<usize> = (0..=b.len()).collect();
    let mut curr_row = vec![0usize; b.len() + 1];

    for (i, item_a) in a.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, item_b) in b.iter().enumerate() {
            let cost = usize::from(item_a != item_b);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}

/// Mean Levenshtein distance over every unordered pair of chains.
///
/// Fewer than two chains leave no pairs; the mean falls back to 0.
pub fn mean_pairwise(chains: &[&[String]]) -> f64 {
    if chains.len() < 2 {
        return 0.0;
    }

    let mut total = 0usize;
    let mut pairs = 0usize;
    for i in 0..chains.len() {
        for j in (i + 1)..chains.len() {
            total += levenshtein(chains[i], chains[j]);
            pairs += 1;
        }
    }

    total as f64 / pairs as f64
}
