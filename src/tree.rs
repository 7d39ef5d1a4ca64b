//! Dependency-tree view over a sentence's tokens.
//!
//! [`DepTree`] is built once per sentence and validated against the token
//! invariants: ids are the sequence 1..=n, exactly one token has `head = 0`,
//! every head refers to a token in the sentence, and every token is
//! reachable from the root. The tree is read-only after construction and
//! includes punctuation tokens, since tree shape is independent of which
//! tokens are counted.

use crate::error::{AnalysisError, Result};
use crate::types::Token;

/// Parent-to-children view of one sentence's head relation.
#[derive(Debug, Clone)]
pub struct DepTree {
    root: usize,
    /// Child ids in ascending order, indexed by token id. Slot 0 belongs to
    /// the virtual root and holds the sentence root.
    children: Vec<Vec<usize>>,
}

impl DepTree {
    /// Build and validate the tree for one sentence.
    pub fn build(tokens: &[Token]) -> Result<Self> {
        for (position, token) in tokens.iter().enumerate() {
            if token.id != position + 1 {
                return Err(AnalysisError::NonSequentialIds {
                    position: position + 1,
                    id: token.id,
                });
            }
        }

        let mut root = None;
        for token in tokens {
            if token.head == 0 {
                match root {
                    None => root = Some(token.id),
                    Some(first) => {
                        return Err(AnalysisError::MultipleRoots {
                            first,
                            second: token.id,
                        })
                    }
                }
            } else if token.head > tokens.len() {
                return Err(AnalysisError::HeadOutOfRange {
                    id: token.id,
                    head: token.head,
                });
            }
        }
        let root = root.ok_or(AnalysisError::MissingRoot)?;

        let mut children = vec![Vec::new(); tokens.len() + 1];
        for token in tokens {
            children[token.head].push(token.id);
        }

        let tree = Self { root, children };
        tree.check_reachability(tokens.len())?;
        Ok(tree)
    }

    /// Heads form a function, so an unreachable token implies a cycle
    /// somewhere off the root's component.
    fn check_reachability(&self, token_count: usize) -> Result<()> {
        let mut visited = vec![false; token_count + 1];
        let mut stack = vec![self.root];
        visited[self.root] = true;
        let mut seen = 1;

        while let Some(id) = stack.pop() {
            for &child in self.children(id) {
                if !visited[child] {
                    visited[child] = true;
                    seen += 1;
                    stack.push(child);
                }
            }
        }

        if seen != token_count {
            let id = (1..=token_count)
                .find(|&id| !visited[id])
                .unwrap_or(token_count);
            return Err(AnalysisError::UnreachableToken { id });
        }
        Ok(())
    }

    /// Id of the sentence root (the token whose head is 0).
    pub fn root(&self) -> usize {
        self.root
    }

    /// Child ids of a token, in ascending order. Unknown ids have no
    /// children.
    pub fn children(&self, id: usize) -> &[usize] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Longest root-to-leaf path, counted in nodes: a lone root has depth 1.
    /// Walks the full tree, punctuation included.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 1)];

        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for &child in self.children(id) {
                stack.push((child, depth + 1));
            }
        }

        max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Token;

    fn make_token(id: usize, head: usize) -> Token {
        Token::new(id, format!("w{id}"), "NOUN", head, "dep")
    }

    #[test]
    fn test_children_are_ordered_by_id() {
        let tokens = vec![make_token(1, 2), make_token(2, 0), make_token(3, 2)];
        let tree = DepTree::build(&tokens).unwrap();
        assert_eq!(tree.root(), 2);
        assert_eq!(tree.children(2), &[1, 3]);
        assert_eq!(tree.children(1), &[] as &[usize]);
    }

    #[test]
    fn test_depth_of_single_token_is_one() {
        let tree = DepTree::build(&[make_token(1, 0)]).unwrap();
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn test_depth_of_chain() {
        let tokens = vec![make_token(1, 0), make_token(2, 1), make_token(3, 2)];
        let tree = DepTree::build(&tokens).unwrap();
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn test_depth_counts_punctuation() {
        let tokens = vec![
            Token::new(1, "Hi", "INTJ", 0, "root"),
            Token::new(2, "!", "PUNCT", 1, "punct"),
        ];
        let tree = DepTree::build(&tokens).unwrap();
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn test_missing_root_is_rejected() {
        let tokens = vec![make_token(1, 2), make_token(2, 1)];
        assert!(matches!(
            DepTree::build(&tokens),
            Err(AnalysisError::MissingRoot)
        ));
    }

    #[test]
    fn test_multiple_roots_are_rejected() {
        let tokens = vec![make_token(1, 0), make_token(2, 0)];
        assert!(matches!(
            DepTree::build(&tokens),
            Err(AnalysisError::MultipleRoots { first: 1, second: 2 })
        ));
    }

    #[test]
    fn test_head_out_of_range_is_rejected() {
        let tokens = vec![make_token(1, 0), make_token(2, 9)];
        assert!(matches!(
            DepTree::build(&tokens),
            Err(AnalysisError::HeadOutOfRange { id: 2, head: 9 })
        ));
    }

    #[test]
    fn test_non_sequential_ids_are_rejected() {
        let tokens = vec![make_token(1, 0), make_token(5, 1)];
        assert!(matches!(
            DepTree::build(&tokens),
            Err(AnalysisError::NonSequentialIds { position: 2, id: 5 })
        ));
    }

    #[test]
    fn test_cycle_leaves_tokens_unreachable() {
        let tokens = vec![make_token(1, 0), make_token(2, 3), make_token(3, 2)];
        assert!(matches!(
            DepTree::build(&tokens),
            Err(AnalysisError::UnreachableToken { id: 2 })
        ));
    }
}
