//! Structural similarity between two programs
//!
//! Both programs are normalized independently (see [`normalize`]) and their
//! uniform trees compared with the ordered edit distance in [`distance`].
//! The score is `(1 - distance / max(size1, size2)) * 100`, clamped to
//! `[0, 100]`.
//!
//! Absent programs score 0, including when *both* are absent: two empty
//! inputs are not considered similar.

pub mod distance;
pub mod normalize;

pub use distance::{subtree_size, tree_distance};
pub use normalize::{normalize, Normalizer};

use crate::config::MAX_SIMILARITY;
use crate::parser::ast::Program;
use serde::Serialize;
use tracing::debug;

/// Result of measuring two programs against each other
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Similarity {
    /// Percentage in `[0, 100]`
    pub score: f64,
    /// Edit distance between the normalized trees
    pub distance: usize,
    pub size1: usize,
    pub size2: usize,
}

/// Normalize both programs and compute distance and score.
pub fn measure(first: Option<&Program>, second: Option<&Program>) -> Similarity {
    let tree1 = first.map(Program::to_tree);
    let tree2 = second.map(Program::to_tree);
    let size1 = subtree_size(tree1.as_ref());
    let size2 = subtree_size(tree2.as_ref());

    if size1 == 0 || size2 == 0 {
        return Similarity {
            score: 0.0,
            distance: size1 + size2,
            size1,
            size2,
        };
    }

    let normalized1 = first.map(|program| normalize(program).to_tree());
    let normalized2 = second.map(|program| normalize(program).to_tree());
    let distance = tree_distance(normalized1.as_ref(), normalized2.as_ref());

    let largest = size1.max(size2) as f64;
    let score = ((1.0 - distance as f64 / largest) * MAX_SIMILARITY).clamp(0.0, MAX_SIMILARITY);
    debug!(size1, size2, distance, score, "measured similarity");

    Similarity {
        score,
        distance,
        size1,
        size2,
    }
}

/// Similarity percentage of two programs.
pub fn similarity(first: Option<&Program>, second: Option<&Program>) -> f64 {
    measure(first, second).score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    fn score(a: &str, b: &str) -> f64 {
        let first = parse_source(a).unwrap();
        let second = parse_source(b).unwrap();
        similarity(Some(&first), Some(&second))
    }

    #[test]
    fn test_identity_scores_full() {
        let source = "int a = 5; while (a > 0) { a = a - 1; }";
        assert_eq!(score(source, source), 100.0);
    }

    #[test]
    fn test_rename_invariance() {
        assert_eq!(
            score("int a = 5; int b = a + 3;", "int x = 5; int y = x + 3;"),
            100.0
        );
    }

    #[test]
    fn test_literal_invariance() {
        assert_eq!(score("int a = 5;", "int a = 999;"), 100.0);
        assert!(score("int a = 5;", "string a = \"5\";") < 100.0);
    }

    #[test]
    fn test_absent_programs_score_zero() {
        let program = parse_source("int a;").unwrap();
        assert_eq!(similarity(None, None), 0.0);
        assert_eq!(similarity(Some(&program), None), 0.0);
        assert_eq!(similarity(None, Some(&program)), 0.0);
    }

    #[test]
    fn test_score_uses_larger_size() {
        // program, statement_list, declaration, type, identifier = 5 nodes
        let first = parse_source("int a;").unwrap();
        // + second declaration subtree of 3 nodes
        let second = parse_source("int a; int b;").unwrap();
        let result = measure(Some(&first), Some(&second));

        assert_eq!(result.size1, 5);
        assert_eq!(result.size2, 8);
        assert_eq!(result.distance, 3);
        assert!((result.score - 62.5).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let a = "int a = 1; if (a < 2) { a = a * 3; } else { a = 0; }";
        let b = "float f = 1.0; while (f < 2.0) { f = f + 1.0; }";
        assert_eq!(score(a, b), score(b, a));
    }

    #[test]
    fn test_score_is_clamped() {
        let tiny = "a;";
        let large = "int a = 1; int b = 2; int c = a + b; while (c > 0) { c = c - 1; }";
        let value = score(tiny, large);
        assert!((0.0..=100.0).contains(&value));
    }
}
