// Integration tests for structural comparison

use astsim::api;
use astsim::compare::{measure, normalize, similarity, subtree_size, tree_distance};
use astsim::parser::parse_source;

const SAMPLES: &[&str] = &[
    "int a = 5; int b = a + 3;",
    "int x = 1; while (x < 10) { x = x * 2; }",
    "float f = 1.5; if (f > 0) { f = -f; } else { f = f / 2; }",
    "int n = 3; for (int i = 0; i < n; i + 1) { n = n - 1; }",
    "string s = \"hi\"; s;",
];

#[test]
fn test_normalization_is_idempotent() {
    for source in SAMPLES {
        let program = parse_source(source).expect("Parsing failed");
        let once = normalize(&program);
        let twice = normalize(&once);
        assert_eq!(once.to_tree(), twice.to_tree(), "source: {}", source);
    }
}

#[test]
fn test_similarity_is_symmetric() {
    for first in SAMPLES {
        for second in SAMPLES {
            let a = parse_source(first).expect("Parsing failed");
            let b = parse_source(second).expect("Parsing failed");
            assert_eq!(
                similarity(Some(&a), Some(&b)),
                similarity(Some(&b), Some(&a)),
                "{} vs {}",
                first,
                second
            );
        }
    }
}

#[test]
fn test_identity_scores_full() {
    for source in SAMPLES {
        let program = parse_source(source).expect("Parsing failed");
        assert_eq!(similarity(Some(&program), Some(&program)), 100.0);
    }
}

#[test]
fn test_empty_inputs_score_zero() {
    assert_eq!(similarity(None, None), 0.0);

    let result = api::compare("", "");
    assert_eq!(result.similarity, 0.0);
    assert!(result.error.is_some());

    let result = api::compare("int a = ;", "int a = ;");
    assert_eq!(result.similarity, 0.0);
}

#[test]
fn test_rename_invariance() {
    let result = api::compare("int a = 5; int b = a + 3;", "int x = 5; int y = x + 3;");
    assert_eq!(result.similarity, 100.0);
    assert_eq!(result.distance, 0);
}

#[test]
fn test_literal_value_invariance() {
    let result = api::compare("int a = 5;", "int a = 999;");
    assert_eq!(result.similarity, 100.0);
}

#[test]
fn test_literal_type_is_significant() {
    let result = api::compare("int a = 5;", "string a = \"5\";");
    assert!(result.error.is_none());
    assert!(result.similarity < 100.0);
}

#[test]
fn test_one_missing_program() {
    let program = parse_source("int a;").expect("Parsing failed");
    let measured = measure(Some(&program), None);

    assert_eq!(measured.score, 0.0);
    assert_eq!(measured.distance, subtree_size(Some(&program.to_tree())));
}

#[test]
fn test_distance_bounded_by_sizes() {
    for first in SAMPLES {
        for second in SAMPLES {
            let a = normalize(&parse_source(first).expect("Parsing failed")).to_tree();
            let b = normalize(&parse_source(second).expect("Parsing failed")).to_tree();
            let distance = tree_distance(Some(&a), Some(&b));
            assert!(distance <= subtree_size(Some(&a)) + subtree_size(Some(&b)));
        }
    }
}

#[test]
fn test_score_stays_in_range() {
    let result = api::compare(
        "int a;",
        "int a = 1; while (a < 100) { if (a > 50) { a = a * 3; } else { a = a + 7; } }",
    );
    assert!(result.similarity >= 0.0 && result.similarity <= 100.0);
    assert!(result.similarity < 50.0);
}
