// tests/unit_discovery_tests.rs
mod common;

use case_runner::core::discovery::{DigitKey, discover, sort_numeric_aware};
use common::Suite;
use std::path::{Path, PathBuf};

fn names(paths: &[PathBuf], root: &Path) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect()
}

#[test]
fn test_numbered_cases_run_in_numeric_order() {
    let suite = Suite::new();
    for name in ["case10", "case2", "case1"] {
        suite.case("basic", name, "cat", "");
    }

    let found = discover(&suite.root(), "", "yml").unwrap();

    assert_eq!(
        names(&found, &suite.root()),
        vec!["basic/case1.yml", "basic/case2.yml", "basic/case10.yml"]
    );
}

#[test]
fn test_category_restricts_to_subdirectory() {
    let suite = Suite::new();
    suite.case("ffi", "call1", "cat", "");
    suite.case("ffi/nested", "call2", "cat", "");
    suite.case("syntax", "parse1", "cat", "");

    let found = discover(&suite.root(), "ffi", "yml").unwrap();

    assert_eq!(
        names(&found, &suite.root()),
        vec!["ffi/call1.yml", "ffi/nested/call2.yml"]
    );
}

#[test]
fn test_only_descriptor_extension_is_collected() {
    let suite = Suite::new();
    suite.case("", "only", "cat", "");

    let found = discover(&suite.root(), "", "yml").unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].extension().unwrap(), "yml");
}

#[test]
fn test_missing_category_yields_no_cases() {
    let suite = Suite::new();
    suite.case("basic", "case1", "cat", "");

    let found = discover(&suite.root(), "does-not-exist", "yml").unwrap();

    assert!(found.is_empty());
}

#[test]
fn test_sort_uses_every_digit_of_the_relative_path() {
    let root = PathBuf::from("/suite");
    let mut paths: Vec<PathBuf> = ["/suite/b/t3.yml", "/suite/a2/t1.yml", "/suite/a/t1.yml"]
        .iter()
        .map(PathBuf::from)
        .collect();

    sort_numeric_aware(&mut paths, &root);

    // Digit keys: 1, 3 and 21.
    assert_eq!(
        names(&paths, &root),
        vec!["a/t1.yml", "b/t3.yml", "a2/t1.yml"]
    );
}

#[test]
fn test_paths_without_digits_sort_first_and_lexically() {
    let root = PathBuf::from("/suite");
    let mut paths: Vec<PathBuf> = ["/suite/z1.yml", "/suite/beta.yml", "/suite/alpha.yml"]
        .iter()
        .map(PathBuf::from)
        .collect();

    sort_numeric_aware(&mut paths, &root);

    assert_eq!(
        names(&paths, &root),
        vec!["alpha.yml", "beta.yml", "z1.yml"]
    );
}

#[test]
fn test_digit_key_ordering() {
    assert!(DigitKey::of("case9") < DigitKey::of("case10"));
    assert_eq!(DigitKey::of("x000"), DigitKey::of("nodigits"));
}
