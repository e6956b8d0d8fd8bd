//! Shared test utilities for the listing-page test suite.
//!
//! Builds throwaway content trees and asserts on scanned or rendered output.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = content_tree(&[("conf_a", &["2020", "2021"]), ("conf_b", &["2019"])]);
//! let tree = scan(tmp.path(), &ExcludeConfig::default()).unwrap();
//!
//! assert_tree_shape(&tree, &[
//!     ("conf_a", &["2020", "2021"]),
//!     ("conf_b", &["2019"]),
//! ]);
//! ```

use std::fs;
use tempfile::TempDir;

use crate::scan::ContentTree;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a temp directory holding one directory per category, each with
/// the given sub-category directories.
///
/// Directories are created in the order given, so tests can check that the
/// output does not depend on creation order.
pub fn content_tree(categories: &[(&str, &[&str])]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (category, subcategories) in categories {
        let category_dir = tmp.path().join(category);
        fs::create_dir_all(&category_dir).unwrap();
        for sub in *subcategories {
            fs::create_dir_all(category_dir.join(sub)).unwrap();
        }
    }
    tmp
}

// =========================================================================
// Tree assertions
// =========================================================================

/// Category names in tree order.
pub fn category_names(tree: &ContentTree) -> Vec<&str> {
    tree.categories.iter().map(|c| c.name.as_str()).collect()
}

/// Assert that the scanned tree matches an expected shape exactly.
///
/// Each entry is `(category, subcategories)`. Use `&[]` for a category with
/// no sub-categories.
pub fn assert_tree_shape(tree: &ContentTree, expected: &[(&str, &[&str])]) {
    let expected_names: Vec<&str> = expected.iter().map(|(c, _)| *c).collect();
    assert_eq!(category_names(tree), expected_names, "category names mismatch");

    for (category, subcategories) in expected {
        let actual = &tree
            .category(category)
            .unwrap_or_else(|| panic!("category '{category}' not found"))
            .subcategories;
        assert_eq!(
            actual,
            &subcategories.to_vec(),
            "sub-categories of '{category}' mismatch"
        );
    }
}

// =========================================================================
// Markup assertions
// =========================================================================

/// Number of non-overlapping occurrences of `needle` in `haystack`.
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
