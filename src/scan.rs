//! Content tree discovery.
//!
//! Reads the two directory levels below the content root that the listing
//! page is built from. Only directory *names* are consumed; the pages inside
//! sub-categories are never opened, they are referenced symbolically by the
//! template loop emitted in [`crate::generate`].
//!
//! ```text
//! content/                # Content root
//! ├── _index.md           # File: skipped with a warning
//! ├── authors/            # Excluded category
//! ├── conf_a/             # Category
//! │   ├── 2020/           # Sub-category
//! │   ├── 2021/
//! │   └── .ipynb_checkpoints/   # Excluded sub-category
//! └── conf_b/
//!     └── 2019/
//! ```
//!
//! ## Ordering
//!
//! Categories and sub-categories are sorted by name. Filesystem listing
//! order differs between platforms, and the output must be byte-identical
//! for identical trees.

use crate::config::ExcludeConfig;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Content root not found: {0}")]
    RootNotFound(PathBuf),
    #[error("Content root is not a directory: {0}")]
    RootNotDirectory(PathBuf),
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Categories discovered under the content root, sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentTree {
    pub categories: Vec<Category>,
}

/// A top-level content directory and its sub-category names, sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub subcategories: Vec<String>,
}

impl ContentTree {
    /// Look up a category by name.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Total number of sub-categories, i.e. cards on the page.
    pub fn subcategory_count(&self) -> usize {
        self.categories.iter().map(|c| c.subcategories.len()).sum()
    }
}

/// Scan `root` into a [`ContentTree`], leaving out excluded names.
pub fn scan(root: &Path, exclude: &ExcludeConfig) -> Result<ContentTree, ScanError> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(ScanError::RootNotDirectory(root.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ScanError::RootNotFound(root.to_path_buf()));
        }
        Err(source) => {
            return Err(ScanError::Io {
                path: root.to_path_buf(),
                source,
            });
        }
    }

    let mut categories = Vec::new();
    for name in collect_dir_names(root, &exclude.categories)? {
        let subcategories = collect_dir_names(&root.join(&name), &exclude.subcategories)?;
        debug!(
            "Category {name}: {} sub-categories",
            subcategories.len()
        );
        categories.push(Category {
            name,
            subcategories,
        });
    }

    Ok(ContentTree { categories })
}

/// Names of the subdirectories of `path`, sorted, minus `excluded`.
///
/// Plain files and entries whose names are not valid UTF-8 are skipped with
/// a warning.
fn collect_dir_names(path: &Path, excluded: &[String]) -> Result<Vec<String>, ScanError> {
    let io_err = |source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(path).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let entry_path = entry.path();

        let Ok(name) = entry.file_name().into_string() else {
            warn!("Skipping {}: name is not valid UTF-8", entry_path.display());
            continue;
        };
        if excluded.contains(&name) {
            debug!("Excluded {}", entry_path.display());
            continue;
        }
        if !entry_path.is_dir() {
            warn!("Skipping {}: not a directory", entry_path.display());
            continue;
        }
        names.push(name);
    }

    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;

    #[test]
    fn scans_two_level_tree() {
        let tmp = content_tree(&[("conf_a", &["2020", "2021"]), ("conf_b", &["2019"])]);
        let tree = scan(tmp.path(), &ExcludeConfig::default()).unwrap();

        assert_tree_shape(&tree, &[("conf_a", &["2020", "2021"]), ("conf_b", &["2019"])]);
        assert_eq!(tree.subcategory_count(), 3);
    }

    #[test]
    fn sorts_by_name_regardless_of_creation_order() {
        let tmp = content_tree(&[("zeta", &["b", "a"]), ("alpha", &["2", "10", "1"])]);
        let tree = scan(tmp.path(), &ExcludeConfig::default()).unwrap();

        assert_tree_shape(&tree, &[("alpha", &["1", "10", "2"]), ("zeta", &["a", "b"])]);
    }

    #[test]
    fn excludes_authors_and_checkpoints_by_default() {
        let tmp = content_tree(&[
            ("authors", &["alice"]),
            (".ipynb_checkpoints", &[]),
            ("conf_a", &["2020", ".ipynb_checkpoints"]),
        ]);
        let tree = scan(tmp.path(), &ExcludeConfig::default()).unwrap();

        assert_tree_shape(&tree, &[("conf_a", &["2020"])]);
    }

    #[test]
    fn only_excluded_categories_yields_empty_tree() {
        let tmp = content_tree(&[("authors", &["alice", "bob"])]);
        let tree = scan(tmp.path(), &ExcludeConfig::default()).unwrap();
        assert!(tree.categories.is_empty());
    }

    #[test]
    fn custom_exclusions_apply_per_level() {
        let tmp = content_tree(&[("drafts", &["x"]), ("conf_a", &["2020", "wip"])]);
        let exclude = ExcludeConfig {
            categories: vec!["drafts".into()],
            subcategories: vec!["wip".into()],
        };
        let tree = scan(tmp.path(), &exclude).unwrap();

        assert_tree_shape(&tree, &[("conf_a", &["2020"])]);
    }

    #[test]
    fn subcategory_exclusions_do_not_apply_to_categories() {
        let tmp = content_tree(&[("wip", &["2020"])]);
        let exclude = ExcludeConfig {
            categories: vec![],
            subcategories: vec!["wip".into()],
        };
        let tree = scan(tmp.path(), &exclude).unwrap();
        assert_tree_shape(&tree, &[("wip", &["2020"])]);
    }

    #[test]
    fn files_are_skipped_at_both_levels() {
        let tmp = content_tree(&[("conf_a", &["2020"])]);
        fs::write(tmp.path().join("_index.md"), "---\ntitle: Home\n---\n").unwrap();
        fs::write(tmp.path().join("conf_a/_index.md"), "").unwrap();
        fs::write(tmp.path().join("conf_a/2020/talk.md"), "").unwrap();

        let tree = scan(tmp.path(), &ExcludeConfig::default()).unwrap();
        assert_tree_shape(&tree, &[("conf_a", &["2020"])]);
    }

    #[test]
    fn category_without_subdirectories_is_kept() {
        let tmp = content_tree(&[("empty", &[])]);
        let tree = scan(tmp.path(), &ExcludeConfig::default()).unwrap();
        assert_tree_shape(&tree, &[("empty", &[])]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_names_are_skipped_at_both_levels() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = content_tree(&[("conf_a", &["2020"])]);
        fs::create_dir(tmp.path().join(OsStr::from_bytes(b"\xff"))).unwrap();
        fs::create_dir(tmp.path().join("conf_a").join(OsStr::from_bytes(b"20\xfe21"))).unwrap();

        let tree = scan(tmp.path(), &ExcludeConfig::default()).unwrap();
        assert_tree_shape(&tree, &[("conf_a", &["2020"])]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = scan(&tmp.path().join("nope"), &ExcludeConfig::default());
        assert!(matches!(result, Err(ScanError::RootNotFound(_))));
    }

    #[test]
    fn file_as_root_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let file = tmp.path().join("content");
        fs::write(&file, "").unwrap();
        let result = scan(&file, &ExcludeConfig::default());
        assert!(matches!(result, Err(ScanError::RootNotDirectory(_))));
    }

    #[test]
    fn category_lookup() {
        let tmp = content_tree(&[("conf_a", &["2020"])]);
        let tree = scan(tmp.path(), &ExcludeConfig::default()).unwrap();
        assert_eq!(tree.category("conf_a").unwrap().subcategories, vec!["2020"]);
        assert!(tree.category("conf_b").is_none());
    }

    #[test]
    fn serializes_to_json() {
        let tmp = content_tree(&[("conf_a", &["2020"])]);
        let tree = scan(tmp.path(), &ExcludeConfig::default()).unwrap();
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "categories": [{ "name": "conf_a", "subcategories": ["2020"] }]
            })
        );
    }
}
