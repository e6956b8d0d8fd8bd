//! CLI output formatting.
//!
//! Output is a content inventory: categories and their sub-categories with
//! positional indices, the way they will appear on the listing page, with
//! the content-relative directory each card lists shown as context.
//!
//! ## Scan
//!
//! ```text
//! Categories
//! 001 conf_a (2 cards)
//!     001 2020 → /conf_a/2020/
//!     002 2021 → /conf_a/2021/
//! 002 conf_b (1 card)
//!     001 2019 → /conf_b/2019/
//! ```
//!
//! ## Generate
//!
//! ```text
//! Listing → themes/berbera/layouts/index.html
//! Generated 2 categories, 3 cards (1843 bytes)
//! ```
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::directive::content_dir;
use crate::generate::GenerateReport;
use crate::scan::ContentTree;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn count_noun(n: usize, singular: &str, plural: &str) -> String {
    format!("{n} {}", if n == 1 { singular } else { plural })
}

// ============================================================================
// Scan output
// ============================================================================

/// Format the discovered tree, one line per category and card.
pub fn format_scan_output(tree: &ContentTree, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    if tree.categories.is_empty() {
        lines.push(format!("No categories found in {}", source_root.display()));
        return lines;
    }

    lines.push("Categories".to_string());
    for (i, category) in tree.categories.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            category.name,
            count_noun(category.subcategories.len(), "card", "cards")
        ));
        for (j, sub) in category.subcategories.iter().enumerate() {
            lines.push(format!(
                "{}{} {} → {}",
                indent(1),
                format_index(j + 1),
                sub,
                content_dir(&category.name, sub)
            ));
        }
    }
    lines
}

pub fn print_scan_output(tree: &ContentTree, source_root: &Path) {
    for line in format_scan_output(tree, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate output
// ============================================================================

/// Format the summary of a successful generation run.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    vec![
        format!("Listing → {}", report.output.display()),
        format!(
            "Generated {}, {} ({} bytes)",
            count_noun(report.tree.categories.len(), "category", "categories"),
            count_noun(report.tree.subcategory_count(), "card", "cards"),
            report.bytes
        ),
    ]
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}
