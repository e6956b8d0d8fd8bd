//! # Listing Page
//!
//! Generates the homepage layout of a Hugo site from its content directory.
//! Top-level content directories become categories, their subdirectories
//! become cards, and each card carries a Hugo `range` loop that lists the
//! pages of that directory when the site is built.
//!
//! ```text
//! content/conf_a/2020/   →   <h3>conf_a</h3>
//!                            <h4>2020</h4> {{ range (where .Pages "File.Dir" "in" "/conf_a/2020/").Reverse }} ...
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `listing-page.toml` loading, merging over stock defaults, validation |
//! | [`scan`] | Reads the two-level content tree into a sorted, filtered [`scan::ContentTree`] |
//! | [`directive`] | Go template actions that pass through maud unescaped |
//! | [`generate`] | Renders the layout with Maud and replaces the output file atomically |
//! | [`output`] | CLI output formatting for scan and generate results |
//!
//! # Design Decisions
//!
//! ## Sorted, Not Listed
//!
//! Directory listing order is platform-dependent. Categories and cards are
//! sorted by name so the same tree always yields the same bytes.
//!
//! ## Template Actions Are Opaque
//!
//! The generated file is a template for another engine. Its `{{ ... }}`
//! actions are built by [`directive::TemplateAction`] and rendered verbatim;
//! everything else goes through Maud's escaping.
//!
//! ## All-or-Nothing Writes
//!
//! Inputs are read in full before the output is touched, and the output is
//! replaced with a rename. A failed run never leaves a half-written layout.

pub mod config;
pub mod directive;
pub mod generate;
pub mod output;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
