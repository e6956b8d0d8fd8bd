//! Listing page generation.
//!
//! Renders the scanned [`ContentTree`] into a Hugo layout and replaces the
//! destination file with it.
//!
//! ## Output Structure
//!
//! ```text
//! {{ define "main" }}
//! <main><div class="homepage">
//!   ...intro fragment, verbatim...
//!   <div class="row" id="conf_a">            ← one header row per category
//!     <div class="col-sm-12"><h3 class="category_header">conf_a</h3></div>
//!   </div>
//!   <div class="row">                        ← one card row per sub-category
//!     <div class="col-sm-12"><div class="card">
//!       <h4 class="card-header">2020</h4>
//!       <div class="card-body"><ul>
//!         {{ range (where .Pages "File.Dir" "in" "/conf_a/2020/").Reverse }}
//!         <li><a href="{{ .Permalink }}">{{ .Title }} <i class="fas fa-{{ .Params.info.sport_icon }}"></i></a></li>
//!         {{ end }}
//!       </ul></div>
//!     </div></div>
//!   </div>
//! </div></main>
//! {{ end }}
//! ```
//!
//! The real output carries no indentation; maud renders elements back to
//! back, followed by a single trailing newline.
//!
//! ## Failure Behavior
//!
//! Every input is read before anything is written, and the destination is
//! replaced with an atomic rename. A failed run leaves the previous file
//! untouched and never creates a partial one.

use crate::config::{IndexConfig, TemplateConfig};
use crate::directive::{InertText, TemplateAction, content_dir};
use crate::scan::{self, ContentTree, ScanError};
use maud::{Markup, PreEscaped, html};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Cannot read intro fragment {path}: {source}")]
    Intro {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What a successful run produced.
#[derive(Debug)]
pub struct GenerateReport {
    pub tree: ContentTree,
    pub output: PathBuf,
    pub bytes: usize,
}

/// Scan the content root, render the listing, and write it to
/// `config.output`.
pub fn generate(config: &IndexConfig) -> Result<GenerateReport, GenerateError> {
    let content_root = config.content_root.as_path();
    let intro_path = config.intro.as_path();
    let output = config.output.clone();

    let tree = scan::scan(content_root, &config.exclude)?;
    let intro = fs::read_to_string(intro_path).map_err(|source| GenerateError::Intro {
        path: intro_path.to_path_buf(),
        source,
    })?;

    let page = render_document(&tree, &intro, &config.template);
    write_atomic(&output, &page).map_err(|source| GenerateError::Write {
        path: output.clone(),
        source,
    })?;

    info!(
        "Wrote {} ({} categories, {} cards)",
        output.display(),
        tree.categories.len(),
        tree.subcategory_count()
    );
    Ok(GenerateReport {
        tree,
        output,
        bytes: page.len(),
    })
}

/// The complete file contents: rendered page plus trailing newline.
pub fn render_document(tree: &ContentTree, intro: &str, template: &TemplateConfig) -> String {
    let mut page = render_page(tree, intro, template).into_string();
    page.push('\n');
    page
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the whole layout: block definition, wrappers, intro, categories.
pub fn render_page(tree: &ContentTree, intro: &str, template: &TemplateConfig) -> Markup {
    html! {
        (TemplateAction::define(&template.block))
        main {
            div.homepage {
                (PreEscaped(intro))
                @for category in &tree.categories {
                    (category_header(&category.name))
                    @for subcategory in &category.subcategories {
                        (subcategory_card(&category.name, subcategory, template))
                    }
                }
            }
        }
        (TemplateAction::end())
    }
}

/// Heading row for a category; its `id` doubles as an in-page anchor.
fn category_header(name: &str) -> Markup {
    html! {
        div.row id=(InertText(name)) {
            div class="col-sm-12" {
                h3.category_header { (InertText(name)) }
            }
        }
    }
}

/// Card for a sub-category, listing its pages newest first at Hugo build time.
fn subcategory_card(category: &str, subcategory: &str, template: &TemplateConfig) -> Markup {
    let dir = content_dir(category, subcategory);
    debug!("Card {dir}");
    html! {
        div.row {
            div class="col-sm-12" {
                div.card {
                    h4.card-header { (InertText(subcategory)) }
                    div.card-body {
                        ul {
                            (TemplateAction::range_pages_in(&dir))
                            li {
                                a href=(TemplateAction::permalink()) {
                                    (TemplateAction::title())
                                    @if template.show_icon {
                                        " "
                                        i class={ (template.icon_class_prefix) (TemplateAction::param(&template.icon_param)) } {}
                                    }
                                }
                            }
                            (TemplateAction::end())
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Output
// ============================================================================

/// Replace `dest` with `contents` via a sibling temp file and a rename.
///
/// The destination's parent directory must already exist. An existing
/// destination keeps its permissions; a read-only one is refused.
pub fn write_atomic(dest: &Path, contents: &str) -> io::Result<()> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let existing = fs::metadata(dest).ok();
    if let Some(meta) = &existing
        && meta.permissions().readonly()
    {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "destination is read-only",
        ));
    }

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;

    match existing {
        Some(meta) => tmp.as_file().set_permissions(meta.permissions())?,
        None => set_default_permissions(tmp.as_file())?,
    }

    tmp.persist(dest).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn set_default_permissions(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_file: &fs::File) -> io::Result<()> {
    Ok(())
}
