//! Go template actions embedded in generated markup.
//!
//! The listing page is itself a Hugo layout: each card carries a
//! `{{ range ... }}` loop that Hugo evaluates later, at site build time. Those
//! actions contain characters maud would escape (`"` inside the `where`
//! arguments), so they travel as [`TemplateAction`] values that render
//! verbatim instead of as plain strings.
//!
//! ```text
//! {{ define "main" }}
//! {{ range (where .Pages "File.Dir" "in" "/conf_a/2020/").Reverse }}
//! {{ .Permalink }}  {{ .Title }}  {{ .Params.info.sport_icon }}
//! {{ end }}
//! ```
//!
//! Nothing here parses or evaluates the actions.

use maud::{PreEscaped, Render};
use std::fmt;

/// A single `{{ ... }}` action, emitted byte-for-byte into the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateAction(String);

impl TemplateAction {
    /// `{{ define "<block>" }}`, opening a named block.
    pub fn define(block: &str) -> Self {
        Self(format!("{{{{ define {} }}}}", go_string(block)))
    }

    /// `{{ end }}`, closing the innermost `define` or `range`.
    pub fn end() -> Self {
        Self("{{ end }}".to_string())
    }

    /// Loop over every page whose directory is `dir`, newest first.
    pub fn range_pages_in(dir: &str) -> Self {
        Self(format!(
            "{{{{ range (where .Pages \"File.Dir\" \"in\" {}).Reverse }}}}",
            go_string(dir)
        ))
    }

    /// `{{ .Permalink }}` of the current page.
    pub fn permalink() -> Self {
        Self("{{ .Permalink }}".to_string())
    }

    /// `{{ .Title }}` of the current page.
    pub fn title() -> Self {
        Self("{{ .Title }}".to_string())
    }

    /// `{{ .Params.<field> }}` of the current page. `field` is a dotted path
    /// validated by the config layer.
    pub fn param(field: &str) -> Self {
        Self(format!("{{{{ .Params.{field} }}}}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Render for TemplateAction {
    fn render_to(&self, buffer: &mut String) {
        PreEscaped(self.0.as_str()).render_to(buffer);
    }
}

/// Text that must not be read as a template action.
///
/// HTML-escaped like any maud text, then `{` and `}` become character
/// references so a directory name such as `a{{b` cannot open an action.
/// Browsers decode the references back to the original name.
#[derive(Debug, Clone, Copy)]
pub struct InertText<'a>(pub &'a str);

impl Render for InertText<'_> {
    fn render_to(&self, buffer: &mut String) {
        let mut escaped = String::with_capacity(self.0.len());
        self.0.render_to(&mut escaped);
        for c in escaped.chars() {
            match c {
                '{' => buffer.push_str("&#123;"),
                '}' => buffer.push_str("&#125;"),
                _ => buffer.push(c),
            }
        }
    }
}

/// The content-relative directory Hugo reports as `File.Dir` for pages of a
/// sub-category: `/<category>/<subcategory>/`.
pub fn content_dir(category: &str, subcategory: &str) -> String {
    format!("/{category}/{subcategory}/")
}

/// Quote `s` as a Go interpreted string literal.
fn go_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
