//! Generator configuration.
//!
//! Handles loading, validating, and merging `listing-page.toml`. Stock
//! defaults reproduce the layout of a Hugo site using the `berbera` theme, so
//! running without any config file works out of the box:
//!
//! ```text
//! site/
//! ├── listing-page.toml                       # Optional overrides
//! ├── content/                                # Content root
//! │   ├── authors/                            # Excluded by default
//! │   ├── conf_a/                             # Category
//! │   │   ├── 2020/                           # Sub-category
//! │   │   └── 2021/
//! │   └── conf_b/
//! │       └── 2019/
//! └── themes/berbera/layouts/
//!     ├── index_intro.html                    # Intro fragment (input)
//!     └── index.html                          # Generated listing (output)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_root = "content"
//! intro = "themes/berbera/layouts/index_intro.html"
//! output = "themes/berbera/layouts/index.html"
//!
//! [exclude]
//! categories = ["authors", ".ipynb_checkpoints"]
//! subcategories = [".ipynb_checkpoints"]
//!
//! [template]
//! block = "main"
//! show_icon = true
//! icon_param = "info.sport_icon"
//! icon_class_prefix = "fas fa-"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! [template]
//! show_icon = false
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "listing-page.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Generator configuration loaded from `listing-page.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Root of the content tree (categories are its direct subdirectories).
    pub content_root: PathBuf,
    /// Pre-built HTML snippet copied verbatim after the opening wrapper.
    pub intro: PathBuf,
    /// Destination template file, replaced on every successful run.
    pub output: PathBuf,
    /// Directory names left out of the listing.
    pub exclude: ExcludeConfig,
    /// Knobs for the emitted Go template markup.
    pub template: TemplateConfig,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("content"),
            intro: PathBuf::from("themes/berbera/layouts/index_intro.html"),
            output: PathBuf::from("themes/berbera/layouts/index.html"),
            exclude: ExcludeConfig::default(),
            template: TemplateConfig::default(),
        }
    }
}

impl IndexConfig {
    /// Validate config values before any filesystem work happens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("content_root", &self.content_root),
            ("intro", &self.intro),
            ("output", &self.output),
        ] {
            let blank = value.as_os_str().is_empty()
                || value.to_str().is_some_and(|s| s.trim().is_empty());
            if blank {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if !is_identifier(&self.template.block) {
            return Err(ConfigError::Validation(format!(
                "template.block must be an identifier, got {:?}",
                self.template.block
            )));
        }
        if !self.template.icon_param.split('.').all(is_identifier) {
            return Err(ConfigError::Validation(format!(
                "template.icon_param must be a dotted field path like \"info.sport_icon\", got {:?}",
                self.template.icon_param
            )));
        }
        if self
            .template
            .icon_class_prefix
            .contains(['"', '<', '>'])
        {
            return Err(ConfigError::Validation(
                "template.icon_class_prefix must not contain '\"', '<' or '>'".into(),
            ));
        }
        Ok(())
    }
}

/// Names skipped while scanning the content tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExcludeConfig {
    /// Top-level directory names that are not categories.
    pub categories: Vec<String>,
    /// Second-level directory names that are not sub-categories.
    pub subcategories: Vec<String>,
}

impl Default for ExcludeConfig {
    fn default() -> Self {
        Self {
            categories: vec!["authors".to_string(), ".ipynb_checkpoints".to_string()],
            subcategories: vec![".ipynb_checkpoints".to_string()],
        }
    }
}

/// Settings for the emitted template markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateConfig {
    /// Name of the block declared by `{{ define "..." }}`.
    pub block: String,
    /// Whether each page link carries an icon element.
    pub show_icon: bool,
    /// Page front-matter field (under `.Params`) holding the icon name.
    pub icon_param: String,
    /// CSS class prefix placed before the icon name.
    pub icon_class_prefix: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            block: "main".to_string(),
            show_icon: true,
            icon_param: "info.sport_icon".to_string(),
            icon_class_prefix: "fas fa-".to_string(),
        }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(IndexConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<IndexConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: IndexConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file, falling back to stock defaults when the
/// file is absent.
pub fn load_config(path: &Path) -> Result<IndexConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    if overlay.is_some() {
        tracing::debug!("Loaded config from {}", path.display());
    }
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock config with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# listing-page configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.
#
# Paths are relative to the working directory. The --source, --intro and
# --output flags override the matching keys.

# Content root. Each subdirectory is a category, each of their
# subdirectories a sub-category.
content_root = "content"

# HTML snippet copied verbatim right after the opening <main> wrapper.
intro = "themes/berbera/layouts/index_intro.html"

# Generated template. Replaced atomically on every successful run.
output = "themes/berbera/layouts/index.html"

# ---------------------------------------------------------------------------
# Exclusions
# ---------------------------------------------------------------------------
[exclude]
# Top-level directories that are not listed as categories.
categories = ["authors", ".ipynb_checkpoints"]

# Second-level directories that are not listed as sub-categories.
subcategories = [".ipynb_checkpoints"]

# ---------------------------------------------------------------------------
# Template markup
# ---------------------------------------------------------------------------
[template]
# Block name for {{ define "..." }}.
block = "main"

# Render an icon next to every page title.
show_icon = true

# Front-matter field holding the icon name, read as {{ .Params.<field> }}.
icon_param = "info.sport_icon"

# CSS class prefix for the icon element.
icon_class_prefix = "fas fa-"
"##
}
