// SPDX-License-Identifier: MIT
//
// CSS renderer — one custom property per resolved color:
//
//   :root {
//     --vscode-editor-background: #1e1e1e;
//   }
//
// Identifier characters outside [A-Za-z0-9-] become `-`, so
// `editor.background` is `--vscode-editor-background`.

use std::fmt::Write as _;
use std::sync::LazyLock;

use n_theme::{ColorRegistry, EngineConfig};
use regex::Regex;

use crate::convert::ResolvedTheme;

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9-]").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssOptions {
    /// Selector the block is attached to.
    pub selector: String,
    /// Property prefix, without the leading `--`.
    pub prefix: String,
    /// Put each color's registry description in a comment above it.
    pub descriptions: bool,
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            selector: ":root".to_string(),
            prefix: "vscode".to_string(),
            descriptions: false,
        }
    }
}

impl CssOptions {
    /// Defaults, with the prefix taken from `config`.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            prefix: config.css_prefix.clone(),
            ..Self::default()
        }
    }
}

/// The custom-property name for `id`.
#[must_use]
pub fn property_name(prefix: &str, id: &str) -> String {
    format!("--{prefix}-{}", UNSAFE_CHARS.replace_all(id, "-"))
}

/// Render `theme` as a CSS block. `registry` supplies descriptions.
#[must_use]
pub fn render(theme: &ResolvedTheme, registry: &ColorRegistry, options: &CssOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {{", options.selector);
    for (id, color) in &theme.colors {
        if options.descriptions {
            if let Some(text) = registry.description(id).filter(|text| !text.is_empty()) {
                let _ = writeln!(out, "  /* {} */", text.replace("*/", "* /"));
            }
        }
        let _ = writeln!(out, "  {}: {color};", property_name(&options.prefix, id));
    }
    out.push_str("}\n");
    out
}
