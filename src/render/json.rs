// SPDX-License-Identifier: MIT
//
// JSON renderer — a resolved theme back in theme-document shape:
//
//   { "name", "type", "colors": { id: color }, "tokenColors": [...],
//     "semanticHighlighting" }
//
// `type` uses the canonical theme-type string for the variant. Only
// resolved colors appear; undefined ones are left out entirely.

use n_color::Color;
use n_theme::{TokenRule, TokenSettings};
use serde_json::{Map, Value, json};

use crate::convert::ResolvedTheme;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonOptions {
    /// Write `#rrggbbaa` colors as `#aarrggbb`.
    pub alpha_first: bool,
}

/// Render `theme` as a JSON value.
#[must_use]
pub fn render(theme: &ResolvedTheme, options: JsonOptions) -> Value {
    let colors: Map<String, Value> = theme
        .colors
        .iter()
        .map(|(id, color)| (id.clone(), Value::String(format_color(color, options))))
        .collect();

    let mut document = Map::new();
    document.insert("name".into(), json!(theme.name));
    document.insert("type".into(), json!(theme.appearance.theme_type()));
    document.insert("colors".into(), Value::Object(colors));
    document.insert(
        "tokenColors".into(),
        Value::Array(theme.token_rules.iter().map(|rule| token_rule(rule, options)).collect()),
    );
    if let Some(enabled) = theme.semantic_highlighting {
        document.insert("semanticHighlighting".into(), json!(enabled));
    }
    Value::Object(document)
}

/// Render `theme` as pretty-printed JSON text.
///
/// # Errors
///
/// Only if serialization itself fails, which a `Value` tree never does in
/// practice.
pub fn render_string(theme: &ResolvedTheme, options: JsonOptions) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&render(theme, options))
}

fn token_rule(rule: &TokenRule, options: JsonOptions) -> Value {
    let mut out = Map::new();
    if let Some(name) = &rule.name {
        out.insert("name".into(), json!(name));
    }
    if !rule.scope.is_empty() {
        out.insert("scope".into(), json!(rule.scope));
    }
    out.insert("settings".into(), settings(&rule.settings, options));
    Value::Object(out)
}

fn settings(settings: &TokenSettings, options: JsonOptions) -> Value {
    let mut out = Map::new();
    if let Some(fg) = &settings.foreground {
        out.insert("foreground".into(), json!(format_color(fg, options)));
    }
    if let Some(bg) = &settings.background {
        out.insert("background".into(), json!(format_color(bg, options)));
    }
    if let Some(style) = settings.font_style {
        out.insert("fontStyle".into(), json!(style.to_theme_string()));
    }
    Value::Object(out)
}

/// Move the alpha byte of an 8-digit hex color to the front when asked.
fn format_color(color: &str, options: JsonOptions) -> String {
    if !options.alpha_first || color.len() != 9 || Color::hex(color).is_none() {
        return color.to_string();
    }
    format!("#{}{}", &color[7..], &color[1..7])
}
