//! End-to-end: theme documents in, rendered JSON and CSS out.

use n_chroma::render::css::{self, CssOptions};
use n_chroma::render::json::{self, JsonOptions};
use n_chroma::Converter;
use n_theme::{Diagnostic, EngineConfig, MemorySource, ThemeError};
use pretty_assertions::assert_eq;
use tracing_test::traced_test;

const BASE: &str = r##"{
    // Shared colors for the family.
    "name": "Harbor Base",
    "type": "dark",
    "colors": {
        "editor.background": "#0B1A2A",
        "button.background": "#0e639c",
    },
    "tokenColors": [
        { "scope": "comment", "settings": { "foreground": "#5c6f80", "fontStyle": "italic" } },
        { "scope": "string", "settings": { "foreground": "#a3d9a5" } }
    ]
}"##;

const NIGHT: &str = r##"{
    "name": "Harbor Night",
    "include": "./base.json",
    "colors": {
        "editor.background": "#07121d",
        "harbor.accent": "focusBorder"
    },
    "tokenColors": [
        { "scope": "keyword", "settings": { "foreground": "#ffcb6b" } }
    ]
}"##;

fn source() -> MemorySource {
    MemorySource::new()
        .with("themes/base.json", BASE)
        .with("themes/night.json", NIGHT)
}

fn converter() -> Converter {
    Converter::new(EngineConfig::default()).unwrap()
}

#[test]
fn derived_theme_resolves_through_its_base() {
    let resolved = converter().load_and_convert(source(), "themes/night.json").unwrap();

    assert_eq!(resolved.name, "Harbor Night");
    assert_eq!(resolved.appearance.theme_type(), "dark");
    assert_eq!(resolved.get("editor.background"), Some("#07121d"));
    assert_eq!(resolved.get("editorGutter.background"), Some("#07121d"));
    assert_eq!(resolved.get("button.hoverBackground"), Some("#1177bb"));
    assert_eq!(resolved.get("harbor.accent"), Some("#007fd4"));
    assert_eq!(resolved.get("contrastBorder"), None);

    let scopes: Vec<&str> = resolved.token_rules.iter().map(|r| r.scope[0].as_str()).collect();
    assert_eq!(scopes, vec!["keyword", "comment", "string"]);
    assert!(resolved.diagnostics.is_empty());
}

#[test]
fn json_output_omits_undefined_colors() {
    let resolved = converter().load_and_convert(source(), "themes/night.json").unwrap();
    let value = json::render(&resolved, JsonOptions::default());

    assert_eq!(value["type"], "dark");
    assert_eq!(value["colors"]["editor.background"], "#07121d");
    assert!(value["colors"].get("contrastBorder").is_none());
    assert_eq!(value["tokenColors"][1]["settings"]["fontStyle"], "italic");
}

#[test]
fn css_output_has_one_property_per_color() {
    let converter = converter();
    let resolved = converter.load_and_convert(source(), "themes/night.json").unwrap();
    let text = css::render(&resolved, converter.registry(), &CssOptions::from_config(converter.config()));

    assert!(text.starts_with(":root {\n"));
    assert!(text.contains("  --vscode-editor-background: #07121d;\n"));
    assert!(text.contains("  --vscode-harbor-accent: #007fd4;\n"));
    assert!(!text.contains("contrastBorder"));
    assert_eq!(text.lines().filter(|line| line.contains(": #")).count(), resolved.colors.len());
}

#[traced_test]
#[test]
fn self_referencing_override_is_diagnosed() {
    let source = MemorySource::new().with(
        "loop.json",
        r#"{"colors": {"editor.background": "editorGutter.background"}}"#,
    );
    let resolved = converter().load_and_convert(source, "loop.json").unwrap();

    assert_eq!(resolved.get("editor.background"), None);
    assert_eq!(
        resolved.diagnostics[0],
        Diagnostic::Cycle {
            path: vec![
                "editor.background".into(),
                "editorGutter.background".into(),
                "editor.background".into(),
            ],
        }
    );
    assert!(logs_contain("color reference cycle"));
}

#[test]
fn include_errors_surface() {
    let source = MemorySource::new().with("solo.json", r#"{"include": "./missing.json"}"#);
    let err = converter().load_and_convert(source, "solo.json").unwrap_err();
    assert!(matches!(err, ThemeError::MissingTheme { .. }));
}
