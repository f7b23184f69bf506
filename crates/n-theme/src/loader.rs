//! Theme loader — theme documents in, merged [`Theme`] out.
//!
//! Theme files are JSON with comments: `//` and `/* */` comments and trailing
//! commas are accepted and stripped before parsing.
//!
//! The loader never touches the filesystem. Documents come from a
//! [`ThemeSource`], keyed by the same references that appear in `include`
//! and `tokenColors` fields. References are resolved relative to the
//! document that names them (`themes/dark.json` including `./base.json`
//! reads `themes/base.json`).

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::appearance::Appearance;
use crate::error::{Result, ThemeError};
use crate::theme::{FontStyle, Theme, TokenRule, TokenSettings};

/// Deepest include chain followed before giving up.
pub const MAX_INCLUDE_DEPTH: usize = 16;

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Where theme documents come from.
pub trait ThemeSource {
    /// The text of the document named `reference`.
    ///
    /// # Errors
    ///
    /// [`ThemeError::MissingTheme`] when there is no such document, or any
    /// error the backing store reports.
    fn read(&self, reference: &str) -> Result<String>;
}

impl<T: ThemeSource + ?Sized> ThemeSource for &T {
    fn read(&self, reference: &str) -> Result<String> {
        (**self).read(reference)
    }
}

/// In-memory documents keyed by reference.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, reference: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(reference.into(), text.into());
    }

    #[must_use]
    pub fn with(mut self, reference: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(reference, text);
        self
    }
}

impl ThemeSource for MemorySource {
    fn read(&self, reference: &str) -> Result<String> {
        self.documents
            .get(reference)
            .cloned()
            .ok_or_else(|| ThemeError::missing(reference))
    }
}

// ---------------------------------------------------------------------------
// ThemeLoader
// ---------------------------------------------------------------------------

/// Loads a theme and everything it includes from one source.
#[derive(Debug, Clone)]
pub struct ThemeLoader<S> {
    source: S,
}

impl<S: ThemeSource> ThemeLoader<S> {
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Load `reference`, follow its include chain, and merge.
    ///
    /// A theme with no `name` is named after the file stem of `reference`.
    ///
    /// # Errors
    ///
    /// Source and parse errors, [`ThemeError::IncludeCycle`], and
    /// [`ThemeError::IncludeDepth`] past [`MAX_INCLUDE_DEPTH`].
    pub fn load(&self, reference: &str) -> Result<Theme> {
        let reference = normalize_reference(reference);
        let mut theme = self.load_chain(&reference, &mut Vec::new())?;
        if theme.name.is_empty() {
            theme.name = file_stem(&reference).to_string();
        }
        Ok(theme)
    }

    fn load_chain(&self, reference: &str, chain: &mut Vec<String>) -> Result<Theme> {
        if chain.iter().any(|seen| seen == reference) {
            let mut chain = chain.clone();
            chain.push(reference.to_string());
            return Err(ThemeError::IncludeCycle { chain });
        }
        if chain.len() >= MAX_INCLUDE_DEPTH {
            return Err(ThemeError::IncludeDepth {
                reference: reference.to_string(),
                limit: MAX_INCLUDE_DEPTH,
            });
        }

        let raw = parse_raw(&self.source.read(reference)?)?;
        let external_rules = match &raw.token_colors {
            Some(RawTokenColors::Path(path)) => self.load_token_file(reference, path)?,
            _ => Vec::new(),
        };
        let mut theme = raw.into_theme()?;
        theme.token_rules.extend(external_rules);

        let Some(include) = theme.include.take() else {
            return Ok(theme);
        };

        let target = join_reference(reference, &include);
        debug!(theme = reference, include = %target, "merging included theme");
        chain.push(reference.to_string());
        let base = self.load_chain(&target, chain)?;
        chain.pop();
        Ok(theme.merge_include(base))
    }

    /// Token rules kept in a separate file named by `tokenColors`.
    fn load_token_file(&self, from: &str, path: &str) -> Result<Vec<TokenRule>> {
        let target = join_reference(from, path);
        if !target.ends_with(".json") {
            warn!(theme = from, token_colors = %target, "only JSON token color files are supported, skipping");
            return Ok(Vec::new());
        }
        let text = self.source.read(&target)?;
        let file: RawTokenFile = serde_json::from_str(&strip_jsonc(&text))?;
        Ok(file.into_rules().into_iter().map(RawTokenRule::into_rule).collect())
    }
}

/// Parse one theme document without following `include`.
///
/// A `tokenColors` file reference is left unloaded.
///
/// # Errors
///
/// [`ThemeError::Json`] for malformed documents and
/// [`ThemeError::InvalidAppearance`] for an unknown `type`.
pub fn parse_theme(text: &str) -> Result<Theme> {
    let raw = parse_raw(text)?;
    if let Some(RawTokenColors::Path(path)) = &raw.token_colors {
        debug!(token_colors = %path, "token color file not loaded without a source");
    }
    raw.into_theme()
}

fn parse_raw(text: &str) -> Result<RawTheme> {
    Ok(serde_json::from_str(&strip_jsonc(text))?)
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTheme {
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    colors: BTreeMap<String, Option<String>>,
    token_colors: Option<RawTokenColors>,
    include: Option<String>,
    semantic_highlighting: Option<bool>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTokenColors {
    Rules(Vec<RawTokenRule>),
    Path(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTokenFile {
    Rules(Vec<RawTokenRule>),
    Document {
        #[serde(rename = "tokenColors", alias = "settings")]
        token_colors: Vec<RawTokenRule>,
    },
}

impl RawTokenFile {
    fn into_rules(self) -> Vec<RawTokenRule> {
        match self {
            Self::Rules(rules) | Self::Document { token_colors: rules } => rules,
        }
    }
}

#[derive(Deserialize)]
struct RawTokenRule {
    name: Option<String>,
    scope: Option<RawScope>,
    #[serde(default)]
    settings: RawSettings,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScope {
    One(String),
    Many(Vec<String>),
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
    foreground: Option<String>,
    background: Option<String>,
    font_style: Option<String>,
}

impl RawTheme {
    fn into_theme(self) -> Result<Theme> {
        let kind = self.kind.as_deref().map(Appearance::from_theme_type).transpose()?;
        let colors = self
            .colors
            .into_iter()
            .filter_map(|(id, value)| value.map(|value| (id, value)))
            .collect();
        let token_rules = match self.token_colors {
            Some(RawTokenColors::Rules(rules)) => rules.into_iter().map(RawTokenRule::into_rule).collect(),
            _ => Vec::new(),
        };

        Ok(Theme {
            name: self.name.unwrap_or_default(),
            kind,
            colors,
            token_rules,
            include: self.include,
            semantic_highlighting: self.semantic_highlighting,
        })
    }
}

impl RawTokenRule {
    fn into_rule(self) -> TokenRule {
        let scope = match self.scope {
            None => Vec::new(),
            Some(RawScope::One(list)) => split_scopes(list.split(',')),
            Some(RawScope::Many(items)) => split_scopes(items.iter().map(String::as_str)),
        };
        TokenRule {
            name: self.name,
            scope,
            settings: TokenSettings {
                foreground: self.settings.foreground,
                background: self.settings.background,
                font_style: self.settings.font_style.as_deref().map(FontStyle::parse),
            },
        }
    }
}

fn split_scopes<'s>(parts: impl Iterator<Item = &'s str>) -> Vec<String> {
    parts
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// JSON with comments
// ---------------------------------------------------------------------------

/// Remove `//` and `/* */` comments and trailing commas outside strings.
///
/// Line breaks inside removed comments are kept so parse errors still point
/// at the right line.
#[must_use]
pub fn strip_jsonc(text: &str) -> String {
    let without_comments = strip_comments(text);
    strip_trailing_commas(&without_comments)
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                // Line comment: drop through the end of the line.
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
            }
            _ => out.push(c),
        }
    }
    out
}

fn strip_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|n| !n.is_whitespace());
            if matches!(next, Some('}' | ']')) {
                continue;
            }
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// References
// ---------------------------------------------------------------------------

/// Resolve `target` relative to the document `from`.
fn join_reference(from: &str, target: &str) -> String {
    if target.starts_with('/') {
        return normalize_reference(target);
    }
    let dir = from.rfind('/').map_or("", |i| &from[..=i]);
    normalize_reference(&format!("{dir}{target}"))
}

/// Collapse `.` and `..` segments.
fn normalize_reference(reference: &str) -> String {
    let absolute = reference.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in reference.split('/') {
        match segment {
            "" | "." => {}
            ".." if segments.last().is_some_and(|last| *last != "..") => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }
    let joined = segments.join("/");
    if absolute { format!("/{joined}") } else { joined }
}

fn file_stem(reference: &str) -> &str {
    let name = reference.rsplit('/').next().unwrap_or(reference);
    name.rsplit_once('.').map_or(name, |(stem, _)| stem)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
