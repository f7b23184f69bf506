//! Theme model — what a loaded theme document holds, and the include merge.
//!
//! A `Theme` carries only literal color overrides and token-style rules.
//! Token rules are passed through to renderers untouched; the resolver never
//! looks at them.
//!
//! # Include merge
//!
//! A derived theme that includes a base theme is merged once, before any
//! overlay is built:
//!
//! - colors: base map, then derived entries on top (derived wins)
//! - token rules: derived rules first, then base rules (first match wins
//!   downstream, so order is significant)

use std::collections::BTreeMap;

use crate::appearance::Appearance;

// ---------------------------------------------------------------------------
// FontStyle
// ---------------------------------------------------------------------------

bitflags::bitflags! {
    /// Token font style, parsed from the space-separated `fontStyle` string.
    ///
    /// ```
    /// use n_theme::FontStyle;
    ///
    /// let style = FontStyle::parse("italic bold");
    /// assert!(style.contains(FontStyle::BOLD | FontStyle::ITALIC));
    /// assert_eq!(style.to_theme_string(), "bold italic");
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct FontStyle: u8 {
        const BOLD          = 1 << 0;
        const ITALIC        = 1 << 1;
        const UNDERLINE     = 1 << 2;
        const STRIKETHROUGH = 1 << 3;
    }
}

impl FontStyle {
    /// Parse a `fontStyle` value. Unknown words are ignored.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        text.split_whitespace().fold(Self::empty(), |style, word| {
            style
                | match word {
                    "bold" => Self::BOLD,
                    "italic" => Self::ITALIC,
                    "underline" => Self::UNDERLINE,
                    "strikethrough" => Self::STRIKETHROUGH,
                    _ => Self::empty(),
                }
        })
    }

    /// Canonical `fontStyle` string, words in a fixed order.
    #[must_use]
    pub fn to_theme_string(self) -> String {
        let words: Vec<&str> = [
            (Self::BOLD, "bold"),
            (Self::ITALIC, "italic"),
            (Self::UNDERLINE, "underline"),
            (Self::STRIKETHROUGH, "strikethrough"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, word)| word)
        .collect();
        words.join(" ")
    }
}

// ---------------------------------------------------------------------------
// Token rules
// ---------------------------------------------------------------------------

/// Styling applied to tokens matched by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenSettings {
    pub foreground: Option<String>,
    pub background: Option<String>,
    /// `Some(FontStyle::empty())` is an explicit reset, distinct from `None`.
    pub font_style: Option<FontStyle>,
}

/// One `tokenColors` entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenRule {
    pub name: Option<String>,
    /// Scope selectors; empty means the rule applies to every token.
    pub scope: Vec<String>,
    pub settings: TokenSettings,
}

impl TokenRule {
    #[must_use]
    pub fn new<I, S>(scope: I, settings: TokenSettings) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: None,
            scope: scope.into_iter().map(Into::into).collect(),
            settings,
        }
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// A loaded theme document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Theme {
    pub name: String,
    /// The declared `type`; `None` when the document did not say.
    pub kind: Option<Appearance>,
    /// Identifier → literal override string.
    pub colors: BTreeMap<String, String>,
    pub token_rules: Vec<TokenRule>,
    /// Reference to a base theme, consumed by the loader.
    pub include: Option<String>,
    pub semantic_highlighting: Option<bool>,
}

impl Theme {
    #[must_use]
    pub fn new(name: impl Into<String>, appearance: Appearance) -> Self {
        Self {
            name: name.into(),
            kind: Some(appearance),
            ..Self::default()
        }
    }

    /// The variant to resolve against; undeclared themes are dark.
    #[must_use]
    pub fn appearance(&self) -> Appearance {
        self.kind.unwrap_or_default()
    }

    /// Add or replace one color override.
    #[must_use]
    pub fn with_color(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.colors.insert(id.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_rule(mut self, rule: TokenRule) -> Self {
        self.token_rules.push(rule);
        self
    }

    /// Merge `base` underneath `self` (`self` is the including theme).
    #[must_use]
    pub fn merge_include(self, base: Self) -> Self {
        let mut colors = base.colors;
        colors.extend(self.colors);

        let mut token_rules = self.token_rules;
        token_rules.extend(base.token_rules);

        Self {
            name: if self.name.is_empty() { base.name } else { self.name },
            kind: self.kind.or(base.kind),
            colors,
            token_rules,
            include: None,
            semantic_highlighting: self.semantic_highlighting.or(base.semantic_highlighting),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
