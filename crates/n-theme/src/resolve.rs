//! Resolver — evaluates the color graph against a theme overlay.
//!
//! Resolution is a pure function of (value, overlay). The only outcome that
//! is not a color string is `None`: absent or null entries, short-circuited
//! transforms, unparseable hex, and detected cycles all produce it.
//!
//! # Order of evaluation
//!
//! ```text
//! Literal("#…")          → returned verbatim
//! Reference(id)          → overlay entry for id, resolved recursively
//! Darken/Lighten/Transparent
//!                        → operand resolved first; None short-circuits
//! OneOf                  → left to right, first Some wins, rest untouched
//! IfDefinedThenElse      → raw definedness of the id, one branch resolved
//! LessProminent          → fg, then bg; see `contrast::less_prominent`
//! ```
//!
//! # Cycles
//!
//! Identifiers being resolved are kept on a stack. Re-entering one yields
//! `None` and records [`Diagnostic::Cycle`]. A result computed while any
//! cycle was hit is not memoized, so the value of an identifier never depends
//! on which identifier resolution started from.

use std::collections::HashMap;
use std::fmt;

use n_color::Color;
use tracing::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::contrast;
use crate::overlay::ThemeOverlay;
use crate::value::{ColorTransform, ColorValue};

/// Why a resolution came back empty for a reason other than a missing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// `path` starts and ends with the identifier that was re-entered.
    Cycle { path: Vec<String> },
    /// The reference chain grew past the configured depth.
    DepthExceeded { id: String, limit: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycle { path } => write!(f, "color reference cycle: {}", path.join(" -> ")),
            Self::DepthExceeded { id, limit } => {
                write!(f, "color reference chain deeper than {limit} at {id}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Stateful resolver for one overlay: memo table, in-progress stack, and
/// collected diagnostics.
#[derive(Debug)]
pub struct Resolver<'a> {
    context: &'a ThemeOverlay,
    memo: Option<HashMap<String, Option<String>>>,
    stack: Vec<String>,
    max_depth: usize,
    /// Bumped on every cycle or depth hit; compared around a resolution to
    /// tell whether its result is safe to memoize.
    interruptions: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Resolver<'a> {
    /// A resolver with default settings (memoizing, depth 64).
    #[must_use]
    pub fn new(context: &'a ThemeOverlay) -> Self {
        Self::with_config(context, &EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(context: &'a ThemeOverlay, config: &EngineConfig) -> Self {
        Self {
            context,
            memo: config.memoize.then(HashMap::new),
            stack: Vec::new(),
            max_depth: config.max_depth,
            interruptions: 0,
            diagnostics: Vec::new(),
        }
    }

    #[must_use]
    pub const fn context(&self) -> &'a ThemeOverlay {
        self.context
    }

    /// Resolve an optional value; `None` in gives `None` out.
    pub fn resolve(&mut self, value: Option<&ColorValue>) -> Option<String> {
        value.and_then(|value| self.resolve_value(value))
    }

    /// Resolve one node of the color graph.
    pub fn resolve_value(&mut self, value: &ColorValue) -> Option<String> {
        match value {
            ColorValue::Literal(hex) => Some(hex.clone()),
            ColorValue::Reference(id) => self.resolve_id(id),
            ColorValue::Transform(transform) => self.evaluate(transform),
        }
    }

    /// Resolve the color registered or overridden under `id`.
    pub fn resolve_id(&mut self, id: &str) -> Option<String> {
        if let Some(hit) = self.memo.as_ref().and_then(|memo| memo.get(id)) {
            return hit.clone();
        }

        if let Some(start) = self.stack.iter().position(|entry| entry == id) {
            let mut path = self.stack[start..].to_vec();
            path.push(id.to_string());
            let diagnostic = Diagnostic::Cycle { path };
            warn!(%diagnostic, "color left unresolved");
            self.interrupt(diagnostic);
            return None;
        }

        let context = self.context;
        let value = context.get(id)?;

        if self.stack.len() >= self.max_depth {
            let diagnostic = Diagnostic::DepthExceeded {
                id: id.to_string(),
                limit: self.max_depth,
            };
            warn!(%diagnostic, "color left unresolved");
            self.interrupt(diagnostic);
            return None;
        }

        let before = self.interruptions;
        self.stack.push(id.to_string());
        let resolved = self.resolve_value(value);
        self.stack.pop();

        if before == self.interruptions {
            if let Some(memo) = self.memo.as_mut() {
                memo.insert(id.to_string(), resolved.clone());
            }
        }
        trace!(id, resolved = resolved.as_deref().unwrap_or("<none>"), "color resolved");
        resolved
    }

    /// Resolve each of `ids`, keeping only those with a value, in input order.
    pub fn resolve_all<'i, I>(&mut self, ids: I) -> Vec<(String, String)>
    where
        I: IntoIterator<Item = &'i str>,
    {
        ids.into_iter()
            .filter_map(|id| self.resolve_id(id).map(|color| (id.to_string(), color)))
            .collect()
    }

    /// Diagnostics collected so far, in the order they occurred.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Hand over the collected diagnostics, leaving the resolver's list empty.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn interrupt(&mut self, diagnostic: Diagnostic) {
        self.interruptions += 1;
        if !self.diagnostics.contains(&diagnostic) {
            self.diagnostics.push(diagnostic);
        }
    }

    // ── Transforms ─────────────────────────────────────────────────

    fn evaluate(&mut self, transform: &ColorTransform) -> Option<String> {
        match transform {
            ColorTransform::Darken { value, factor } => {
                self.resolve_color(value).map(|c| c.darken(*factor).to_hex())
            }
            ColorTransform::Lighten { value, factor } => {
                self.resolve_color(value).map(|c| c.lighten(*factor).to_hex())
            }
            ColorTransform::Transparent { value, factor } => {
                self.resolve_color(value).map(|c| c.with_alpha(*factor).to_hex())
            }
            ColorTransform::OneOf { values } => {
                values.iter().find_map(|candidate| self.resolve_value(candidate))
            }
            ColorTransform::IfDefinedThenElse {
                if_defined,
                then,
                otherwise,
            } => {
                if self.context.is_defined(if_defined) {
                    self.resolve_value(then)
                } else {
                    self.resolve_value(otherwise)
                }
            }
            ColorTransform::LessProminent {
                value,
                background,
                factor,
                transparency,
            } => {
                let fg = self.resolve_color(value)?;
                let bg = self.resolve_color(background);
                Some(contrast::less_prominent(fg, bg, *factor, *transparency).to_hex())
            }
        }
    }

    /// Resolve `value` and parse the result for arithmetic.
    fn resolve_color(&mut self, value: &ColorValue) -> Option<Color> {
        let text = self.resolve_value(value)?;
        let color = Color::hex(&text);
        if color.is_none() {
            debug!(color = %text, "not a hex color, transform skipped");
        }
        color
    }
}

// ---------------------------------------------------------------------------
// One-shot helpers
// ---------------------------------------------------------------------------

/// Resolve `value` against `context` with a fresh resolver.
#[must_use]
pub fn resolve(value: Option<&ColorValue>, context: &ThemeOverlay) -> Option<String> {
    Resolver::new(context).resolve(value)
}

/// Resolve the identifier `id` against `context` with a fresh resolver.
#[must_use]
pub fn resolve_id(id: &str, context: &ThemeOverlay) -> Option<String> {
    Resolver::new(context).resolve_id(id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
