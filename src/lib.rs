// SPDX-License-Identifier: MIT
//
// n-chroma — resolve editor color themes into concrete colors.
//
// This crate wires the workspace together:
//
//   n-color → color arithmetic (hex, HSL, luminance)
//   n-theme → registry, overlays, resolver, theme loading
//
// A conversion flows through:
//
//   ThemeSource → ThemeLoader → Theme
//   Theme + ColorRegistry → ThemeOverlay → Resolver → ResolvedTheme
//   ResolvedTheme → render::json / render::css

//! Composition root and renderers.
//!
//! ```
//! use n_chroma::{Converter, render};
//! use n_theme::{Appearance, EngineConfig, Theme};
//!
//! let converter = Converter::new(EngineConfig::default())?;
//! let theme = Theme::new("Midnight", Appearance::Dark).with_color("editor.background", "#101020");
//! let resolved = converter.convert(&theme);
//!
//! assert_eq!(resolved.get("editor.background"), Some("#101020"));
//! assert_eq!(resolved.get("editorGutter.background"), Some("#101020"));
//!
//! let css = render::css::render(&resolved, converter.registry(), &render::css::CssOptions::default());
//! assert!(css.contains("--vscode-editor-background: #101020;"));
//! # Ok::<(), n_theme::ThemeError>(())
//! ```

pub mod convert;
pub mod render;

pub use convert::{Converter, ResolvedTheme};
