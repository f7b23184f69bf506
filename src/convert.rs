// SPDX-License-Identifier: MIT
//
// Converter — one registry, many conversions.
//
// The registry is built once and shared behind an Arc. Each call to
// `convert` builds its own overlay and resolver, so conversions never share
// mutable state and can run on separate threads against the same Converter.

use std::sync::Arc;

use n_theme::{
    Appearance, ColorRegistry, Diagnostic, EngineConfig, Result, Resolver, Theme, ThemeLoader,
    ThemeOverlay, ThemeSource, TokenRule, default_registry,
};
use tracing::{debug, warn};

// ─── ResolvedTheme ──────────────────────────────────────────────────────────

/// A theme with every color resolved to a concrete string.
///
/// This is all a renderer sees: no `ColorValue`s, only strings.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTheme {
    pub name: String,
    pub appearance: Appearance,
    /// Identifier → color. Registered identifiers come first, in registration
    /// order, then overrides for identifiers the registry does not know.
    /// Identifiers that resolve to nothing are absent.
    pub colors: Vec<(String, String)>,
    pub token_rules: Vec<TokenRule>,
    pub semantic_highlighting: Option<bool>,
    /// Cycles and depth overruns hit while resolving.
    pub diagnostics: Vec<Diagnostic>,
}

impl ResolvedTheme {
    /// The resolved color for `id`, if it has one.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.colors
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, color)| color.as_str())
    }
}

// ─── Converter ──────────────────────────────────────────────────────────────

/// Owns the frozen registry and the engine settings.
#[derive(Debug, Clone)]
pub struct Converter {
    registry: Arc<ColorRegistry>,
    config: EngineConfig,
}

impl Converter {
    /// A converter over the built-in color table.
    ///
    /// # Errors
    ///
    /// Fails only if the embedded table is malformed.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let registry = default_registry(config.registration_mode())?;
        debug!(colors = registry.len(), "color registry built");
        Ok(Self::with_registry(Arc::new(registry), config))
    }

    /// A converter over a caller-built registry.
    #[must_use]
    pub const fn with_registry(registry: Arc<ColorRegistry>, config: EngineConfig) -> Self {
        Self { registry, config }
    }

    #[must_use]
    pub const fn registry(&self) -> &Arc<ColorRegistry> {
        &self.registry
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve every registered identifier, and every override, for `theme`.
    #[must_use]
    pub fn convert(&self, theme: &Theme) -> ResolvedTheme {
        let overlay = ThemeOverlay::for_theme(&self.registry, theme);
        let mut resolver = Resolver::with_config(&overlay, &self.config);

        let extra = theme
            .colors
            .keys()
            .map(String::as_str)
            .filter(|id| !self.registry.contains(id));
        let colors = resolver.resolve_all(self.registry.ids().chain(extra));
        let diagnostics = resolver.take_diagnostics();

        if diagnostics.is_empty() {
            debug!(theme = %theme.name, colors = colors.len(), "theme converted");
        } else {
            warn!(
                theme = %theme.name,
                colors = colors.len(),
                diagnostics = diagnostics.len(),
                "theme converted with unresolved colors"
            );
        }

        ResolvedTheme {
            name: theme.name.clone(),
            appearance: theme.appearance(),
            colors,
            token_rules: theme.token_rules.clone(),
            semantic_highlighting: theme.semantic_highlighting,
            diagnostics,
        }
    }

    /// Load `reference` (with its includes) from `source` and convert it.
    ///
    /// # Errors
    ///
    /// Any loader error; see [`ThemeLoader::load`].
    pub fn load_and_convert<S: ThemeSource>(&self, source: S, reference: &str) -> Result<ResolvedTheme> {
        let theme = ThemeLoader::new(source).load(reference)?;
        Ok(self.convert(&theme))
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use n_theme::{ColorDefaults, ColorValue, MemorySource, RegistrationMode};
    use pretty_assertions::assert_eq;

    fn small_registry() -> Arc<ColorRegistry> {
        let mut builder = ColorRegistry::builder(RegistrationMode::Strict);
        builder
            .register("editor.background", ColorDefaults::all("#1e1e1e"), "Editor background.")
            .unwrap();
        builder
            .register("editor.border", ColorDefaults::all("contrastBorder"), "Editor border.")
            .unwrap();
        builder
            .register(
                "panel.background",
                ColorDefaults::all(ColorValue::parse("editor.background").darken(0.2)),
                "Panel background.",
            )
            .unwrap();
        builder
            .register("contrastBorder", ColorDefaults::new(None, None, Some("#6fc3df".into()), None), "")
            .unwrap();
        Arc::new(builder.build())
    }

    fn converter() -> Converter {
        Converter::with_registry(small_registry(), EngineConfig::default())
    }

    #[test]
    fn registered_ids_come_first_in_order() {
        let theme = Theme::new("t", Appearance::Dark).with_color("aaa.custom", "#123456");
        let resolved = converter().convert(&theme);
        let ids: Vec<&str> = resolved.colors.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["editor.background", "panel.background", "aaa.custom"]);
    }

    #[test]
    fn unresolvable_ids_are_absent() {
        let resolved = converter().convert(&Theme::new("t", Appearance::Dark));
        assert_eq!(resolved.get("editor.border"), None);
        assert_eq!(resolved.get("contrastBorder"), None);
    }

    #[test]
    fn variant_selects_the_table() {
        let resolved = converter().convert(&Theme::new("t", Appearance::HighContrastDark));
        assert_eq!(resolved.get("editor.border"), Some("#6fc3df"));
    }

    #[test]
    fn overrides_flow_into_derived_colors() {
        let theme = Theme::new("t", Appearance::Dark).with_color("editor.background", "#FFFFFF");
        let resolved = converter().convert(&theme);
        assert_eq!(resolved.get("editor.background"), Some("#FFFFFF"));
        assert_eq!(resolved.get("panel.background"), Some("#cccccc"));
    }

    #[test]
    fn cycles_are_reported() {
        let theme = Theme::new("t", Appearance::Dark)
            .with_color("editor.background", "panel.background");
        let resolved = converter().convert(&theme);
        assert_eq!(resolved.get("editor.background"), None);
        assert_eq!(resolved.get("panel.background"), None);
        assert!(matches!(resolved.diagnostics[0], Diagnostic::Cycle { .. }));
    }

    #[test]
    fn theme_metadata_is_carried() {
        let mut theme = Theme::new("Quiet", Appearance::Light);
        theme.semantic_highlighting = Some(true);
        let resolved = converter().convert(&theme);
        assert_eq!(resolved.name, "Quiet");
        assert_eq!(resolved.appearance, Appearance::Light);
        assert_eq!(resolved.semantic_highlighting, Some(true));
    }

    #[test]
    fn converter_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ColorRegistry>();
        assert_send_sync::<Converter>();

        let converter = Arc::new(converter());
        let handles: Vec<_> = [Appearance::Light, Appearance::HighContrastDark]
            .into_iter()
            .map(|appearance| {
                let converter = Arc::clone(&converter);
                std::thread::spawn(move || converter.convert(&Theme::new("t", appearance)))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().get("editor.background"), Some("#1e1e1e"));
        }
    }

    #[test]
    fn builtin_converter_builds() {
        let converter = Converter::new(EngineConfig::default()).unwrap();
        assert!(converter.registry().contains("editor.background"));
        let resolved = converter.convert(&Theme::default());
        assert_eq!(resolved.get("editor.background"), Some("#1e1e1e"));
        assert!(resolved.diagnostics.is_empty());
    }

    #[test]
    fn load_and_convert_reads_from_source() {
        let source = MemorySource::new().with(
            "quiet.json",
            r##"{"type": "light", "colors": {"editor.background": "#fafafa"}}"##,
        );
        let resolved = converter().load_and_convert(&source, "quiet.json").unwrap();
        assert_eq!(resolved.name, "quiet");
        assert_eq!(resolved.get("editor.background"), Some("#fafafa"));
    }
}
