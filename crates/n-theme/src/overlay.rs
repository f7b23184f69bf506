//! Theme overlay — the lookup context for one conversion.
//!
//! An overlay is the selected variant's default table with the theme's
//! literal overrides laid on top. It is built once per conversion and never
//! mutated; the resolver only ever reads from it.

use std::collections::BTreeMap;

use tracing::debug;

use crate::appearance::Appearance;
use crate::registry::{ColorRegistry, ColorTable};
use crate::theme::Theme;
use crate::value::ColorValue;

#[derive(Debug, Clone)]
pub struct ThemeOverlay {
    appearance: Appearance,
    entries: ColorTable,
}

impl ThemeOverlay {
    /// Copy `appearance`'s defaults and apply `overrides` on top.
    ///
    /// Override values are not validated: a malformed literal surfaces later
    /// as an unresolvable color, never as an error here.
    #[must_use]
    pub fn new(
        registry: &ColorRegistry,
        appearance: Appearance,
        overrides: &BTreeMap<String, String>,
    ) -> Self {
        let mut entries = registry.table(appearance).clone();
        for (id, value) in overrides {
            entries.insert(id.clone(), Some(ColorValue::parse(value.as_str())));
        }
        debug!(
            %appearance,
            defaults = registry.table(appearance).len(),
            overrides = overrides.len(),
            "theme overlay built"
        );
        Self { appearance, entries }
    }

    /// The bare defaults of one variant, with no overrides.
    #[must_use]
    pub fn defaults(registry: &ColorRegistry, appearance: Appearance) -> Self {
        Self::new(registry, appearance, &BTreeMap::new())
    }

    /// The overlay for `theme`'s variant and color overrides.
    #[must_use]
    pub fn for_theme(registry: &ColorRegistry, theme: &Theme) -> Self {
        Self::new(registry, theme.appearance(), &theme.colors)
    }

    #[must_use]
    pub const fn appearance(&self) -> Appearance {
        self.appearance
    }

    /// The value registered or overridden for `id`, if non-null.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ColorValue> {
        self.entries.get(id).and_then(Option::as_ref)
    }

    /// Whether `id` has a non-null entry. The entry itself is not resolved.
    #[must_use]
    pub fn is_defined(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Whether `id` has any entry, null included.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
