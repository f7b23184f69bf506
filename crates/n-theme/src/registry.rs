//! Color registry — the per-variant default tables.
//!
//! Registration happens once, at startup, through a [`RegistryBuilder`].
//! [`RegistryBuilder::build`] freezes the tables into a [`ColorRegistry`],
//! which has no mutating methods: "immutable after init" is a property of the
//! type, not a convention. Share it behind an `Arc` between conversions.
//!
//! Each variant's table maps an identifier to `Option<ColorValue>`. `None`
//! is a registered null default; an identifier missing from the map was never
//! given a default in that variant. Both resolve to "no value".

use std::collections::HashMap;

use tracing::debug;

use crate::appearance::Appearance;
use crate::error::{Result, ThemeError};
use crate::value::{ColorDefaults, ColorValue, DefaultSlot};

/// One variant's identifier → default mapping.
pub type ColorTable = HashMap<String, Option<ColorValue>>;

/// How a repeated identifier is treated during registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistrationMode {
    /// Last registration wins, per supplied variant.
    #[default]
    Lenient,
    /// A repeated identifier is an error.
    Strict,
}

// ---------------------------------------------------------------------------
// RegistryBuilder
// ---------------------------------------------------------------------------

/// Accumulates registrations until [`build`](Self::build).
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    mode: RegistrationMode,
    tables: [ColorTable; 4],
    descriptions: HashMap<String, String>,
    /// Identifiers in first-registration order.
    order: Vec<String>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn new(mode: RegistrationMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Register `id` with per-variant `defaults` and a human description.
    ///
    /// Variants whose slot is [`DefaultSlot::Absent`] are skipped, so a
    /// lenient re-registration only overwrites the variants it supplies.
    /// Returns the identifier.
    ///
    /// # Errors
    ///
    /// [`ThemeError::EmptyIdentifier`] for an empty id, and
    /// [`ThemeError::DuplicateColor`] when `id` was already registered in
    /// [`RegistrationMode::Strict`].
    pub fn register(
        &mut self,
        id: impl Into<String>,
        defaults: ColorDefaults,
        description: impl Into<String>,
    ) -> Result<String> {
        let id = id.into();
        if id.is_empty() {
            return Err(ThemeError::EmptyIdentifier);
        }

        if self.descriptions.contains_key(&id) {
            match self.mode {
                RegistrationMode::Strict => return Err(ThemeError::DuplicateColor { id }),
                RegistrationMode::Lenient => debug!(%id, "color re-registered, overwriting"),
            }
        } else {
            self.order.push(id.clone());
        }

        for appearance in Appearance::ALL {
            let table = &mut self.tables[appearance.index()];
            match defaults.slot(appearance) {
                DefaultSlot::Absent => {}
                DefaultSlot::Null => {
                    table.insert(id.clone(), None);
                }
                DefaultSlot::Value(value) => {
                    table.insert(id.clone(), Some(value.clone()));
                }
            }
        }

        self.descriptions.insert(id.clone(), description.into());
        Ok(id)
    }

    /// Number of distinct identifiers registered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Freeze the tables.
    #[must_use]
    pub fn build(self) -> ColorRegistry {
        ColorRegistry {
            tables: self.tables,
            descriptions: self.descriptions,
            order: self.order,
        }
    }
}

// ---------------------------------------------------------------------------
// ColorRegistry
// ---------------------------------------------------------------------------

/// The frozen default tables.
#[derive(Debug, Clone, Default)]
pub struct ColorRegistry {
    tables: [ColorTable; 4],
    descriptions: HashMap<String, String>,
    order: Vec<String>,
}

impl ColorRegistry {
    #[must_use]
    pub fn builder(mode: RegistrationMode) -> RegistryBuilder {
        RegistryBuilder::new(mode)
    }

    /// The full default table for one variant.
    #[must_use]
    pub fn table(&self, appearance: Appearance) -> &ColorTable {
        &self.tables[appearance.index()]
    }

    /// The registered default for `id` in `appearance`.
    ///
    /// `None` when `id` has no entry; `Some(None)` for a registered null.
    #[must_use]
    pub fn get(&self, appearance: Appearance, id: &str) -> Option<Option<&ColorValue>> {
        self.table(appearance).get(id).map(Option::as_ref)
    }

    #[must_use]
    pub fn description(&self, id: &str) -> Option<&str> {
        self.descriptions.get(id).map(String::as_str)
    }

    /// Registered identifiers in first-registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.descriptions.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
