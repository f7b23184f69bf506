//! Built-in color registrations — the workbench identifiers and their
//! per-variant defaults, shipped as `data/colors.json`.
//!
//! Each entry is `{"id", "description", "defaults": {light, dark, hcDark,
//! hcLight}}` where every default is a [`ColorValue`](crate::ColorValue) in
//! its serialized form or `null`.

use serde::Deserialize;

use crate::error::{Result, ThemeError};
use crate::registry::{ColorRegistry, RegistrationMode, RegistryBuilder};
use crate::value::ColorDefaults;

const COLORS_JSON: &str = include_str!("../data/colors.json");

#[derive(Deserialize)]
struct Entry {
    id: String,
    description: String,
    defaults: ColorDefaults,
}

/// Register every built-in identifier into `builder`, in file order.
///
/// # Errors
///
/// [`ThemeError::InvalidBuiltin`] if the embedded table does not parse, and
/// [`ThemeError::DuplicateColor`] if a strict builder already holds one of
/// the identifiers.
pub fn register_defaults(builder: &mut RegistryBuilder) -> Result<()> {
    let entries: Vec<Entry> = serde_json::from_str(COLORS_JSON).map_err(ThemeError::InvalidBuiltin)?;
    for entry in entries {
        builder.register(entry.id, entry.defaults, entry.description)?;
    }
    Ok(())
}

/// A registry holding only the built-in identifiers.
///
/// # Errors
///
/// See [`register_defaults`].
pub fn default_registry(mode: RegistrationMode) -> Result<ColorRegistry> {
    let mut builder = RegistryBuilder::new(mode);
    register_defaults(&mut builder)?;
    Ok(builder.build())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
