//! Engine configuration.
//!
//! | Key                   | Type   | Default    |
//! |-----------------------|--------|------------|
//! | `strict_registration` | bool   | `false`    |
//! | `memoize`             | bool   | `true`     |
//! | `max_depth`           | usize  | `64`       |
//! | `css_prefix`          | string | `"vscode"` |
//!
//! Every key is optional; unknown keys are rejected so typos surface.

use serde::Deserialize;

use crate::error::Result;
use crate::registry::RegistrationMode;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Reject a color identifier registered twice instead of overwriting it.
    pub strict_registration: bool,
    /// Memoize per-identifier results within one resolver.
    pub memoize: bool,
    /// Longest reference chain followed before giving up.
    pub max_depth: usize,
    /// Custom-property prefix used by the CSS renderer.
    pub css_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strict_registration: false,
            memoize: true,
            max_depth: 64,
            css_prefix: "vscode".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Toml`](crate::ThemeError::Toml) for malformed
    /// TOML, wrong value types, or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    #[must_use]
    pub const fn registration_mode(&self) -> RegistrationMode {
        if self.strict_registration {
            RegistrationMode::Strict
        } else {
            RegistrationMode::Lenient
        }
    }
}
