//! Appearance variants — the four default color tables a theme can select.

use std::fmt;

use crate::error::{Result, ThemeError};

/// Which default color table a theme builds on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Appearance {
    Light,
    #[default]
    Dark,
    HighContrastDark,
    HighContrastLight,
}

impl Appearance {
    /// All variants, in table order.
    pub const ALL: [Self; 4] = [
        Self::Light,
        Self::Dark,
        Self::HighContrastDark,
        Self::HighContrastLight,
    ];

    /// Parse the `type` field of a theme document.
    ///
    /// Accepts the legacy high-contrast spellings (`hc`, `hc-black`,
    /// `hc-light`) next to the current ones (`hcDark`, `hcLight`).
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::InvalidAppearance`] for any other string.
    pub fn from_theme_type(value: &str) -> Result<Self> {
        match value {
            "light" | "vs" => Ok(Self::Light),
            "dark" | "vs-dark" => Ok(Self::Dark),
            "hc" | "hc-black" | "hcDark" => Ok(Self::HighContrastDark),
            "hcLight" | "hc-light" => Ok(Self::HighContrastLight),
            _ => Err(ThemeError::InvalidAppearance {
                value: value.to_string(),
            }),
        }
    }

    /// The canonical `type` string written back into rendered themes.
    #[must_use]
    pub const fn theme_type(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::HighContrastDark => "hcDark",
            Self::HighContrastLight => "hcLight",
        }
    }

    /// Position of this variant's table in the registry.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark | Self::HighContrastDark)
    }

    #[must_use]
    pub const fn is_high_contrast(self) -> bool {
        matches!(self, Self::HighContrastDark | Self::HighContrastLight)
    }
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.theme_type())
    }
}
