//! Boundary errors for theme loading, registration, and configuration.
//!
//! Color resolution itself never fails with an error: an unresolvable color is
//! `None`. Everything here comes from turning external text into engine values.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ThemeError>;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("builtin color table is malformed: {0}")]
    InvalidBuiltin(#[source] serde_json::Error),

    #[error("unknown theme type: {value}")]
    InvalidAppearance { value: String },

    #[error("color identifier must not be empty")]
    EmptyIdentifier,

    #[error("color already registered: {id}")]
    DuplicateColor { id: String },

    #[error("theme not found: {reference}")]
    MissingTheme { reference: String },

    #[error("theme include cycle: {}", chain.join(" -> "))]
    IncludeCycle { chain: Vec<String> },

    #[error("theme includes nest deeper than {limit}: {reference}")]
    IncludeDepth { reference: String, limit: usize },
}

impl ThemeError {
    #[must_use]
    pub fn missing(reference: impl Into<String>) -> Self {
        Self::MissingTheme {
            reference: reference.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ThemeError;

    #[test]
    fn include_cycle_lists_the_chain() {
        let error = ThemeError::IncludeCycle {
            chain: vec!["a.json".into(), "b.json".into(), "a.json".into()],
        };
        assert_eq!(
            error.to_string(),
            "theme include cycle: a.json -> b.json -> a.json"
        );
    }

    #[test]
    fn missing_constructor_keeps_reference() {
        let error = ThemeError::missing("themes/dark.json");
        assert_eq!(error.to_string(), "theme not found: themes/dark.json");
    }
}
