//! Color value model — literals, references, and derived-color transforms.
//!
//! A theme's color graph is built from three shapes:
//!
//! | Shape       | Written as                 | Meaning                         |
//! |-------------|----------------------------|---------------------------------|
//! | `Literal`   | `"#1e1e1e"`                | final color, used verbatim      |
//! | `Reference` | `"editor.background"`      | whatever that identifier yields |
//! | `Transform` | `{"op": "darken", ...}`    | derived from other values       |
//!
//! A string is a literal if and only if it starts with `#`. That rule is
//! applied once, here, when text becomes a [`ColorValue`]; the resolver only
//! ever sees the tagged form.
//!
//! # Serialized transforms
//!
//! ```json
//! {"op": "darken",            "value": V, "factor": 0.2}
//! {"op": "lighten",           "value": V, "factor": 0.2}
//! {"op": "transparent",       "value": V, "factor": 0.5}
//! {"op": "oneOf",             "values": [V, V]}
//! {"op": "lessProminent",     "value": V, "background": V, "factor": 0.3, "transparency": 0.6}
//! {"op": "ifDefinedThenElse", "if": "id", "then": V, "else": V}
//! ```

use serde::Deserialize;

use crate::appearance::Appearance;

// ---------------------------------------------------------------------------
// ColorValue
// ---------------------------------------------------------------------------

/// One node of the color graph.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawColorValue")]
pub enum ColorValue {
    /// A `#`-prefixed hex string, returned verbatim by the resolver.
    Literal(String),
    /// The name of another color identifier.
    Reference(String),
    /// A derived color.
    Transform(Box<ColorTransform>),
}

impl ColorValue {
    /// Classify a raw string: `#…` is a literal, anything else a reference.
    #[must_use]
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.starts_with('#') {
            Self::Literal(text)
        } else {
            Self::Reference(text)
        }
    }

    /// `self` darkened by `factor` of its HSL lightness.
    #[must_use]
    pub fn darken(self, factor: f64) -> Self {
        ColorTransform::Darken { value: self, factor }.into()
    }

    /// `self` lightened by `factor` of its HSL lightness.
    #[must_use]
    pub fn lighten(self, factor: f64) -> Self {
        ColorTransform::Lighten { value: self, factor }.into()
    }

    /// `self` with its alpha channel set to `factor`.
    #[must_use]
    pub fn transparent(self, factor: f64) -> Self {
        ColorTransform::Transparent { value: self, factor }.into()
    }

    /// `self` pulled toward `background`, then made `transparency` opaque.
    #[must_use]
    pub fn less_prominent(self, background: impl Into<Self>, factor: f64, transparency: f64) -> Self {
        ColorTransform::LessProminent {
            value: self,
            background: background.into(),
            factor,
            transparency,
        }
        .into()
    }

    /// First candidate that resolves.
    #[must_use]
    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        ColorTransform::OneOf {
            values: values.into_iter().map(Into::into).collect(),
        }
        .into()
    }

    /// `then` if `id` is defined in the lookup context, `otherwise` if not.
    #[must_use]
    pub fn if_defined_then_else(
        id: impl Into<String>,
        then: impl Into<Self>,
        otherwise: impl Into<Self>,
    ) -> Self {
        ColorTransform::IfDefinedThenElse {
            if_defined: id.into(),
            then: then.into(),
            otherwise: otherwise.into(),
        }
        .into()
    }

    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl From<&str> for ColorValue {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<String> for ColorValue {
    fn from(text: String) -> Self {
        Self::parse(text)
    }
}

impl From<ColorTransform> for ColorValue {
    fn from(transform: ColorTransform) -> Self {
        Self::Transform(Box::new(transform))
    }
}

/// Wire shape: either a bare string or a transform object.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawColorValue {
    Text(String),
    Transform(ColorTransform),
}

impl From<RawColorValue> for ColorValue {
    fn from(raw: RawColorValue) -> Self {
        match raw {
            RawColorValue::Text(text) => Self::parse(text),
            RawColorValue::Transform(transform) => transform.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// ColorTransform
// ---------------------------------------------------------------------------

/// A derived-color operation. The set is closed; the resolver matches it
/// exhaustively.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ColorTransform {
    Darken {
        value: ColorValue,
        factor: f64,
    },
    Lighten {
        value: ColorValue,
        factor: f64,
    },
    Transparent {
        value: ColorValue,
        factor: f64,
    },
    OneOf {
        values: Vec<ColorValue>,
    },
    LessProminent {
        value: ColorValue,
        background: ColorValue,
        factor: f64,
        transparency: f64,
    },
    IfDefinedThenElse {
        #[serde(rename = "if")]
        if_defined: String,
        then: ColorValue,
        #[serde(rename = "else")]
        otherwise: ColorValue,
    },
}

// ---------------------------------------------------------------------------
// ColorDefaults
// ---------------------------------------------------------------------------

/// One variant's entry in a registration call.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DefaultSlot {
    /// Not supplied: registration leaves this variant's table untouched.
    #[default]
    Absent,
    /// Supplied as null: "no default color in this variant".
    Null,
    Value(ColorValue),
}

impl From<Option<ColorValue>> for DefaultSlot {
    fn from(value: Option<ColorValue>) -> Self {
        value.map_or(Self::Null, Self::Value)
    }
}

/// Per-variant defaults handed to [`RegistryBuilder::register`].
///
/// In the serialized form a missing key is [`DefaultSlot::Absent`] and an
/// explicit `null` is [`DefaultSlot::Null`].
///
/// [`RegistryBuilder::register`]: crate::registry::RegistryBuilder::register
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorDefaults {
    #[serde(default, deserialize_with = "slot")]
    pub light: DefaultSlot,
    #[serde(default, deserialize_with = "slot")]
    pub dark: DefaultSlot,
    #[serde(default, deserialize_with = "slot")]
    pub hc_dark: DefaultSlot,
    #[serde(default, deserialize_with = "slot")]
    pub hc_light: DefaultSlot,
}

fn slot<'de, D>(deserializer: D) -> Result<DefaultSlot, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<ColorValue>::deserialize(deserializer).map(DefaultSlot::from)
}

impl ColorDefaults {
    /// Defaults for all four variants; `None` registers a null default.
    #[must_use]
    pub fn new(
        light: Option<ColorValue>,
        dark: Option<ColorValue>,
        hc_dark: Option<ColorValue>,
        hc_light: Option<ColorValue>,
    ) -> Self {
        Self {
            light: light.into(),
            dark: dark.into(),
            hc_dark: hc_dark.into(),
            hc_light: hc_light.into(),
        }
    }

    /// The same value in every variant.
    #[must_use]
    pub fn all(value: impl Into<ColorValue>) -> Self {
        let value = value.into();
        Self::new(
            Some(value.clone()),
            Some(value.clone()),
            Some(value.clone()),
            Some(value),
        )
    }

    /// Replace one variant's slot.
    #[must_use]
    pub fn with(mut self, appearance: Appearance, slot: DefaultSlot) -> Self {
        *self.slot_mut(appearance) = slot;
        self
    }

    #[must_use]
    pub const fn slot(&self, appearance: Appearance) -> &DefaultSlot {
        match appearance {
            Appearance::Light => &self.light,
            Appearance::Dark => &self.dark,
            Appearance::HighContrastDark => &self.hc_dark,
            Appearance::HighContrastLight => &self.hc_light,
        }
    }

    const fn slot_mut(&mut self, appearance: Appearance) -> &mut DefaultSlot {
        match appearance {
            Appearance::Light => &mut self.light,
            Appearance::Dark => &mut self.dark,
            Appearance::HighContrastDark => &mut self.hc_dark,
            Appearance::HighContrastLight => &mut self.hc_light,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Parsing rule ────────────────────────────────────────────────

    #[test]
    fn hash_prefix_is_literal() {
        assert_eq!(ColorValue::parse("#fff"), ColorValue::Literal("#fff".into()));
    }

    #[test]
    fn anything_else_is_reference() {
        assert_eq!(
            ColorValue::parse("editor.background"),
            ColorValue::Reference("editor.background".into())
        );
        // Even text that looks like a color name.
        assert_eq!(ColorValue::parse("red"), ColorValue::Reference("red".into()));
    }

    #[test]
    fn malformed_hex_is_still_a_literal() {
        assert!(ColorValue::parse("#nothex").is_literal());
    }

    // ── Deserialization ─────────────────────────────────────────────

    #[test]
    fn deserialize_string_forms() {
        let lit: ColorValue = serde_json::from_str(r##""#112233""##).unwrap();
        let reference: ColorValue = serde_json::from_str(r#""foreground""#).unwrap();
        assert_eq!(lit, ColorValue::parse("#112233"));
        assert_eq!(reference, ColorValue::parse("foreground"));
    }

    #[test]
    fn deserialize_nested_transform() {
        let json = r##"{
            "op": "lessProminent",
            "value": "editor.selectionBackground",
            "background": {"op": "darken", "value": "#1e1e1e", "factor": 0.1},
            "factor": 0.3,
            "transparency": 0.6
        }"##;
        let value: ColorValue = serde_json::from_str(json).unwrap();
        let expected = ColorValue::parse("editor.selectionBackground").less_prominent(
            ColorValue::parse("#1e1e1e").darken(0.1),
            0.3,
            0.6,
        );
        assert_eq!(value, expected);
    }

    #[test]
    fn deserialize_one_of_and_if_defined() {
        let json = r##"{
            "op": "oneOf",
            "values": [
                {"op": "ifDefinedThenElse", "if": "tab.border", "then": "tab.border", "else": "#000"},
                "contrastBorder"
            ]
        }"##;
        let value: ColorValue = serde_json::from_str(json).unwrap();
        let expected = ColorValue::one_of([
            ColorValue::if_defined_then_else("tab.border", "tab.border", "#000"),
            ColorValue::parse("contrastBorder"),
        ]);
        assert_eq!(value, expected);
    }

    #[test]
    fn integer_factor_is_accepted() {
        let value: ColorValue =
            serde_json::from_str(r##"{"op": "transparent", "value": "#fff", "factor": 1}"##).unwrap();
        assert_eq!(value, ColorValue::parse("#fff").transparent(1.0));
    }

    #[test]
    fn unknown_op_is_rejected() {
        let result: Result<ColorValue, _> =
            serde_json::from_str(r##"{"op": "saturate", "value": "#fff", "factor": 0.1}"##);
        assert!(result.is_err());
    }

    // ── Defaults ────────────────────────────────────────────────────

    #[test]
    fn missing_key_is_absent_null_is_null() {
        let defaults: ColorDefaults =
            serde_json::from_str(r##"{"dark": "#1e1e1e", "light": null}"##).unwrap();
        assert_eq!(defaults.dark, DefaultSlot::Value(ColorValue::parse("#1e1e1e")));
        assert_eq!(defaults.light, DefaultSlot::Null);
        assert_eq!(defaults.hc_dark, DefaultSlot::Absent);
        assert_eq!(defaults.hc_light, DefaultSlot::Absent);
    }

    #[test]
    fn camel_case_high_contrast_keys() {
        let defaults: ColorDefaults =
            serde_json::from_str(r##"{"hcDark": "#000000", "hcLight": "#ffffff"}"##).unwrap();
        assert_eq!(
            defaults.slot(Appearance::HighContrastDark),
            &DefaultSlot::Value(ColorValue::parse("#000000"))
        );
        assert_eq!(
            defaults.slot(Appearance::HighContrastLight),
            &DefaultSlot::Value(ColorValue::parse("#ffffff"))
        );
    }

    #[test]
    fn all_fills_every_slot() {
        let defaults = ColorDefaults::all("foreground");
        for appearance in Appearance::ALL {
            assert_eq!(
                defaults.slot(appearance),
                &DefaultSlot::Value(ColorValue::parse("foreground"))
            );
        }
    }

    #[test]
    fn with_replaces_one_slot() {
        let defaults = ColorDefaults::all("#fff").with(Appearance::Light, DefaultSlot::Absent);
        assert_eq!(defaults.light, DefaultSlot::Absent);
        assert_eq!(defaults.dark, DefaultSlot::Value(ColorValue::parse("#fff")));
    }
}
