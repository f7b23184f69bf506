// SPDX-License-Identifier: MIT
//
// n-color color system — sRGB values with HSL and linear-light operations.
//
// Single-character variable names (r, g, b, h, s, l, a, p, q, t) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference implementations.
#![allow(clippy::many_single_char_names)]
//
// Channels are stored gamma-encoded in [0.0, 1.0] so that a color parsed
// from hex and formatted back without modification round-trips exactly.
// Quantization to 8 bits happens only in `to_rgba8` / `to_hex`.
//
// Two families of adjustment live here:
//
//   HSL lightness (`lighten`, `darken`)   — relative shifts of the HSL `l`
//                                            channel, the classic theme math
//   Linear light (`blend_toward_white`,   — moves in linear sRGB, where
//                 `blend_toward_black`)     relative luminance is linear in
//                                            the channels

use std::fmt;

// ─── Color ───────────────────────────────────────────────────────────────────

/// An sRGB color with alpha.
///
/// # Examples
///
/// ```
/// use n_color::Color;
///
/// let bg = Color::hex("#1e1e1e").unwrap();
/// assert_eq!(bg.to_hex(), "#1e1e1e");
///
/// let hover = Color::hex("#0e639c").unwrap().lighten(0.2);
/// assert_eq!(hover.to_hex(), "#1177bb");
///
/// let shadow = Color::BLACK.with_alpha(0.5);
/// assert_eq!(shadow.to_hex(), "#00000080");
/// ```
#[derive(Clone, Copy)]
pub struct Color {
    /// Red, gamma-encoded, 0.0 to 1.0.
    pub r: f64,
    /// Green, gamma-encoded, 0.0 to 1.0.
    pub g: f64,
    /// Blue, gamma-encoded, 0.0 to 1.0.
    pub b: f64,
    /// Alpha (opacity): 0.0 (fully transparent) to 1.0 (fully opaque).
    pub alpha: f64,
}

impl Color {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create an opaque color from sRGB values (0.0 to 1.0 range).
    #[inline]
    #[must_use]
    pub const fn srgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    /// Create a color from sRGB values with alpha.
    #[inline]
    #[must_use]
    pub const fn srgba(r: f64, g: f64, b: f64, alpha: f64) -> Self {
        Self { r, g, b, alpha }
    }

    /// Create an opaque color from 8-bit sRGB values.
    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::srgb(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Create a color from 8-bit sRGB values with alpha.
    #[must_use]
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::srgba(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            f64::from(a) / 255.0,
        )
    }

    /// Parse a hex color string.
    ///
    /// Supports `#RGB`, `#RGBA`, `#RRGGBB` and `#RRGGBBAA`, either case,
    /// with or without the leading `#`. Returns `None` for anything else.
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        parse_hex(s)
    }

    /// Create a color from HSL components with alpha.
    ///
    /// - `h`: hue in degrees (any value, wrapped to 0–360)
    /// - `s`, `l`: saturation and lightness, 0.0 to 1.0
    #[must_use]
    pub fn hsla(h: f64, s: f64, l: f64, alpha: f64) -> Self {
        let (r, g, b) = hsl_to_srgb(normalize_hue(h), s.clamp(0.0, 1.0), l.clamp(0.0, 1.0));
        Self { r, g, b, alpha }
    }

    /// Pure black.
    pub const BLACK: Self = Self::srgb(0.0, 0.0, 0.0);

    /// Pure white.
    pub const WHITE: Self = Self::srgb(1.0, 1.0, 1.0);

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::srgba(0.0, 0.0, 0.0, 0.0);

    // ─── Alpha ───────────────────────────────────────────────────────────

    /// Return a copy with the alpha channel set to `alpha` (clamped to 0.0–1.0).
    #[inline]
    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Whether this color is fully opaque once quantized to 8 bits.
    #[inline]
    #[must_use]
    pub fn is_opaque(self) -> bool {
        to_u8(self.alpha) == u8::MAX
    }

    // ─── HSL ─────────────────────────────────────────────────────────────

    /// Convert to HSL: hue in degrees [0, 360), saturation and lightness in [0, 1].
    #[must_use]
    pub fn to_hsl(self) -> (f64, f64, f64) {
        srgb_to_hsl(self.r, self.g, self.b)
    }

    /// Raise HSL lightness by `factor` of its current value (`l + l × factor`).
    ///
    /// Lightness is clamped to 1.0. Black stays black.
    #[must_use]
    pub fn lighten(self, factor: f64) -> Self {
        let (h, s, l) = self.to_hsl();
        Self::hsla(h, s, l.mul_add(factor, l), self.alpha)
    }

    /// Lower HSL lightness by `factor` of its current value (`l − l × factor`).
    #[must_use]
    pub fn darken(self, factor: f64) -> Self {
        let (h, s, l) = self.to_hsl();
        Self::hsla(h, s, (-l).mul_add(factor, l), self.alpha)
    }

    // ─── Luminance ───────────────────────────────────────────────────────

    /// WCAG 2.1 relative luminance, 0.0 (black) to 1.0 (white).
    ///
    ///   L = 0.2126 × `R_lin` + 0.7152 × `G_lin` + 0.0722 × `B_lin`
    ///
    /// Alpha is ignored.
    #[must_use]
    pub fn relative_luminance(self) -> f64 {
        let (r, g, b) = self.to_linear_srgb();
        0.2126f64.mul_add(r, 0.7152f64.mul_add(g, 0.0722 * b))
    }

    /// Whether this color has lower relative luminance than `other`.
    #[inline]
    #[must_use]
    pub fn is_darker_than(self, other: Self) -> bool {
        self.relative_luminance() < other.relative_luminance()
    }

    /// Whether this color has higher relative luminance than `other`.
    #[inline]
    #[must_use]
    pub fn is_lighter_than(self, other: Self) -> bool {
        self.relative_luminance() > other.relative_luminance()
    }

    // ─── Linear-light moves ──────────────────────────────────────────────
    //
    // Relative luminance is a weighted sum of linear channels, so moving each
    // linear channel by the same fraction moves luminance by exactly that
    // fraction. `t` is clamped to 0.0–1.0; alpha is preserved.

    /// Move every linear channel a fraction `t` of the way toward white.
    ///
    /// Resulting luminance: `L + t × (1 − L)`.
    #[must_use]
    pub fn blend_toward_white(self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let (r, g, b) = self.to_linear_srgb();
        let lift = |c: f64| linear_to_srgb((1.0 - c).mul_add(t, c));
        Self {
            r: lift(r),
            g: lift(g),
            b: lift(b),
            alpha: self.alpha,
        }
    }

    /// Scale every linear channel by `1 − t`, a fraction `t` of the way to black.
    ///
    /// Resulting luminance: `L × (1 − t)`.
    #[must_use]
    pub fn blend_toward_black(self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let (r, g, b) = self.to_linear_srgb();
        let sink = |c: f64| linear_to_srgb(c * (1.0 - t));
        Self {
            r: sink(r),
            g: sink(g),
            b: sink(b),
            alpha: self.alpha,
        }
    }

    // ─── Conversions ─────────────────────────────────────────────────────

    /// Channels converted to linear sRGB (clamped to 0.0–1.0 first).
    #[must_use]
    pub fn to_linear_srgb(self) -> (f64, f64, f64) {
        (
            srgb_to_linear(self.r.clamp(0.0, 1.0)),
            srgb_to_linear(self.g.clamp(0.0, 1.0)),
            srgb_to_linear(self.b.clamp(0.0, 1.0)),
        )
    }

    /// Convert to 8-bit sRGB.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }

    /// Convert to 8-bit sRGBA.
    #[must_use]
    pub fn to_rgba8(self) -> (u8, u8, u8, u8) {
        let (r, g, b) = self.to_rgb8();
        (r, g, b, to_u8(self.alpha))
    }

    /// Format as lowercase hex: `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    #[must_use]
    pub fn to_hex(self) -> String {
        let (r, g, b, a) = self.to_rgba8();
        if a == u8::MAX {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Color::srgba({:.4}, {:.4}, {:.4}, {:.2})",
            self.r, self.g, self.b, self.alpha
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        // Compare with small epsilon for floating point
        const EPS: f64 = 1e-9;
        (self.r - other.r).abs() < EPS
            && (self.g - other.g).abs() < EPS
            && (self.b - other.b).abs() < EPS
            && (self.alpha - other.alpha).abs() < EPS
    }
}

impl Default for Color {
    /// Default is fully opaque black.
    fn default() -> Self {
        Self::BLACK
    }
}

// ─── HSL ↔ sRGB ──────────────────────────────────────────────────────────────

/// Normalize a hue angle to the range [0, 360).
#[inline]
fn normalize_hue(h: f64) -> f64 {
    let h = h % 360.0;
    if h < 0.0 { h + 360.0 } else { h }
}

fn srgb_to_hsl(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) * 0.5;
    let d = max - min;

    if d <= f64::EPSILON {
        return (0.0, 0.0, l); // Achromatic — hue is undefined, default to 0
    }

    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    #[allow(clippy::float_cmp)] // max is one of r, g, b exactly
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h * 60.0, s, l)
}

fn hsl_to_srgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    if s <= 0.0 {
        return (l, l, l);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l.mul_add(-s, l + s) };
    let p = 2.0f64.mul_add(l, -q);
    let h = h / 360.0;

    (
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        ((q - p) * 6.0).mul_add(t, p)
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        ((q - p) * (2.0 / 3.0 - t)).mul_add(6.0, p)
    } else {
        p
    }
}

// ─── Linear sRGB ↔ sRGB (Gamma) ─────────────────────────────────────────────
//
// sRGB uses a piecewise transfer function (gamma curve) to encode linear
// light values into the perceptual domain. Luminance MUST be computed in
// linear space.

/// Convert a single linear sRGB component to sRGB (apply gamma).
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f64.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// Convert a single sRGB component to linear sRGB (remove gamma).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Color> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        // #RGB
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some(Color::rgb8(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #RGBA
        4 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            let a = parse_hex_digit(bytes[3])?;
            Some(Color::rgba8(r << 4 | r, g << 4 | g, b << 4 | b, a << 4 | a))
        }
        // #RRGGBB
        6 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            Some(Color::rgb8(r, g, b))
        }
        // #RRGGBBAA
        8 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            let a = parse_hex_byte(&bytes[6..8])?;
            Some(Color::rgba8(r, g, b, a))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with correct rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.clamp(0.0, 1.0).mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    // ── Hex Parsing ──────────────────────────────────────────────────────

    #[test]
    fn hex_parsing_rrggbb() {
        let c = Color::hex("#ff8000").unwrap();
        assert_eq!(c.to_rgb8(), (255, 128, 0));
        assert!(c.is_opaque());
    }

    #[test]
    fn hex_parsing_short() {
        let c = Color::hex("#f80").unwrap();
        assert_eq!(c.to_rgb8(), (255, 136, 0));
    }

    #[test]
    fn hex_parsing_with_alpha() {
        let c = Color::hex("#00000080").unwrap();
        assert_eq!(c.to_rgba8(), (0, 0, 0, 128));
        assert!(!c.is_opaque());
    }

    #[test]
    fn hex_parsing_uppercase_and_no_hash() {
        let c = Color::hex("1E1E1E").unwrap();
        assert_eq!(c.to_rgb8(), (30, 30, 30));
    }

    #[test]
    fn hex_parsing_invalid() {
        assert!(Color::hex("#gg0000").is_none());
        assert!(Color::hex("#12345").is_none());
        assert!(Color::hex("").is_none());
        assert!(Color::hex("editor.background").is_none());
    }

    #[test]
    fn hex_roundtrip() {
        for s in ["#1e1e1e", "#007acc", "#ffffff", "#00000080", "#ea5c0055"] {
            assert_eq!(Color::hex(s).unwrap().to_hex(), s);
        }
    }

    #[test]
    fn hex_output_is_lowercase() {
        assert_eq!(Color::hex("#ABCDEF").unwrap().to_hex(), "#abcdef");
    }

    #[test]
    fn opaque_alpha_is_omitted() {
        assert_eq!(Color::hex("#123456ff").unwrap().to_hex(), "#123456");
    }

    // ── Alpha ────────────────────────────────────────────────────────────

    #[test]
    fn with_alpha_half_is_0x80() {
        assert_eq!(Color::BLACK.with_alpha(0.5).to_hex(), "#00000080");
    }

    #[test]
    fn with_alpha_replaces_existing_alpha() {
        let c = Color::hex("#ff000040").unwrap().with_alpha(1.0);
        assert_eq!(c.to_hex(), "#ff0000");
    }

    #[test]
    fn with_alpha_clamps() {
        assert!(approx_eq(Color::WHITE.with_alpha(2.0).alpha, 1.0, 1e-12));
        assert!(approx_eq(Color::WHITE.with_alpha(-1.0).alpha, 0.0, 1e-12));
    }

    // ── HSL ──────────────────────────────────────────────────────────────

    #[test]
    fn hsl_of_pure_red() {
        let (h, s, l) = Color::srgb(1.0, 0.0, 0.0).to_hsl();
        assert!(approx_eq(h, 0.0, 1e-9));
        assert!(approx_eq(s, 1.0, 1e-9));
        assert!(approx_eq(l, 0.5, 1e-9));
    }

    #[test]
    fn hsl_of_gray_is_achromatic() {
        let (h, s, l) = Color::rgb8(128, 128, 128).to_hsl();
        assert!(approx_eq(h, 0.0, 1e-9));
        assert!(approx_eq(s, 0.0, 1e-9));
        assert!(approx_eq(l, 128.0 / 255.0, 1e-9));
    }

    #[test]
    fn hsl_roundtrip() {
        for s in ["#0e639c", "#f48771", "#73c991", "#68217a", "#cca700"] {
            let c = Color::hex(s).unwrap();
            let (h, sat, l) = c.to_hsl();
            assert_eq!(Color::hsla(h, sat, l, 1.0).to_hex(), s);
        }
    }

    #[test]
    fn lighten_is_relative_to_lightness() {
        assert_eq!(Color::hex("#0e639c").unwrap().lighten(0.2).to_hex(), "#1177bb");
    }

    #[test]
    fn darken_is_relative_to_lightness() {
        let c = Color::hex("#808080").unwrap();
        let (_, _, before) = c.to_hsl();
        let (_, _, after) = c.darken(0.5).to_hsl();
        assert!(approx_eq(after, before * 0.5, 1e-9));
    }

    #[test]
    fn lighten_clamps_to_white() {
        assert_eq!(Color::hex("#eeeeee").unwrap().lighten(1.0).to_hex(), "#ffffff");
    }

    #[test]
    fn lighten_black_stays_black() {
        assert_eq!(Color::BLACK.lighten(0.5).to_hex(), "#000000");
    }

    #[test]
    fn lighten_and_darken_preserve_alpha() {
        let c = Color::hex("#33669980").unwrap();
        assert_eq!(c.lighten(0.1).to_rgba8().3, 128);
        assert_eq!(c.darken(0.1).to_rgba8().3, 128);
    }

    // ── Luminance ────────────────────────────────────────────────────────

    #[test]
    fn luminance_black_is_zero() {
        assert!(approx_eq(Color::BLACK.relative_luminance(), 0.0, 1e-12));
    }

    #[test]
    fn luminance_white_is_one() {
        assert!(approx_eq(Color::WHITE.relative_luminance(), 1.0, 1e-12));
    }

    #[test]
    fn luminance_pure_green() {
        let lum = Color::srgb(0.0, 1.0, 0.0).relative_luminance();
        assert!(approx_eq(lum, 0.7152, 1e-9), "Green luminance: {lum}");
    }

    #[test]
    fn darker_and_lighter_comparisons() {
        let dark = Color::hex("#1e1e1e").unwrap();
        let light = Color::hex("#cccccc").unwrap();
        assert!(dark.is_darker_than(light));
        assert!(light.is_lighter_than(dark));
        assert!(!dark.is_darker_than(dark));
    }

    // ── Linear-light moves ───────────────────────────────────────────────

    #[test]
    fn blend_toward_white_moves_luminance_linearly() {
        let c = Color::hex("#336699").unwrap();
        let before = c.relative_luminance();
        let after = c.blend_toward_white(0.25).relative_luminance();
        assert!(approx_eq(after, 0.25f64.mul_add(1.0 - before, before), 1e-9));
    }

    #[test]
    fn blend_toward_black_scales_luminance() {
        let c = Color::hex("#c0a080").unwrap();
        let before = c.relative_luminance();
        let after = c.blend_toward_black(0.4).relative_luminance();
        assert!(approx_eq(after, before * 0.6, 1e-9));
    }

    #[test]
    fn blend_at_zero_is_identity() {
        let c = Color::hex("#4e94ce").unwrap();
        assert_eq!(c.blend_toward_white(0.0).to_hex(), "#4e94ce");
        assert_eq!(c.blend_toward_black(0.0).to_hex(), "#4e94ce");
    }

    #[test]
    fn blend_at_one_reaches_the_pole() {
        let c = Color::hex("#4e94ce").unwrap();
        assert_eq!(c.blend_toward_white(1.0).to_hex(), "#ffffff");
        assert_eq!(c.blend_toward_black(1.0).to_hex(), "#000000");
    }

    // ── Gamma ────────────────────────────────────────────────────────────

    #[test]
    fn gamma_roundtrip() {
        for i in 0..=255u8 {
            let v = f64::from(i) / 255.0;
            assert!(approx_eq(linear_to_srgb(srgb_to_linear(v)), v, 1e-12));
        }
    }

    // ── Display / Debug ──────────────────────────────────────────────────

    #[test]
    fn color_display_hex() {
        assert_eq!(format!("{}", Color::WHITE), "#ffffff");
    }

    #[test]
    fn color_debug_format() {
        assert_eq!(
            format!("{:?}", Color::BLACK),
            "Color::srgba(0.0000, 0.0000, 0.0000, 1.00)"
        );
    }
}
