//! Prominence arithmetic — the math behind `lessProminent`.
//!
//! A "less prominent" color keeps its hue but sits closer to its background
//! in brightness:
//!
//! - darker than the background → moved toward white
//! - otherwise → moved toward black
//!
//! Direction is decided by WCAG relative luminance. The size of the move is
//! `factor × gap / lum(brighter)`, so it shrinks as the two luminances
//! converge. The move itself happens in linear light, where luminance is
//! linear in the channels, so the result lands exactly at
//! `lum(fg) ± amount × gap` and can never cross the background.

use n_color::Color;

/// Move `of` toward white, closing part of its luminance gap to `relative`.
///
/// Returns `of` unchanged when it is not darker than `relative`. Otherwise
/// the result's luminance is `lum(of) + amount × gap`, with
/// `amount = factor × gap / lum(relative)`.
#[must_use]
pub fn lighter_relative(of: Color, relative: Color, factor: f64) -> Color {
    let lum_of = of.relative_luminance();
    let lum_rel = relative.relative_luminance();
    if lum_of >= lum_rel {
        return of;
    }

    let gap = lum_rel - lum_of;
    let amount = factor * gap / lum_rel;
    // lum_of < lum_rel <= 1, so the headroom is never zero.
    let t = amount * gap / (1.0 - lum_of);
    of.blend_toward_white(t)
}

/// Move `of` toward black, closing part of its luminance gap to `relative`.
///
/// Returns `of` unchanged when it is not lighter than `relative`. Otherwise
/// the result's luminance is `lum(of) − amount × gap`, with
/// `amount = factor × gap / lum(of)`.
#[must_use]
pub fn darker_relative(of: Color, relative: Color, factor: f64) -> Color {
    let lum_of = of.relative_luminance();
    let lum_rel = relative.relative_luminance();
    if lum_of <= lum_rel {
        return of;
    }

    let gap = lum_of - lum_rel;
    let amount = factor * gap / lum_of;
    of.blend_toward_black(amount * gap / lum_of)
}

/// The `lessProminent` transform on already-resolved colors.
///
/// Without a background only the alpha changes, to `factor × transparency`.
/// With one, `fg` is pulled toward it and its alpha set to `transparency`.
#[must_use]
pub fn less_prominent(fg: Color, bg: Option<Color>, factor: f64, transparency: f64) -> Color {
    let Some(bg) = bg else {
        return fg.with_alpha(factor * transparency);
    };

    let pulled = if fg.is_darker_than(bg) {
        lighter_relative(fg, bg, factor)
    } else {
        darker_relative(fg, bg, factor)
    };
    pulled.with_alpha(transparency)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
