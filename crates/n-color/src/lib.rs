// SPDX-License-Identifier: MIT
//
// n-color — the color value type behind n-chroma.
//
// Theme documents speak in hex strings. This crate turns those strings into
// a small sRGB value type, applies the handful of operations derived theme
// colors need (HSL lightness shifts, alpha, linear-light moves toward white
// or black), measures WCAG relative luminance, and formats the result back
// into the `#rrggbb` / `#rrggbbaa` form renderers consume.

pub mod color;

pub use color::{Color, linear_to_srgb, srgb_to_linear};
