//! # n-theme — Color Theme Resolution Engine
//!
//! Turns a theme document (a handful of literal color overrides) into the
//! full set of concrete colors a workbench paints with. Every color the UI
//! uses is registered once with a default per appearance variant; defaults
//! may be literals, references to other identifiers, or transforms of them.
//!
//! # Architecture
//!
//! ```text
//! data/colors.json ──► builtin.rs ──► RegistryBuilder ──► ColorRegistry
//!                                                            │  (frozen)
//! theme.json ──► loader.rs (JSONC, includes) ──► Theme       │
//!                                                  │         │
//!                                                  ▼         ▼
//!                                   overlay.rs: variant defaults + overrides
//!                                                  │
//!                                                  ▼
//!                        resolve.rs: references, transforms, cycle detection
//!                                                  │
//!                                                  ▼
//!                                  "#rrggbb" / "#rrggbbaa" or None
//! ```
//!
//! Color arithmetic (HSL, luminance, hex) lives in `n-color`; the
//! `lessProminent` math is in [`contrast`].
//!
//! Loading and registration report failures as [`ThemeError`]. Resolution
//! never errors: anything unresolvable is `None`, and cycles are reported as
//! [`Diagnostic`]s beside the result.

pub mod appearance;
pub mod builtin;
pub mod config;
pub mod contrast;
pub mod error;
pub mod loader;
pub mod overlay;
pub mod registry;
pub mod resolve;
pub mod theme;
pub mod value;

pub use appearance::Appearance;
pub use builtin::{default_registry, register_defaults};
pub use config::EngineConfig;
pub use error::{Result, ThemeError};
pub use loader::{MemorySource, ThemeLoader, ThemeSource, parse_theme};
pub use overlay::ThemeOverlay;
pub use registry::{ColorRegistry, ColorTable, RegistrationMode, RegistryBuilder};
pub use resolve::{Diagnostic, Resolver, resolve, resolve_id};
pub use theme::{FontStyle, Theme, TokenRule, TokenSettings};
pub use value::{ColorDefaults, ColorTransform, ColorValue, DefaultSlot};
