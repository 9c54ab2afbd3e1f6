//! Lustre Theme System
//!
//! Decides which color/theme variant every themed surface paints with.
//!
//! # Overview
//!
//! - **Styles**: [`ColorStyle`] (accent) and [`ThemeStyle`] (light/dark), each
//!   with a `Default` sentinel meaning "unset, inherit"
//! - **Palette**: a pure `(theme, color, role) -> Color` lookup ([`Palette`],
//!   [`FlatPalette`])
//! - **Style authorities**: a [`StyleAuthority`] owns the style of a tree of
//!   surfaces and pushes changes to every live one before returning
//! - **Cascade**: [`resolve_style`] computes a surface's effective style on
//!   every read
//! - **Configuration**: [`SkinConfig`] loads skin defaults from TOML
//!
//! # Quick Start
//!
//! ```rust
//! use lustre_theme::{
//!     resolve_style, ColorStyle, StyleAuthority, StyledSurface, SurfaceRegistry, SurfaceStyle,
//!     ThemeStyle,
//! };
//!
//! #[derive(Default)]
//! struct Label {
//!     style: SurfaceStyle,
//! }
//!
//! impl StyledSurface for Label {
//!     fn surface_style(&self) -> &SurfaceStyle {
//!         &self.style
//!     }
//!     fn surface_style_mut(&mut self) -> &mut SurfaceStyle {
//!         &mut self.style
//!     }
//! }
//!
//! let mut registry = SurfaceRegistry::new();
//! let label = registry.insert(Label::default());
//!
//! let mut authority = StyleAuthority::new(ColorStyle::Green, ThemeStyle::Dark);
//! authority.attach(&mut registry, label);
//!
//! let resolved = resolve_style(registry.get(label).unwrap());
//! assert_eq!(resolved.color, ColorStyle::Green);
//! assert_eq!(resolved.theme, ThemeStyle::Dark);
//! ```

pub mod authority;
pub mod cascade;
pub mod config;
pub mod palette;
pub mod style;
pub mod surface;

pub use authority::{AuthorityLink, StyleAuthority};
pub use cascade::{
    apply_style, resolve_color_style, resolve_style, resolve_theme_style, FALLBACK_COLOR_STYLE,
    FALLBACK_THEME_STYLE,
};
pub use config::{ConfigError, ModalSettings, NotificationSettings, SkinConfig, TweenSettings};
pub use palette::{palette, ColorRole, FlatPalette, Palette};
pub use style::{ColorStyle, ResolvedStyle, ThemeStyle};
pub use surface::{StyledSurface, SurfaceId, SurfaceRegistry, SurfaceStore, SurfaceStyle};
