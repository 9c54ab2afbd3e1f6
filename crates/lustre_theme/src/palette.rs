//! Palette provider
//!
//! The color table is a pure function of `(theme, color style, role)`. Painting
//! code only ever calls it; it never caches the result, so a style change is
//! visible on the next paint.
//!
//! `Default` inputs are looked up as the cascade fallback (`Blue` / `Light`),
//! so a lookup never fails.

use lustre_core::Color;

use crate::cascade::{FALLBACK_COLOR_STYLE, FALLBACK_THEME_STYLE};
use crate::style::{ColorStyle, ThemeStyle};

/// Semantic color role
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ColorRole {
    // Accent
    Accent,
    AccentHover,
    AccentPressed,
    /// Text drawn on top of the accent color
    AccentText,

    // Surfaces
    Background,
    Surface,
    SurfaceHover,

    // Text
    Foreground,
    ForegroundMuted,

    // Chrome
    Border,
    Disabled,
    ProgressTrack,
}

/// Color table lookup
pub trait Palette {
    fn color(&self, theme: ThemeStyle, color: ColorStyle, role: ColorRole) -> Color;
}

impl<F> Palette for F
where
    F: Fn(ThemeStyle, ColorStyle, ColorRole) -> Color,
{
    fn color(&self, theme: ThemeStyle, color: ColorStyle, role: ColorRole) -> Color {
        self(theme, color, role)
    }
}

/// Built-in flat palette
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatPalette;

impl FlatPalette {
    /// Accent color of a style
    pub fn accent(color: ColorStyle) -> Color {
        match color {
            ColorStyle::Black => Color::from_rgb8(0, 0, 0),
            ColorStyle::White => Color::from_rgb8(255, 255, 255),
            ColorStyle::Silver => Color::from_rgb8(85, 85, 85),
            ColorStyle::Blue | ColorStyle::Default => Color::from_rgb8(0, 174, 219),
            ColorStyle::Green => Color::from_rgb8(0, 177, 89),
            ColorStyle::Lime => Color::from_rgb8(142, 188, 0),
            ColorStyle::Teal => Color::from_rgb8(0, 170, 173),
            ColorStyle::Orange => Color::from_rgb8(243, 119, 53),
            ColorStyle::Brown => Color::from_rgb8(165, 81, 0),
            ColorStyle::Pink => Color::from_rgb8(231, 113, 189),
            ColorStyle::Magenta => Color::from_rgb8(255, 0, 148),
            ColorStyle::Purple => Color::from_rgb8(124, 65, 153),
            ColorStyle::Red => Color::from_rgb8(209, 17, 65),
            ColorStyle::Yellow => Color::from_rgb8(255, 196, 37),
        }
    }

    fn neutral(theme: ThemeStyle, role: ColorRole) -> Color {
        let dark = theme == ThemeStyle::Dark;
        match role {
            ColorRole::Background if dark => Color::from_rgb8(17, 17, 17),
            ColorRole::Background => Color::from_rgb8(255, 255, 255),
            ColorRole::Surface if dark => Color::from_rgb8(30, 30, 30),
            ColorRole::Surface => Color::from_rgb8(243, 243, 243),
            ColorRole::SurfaceHover if dark => Color::from_rgb8(51, 51, 51),
            ColorRole::SurfaceHover => Color::from_rgb8(230, 230, 230),
            ColorRole::Foreground if dark => Color::from_rgb8(238, 238, 238),
            ColorRole::Foreground => Color::from_rgb8(17, 17, 17),
            ColorRole::ForegroundMuted if dark => Color::from_rgb8(153, 153, 153),
            ColorRole::ForegroundMuted => Color::from_rgb8(118, 118, 118),
            ColorRole::Border if dark => Color::from_rgb8(68, 68, 68),
            ColorRole::Border => Color::from_rgb8(204, 204, 204),
            ColorRole::Disabled if dark => Color::from_rgb8(85, 85, 85),
            ColorRole::Disabled => Color::from_rgb8(179, 179, 179),
            ColorRole::ProgressTrack if dark => Color::from_rgb8(43, 43, 43),
            ColorRole::ProgressTrack => Color::from_rgb8(224, 224, 224),
            // Accent roles are handled by the caller
            _ => Color::TRANSPARENT,
        }
    }
}

impl Palette for FlatPalette {
    fn color(&self, theme: ThemeStyle, color: ColorStyle, role: ColorRole) -> Color {
        let theme = if theme.is_default() {
            FALLBACK_THEME_STYLE
        } else {
            theme
        };
        let color = if color.is_default() {
            FALLBACK_COLOR_STYLE
        } else {
            color
        };

        let accent = Self::accent(color);
        match role {
            ColorRole::Accent => accent,
            ColorRole::AccentHover => accent.shade(0.15),
            ColorRole::AccentPressed => accent.shade(-0.15),
            ColorRole::AccentText => match color {
                ColorStyle::White | ColorStyle::Yellow | ColorStyle::Lime => Color::BLACK,
                _ => Color::WHITE,
            },
            _ => Self::neutral(theme, role),
        }
    }
}

/// Look up a color in the built-in palette
pub fn palette(theme: ThemeStyle, color: ColorStyle, role: ColorRole) -> Color {
    FlatPalette.color(theme, color, role)
}
