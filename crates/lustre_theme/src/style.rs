//! Color and theme style axes

use serde::{Deserialize, Serialize};

/// Accent color variant
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorStyle {
    /// Unset; inherit from the style authority
    #[default]
    Default,
    Black,
    White,
    Silver,
    Blue,
    Green,
    Lime,
    Teal,
    Orange,
    Brown,
    Pink,
    Magenta,
    Purple,
    Red,
    Yellow,
}

impl ColorStyle {
    /// Every concrete (non-`Default`) variant
    pub const CONCRETE: [ColorStyle; 14] = [
        ColorStyle::Black,
        ColorStyle::White,
        ColorStyle::Silver,
        ColorStyle::Blue,
        ColorStyle::Green,
        ColorStyle::Lime,
        ColorStyle::Teal,
        ColorStyle::Orange,
        ColorStyle::Brown,
        ColorStyle::Pink,
        ColorStyle::Magenta,
        ColorStyle::Purple,
        ColorStyle::Red,
        ColorStyle::Yellow,
    ];

    pub fn is_default(self) -> bool {
        self == ColorStyle::Default
    }
}

/// Light/dark variant
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeStyle {
    /// Unset; inherit from the style authority
    #[default]
    Default,
    Light,
    Dark,
}

impl ThemeStyle {
    pub const CONCRETE: [ThemeStyle; 2] = [ThemeStyle::Light, ThemeStyle::Dark];

    pub fn is_default(self) -> bool {
        self == ThemeStyle::Default
    }

    /// Swap light and dark. `Default` stays `Default`.
    pub fn toggle(self) -> Self {
        match self {
            ThemeStyle::Light => ThemeStyle::Dark,
            ThemeStyle::Dark => ThemeStyle::Light,
            ThemeStyle::Default => ThemeStyle::Default,
        }
    }
}

/// Effective style of a surface, as computed by the cascade
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
pub struct ResolvedStyle {
    pub color: ColorStyle,
    pub theme: ThemeStyle,
}

impl ResolvedStyle {
    pub const fn new(color: ColorStyle, theme: ThemeStyle) -> Self {
        Self { color, theme }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_swaps_concrete_themes() {
        assert_eq!(ThemeStyle::Light.toggle(), ThemeStyle::Dark);
        assert_eq!(ThemeStyle::Dark.toggle(), ThemeStyle::Light);
        assert_eq!(ThemeStyle::Default.toggle(), ThemeStyle::Default);
    }

    #[test]
    fn concrete_lists_exclude_default() {
        assert!(ColorStyle::CONCRETE.iter().all(|c| !c.is_default()));
        assert!(ThemeStyle::CONCRETE.iter().all(|t| !t.is_default()));
    }
}
