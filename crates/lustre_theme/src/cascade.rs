//! Style resolution cascade
//!
//! Each axis resolves independently:
//!
//! 1. design-time flag set, or a non-`Default` local value: the local value
//! 2. a live style authority: the authority's value
//! 3. otherwise the built-in fallback (`Blue` / `Light`)
//!
//! Nothing is cached. Every read recomputes from the current inputs.

use crate::authority::AuthorityLink;
use crate::style::{ColorStyle, ResolvedStyle, ThemeStyle};
use crate::surface::{StyledSurface, SurfaceStyle};

pub const FALLBACK_COLOR_STYLE: ColorStyle = ColorStyle::Blue;
pub const FALLBACK_THEME_STYLE: ThemeStyle = ThemeStyle::Light;

pub fn resolve_color_style(style: &SurfaceStyle) -> ColorStyle {
    if style.design_time || !style.color_style.is_default() {
        return style.color_style;
    }
    style
        .authority
        .as_ref()
        .and_then(AuthorityLink::color_style)
        .unwrap_or(FALLBACK_COLOR_STYLE)
}

pub fn resolve_theme_style(style: &SurfaceStyle) -> ThemeStyle {
    if style.design_time || !style.theme_style.is_default() {
        return style.theme_style;
    }
    style
        .authority
        .as_ref()
        .and_then(AuthorityLink::theme_style)
        .unwrap_or(FALLBACK_THEME_STYLE)
}

/// Effective style of a surface
pub fn resolve_style<S>(surface: &S) -> ResolvedStyle
where
    S: StyledSurface + ?Sized,
{
    let style = surface.surface_style();
    ResolvedStyle {
        color: resolve_color_style(style),
        theme: resolve_theme_style(style),
    }
}

/// Resolve a surface and hand it the result
pub fn apply_style(surface: &mut dyn StyledSurface) -> ResolvedStyle {
    let resolved = resolve_style(&*surface);
    surface.style_changed(resolved);
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::StyleAuthority;

    #[derive(Clone, Copy, Debug)]
    enum Authority {
        Absent,
        Live,
        Dropped,
    }

    /// (local, design_time, authority, expected)
    const COLOR_CASES: &[(ColorStyle, bool, Authority, ColorStyle)] = &[
        (ColorStyle::Default, false, Authority::Absent, ColorStyle::Blue),
        (ColorStyle::Default, false, Authority::Live, ColorStyle::Orange),
        (ColorStyle::Default, false, Authority::Dropped, ColorStyle::Blue),
        (ColorStyle::Default, true, Authority::Absent, ColorStyle::Default),
        (ColorStyle::Default, true, Authority::Live, ColorStyle::Default),
        (ColorStyle::Default, true, Authority::Dropped, ColorStyle::Default),
        (ColorStyle::Green, false, Authority::Absent, ColorStyle::Green),
        (ColorStyle::Green, false, Authority::Live, ColorStyle::Green),
        (ColorStyle::Green, false, Authority::Dropped, ColorStyle::Green),
        (ColorStyle::Green, true, Authority::Absent, ColorStyle::Green),
        (ColorStyle::Green, true, Authority::Live, ColorStyle::Green),
        (ColorStyle::Green, true, Authority::Dropped, ColorStyle::Green),
    ];

    const THEME_CASES: &[(ThemeStyle, bool, Authority, ThemeStyle)] = &[
        (ThemeStyle::Default, false, Authority::Absent, ThemeStyle::Light),
        (ThemeStyle::Default, false, Authority::Live, ThemeStyle::Dark),
        (ThemeStyle::Default, false, Authority::Dropped, ThemeStyle::Light),
        (ThemeStyle::Default, true, Authority::Absent, ThemeStyle::Default),
        (ThemeStyle::Default, true, Authority::Live, ThemeStyle::Default),
        (ThemeStyle::Default, true, Authority::Dropped, ThemeStyle::Default),
        (ThemeStyle::Light, false, Authority::Absent, ThemeStyle::Light),
        (ThemeStyle::Light, false, Authority::Live, ThemeStyle::Light),
        (ThemeStyle::Light, false, Authority::Dropped, ThemeStyle::Light),
        (ThemeStyle::Light, true, Authority::Absent, ThemeStyle::Light),
        (ThemeStyle::Light, true, Authority::Live, ThemeStyle::Light),
        (ThemeStyle::Light, true, Authority::Dropped, ThemeStyle::Light),
    ];

    fn style_with(authority: Authority, live: &StyleAuthority) -> SurfaceStyle {
        let mut style = SurfaceStyle::new();
        style.authority = match authority {
            Authority::Absent => None,
            Authority::Live => Some(live.link()),
            Authority::Dropped => {
                let gone = StyleAuthority::new(ColorStyle::Purple, ThemeStyle::Dark);
                Some(gone.link())
            }
        };
        style
    }

    #[test]
    fn color_precedence_table() {
        let live = StyleAuthority::new(ColorStyle::Orange, ThemeStyle::Dark);
        for &(local, design_time, authority, expected) in COLOR_CASES {
            let style = style_with(authority, &live)
                .with_color_style(local)
                .with_design_time(design_time);
            assert_eq!(
                resolve_color_style(&style),
                expected,
                "local={:?} design_time={} authority={:?}",
                local,
                design_time,
                authority
            );
        }
    }

    #[test]
    fn theme_precedence_table() {
        let live = StyleAuthority::new(ColorStyle::Orange, ThemeStyle::Dark);
        for &(local, design_time, authority, expected) in THEME_CASES {
            let style = style_with(authority, &live)
                .with_theme_style(local)
                .with_design_time(design_time);
            assert_eq!(
                resolve_theme_style(&style),
                expected,
                "local={:?} design_time={} authority={:?}",
                local,
                design_time,
                authority
            );
        }
    }

    #[test]
    fn axes_resolve_independently() {
        let live = StyleAuthority::new(ColorStyle::Orange, ThemeStyle::Dark);
        let style = style_with(Authority::Live, &live).with_color_style(ColorStyle::Lime);
        assert_eq!(resolve_color_style(&style), ColorStyle::Lime);
        assert_eq!(resolve_theme_style(&style), ThemeStyle::Dark);
    }
}
