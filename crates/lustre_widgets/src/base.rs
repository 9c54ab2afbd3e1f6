//! State shared by every themed surface

use lustre_core::{Color, PaintHooks, Point, Rect, Size};
use lustre_theme::{palette, resolve_style, ColorRole, ResolvedStyle, StyledSurface, SurfaceStyle};

/// Style inputs, paint hooks and placement of a surface
#[derive(Debug)]
pub struct SurfaceBase {
    pub style: SurfaceStyle,
    pub hooks: PaintHooks,
    /// Owner-draw capability; `false` leaves rendering to the host
    pub self_paints: bool,
    /// Screen position of the top-left corner
    pub position: Point,
    pub size: Size,
    pub visible: bool,
    dirty: bool,
}

impl SurfaceBase {
    pub fn new(size: Size) -> Self {
        Self {
            style: SurfaceStyle::new(),
            hooks: PaintHooks::new(),
            self_paints: true,
            position: Point::ZERO,
            size,
            visible: false,
            dirty: true,
        }
    }

    /// Local paint region, origin at (0, 0)
    pub fn local_bounds(&self) -> Rect {
        self.size.to_rect()
    }

    /// Placement in screen coordinates
    pub fn screen_bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Palette color for `role` under the surface's current style
    pub fn color(&self, role: ColorRole) -> Color {
        let resolved = self.resolved();
        palette(resolved.theme, resolved.color, role)
    }

    pub fn resolved(&self) -> ResolvedStyle {
        resolve_style(self)
    }

    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Whether a repaint was requested since the last call
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl StyledSurface for SurfaceBase {
    fn surface_style(&self) -> &SurfaceStyle {
        &self.style
    }

    fn surface_style_mut(&mut self) -> &mut SurfaceStyle {
        &mut self.style
    }

    fn style_changed(&mut self, resolved: ResolvedStyle) {
        tracing::trace!("surface restyled to {:?}/{:?}", resolved.color, resolved.theme);
        self.dirty = true;
    }
}

/// Implement [`StyledSurface`] for a widget by forwarding to its `base` field
macro_rules! impl_surface_base {
    ($ty:ty) => {
        impl lustre_theme::StyledSurface for $ty {
            fn surface_style(&self) -> &lustre_theme::SurfaceStyle {
                &self.base.style
            }

            fn surface_style_mut(&mut self) -> &mut lustre_theme::SurfaceStyle {
                &mut self.base.style
            }

            fn style_changed(&mut self, resolved: lustre_theme::ResolvedStyle) {
                lustre_theme::StyledSurface::style_changed(&mut self.base, resolved);
            }
        }
    };
}

pub(crate) use impl_surface_base;
