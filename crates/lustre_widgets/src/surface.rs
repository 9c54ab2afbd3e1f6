//! Closed set of surface kinds held in one registry

use lustre_core::{dispatch_paint, Canvas, OwnerDraw, PaintEventArgs, PaintHooks, PaintOutcome};
use lustre_theme::{ResolvedStyle, StyledSurface, SurfaceId, SurfaceRegistry, SurfaceStyle};

use crate::base::SurfaceBase;
use crate::grid::Grid;
use crate::menu::Menu;
use crate::message_box::MessageBox;
use crate::notification::Notification;
use crate::tooltip::Tooltip;

/// Registry of every live surface in an application
pub type SurfaceTree = SurfaceRegistry<Surface>;

#[derive(Debug)]
pub enum Surface {
    Menu(Menu),
    Tooltip(Tooltip),
    Grid(Grid),
    MessageBox(MessageBox),
    Notification(Notification),
}

macro_rules! each_surface {
    ($surface:expr, $inner:ident => $body:expr) => {
        match $surface {
            Surface::Menu($inner) => $body,
            Surface::Tooltip($inner) => $body,
            Surface::Grid($inner) => $body,
            Surface::MessageBox($inner) => $body,
            Surface::Notification($inner) => $body,
        }
    };
}

impl Surface {
    pub fn base(&self) -> &SurfaceBase {
        each_surface!(self, s => &s.base)
    }

    pub fn base_mut(&mut self) -> &mut SurfaceBase {
        each_surface!(self, s => &mut s.base)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Surface::Menu(_) => "menu",
            Surface::Tooltip(_) => "tooltip",
            Surface::Grid(_) => "grid",
            Surface::MessageBox(_) => "message_box",
            Surface::Notification(_) => "notification",
        }
    }

    pub fn as_notification(&self) -> Option<&Notification> {
        match self {
            Surface::Notification(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_notification_mut(&mut self) -> Option<&mut Notification> {
        match self {
            Surface::Notification(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_message_box_mut(&mut self) -> Option<&mut MessageBox> {
        match self {
            Surface::MessageBox(m) => Some(m),
            _ => None,
        }
    }
}

impl StyledSurface for Surface {
    fn surface_style(&self) -> &SurfaceStyle {
        each_surface!(self, s => s.surface_style())
    }

    fn surface_style_mut(&mut self) -> &mut SurfaceStyle {
        each_surface!(self, s => s.surface_style_mut())
    }

    fn style_changed(&mut self, resolved: ResolvedStyle) {
        each_surface!(self, s => s.style_changed(resolved))
    }
}

impl OwnerDraw for Surface {
    fn self_paints(&self) -> bool {
        each_surface!(self, s => s.self_paints())
    }

    fn paint_hooks(&mut self) -> &mut PaintHooks {
        each_surface!(self, s => s.paint_hooks())
    }

    fn paint_phase(&mut self, args: &mut PaintEventArgs<'_>) {
        each_surface!(self, s => s.paint_phase(args))
    }
}

impl From<Menu> for Surface {
    fn from(menu: Menu) -> Self {
        Surface::Menu(menu)
    }
}

impl From<Tooltip> for Surface {
    fn from(tooltip: Tooltip) -> Self {
        Surface::Tooltip(tooltip)
    }
}

impl From<Grid> for Surface {
    fn from(grid: Grid) -> Self {
        Surface::Grid(grid)
    }
}

impl From<MessageBox> for Surface {
    fn from(message_box: MessageBox) -> Self {
        Surface::MessageBox(message_box)
    }
}

impl From<Notification> for Surface {
    fn from(notification: Notification) -> Self {
        Surface::Notification(notification)
    }
}

/// Paint surface `id` over its whole local bounds.
///
/// Returns `None` when `id` is not live.
pub fn paint_surface(
    tree: &mut SurfaceTree,
    id: SurfaceId,
    canvas: &mut Canvas,
) -> Option<PaintOutcome> {
    let surface = tree.get_mut(id)?;
    let region = surface.base().local_bounds();
    let outcome = dispatch_paint(surface, canvas, region);
    tracing::trace!("painted {} {:?}: {:?}", surface.kind_name(), id, outcome);
    Some(outcome)
}
