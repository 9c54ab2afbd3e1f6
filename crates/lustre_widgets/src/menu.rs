//! Flat drop-down menu

use lustre_core::{
    OwnerDraw, PaintEventArgs, PaintHooks, PaintPhase, Point, Rect, Size, TextAlign,
};
use lustre_theme::ColorRole;

use crate::base::{impl_surface_base, SurfaceBase};

const ITEM_HEIGHT: f32 = 28.0;
const SEPARATOR_HEIGHT: f32 = 9.0;
const TEXT_PADDING: f32 = 12.0;
const FONT_SIZE: f32 = 13.0;

/// Menu entry
#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem {
    pub label: String,
    pub shortcut: Option<String>,
    pub enabled: bool,
    pub checked: bool,
    pub separator: bool,
}

impl MenuItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            shortcut: None,
            enabled: true,
            checked: false,
            separator: false,
        }
    }

    pub fn separator() -> Self {
        Self {
            separator: true,
            ..Self::new("")
        }
    }

    pub fn shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    fn height(&self) -> f32 {
        if self.separator {
            SEPARATOR_HEIGHT
        } else {
            ITEM_HEIGHT
        }
    }

    fn selectable(&self) -> bool {
        self.enabled && !self.separator
    }
}

/// Drop-down menu surface
#[derive(Debug)]
pub struct Menu {
    pub base: SurfaceBase,
    items: Vec<MenuItem>,
    hovered: Option<usize>,
}

impl_surface_base!(Menu);

impl Menu {
    pub fn new(width: f32) -> Self {
        Self {
            base: SurfaceBase::new(Size::new(width, 0.0)),
            items: Vec::new(),
            hovered: None,
        }
    }

    pub fn item(mut self, item: MenuItem) -> Self {
        self.push(item);
        self
    }

    pub fn push(&mut self, item: MenuItem) {
        self.items.push(item);
        self.base.size.height = self.items.iter().map(MenuItem::height).sum();
        self.base.invalidate();
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Local rect of item `index`
    pub fn item_rect(&self, index: usize) -> Option<Rect> {
        let item = self.items.get(index)?;
        let top: f32 = self.items[..index].iter().map(MenuItem::height).sum();
        Some(Rect::new(0.0, top, self.base.size.width, item.height()))
    }

    /// Selectable item under a local point
    pub fn item_at(&self, point: Point) -> Option<usize> {
        (0..self.items.len()).find(|&i| {
            self.items[i].selectable()
                && self.item_rect(i).is_some_and(|rect| rect.contains(point))
        })
    }

    /// Track the pointer. Returns whether the hovered item changed.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        let hovered = self.item_at(point);
        if hovered == self.hovered {
            return false;
        }
        self.hovered = hovered;
        self.base.invalidate();
        true
    }

    pub fn pointer_leave(&mut self) {
        if self.hovered.take().is_some() {
            self.base.invalidate();
        }
    }

    /// Index of the activated item, if a selectable one was clicked
    pub fn click(&mut self, point: Point) -> Option<usize> {
        let index = self.item_at(point)?;
        tracing::debug!("menu item {} activated", index);
        Some(index)
    }

    fn paint_background(&self, args: &mut PaintEventArgs<'_>) {
        let region = args.region;
        args.canvas.fill_rect(region, self.base.color(ColorRole::Surface));
        args.canvas.stroke_rect(region, self.base.color(ColorRole::Border), 1.0);
    }

    fn paint_items(&self, args: &mut PaintEventArgs<'_>) {
        let foreground = self.base.color(ColorRole::Foreground);
        let muted = self.base.color(ColorRole::ForegroundMuted);
        let disabled = self.base.color(ColorRole::Disabled);

        for (index, item) in self.items.iter().enumerate() {
            let Some(rect) = self.item_rect(index) else {
                continue;
            };

            if item.separator {
                let y = rect.y() + rect.height() / 2.0;
                args.canvas.line(
                    Point::new(rect.x() + TEXT_PADDING, y),
                    Point::new(rect.right() - TEXT_PADDING, y),
                    self.base.color(ColorRole::Border),
                    1.0,
                );
                continue;
            }

            let hovered = self.hovered == Some(index);
            let text_color = if !item.enabled {
                disabled
            } else if hovered {
                self.base.color(ColorRole::AccentText)
            } else {
                foreground
            };
            if hovered {
                args.canvas.fill_rect(rect, self.base.color(ColorRole::Accent));
            }

            let text_rect = rect.inset(TEXT_PADDING, 0.0);
            if item.checked {
                args.canvas.text(
                    "\u{2713}",
                    Rect::new(rect.x() + 2.0, rect.y(), TEXT_PADDING, rect.height()),
                    text_color,
                    FONT_SIZE,
                    TextAlign::Left,
                );
            }
            args.canvas.text(
                item.label.clone(),
                text_rect,
                text_color,
                FONT_SIZE,
                TextAlign::Left,
            );
            if let Some(shortcut) = &item.shortcut {
                let color = if hovered { text_color } else { muted };
                args.canvas.text(
                    shortcut.clone(),
                    text_rect,
                    color,
                    FONT_SIZE,
                    TextAlign::Right,
                );
            }
        }
    }
}

impl OwnerDraw for Menu {
    fn self_paints(&self) -> bool {
        self.base.self_paints
    }

    fn paint_hooks(&mut self) -> &mut PaintHooks {
        &mut self.base.hooks
    }

    fn paint_phase(&mut self, args: &mut PaintEventArgs<'_>) {
        match args.phase {
            PaintPhase::Background => self.paint_background(args),
            PaintPhase::Main => self.paint_items(args),
            PaintPhase::Foreground => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lustre_core::{dispatch_paint, Canvas, DrawCommand};
    use lustre_theme::{palette, ColorStyle, ThemeStyle};

    fn file_menu() -> Menu {
        Menu::new(200.0)
            .item(MenuItem::new("Open").shortcut("Ctrl+O"))
            .item(MenuItem::new("Save").enabled(false))
            .item(MenuItem::separator())
            .item(MenuItem::new("Exit"))
    }

    #[test]
    fn height_follows_items() {
        let menu = file_menu();
        assert_eq!(menu.base.size.height, ITEM_HEIGHT * 3.0 + SEPARATOR_HEIGHT);
        assert_eq!(
            menu.item_rect(3),
            Some(Rect::new(0.0, ITEM_HEIGHT * 2.0 + SEPARATOR_HEIGHT, 200.0, ITEM_HEIGHT))
        );
    }

    #[test]
    fn disabled_and_separator_items_are_not_hit() {
        let menu = file_menu();
        assert_eq!(menu.item_at(Point::new(10.0, 5.0)), Some(0));
        assert_eq!(menu.item_at(Point::new(10.0, ITEM_HEIGHT + 5.0)), None);
        assert_eq!(menu.item_at(Point::new(10.0, ITEM_HEIGHT * 2.0 + 2.0)), None);
        assert_eq!(menu.item_at(Point::new(10.0, 70.0)), Some(3));
    }

    #[test]
    fn hovered_item_paints_accent() {
        let mut menu = file_menu();
        assert!(menu.pointer_move(Point::new(10.0, 5.0)));
        assert!(!menu.pointer_move(Point::new(20.0, 6.0)));

        let bounds = menu.base.local_bounds();
        let mut canvas = Canvas::new(bounds);
        dispatch_paint(&mut menu, &mut canvas, bounds);

        let accent = palette(ThemeStyle::Light, ColorStyle::Blue, ColorRole::Accent);
        assert!(canvas.commands().iter().any(|c| matches!(
            c,
            DrawCommand::FillRect { rect, color } if *color == accent && rect.y() == 0.0
        )));
    }

    #[test]
    fn host_default_when_not_self_painting() {
        let mut menu = file_menu();
        menu.base.self_paints = false;
        let bounds = menu.base.local_bounds();
        let mut canvas = Canvas::new(bounds);

        assert_eq!(
            dispatch_paint(&mut menu, &mut canvas, bounds),
            lustre_core::PaintOutcome::HostDefault
        );
        assert!(canvas.commands().is_empty());
    }
}
