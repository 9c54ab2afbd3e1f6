//! Tooltip with an accent strip

use lustre_core::{OwnerDraw, PaintEventArgs, PaintHooks, PaintPhase, Rect, Size, TextAlign};
use lustre_theme::ColorRole;

use crate::base::{impl_surface_base, SurfaceBase};

const PADDING: f32 = 8.0;
const STRIP_HEIGHT: f32 = 3.0;
const TITLE_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 12.0;
const LINE_HEIGHT: f32 = 18.0;

#[derive(Debug)]
pub struct Tooltip {
    pub base: SurfaceBase,
    title: Option<String>,
    text: String,
}

impl_surface_base!(Tooltip);

impl Tooltip {
    pub fn new(text: impl Into<String>) -> Self {
        let mut tooltip = Self {
            base: SurfaceBase::new(Size::ZERO),
            title: None,
            text: text.into(),
        };
        tooltip.relayout();
        tooltip
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self.relayout();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.relayout();
    }

    // Rough text metrics; real glyph measurement belongs to the host
    fn relayout(&mut self) {
        let longest = self
            .title
            .iter()
            .chain(std::iter::once(&self.text))
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0);
        let lines = if self.title.is_some() { 2.0 } else { 1.0 };
        self.base.size = Size::new(
            longest as f32 * BODY_SIZE * 0.6 + PADDING * 2.0,
            lines * LINE_HEIGHT + PADDING * 2.0 + STRIP_HEIGHT,
        );
        self.base.invalidate();
    }
}

impl OwnerDraw for Tooltip {
    fn self_paints(&self) -> bool {
        self.base.self_paints
    }

    fn paint_hooks(&mut self) -> &mut PaintHooks {
        &mut self.base.hooks
    }

    fn paint_phase(&mut self, args: &mut PaintEventArgs<'_>) {
        let region = args.region;
        match args.phase {
            PaintPhase::Background => {
                args.canvas.fill_rect(region, self.base.color(ColorRole::Surface));
                args.canvas.fill_rect(
                    Rect::new(region.x(), region.y(), region.width(), STRIP_HEIGHT),
                    self.base.color(ColorRole::Accent),
                );
            }
            PaintPhase::Main => {
                let mut line = Rect::new(
                    region.x() + PADDING,
                    region.y() + STRIP_HEIGHT + PADDING,
                    region.width() - PADDING * 2.0,
                    LINE_HEIGHT,
                );
                if let Some(title) = &self.title {
                    args.canvas.text(
                        title.clone(),
                        line,
                        self.base.color(ColorRole::Foreground),
                        TITLE_SIZE,
                        TextAlign::Left,
                    );
                    line = line.offset(0.0, LINE_HEIGHT);
                }
                let body = if self.title.is_some() {
                    ColorRole::ForegroundMuted
                } else {
                    ColorRole::Foreground
                };
                args.canvas.text(
                    self.text.clone(),
                    line,
                    self.base.color(body),
                    BODY_SIZE,
                    TextAlign::Left,
                );
            }
            PaintPhase::Foreground => {
                args.canvas.stroke_rect(region, self.base.color(ColorRole::Border), 1.0);
            }
        }
    }
}
