//! Recording canvas
//!
//! Paint phases draw into a [`Canvas`], which records commands for the host
//! toolkit's renderer to replay. Keeping the canvas a plain command list lets
//! every themed surface be painted (and tested) without a real device context.

use crate::geometry::{Color, Point, Rect};

/// Horizontal text alignment inside a layout rect
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A recorded drawing operation
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f32,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f32,
    },
    Text {
        text: String,
        bounds: Rect,
        color: Color,
        size: f32,
        align: TextAlign,
    },
}

/// Command-recording rendering surface
#[derive(Clone, Debug)]
pub struct Canvas {
    bounds: Rect,
    clip: Rect,
    opacity: f32,
    commands: Vec<DrawCommand>,
}

impl Canvas {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            clip: bounds,
            opacity: 1.0,
            commands: Vec::new(),
        }
    }

    /// Full bounds of the surface being painted
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn clip(&self) -> Rect {
        self.clip
    }

    /// Restrict subsequent drawing to `rect` (intersected with the bounds)
    pub fn set_clip(&mut self, rect: Rect) {
        self.clip = self.bounds.intersect(&rect).unwrap_or(Rect::ZERO);
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Global alpha multiplier applied to every recorded color
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(rect) = self.clip.intersect(&rect) else {
            return;
        };
        let color = self.apply_opacity(color);
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        if self.clip.intersect(&rect).is_none() {
            return;
        }
        let color = self.apply_opacity(color);
        self.commands
            .push(DrawCommand::StrokeRect { rect, color, width });
    }

    pub fn line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        let color = self.apply_opacity(color);
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    pub fn text(
        &mut self,
        text: impl Into<String>,
        bounds: Rect,
        color: Color,
        size: f32,
        align: TextAlign,
    ) {
        if self.clip.intersect(&bounds).is_none() {
            return;
        }
        let color = self.apply_opacity(color);
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            bounds,
            color,
            size,
            align,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the canvas empty
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    fn apply_opacity(&self, color: Color) -> Color {
        color.with_alpha(color.a * self.opacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_outside_clip_are_dropped() {
        let mut canvas = Canvas::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        canvas.set_clip(Rect::new(0.0, 0.0, 50.0, 50.0));
        canvas.fill_rect(Rect::new(60.0, 60.0, 10.0, 10.0), Color::WHITE);
        assert!(canvas.commands().is_empty());

        canvas.fill_rect(Rect::new(40.0, 40.0, 20.0, 20.0), Color::WHITE);
        assert_eq!(
            canvas.commands(),
            &[DrawCommand::FillRect {
                rect: Rect::new(40.0, 40.0, 10.0, 10.0),
                color: Color::WHITE,
            }]
        );
    }

    #[test]
    fn opacity_scales_alpha() {
        let mut canvas = Canvas::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        canvas.set_opacity(0.5);
        canvas.line(Point::ZERO, Point::new(5.0, 5.0), Color::BLACK, 1.0);
        match &canvas.commands()[0] {
            DrawCommand::Line { color, .. } => assert_eq!(color.a, 0.5),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
