//! Lustre Core
//!
//! Foundational primitives shared by every themed surface:
//!
//! - **Geometry**: points, sizes, rectangles and colors
//! - **Canvas**: a recording rendering surface handed to paint phases
//! - **Paint dispatch**: the three-phase owner-draw contract
//!   (background → main → foreground) gated by a `self_paints` capability
//!
//! # Example
//!
//! ```rust
//! use lustre_core::{dispatch_paint, Canvas, OwnerDraw, PaintHooks, PaintOutcome, PaintPhase, Rect};
//!
//! struct Panel {
//!     hooks: PaintHooks,
//! }
//!
//! impl OwnerDraw for Panel {
//!     fn self_paints(&self) -> bool {
//!         true
//!     }
//!
//!     fn paint_hooks(&mut self) -> &mut PaintHooks {
//!         &mut self.hooks
//!     }
//! }
//!
//! let mut panel = Panel { hooks: PaintHooks::new() };
//! panel.hooks.on(PaintPhase::Main, |args| {
//!     let region = args.region;
//!     args.canvas.fill_rect(region, lustre_core::Color::WHITE);
//! });
//!
//! let mut canvas = Canvas::new(Rect::new(0.0, 0.0, 100.0, 40.0));
//! let outcome = dispatch_paint(&mut panel, &mut canvas, Rect::new(0.0, 0.0, 100.0, 40.0));
//! assert_eq!(outcome, PaintOutcome::Custom);
//! assert_eq!(canvas.commands().len(), 1);
//! ```

pub mod canvas;
pub mod geometry;
pub mod paint;

pub use canvas::{Canvas, DrawCommand, TextAlign};
pub use geometry::{Color, Point, Rect, Size};
pub use paint::{
    dispatch_paint, dispatch_phase, OwnerDraw, PaintEventArgs, PaintHandler, PaintHooks,
    PaintOutcome, PaintPhase,
};
