//! Flat message box, shown modally through the completion monitor
//!
//! Every close path (button click, escape, programmatic close through a
//! [`ModalCloser`]) publishes its [`DialogResult`] into the completion cell
//! before the box reports itself closed.

use std::sync::Arc;

use lustre_core::{
    OwnerDraw, PaintEventArgs, PaintHooks, PaintPhase, Point, Rect, Size, TextAlign,
};
use lustre_platform::{
    Completion, HostPump, ModalCloser, ModalMonitor, ModalOptions, ModalSurface,
};
use lustre_theme::{ColorRole, ColorStyle, FlatPalette, ModalSettings};
use smallvec::SmallVec;
use tokio::runtime::Handle;

use crate::base::{impl_surface_base, SurfaceBase};

const CAPTION_HEIGHT: f32 = 32.0;
const BUTTON_WIDTH: f32 = 80.0;
const BUTTON_HEIGHT: f32 = 28.0;
const BUTTON_SPACING: f32 = 8.0;
const MARGIN: f32 = 12.0;
const ICON_SIZE: f32 = 32.0;
const CAPTION_SIZE: f32 = 14.0;
const TEXT_SIZE: f32 = 13.0;

/// Outcome of a message box
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DialogResult {
    /// Closed without choosing a button
    #[default]
    None,
    Ok,
    Cancel,
    Abort,
    Retry,
    Ignore,
    Yes,
    No,
}

impl DialogResult {
    pub fn label(self) -> &'static str {
        match self {
            DialogResult::None => "",
            DialogResult::Ok => "OK",
            DialogResult::Cancel => "Cancel",
            DialogResult::Abort => "Abort",
            DialogResult::Retry => "Retry",
            DialogResult::Ignore => "Ignore",
            DialogResult::Yes => "Yes",
            DialogResult::No => "No",
        }
    }
}

/// Button set of a message box
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MessageBoxButtons {
    #[default]
    Ok,
    OkCancel,
    YesNo,
    YesNoCancel,
    RetryCancel,
    AbortRetryIgnore,
}

impl MessageBoxButtons {
    /// Results of the buttons, left to right
    pub fn results(self) -> SmallVec<[DialogResult; 3]> {
        use DialogResult::*;
        match self {
            MessageBoxButtons::Ok => SmallVec::from_slice(&[Ok]),
            MessageBoxButtons::OkCancel => SmallVec::from_slice(&[Ok, Cancel]),
            MessageBoxButtons::YesNo => SmallVec::from_slice(&[Yes, No]),
            MessageBoxButtons::YesNoCancel => SmallVec::from_slice(&[Yes, No, Cancel]),
            MessageBoxButtons::RetryCancel => SmallVec::from_slice(&[Retry, Cancel]),
            MessageBoxButtons::AbortRetryIgnore => {
                SmallVec::from_slice(&[Abort, Retry, Ignore])
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MessageBoxIcon {
    #[default]
    None,
    Information,
    Question,
    Warning,
    Error,
}

impl MessageBoxIcon {
    fn glyph(self) -> Option<(&'static str, ColorStyle)> {
        match self {
            MessageBoxIcon::None => None,
            MessageBoxIcon::Information => Some(("i", ColorStyle::Blue)),
            MessageBoxIcon::Question => Some(("?", ColorStyle::Teal)),
            MessageBoxIcon::Warning => Some(("!", ColorStyle::Orange)),
            MessageBoxIcon::Error => Some(("\u{00d7}", ColorStyle::Red)),
        }
    }
}

/// Modal message box surface
#[derive(Debug)]
pub struct MessageBox {
    pub base: SurfaceBase,
    caption: String,
    text: String,
    buttons: MessageBoxButtons,
    icon: MessageBoxIcon,
    completion: Arc<Completion<DialogResult>>,
    hovered: Option<usize>,
}

impl_surface_base!(MessageBox);

impl MessageBox {
    pub fn new(caption: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            base: SurfaceBase::new(Size::new(360.0, 160.0)),
            caption: caption.into(),
            text: text.into(),
            buttons: MessageBoxButtons::Ok,
            icon: MessageBoxIcon::None,
            completion: Arc::new(Completion::new()),
            hovered: None,
        }
    }

    pub fn buttons(mut self, buttons: MessageBoxButtons) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn icon(mut self, icon: MessageBoxIcon) -> Self {
        self.icon = icon;
        self
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.base.size = Size::new(width, height);
        self
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Close handle for the current session
    pub fn closer(&self) -> ModalCloser<DialogResult> {
        ModalCloser::new(&self.completion)
    }

    pub fn is_open(&self) -> bool {
        self.completion.is_open()
    }

    /// Result of the current session, once closed
    pub fn result(&self) -> Option<DialogResult> {
        self.completion.result().copied()
    }

    /// Publish `result` and close
    pub fn close(&mut self, result: DialogResult) -> bool {
        if !self.completion.complete(result) {
            return false;
        }
        self.base.visible = false;
        self.base.invalidate();
        tracing::debug!("message box closed with {:?}", result);
        true
    }

    /// Local rects of the buttons, right-aligned along the bottom edge
    pub fn button_rects(&self) -> SmallVec<[(DialogResult, Rect); 3]> {
        let results = self.buttons.results();
        let count = results.len() as f32;
        let total = count * BUTTON_WIDTH + (count - 1.0) * BUTTON_SPACING;
        let mut x = self.base.size.width - MARGIN - total;
        let y = self.base.size.height - MARGIN - BUTTON_HEIGHT;

        results
            .into_iter()
            .map(|result| {
                let rect = Rect::new(x, y, BUTTON_WIDTH, BUTTON_HEIGHT);
                x += BUTTON_WIDTH + BUTTON_SPACING;
                (result, rect)
            })
            .collect()
    }

    pub fn button_at(&self, point: Point) -> Option<DialogResult> {
        self.button_rects()
            .into_iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(result, _)| result)
    }

    pub fn pointer_move(&mut self, point: Point) {
        let hovered = self
            .button_rects()
            .iter()
            .position(|(_, rect)| rect.contains(point));
        if hovered != self.hovered {
            self.hovered = hovered;
            self.base.invalidate();
        }
    }

    /// Close with the clicked button's result
    pub fn click(&mut self, point: Point) -> Option<DialogResult> {
        let result = self.button_at(point)?;
        self.close(result).then_some(result)
    }

    /// Escape closes with `Cancel` when offered, or `Ok` on an OK-only box
    pub fn escape(&mut self) -> Option<DialogResult> {
        let result = if self.buttons.results().contains(&DialogResult::Cancel) {
            DialogResult::Cancel
        } else if self.buttons == MessageBoxButtons::Ok {
            DialogResult::Ok
        } else {
            return None;
        };
        self.close(result).then_some(result)
    }

    /// Show modally and wait for a result while `pump` keeps running.
    ///
    /// A box torn down without a result yields [`DialogResult::None`].
    pub fn show_modal<P>(
        &mut self,
        monitor: &ModalMonitor,
        pump: &mut P,
    ) -> lustre_platform::Result<DialogResult>
    where
        P: HostPump + ?Sized,
    {
        Ok(monitor.await_close(self, pump)?.unwrap_or_default())
    }

    fn paint_background(&self, args: &mut PaintEventArgs<'_>) {
        let region = args.region;
        args.canvas.fill_rect(region, self.base.color(ColorRole::Background));

        let caption = Rect::new(region.x(), region.y(), region.width(), CAPTION_HEIGHT);
        args.canvas.fill_rect(caption, self.base.color(ColorRole::Accent));
        args.canvas.text(
            self.caption.clone(),
            caption.inset(MARGIN, 0.0),
            self.base.color(ColorRole::AccentText),
            CAPTION_SIZE,
            TextAlign::Left,
        );
    }

    fn paint_body(&self, args: &mut PaintEventArgs<'_>) {
        let region = args.region;
        let mut text_left = region.x() + MARGIN;
        let top = region.y() + CAPTION_HEIGHT + MARGIN;

        if let Some((glyph, style)) = self.icon.glyph() {
            let icon = Rect::new(text_left, top, ICON_SIZE, ICON_SIZE);
            args.canvas.fill_rect(icon, FlatPalette::accent(style));
            args.canvas.text(
                glyph,
                icon,
                lustre_core::Color::WHITE,
                ICON_SIZE * 0.6,
                TextAlign::Center,
            );
            text_left += ICON_SIZE + MARGIN;
        }

        let bottom = region.bottom() - MARGIN * 2.0 - BUTTON_HEIGHT;
        let text = Rect::new(
            text_left,
            top,
            region.right() - MARGIN - text_left,
            (bottom - top).max(0.0),
        );
        args.canvas.text(
            self.text.clone(),
            text,
            self.base.color(ColorRole::Foreground),
            TEXT_SIZE,
            TextAlign::Left,
        );
    }

    fn paint_buttons(&self, args: &mut PaintEventArgs<'_>) {
        let border = self.base.color(ColorRole::Border);
        for (index, (result, rect)) in self.button_rects().into_iter().enumerate() {
            let (fill, text) = if self.hovered == Some(index) {
                (
                    self.base.color(ColorRole::Accent),
                    self.base.color(ColorRole::AccentText),
                )
            } else {
                (
                    self.base.color(ColorRole::Surface),
                    self.base.color(ColorRole::Foreground),
                )
            };
            args.canvas.fill_rect(rect, fill);
            args.canvas.stroke_rect(rect, border, 1.0);
            args.canvas.text(result.label(), rect, text, TEXT_SIZE, TextAlign::Center);
        }
    }
}

impl OwnerDraw for MessageBox {
    fn self_paints(&self) -> bool {
        self.base.self_paints
    }

    fn paint_hooks(&mut self) -> &mut PaintHooks {
        &mut self.base.hooks
    }

    fn paint_phase(&mut self, args: &mut PaintEventArgs<'_>) {
        match args.phase {
            PaintPhase::Background => self.paint_background(args),
            PaintPhase::Main => self.paint_body(args),
            PaintPhase::Foreground => self.paint_buttons(args),
        }
    }
}

impl ModalSurface for MessageBox {
    type Output = DialogResult;

    /// Show the box. Presenting a closed box starts a fresh session; closers
    /// from the previous one go inert.
    fn present(&mut self) {
        if !self.completion.is_open() {
            self.completion = Arc::new(Completion::new());
        }
        self.hovered = None;
        self.base.visible = true;
        self.base.invalidate();
        tracing::debug!("message box '{}' presented", self.caption);
    }

    fn completion(&self) -> &Arc<Completion<DialogResult>> {
        &self.completion
    }

    fn release(&mut self) {
        self.base.visible = false;
        self.hovered = None;
    }
}

/// Modal monitor configured from skin settings
pub fn modal_monitor(runtime: Handle, settings: &ModalSettings) -> ModalMonitor {
    ModalMonitor::new(runtime).with_options(ModalOptions {
        poll_interval: settings.poll_interval(),
        pump_yield: settings.pump_yield(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_sets() {
        use DialogResult::*;
        assert_eq!(MessageBoxButtons::Ok.results().as_slice(), &[Ok]);
        assert_eq!(
            MessageBoxButtons::YesNoCancel.results().as_slice(),
            &[Yes, No, Cancel]
        );
        assert_eq!(
            MessageBoxButtons::AbortRetryIgnore.results().as_slice(),
            &[Abort, Retry, Ignore]
        );
    }

    #[test]
    fn buttons_are_right_aligned() {
        let mb = MessageBox::new("Save", "Save changes?").buttons(MessageBoxButtons::YesNo);
        let rects = mb.button_rects();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[1].1.right(), 360.0 - MARGIN);
        assert_eq!(rects[0].1.right() + BUTTON_SPACING, rects[1].1.x());
    }

    #[test]
    fn click_publishes_result_then_hides() {
        let mut mb = MessageBox::new("Save", "Save changes?").buttons(MessageBoxButtons::YesNo);
        mb.present();
        assert!(mb.base.visible);

        let no = mb.button_rects()[1].1;
        let center = Point::new(no.x() + 5.0, no.y() + 5.0);
        assert_eq!(mb.click(center), Some(DialogResult::No));
        assert_eq!(mb.result(), Some(DialogResult::No));
        assert!(!mb.base.visible);

        // Second click is ignored
        assert_eq!(mb.click(center), None);
    }

    #[test]
    fn escape_follows_button_set() {
        let mut ok_only = MessageBox::new("Done", "Finished");
        assert_eq!(ok_only.escape(), Some(DialogResult::Ok));

        let mut yes_no = MessageBox::new("Quit", "Quit now?").buttons(MessageBoxButtons::YesNo);
        assert_eq!(yes_no.escape(), None);
        assert!(yes_no.is_open());

        let mut retry =
            MessageBox::new("Error", "Disk full").buttons(MessageBoxButtons::RetryCancel);
        assert_eq!(retry.escape(), Some(DialogResult::Cancel));
    }

    #[test]
    fn present_after_close_starts_new_session() {
        let mut mb = MessageBox::new("Again", "Show twice");
        let old = mb.closer();
        mb.close(DialogResult::Ok);

        mb.present();
        assert!(mb.is_open());
        assert_eq!(mb.result(), None);
        assert!(!old.close(DialogResult::Cancel), "stale closer must be inert");
        assert!(mb.closer().close(DialogResult::Cancel));
        assert_eq!(mb.result(), Some(DialogResult::Cancel));
    }
}
