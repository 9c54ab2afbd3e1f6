//! Transient notifications
//!
//! A [`Notification`] slides in from the bottom edge of the work area, counts
//! down to auto-close with a progress bar, and fades out over the last third
//! of its lifetime. Hovering pauses the countdown; leaving restarts it from
//! zero. [`NotificationHost`] keeps at most one on screen.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use lustre_animation::{
    AnimatedProperty, Countdown, CountdownFrame, Easing, Scheduler, TaskId, TweenEngine,
};
use lustre_core::{
    Color, OwnerDraw, PaintEventArgs, PaintHooks, PaintPhase, Point, Rect, Size, TextAlign,
};
use lustre_theme::{
    ColorRole, ColorStyle, FlatPalette, NotificationSettings, SkinConfig, StyleAuthority,
    SurfaceId, SurfaceRegistry, TweenSettings,
};

use crate::base::{impl_surface_base, SurfaceBase};
use crate::surface::Surface;

const SCREEN_MARGIN: f32 = 12.0;
const STRIPE_WIDTH: f32 = 4.0;
const PADDING: f32 = 12.0;
const PROGRESS_HEIGHT: f32 = 3.0;
const TITLE_SIZE: f32 = 14.0;
const MESSAGE_SIZE: f32 = 13.0;
const LINE_HEIGHT: f32 = 20.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    fn stripe(self, accent: Color) -> Color {
        match self {
            NotificationKind::Info => accent,
            NotificationKind::Success => FlatPalette::accent(ColorStyle::Green),
            NotificationKind::Warning => FlatPalette::accent(ColorStyle::Orange),
            NotificationKind::Error => FlatPalette::accent(ColorStyle::Red),
        }
    }
}

/// Countdown state shared with the scheduler task
#[derive(Debug)]
struct Timers {
    countdown: RefCell<Countdown>,
    frame: Cell<Option<CountdownFrame>>,
    expired: Cell<bool>,
    dismissed: Cell<bool>,
}

impl Timers {
    fn new(settings: &NotificationSettings) -> Self {
        Self {
            countdown: RefCell::new(Countdown::new(settings.close_time(), settings.width)),
            frame: Cell::new(None),
            expired: Cell::new(false),
            dismissed: Cell::new(false),
        }
    }

    fn should_close(&self) -> bool {
        self.expired.get() || self.dismissed.get()
    }
}

/// Transient notification surface
#[derive(Debug)]
pub struct Notification {
    pub base: SurfaceBase,
    title: Option<String>,
    message: String,
    kind: NotificationKind,
    position: AnimatedProperty<Point>,
    timers: Rc<Timers>,
    hovered: bool,
}

impl_surface_base!(Notification);

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        let settings = NotificationSettings::default();
        Self {
            base: SurfaceBase::new(Size::new(settings.width as f32, settings.height as f32)),
            title: None,
            message: message.into(),
            kind: NotificationKind::Info,
            position: AnimatedProperty::new(Point::ZERO),
            timers: Rc::new(Timers::new(&settings)),
            hovered: false,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn kind(mut self, kind: NotificationKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn notification_kind(&self) -> NotificationKind {
        self.kind
    }

    /// Current (possibly animating) screen position
    pub fn position(&self) -> Point {
        self.position.get()
    }

    /// Last countdown frame, `None` before the first tick
    pub fn frame(&self) -> Option<CountdownFrame> {
        self.timers.frame.get()
    }

    pub fn opacity(&self) -> f32 {
        self.frame().map_or(1.0, |f| f.opacity)
    }

    pub fn progress_width(&self) -> u32 {
        self.frame().map_or(0, |f| f.progress_width)
    }

    pub fn is_paused(&self) -> bool {
        self.timers.countdown.borrow().is_cancelled()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Pause the countdown while the pointer is over the surface
    pub fn pointer_enter(&mut self) {
        self.hovered = true;
        self.timers.countdown.borrow_mut().set_cancelled(true);
        self.base.invalidate();
    }

    /// Resume the countdown, from zero
    pub fn pointer_leave(&mut self) {
        self.hovered = false;
        self.timers.countdown.borrow_mut().set_cancelled(false);
        self.base.invalidate();
    }

    /// Dismiss; the host closes it on its next tick
    pub fn click(&mut self) {
        self.timers.dismissed.set(true);
    }

    fn configure(&mut self, settings: &NotificationSettings) {
        self.base.size = Size::new(settings.width as f32, settings.height as f32);
        *self.timers.countdown.borrow_mut() = Countdown::new(settings.close_time(), settings.width);
        self.timers.frame.set(None);
        self.timers.expired.set(false);
        self.timers.dismissed.set(false);
    }

    fn paint_background(&self, args: &mut PaintEventArgs<'_>) {
        let region = args.region;
        args.canvas.fill_rect(region, self.base.color(ColorRole::Surface));
        args.canvas.fill_rect(
            Rect::new(region.x(), region.y(), STRIPE_WIDTH, region.height()),
            self.kind.stripe(self.base.color(ColorRole::Accent)),
        );
    }

    fn paint_text(&self, args: &mut PaintEventArgs<'_>) {
        let region = args.region;
        let left = region.x() + STRIPE_WIDTH + PADDING;
        let width = region.right() - PADDING - left;
        let mut line = Rect::new(left, region.y() + PADDING, width.max(0.0), LINE_HEIGHT);

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
        args.canvas.text(
            self.message.clone(),
            line,
            self.base.color(ColorRole::ForegroundMuted),
            MESSAGE_SIZE,
            TextAlign::Left,
        );
    }

    fn paint_progress(&self, args: &mut PaintEventArgs<'_>) {
        let region = args.region;
        let track = Rect::new(
            region.x(),
            region.bottom() - PROGRESS_HEIGHT,
            region.width(),
            PROGRESS_HEIGHT,
        );
        args.canvas.fill_rect(track, self.base.color(ColorRole::ProgressTrack));

        let filled = self.progress_width() as f32;
        if filled > 0.0 {
            let bar = Rect::new(track.x(), track.y(), filled, PROGRESS_HEIGHT);
            args.canvas.fill_rect(bar, self.base.color(ColorRole::Accent));
        }
        args.canvas.stroke_rect(region, self.base.color(ColorRole::Border), 1.0);
    }
}

impl OwnerDraw for Notification {
    fn self_paints(&self) -> bool {
        self.base.self_paints
    }

    fn paint_hooks(&mut self) -> &mut PaintHooks {
        &mut self.base.hooks
    }

    fn paint_phase(&mut self, args: &mut PaintEventArgs<'_>) {
        args.canvas.set_opacity(self.opacity());
        match args.phase {
            PaintPhase::Background => self.paint_background(args),
            PaintPhase::Main => self.paint_text(args),
            PaintPhase::Foreground => self.paint_progress(args),
        }
    }
}

struct Active {
    id: SurfaceId,
    countdown: TaskId,
    position: AnimatedProperty<Point>,
    timers: Rc<Timers>,
    // Keeps the notification themed independently of its owner
    _authority: StyleAuthority,
}

/// Owner of the single on-screen notification
pub struct NotificationHost {
    scheduler: Scheduler,
    tweens: TweenEngine,
    settings: NotificationSettings,
    tween: TweenSettings,
    work_area: Rect,
    current: Option<Active>,
}

impl NotificationHost {
    /// Host placing notifications in the bottom-right corner of `work_area`
    pub fn new(scheduler: Scheduler, config: &SkinConfig, work_area: Rect) -> Self {
        let tweens = TweenEngine::with_interval(scheduler.clone(), config.tween.interval());
        Self {
            scheduler,
            tweens,
            settings: config.notification.clone(),
            tween: config.tween.clone(),
            work_area,
            current: None,
        }
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn set_work_area(&mut self, work_area: Rect) {
        self.work_area = work_area;
    }

    /// Id of the notification on screen
    pub fn current(&self) -> Option<SurfaceId> {
        self.current.as_ref().map(|active| active.id)
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Resting position of a notification of `size`
    pub fn resting_position(&self, size: Size) -> Point {
        Point::new(
            self.work_area.right() - size.width - SCREEN_MARGIN,
            self.work_area.bottom() - size.height - SCREEN_MARGIN,
        )
    }

    /// Show `notification`, closing any previous one first.
    ///
    /// The notification starts themed like `owner` through a cloned authority,
    /// so later changes to `owner` do not reach it.
    pub fn show(
        &mut self,
        registry: &mut SurfaceRegistry<Surface>,
        owner: &StyleAuthority,
        mut notification: Notification,
    ) -> SurfaceId {
        self.force_close(registry);

        notification.configure(&self.settings);
        let resting = self.resting_position(notification.base.size);
        let hidden = Point::new(resting.x, self.work_area.bottom());
        notification.position.set(hidden);
        notification.base.position = hidden;
        notification.base.visible = true;
        notification
            .timers
            .countdown
            .borrow_mut()
            .begin(self.scheduler.now());

        let position = notification.position.clone();
        let timers = Rc::clone(&notification.timers);
        let id = registry.insert(Surface::Notification(notification));
        let authority = owner.clone_for(registry, id);

        self.tweens
            .start(&position, resting, Easing::EaseOutCubic, self.tween.duration());

        let task_timers = Rc::clone(&timers);
        let countdown = self
            .scheduler
            .start(self.settings.tick_interval(), move |tick| {
                let frame = task_timers.countdown.borrow_mut().tick(tick.now());
                task_timers.frame.set(Some(frame));
                if frame.finished {
                    task_timers.expired.set(true);
                    tick.dispose();
                }
            });

        tracing::debug!("notification {:?} shown", id);
        self.current = Some(Active {
            id,
            countdown,
            position,
            timers,
            _authority: authority,
        });
        id
    }

    /// Pause (`true`) or resume (`false`) the countdown of the current
    /// notification. Resuming restarts the full close time.
    pub fn cancel(&self, paused: bool) -> bool {
        let Some(active) = &self.current else {
            return false;
        };
        active.timers.countdown.borrow_mut().set_cancelled(paused);
        true
    }

    /// Close the current notification now, stopping its timers
    pub fn force_close(&mut self, registry: &mut SurfaceRegistry<Surface>) -> bool {
        let Some(active) = self.current.take() else {
            return false;
        };
        self.scheduler.dispose(active.countdown);
        self.tweens.cancel(&active.position);
        registry.remove(active.id);
        tracing::debug!("notification {:?} closed", active.id);
        true
    }

    /// Run due timers, move the notification, and close it once expired or
    /// dismissed. Returns the id of a notification closed by this tick.
    pub fn tick(&mut self, registry: &mut SurfaceRegistry<Surface>) -> Option<SurfaceId> {
        self.scheduler.run_due();

        let active = self.current.as_ref()?;
        let id = active.id;
        let Some(Surface::Notification(notification)) = registry.get_mut(id) else {
            // Destroyed behind our back
            self.force_close(registry);
            return None;
        };

        let position = active.position.get();
        if notification.base.position != position {
            notification.base.position = position;
            notification.base.invalidate();
        }
        if active.timers.frame.get().is_some() {
            notification.base.invalidate();
        }

        if active.timers.should_close() {
            self.force_close(registry);
            return Some(id);
        }
        None
    }
}

impl Drop for NotificationHost {
    fn drop(&mut self) {
        if let Some(active) = self.current.take() {
            self.scheduler.dispose(active.countdown);
        }
    }
}
