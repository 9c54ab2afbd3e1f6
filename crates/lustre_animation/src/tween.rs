//! Tween engine
//!
//! Eased interpolation of a property over a fixed duration, stepped by a
//! [`Scheduler`] task (≈4ms by default).
//!
//! - On every tick the target is set to `from + (to - from) * easing(elapsed / duration)`.
//! - Once `elapsed >= duration` the target is set to `to` exactly and the run
//!   disposes its own task.
//! - A target carries at most one run: starting a tween on an animating
//!   target disposes the previous run first.
//! - A target dropped mid-run is noticed on the next tick and the run ends quietly.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use lustre_core::{Color, Point};
use rustc_hash::FxHashMap;

use crate::easing::Easing;
use crate::scheduler::{Scheduler, TaskId};

/// Default tick interval of tween runs
pub const DEFAULT_TWEEN_INTERVAL: Duration = Duration::from_millis(4);

/// Values that can be interpolated
pub trait Lerp: Copy + 'static {
    fn lerp(from: Self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Lerp for f64 {
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        from + (to - from) * t as f64
    }
}

impl Lerp for Point {
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        Point::new(f32::lerp(from.x, to.x, t), f32::lerp(from.y, to.y, t))
    }
}

impl Lerp for Color {
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        Color::lerp(&from, &to, t)
    }
}

static NEXT_PROPERTY_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of an animatable property
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PropertyId(u64);

/// Shared, animatable value (e.g. a window position or opacity)
///
/// Clones share the same value. Tween runs only hold a weak reference, so
/// dropping every clone ends any run on it.
pub struct AnimatedProperty<V> {
    id: PropertyId,
    value: Rc<Cell<V>>,
}

impl<V: Copy> AnimatedProperty<V> {
    pub fn new(value: V) -> Self {
        Self {
            id: PropertyId(NEXT_PROPERTY_ID.fetch_add(1, Ordering::Relaxed)),
            value: Rc::new(Cell::new(value)),
        }
    }

    pub fn id(&self) -> PropertyId {
        self.id
    }

    pub fn get(&self) -> V {
        self.value.get()
    }

    pub fn set(&self, value: V) {
        self.value.set(value);
    }

    fn downgrade(&self) -> WeakProperty<V> {
        WeakProperty {
            value: Rc::downgrade(&self.value),
        }
    }
}

impl<V> Clone for AnimatedProperty<V> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            value: Rc::clone(&self.value),
        }
    }
}

impl<V: Copy + fmt::Debug> fmt::Debug for AnimatedProperty<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimatedProperty")
            .field("id", &self.id)
            .field("value", &self.value.get())
            .finish()
    }
}

struct WeakProperty<V> {
    value: Weak<Cell<V>>,
}

/// One animation: from, to, easing, duration and start timestamp
#[derive(Clone, Copy, Debug)]
pub struct TweenRun<V> {
    pub from: V,
    pub to: V,
    pub easing: Easing,
    pub duration: Duration,
    pub start: Duration,
}

impl<V: Lerp> TweenRun<V> {
    /// Value at `elapsed` since start, and whether the run is complete
    pub fn sample(&self, elapsed: Duration) -> (V, bool) {
        if elapsed >= self.duration {
            return (self.to, true);
        }
        let t = elapsed.as_nanos() as f64 / self.duration.as_nanos() as f64;
        let eased = self.easing.apply(t as f32);
        (V::lerp(self.from, self.to, eased), false)
    }

    /// Value at absolute clock time `now`
    pub fn sample_at(&self, now: Duration) -> (V, bool) {
        self.sample(now.saturating_sub(self.start))
    }
}

/// Handle to a started tween
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TweenHandle {
    pub property: PropertyId,
    pub task: TaskId,
}

/// Starts and supersedes tween runs on a shared scheduler
pub struct TweenEngine {
    scheduler: Scheduler,
    interval: Duration,
    active: Rc<RefCell<FxHashMap<PropertyId, TaskId>>>,
}

impl TweenEngine {
    pub fn new(scheduler: Scheduler) -> Self {
        Self::with_interval(scheduler, DEFAULT_TWEEN_INTERVAL)
    }

    pub fn with_interval(scheduler: Scheduler, interval: Duration) -> Self {
        Self {
            scheduler,
            interval,
            active: Rc::new(RefCell::new(FxHashMap::default())),
        }
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Animate `target` from its current value to `to`.
    ///
    /// Any run already animating `target` is disposed first.
    pub fn start<V: Lerp>(
        &self,
        target: &AnimatedProperty<V>,
        to: V,
        easing: Easing,
        duration: Duration,
    ) -> TweenHandle {
        let property = target.id();
        self.cancel_property(property);

        let run = TweenRun {
            from: target.get(),
            to,
            easing,
            duration,
            start: self.scheduler.now(),
        };
        let weak_target = target.downgrade();
        let active = Rc::downgrade(&self.active);

        let task = self.scheduler.start(self.interval, move |tick| {
            let Some(value) = weak_target.value.upgrade() else {
                tracing::trace!(?property, "tween target dropped mid-run");
                tick.dispose();
                forget_run(&active, property, tick.task());
                return;
            };
            let (next, done) = run.sample_at(tick.now());
            value.set(next);
            if done {
                tick.dispose();
                forget_run(&active, property, tick.task());
            }
        });

        self.active.borrow_mut().insert(property, task);
        tracing::trace!(?property, ?duration, "tween started");
        TweenHandle { property, task }
    }

    /// Stop any run on `target`, leaving its value where it is
    pub fn cancel<V: Copy>(&self, target: &AnimatedProperty<V>) -> bool {
        self.cancel_property(target.id())
    }

    pub fn is_animating<V: Copy>(&self, target: &AnimatedProperty<V>) -> bool {
        self.active.borrow().contains_key(&target.id())
    }

    /// Number of runs in flight
    pub fn active_count(&self) -> usize {
        self.active.borrow().len()
    }

    fn cancel_property(&self, property: PropertyId) -> bool {
        let previous = self.active.borrow_mut().remove(&property);
        match previous {
            Some(task) => {
                tracing::trace!(?property, "tween superseded");
                self.scheduler.dispose(task)
            }
            None => false,
        }
    }
}

impl Drop for TweenEngine {
    fn drop(&mut self) {
        let tasks: Vec<TaskId> = self.active.borrow_mut().drain().map(|(_, t)| t).collect();
        for task in tasks {
            self.scheduler.dispose(task);
        }
    }
}

impl fmt::Debug for TweenEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenEngine")
            .field("interval", &self.interval)
            .field("active", &self.active_count())
            .finish()
    }
}

/// Drop the registry entry for `property` if it still points at `task`
fn forget_run(
    active: &Weak<RefCell<FxHashMap<PropertyId, TaskId>>>,
    property: PropertyId,
    task: TaskId,
) {
    if let Some(active) = active.upgrade() {
        let mut active = active.borrow_mut();
        if active.get(&property) == Some(&task) {
            active.remove(&property);
        }
    }
}
