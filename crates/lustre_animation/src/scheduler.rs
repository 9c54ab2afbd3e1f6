//! Delayed-call scheduler
//!
//! A cooperative, single-threaded timer wheel for every timed behavior of the
//! skin: tween steps, auto-close countdowns, delayed tooltips.
//!
//! The scheduler never spawns threads. The host toolkit drives it by calling
//! [`Scheduler::run_due`] from its own timer or message pump (using
//! [`Scheduler::next_deadline`] to arm that timer), so callbacks run on the
//! same logical thread as all surface mutation and never overlap with each
//! other or with host event handling.
//!
//! # Task lifecycle
//!
//! ```text
//! start ──► Pending ──(due)──► Running ──► Pending (repeating)
//!              │                  │   └──► removed (one-shot)
//!              └──dispose──► removed
//!                                 └──dispose──► Cancelled ──► removed after callback returns
//! ```
//!
//! - `dispose` is idempotent: disposing an unknown or already-disposed task is a no-op.
//! - A callback may dispose its own task; it is never re-entered.
//! - `reset` of a disposed task is a caller bug and trips a debug assertion.
//! - A panicking callback propagates to the host; nothing is suppressed.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::clock::{Clock, SystemClock};

new_key_type! {
    /// Handle to a scheduled task
    pub struct TaskId;
}

/// Lifecycle state of a scheduled task
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskState {
    /// Armed, waiting for its due time
    Pending,
    /// Callback currently executing
    Running,
    /// Disposed while running; removed once the callback returns
    Cancelled,
}

/// Scheduled callback
pub type TaskCallback = Box<dyn FnMut(&Tick<'_>)>;

/// Drops the slot of a task whose callback unwound; its callback is gone and
/// the slot would otherwise stay `Running` for good
struct UnwindGuard<'a> {
    scheduler: &'a Scheduler,
    task: TaskId,
    armed: bool,
}

impl Drop for UnwindGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Ok(mut inner) = self.scheduler.inner.try_borrow_mut() {
            inner.tasks.remove(self.task);
        }
        tracing::warn!(task = ?self.task, "scheduled task panicked and was removed");
    }
}

struct TaskSlot {
    interval: Duration,
    due: Duration,
    state: TaskState,
    repeat: bool,
    /// `reset` was called while the callback was running
    rearmed: bool,
    callback: Option<TaskCallback>,
}

struct SchedulerInner {
    clock: Rc<dyn Clock>,
    tasks: SlotMap<TaskId, TaskSlot>,
}

/// Context handed to a running callback
pub struct Tick<'a> {
    scheduler: &'a Scheduler,
    task: TaskId,
    now: Duration,
}

impl Tick<'_> {
    /// Clock reading taken when this round of due tasks started
    pub fn now(&self) -> Duration {
        self.now
    }

    /// The task being run
    pub fn task(&self) -> TaskId {
        self.task
    }

    /// Cancel the running task; it will not fire again
    pub fn dispose(&self) {
        self.scheduler.dispose(self.task);
    }

    pub fn scheduler(&self) -> &Scheduler {
        self.scheduler
    }
}

/// Cloneable handle to a shared delayed-call scheduler
#[derive(Clone)]
pub struct Scheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

/// Non-owning scheduler handle, for callbacks that need to outlive nothing
#[derive(Clone)]
pub struct WeakScheduler {
    inner: Weak<RefCell<SchedulerInner>>,
}

impl WeakScheduler {
    pub fn upgrade(&self) -> Option<Scheduler> {
        self.inner.upgrade().map(|inner| Scheduler { inner })
    }
}

impl Scheduler {
    /// Scheduler on the wall clock
    pub fn new() -> Self {
        Self::with_clock(Rc::new(SystemClock::new()))
    }

    /// Scheduler on a caller-supplied clock
    pub fn with_clock(clock: Rc<dyn Clock>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerInner {
                clock,
                tasks: SlotMap::with_key(),
            })),
        }
    }

    pub fn downgrade(&self) -> WeakScheduler {
        WeakScheduler {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Current clock reading
    pub fn now(&self) -> Duration {
        self.inner.borrow().clock.now()
    }

    /// Start a repeating task firing every `interval`
    pub fn start<F>(&self, interval: Duration, callback: F) -> TaskId
    where
        F: FnMut(&Tick<'_>) + 'static,
    {
        self.insert(interval, true, Box::new(callback))
    }

    /// Start a task that fires once after `delay` and then removes itself
    pub fn start_once<F>(&self, delay: Duration, callback: F) -> TaskId
    where
        F: FnMut(&Tick<'_>) + 'static,
    {
        self.insert(delay, false, Box::new(callback))
    }

    fn insert(&self, interval: Duration, repeat: bool, callback: TaskCallback) -> TaskId {
        let now = self.now();
        let id = self.inner.borrow_mut().tasks.insert(TaskSlot {
            interval,
            due: now + interval,
            state: TaskState::Pending,
            repeat,
            rearmed: false,
            callback: Some(callback),
        });
        tracing::trace!(?id, ?interval, repeat, "scheduled task started");
        id
    }

    /// Restart the interval of `task` from now, keeping its callback and interval.
    ///
    /// The task must not have been disposed.
    pub fn reset(&self, task: TaskId) {
        let now = self.now();
        let mut inner = self.inner.borrow_mut();
        match inner.tasks.get_mut(task) {
            Some(slot) if slot.state != TaskState::Cancelled => {
                slot.due = now + slot.interval;
                if slot.state == TaskState::Running {
                    slot.rearmed = true;
                }
            }
            _ => {
                tracing::warn!(?task, "reset of a disposed task");
                debug_assert!(false, "reset of a disposed task {task:?}");
            }
        }
    }

    /// Cancel `task` permanently. Returns `true` if this call cancelled it.
    pub fn dispose(&self, task: TaskId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let Some(slot) = inner.tasks.get_mut(task) else {
            return false;
        };
        let state = slot.state;
        match state {
            TaskState::Cancelled => false,
            TaskState::Running => {
                // Removed by run_due once the callback returns
                slot.state = TaskState::Cancelled;
                true
            }
            TaskState::Pending => {
                inner.tasks.remove(task);
                tracing::trace!(?task, "scheduled task disposed");
                true
            }
        }
    }

    /// State of a task, `None` once it is gone
    pub fn state(&self, task: TaskId) -> Option<TaskState> {
        self.inner.borrow().tasks.get(task).map(|slot| slot.state)
    }

    /// Whether the task is still scheduled to fire
    pub fn is_active(&self, task: TaskId) -> bool {
        matches!(
            self.state(task),
            Some(TaskState::Pending | TaskState::Running)
        )
    }

    /// Earliest due time among pending tasks, for arming the host timer
    pub fn next_deadline(&self) -> Option<Duration> {
        self.inner
            .borrow()
            .tasks
            .values()
            .filter(|slot| slot.state == TaskState::Pending)
            .map(|slot| slot.due)
            .min()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().tasks.is_empty()
    }

    /// Run every task due at the current clock reading. Returns the number of
    /// callbacks invoked.
    ///
    /// Each task fires at most once per call; a late host does not cause a
    /// burst of catch-up ticks. Tasks started from a callback are first
    /// considered on the next call.
    pub fn run_due(&self) -> usize {
        let now = self.now();
        let mut due: SmallVec<[(Duration, TaskId); 8]> = self
            .inner
            .borrow()
            .tasks
            .iter()
            .filter(|(_, slot)| slot.state == TaskState::Pending && slot.due <= now)
            .map(|(id, slot)| (slot.due, id))
            .collect();
        due.sort_by_key(|(at, _)| *at);

        let mut fired = 0;
        for (_, id) in due {
            let callback = {
                let mut inner = self.inner.borrow_mut();
                let Some(slot) = inner.tasks.get_mut(id) else {
                    // Disposed by an earlier callback in this round
                    continue;
                };
                if slot.state != TaskState::Pending || slot.due > now {
                    continue;
                }
                slot.state = TaskState::Running;
                slot.rearmed = false;
                slot.callback.take()
            };
            let Some(mut callback) = callback else {
                continue;
            };

            let tick = Tick {
                scheduler: self,
                task: id,
                now,
            };
            let mut guard = UnwindGuard {
                scheduler: self,
                task: id,
                armed: true,
            };
            callback(&tick);
            guard.armed = false;
            fired += 1;

            let mut inner = self.inner.borrow_mut();
            let finished = match inner.tasks.get_mut(id) {
                Some(slot) => match slot.state {
                    TaskState::Cancelled => true,
                    _ if !slot.repeat && !slot.rearmed => true,
                    _ => {
                        if !slot.rearmed {
                            slot.due = now + slot.interval;
                        }
                        slot.state = TaskState::Pending;
                        slot.callback = Some(callback);
                        false
                    }
                },
                None => false,
            };
            if finished {
                inner.tasks.remove(id);
                tracing::trace!(?id, "scheduled task finished");
            }
        }
        fired
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("tasks", &self.len())
            .finish()
    }
}
