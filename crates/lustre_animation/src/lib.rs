//! Lustre Timing Engine
//!
//! Cooperative, cancellable time-driven behaviors for themed surfaces.
//!
//! # Features
//!
//! - **Delayed calls**: a single-threaded [`Scheduler`] of repeating or one-shot
//!   callbacks, ticked by the host toolkit's own timer or message pump
//! - **Tweens**: eased interpolation of a property over a fixed duration, at
//!   most one run per target
//! - **Countdowns**: auto-close progress and fade arithmetic for transient
//!   notification windows
//! - **Clocks**: wall clock for production, [`ManualClock`] for deterministic tests

pub mod clock;
pub mod countdown;
pub mod easing;
pub mod scheduler;
pub mod tween;

pub use clock::{Clock, ManualClock, SystemClock};
pub use countdown::{Countdown, CountdownFrame};
pub use easing::Easing;
pub use scheduler::{Scheduler, TaskId, TaskState, Tick, WeakScheduler};
pub use tween::{AnimatedProperty, Lerp, PropertyId, TweenEngine, TweenHandle, TweenRun};
