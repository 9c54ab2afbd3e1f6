//! Auto-close countdown
//!
//! Progress and fade arithmetic for transient notification windows. A
//! [`Countdown`] is stepped from a scheduler task; it accumulates the real
//! time between ticks rather than assuming a fixed step, so uneven tick
//! delivery does not stretch or shrink the countdown.
//!
//! Per tick:
//!
//! - `percent = elapsed / total`
//! - progress bar width `floor(width * percent)`
//! - once `elapsed > total / 1.5`, opacity `max(0.1, (1 - percent) * 3 + 0.01)`
//!
//! While the cancel flag is set every tick resets `elapsed` to zero and
//! restores full opacity, so clearing the flag restarts the countdown from
//! zero.

use std::time::Duration;

/// Lowest opacity a fading surface reaches before it closes
pub const MIN_OPACITY: f32 = 0.1;

/// Fraction of the total time after which fading starts (`total / 1.5`)
const FADE_START_DIVISOR: f64 = 1.5;

/// Visual state produced by one countdown tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountdownFrame {
    pub elapsed: Duration,
    pub percent: f64,
    /// Progress bar width in pixels
    pub progress_width: u32,
    pub opacity: f32,
    /// Elapsed time reached the total; the surface should close
    pub finished: bool,
}

/// Auto-close countdown state
#[derive(Clone, Debug)]
pub struct Countdown {
    total: Duration,
    width: u32,
    elapsed: Duration,
    last_tick: Option<Duration>,
    cancelled: bool,
    opacity: f32,
}

impl Countdown {
    /// Countdown of `total` driving a progress bar `width` pixels wide
    pub fn new(total: Duration, width: u32) -> Self {
        Self {
            total,
            width,
            elapsed: Duration::ZERO,
            last_tick: None,
            cancelled: false,
            opacity: 1.0,
        }
    }

    /// Mark the time the countdown starts counting from
    pub fn begin(&mut self, now: Duration) {
        self.elapsed = Duration::ZERO;
        self.last_tick = Some(now);
        self.opacity = 1.0;
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    /// Pause (`true`) or resume (`false`). Takes effect on the next tick.
    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Advance to clock reading `now`
    pub fn tick(&mut self, now: Duration) -> CountdownFrame {
        let delta = self
            .last_tick
            .map(|last| now.saturating_sub(last))
            .unwrap_or_default();
        self.last_tick = Some(now);

        if self.cancelled {
            self.elapsed = Duration::ZERO;
            self.opacity = 1.0;
            return self.frame(0.0, false);
        }

        self.elapsed += delta;
        let percent = if self.total.is_zero() {
            1.0
        } else {
            (self.elapsed.as_nanos() as f64 / self.total.as_nanos() as f64).min(1.0)
        };

        if self.elapsed.as_secs_f64() > self.total.as_secs_f64() / FADE_START_DIVISOR {
            self.opacity = (((1.0 - percent) * 3.0 + 0.01) as f32).max(MIN_OPACITY);
        }

        let finished = self.elapsed >= self.total;
        self.frame(percent, finished)
    }

    fn frame(&self, percent: f64, finished: bool) -> CountdownFrame {
        CountdownFrame {
            elapsed: self.elapsed,
            percent,
            progress_width: (self.width as f64 * percent).floor() as u32,
            opacity: self.opacity,
            finished,
        }
    }
}
