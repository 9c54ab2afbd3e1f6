//! Integration tests for scheduler-driven countdowns and tweens
//!
//! These tests verify that:
//! - A countdown stepped by a scheduler task closes on time
//! - Cancelling mid-countdown restarts the full close time from the clear
//! - Tweens and countdowns share one scheduler without interfering

use lustre_animation::{
    AnimatedProperty, Clock, Countdown, Easing, ManualClock, Scheduler, TweenEngine,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

struct Harness {
    clock: Rc<ManualClock>,
    scheduler: Scheduler,
    countdown: Rc<RefCell<Countdown>>,
    closed_at: Rc<Cell<Option<Duration>>>,
}

fn harness(total: Duration, tick: Duration) -> Harness {
    let clock = Rc::new(ManualClock::new());
    let scheduler = Scheduler::with_clock(clock.clone());
    let countdown = Rc::new(RefCell::new(Countdown::new(total, 200)));
    countdown.borrow_mut().begin(scheduler.now());
    let closed_at = Rc::new(Cell::new(None));

    let cd = Rc::clone(&countdown);
    let closed = Rc::clone(&closed_at);
    scheduler.start(tick, move |t| {
        let frame = cd.borrow_mut().tick(t.now());
        if frame.finished {
            closed.set(Some(t.now()));
            t.dispose();
        }
    });

    Harness {
        clock,
        scheduler,
        countdown,
        closed_at,
    }
}

impl Harness {
    fn run_until(&self, until: Duration, step: Duration) {
        while self.clock.now() < until && self.closed_at.get().is_none() {
            self.clock.advance(step);
            self.scheduler.run_due();
        }
    }
}

/// Test that an uninterrupted countdown closes at the configured time
#[test]
fn test_countdown_closes_on_time() {
    let h = harness(ms(3000), ms(10));
    h.run_until(ms(10_000), ms(10));

    assert_eq!(h.closed_at.get(), Some(ms(3000)));
    assert!(h.scheduler.is_empty(), "countdown task should dispose itself");
}

/// Test that uneven tick delivery does not change the close time
#[test]
fn test_countdown_tolerates_jitter() {
    let h = harness(ms(1000), ms(1));
    for step in [3u64, 17, 1, 40, 250, 9, 300, 2, 500] {
        h.clock.advance(ms(step));
        h.scheduler.run_due();
        if h.closed_at.get().is_some() {
            break;
        }
    }

    let closed = h.closed_at.get().expect("countdown should have closed");
    assert!(closed >= ms(1000));
    assert!(closed <= ms(1122));
}

/// Test that cancel + clear restarts the full countdown from the clear
#[test]
fn test_cancel_restarts_countdown() {
    let h = harness(ms(3000), ms(10));
    h.run_until(ms(1000), ms(10));
    assert_eq!(h.countdown.borrow().elapsed(), ms(1000));

    h.countdown.borrow_mut().set_cancelled(true);
    h.clock.advance(ms(10));
    h.scheduler.run_due();
    assert_eq!(h.countdown.borrow().elapsed(), Duration::ZERO);
    assert_eq!(h.countdown.borrow().opacity(), 1.0);

    h.countdown.borrow_mut().set_cancelled(false);
    let cleared_at = h.clock.now();
    h.run_until(ms(20_000), ms(10));

    let closed = h.closed_at.get().expect("countdown should have closed");
    assert!(
        closed - cleared_at >= ms(3000),
        "closed {:?} after clear, expected at least 3000ms",
        closed - cleared_at
    );
}

/// Test that a held cancel flag keeps the surface open indefinitely
#[test]
fn test_held_cancel_never_closes() {
    let h = harness(ms(500), ms(10));
    h.countdown.borrow_mut().set_cancelled(true);
    h.run_until(ms(60_000), ms(10));
    assert_eq!(h.closed_at.get(), None);
}

/// Test that a slide-in tween and a countdown share one scheduler
#[test]
fn test_tween_and_countdown_share_scheduler() {
    let h = harness(ms(400), ms(10));
    let engine = TweenEngine::new(h.scheduler.clone());
    let top = AnimatedProperty::new(600.0f32);
    engine.start(&top, 500.0, Easing::EaseInOutCubic, ms(200));

    h.run_until(ms(200), ms(4));
    assert_eq!(top.get(), 500.0);
    assert!(!engine.is_animating(&top));
    assert!(h.closed_at.get().is_none());

    h.run_until(ms(1000), ms(4));
    assert!(h.closed_at.get().is_some());
}
