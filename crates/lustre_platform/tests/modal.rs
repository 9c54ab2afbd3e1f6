//! Integration tests for the modal completion monitor
//!
//! These tests verify that:
//! - A wait ends when the surface closes by any path (pump, other thread, disposal)
//! - A closed surface always has its result published
//! - Aborts and pump failures terminate the wait without touching the surface

use lustre_platform::{
    Completion, ModalCloser, ModalMonitor, ModalOptions, ModalState, ModalSurface,
    PlatformError, Result as PumpResult,
};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

struct Dialog {
    cell: Arc<Completion<u32>>,
    presented: bool,
    released: bool,
    close_on_present: Option<u32>,
}

impl Dialog {
    fn new() -> Self {
        Self {
            cell: Arc::new(Completion::new()),
            presented: false,
            released: false,
            close_on_present: None,
        }
    }

    fn closer(&self) -> ModalCloser<u32> {
        ModalCloser::new(&self.cell)
    }
}

impl ModalSurface for Dialog {
    type Output = u32;

    fn present(&mut self) {
        self.presented = true;
        if let Some(result) = self.close_on_present {
            self.cell.complete(result);
        }
    }

    fn completion(&self) -> &Arc<Completion<u32>> {
        &self.cell
    }

    fn release(&mut self) {
        self.released = true;
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_time()
        .build()
        .unwrap()
}

fn fast_monitor(rt: &tokio::runtime::Runtime) -> ModalMonitor {
    ModalMonitor::new(rt.handle().clone()).with_options(ModalOptions {
        poll_interval: Duration::from_millis(1),
        pump_yield: Duration::ZERO,
    })
}

/// Test that a close issued from inside the pump ends the wait
#[test]
fn test_close_from_pump() {
    let rt = runtime();
    let monitor = fast_monitor(&rt);
    let mut dialog = Dialog::new();
    let closer = dialog.closer();

    let mut cycles = 0u32;
    let mut pump = || -> PumpResult<bool> {
        cycles += 1;
        if cycles == 5 {
            closer.close(3);
        }
        Ok(true)
    };

    let result = monitor.await_close(&mut dialog, &mut pump).unwrap();

    assert_eq!(result, Some(3));
    assert!(dialog.presented);
    assert!(dialog.released);
    assert!(cycles >= 5, "pump must keep running until close");
}

/// Test that the result is never observed unset once the surface is closed
#[test]
fn test_result_published_before_close_under_stress() {
    let rt = runtime();
    let monitor = fast_monitor(&rt);

    for run in 0..100u32 {
        let mut dialog = Dialog::new();
        let closer = dialog.closer();
        let writer = thread::spawn(move || {
            thread::sleep(Duration::from_micros(u64::from(run % 7) * 150));
            closer.close(run)
        });

        let mut pump = || -> PumpResult<bool> { Ok(false) };
        let result = monitor.await_close(&mut dialog, &mut pump).unwrap();

        assert!(writer.join().unwrap());
        assert_eq!(result, Some(run), "run {} read a missing result", run);
        assert_eq!(dialog.cell.state(), ModalState::Closed);
    }
}

/// Test that disposing the surface is terminal and yields no result
#[test]
fn test_disposed_surface_ends_wait() {
    let rt = runtime();
    let monitor = fast_monitor(&rt);
    let mut dialog = Dialog::new();
    let closer = dialog.closer();

    let mut pump = || -> PumpResult<bool> {
        closer.dispose();
        Ok(true)
    };

    let result = monitor.await_close(&mut dialog, &mut pump).unwrap();
    assert_eq!(result, None);
    assert!(dialog.released);
}

/// Test that a surface closed during presentation returns immediately
#[test]
fn test_closed_during_present() {
    let rt = runtime();
    let monitor = fast_monitor(&rt);
    let mut dialog = Dialog::new();
    dialog.close_on_present = Some(9);

    let mut pump = || -> PumpResult<bool> { Ok(false) };
    let result = monitor.await_close(&mut dialog, &mut pump).unwrap();
    assert_eq!(result, Some(9));
}

/// Test that an aborted wait leaves the surface open and unreleased
#[test]
fn test_abort_leaves_surface_to_caller() {
    let rt = runtime();
    let monitor = fast_monitor(&rt);
    let mut dialog = Dialog::new();

    let mut checks = 0;
    let mut pump = || -> PumpResult<bool> { Ok(false) };
    let err = monitor
        .await_close_until(&mut dialog, &mut pump, || {
            checks += 1;
            checks > 3
        })
        .unwrap_err();

    assert!(matches!(err, PlatformError::Aborted));
    assert!(dialog.cell.is_open());
    assert!(!dialog.released);

    // The abandoned monitor must not interfere with a later close
    assert!(dialog.closer().close(1));
    assert_eq!(dialog.cell.result(), Some(&1));
}

/// Test that a pump failure ends the wait with the pump's error
#[test]
fn test_pump_failure_propagates() {
    let rt = runtime();
    let monitor = fast_monitor(&rt);
    let mut dialog = Dialog::new();

    let mut pump = || -> PumpResult<bool> {
        Err(PlatformError::Pump("host loop gone".into()))
    };
    let err = monitor.await_close(&mut dialog, &mut pump).unwrap_err();

    assert!(matches!(err, PlatformError::Pump(_)));
    assert!(!dialog.released);
}

/// Test that the monitor can be picked up from the ambient runtime
#[test]
fn test_monitor_from_entered_runtime() {
    let rt = runtime();
    let monitor = {
        let _guard = rt.enter();
        ModalMonitor::current().unwrap()
    };

    let mut dialog = Dialog::new();
    let closer = dialog.closer();
    let mut pump = || -> PumpResult<bool> {
        closer.close(5);
        Ok(true)
    };
    assert_eq!(monitor.await_close(&mut dialog, &mut pump).unwrap(), Some(5));
}

/// Test that the wait ends even when the runtime never polls the monitor task
#[test]
fn test_close_seen_without_driven_runtime() {
    let (done_tx, done_rx) = mpsc::channel();

    thread::spawn(move || {
        // Nothing ever calls block_on, so spawned tasks never run
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let monitor = fast_monitor(&rt);
        let mut dialog = Dialog::new();
        let closer = dialog.closer();

        let mut pump = || -> PumpResult<bool> {
            closer.close(7);
            Ok(true)
        };
        let result = monitor.await_close(&mut dialog, &mut pump);
        let _ = done_tx.send((result, dialog.released));
    });

    let (result, released) = done_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("wait must end once the surface is closed");
    assert_eq!(result.unwrap(), Some(7));
    assert!(released);
}
