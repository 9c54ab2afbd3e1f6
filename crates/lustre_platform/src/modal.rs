//! Modal completion monitor
//!
//! A modal surface is shown without blocking, a background task watches its
//! [`Completion`] cell, and the calling thread keeps servicing the host pump
//! until the task signals that the surface closed. The waiter also checks the
//! cell once per pump cycle, so an unpolled monitor task cannot strand it.
//!
//! The close path publishes the result before the state flips away from
//! `Open` (release store, acquire load), so anyone who observes a closed cell
//! also observes its result.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::error::{PlatformError, Result};
use crate::pump::HostPump;

const OPEN: u8 = 0;
const CLOSED: u8 = 1;
const DISPOSED: u8 = 2;

/// Lifecycle of a modal surface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalState {
    /// Visible, no result yet
    Open,
    /// Closed with a published result
    Closed,
    /// Torn down without a result
    Disposed,
}

/// Completion cell: written once by the close path, read by the monitor and
/// the waiting caller
#[derive(Debug)]
pub struct Completion<R> {
    result: OnceLock<R>,
    state: AtomicU8,
}

impl<R> Completion<R> {
    pub fn new() -> Self {
        Self {
            result: OnceLock::new(),
            state: AtomicU8::new(OPEN),
        }
    }

    /// Publish `result` and close. Returns `false` if the cell was already
    /// closed or disposed.
    pub fn complete(&self, result: R) -> bool {
        if self.state.load(Ordering::Acquire) != OPEN {
            return false;
        }
        if self.result.set(result).is_err() {
            return false;
        }
        self.state
            .compare_exchange(OPEN, CLOSED, Ordering::Release, Ordering::Relaxed)
            .is_ok()
    }

    /// Tear down without a result. Returns `false` if already terminal.
    pub fn dispose(&self) -> bool {
        self.state
            .compare_exchange(OPEN, DISPOSED, Ordering::Release, Ordering::Relaxed)
            .is_ok()
    }

    pub fn state(&self) -> ModalState {
        match self.state.load(Ordering::Acquire) {
            OPEN => ModalState::Open,
            CLOSED => ModalState::Closed,
            _ => ModalState::Disposed,
        }
    }

    /// Whether the surface is still visible
    pub fn is_open(&self) -> bool {
        self.state() == ModalState::Open
    }

    /// The published result, once closed
    pub fn result(&self) -> Option<&R> {
        match self.state() {
            ModalState::Closed => self.result.get(),
            _ => None,
        }
    }
}

impl<R> Default for Completion<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Close handle for a modal surface, safe to hand to buttons, owners or
/// other threads
#[derive(Debug)]
pub struct ModalCloser<R> {
    cell: Weak<Completion<R>>,
}

impl<R> ModalCloser<R> {
    pub fn new(cell: &Arc<Completion<R>>) -> Self {
        Self {
            cell: Arc::downgrade(cell),
        }
    }

    /// Close with `result`. No-op on a closed or dropped surface.
    pub fn close(&self, result: R) -> bool {
        self.cell
            .upgrade()
            .is_some_and(|cell| cell.complete(result))
    }

    /// Tear the surface down without a result
    pub fn dispose(&self) -> bool {
        self.cell.upgrade().is_some_and(|cell| cell.dispose())
    }

    /// A dropped surface counts as closed
    pub fn is_open(&self) -> bool {
        self.cell.upgrade().is_some_and(|cell| cell.is_open())
    }
}

impl<R> Clone for ModalCloser<R> {
    fn clone(&self) -> Self {
        Self {
            cell: Weak::clone(&self.cell),
        }
    }
}

/// A surface that can be shown modally
pub trait ModalSurface {
    type Output: Clone + Send + Sync + 'static;

    /// Show the surface. Must not block.
    fn present(&mut self);

    fn completion(&self) -> &Arc<Completion<Self::Output>>;

    /// Release the surface after its result has been read
    fn release(&mut self) {}
}

/// Timing of a modal wait
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModalOptions {
    /// How often the monitor task checks the completion cell
    pub poll_interval: Duration,
    /// Pause between pump cycles on the waiting thread
    pub pump_yield: Duration,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(5),
            pump_yield: Duration::from_millis(1),
        }
    }
}

/// Drives modal waits on a tokio runtime
#[derive(Clone, Debug)]
pub struct ModalMonitor {
    runtime: Handle,
    options: ModalOptions,
}

impl ModalMonitor {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            options: ModalOptions::default(),
        }
    }

    /// Use the runtime of the current context
    pub fn current() -> Result<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| PlatformError::MonitorLaunch(e.to_string()))
    }

    pub fn with_options(mut self, options: ModalOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ModalOptions {
        self.options
    }

    /// Show `surface` and block until it closes, servicing `pump` meanwhile.
    ///
    /// Returns the published result, or `None` if the surface was disposed
    /// without one. Must be called from the pump-owning thread, outside of
    /// any async context.
    pub fn await_close<S, P>(&self, surface: &mut S, pump: &mut P) -> Result<Option<S::Output>>
    where
        S: ModalSurface + ?Sized,
        P: HostPump + ?Sized,
    {
        self.await_close_until(surface, pump, || false)
    }

    /// Like [`await_close`](Self::await_close), checking `aborted` once per
    /// pump cycle.
    ///
    /// On abort the monitor task is cancelled and the surface is left to the
    /// caller, still presented.
    pub fn await_close_until<S, P, A>(
        &self,
        surface: &mut S,
        pump: &mut P,
        mut aborted: A,
    ) -> Result<Option<S::Output>>
    where
        S: ModalSurface + ?Sized,
        P: HostPump + ?Sized,
        A: FnMut() -> bool,
    {
        surface.present();

        let watched = Arc::downgrade(surface.completion());
        let poll_interval = self.options.poll_interval;
        let (closed_tx, mut closed_rx) = oneshot::channel::<()>();

        let monitor = self.runtime.spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            loop {
                ticker.tick().await;
                let open = watched.upgrade().is_some_and(|cell| cell.is_open());
                if !open {
                    let _ = closed_tx.send(());
                    return;
                }
                if closed_tx.is_closed() {
                    // Waiter went away
                    return;
                }
            }
        });
        tracing::debug!("modal surface presented, monitor started");

        loop {
            match closed_rx.try_recv() {
                Ok(()) => break,
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Closed) => {
                    tracing::warn!("modal monitor ended without a close signal");
                    return Err(PlatformError::MonitorLost);
                }
            }

            // The monitor task may never be polled (e.g. an idle current-thread
            // runtime), so the waiter checks the cell itself too
            if !surface.completion().is_open() {
                tracing::trace!("modal close observed by the waiter");
                break;
            }

            if aborted() {
                monitor.abort();
                tracing::debug!("modal wait aborted");
                return Err(PlatformError::Aborted);
            }

            if let Err(e) = pump.process_one() {
                monitor.abort();
                return Err(e);
            }

            if self.options.pump_yield.is_zero() {
                std::thread::yield_now();
            } else {
                std::thread::sleep(self.options.pump_yield);
            }
        }

        monitor.abort();
        let completion = surface.completion();
        let result = completion.result().cloned();
        tracing::debug!("modal surface closed ({:?})", completion.state());
        surface.release();
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn complete_publishes_once() {
        let cell = Completion::new();
        assert!(cell.is_open());
        assert_eq!(cell.result(), None);

        assert!(cell.complete(7));
        assert!(!cell.complete(8));
        assert!(!cell.dispose());
        assert_eq!(cell.state(), ModalState::Closed);
        assert_eq!(cell.result(), Some(&7));
    }

    #[test]
    fn dispose_hides_without_result() {
        let cell = Completion::<u32>::new();
        assert!(cell.dispose());
        assert!(!cell.complete(1));
        assert_eq!(cell.state(), ModalState::Disposed);
        assert_eq!(cell.result(), None);
    }

    #[test]
    fn closer_on_dropped_cell_is_inert() {
        let cell = Arc::new(Completion::<u32>::new());
        let closer = ModalCloser::new(&cell);
        assert!(closer.is_open());
        drop(cell);

        assert!(!closer.is_open());
        assert!(!closer.close(1));
        assert!(!closer.dispose());
    }

    #[test]
    fn closed_state_implies_result_across_threads() {
        for _ in 0..200 {
            let cell = Arc::new(Completion::new());
            let writer = {
                let cell = Arc::clone(&cell);
                thread::spawn(move || {
                    cell.complete(42u64);
                })
            };
            loop {
                if cell.state() == ModalState::Closed {
                    assert_eq!(cell.result(), Some(&42));
                    break;
                }
                std::hint::spin_loop();
            }
            writer.join().unwrap();
        }
    }

    #[test]
    fn current_without_runtime_fails() {
        assert!(matches!(
            ModalMonitor::current(),
            Err(PlatformError::MonitorLaunch(_))
        ));
    }
}
