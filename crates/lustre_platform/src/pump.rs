//! Host message pump

use crate::error::Result;

/// The host toolkit's cooperative message loop
pub trait HostPump {
    /// Service at most one pending host message.
    ///
    /// Must return promptly when nothing is pending. Returns whether a message
    /// was processed.
    fn process_one(&mut self) -> Result<bool>;
}

impl<F> HostPump for F
where
    F: FnMut() -> Result<bool>,
{
    fn process_one(&mut self) -> Result<bool> {
        self()
    }
}

/// A pump with nothing to service, for hosts that run their loop elsewhere
#[derive(Clone, Copy, Debug, Default)]
pub struct IdlePump;

impl HostPump for IdlePump {
    fn process_one(&mut self) -> Result<bool> {
        Ok(false)
    }
}
