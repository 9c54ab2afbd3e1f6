//! Platform error types

use thiserror::Error;

/// Host integration errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The caller aborted a modal wait
    #[error("Modal wait aborted")]
    Aborted,

    /// No runtime was available to run the monitor task
    #[error("Failed to launch modal monitor: {0}")]
    MonitorLaunch(String),

    /// The monitor task ended without signalling closure
    #[error("Modal monitor stopped before the surface closed")]
    MonitorLost,

    /// The host message pump reported a failure
    #[error("Host pump failed: {0}")]
    Pump(String),

    /// Generic platform error
    #[error("Platform error: {0}")]
    Other(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
