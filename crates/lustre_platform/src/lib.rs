//! Lustre Platform
//!
//! Glue between themed surfaces and the host toolkit's message loop.
//!
//! - [`HostPump`]: the host's non-blocking "process one pending message" primitive
//! - [`Completion`] / [`ModalCloser`]: single-writer completion cell of a modal surface
//! - [`ModalMonitor`]: blocks a caller until a surface closes while the pump keeps running

pub mod error;
pub mod modal;
pub mod pump;

pub use error::{PlatformError, Result};
pub use modal::{Completion, ModalCloser, ModalMonitor, ModalOptions, ModalState, ModalSurface};
pub use pump::{HostPump, IdlePump};
