//! Lustre Widget Library
//!
//! Flat, themed surfaces drawn through the three-phase owner-draw pipeline.
//!
//! - [`Menu`], [`Tooltip`], [`Grid`]: static themed surfaces
//! - [`MessageBox`]: modal dialog returning a [`DialogResult`]
//! - [`Notification`] / [`NotificationHost`]: single-slot transient
//!   notifications with slide-in, auto-close countdown and fade

mod base;
pub mod grid;
pub mod menu;
pub mod message_box;
pub mod notification;
pub mod surface;
pub mod tooltip;

pub use base::SurfaceBase;
pub use grid::{Grid, GridColumn};
pub use menu::{Menu, MenuItem};
pub use message_box::{
    modal_monitor, DialogResult, MessageBox, MessageBoxButtons, MessageBoxIcon,
};
pub use notification::{Notification, NotificationHost, NotificationKind};
pub use surface::{paint_surface, Surface, SurfaceTree};
pub use tooltip::Tooltip;
