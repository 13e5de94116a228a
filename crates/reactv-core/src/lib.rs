//! Core systems for reactv.
//!
//! This crate holds the pieces of the view engine that do not depend on the
//! host toolkit:
//!
//! - [`geometry`] - Integer rectangles, points and insets
//! - [`id`] - View handles ([`ViewId`]), framework tags ([`ViewTag`]) and surfaces
//! - [`task`] - Deferred single-shot tasks for the UI thread
//! - [`signal`] - Outbound notification signals
//! - [`config`] - Engine configuration injected at construction
//! - [`thread_check`] - UI-thread affinity assertions
//! - [`logging`] - Tracing targets and tree dump options
//!
//! The view engine itself lives in `reactv-view`.

pub mod config;
pub mod error;
pub mod geometry;
pub mod id;
pub mod logging;
pub mod signal;
pub mod task;
pub mod thread_check;

pub use config::EngineConfig;
pub use error::{ConfigError, ConfigResult};
pub use geometry::{Insets, Point, Rect};
pub use id::{SurfaceId, ViewId, ViewTag};
pub use logging::{TreeFormatOptions, TreeStyle};
pub use signal::{ConnectionId, Signal};
pub use task::{ReadyTasks, Task, TaskId, TaskQueue};
pub use thread_check::{ThreadAffinity, is_ui_thread, set_ui_thread};
