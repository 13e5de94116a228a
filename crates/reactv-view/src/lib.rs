//! View group engine for reactv.
//!
//! This crate implements the behavior a TV-capable host toolkit's view
//! group needs on top of plain layout:
//!
//! - **Subview clipping**: children scrolled out of a container's visible
//!   area are detached from the host tree and reattached, in order, when they
//!   come back into view.
//! - **Focus guides and traps**: containers that redirect incoming focus to
//!   a destination or to the last focused descendant, and containers that
//!   keep directional navigation inside themselves.
//! - **Focus recovery**: focus on a view that leaves the tree is handed back
//!   to the nearest guide instead of being lost.
//! - **Remote keys**: named key events with long-press detection.
//!
//! Everything is driven through [`ViewEngine`], which talks to the platform
//! only through the [`ViewHost`] adapter. [`MemoryHost`] is a complete
//! in-memory host for tests and tooling.
//!
//! # Example
//!
//! ```
//! use reactv_core::{EngineConfig, Rect};
//! use reactv_view::{FocusDirection, MemoryHost, ViewEngine, ViewHost};
//!
//! let mut host = MemoryHost::new();
//! let root = host.view(1).window_root().frame(Rect::new(0, 0, 100, 100)).create();
//! let button = host.view(2).focusable(true).frame(Rect::new(0, 0, 50, 50)).create();
//! host.append_child(root, button).unwrap();
//!
//! let mut engine = ViewEngine::new(host, EngineConfig::default());
//! engine.register_group(root).unwrap();
//! assert!(engine.request_focus(root, FocusDirection::Down));
//! assert_eq!(engine.host().focused(), Some(button));
//! ```

mod debug;
mod engine;
mod error;
mod events;
pub mod focus;
mod group;
mod hit_test;
pub mod host;
pub mod input;
mod manager;
pub mod props;
pub mod style;

pub use debug::ViewTreeDebug;
pub use engine::ViewEngine;
pub use error::{HostError, HostResult, PropError, PropResult, ViewError, ViewResult};
pub use events::{ViewEvent, ViewEventKind};
pub use focus::{FocusDirection, FocusGuideConfig, FocusGuideState, FocusableMode};
pub use group::{ClippedChildren, ClippingSnapshot, ShadowIndexError};
pub use host::{AccessibilityAction, DescendantFocusability, MemoryHost, ViewBuilder, ViewHost};
pub use input::{HwInputRouter, HwKeyEvent, KeyAction, KeyCode, KeyEvent};
pub use props::{NextFocus, Overflow, PointerEvents, ViewCommand, ViewProp, ViewProps};
pub use style::{BorderCorner, BorderEdge, StyleApplicator, StyleProp};
