//! Per-container state kept by the engine.
//!
//! Every registered view group owns one [`ViewGroupState`]. The state is
//! composed of independent capabilities: subview clipping (present only
//! while enabled), focus guide/trap bookkeeping, and the props that affect
//! hit testing and navigation.

mod children;
pub(crate) mod clipping;

pub use children::{ClippedChildren, ShadowIndexError};

use reactv_core::Rect;

use crate::focus::FocusState;
use crate::props::ViewProps;

/// Shadow state of a container with subview clipping enabled.
#[derive(Debug, Clone)]
pub(crate) struct ClippingState {
    pub(crate) rect: Rect,
    pub(crate) children: ClippedChildren,
    pub(crate) inserts: usize,
    pub(crate) removes: usize,
}

/// Counters describing a clipping container, for tests and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClippingSnapshot {
    pub clipping_rect: Rect,
    /// Logical children, attached or clipped.
    pub logical_count: usize,
    /// Children currently attached to the host.
    pub attached_count: usize,
    /// Logical children currently detached.
    pub clipped_count: usize,
    pub capacity: usize,
    pub reallocations: usize,
    pub inserts: usize,
    pub removes: usize,
    pub recycle_count: u32,
}

/// Everything the engine tracks for one view group.
#[derive(Debug, Default)]
pub(crate) struct ViewGroupState {
    pub(crate) props: ViewProps,
    pub(crate) focus: FocusState,
    pub(crate) clipping: Option<ClippingState>,
    pub(crate) recycle_count: u32,
}

impl ViewGroupState {
    pub(crate) fn clipping_enabled(&self) -> bool {
        self.clipping.is_some()
    }
}
