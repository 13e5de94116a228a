//! Semantic events emitted to the framework's event dispatcher.
//!
//! Events are emitted synchronously on [`ViewEngine::events`](crate::ViewEngine::events)
//! at the point of the state transition that causes them.

use std::fmt;

use reactv_core::{SurfaceId, ViewTag};

/// What happened to the target view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewEventKind {
    Focus,
    Blur,
    PressIn,
    PressOut,
}

impl ViewEventKind {
    /// Registration name used by the framework's event dispatcher.
    pub const fn event_name(self) -> &'static str {
        match self {
            ViewEventKind::Focus => "topFocus",
            ViewEventKind::Blur => "topBlur",
            ViewEventKind::PressIn => "topPressIn",
            ViewEventKind::PressOut => "topPressOut",
        }
    }
}

/// An event targeted at a single view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewEvent {
    pub kind: ViewEventKind,
    pub target: ViewTag,
    pub surface_id: SurfaceId,
}

impl ViewEvent {
    pub fn new(kind: ViewEventKind, target: ViewTag, surface_id: SurfaceId) -> Self {
        Self {
            kind,
            target,
            surface_id,
        }
    }

    pub fn event_name(&self) -> &'static str {
        self.kind.event_name()
    }
}

impl fmt::Display for ViewEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.event_name(), self.target, self.surface_id)
    }
}
