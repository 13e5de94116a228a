//! Focus navigation for TV-style directional input.
//!
//! Two container behaviors are layered over the host's default focus logic:
//!
//! - A **focus guide** redirects focus that arrives at the container to a
//!   configured destination, to the descendant that was focused last, or to
//!   its first focusable descendant. Until focus is inside it, a guide
//!   presents itself to directional search as a single focusable unit.
//! - A **focus trap** keeps directional search inside the container for the
//!   trapped directions.
//!
//! A container is a guide iff it has destinations or auto-focus. Trap flags
//! never make a container a guide.
//!
//! # Recovery
//!
//! When a focused view is about to leave the tree (removed, or clipped out by
//! the subview clipping pass), its nearest guide ancestor briefly becomes
//! focusable and takes focus itself, then a deferred task hands focus to the
//! guide's first focusable descendant.

mod accessibility;
pub(crate) mod finder;
mod guide;
mod recovery;
mod search;

use reactv_core::{ViewId, ViewTag};

/// Direction of a focus move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusDirection {
    Up,
    Down,
    Left,
    Right,
    /// Next in traversal order.
    Forward,
    /// Previous in traversal order.
    Backward,
}

impl FocusDirection {
    /// The four geometric directions.
    pub const DIRECTIONAL: [FocusDirection; 4] = [
        FocusDirection::Up,
        FocusDirection::Down,
        FocusDirection::Left,
        FocusDirection::Right,
    ];

    /// Returns `true` for up, down, left and right.
    pub fn is_directional(self) -> bool {
        !matches!(self, FocusDirection::Forward | FocusDirection::Backward)
    }

    /// Whether descendants are tried first-to-last when focus is requested
    /// in this direction.
    pub(crate) fn visits_children_forward(self) -> bool {
        matches!(
            self,
            FocusDirection::Down | FocusDirection::Right | FocusDirection::Forward
        )
    }
}

/// Which focusables to collect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusableMode {
    /// Every focusable view.
    #[default]
    All,
    /// Only views that stay focusable in touch mode.
    TouchMode,
}

/// Per-container focus guide and trap configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusGuideConfig {
    /// Tags tried in order when focus enters the guide.
    pub destinations: Vec<ViewTag>,
    /// Remember the last focused descendant and restore it.
    pub auto_focus: bool,
    pub trap_up: bool,
    pub trap_down: bool,
    pub trap_left: bool,
    pub trap_right: bool,
}

impl FocusGuideConfig {
    /// Returns `true` if this configuration makes the container a focus guide.
    pub fn is_guide(&self) -> bool {
        !self.destinations.is_empty() || self.auto_focus
    }

    /// Returns `true` if search in `direction` is trapped.
    pub fn traps(&self, direction: FocusDirection) -> bool {
        match direction {
            FocusDirection::Up => self.trap_up,
            FocusDirection::Down => self.trap_down,
            FocusDirection::Left => self.trap_left,
            FocusDirection::Right => self.trap_right,
            FocusDirection::Forward | FocusDirection::Backward => false,
        }
    }

    pub fn set_trap(&mut self, direction: FocusDirection, enabled: bool) {
        match direction {
            FocusDirection::Up => self.trap_up = enabled,
            FocusDirection::Down => self.trap_down = enabled,
            FocusDirection::Left => self.trap_left = enabled,
            FocusDirection::Right => self.trap_right = enabled,
            FocusDirection::Forward | FocusDirection::Backward => {}
        }
    }
}

/// Where a container stands with respect to focus guide behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusGuideState {
    /// No destinations and no auto-focus.
    NotAGuide,
    /// A guide with no focus inside it.
    GuideIdle,
    /// A guide that is the nearest guide ancestor of the focused view.
    GuideActive,
    /// A guide holding focus itself while a removed descendant's focus is
    /// handed back.
    RecoveryMode,
}

/// Focus bookkeeping the engine keeps per view group.
#[derive(Debug, Clone, Default)]
pub(crate) struct FocusState {
    pub(crate) config: FocusGuideConfig,
    /// Last focused descendant, maintained only while auto-focus is on.
    pub(crate) last_focused: Option<ViewId>,
    /// Focusability to restore when recovery finishes.
    pub(crate) recovery: Option<bool>,
}

impl FocusState {
    pub(crate) fn is_recovering(&self) -> bool {
        self.recovery.is_some()
    }
}
