//! The host toolkit adapter.
//!
//! The engine never owns host views. It sees the platform UI toolkit only
//! through [`ViewHost`], a narrow set of structural, geometric and focus
//! primitives. Anything richer (redirecting focus through guides, clipping,
//! traps) is layered on top by the engine.
//!
//! # Attached and logical children
//!
//! [`ViewHost::children`] returns the *attached* children of a view, i.e. the
//! real host child list. A clipping container keeps additional logical
//! children that are detached from the host; those are tracked by the engine
//! and have no parent as far as the host is concerned.
//!
//! # Implementations
//!
//! [`MemoryHost`] is an in-memory tree used by tests and by tooling that
//! wants to drive the engine without a device.

mod memory;

pub use memory::{MemoryHost, ViewBuilder};

use reactv_core::{Point, Rect, ViewId, ViewTag};

use crate::error::HostResult;

/// How a view group shares focus with its descendants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DescendantFocusability {
    /// The group gets focus before any of its descendants.
    #[default]
    BeforeDescendants,
    /// The group gets focus only if none of its descendants want it.
    AfterDescendants,
    /// Descendants never get focus, even if they are focusable.
    BlockDescendants,
}

/// Accessibility actions the engine may redirect through a focus guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessibilityAction {
    /// Move input focus to the view.
    Focus,
    /// Move the screen reader's accessibility focus to the view.
    AccessibilityFocus,
}

/// Access to the platform view tree.
///
/// All methods are called on the UI thread. Methods taking an unknown
/// [`ViewId`] return neutral values (`None`, `false`, empty) rather than
/// panicking; mutating methods return [`HostError::UnknownView`](crate::HostError).
pub trait ViewHost {
    /// Returns `true` if the handle names a live view.
    fn contains(&self, view: ViewId) -> bool;

    /// The attached parent of a view.
    fn parent(&self, view: ViewId) -> Option<ViewId>;

    /// Attached children in drawing order.
    fn children(&self, view: ViewId) -> Vec<ViewId>;

    /// Number of attached children.
    fn child_count(&self, view: ViewId) -> usize {
        self.children(view).len()
    }

    /// The attached child at `index`.
    fn child_at(&self, view: ViewId, index: usize) -> Option<ViewId> {
        self.children(view).get(index).copied()
    }

    /// Position of `child` among the attached children of `parent`.
    fn index_of_child(&self, parent: ViewId, child: ViewId) -> Option<usize> {
        self.children(parent).iter().position(|&c| c == child)
    }

    /// Attach `child` to `parent` at `index` without requesting a layout.
    fn attach_child(&mut self, parent: ViewId, child: ViewId, index: usize) -> HostResult<()>;

    /// Detach the attached child at `index` without requesting a layout.
    fn detach_child_at(&mut self, parent: ViewId, index: usize) -> HostResult<ViewId>;

    /// Detach every attached child of `parent`.
    fn detach_all_children(&mut self, parent: ViewId) -> HostResult<Vec<ViewId>>;

    /// Layout frame in the parent's content coordinates.
    ///
    /// Frames survive detaching, so a clipped child keeps its last layout.
    fn frame(&self, view: ViewId) -> Rect;

    /// Content scroll offset of the view.
    fn scroll_offset(&self, view: ViewId) -> Point {
        let _ = view;
        Point::ZERO
    }

    /// Returns `true` while a transform animation is running on the view.
    fn is_animating(&self, view: ViewId) -> bool {
        let _ = view;
        false
    }

    /// The framework tag of the view.
    fn tag(&self, view: ViewId) -> ViewTag;

    /// Returns `true` if the view itself is marked visible.
    fn is_visible(&self, view: ViewId) -> bool;

    /// Returns `true` if the view's ancestor chain reaches a window root.
    fn is_attached_to_window(&self, view: ViewId) -> bool;

    /// Returns `true` if the view and all its ancestors are visible and the
    /// view is attached to a window.
    fn is_shown(&self, view: ViewId) -> bool {
        if !self.is_attached_to_window(view) {
            return false;
        }
        let mut current = Some(view);
        while let Some(v) = current {
            if !self.is_visible(v) {
                return false;
            }
            current = self.parent(v);
        }
        true
    }

    fn is_focusable(&self, view: ViewId) -> bool;

    fn set_focusable(&mut self, view: ViewId, focusable: bool) -> HostResult<()>;

    /// Returns `true` if the view accepts focus while in touch mode.
    fn is_focusable_in_touch_mode(&self, view: ViewId) -> bool {
        let _ = view;
        false
    }

    fn set_focusable_in_touch_mode(&mut self, view: ViewId, focusable: bool) -> HostResult<()> {
        let _ = (view, focusable);
        Ok(())
    }

    fn descendant_focusability(&self, view: ViewId) -> DescendantFocusability;

    fn set_descendant_focusability(
        &mut self,
        view: ViewId,
        focusability: DescendantFocusability,
    ) -> HostResult<()>;

    /// The view holding input focus in the window, if any.
    fn focused(&self) -> Option<ViewId>;

    /// Move input focus without any redirection.
    ///
    /// The engine checks focusability before calling this.
    fn set_focused(&mut self, view: Option<ViewId>);

    /// Hand an accessibility action to the host's accessibility layer.
    ///
    /// Focus movement itself is done by the engine after this succeeds.
    fn perform_accessibility_action(
        &mut self,
        view: ViewId,
        action: AccessibilityAction,
    ) -> HostResult<bool>;

    /// Returns `true` for views that must never be placed inside a clipping
    /// container in a state where they are not shown.
    fn is_clipping_prohibited(&self, view: ViewId) -> bool {
        let _ = view;
        false
    }
}
