//! Focus guides and the default focus logic beneath them.

use reactv_core::logging::{span_names, targets};
use reactv_core::{ViewId, ViewTag};

use super::{FocusDirection, FocusGuideConfig, FocusGuideState, FocusableMode};
use crate::engine::ViewEngine;
use crate::error::ViewResult;
use crate::events::ViewEventKind;
use crate::host::{DescendantFocusability, ViewHost};

impl<H: ViewHost + 'static> ViewEngine<H> {
    // =========================================================================
    // Configuration
    // =========================================================================

    /// Returns `true` if `view` is a registered group acting as a focus guide.
    pub fn is_focus_guide(&self, view: ViewId) -> bool {
        self.group(view).is_some_and(|g| g.focus.config.is_guide())
    }

    pub fn focus_guide_config(&self, view: ViewId) -> Option<&FocusGuideConfig> {
        self.group(view).map(|g| &g.focus.config)
    }

    /// The remembered last focused descendant of an auto-focus guide.
    pub fn last_focused(&self, view: ViewId) -> Option<ViewId> {
        self.group(view).and_then(|g| g.focus.last_focused)
    }

    /// Replace the destination tags of `view`.
    pub fn set_focus_destinations(&mut self, view: ViewId, destinations: Vec<ViewTag>) -> ViewResult<()> {
        tracing::trace!(target: targets::FOCUS, ?view, ?destinations, "focus destinations");
        self.require_group_mut(view)?.focus.config.destinations = destinations;
        Ok(())
    }

    /// Turn auto-focus on or off. The remembered descendant is forgotten
    /// either way.
    pub fn set_auto_focus(&mut self, view: ViewId, enabled: bool) -> ViewResult<()> {
        let focus = &mut self.require_group_mut(view)?.focus;
        focus.config.auto_focus = enabled;
        focus.last_focused = None;
        Ok(())
    }

    pub fn set_trap_focus(&mut self, view: ViewId, direction: FocusDirection, enabled: bool) -> ViewResult<()> {
        self.require_group_mut(view)?
            .focus
            .config
            .set_trap(direction, enabled);
        Ok(())
    }

    // =========================================================================
    // Guide queries
    // =========================================================================

    /// The nearest focus guide strictly above `view`.
    pub fn find_parent_focus_guide(&self, view: ViewId) -> Option<ViewId> {
        let mut current = self.host.parent(view);
        while let Some(v) = current {
            if self.is_focus_guide(v) {
                return Some(v);
            }
            current = self.host.parent(v);
        }
        None
    }

    pub fn focus_guide_state(&self, view: ViewId) -> FocusGuideState {
        let Some(group) = self.group(view) else {
            return FocusGuideState::NotAGuide;
        };
        if !group.focus.config.is_guide() {
            return FocusGuideState::NotAGuide;
        }
        if group.focus.is_recovering() {
            return FocusGuideState::RecoveryMode;
        }
        match self.host.focused() {
            Some(focused)
                if self.is_descendant(view, focused)
                    && self.find_parent_focus_guide(focused) == Some(view) =>
            {
                FocusGuideState::GuideActive
            }
            _ => FocusGuideState::GuideIdle,
        }
    }

    /// Returns `true` if `view` lies strictly below `ancestor`.
    pub(crate) fn is_descendant(&self, ancestor: ViewId, view: ViewId) -> bool {
        let mut current = self.host.parent(view);
        while let Some(v) = current {
            if v == ancestor {
                return true;
            }
            current = self.host.parent(v);
        }
        false
    }

    pub(crate) fn has_focused_descendant(&self, view: ViewId) -> bool {
        self.host
            .focused()
            .is_some_and(|focused| self.is_descendant(view, focused))
    }

    pub(crate) fn root_of(&self, view: ViewId) -> ViewId {
        let mut root = view;
        while let Some(parent) = self.host.parent(root) {
            root = parent;
        }
        root
    }

    /// First view tagged `tag` in the attached subtree of `root`, `root`
    /// included.
    pub(crate) fn find_view_by_tag(&self, root: ViewId, tag: ViewTag) -> Option<ViewId> {
        if !tag.is_valid() {
            return None;
        }
        let mut stack = vec![root];
        while let Some(view) = stack.pop() {
            if self.host.tag(view) == tag {
                return Some(view);
            }
            stack.extend(self.host.children(view).into_iter().rev());
        }
        None
    }

    /// First destination of `guide` present in the tree, searching inside
    /// the guide before the whole tree.
    pub(crate) fn find_destination(&self, guide: ViewId) -> Option<ViewId> {
        let destinations = &self.group(guide)?.focus.config.destinations;
        let root = self.root_of(guide);
        destinations.iter().find_map(|&tag| {
            self.find_view_by_tag(guide, tag)
                .or_else(|| self.find_view_by_tag(root, tag))
        })
    }

    /// The remembered descendant of `guide` if it is still inside the guide
    /// and attached to a window. A stale reference is dropped.
    pub(crate) fn live_last_focused(&mut self, guide: ViewId) -> Option<ViewId> {
        let last = self.group(guide)?.focus.last_focused?;
        if self.host.contains(last)
            && self.host.is_attached_to_window(last)
            && self.is_descendant(guide, last)
        {
            return Some(last);
        }
        tracing::debug!(target: targets::FOCUS, ?guide, ?last, "dropping stale last focused view");
        if let Some(group) = self.group_mut(guide) {
            group.focus.last_focused = None;
        }
        None
    }

    /// The first focusable view below `guide`, as directional search would
    /// collect it, excluding the guide itself.
    pub fn first_focusable_descendant(&self, guide: ViewId) -> Option<ViewId> {
        let mut focusables = Vec::new();
        self.default_add_focusables(guide, FocusDirection::Down, FocusableMode::All, &mut focusables);
        focusables.into_iter().find(|&v| v != guide)
    }

    // =========================================================================
    // Requesting focus
    // =========================================================================

    /// Ask for focus to move to `view` or somewhere inside it.
    ///
    /// A focus guide redirects the request, in order, to its first
    /// destination present in the tree, to its remembered descendant (with
    /// auto-focus), and to its first focusable descendant, before falling
    /// back to the default logic. A guide whose destinations are all missing
    /// refuses focus.
    ///
    /// Returns `true` if focus ended up on or inside the requested target.
    pub fn request_focus(&mut self, view: ViewId, direction: FocusDirection) -> bool {
        self.affinity.debug_assert_same_thread("request_focus");
        if !self.host.contains(view) {
            return false;
        }
        let redirects = self
            .group(view)
            .is_some_and(|g| g.focus.config.is_guide() && !g.focus.is_recovering());
        if !redirects {
            return self.default_request_focus(view, direction);
        }
        if self.resolving.contains(&view) {
            tracing::warn!(target: targets::FOCUS, ?view, "focus guide redirect cycle");
            return false;
        }

        let _span = tracing::debug_span!(span_names::FOCUS_REQUEST, ?view, ?direction).entered();
        self.resolving.push(view);
        let taken = self.resolve_guide_focus(view, direction);
        self.resolving.pop();
        taken
    }

    fn resolve_guide_focus(&mut self, guide: ViewId, direction: FocusDirection) -> bool {
        let has_destinations = self
            .group(guide)
            .is_some_and(|g| !g.focus.config.destinations.is_empty());
        if has_destinations {
            let Some(destination) = self.find_destination(guide) else {
                tracing::debug!(target: targets::FOCUS, ?guide, "no destination in the tree");
                return false;
            };
            if self.request_focus(destination, direction) {
                return true;
            }
            // Fall back to a focusable ancestor only while still inside the guide.
            if self.is_descendant(guide, destination) {
                let mut current = self.host.parent(destination);
                while let Some(ancestor) = current
                    && ancestor != guide
                {
                    if self.try_take_focus(ancestor) {
                        return true;
                    }
                    current = self.host.parent(ancestor);
                }
            }
        }

        let auto_focus = self.group(guide).is_some_and(|g| g.focus.config.auto_focus);
        if auto_focus
            && let Some(last) = self.live_last_focused(guide)
            && self.request_focus(last, direction)
        {
            return true;
        }

        if let Some(first) = self.first_focusable_descendant(guide)
            && self.request_focus(first, direction)
        {
            return true;
        }

        self.default_request_focus(guide, direction)
    }

    /// Focus logic of a plain container, following its descendant
    /// focusability.
    pub(crate) fn default_request_focus(&mut self, view: ViewId, direction: FocusDirection) -> bool {
        match self.host.descendant_focusability(view) {
            DescendantFocusability::BlockDescendants => self.try_take_focus(view),
            DescendantFocusability::BeforeDescendants => {
                self.try_take_focus(view) || self.request_focus_in_descendants(view, direction)
            }
            DescendantFocusability::AfterDescendants => {
                self.request_focus_in_descendants(view, direction) || self.try_take_focus(view)
            }
        }
    }

    fn request_focus_in_descendants(&mut self, view: ViewId, direction: FocusDirection) -> bool {
        let mut children = self.host.children(view);
        if !direction.visits_children_forward() {
            children.reverse();
        }
        children
            .into_iter()
            .any(|child| self.host.is_visible(child) && self.request_focus(child, direction))
    }

    /// Returns `true` if `view` itself can hold focus right now.
    pub(crate) fn can_take_focus(&self, view: ViewId) -> bool {
        self.host.is_focusable(view) && self.host.is_shown(view) && !self.has_blocking_ancestor(view)
    }

    fn has_blocking_ancestor(&self, view: ViewId) -> bool {
        let mut current = self.host.parent(view);
        while let Some(v) = current {
            if self.host.descendant_focusability(v) == DescendantFocusability::BlockDescendants {
                return true;
            }
            current = self.host.parent(v);
        }
        false
    }

    /// Give focus to `view` itself, without any redirection.
    pub(crate) fn try_take_focus(&mut self, view: ViewId) -> bool {
        if !self.can_take_focus(view) {
            return false;
        }
        self.set_focus(view);
        true
    }

    /// Move host focus to `view` and run the focus change side effects.
    pub(crate) fn set_focus(&mut self, view: ViewId) {
        let previous = self.host.focused();
        if previous == Some(view) {
            return;
        }
        self.host.set_focused(Some(view));

        let mut current = self.host.parent(view);
        while let Some(ancestor) = current {
            if let Some(group) = self.groups.get_mut(ancestor)
                && group.focus.config.auto_focus
            {
                group.focus.last_focused = Some(view);
            }
            current = self.host.parent(ancestor);
        }

        if let Some(previous) = previous
            && self.is_group(previous)
            && self.host.contains(previous)
        {
            self.emit_view_event(ViewEventKind::Blur, previous);
        }
        if self.is_group(view) {
            self.emit_view_event(ViewEventKind::Focus, view);
        }
        self.router.set_focused_tag(self.host.tag(view));
        tracing::debug!(target: targets::FOCUS, ?previous, focused = ?view, "focus changed");
    }

    /// Drop focus entirely.
    pub fn clear_focus(&mut self) {
        self.affinity.debug_assert_same_thread("clear_focus");
        let Some(previous) = self.host.focused() else {
            return;
        };
        self.host.set_focused(None);
        if self.is_group(previous) {
            self.emit_view_event(ViewEventKind::Blur, previous);
        }
        self.router.set_focused_tag(ViewTag::NO_ID);
        tracing::debug!(target: targets::FOCUS, ?previous, "focus cleared");
    }

    // =========================================================================
    // Focusable collection
    // =========================================================================

    /// Collect the views directional search may move to, in tree order.
    ///
    /// A focus guide with no focus inside it contributes only itself, even
    /// when it is not focusable, so that search can land on it and let it
    /// redirect.
    pub fn add_focusables(
        &self,
        view: ViewId,
        direction: FocusDirection,
        mode: FocusableMode,
        out: &mut Vec<ViewId>,
    ) {
        let collapsed = self.group(view).is_some_and(|g| {
            g.focus.config.is_guide() && !g.focus.is_recovering()
        }) && self.host.descendant_focusability(view) != DescendantFocusability::BlockDescendants
            && !self.has_focused_descendant(view);
        if collapsed {
            out.push(view);
            return;
        }
        self.default_add_focusables(view, direction, mode, out);
    }

    pub(crate) fn default_add_focusables(
        &self,
        view: ViewId,
        direction: FocusDirection,
        mode: FocusableMode,
        out: &mut Vec<ViewId>,
    ) {
        let focusability = self.host.descendant_focusability(view);
        if focusability == DescendantFocusability::BlockDescendants {
            self.add_self_focusable(view, mode, out);
            return;
        }
        let before = out.len();
        if focusability == DescendantFocusability::BeforeDescendants {
            self.add_self_focusable(view, mode, out);
        }
        for child in self.host.children(view) {
            if self.host.is_visible(child) {
                self.add_focusables(child, direction, mode, out);
            }
        }
        if focusability == DescendantFocusability::AfterDescendants && out.len() == before {
            self.add_self_focusable(view, mode, out);
        }
    }

    fn add_self_focusable(&self, view: ViewId, mode: FocusableMode, out: &mut Vec<ViewId>) {
        if !self.host.is_focusable(view) || !self.host.is_visible(view) {
            return;
        }
        if mode == FocusableMode::TouchMode && !self.host.is_focusable_in_touch_mode(view) {
            return;
        }
        out.push(view);
    }
}
