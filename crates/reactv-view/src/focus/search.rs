//! Directional and sequential focus search.

use reactv_core::logging::{span_names, targets};
use reactv_core::{Rect, ViewId};

use super::finder;
use super::{FocusDirection, FocusableMode};
use crate::engine::ViewEngine;
use crate::host::ViewHost;

impl<H: ViewHost + 'static> ViewEngine<H> {
    /// Find the view focus should move to from `focused`, searching from
    /// `node` upward.
    ///
    /// The first container on the way up that traps `direction` bounds the
    /// search to its own subtree; otherwise the search covers the whole tree.
    pub fn focus_search(
        &self,
        node: ViewId,
        focused: ViewId,
        direction: FocusDirection,
    ) -> Option<ViewId> {
        let _span = tracing::trace_span!(span_names::FOCUS_SEARCH, ?direction).entered();
        let mut current = node;
        loop {
            if self
                .group(current)
                .is_some_and(|g| g.focus.config.traps(direction))
            {
                tracing::trace!(target: targets::FOCUS, trap = ?current, "search bounded by trap");
                return self.find_next_focus(current, focused, direction);
            }
            match self.host.parent(current) {
                Some(parent) => current = parent,
                None => return self.find_next_focus(current, focused, direction),
            }
        }
    }

    /// Pick the next focus inside `root`.
    pub fn find_next_focus(
        &self,
        root: ViewId,
        focused: ViewId,
        direction: FocusDirection,
    ) -> Option<ViewId> {
        if let Some(next) = self.user_next_focus(root, focused, direction) {
            return Some(next);
        }

        let mut focusables = Vec::new();
        self.add_focusables(root, direction, FocusableMode::All, &mut focusables);
        if focusables.is_empty() {
            return None;
        }

        if direction.is_directional() {
            self.find_in_absolute_direction(root, focused, direction, &focusables)
        } else {
            find_in_relative_direction(focused, direction, &focusables)
        }
    }

    /// The `nextFocus*` target configured on the focused view, if it can
    /// take focus.
    fn user_next_focus(&self, root: ViewId, focused: ViewId, direction: FocusDirection) -> Option<ViewId> {
        let tag = self.group(focused)?.props.next_focus.get(direction)?;
        let target = self.find_view_by_tag(root, tag)?;
        if self.host.is_focusable(target) && self.host.is_shown(target) {
            Some(target)
        } else {
            tracing::debug!(target: targets::FOCUS, %tag, "next focus target cannot take focus");
            None
        }
    }

    fn find_in_absolute_direction(
        &self,
        root: ViewId,
        focused: ViewId,
        direction: FocusDirection,
        focusables: &[ViewId],
    ) -> Option<ViewId> {
        let source = self.rect_in(root, focused);
        let mut best = finder::initial_best(direction, &source);
        let mut closest = None;
        for &candidate in focusables {
            if candidate == focused || candidate == root {
                continue;
            }
            let rect = self.rect_in(root, candidate);
            if finder::is_better_candidate(direction, &source, &rect, &best) {
                best = rect;
                closest = Some(candidate);
            }
        }
        closest
    }

    /// Bounds of `view` in the content coordinates of `root`.
    pub(crate) fn rect_in(&self, root: ViewId, view: ViewId) -> Rect {
        if view == root {
            let scroll = self.host.scroll_offset(root);
            let frame = self.host.frame(root);
            return Rect::from_origin_size(scroll.x, scroll.y, frame.width(), frame.height());
        }
        let mut rect = self.host.frame(view);
        let mut current = self.host.parent(view);
        while let Some(ancestor) = current {
            if ancestor == root {
                break;
            }
            let origin = self.host.frame(ancestor).origin();
            let scroll = self.host.scroll_offset(ancestor);
            rect = rect.offset(origin.x - scroll.x, origin.y - scroll.y);
            current = self.host.parent(ancestor);
        }
        rect
    }

    /// Move focus one step in `direction`, as a D-pad press would.
    ///
    /// With nothing focused, focus is requested on the first registered
    /// window root instead.
    pub fn move_focus(&mut self, direction: FocusDirection) -> bool {
        self.affinity.debug_assert_same_thread("move_focus");
        let Some(focused) = self.host.focused() else {
            let root = self.groups.keys().find(|&view| {
                self.host.parent(view).is_none() && self.host.is_attached_to_window(view)
            });
            return root.is_some_and(|root| self.request_focus(root, direction));
        };

        let start = self.host.parent(focused).unwrap_or(focused);
        match self.focus_search(start, focused, direction) {
            Some(next) if next != focused => {
                tracing::debug!(target: targets::FOCUS, ?direction, ?next, "moving focus");
                self.request_focus(next, direction)
            }
            _ => false,
        }
    }
}

fn find_in_relative_direction(
    focused: ViewId,
    direction: FocusDirection,
    focusables: &[ViewId],
) -> Option<ViewId> {
    let count = focusables.len();
    if count < 2 {
        return None;
    }
    let position = focusables.iter().rposition(|&v| v == focused);
    let index = match (direction, position) {
        (FocusDirection::Backward, Some(p)) if p > 0 => p - 1,
        (FocusDirection::Backward, _) => count - 1,
        (_, Some(p)) if p + 1 < count => p + 1,
        _ => 0,
    };
    focusables.get(index).copied()
}
