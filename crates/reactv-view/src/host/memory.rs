//! In-memory [`ViewHost`] implementation.

use std::collections::HashSet;

use slotmap::SlotMap;

use reactv_core::logging::targets;
use reactv_core::{Point, Rect, ViewId, ViewTag};

use super::{AccessibilityAction, DescendantFocusability, ViewHost};
use crate::error::{HostError, HostResult};

#[derive(Debug, Clone)]
struct Node {
    tag: ViewTag,
    parent: Option<ViewId>,
    children: Vec<ViewId>,
    frame: Rect,
    scroll: Point,
    visible: bool,
    focusable: bool,
    focusable_in_touch_mode: bool,
    descendant_focusability: DescendantFocusability,
    animating: bool,
    window_root: bool,
    clipping_prohibited: bool,
}

impl Node {
    fn new(tag: ViewTag) -> Self {
        Self {
            tag,
            parent: None,
            children: Vec::new(),
            frame: Rect::EMPTY,
            scroll: Point::ZERO,
            visible: true,
            focusable: false,
            focusable_in_touch_mode: false,
            descendant_focusability: DescendantFocusability::default(),
            animating: false,
            window_root: false,
            clipping_prohibited: false,
        }
    }
}

/// A view tree kept entirely in memory.
///
/// Views are created with [`MemoryHost::view`] and wired together with
/// [`MemoryHost::append_child`]. Only trees whose root was created with
/// [`ViewBuilder::window_root`] count as attached to a window.
#[derive(Debug, Default)]
pub struct MemoryHost {
    nodes: SlotMap<ViewId, Node>,
    focused: Option<ViewId>,
    failing_actions: HashSet<ViewId>,
    declined_actions: HashSet<ViewId>,
    performed_actions: Vec<(ViewId, AccessibilityAction)>,
    attach_count: usize,
    detach_count: usize,
}

/// Builder returned by [`MemoryHost::view`].
pub struct ViewBuilder<'a> {
    host: &'a mut MemoryHost,
    node: Node,
}

impl ViewBuilder<'_> {
    pub fn frame(mut self, frame: Rect) -> Self {
        self.node.frame = frame;
        self
    }

    pub fn focusable(mut self, focusable: bool) -> Self {
        self.node.focusable = focusable;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.node.visible = visible;
        self
    }

    pub fn descendant_focusability(mut self, focusability: DescendantFocusability) -> Self {
        self.node.descendant_focusability = focusability;
        self
    }

    /// Mark the view as the root of a window.
    pub fn window_root(mut self) -> Self {
        self.node.window_root = true;
        self
    }

    pub fn clipping_prohibited(mut self) -> Self {
        self.node.clipping_prohibited = true;
        self
    }

    /// Insert the view into the host.
    pub fn create(self) -> ViewId {
        self.host.nodes.insert(self.node)
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a new, parentless view.
    pub fn view(&mut self, tag: i32) -> ViewBuilder<'_> {
        ViewBuilder {
            host: self,
            node: Node::new(ViewTag(tag)),
        }
    }

    /// Attach `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: ViewId, child: ViewId) -> HostResult<()> {
        let index = self.child_count(parent);
        self.attach_child(parent, child, index)
    }

    /// Destroy a view and its attached subtree.
    pub fn destroy(&mut self, view: ViewId) {
        if let Some(parent) = self.parent(view)
            && let Some(index) = self.index_of_child(parent, view)
        {
            let _ = self.detach_child_at(parent, index);
        }
        let mut stack = vec![view];
        while let Some(v) = stack.pop() {
            if let Some(node) = self.nodes.remove(v) {
                stack.extend(node.children);
            }
            if self.focused == Some(v) {
                self.focused = None;
            }
        }
    }

    pub fn set_frame(&mut self, view: ViewId, frame: Rect) {
        if let Some(node) = self.nodes.get_mut(view) {
            node.frame = frame;
        }
    }

    pub fn set_scroll_offset(&mut self, view: ViewId, offset: Point) {
        if let Some(node) = self.nodes.get_mut(view) {
            node.scroll = offset;
        }
    }

    pub fn set_animating(&mut self, view: ViewId, animating: bool) {
        if let Some(node) = self.nodes.get_mut(view) {
            node.animating = animating;
        }
    }

    pub fn set_visible(&mut self, view: ViewId, visible: bool) {
        if let Some(node) = self.nodes.get_mut(view) {
            node.visible = visible;
        }
    }

    /// Make accessibility actions on `view` fail.
    pub fn fail_accessibility_actions(&mut self, view: ViewId) {
        self.failing_actions.insert(view);
    }

    /// Make the host report accessibility actions on `view` as not performed.
    pub fn decline_accessibility_actions(&mut self, view: ViewId) {
        self.declined_actions.insert(view);
    }

    /// Accessibility actions that ran successfully, in order.
    pub fn performed_actions(&self) -> &[(ViewId, AccessibilityAction)] {
        &self.performed_actions
    }

    /// Number of attach and detach calls served so far.
    pub fn mutation_count(&self) -> usize {
        self.attach_count + self.detach_count
    }

    /// First view with `tag` in the attached subtree of `root`, depth first.
    pub fn find_by_tag(&self, root: ViewId, tag: ViewTag) -> Option<ViewId> {
        let mut stack = vec![root];
        while let Some(v) = stack.pop() {
            let node = self.nodes.get(v)?;
            if node.tag == tag {
                return Some(v);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    fn is_in_subtree(&self, root: ViewId, view: ViewId) -> bool {
        let mut current = Some(view);
        while let Some(v) = current {
            if v == root {
                return true;
            }
            current = self.parent(v);
        }
        false
    }

    fn node_mut(&mut self, view: ViewId) -> HostResult<&mut Node> {
        self.nodes.get_mut(view).ok_or(HostError::UnknownView(view))
    }

    fn clear_focus_within(&mut self, root: ViewId) {
        if let Some(focused) = self.focused
            && self.is_in_subtree(root, focused)
        {
            tracing::trace!(target: targets::HOST, ?focused, "focused view left the tree");
            self.focused = None;
        }
    }
}

impl ViewHost for MemoryHost {
    fn contains(&self, view: ViewId) -> bool {
        self.nodes.contains_key(view)
    }

    fn parent(&self, view: ViewId) -> Option<ViewId> {
        self.nodes.get(view).and_then(|n| n.parent)
    }

    fn children(&self, view: ViewId) -> Vec<ViewId> {
        self.nodes
            .get(view)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn child_count(&self, view: ViewId) -> usize {
        self.nodes.get(view).map_or(0, |n| n.children.len())
    }

    fn child_at(&self, view: ViewId, index: usize) -> Option<ViewId> {
        self.nodes.get(view)?.children.get(index).copied()
    }

    fn attach_child(&mut self, parent: ViewId, child: ViewId, index: usize) -> HostResult<()> {
        if !self.nodes.contains_key(child) {
            return Err(HostError::UnknownView(child));
        }
        if self.nodes[child].parent.is_some() {
            return Err(HostError::AlreadyAttached(child));
        }
        let node = self.node_mut(parent)?;
        if index > node.children.len() {
            return Err(HostError::IndexOutOfRange {
                index,
                len: node.children.len(),
            });
        }
        node.children.insert(index, child);
        self.nodes[child].parent = Some(parent);
        self.attach_count += 1;
        Ok(())
    }

    fn detach_child_at(&mut self, parent: ViewId, index: usize) -> HostResult<ViewId> {
        let node = self.node_mut(parent)?;
        if index >= node.children.len() {
            return Err(HostError::IndexOutOfRange {
                index,
                len: node.children.len(),
            });
        }
        let child = node.children.remove(index);
        self.clear_focus_within(child);
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = None;
        }
        self.detach_count += 1;
        Ok(child)
    }

    fn detach_all_children(&mut self, parent: ViewId) -> HostResult<Vec<ViewId>> {
        let children = std::mem::take(&mut self.node_mut(parent)?.children);
        for &child in &children {
            self.clear_focus_within(child);
            if let Some(c) = self.nodes.get_mut(child) {
                c.parent = None;
            }
        }
        self.detach_count += children.len();
        Ok(children)
    }

    fn frame(&self, view: ViewId) -> Rect {
        self.nodes.get(view).map_or(Rect::EMPTY, |n| n.frame)
    }

    fn scroll_offset(&self, view: ViewId) -> Point {
        self.nodes.get(view).map_or(Point::ZERO, |n| n.scroll)
    }

    fn is_animating(&self, view: ViewId) -> bool {
        self.nodes.get(view).is_some_and(|n| n.animating)
    }

    fn tag(&self, view: ViewId) -> ViewTag {
        self.nodes.get(view).map_or(ViewTag::NO_ID, |n| n.tag)
    }

    fn is_visible(&self, view: ViewId) -> bool {
        self.nodes.get(view).is_some_and(|n| n.visible)
    }

    fn is_attached_to_window(&self, view: ViewId) -> bool {
        let mut current = view;
        loop {
            let Some(node) = self.nodes.get(current) else {
                return false;
            };
            if node.window_root {
                return true;
            }
            match node.parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    fn is_focusable(&self, view: ViewId) -> bool {
        self.nodes.get(view).is_some_and(|n| n.focusable)
    }

    fn set_focusable(&mut self, view: ViewId, focusable: bool) -> HostResult<()> {
        self.node_mut(view)?.focusable = focusable;
        if !focusable && self.focused == Some(view) {
            self.focused = None;
        }
        Ok(())
    }

    fn is_focusable_in_touch_mode(&self, view: ViewId) -> bool {
        self.nodes.get(view).is_some_and(|n| n.focusable_in_touch_mode)
    }

    fn set_focusable_in_touch_mode(&mut self, view: ViewId, focusable: bool) -> HostResult<()> {
        self.node_mut(view)?.focusable_in_touch_mode = focusable;
        Ok(())
    }

    fn descendant_focusability(&self, view: ViewId) -> DescendantFocusability {
        self.nodes
            .get(view)
            .map(|n| n.descendant_focusability)
            .unwrap_or_default()
    }

    fn set_descendant_focusability(
        &mut self,
        view: ViewId,
        focusability: DescendantFocusability,
    ) -> HostResult<()> {
        self.node_mut(view)?.descendant_focusability = focusability;
        Ok(())
    }

    fn focused(&self) -> Option<ViewId> {
        self.focused
    }

    fn set_focused(&mut self, view: Option<ViewId>) {
        self.focused = view.filter(|v| self.nodes.contains_key(*v));
    }

    fn perform_accessibility_action(
        &mut self,
        view: ViewId,
        action: AccessibilityAction,
    ) -> HostResult<bool> {
        if !self.nodes.contains_key(view) {
            return Err(HostError::UnknownView(view));
        }
        if self.failing_actions.contains(&view) {
            return Err(HostError::ActionFailed {
                view,
                message: format!("{action:?} rejected"),
            });
        }
        if self.declined_actions.contains(&view) {
            return Ok(false);
        }
        self.performed_actions.push((view, action));
        Ok(true)
    }

    fn is_clipping_prohibited(&self, view: ViewId) -> bool {
        self.nodes.get(view).is_some_and(|n| n.clipping_prohibited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> (MemoryHost, ViewId, ViewId, ViewId) {
        let mut host = MemoryHost::new();
        let root = host.view(1).window_root().create();
        let a = host.view(2).focusable(true).create();
        let b = host.view(3).create();
        host.append_child(root, a).unwrap();
        host.append_child(root, b).unwrap();
        (host, root, a, b)
    }

    #[test]
    fn test_attach_and_detach() {
        let (mut host, root, a, b) = tree();
        assert_eq!(host.children(root), vec![a, b]);
        assert_eq!(host.parent(a), Some(root));
        assert_eq!(host.detach_child_at(root, 0).unwrap(), a);
        assert_eq!(host.parent(a), None);
        assert_eq!(host.children(root), vec![b]);
        host.attach_child(root, a, 1).unwrap();
        assert_eq!(host.children(root), vec![b, a]);
        assert_eq!(host.mutation_count(), 4);
    }

    #[test]
    fn test_attach_errors() {
        let (mut host, root, a, _) = tree();
        assert_eq!(host.attach_child(root, a, 0), Err(HostError::AlreadyAttached(a)));
        let c = host.view(4).create();
        assert_eq!(
            host.attach_child(root, c, 5),
            Err(HostError::IndexOutOfRange { index: 5, len: 2 })
        );
        assert!(matches!(
            host.detach_child_at(root, 2),
            Err(HostError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_window_attachment_and_shown() {
        let (mut host, root, a, _) = tree();
        assert!(host.is_attached_to_window(a));
        assert!(host.is_shown(a));
        host.set_visible(root, false);
        assert!(!host.is_shown(a));
        let loose = host.view(9).create();
        assert!(!host.is_attached_to_window(loose));
    }

    #[test]
    fn test_detaching_focused_view_clears_focus() {
        let (mut host, root, a, _) = tree();
        host.set_focused(Some(a));
        assert_eq!(host.focused(), Some(a));
        host.detach_child_at(root, 0).unwrap();
        assert_eq!(host.focused(), None);
    }

    #[test]
    fn test_find_by_tag_and_destroy() {
        let (mut host, root, a, b) = tree();
        assert_eq!(host.find_by_tag(root, ViewTag(3)), Some(b));
        host.destroy(a);
        assert!(!host.contains(a));
        assert_eq!(host.children(root), vec![b]);
    }

    #[test]
    fn test_accessibility_failures() {
        let (mut host, _, a, b) = tree();
        host.fail_accessibility_actions(b);
        assert_eq!(
            host.perform_accessibility_action(a, AccessibilityAction::Focus),
            Ok(true)
        );
        assert!(host.perform_accessibility_action(b, AccessibilityAction::Focus).is_err());
        assert_eq!(host.performed_actions().len(), 1);
    }
}
