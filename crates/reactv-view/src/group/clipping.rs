//! Subview clipping.
//!
//! A group with clipping enabled keeps every logical child in a shadow list
//! ([`ClippedChildren`]) and attaches to the host only the children whose
//! frame intersects its clipping rectangle. Children that are animating are
//! never detached.
//!
//! A shadow entry is *clipped* iff the child's host parent is not the group.
//! The real index of a logical entry is therefore its logical index minus the
//! number of clipped entries before it, and every attach or detach keeps
//! `attached + clipped == logical`.
//!
//! # Clipping rectangle
//!
//! The rectangle is expressed in the group's own content coordinates:
//!
//! - no parent: empty, so every child is clipped
//! - parent with clipping enabled: the parent's rectangle intersected with
//!   this group's frame, moved into local coordinates and offset by the
//!   scroll position
//! - otherwise: the drawing rectangle (scroll position plus size)

use std::fmt;

use reactv_core::logging::{span_names, targets};
use reactv_core::{Rect, ViewId};

use super::{ClippedChildren, ClippingSnapshot, ClippingState};
use crate::engine::ViewEngine;
use crate::error::{HostError, ViewError, ViewResult};
use crate::host::ViewHost;

impl<H: ViewHost + 'static> ViewEngine<H> {
    // =========================================================================
    // Enabling and disabling
    // =========================================================================

    /// Turn subview clipping on or off for `node`.
    pub fn set_remove_clipped_subviews(&mut self, node: ViewId, enabled: bool) -> ViewResult<()> {
        if enabled {
            self.enable_clipping(node)
        } else {
            self.disable_clipping(node)
        }
    }

    /// Start clipping the children of `node`.
    ///
    /// The current host children become the shadow list, each gets a layout
    /// observer, and an initial clipping pass runs. No-op if clipping is
    /// already enabled.
    pub fn enable_clipping(&mut self, node: ViewId) -> ViewResult<()> {
        self.affinity.debug_assert_same_thread("enable_clipping");
        if self.require_group(node)?.clipping_enabled() {
            return Ok(());
        }
        let rect = self.calculate_clipping_rect(node);
        let attached = self.host.children(node);
        for &child in &attached {
            self.layout_observers.insert(child, node);
        }
        let children = ClippedChildren::new(
            attached,
            self.config.initial_clip_capacity,
            self.config.clip_capacity_increment,
        );
        tracing::debug!(
            target: targets::CLIP,
            ?node,
            children = children.len(),
            capacity = children.capacity(),
            "enabled subview clipping"
        );
        self.require_group_mut(node)?.clipping = Some(ClippingState {
            rect,
            children,
            inserts: 0,
            removes: 0,
        });
        self.refresh_clipping(node);
        Ok(())
    }

    /// Stop clipping the children of `node`.
    ///
    /// Every clipped child is reattached at its logical position, observers
    /// are removed and the shadow list is dropped. No-op if clipping is
    /// already disabled.
    pub fn disable_clipping(&mut self, node: ViewId) -> ViewResult<()> {
        self.affinity.debug_assert_same_thread("disable_clipping");
        let Some(state) = self.require_group_mut(node)?.clipping.take() else {
            return Ok(());
        };
        let children = state.children.as_slice();
        for &child in children {
            self.layout_observers.remove(child);
        }
        for (real, &child) in children.iter().enumerate() {
            if self.is_clipped(node, child) {
                self.host.attach_child(node, child, real)?;
            }
        }
        for &child in children {
            if self.clipping_enabled(child) {
                self.refresh_clipping(child);
            }
        }
        tracing::debug!(target: targets::CLIP, ?node, children = children.len(), "disabled subview clipping");
        Ok(())
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// Insert `child` at logical `index` of a clipping group.
    ///
    /// The child is recorded as clipped and then attached only if it
    /// intersects the clipping rectangle.
    pub fn insert_child(&mut self, node: ViewId, child: ViewId, index: usize) -> ViewResult<()> {
        self.affinity.debug_assert_same_thread("insert_child");
        self.clipping_precondition(node, "insert_child")?;
        if !self.host.contains(child) {
            return Err(HostError::UnknownView(child).into());
        }
        if self.host.parent(child).is_some() {
            return Err(HostError::AlreadyAttached(child).into());
        }
        let inserted = self.clipping_state_mut(node)?.children.insert(index, child);
        if let Err(err) = inserted {
            self.invalid_clipping_state(node, index, self.clipped_before(node, index), &err);
        }
        self.clipping_state_mut(node)?.inserts += 1;
        let clipped_so_far = self.clipped_before(node, index);
        self.update_subview_clip_status(node, index, clipped_so_far);
        self.layout_observers.insert(child, node);

        if self.host.is_clipping_prohibited(child) {
            self.tasks.post("clipping-prohibited check", move |engine: &mut Self| {
                if engine.host.contains(child) && !engine.host.is_shown(child) {
                    tracing::warn!(
                        target: targets::CLIP,
                        child = %engine.host.tag(child),
                        parent = %engine.host.tag(node),
                        "child added to a parent in which it is clipped and not visible; \
                         this child must never be clipped"
                    );
                }
            });
        }
        Ok(())
    }

    /// Remove `child` from a clipping group.
    ///
    /// Focus is recovered first if the child or one of its descendants holds
    /// it.
    pub fn remove_child(&mut self, node: ViewId, child: ViewId) -> ViewResult<()> {
        self.affinity.debug_assert_same_thread("remove_child");
        self.clipping_precondition(node, "remove_child")?;
        let index = self
            .clipping_state(node)?
            .children
            .position(child)
            .ok_or(ViewError::ChildNotFound {
                parent: node,
                child,
            })?;
        self.recover_focus(child);
        self.layout_observers.remove(child);
        if !self.is_clipped(node, child) {
            let clipped_so_far = self.clipped_before(node, index);
            let real = index - clipped_so_far;
            if self.host.child_at(node, real) != Some(child) {
                self.invalid_clipping_state(node, index, clipped_so_far, &"attached child not at its real index");
            }
            if let Err(err) = self.host.detach_child_at(node, real) {
                self.invalid_clipping_state(node, index, clipped_so_far, &err);
            }
        }
        let removed = self.clipping_state_mut(node)?.children.remove(index);
        if let Err(err) = removed {
            self.invalid_clipping_state(node, index, self.clipped_before(node, index), &err);
        }
        self.clipping_state_mut(node)?.removes += 1;
        tracing::trace!(target: targets::CLIP, ?node, ?child, index, "removed clipped-group child");
        Ok(())
    }

    /// Remove every child of a clipping group.
    pub fn remove_all_children(&mut self, node: ViewId) -> ViewResult<()> {
        self.affinity.debug_assert_same_thread("remove_all_children");
        self.clipping_precondition(node, "remove_all_children")?;
        let children = self.clipping_state(node)?.children.as_slice().to_vec();
        for &child in &children {
            self.layout_observers.remove(child);
            if !self.is_clipped(node, child) {
                self.recover_focus(child);
            }
        }
        self.host.detach_all_children(node)?;
        let state = self.clipping_state_mut(node)?;
        state.children.clear();
        state.removes += children.len();
        Ok(())
    }

    // =========================================================================
    // Clipping passes
    // =========================================================================

    /// Recompute the clipping rectangle of `node` and re-evaluate every
    /// child.
    ///
    /// Children that stay visible and are clipping groups themselves are
    /// updated recursively. Does nothing when clipping is disabled.
    pub fn update_clipping_rect(&mut self, node: ViewId) -> ViewResult<()> {
        self.affinity.debug_assert_same_thread("update_clipping_rect");
        if self.require_group(node)?.clipping_enabled() {
            self.refresh_clipping(node);
        }
        Ok(())
    }

    /// Re-evaluate a single child after its layout changed.
    ///
    /// Only runs the transition when the child's intersection with the
    /// clipping rectangle no longer matches its attachment.
    pub fn on_child_layout_changed(&mut self, child: ViewId) -> ViewResult<()> {
        self.affinity.debug_assert_same_thread("on_child_layout_changed");
        let Some(&node) = self.layout_observers.get(child) else {
            return Ok(());
        };
        if !self.clipping_enabled(node) || self.host.parent(node).is_none() {
            return Ok(());
        }
        let state = self.clipping_state(node)?;
        let intersects = state.rect.intersects(&self.host.frame(child));
        if intersects == !self.is_clipped(node, child) {
            return Ok(());
        }
        let mut clipped_so_far = 0;
        let mut found = None;
        for (i, &c) in state.children.as_slice().iter().enumerate() {
            if c == child {
                found = Some(i);
                break;
            }
            if self.is_clipped(node, c) {
                clipped_so_far += 1;
            }
        }
        if let Some(index) = found {
            self.update_subview_clip_status(node, index, clipped_so_far);
        }
        Ok(())
    }

    /// Compute the clipping rectangle `node` would use right now.
    pub fn calculate_clipping_rect(&self, node: ViewId) -> Rect {
        let Some(parent) = self.host.parent(node) else {
            return Rect::EMPTY;
        };
        let frame = self.host.frame(node);
        let scroll = self.host.scroll_offset(node);
        if let Some(parent_state) = self.group(parent).and_then(|g| g.clipping.as_ref()) {
            return match parent_state.rect.intersection(&frame) {
                Some(visible) => visible
                    .offset(-frame.left, -frame.top)
                    .offset(scroll.x, scroll.y),
                None => Rect::EMPTY,
            };
        }
        Rect::from_origin_size(scroll.x, scroll.y, frame.width(), frame.height())
    }

    fn refresh_clipping(&mut self, node: ViewId) {
        let rect = self.calculate_clipping_rect(node);
        let Some(state) = self.groups.get_mut(node).and_then(|g| g.clipping.as_mut()) else {
            return;
        };
        state.rect = rect;
        let count = state.children.len();
        let _span = tracing::trace_span!(span_names::CLIP_PASS, ?node, count).entered();

        let mut clipped_so_far = 0;
        for index in 0..count {
            self.update_subview_clip_status(node, index, clipped_so_far);
            let child = self
                .groups
                .get(node)
                .and_then(|g| g.clipping.as_ref())
                .and_then(|s| s.children.get(index));
            if child.is_some_and(|c| self.is_clipped(node, c)) {
                clipped_so_far += 1;
            }
        }
    }

    /// Run the attach/detach transition for the shadow entry at `index`.
    fn update_subview_clip_status(&mut self, node: ViewId, index: usize, clipped_so_far: usize) {
        let Some(state) = self.group(node).and_then(|g| g.clipping.as_ref()) else {
            return;
        };
        let Some(child) = state.children.get(index) else {
            self.invalid_clipping_state(node, index, clipped_so_far, &"shadow index out of range");
        };
        let intersects = state.rect.intersects(&self.host.frame(child));
        let clipped = self.is_clipped(node, child);
        let animating = self.host.is_animating(child);

        let recurse = if !intersects && !clipped && !animating {
            self.recover_focus(child);
            let detached = self
                .host
                .index_of_child(node, child)
                .ok_or(HostError::NotAChild { parent: node, child })
                .and_then(|real| self.host.detach_child_at(node, real));
            if let Err(err) = detached {
                self.invalid_clipping_state(node, index, clipped_so_far, &err);
            }
            tracing::trace!(target: targets::CLIP, ?node, ?child, index, "clipped child");
            true
        } else if intersects && clipped {
            if let Err(err) = self.host.attach_child(node, child, index - clipped_so_far) {
                self.invalid_clipping_state(node, index, clipped_so_far, &err);
            }
            tracing::trace!(target: targets::CLIP, ?node, ?child, index, "unclipped child");
            true
        } else {
            intersects
        };

        if recurse && self.clipping_enabled(child) {
            self.refresh_clipping(child);
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Logical child count of a clipping group, or `None` if clipping is off.
    pub fn all_children_count(&self, node: ViewId) -> Option<usize> {
        self.group(node)?.clipping.as_ref().map(|s| s.children.len())
    }

    /// Current clipping rectangle, or `None` if clipping is off.
    pub fn clipping_rect(&self, node: ViewId) -> Option<Rect> {
        self.group(node)?.clipping.as_ref().map(|s| s.rect)
    }

    /// Counters and sizes of a clipping group.
    pub fn clipping_snapshot(&self, node: ViewId) -> Option<ClippingSnapshot> {
        let group = self.group(node)?;
        let state = group.clipping.as_ref()?;
        let logical_count = state.children.len();
        let clipped_count = state
            .children
            .as_slice()
            .iter()
            .filter(|&&c| self.is_clipped(node, c))
            .count();
        Some(ClippingSnapshot {
            clipping_rect: state.rect,
            logical_count,
            attached_count: self.host.child_count(node),
            clipped_count,
            capacity: state.children.capacity(),
            reallocations: state.children.reallocations(),
            inserts: state.inserts,
            removes: state.removes,
            recycle_count: group.recycle_count,
        })
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    pub(crate) fn is_clipped(&self, node: ViewId, child: ViewId) -> bool {
        self.host.parent(child) != Some(node)
    }

    fn clipped_before(&self, node: ViewId, index: usize) -> usize {
        self.group(node)
            .and_then(|g| g.clipping.as_ref())
            .map_or(0, |s| {
                s.children.as_slice()[..index.min(s.children.len())]
                    .iter()
                    .filter(|&&c| self.is_clipped(node, c))
                    .count()
            })
    }

    fn clipping_state(&self, node: ViewId) -> ViewResult<&ClippingState> {
        self.require_group(node)?
            .clipping
            .as_ref()
            .ok_or(ViewError::ClippingDisabled(node))
    }

    fn clipping_state_mut(&mut self, node: ViewId) -> ViewResult<&mut ClippingState> {
        self.require_group_mut(node)?
            .clipping
            .as_mut()
            .ok_or(ViewError::ClippingDisabled(node))
    }

    fn clipping_precondition(&self, node: ViewId, operation: &'static str) -> ViewResult<()> {
        if self.require_group(node)?.clipping_enabled() {
            return Ok(());
        }
        if cfg!(debug_assertions) {
            panic_clipping_disabled(node, operation);
        }
        Err(ViewError::ClippingDisabled(node))
    }

    #[cold]
    #[inline(never)]
    fn invalid_clipping_state(
        &self,
        node: ViewId,
        index: usize,
        clipped_so_far: usize,
        cause: &dyn fmt::Display,
    ) -> ! {
        let group = self.group(node);
        let state = group.and_then(|g| g.clipping.as_ref());
        panic!(
            "invalid clipping state on {node:?}: index={index} clipped_so_far={clipped_so_far} \
             count={} all_children_count={} recycle_count={} inserts={} removes={} \
             reallocations={}: {cause}",
            self.host.child_count(node),
            state.map_or(0, |s| s.children.len()),
            group.map_or(0, |g| g.recycle_count),
            state.map_or(0, |s| s.inserts),
            state.map_or(0, |s| s.removes),
            state.map_or(0, |s| s.children.reallocations()),
        )
    }
}

#[cold]
#[inline(never)]
fn panic_clipping_disabled(node: ViewId, operation: &str) -> ! {
    panic!("`{operation}` called on {node:?} while subview clipping is disabled")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use reactv_core::{EngineConfig, Point};

    /// A 100x100 window with a clipping list whose rows are 40 high.
    fn list(rows: i32) -> (ViewEngine<MemoryHost>, ViewId, Vec<ViewId>) {
        let mut host = MemoryHost::new();
        let window = host.view(1).window_root().frame(Rect::new(0, 0, 100, 100)).create();
        let list = host.view(2).frame(Rect::new(0, 0, 100, 100)).create();
        host.append_child(window, list).unwrap();
        let rows = (0..rows)
            .map(|i| {
                let row = host
                    .view(100 + i)
                    .frame(Rect::from_origin_size(0, i * 40, 100, 40))
                    .create();
                host.append_child(list, row).unwrap();
                row
            })
            .collect();
        let mut engine = ViewEngine::new(host, EngineConfig::default());
        engine.register_group(list).unwrap();
        (engine, list, rows)
    }

    #[test]
    fn test_enable_detaches_offscreen_children() {
        let (mut engine, list, rows) = list(5);
        engine.enable_clipping(list).unwrap();
        assert_eq!(engine.clipping_rect(list), Some(Rect::new(0, 0, 100, 100)));
        assert_eq!(engine.host().children(list), rows[..3].to_vec());
        let snapshot = engine.clipping_snapshot(list).unwrap();
        assert_eq!(snapshot.logical_count, 5);
        assert_eq!(snapshot.attached_count, 3);
        assert_eq!(snapshot.clipped_count, 2);
        assert_eq!(snapshot.capacity, 12);
    }

    #[test]
    fn test_scrolling_reattaches_in_order() {
        let (mut engine, list, rows) = list(5);
        engine.enable_clipping(list).unwrap();
        engine.host_mut().set_scroll_offset(list, Point::new(0, 90));
        engine.on_layout(list).unwrap();
        assert_eq!(engine.host().children(list), rows[2..].to_vec());
        engine.host_mut().set_scroll_offset(list, Point::ZERO);
        engine.on_layout(list).unwrap();
        assert_eq!(engine.host().children(list), rows[..3].to_vec());
    }

    #[test]
    fn test_animating_child_is_not_detached() {
        let (mut engine, list, rows) = list(3);
        engine.host_mut().set_animating(rows[1], true);
        engine.host_mut().set_frame(rows[1], Rect::new(0, 500, 100, 540));
        engine.enable_clipping(list).unwrap();
        assert_eq!(engine.host().parent(rows[1]), Some(list));
    }

    #[test]
    fn test_insert_offscreen_child_stays_clipped() {
        let (mut engine, list, rows) = list(2);
        engine.enable_clipping(list).unwrap();
        let far = engine
            .host_mut()
            .view(200)
            .frame(Rect::new(0, 400, 100, 440))
            .create();
        let near = engine
            .host_mut()
            .view(201)
            .frame(Rect::new(0, 10, 100, 20))
            .create();
        engine.insert_child(list, far, 1).unwrap();
        engine.insert_child(list, near, 3).unwrap();
        assert_eq!(engine.all_children_count(list), Some(4));
        assert_eq!(engine.host().children(list), vec![rows[0], rows[1], near]);
        assert_eq!(engine.child_at(list, 1), Some(far));
        engine.remove_child(list, rows[1]).unwrap();
        assert_eq!(engine.host().children(list), vec![rows[0], near]);
    }

    #[test]
    fn test_detached_group_has_empty_clipping_rect() {
        let mut host = MemoryHost::new();
        let orphan = host.view(1).frame(Rect::new(0, 0, 50, 50)).create();
        let engine = ViewEngine::new(host, EngineConfig::default());
        assert_eq!(engine.calculate_clipping_rect(orphan), Rect::EMPTY);
    }

    #[test]
    fn test_nested_clipping_rect_is_local() {
        let (mut engine, list, rows) = list(3);
        engine.register_group(rows[1]).unwrap();
        engine.enable_clipping(list).unwrap();
        // rows[1] spans y 40..80 of the list's 0..100 rect.
        engine.host_mut().set_scroll_offset(list, Point::new(0, 60));
        engine.update_clipping_rect(list).unwrap();
        assert_eq!(
            engine.calculate_clipping_rect(rows[1]),
            Rect::new(0, 20, 100, 40)
        );
    }

    #[test]
    #[should_panic(expected = "inserts=0 removes=0 reallocations=0: shadow index 5 out of range")]
    fn test_out_of_range_insert_reports_counters() {
        let (mut engine, list, _) = list(0);
        engine.enable_clipping(list).unwrap();
        let child = engine.host_mut().view(9).create();
        let _ = engine.insert_child(list, child, 5);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "while subview clipping is disabled")]
    fn test_insert_without_clipping_panics_in_debug() {
        let (mut engine, list, _) = list(1);
        let child = engine.host_mut().view(9).create();
        let _ = engine.insert_child(list, child, 0);
    }
}
