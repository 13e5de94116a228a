//! The framework-facing surface of a view group: props, commands and
//! recycling.

use reactv_core::ViewId;
use reactv_core::logging::targets;

use crate::engine::ViewEngine;
use crate::error::ViewResult;
use crate::focus::FocusDirection;
use crate::host::{DescendantFocusability, ViewHost};
use crate::props::{ViewCommand, ViewProp, ViewProps};

impl<H: ViewHost + 'static> ViewEngine<H> {
    /// Apply one decoded prop to the group `node`.
    pub fn apply_prop(&mut self, node: ViewId, prop: ViewProp) -> ViewResult<()> {
        self.affinity.debug_assert_same_thread("apply_prop");
        self.require_group(node)?;
        tracing::trace!(target: targets::VIEW, ?node, ?prop, "apply prop");

        match prop {
            ViewProp::RemoveClippedSubviews(enabled) => self.set_remove_clipped_subviews(node, enabled)?,
            ViewProp::HitSlop(insets) => self.require_group_mut(node)?.props.hit_slop = insets,
            ViewProp::Overflow(overflow) => self.require_group_mut(node)?.props.overflow = overflow,
            ViewProp::PointerEvents(events) => {
                self.require_group_mut(node)?.props.pointer_events = events
            }
            ViewProp::Destinations(tags) => self.set_focus_destinations(node, tags)?,
            ViewProp::AutoFocus(enabled) => self.set_auto_focus(node, enabled)?,
            ViewProp::TrapFocus(direction, enabled) => self.set_trap_focus(node, direction, enabled)?,
            ViewProp::HasTvPreferredFocus(preferred) => self.set_tv_preferred_focus(node, preferred)?,
            ViewProp::Focusable(focusable) => self.host.set_focusable(node, focusable)?,
            ViewProp::TvFocusable(focusable) => {
                self.host.set_focusable(node, focusable)?;
                let focusability = if focusable {
                    DescendantFocusability::BeforeDescendants
                } else {
                    DescendantFocusability::BlockDescendants
                };
                self.host.set_descendant_focusability(node, focusability)?;
            }
            ViewProp::NextFocus(direction, tag) => {
                self.require_group_mut(node)?.props.next_focus.set(direction, tag)
            }
            ViewProp::Style(style) => match self.style.as_mut() {
                Some(applicator) => applicator.apply(node, &style),
                None => tracing::trace!(target: targets::VIEW, ?node, "no style applicator"),
            },
        }
        Ok(())
    }

    /// The prop only has an effect when it changes, and only a change to
    /// `true` moves focus.
    fn set_tv_preferred_focus(&mut self, node: ViewId, preferred: bool) -> ViewResult<()> {
        let props = &mut self.require_group_mut(node)?.props;
        if props.has_tv_preferred_focus == preferred {
            return Ok(());
        }
        props.has_tv_preferred_focus = preferred;
        if preferred {
            self.host.set_focusable(node, true)?;
            self.host.set_focusable_in_touch_mode(node, true)?;
            self.request_focus(node, FocusDirection::Down);
        }
        Ok(())
    }

    /// Run a decoded command on the group `node`.
    pub fn run_command(&mut self, node: ViewId, command: ViewCommand) -> ViewResult<()> {
        self.affinity.debug_assert_same_thread("run_command");
        self.require_group(node)?;
        tracing::debug!(target: targets::VIEW, ?node, ?command, "run command");

        match command {
            ViewCommand::SetDestinations(tags) => self.set_focus_destinations(node, tags)?,
            ViewCommand::RequestTvFocus | ViewCommand::Focus => {
                if !self.request_focus(node, FocusDirection::Down) {
                    tracing::debug!(target: targets::FOCUS, ?node, "focus command refused");
                }
            }
            ViewCommand::Blur => {
                let holds_focus = self
                    .host
                    .focused()
                    .is_some_and(|f| f == node || self.is_descendant(node, f));
                if holds_focus {
                    self.clear_focus();
                }
            }
        }
        Ok(())
    }

    /// Reset the group `node` so its host view can be reused.
    ///
    /// Clipping is turned off first so nothing is reattached only to be
    /// removed. Focus guide configuration survives.
    #[tracing::instrument(skip(self), target = "reactv_view", level = "debug")]
    pub fn recycle(&mut self, node: ViewId) -> ViewResult<()> {
        self.affinity.debug_assert_same_thread("recycle");
        self.set_remove_clipped_subviews(node, false)?;

        let group = self.require_group_mut(node)?;
        group.recycle_count += 1;
        group.props = ViewProps::default();
        group.focus.last_focused = None;
        self.layout_observers.retain(|_, observer| *observer != node);

        self.remove_all_views(node)?;
        if let Some(applicator) = self.style.as_mut() {
            applicator.reset(node);
        }
        Ok(())
    }

    /// Number of times `node` has been recycled.
    pub fn recycle_count(&self, node: ViewId) -> Option<u32> {
        self.group(node).map(|g| g.recycle_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::props::{Overflow, PointerEvents};
    use crate::style::{StyleApplicator, StyleProp};
    use parking_lot::Mutex;
    use reactv_core::{EngineConfig, Rect, ViewTag};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl StyleApplicator for Recorder {
        fn apply(&mut self, _view: ViewId, prop: &StyleProp) {
            self.0.lock().push(format!("{prop:?}"));
        }

        fn reset(&mut self, _view: ViewId) {
            self.0.lock().push("reset".to_string());
        }
    }

    fn group_with_child() -> (ViewEngine<MemoryHost>, ViewId, ViewId) {
        let mut host = MemoryHost::new();
        let root = host.view(1).window_root().frame(Rect::new(0, 0, 100, 100)).create();
        let group = host.view(2).frame(Rect::new(0, 0, 100, 100)).create();
        let child = host.view(3).focusable(true).frame(Rect::new(0, 0, 50, 50)).create();
        host.append_child(root, group).unwrap();
        host.append_child(group, child).unwrap();
        let mut engine = ViewEngine::new(host, EngineConfig::default());
        engine.register_group(group).unwrap();
        (engine, group, child)
    }

    #[test]
    fn test_tv_focusable_false_blocks_descendants() {
        let (mut engine, group, child) = group_with_child();
        engine.apply_prop(group, ViewProp::TvFocusable(false)).unwrap();
        assert_eq!(
            engine.host().descendant_focusability(group),
            DescendantFocusability::BlockDescendants
        );
        assert!(!engine.request_focus(child, FocusDirection::Down));
        engine.apply_prop(group, ViewProp::TvFocusable(true)).unwrap();
        assert!(engine.host().is_focusable(group));
        assert!(engine.request_focus(child, FocusDirection::Down));
    }

    #[test]
    fn test_preferred_focus_requests_once() {
        let (mut engine, group, child) = group_with_child();
        engine.apply_prop(group, ViewProp::HasTvPreferredFocus(true)).unwrap();
        assert_eq!(engine.host().focused(), Some(group));

        engine.request_focus(child, FocusDirection::Down);
        engine.apply_prop(group, ViewProp::HasTvPreferredFocus(true)).unwrap();
        assert_eq!(engine.host().focused(), Some(child));
    }

    #[test]
    fn test_commands() {
        let (mut engine, group, child) = group_with_child();
        engine
            .run_command(group, ViewCommand::SetDestinations(vec![ViewTag(3)]))
            .unwrap();
        engine.run_command(group, ViewCommand::RequestTvFocus).unwrap();
        assert_eq!(engine.host().focused(), Some(child));
        engine.run_command(group, ViewCommand::Blur).unwrap();
        assert_eq!(engine.host().focused(), None);
    }

    #[test]
    fn test_style_props_reach_applicator() {
        let (mut engine, group, _child) = group_with_child();
        let recorder = Recorder::default();
        engine.set_style_applicator(Box::new(recorder.clone()));
        engine
            .apply_prop(group, ViewProp::Style(StyleProp::BackgroundColor(Some(0xff00_00ff))))
            .unwrap();
        engine.recycle(group).unwrap();
        let log = recorder.0.lock();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1], "reset");
    }

    #[test]
    fn test_recycle_keeps_focus_config() {
        let (mut engine, group, child) = group_with_child();
        engine.apply_prop(group, ViewProp::AutoFocus(true)).unwrap();
        engine.apply_prop(group, ViewProp::Overflow(Overflow::Hidden)).unwrap();
        engine.apply_prop(group, ViewProp::PointerEvents(PointerEvents::BoxNone)).unwrap();
        engine.apply_prop(group, ViewProp::RemoveClippedSubviews(true)).unwrap();
        engine.request_focus(child, FocusDirection::Down);

        engine.recycle(group).unwrap();
        assert_eq!(engine.recycle_count(group), Some(1));
        assert_eq!(engine.child_count(group), 0);
        assert!(engine.focus_guide_config(group).is_some_and(|c| c.auto_focus));
        assert_eq!(engine.last_focused(group), None);
        assert!(engine.clipping_snapshot(group).is_none());
    }
}
