//! Handing focus back to a guide when the focused view leaves the tree.

use reactv_core::logging::targets;
use reactv_core::ViewId;

use super::FocusDirection;
use crate::engine::ViewEngine;
use crate::host::ViewHost;

impl<H: ViewHost + 'static> ViewEngine<H> {
    /// Called before `view` is detached or removed.
    ///
    /// If focus is on `view` or inside it, the nearest focus guide above
    /// `view` is made focusable and takes focus itself. A deferred task then
    /// moves focus on to the guide's first focusable descendant and restores
    /// the guide's focusability. Without a guide that can hold it, focus is
    /// cleared through the engine so blur and the key target stay in step.
    pub(crate) fn recover_focus(&mut self, view: ViewId) {
        let Some(focused) = self.host.focused() else {
            return;
        };
        if focused != view && !self.is_descendant(view, focused) {
            return;
        }
        let Some(guide) = self.find_parent_focus_guide(view) else {
            self.clear_focus();
            return;
        };

        let original = self.host.is_focusable(guide);
        if let Some(group) = self.group_mut(guide)
            && group.focus.recovery.is_none()
        {
            group.focus.recovery = Some(original);
        }
        tracing::debug!(target: targets::FOCUS, ?view, ?guide, "recovering focus");

        if let Err(err) = self.host.set_focusable(guide, true) {
            tracing::warn!(target: targets::FOCUS, ?guide, %err, "cannot make guide focusable");
        }
        if !self.try_take_focus(guide) {
            tracing::debug!(target: targets::FOCUS, ?guide, "guide could not hold focus");
            self.clear_focus();
        }

        self.tasks.post("focus recovery", move |engine: &mut Self| {
            engine.finish_focus_recovery(guide);
        });
    }

    fn finish_focus_recovery(&mut self, guide: ViewId) {
        if !self.host.contains(guide) {
            return;
        }
        if self.host.focused() == Some(guide)
            && let Some(first) = self.first_focusable_descendant(guide)
        {
            self.request_focus(first, FocusDirection::Down);
        }

        let Some(original) = self.group_mut(guide).and_then(|g| g.focus.recovery.take()) else {
            return;
        };
        if !original && self.host.focused() == Some(guide) {
            self.clear_focus();
        }
        if let Err(err) = self.host.set_focusable(guide, original) {
            tracing::warn!(target: targets::FOCUS, ?guide, %err, "cannot restore guide focusability");
        }
        tracing::trace!(target: targets::FOCUS, ?guide, "focus recovery finished");
    }
}
