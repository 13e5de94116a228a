//! Screen reader actions on focus guides.
//!
//! An action aimed at a guide is forwarded to where a focus request would
//! go: the destination, the remembered descendant, or the first focusable
//! descendant. Each target is tried in turn. A target whose host fails or
//! declines the action is skipped.

use reactv_core::ViewId;
use reactv_core::logging::targets;

use super::{FocusDirection, FocusableMode};
use crate::engine::ViewEngine;
use crate::error::ViewResult;
use crate::host::{AccessibilityAction, ViewHost};

impl<H: ViewHost + 'static> ViewEngine<H> {
    /// Perform an accessibility action on `view`, redirecting it if `view`
    /// is a focus guide.
    ///
    /// Returns whether the action was handled.
    pub fn perform_accessibility_action(
        &mut self,
        view: ViewId,
        action: AccessibilityAction,
    ) -> ViewResult<bool> {
        self.affinity.debug_assert_same_thread("perform_accessibility_action");
        if !self.is_focus_guide(view) {
            return self.dispatch_accessibility_action(view, action);
        }
        if self.intercept_accessibility_focus_action(view, action) {
            return Ok(true);
        }

        if self.first_focusable_descendant(view).is_none() {
            if let Some(child) = self.host.child_at(view, 0) {
                let mut focusables = Vec::new();
                self.add_focusables(child, FocusDirection::Down, FocusableMode::All, &mut focusables);
                if let Some(&target) = focusables.first() {
                    self.dispatch_accessibility_action(target, AccessibilityAction::Focus)?;
                    return Ok(true);
                }
            }
            if action == AccessibilityAction::AccessibilityFocus {
                return Ok(true);
            }
        }
        self.dispatch_accessibility_action(view, action)
    }

    /// Forward `action` to the guide's redirect targets in order.
    fn intercept_accessibility_focus_action(&mut self, guide: ViewId, action: AccessibilityAction) -> bool {
        if let Some(destination) = self.find_destination(guide)
            && self.try_accessibility_target(destination, action)
        {
            return true;
        }
        if let Some(last) = self.live_last_focused(guide)
            && self.try_accessibility_target(last, action)
        {
            return true;
        }
        if let Some(first) = self.first_focusable_descendant(guide)
            && self.try_accessibility_target(first, action)
        {
            return true;
        }
        false
    }

    fn try_accessibility_target(&mut self, target: ViewId, action: AccessibilityAction) -> bool {
        match self.dispatch_accessibility_action(target, action) {
            Ok(performed) => performed,
            Err(err) => {
                tracing::warn!(target: targets::FOCUS, ?target, ?action, %err, "accessibility action failed");
                false
            }
        }
    }

    /// Hand the action to the host, then move input focus for `Focus`.
    fn dispatch_accessibility_action(
        &mut self,
        view: ViewId,
        action: AccessibilityAction,
    ) -> ViewResult<bool> {
        let performed = self.host.perform_accessibility_action(view, action)?;
        if performed && action == AccessibilityAction::Focus {
            self.request_focus(view, FocusDirection::Down);
        }
        Ok(performed)
    }
}
