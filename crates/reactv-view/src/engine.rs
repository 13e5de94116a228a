//! The view group engine.
//!
//! [`ViewEngine`] owns the per-group state of every registered view group
//! and drives the host through the [`ViewHost`] adapter. Its operations are
//! split over several modules by concern:
//!
//! - structural mutations and lifecycle (this module)
//! - subview clipping (`group::clipping`)
//! - focus guides, traps, search and recovery (`focus::*`)
//! - props, commands and recycling (`manager`)
//! - hit testing (`hit_test`)
//!
//! # Threading
//!
//! The engine is bound to the thread it was created on. Mutating entry
//! points assert this in debug builds.
//!
//! # Deferred work
//!
//! Some work (focus recovery, clipping-prohibited checks) runs on a later UI
//! turn. The embedding calls [`ViewEngine::process_pending_tasks`] once per
//! turn to run it.

use slotmap::SecondaryMap;

use reactv_core::logging::{span_names, targets};
use reactv_core::{EngineConfig, Signal, TaskQueue, ThreadAffinity, ViewId};

use crate::error::{HostError, ViewError, ViewResult};
use crate::events::{ViewEvent, ViewEventKind};
use crate::focus::FocusDirection;
use crate::group::ViewGroupState;
use crate::host::ViewHost;
use crate::input::{HwInputRouter, HwKeyEvent, KeyAction, KeyCode, KeyEvent};
use crate::style::StyleApplicator;

/// Engine state shared by every view group of one surface.
///
/// # Example
///
/// ```
/// use reactv_core::EngineConfig;
/// use reactv_view::{MemoryHost, ViewEngine};
///
/// let mut host = MemoryHost::new();
/// let root = host.view(1).window_root().create();
/// let mut engine = ViewEngine::new(host, EngineConfig::default());
/// engine.register_group(root).unwrap();
/// assert!(engine.is_group(root));
/// ```
pub struct ViewEngine<H: ViewHost + 'static> {
    pub(crate) host: H,
    pub(crate) config: EngineConfig,
    pub(crate) groups: SecondaryMap<ViewId, ViewGroupState>,
    /// Children of clipping groups, mapped to the group observing them.
    pub(crate) layout_observers: SecondaryMap<ViewId, ViewId>,
    pub(crate) tasks: TaskQueue<Self>,
    pub(crate) events: Signal<ViewEvent>,
    pub(crate) router: HwInputRouter,
    pub(crate) style: Option<Box<dyn StyleApplicator>>,
    pub(crate) affinity: ThreadAffinity,
    /// Guides currently resolving a focus request, innermost last.
    pub(crate) resolving: Vec<ViewId>,
}

impl<H: ViewHost + 'static> ViewEngine<H> {
    /// Create an engine driving `host`.
    pub fn new(host: H, config: EngineConfig) -> Self {
        reactv_core::debug_assert_ui_thread!("view engine created off the UI thread");
        let router = HwInputRouter::new(&config);
        Self {
            host,
            config,
            groups: SecondaryMap::new(),
            layout_observers: SecondaryMap::new(),
            tasks: TaskQueue::new(),
            events: Signal::new(),
            router,
            style: None,
            affinity: ThreadAffinity::current(),
            resolving: Vec::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    ///
    /// Structural changes made directly on the host bypass clipping
    /// bookkeeping; use the engine's child operations for groups.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Focus, blur and press events.
    pub fn events(&self) -> &Signal<ViewEvent> {
        &self.events
    }

    /// Remote key events.
    pub fn key_events(&self) -> &Signal<HwKeyEvent> {
        self.router.key_events()
    }

    pub fn router(&self) -> &HwInputRouter {
        &self.router
    }

    /// Install the collaborator that receives border and background props.
    pub fn set_style_applicator(&mut self, applicator: Box<dyn StyleApplicator>) {
        self.style = Some(applicator);
    }

    // =========================================================================
    // Group registry
    // =========================================================================

    /// Start tracking `view` as a view group.
    pub fn register_group(&mut self, view: ViewId) -> ViewResult<()> {
        self.affinity.debug_assert_same_thread("register_group");
        if !self.host.contains(view) {
            return Err(HostError::UnknownView(view).into());
        }
        if !self.groups.contains_key(view) {
            self.groups.insert(view, ViewGroupState::default());
            tracing::trace!(target: targets::VIEW, ?view, "registered view group");
        }
        Ok(())
    }

    /// Stop tracking `view`, reattaching any clipped children first.
    pub fn unregister_group(&mut self, view: ViewId) -> ViewResult<()> {
        self.affinity.debug_assert_same_thread("unregister_group");
        if self.clipping_enabled(view) {
            self.disable_clipping(view)?;
        }
        self.groups.remove(view);
        self.layout_observers.retain(|_, parent| *parent != view);
        tracing::trace!(target: targets::VIEW, ?view, "unregistered view group");
        Ok(())
    }

    pub fn is_group(&self, view: ViewId) -> bool {
        self.groups.contains_key(view)
    }

    pub(crate) fn group(&self, view: ViewId) -> Option<&ViewGroupState> {
        self.groups.get(view)
    }

    pub(crate) fn group_mut(&mut self, view: ViewId) -> Option<&mut ViewGroupState> {
        self.groups.get_mut(view)
    }

    pub(crate) fn require_group(&self, view: ViewId) -> ViewResult<&ViewGroupState> {
        self.groups.get(view).ok_or(ViewError::NotAGroup(view))
    }

    pub(crate) fn require_group_mut(&mut self, view: ViewId) -> ViewResult<&mut ViewGroupState> {
        self.groups.get_mut(view).ok_or(ViewError::NotAGroup(view))
    }

    pub(crate) fn clipping_enabled(&self, view: ViewId) -> bool {
        self.groups.get(view).is_some_and(ViewGroupState::clipping_enabled)
    }

    // =========================================================================
    // Deferred tasks
    // =========================================================================

    /// Run every task posted before this call.
    ///
    /// Returns the number of tasks run. Tasks posted by these tasks wait for
    /// the next call.
    pub fn process_pending_tasks(&mut self) -> usize {
        self.affinity.debug_assert_same_thread("process_pending_tasks");
        let ready = self.tasks.take_ready();
        if ready.is_empty() {
            return 0;
        }
        let _span = tracing::trace_span!(span_names::TASK, count = ready.len()).entered();
        ready.run_all(self)
    }

    pub fn pending_task_count(&self) -> usize {
        self.tasks.pending_count()
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// Insert `child` into `parent` at logical `index`.
    ///
    /// Clipping groups record the child in their shadow list and attach it
    /// only if it is visible; other parents attach it directly.
    ///
    /// # Panics
    ///
    /// Panics with the group's operation counters if `index` is past the end
    /// of a clipping group's children.
    pub fn add_view(&mut self, parent: ViewId, child: ViewId, index: usize) -> ViewResult<()> {
        self.affinity.debug_assert_same_thread("add_view");
        if self.clipping_enabled(parent) {
            return self.insert_child(parent, child, index);
        }
        self.host.attach_child(parent, child, index)?;
        Ok(())
    }

    /// Remove `child` from `parent`, recovering focus first.
    pub fn remove_view(&mut self, parent: ViewId, child: ViewId) -> ViewResult<()> {
        self.affinity.debug_assert_same_thread("remove_view");
        if self.clipping_enabled(parent) {
            return self.remove_child(parent, child);
        }
        let index = self
            .host
            .index_of_child(parent, child)
            .ok_or(ViewError::ChildNotFound { parent, child })?;
        self.recover_focus(child);
        self.host.detach_child_at(parent, index)?;
        Ok(())
    }

    /// Remove the child at logical `index` of `parent`.
    pub fn remove_view_at(&mut self, parent: ViewId, index: usize) -> ViewResult<()> {
        let count = self.child_count(parent);
        let child = self
            .child_at(parent, index)
            .ok_or(ViewError::LogicalIndexOutOfRange { index, count })?;
        self.remove_view(parent, child)
    }

    /// Remove every child of `parent`.
    pub fn remove_all_views(&mut self, parent: ViewId) -> ViewResult<()> {
        self.affinity.debug_assert_same_thread("remove_all_views");
        if self.clipping_enabled(parent) {
            return self.remove_all_children(parent);
        }
        for child in self.host.children(parent) {
            self.recover_focus(child);
        }
        self.host.detach_all_children(parent)?;
        Ok(())
    }

    /// Logical child count, including clipped children.
    pub fn child_count(&self, parent: ViewId) -> usize {
        match self.groups.get(parent).and_then(|g| g.clipping.as_ref()) {
            Some(clipping) => clipping.children.len(),
            None => self.host.child_count(parent),
        }
    }

    /// Logical child at `index`, including clipped children.
    pub fn child_at(&self, parent: ViewId, index: usize) -> Option<ViewId> {
        match self.groups.get(parent).and_then(|g| g.clipping.as_ref()) {
            Some(clipping) => clipping.children.get(index),
            None => self.host.child_at(parent, index),
        }
    }

    /// Notify the engine that `view` was laid out, resized or scrolled.
    ///
    /// A clipping group recomputes its clipping; a child observed by a
    /// clipping parent has its attachment re-evaluated.
    pub fn on_layout(&mut self, view: ViewId) -> ViewResult<()> {
        self.affinity.debug_assert_same_thread("on_layout");
        if self.layout_observers.contains_key(view) {
            self.on_child_layout_changed(view)?;
        }
        if self.clipping_enabled(view) {
            self.update_clipping_rect(view)?;
        }
        Ok(())
    }

    // =========================================================================
    // Events and keys
    // =========================================================================

    pub(crate) fn emit_view_event(&self, kind: ViewEventKind, view: ViewId) {
        let event = ViewEvent::new(kind, self.host.tag(view), self.config.surface_id);
        tracing::trace!(target: targets::VIEW, %event, "view event");
        self.events.emit(event);
    }

    /// Route a remote key event.
    ///
    /// The router emits the named key event, a focused non-guide group gets
    /// press-in/press-out for select keys, and D-pad downs move focus.
    /// Returns `true` if focus moved.
    pub fn dispatch_key_event(&mut self, event: &KeyEvent) -> bool {
        self.affinity.debug_assert_same_thread("dispatch_key_event");
        let _span =
            tracing::debug_span!(span_names::KEY_DISPATCH, code = event.code.0).entered();
        self.router.handle_key_event(event);

        if let Some(focused) = self.host.focused()
            && self.is_group(focused)
            && !self.is_focus_guide(focused)
            && matches!(event.code, KeyCode::DPAD_CENTER | KeyCode::ENTER)
        {
            match event.action {
                KeyAction::Down if event.repeat_count == 0 => {
                    self.emit_view_event(ViewEventKind::PressIn, focused)
                }
                KeyAction::Down => {}
                KeyAction::Up => self.emit_view_event(ViewEventKind::PressOut, focused),
            }
        }

        if event.action != KeyAction::Down {
            return false;
        }
        let direction = match event.code {
            KeyCode::DPAD_UP => FocusDirection::Up,
            KeyCode::DPAD_DOWN => FocusDirection::Down,
            KeyCode::DPAD_LEFT => FocusDirection::Left,
            KeyCode::DPAD_RIGHT => FocusDirection::Right,
            KeyCode::TAB => FocusDirection::Forward,
            _ => return false,
        };
        self.move_focus(direction)
    }
}

impl<H: ViewHost + 'static> std::fmt::Debug for ViewEngine<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewEngine")
            .field("groups", &self.groups.len())
            .field("observers", &self.layout_observers.len())
            .field("pending_tasks", &self.tasks.pending_count())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
