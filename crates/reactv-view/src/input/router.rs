//! Long-press detection and remote key event emission.

use reactv_core::logging::targets;
use reactv_core::{EngineConfig, Signal, ViewTag};

use super::{KeyAction, KeyEvent, action_name, long_press_name};

/// A named remote key event sent to the framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HwKeyEvent {
    /// `select`, `longSelect`, `playPause`, ...
    pub event_type: &'static str,
    pub key_action: KeyAction,
    /// Tag of the focused view when the key arrived.
    pub target: Option<ViewTag>,
}

/// Turns raw host key events into [`HwKeyEvent`]s.
///
/// Select and D-pad keys are tracked for long presses. The first down
/// records its time; a later down arriving more than the configured
/// threshold after it switches the router into long-press mode until the
/// key comes up. In long-press mode only the first qualifying down and the
/// final up are emitted, both with long-press names.
///
/// Ordinary presses are emitted on key-up, and on key-down too when
/// key-down events are enabled in the [`EngineConfig`].
///
/// # Example
///
/// ```
/// use reactv_core::EngineConfig;
/// use reactv_view::input::{HwInputRouter, KeyCode, KeyEvent};
///
/// let mut router = HwInputRouter::new(&EngineConfig::default());
/// router.handle_key_event(&KeyEvent::down(KeyCode::DPAD_CENTER, 0));
/// router.handle_key_event(&KeyEvent::up(KeyCode::DPAD_CENTER, 50));
/// ```
#[derive(Debug)]
pub struct HwInputRouter {
    enable_key_down_events: bool,
    long_press_threshold_ms: u64,
    last_key_down_ms: Option<u64>,
    long_press_active: bool,
    long_press_started: bool,
    focused_tag: ViewTag,
    key_events: Signal<HwKeyEvent>,
}

impl HwInputRouter {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            enable_key_down_events: config.enable_key_down_events,
            long_press_threshold_ms: config.long_press_threshold_ms,
            last_key_down_ms: None,
            long_press_active: false,
            long_press_started: false,
            focused_tag: ViewTag::NO_ID,
            key_events: Signal::new(),
        }
    }

    /// Signal emitted for every dispatched key event.
    pub fn key_events(&self) -> &Signal<HwKeyEvent> {
        &self.key_events
    }

    /// Record the tag targeted by subsequent key events.
    pub fn set_focused_tag(&mut self, tag: ViewTag) {
        self.focused_tag = tag;
    }

    pub fn focused_tag(&self) -> ViewTag {
        self.focused_tag
    }

    /// Returns `true` while a long press is in progress.
    pub fn is_long_press_active(&self) -> bool {
        self.long_press_active
    }

    fn is_long_press_time(&self, time: u64) -> bool {
        self.last_key_down_ms
            .is_some_and(|last| time.saturating_sub(last) > self.long_press_threshold_ms)
    }

    fn should_dispatch(&self, event: &KeyEvent) -> bool {
        if action_name(event.code).is_none() {
            return false;
        }
        match event.action {
            KeyAction::Up => true,
            KeyAction::Down if self.long_press_active => self.is_long_press_time(event.event_time_ms),
            KeyAction::Down => self.enable_key_down_events,
        }
    }

    /// Process one host key event.
    ///
    /// Returns the event emitted on [`key_events`](Self::key_events), if any.
    pub fn handle_key_event(&mut self, event: &KeyEvent) -> Option<HwKeyEvent> {
        let time = event.event_time_ms;
        let tracked = event.code.is_select() || event.code.is_dpad();

        if event.action == KeyAction::Down && tracked {
            match self.last_key_down_ms {
                None => self.last_key_down_ms = Some(time),
                Some(_) if self.is_long_press_time(time) => self.long_press_active = true,
                Some(_) => {}
            }
        }

        let mut emitted = None;
        if self.should_dispatch(event) {
            if self.long_press_active {
                if !self.long_press_started || event.action == KeyAction::Up {
                    let name = long_press_name(event.code).or_else(|| action_name(event.code));
                    emitted = name.map(|name| self.emit(name, event.action));
                    self.long_press_started = true;
                }
                self.last_key_down_ms = Some(time);
            } else {
                emitted = action_name(event.code).map(|name| self.emit(name, event.action));
            }
        }

        if event.action == KeyAction::Up && tracked {
            self.last_key_down_ms = None;
            self.long_press_active = false;
            self.long_press_started = false;
        }
        emitted
    }

    fn emit(&self, event_type: &'static str, key_action: KeyAction) -> HwKeyEvent {
        let event = HwKeyEvent {
            event_type,
            key_action,
            target: Some(self.focused_tag).filter(|t| t.is_valid()),
        };
        tracing::debug!(
            target: targets::KEYS,
            event_type,
            action = key_action.as_i32(),
            target_tag = self.focused_tag.as_i32(),
            "remote key event"
        );
        self.key_events.emit(event);
        event
    }
}
