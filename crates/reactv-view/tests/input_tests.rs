//! Integration tests for remote key routing through the engine.

use std::sync::Arc;

use parking_lot::Mutex;
use reactv_core::{EngineConfig, Rect, ViewId, ViewTag};
use reactv_view::{
    FocusDirection, HwKeyEvent, KeyAction, KeyCode, KeyEvent, MemoryHost, ViewEngine, ViewEvent,
    ViewEventKind, ViewHost,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("reactv_view=trace")
        .with_test_writer()
        .try_init();
}

/// A window with a focusable card group (tag 2) above a button (tag 3).
fn screen() -> (ViewEngine<MemoryHost>, ViewId, ViewId) {
    let mut host = MemoryHost::new();
    let window = host.view(1).window_root().frame(Rect::new(0, 0, 100, 200)).create();
    let card = host.view(2).focusable(true).frame(Rect::new(0, 0, 100, 100)).create();
    let button = host.view(3).focusable(true).frame(Rect::new(0, 100, 100, 200)).create();
    host.append_child(window, card).unwrap();
    host.append_child(window, button).unwrap();
    let mut engine = ViewEngine::new(host, EngineConfig::default());
    engine.register_group(window).unwrap();
    engine.register_group(card).unwrap();
    (engine, card, button)
}

fn record<T: Clone + Send + 'static>(log: &Arc<Mutex<Vec<T>>>) -> impl Fn(&T) + Send + Sync + 'static {
    let sink = log.clone();
    move |item: &T| sink.lock().push(item.clone())
}

#[test]
fn test_dpad_moves_focus_and_targets_key_events() {
    init_tracing();
    let (mut engine, card, button) = screen();
    let keys: Arc<Mutex<Vec<HwKeyEvent>>> = Arc::default();
    engine.key_events().connect(record(&keys));

    engine.request_focus(card, FocusDirection::Down);
    assert!(engine.dispatch_key_event(&KeyEvent::down(KeyCode::DPAD_DOWN, 0)));
    assert_eq!(engine.host().focused(), Some(button));
    assert!(!engine.dispatch_key_event(&KeyEvent::up(KeyCode::DPAD_DOWN, 40)));

    let keys = keys.lock();
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0].event_type, "down");
    assert_eq!(keys[0].target, Some(ViewTag(3)));
}

#[test]
fn test_select_on_focused_group_emits_press_events() {
    let (mut engine, card, _button) = screen();
    let events: Arc<Mutex<Vec<ViewEvent>>> = Arc::default();
    engine.events().connect(record(&events));
    engine.request_focus(card, FocusDirection::Down);

    engine.dispatch_key_event(&KeyEvent::down(KeyCode::DPAD_CENTER, 0));
    engine.dispatch_key_event(&KeyEvent::down(KeyCode::DPAD_CENTER, 50).with_repeat_count(1));
    engine.dispatch_key_event(&KeyEvent::up(KeyCode::DPAD_CENTER, 80));

    let kinds: Vec<ViewEventKind> = events.lock().iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![ViewEventKind::Focus, ViewEventKind::PressIn, ViewEventKind::PressOut]
    );
}

#[test]
fn test_long_select_is_reported_once() {
    let (mut engine, card, _button) = screen();
    let keys: Arc<Mutex<Vec<HwKeyEvent>>> = Arc::default();
    engine.key_events().connect(record(&keys));
    engine.request_focus(card, FocusDirection::Down);

    for t in (0..=1000).step_by(50) {
        engine.dispatch_key_event(&KeyEvent::down(KeyCode::ENTER, t).with_repeat_count((t / 50) as u32));
    }
    engine.dispatch_key_event(&KeyEvent::up(KeyCode::ENTER, 1020));

    let seen: Vec<(&str, KeyAction)> = keys.lock().iter().map(|e| (e.event_type, e.key_action)).collect();
    assert_eq!(
        seen,
        vec![("longSelect", KeyAction::Down), ("longSelect", KeyAction::Up)]
    );
    assert!(!engine.router().is_long_press_active());
}

#[test]
fn test_key_down_events_config() {
    let mut host = MemoryHost::new();
    let window = host.view(1).window_root().create();
    let config = EngineConfig::from_toml_str("enable_key_down_events = true").unwrap();
    let mut engine = ViewEngine::new(host, config);
    engine.register_group(window).unwrap();
    let keys: Arc<Mutex<Vec<HwKeyEvent>>> = Arc::default();
    engine.key_events().connect(record(&keys));

    engine.dispatch_key_event(&KeyEvent::down(KeyCode::MEDIA_REWIND, 0));
    engine.dispatch_key_event(&KeyEvent::up(KeyCode::MEDIA_REWIND, 30));
    assert_eq!(keys.lock().len(), 2);
    assert!(engine.host().focused().is_none());
}
