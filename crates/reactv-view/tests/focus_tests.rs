//! Integration tests for focus guides, traps and recovery.

use std::sync::Arc;

use parking_lot::Mutex;
use reactv_core::{EngineConfig, Rect, ViewId, ViewTag};
use reactv_view::{FocusDirection, FocusGuideState, MemoryHost, ViewEngine, ViewEventKind, ViewHost};

/// Two rows of three 100x100 buttons.
///
/// ```text
/// window(1)
/// ├── top(10): buttons 11 12 13   at y 0
/// └── bottom(20): buttons 21 22 23 at y 100
/// ```
struct Screen {
    engine: ViewEngine<MemoryHost>,
    window: ViewId,
    top: ViewId,
    bottom: ViewId,
    top_buttons: Vec<ViewId>,
    bottom_buttons: Vec<ViewId>,
}

impl Screen {
    fn new() -> Self {
        let mut host = MemoryHost::new();
        let window = host.view(1).window_root().frame(Rect::new(0, 0, 300, 200)).create();
        let top = host.view(10).frame(Rect::new(0, 0, 300, 100)).create();
        let bottom = host.view(20).frame(Rect::new(0, 100, 300, 200)).create();
        host.append_child(window, top).unwrap();
        host.append_child(window, bottom).unwrap();

        let mut rows = Vec::new();
        for (row, base) in [(top, 10), (bottom, 20)] {
            let buttons: Vec<ViewId> = (1..=3)
                .map(|i| {
                    let button = host
                        .view(base + i)
                        .focusable(true)
                        .frame(Rect::from_origin_size((i - 1) * 100, 0, 100, 100))
                        .create();
                    host.append_child(row, button).unwrap();
                    button
                })
                .collect();
            rows.push(buttons);
        }

        let mut engine = ViewEngine::new(host, EngineConfig::default());
        for group in [window, top, bottom] {
            engine.register_group(group).unwrap();
        }
        let bottom_buttons = rows.pop().unwrap();
        let top_buttons = rows.pop().unwrap();
        Self {
            engine,
            window,
            top,
            bottom,
            top_buttons,
            bottom_buttons,
        }
    }

    fn focused(&self) -> Option<ViewId> {
        self.engine.host().focused()
    }
}

#[test]
fn test_first_present_destination_wins() {
    let mut screen = Screen::new();
    screen
        .engine
        .set_focus_destinations(screen.bottom, vec![ViewTag(99), ViewTag(23)])
        .unwrap();
    screen.engine.request_focus(screen.top_buttons[2], FocusDirection::Down);

    assert!(screen.engine.move_focus(FocusDirection::Down));
    assert_eq!(screen.focused(), Some(screen.bottom_buttons[2]));
}

#[test]
fn test_destination_outside_guide_is_found() {
    let mut screen = Screen::new();
    screen
        .engine
        .set_focus_destinations(screen.bottom, vec![ViewTag(12)])
        .unwrap();
    assert!(screen.engine.request_focus(screen.bottom, FocusDirection::Down));
    assert_eq!(screen.focused(), Some(screen.top_buttons[1]));
}

#[test]
fn test_auto_focus_restores_last_focused() {
    let mut screen = Screen::new();
    screen.engine.set_auto_focus(screen.bottom, true).unwrap();
    screen.engine.request_focus(screen.bottom_buttons[2], FocusDirection::Down);
    assert_eq!(screen.engine.last_focused(screen.bottom), Some(screen.bottom_buttons[2]));

    assert!(screen.engine.move_focus(FocusDirection::Up));
    assert_eq!(screen.focused(), Some(screen.top_buttons[2]));
    screen.engine.request_focus(screen.top_buttons[0], FocusDirection::Down);

    // Search sees the idle guide as one unit and the guide restores its
    // last focused button rather than the one below.
    assert!(screen.engine.move_focus(FocusDirection::Down));
    assert_eq!(screen.focused(), Some(screen.bottom_buttons[2]));
}

#[test]
fn test_auto_focus_falls_back_when_last_focused_is_gone() {
    let mut screen = Screen::new();
    screen.engine.set_auto_focus(screen.bottom, true).unwrap();
    screen.engine.request_focus(screen.bottom_buttons[2], FocusDirection::Down);
    screen.engine.request_focus(screen.top_buttons[0], FocusDirection::Down);

    screen
        .engine
        .remove_view(screen.bottom, screen.bottom_buttons[2])
        .unwrap();
    assert!(screen.engine.request_focus(screen.bottom, FocusDirection::Down));
    assert_eq!(screen.focused(), Some(screen.bottom_buttons[0]));
    assert_eq!(screen.engine.last_focused(screen.bottom), Some(screen.bottom_buttons[0]));
}

#[test]
fn test_trap_keeps_search_inside() {
    let mut screen = Screen::new();
    screen
        .engine
        .set_trap_focus(screen.top, FocusDirection::Down, true)
        .unwrap();
    screen.engine.request_focus(screen.top_buttons[1], FocusDirection::Down);

    assert_eq!(
        screen
            .engine
            .focus_search(screen.top, screen.top_buttons[1], FocusDirection::Down),
        None
    );
    assert!(!screen.engine.move_focus(FocusDirection::Down));
    assert_eq!(screen.focused(), Some(screen.top_buttons[1]));

    // Other directions are not trapped.
    assert!(screen.engine.move_focus(FocusDirection::Right));
    assert_eq!(screen.focused(), Some(screen.top_buttons[2]));
    assert_eq!(screen.engine.focus_guide_state(screen.top), FocusGuideState::NotAGuide);
}

#[test]
fn test_recovery_is_noop_when_focus_moved() {
    let mut screen = Screen::new();
    screen.engine.set_auto_focus(screen.bottom, true).unwrap();
    screen.engine.request_focus(screen.bottom_buttons[1], FocusDirection::Down);
    screen
        .engine
        .remove_view(screen.bottom, screen.bottom_buttons[1])
        .unwrap();
    assert_eq!(screen.focused(), Some(screen.bottom));

    screen.engine.request_focus(screen.top_buttons[0], FocusDirection::Down);
    assert_eq!(screen.engine.process_pending_tasks(), 1);
    assert_eq!(screen.focused(), Some(screen.top_buttons[0]));
    assert!(!screen.engine.host().is_focusable(screen.bottom));
    assert_eq!(screen.engine.focus_guide_state(screen.bottom), FocusGuideState::GuideIdle);
}

#[test]
fn test_removal_without_guide_loses_focus() {
    let mut screen = Screen::new();
    screen.engine.request_focus(screen.top_buttons[0], FocusDirection::Down);
    screen.engine.remove_view(screen.top, screen.top_buttons[0]).unwrap();
    assert_eq!(screen.focused(), None);
    assert_eq!(screen.engine.pending_task_count(), 0);
}

#[test]
fn test_nested_guide_redirects_again() {
    let mut screen = Screen::new();
    screen
        .engine
        .set_focus_destinations(screen.window, vec![ViewTag(20)])
        .unwrap();
    screen
        .engine
        .set_focus_destinations(screen.bottom, vec![ViewTag(22)])
        .unwrap();
    assert!(screen.engine.request_focus(screen.window, FocusDirection::Down));
    assert_eq!(screen.focused(), Some(screen.bottom_buttons[1]));
}

#[test]
fn test_group_focus_events() {
    let mut screen = Screen::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    screen
        .engine
        .events()
        .connect(move |event| sink.lock().push((event.kind, event.target)));

    screen.engine.host_mut().set_focusable(screen.top, true).unwrap();
    screen.engine.request_focus(screen.top, FocusDirection::Down);
    screen.engine.request_focus(screen.bottom_buttons[0], FocusDirection::Down);
    screen.engine.clear_focus();

    assert_eq!(
        *log.lock(),
        vec![(ViewEventKind::Focus, ViewTag(10)), (ViewEventKind::Blur, ViewTag(10))]
    );
    assert_eq!(screen.engine.router().focused_tag(), ViewTag::NO_ID);
}
