//! Integration tests for framework props, commands and hit testing.

use reactv_core::{EngineConfig, Point, Rect, ViewId};
use reactv_view::{
    FocusDirection, MemoryHost, PropError, ViewCommand, ViewEngine, ViewError, ViewHost, ViewProp,
};
use serde_json::{Value, json};

/// ```text
/// window(1) 200x200
/// ├── list(2) 200x100: rows 3 and 4, side by side
/// └── panel(5) at y 100: button(6) at (10, 10) 20x20
/// ```
struct App {
    engine: ViewEngine<MemoryHost>,
    window: ViewId,
    list: ViewId,
    panel: ViewId,
    button: ViewId,
}

impl App {
    fn new() -> Self {
        let mut host = MemoryHost::new();
        let window = host.view(1).window_root().frame(Rect::new(0, 0, 200, 200)).create();
        let list = host.view(2).frame(Rect::new(0, 0, 200, 100)).create();
        let left = host.view(3).focusable(true).frame(Rect::new(0, 0, 100, 100)).create();
        let right = host.view(4).focusable(true).frame(Rect::new(100, 0, 200, 100)).create();
        let panel = host.view(5).frame(Rect::new(0, 100, 200, 200)).create();
        let button = host.view(6).frame(Rect::from_origin_size(10, 10, 20, 20)).create();
        host.append_child(window, list).unwrap();
        host.append_child(list, left).unwrap();
        host.append_child(list, right).unwrap();
        host.append_child(window, panel).unwrap();
        host.append_child(panel, button).unwrap();

        let mut engine = ViewEngine::new(host, EngineConfig::default());
        for group in [window, list, panel] {
            engine.register_group(group).unwrap();
        }
        Self {
            engine,
            window,
            list,
            panel,
            button,
        }
    }

    fn apply(&mut self, node: ViewId, name: &str, value: Value) {
        let prop = ViewProp::parse(name, &value).unwrap();
        self.engine.apply_prop(node, prop).unwrap();
    }

    fn command(&mut self, node: ViewId, name: &str, args: &[Value]) {
        let command = ViewCommand::parse(name, args).unwrap();
        self.engine.run_command(node, command).unwrap();
    }

    fn focused_tag(&self) -> Option<i32> {
        self.engine
            .host()
            .focused()
            .map(|f| self.engine.host().tag(f).as_i32())
    }
}

#[test]
fn test_guide_props_from_json() {
    let mut app = App::new();
    app.apply(app.list, "destinations", json!([4]));
    app.apply(app.list, "trapFocusRight", json!(true));

    assert!(app.engine.request_focus(app.list, FocusDirection::Down));
    assert_eq!(app.focused_tag(), Some(4));
    assert!(!app.engine.move_focus(FocusDirection::Right));
    assert_eq!(app.focused_tag(), Some(4));

    app.apply(app.list, "trapFocusRight", Value::Null);
    assert!(!app.engine.focus_guide_config(app.list).unwrap().traps(FocusDirection::Right));
}

#[test]
fn test_commands_from_json() {
    let mut app = App::new();
    app.command(app.list, "setDestinations", &[json!([3])]);
    app.command(app.list, "requestTVFocus", &[]);
    assert_eq!(app.focused_tag(), Some(3));

    // Blur on a group that does not hold focus leaves it alone.
    app.command(app.panel, "blur", &[]);
    assert_eq!(app.focused_tag(), Some(3));

    app.command(app.list, "blur", &[]);
    assert_eq!(app.focused_tag(), None);
}

#[test]
fn test_clipping_prop_toggles_clipping() {
    let mut app = App::new();
    app.apply(app.list, "removeClippedSubviews", json!(true));
    assert!(app.engine.clipping_snapshot(app.list).is_some());
    app.apply(app.list, "removeClippedSubviews", json!(false));
    assert!(app.engine.clipping_snapshot(app.list).is_none());
    assert_eq!(app.engine.host().children(app.list).len(), 2);
}

#[test]
fn test_hit_testing_follows_props() {
    let mut app = App::new();
    let window = app.window;
    assert_eq!(app.engine.hit_test(window, Point::new(15, 115)), Some(app.button));
    assert_eq!(app.engine.hit_test(window, Point::new(150, 150)), Some(app.panel));

    app.apply(app.panel, "pointerEvents", json!("box-none"));
    assert_eq!(app.engine.hit_test(window, Point::new(15, 115)), Some(app.button));
    assert_eq!(app.engine.hit_test(window, Point::new(150, 150)), Some(window));

    app.apply(app.panel, "pointerEvents", json!("auto"));
    app.apply(app.panel, "hitSlop", json!(20));
    assert_eq!(app.engine.hit_test(window, Point::new(50, 90)), Some(app.panel));

    app.apply(app.panel, "pointerEvents", json!("none"));
    assert_eq!(app.engine.hit_test(window, Point::new(15, 115)), Some(window));
}

#[test]
fn test_bad_props_are_rejected() {
    let mut app = App::new();
    assert!(matches!(
        ViewProp::parse("sparkle", &json!(true)),
        Err(PropError::Unknown { .. })
    ));
    assert!(matches!(
        ViewProp::parse("autoFocus", &json!("yes")),
        Err(PropError::InvalidValue { .. })
    ));
    assert!(matches!(
        ViewCommand::parse("explode", &[]),
        Err(PropError::Unknown { .. })
    ));

    let err = app
        .engine
        .apply_prop(app.button, ViewProp::AutoFocus(true))
        .unwrap_err();
    assert_eq!(err, ViewError::NotAGroup(app.button));
}
