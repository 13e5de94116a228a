//! Props and commands accepted by view groups.
//!
//! The framework sends props as `(name, JSON value)` pairs and commands as
//! `(name, JSON argument list)`. [`ViewProp::parse`] and [`ViewCommand::parse`]
//! decode them; the engine applies them with
//! [`ViewEngine::apply_prop`](crate::ViewEngine::apply_prop) and
//! [`ViewEngine::run_command`](crate::ViewEngine::run_command).

use serde::Deserialize;
use serde_json::Value;

use reactv_core::{Insets, ViewTag};

use crate::error::{PropError, PropResult};
use crate::focus::FocusDirection;
use crate::style::StyleProp;

/// How content outside a view's bounds is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
}

/// Which of a view and its subtree may be touch targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointerEvents {
    /// The view and its children may be targets.
    #[default]
    Auto,
    /// Neither the view nor its children are targets.
    None,
    /// Only the children may be targets.
    BoxNone,
    /// Only the view itself may be a target.
    BoxOnly,
}

/// User-specified focus targets by direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NextFocus {
    pub up: Option<ViewTag>,
    pub down: Option<ViewTag>,
    pub left: Option<ViewTag>,
    pub right: Option<ViewTag>,
    pub forward: Option<ViewTag>,
}

impl NextFocus {
    pub fn get(&self, direction: FocusDirection) -> Option<ViewTag> {
        match direction {
            FocusDirection::Up => self.up,
            FocusDirection::Down => self.down,
            FocusDirection::Left => self.left,
            FocusDirection::Right => self.right,
            FocusDirection::Forward => self.forward,
            FocusDirection::Backward => None,
        }
    }

    pub fn set(&mut self, direction: FocusDirection, tag: Option<ViewTag>) {
        match direction {
            FocusDirection::Up => self.up = tag,
            FocusDirection::Down => self.down = tag,
            FocusDirection::Left => self.left = tag,
            FocusDirection::Right => self.right = tag,
            FocusDirection::Forward => self.forward = tag,
            FocusDirection::Backward => {}
        }
    }
}

/// Non-focus props stored per view group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewProps {
    pub hit_slop: Option<Insets>,
    pub overflow: Overflow,
    pub pointer_events: PointerEvents,
    pub next_focus: NextFocus,
    pub has_tv_preferred_focus: bool,
}

/// A decoded prop update.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewProp {
    RemoveClippedSubviews(bool),
    HitSlop(Option<Insets>),
    Overflow(Overflow),
    PointerEvents(PointerEvents),
    Destinations(Vec<ViewTag>),
    AutoFocus(bool),
    TrapFocus(FocusDirection, bool),
    HasTvPreferredFocus(bool),
    Focusable(bool),
    TvFocusable(bool),
    NextFocus(FocusDirection, Option<ViewTag>),
    Style(StyleProp),
}

fn boolean(name: &str, value: &Value, default: bool) -> PropResult<bool> {
    match value {
        Value::Null => Ok(default),
        Value::Bool(b) => Ok(*b),
        _ => Err(PropError::invalid(name, "boolean")),
    }
}

fn tag(name: &str, value: &Value) -> PropResult<ViewTag> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .and_then(|raw| i32::try_from(raw).ok())
        .map(ViewTag)
        .ok_or_else(|| PropError::invalid(name, "view tag"))
}

fn tag_list(name: &str, value: &Value) -> PropResult<Vec<ViewTag>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items.iter().map(|v| tag(name, v)).collect(),
        _ => Err(PropError::invalid(name, "array of view tags")),
    }
}

fn hit_slop(name: &str, value: &Value) -> PropResult<Option<Insets>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(_) => Ok(Some(Insets::uniform(tag(name, value)?.as_i32()))),
        Value::Object(_) => serde_json::from_value::<Insets>(value.clone())
            .map(Some)
            .map_err(|_| PropError::invalid(name, "{left, top, right, bottom}")),
        _ => Err(PropError::invalid(name, "number or {left, top, right, bottom}")),
    }
}

const TRAP_PROPS: &[(&str, FocusDirection)] = &[
    ("trapFocusUp", FocusDirection::Up),
    ("trapFocusDown", FocusDirection::Down),
    ("trapFocusLeft", FocusDirection::Left),
    ("trapFocusRight", FocusDirection::Right),
];

const NEXT_FOCUS_PROPS: &[(&str, FocusDirection)] = &[
    ("nextFocusUp", FocusDirection::Up),
    ("nextFocusDown", FocusDirection::Down),
    ("nextFocusLeft", FocusDirection::Left),
    ("nextFocusRight", FocusDirection::Right),
    ("nextFocusForward", FocusDirection::Forward),
];

impl ViewProp {
    /// Decode a prop sent by the framework.
    pub fn parse(name: &str, value: &Value) -> PropResult<ViewProp> {
        if let Some(&(_, direction)) = TRAP_PROPS.iter().find(|(n, _)| *n == name) {
            return Ok(ViewProp::TrapFocus(direction, boolean(name, value, false)?));
        }
        if let Some(&(_, direction)) = NEXT_FOCUS_PROPS.iter().find(|(n, _)| *n == name) {
            let target = match value {
                Value::Null => None,
                _ => Some(tag(name, value)?).filter(|t| t.is_valid()),
            };
            return Ok(ViewProp::NextFocus(direction, target));
        }
        if let Some(style) = StyleProp::parse(name, value) {
            return style.map(ViewProp::Style);
        }
        match name {
            "removeClippedSubviews" => Ok(ViewProp::RemoveClippedSubviews(boolean(name, value, false)?)),
            "hitSlop" => Ok(ViewProp::HitSlop(hit_slop(name, value)?)),
            "overflow" => Ok(ViewProp::Overflow(
                serde_json::from_value(value.clone()).unwrap_or_default(),
            )),
            "pointerEvents" => match value {
                Value::Null => Ok(ViewProp::PointerEvents(PointerEvents::Auto)),
                _ => serde_json::from_value(value.clone())
                    .map(ViewProp::PointerEvents)
                    .map_err(|_| PropError::invalid(name, "auto | none | box-none | box-only")),
            },
            "destinations" | "focusDestinations" => Ok(ViewProp::Destinations(tag_list(name, value)?)),
            "autoFocus" => Ok(ViewProp::AutoFocus(boolean(name, value, false)?)),
            "hasTVPreferredFocus" => Ok(ViewProp::HasTvPreferredFocus(boolean(name, value, false)?)),
            "focusable" => Ok(ViewProp::Focusable(boolean(name, value, false)?)),
            "tvFocusable" => Ok(ViewProp::TvFocusable(boolean(name, value, true)?)),
            _ => Err(PropError::unknown_prop(name)),
        }
    }
}

/// A decoded view command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    /// Replace the focus guide destinations.
    SetDestinations(Vec<ViewTag>),
    /// Request focus through the engine, honoring focus guides.
    RequestTvFocus,
    Focus,
    /// Clear focus from the view or its focused descendant.
    Blur,
}

impl ViewCommand {
    /// Decode a command sent by the framework.
    pub fn parse(name: &str, args: &[Value]) -> PropResult<ViewCommand> {
        match name {
            "setDestinations" => {
                let list = args.first().unwrap_or(&Value::Null);
                Ok(ViewCommand::SetDestinations(tag_list(name, list)?))
            }
            "requestTVFocus" => Ok(ViewCommand::RequestTvFocus),
            "focus" => Ok(ViewCommand::Focus),
            "blur" => Ok(ViewCommand::Blur),
            _ => Err(PropError::unknown_command(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_hit_slop() {
        assert_eq!(
            ViewProp::parse("hitSlop", &json!({"left": 5, "bottom": 10})).unwrap(),
            ViewProp::HitSlop(Some(Insets::new(5, 0, 0, 10)))
        );
        assert_eq!(
            ViewProp::parse("hitSlop", &json!(8)).unwrap(),
            ViewProp::HitSlop(Some(Insets::uniform(8)))
        );
        assert_eq!(
            ViewProp::parse("hitSlop", &json!(null)).unwrap(),
            ViewProp::HitSlop(None)
        );
        assert!(ViewProp::parse("hitSlop", &json!("wide")).is_err());
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!(
            ViewProp::parse("pointerEvents", &json!("box-none")).unwrap(),
            ViewProp::PointerEvents(PointerEvents::BoxNone)
        );
        assert!(ViewProp::parse("pointerEvents", &json!("sometimes")).is_err());
        assert_eq!(
            ViewProp::parse("overflow", &json!("hidden")).unwrap(),
            ViewProp::Overflow(Overflow::Hidden)
        );
        assert_eq!(
            ViewProp::parse("overflow", &json!("clip")).unwrap(),
            ViewProp::Overflow(Overflow::Visible)
        );
    }

    #[test]
    fn test_parse_focus_props() {
        assert_eq!(
            ViewProp::parse("trapFocusDown", &json!(true)).unwrap(),
            ViewProp::TrapFocus(FocusDirection::Down, true)
        );
        assert_eq!(
            ViewProp::parse("nextFocusForward", &json!(12)).unwrap(),
            ViewProp::NextFocus(FocusDirection::Forward, Some(ViewTag(12)))
        );
        assert_eq!(
            ViewProp::parse("nextFocusUp", &json!(-1)).unwrap(),
            ViewProp::NextFocus(FocusDirection::Up, None)
        );
        assert_eq!(
            ViewProp::parse("tvFocusable", &json!(null)).unwrap(),
            ViewProp::TvFocusable(true)
        );
        assert_eq!(
            ViewProp::parse("autoFocus", &json!(null)).unwrap(),
            ViewProp::AutoFocus(false)
        );
        assert!(ViewProp::parse("autoFocus", &json!(1)).is_err());
    }

    #[test]
    fn test_style_props_are_forwarded() {
        assert!(matches!(
            ViewProp::parse("backgroundColor", &json!(255)).unwrap(),
            ViewProp::Style(StyleProp::BackgroundColor(Some(255)))
        ));
    }

    #[test]
    fn test_unknown_prop() {
        assert_eq!(
            ViewProp::parse("collapsable", &json!(true)),
            Err(PropError::Unknown {
                kind: "prop",
                name: "collapsable".into()
            })
        );
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            ViewCommand::parse("setDestinations", &[json!([3, 4])]).unwrap(),
            ViewCommand::SetDestinations(vec![ViewTag(3), ViewTag(4)])
        );
        assert_eq!(
            ViewCommand::parse("requestTVFocus", &[]).unwrap(),
            ViewCommand::RequestTvFocus
        );
        assert!(ViewCommand::parse("setPressed", &[]).is_err());
        assert!(ViewCommand::parse("setDestinations", &[json!("x")]).is_err());
    }
}
