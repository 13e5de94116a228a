//! Border and background props.
//!
//! View groups do not draw borders or backgrounds themselves. These props are
//! decoded here and forwarded unchanged to a [`StyleApplicator`] installed on
//! the engine.

use serde_json::Value;

use reactv_core::ViewId;

use crate::error::{PropError, PropResult};

/// An edge addressed by a border width or color prop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderEdge {
    All,
    Left,
    Right,
    Top,
    Bottom,
    Start,
    End,
}

/// A corner addressed by a border radius prop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderCorner {
    All,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    TopStart,
    TopEnd,
    BottomStart,
    BottomEnd,
}

/// A decoded style prop. `None` values reset to the default.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleProp {
    BorderWidth { edge: BorderEdge, width: Option<f32> },
    BorderColor { edge: BorderEdge, color: Option<u32> },
    BorderRadius { corner: BorderCorner, radius: Option<f32> },
    BorderStyle(Option<String>),
    BackgroundColor(Option<u32>),
}

/// Receives border and background props for view groups.
pub trait StyleApplicator {
    fn apply(&mut self, view: ViewId, prop: &StyleProp);

    /// Drop all style state of a recycled view.
    fn reset(&mut self, view: ViewId) {
        let _ = view;
    }
}

const WIDTH_PROPS: &[(&str, BorderEdge)] = &[
    ("borderWidth", BorderEdge::All),
    ("borderLeftWidth", BorderEdge::Left),
    ("borderRightWidth", BorderEdge::Right),
    ("borderTopWidth", BorderEdge::Top),
    ("borderBottomWidth", BorderEdge::Bottom),
    ("borderStartWidth", BorderEdge::Start),
    ("borderEndWidth", BorderEdge::End),
];

const COLOR_PROPS: &[(&str, BorderEdge)] = &[
    ("borderColor", BorderEdge::All),
    ("borderLeftColor", BorderEdge::Left),
    ("borderRightColor", BorderEdge::Right),
    ("borderTopColor", BorderEdge::Top),
    ("borderBottomColor", BorderEdge::Bottom),
    ("borderStartColor", BorderEdge::Start),
    ("borderEndColor", BorderEdge::End),
];

const RADIUS_PROPS: &[(&str, BorderCorner)] = &[
    ("borderRadius", BorderCorner::All),
    ("borderTopLeftRadius", BorderCorner::TopLeft),
    ("borderTopRightRadius", BorderCorner::TopRight),
    ("borderBottomLeftRadius", BorderCorner::BottomLeft),
    ("borderBottomRightRadius", BorderCorner::BottomRight),
    ("borderTopStartRadius", BorderCorner::TopStart),
    ("borderTopEndRadius", BorderCorner::TopEnd),
    ("borderBottomStartRadius", BorderCorner::BottomStart),
    ("borderBottomEndRadius", BorderCorner::BottomEnd),
];

fn lookup<T: Copy>(table: &[(&str, T)], name: &str) -> Option<T> {
    table.iter().find(|(n, _)| *n == name).map(|&(_, v)| v)
}

fn float(name: &str, value: &Value) -> PropResult<Option<f32>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(|v| Some(v as f32))
            .ok_or_else(|| PropError::invalid(name, "number")),
        _ => Err(PropError::invalid(name, "number")),
    }
}

fn color(name: &str, value: &Value) -> PropResult<Option<u32>> {
    match value {
        Value::Null => Ok(None),
        // Processed colors arrive as signed 32-bit ARGB.
        Value::Number(n) => n
            .as_i64()
            .map(|v| Some(v as u32))
            .ok_or_else(|| PropError::invalid(name, "color integer")),
        _ => Err(PropError::invalid(name, "color integer")),
    }
}

impl StyleProp {
    /// Decode a style prop, or return `None` if `name` is not a style prop.
    pub fn parse(name: &str, value: &Value) -> Option<PropResult<StyleProp>> {
        if let Some(edge) = lookup(WIDTH_PROPS, name) {
            return Some(float(name, value).map(|width| StyleProp::BorderWidth { edge, width }));
        }
        if let Some(edge) = lookup(COLOR_PROPS, name) {
            return Some(color(name, value).map(|color| StyleProp::BorderColor { edge, color }));
        }
        if let Some(corner) = lookup(RADIUS_PROPS, name) {
            return Some(float(name, value).map(|radius| StyleProp::BorderRadius { corner, radius }));
        }
        match name {
            "borderStyle" => Some(match value {
                Value::Null => Ok(StyleProp::BorderStyle(None)),
                Value::String(s) => Ok(StyleProp::BorderStyle(Some(s.clone()))),
                _ => Err(PropError::invalid(name, "string")),
            }),
            "backgroundColor" => Some(color(name, value).map(StyleProp::BackgroundColor)),
            _ => None,
        }
    }
}
