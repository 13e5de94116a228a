//! Touch target lookup.

use reactv_core::{Point, Rect, ViewId};

use crate::engine::ViewEngine;
use crate::host::ViewHost;
use crate::props::{Overflow, PointerEvents};

impl<H: ViewHost + 'static> ViewEngine<H> {
    /// The deepest view under `point`, given in the local coordinates of
    /// `root`.
    ///
    /// Later children are on top and win. `pointerEvents` decides whether a
    /// view, its children, both or neither can be targets; `hitSlop` grows a
    /// group's touch area; clipping overflow keeps children from being hit
    /// outside their parent.
    pub fn hit_test(&self, root: ViewId, point: Point) -> Option<ViewId> {
        if !self.host.contains(root) || !self.host.is_visible(root) {
            return None;
        }
        self.hit_test_view(root, point)
    }

    fn hit_test_view(&self, view: ViewId, point: Point) -> Option<ViewId> {
        let props = self.group(view).map(|g| &g.props);
        let pointer_events = props.map_or(PointerEvents::Auto, |p| p.pointer_events);
        if pointer_events == PointerEvents::None {
            return None;
        }

        let frame = self.host.frame(view);
        let mut bounds = Rect::new(0, 0, frame.width(), frame.height());
        if let Some(slop) = props.and_then(|p| p.hit_slop.as_ref()) {
            bounds = bounds.outset(slop);
        }
        let inside = bounds.contains(point);
        let overflow = props.map_or(Overflow::Visible, |p| p.overflow);
        if !inside && overflow != Overflow::Visible {
            return None;
        }

        if pointer_events != PointerEvents::BoxOnly {
            let scroll = self.host.scroll_offset(view);
            for child in self.host.children(view).into_iter().rev() {
                if !self.host.is_visible(child) {
                    continue;
                }
                let origin = self.host.frame(child).origin();
                let local = point.offset(scroll.x - origin.x, scroll.y - origin.y);
                if let Some(target) = self.hit_test_view(child, local) {
                    return Some(target);
                }
            }
        }

        match pointer_events {
            PointerEvents::BoxNone => None,
            _ => inside.then_some(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::props::ViewProp;
    use reactv_core::{EngineConfig, Insets};

    /// root(200x200) -> [panel(50,50 100x100) -> [button(10,10 20x20)]]
    fn tree() -> (ViewEngine<MemoryHost>, ViewId, ViewId, ViewId) {
        let mut host = MemoryHost::new();
        let root = host.view(1).window_root().frame(Rect::new(0, 0, 200, 200)).create();
        let panel = host.view(2).frame(Rect::from_origin_size(50, 50, 100, 100)).create();
        let button = host.view(3).frame(Rect::from_origin_size(10, 10, 20, 20)).create();
        host.append_child(root, panel).unwrap();
        host.append_child(panel, button).unwrap();
        let mut engine = ViewEngine::new(host, EngineConfig::default());
        engine.register_group(root).unwrap();
        engine.register_group(panel).unwrap();
        (engine, root, panel, button)
    }

    #[test]
    fn test_deepest_view_wins() {
        let (engine, root, panel, button) = tree();
        assert_eq!(engine.hit_test(root, Point::new(65, 65)), Some(button));
        assert_eq!(engine.hit_test(root, Point::new(100, 100)), Some(panel));
        assert_eq!(engine.hit_test(root, Point::new(5, 5)), Some(root));
        assert_eq!(engine.hit_test(root, Point::new(250, 5)), None);
    }

    #[test]
    fn test_pointer_events() {
        let (mut engine, root, panel, button) = tree();
        engine
            .apply_prop(panel, ViewProp::PointerEvents(PointerEvents::BoxNone))
            .unwrap();
        assert_eq!(engine.hit_test(root, Point::new(100, 100)), Some(root));
        assert_eq!(engine.hit_test(root, Point::new(65, 65)), Some(button));

        engine
            .apply_prop(panel, ViewProp::PointerEvents(PointerEvents::BoxOnly))
            .unwrap();
        assert_eq!(engine.hit_test(root, Point::new(65, 65)), Some(panel));

        engine
            .apply_prop(panel, ViewProp::PointerEvents(PointerEvents::None))
            .unwrap();
        assert_eq!(engine.hit_test(root, Point::new(65, 65)), Some(root));
    }

    #[test]
    fn test_hit_slop_and_overflow() {
        let (mut engine, root, panel, button) = tree();
        engine
            .apply_prop(panel, ViewProp::HitSlop(Some(Insets::uniform(10))))
            .unwrap();
        assert_eq!(engine.hit_test(root, Point::new(45, 100)), Some(panel));

        engine.host_mut().set_frame(button, Rect::from_origin_size(90, 90, 40, 40));
        assert_eq!(engine.hit_test(root, Point::new(175, 175)), Some(button));
        engine
            .apply_prop(panel, ViewProp::Overflow(Overflow::Hidden))
            .unwrap();
        assert_eq!(engine.hit_test(root, Point::new(175, 175)), Some(root));
    }
}
