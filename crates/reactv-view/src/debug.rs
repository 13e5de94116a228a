//! Human-readable view tree dumps.

use std::fmt::{self, Write};

use reactv_core::{TreeFormatOptions, ViewId};

use crate::engine::ViewEngine;
use crate::focus::FocusDirection;
use crate::host::ViewHost;

/// Renders a host view tree with clipping and focus annotations.
///
/// ```text
/// #1 (0, 0, 100x100) clip 3/5
/// ├── #2 (0, 0, 100x40) *focused*
/// └── #9 (0, 200, 100x40) (clipped)
/// ```
#[derive(Debug, Clone, Default)]
pub struct ViewTreeDebug {
    options: TreeFormatOptions,
}

impl ViewTreeDebug {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the subtree rooted at `root`.
    pub fn format_subtree<H: ViewHost + 'static>(&self, engine: &ViewEngine<H>, root: ViewId) -> String {
        let mut output = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_subtree(engine, root, &mut output);
        output
    }

    /// Write the subtree rooted at `root` into `out`.
    pub fn write_subtree<H: ViewHost + 'static, W: Write>(
        &self,
        engine: &ViewEngine<H>,
        root: ViewId,
        out: &mut W,
    ) -> fmt::Result {
        self.write_node(engine, root, 0, true, false, out)
    }

    fn write_node<H: ViewHost + 'static, W: Write>(
        &self,
        engine: &ViewEngine<H>,
        view: ViewId,
        depth: usize,
        is_last: bool,
        clipped: bool,
        out: &mut W,
    ) -> fmt::Result {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return Ok(());
        }
        let host = engine.host();
        write!(out, "{}{}", self.options.prefix(depth, is_last), host.tag(view))?;

        if self.options.show_frames {
            let frame = host.frame(view);
            write!(
                out,
                " ({}, {}, {}x{})",
                frame.left,
                frame.top,
                frame.width(),
                frame.height()
            )?;
        }
        if let Some(snapshot) = engine.clipping_snapshot(view) {
            write!(out, " clip {}/{}", snapshot.attached_count, snapshot.logical_count)?;
        }
        if self.options.show_focus_config
            && let Some(config) = engine.focus_guide_config(view)
        {
            if !config.destinations.is_empty() {
                let tags: Vec<String> = config.destinations.iter().map(|t| t.to_string()).collect();
                write!(out, " dest=[{}]", tags.join(", "))?;
            }
            if config.auto_focus {
                out.write_str(" autofocus")?;
            }
            let traps: Vec<&str> = FocusDirection::DIRECTIONAL
                .iter()
                .filter(|&&d| config.traps(d))
                .map(|d| match d {
                    FocusDirection::Up => "up",
                    FocusDirection::Down => "down",
                    FocusDirection::Left => "left",
                    _ => "right",
                })
                .collect();
            if !traps.is_empty() {
                write!(out, " trap({})", traps.join(","))?;
            }
        }
        if host.focused() == Some(view) {
            out.write_str(" *focused*")?;
        }
        if clipped {
            out.write_str(" (clipped)")?;
        }
        out.write_char('\n')?;

        let children: Vec<(ViewId, bool)> = match engine.all_children_count(view) {
            Some(count) if self.options.show_clipped => (0..count)
                .filter_map(|i| engine.child_at(view, i))
                .map(|child| (child, engine.is_clipped(view, child)))
                .collect(),
            _ => host.children(view).into_iter().map(|c| (c, false)).collect(),
        };
        let last = children.len().saturating_sub(1);
        for (i, (child, child_clipped)) in children.into_iter().enumerate() {
            self.write_node(engine, child, depth + 1, i == last, child_clipped, out)?;
        }
        Ok(())
    }
}
