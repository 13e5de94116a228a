//! Logging and debugging facilities.
//!
//! reactv uses the `tracing` crate for instrumentation. Install a subscriber
//! in the embedding application to see output:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("reactv_view::focus=debug,reactv_view::clip=trace")
//!     .init();
//! ```
//!
//! The [`targets`] constants name every subsystem so filters can be written
//! against them, and [`TreeFormatOptions`] configures the view tree dumps
//! produced by `reactv_view::ViewTreeDebug`.

/// Span names used for `#[tracing::instrument]` spans.
pub mod span_names {
    /// Full clipping pass over a container.
    pub const CLIP_PASS: &str = "reactv::clip_pass";
    /// Focus request resolution through a guide.
    pub const FOCUS_REQUEST: &str = "reactv::focus_request";
    /// Directional focus search.
    pub const FOCUS_SEARCH: &str = "reactv::focus_search";
    /// Remote key dispatch.
    pub const KEY_DISPATCH: &str = "reactv::key_dispatch";
    /// Deferred task processing.
    pub const TASK: &str = "reactv::task";
}

/// Target names for log filtering.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "reactv_core";
    /// Signal emission.
    pub const SIGNAL: &str = "reactv_core::signal";
    /// Deferred task queue.
    pub const TASK: &str = "reactv_core::task";
    /// Engine lifecycle and props.
    pub const VIEW: &str = "reactv_view";
    /// Clipped subview manager.
    pub const CLIP: &str = "reactv_view::clip";
    /// Focus guides, traps and recovery.
    pub const FOCUS: &str = "reactv_view::focus";
    /// Remote key routing.
    pub const KEYS: &str = "reactv_view::keys";
    /// Host adapter calls.
    pub const HOST: &str = "reactv_view::host";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Indentation only.
    Compact,
}

impl TreeStyle {
    /// The (vertical branch, tee, last-child corner) glyphs for this style.
    pub fn glyphs(self) -> (&'static str, &'static str, &'static str) {
        match self {
            TreeStyle::Ascii => ("|", "+-- ", "`-- "),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500} ", "\u{2514}\u{2500}\u{2500} "),
            TreeStyle::Compact => ("", "- ", "- "),
        }
    }
}

/// Configuration for view tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    pub style: TreeStyle,
    /// Show frames in parent coordinates.
    pub show_frames: bool,
    /// Include children that are currently clipped out of the host tree.
    pub show_clipped: bool,
    /// Show focus guide and trap configuration.
    pub show_focus_config: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_frames: true,
            show_clipped: true,
            show_focus_config: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Tags and structure only.
    pub fn minimal() -> Self {
        Self {
            show_frames: false,
            show_focus_config: false,
            ..Default::default()
        }
    }

    /// Build the line prefix for a node at `depth`.
    pub fn prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }
        let (branch, tee, corner) = self.style.glyphs();
        let mut prefix = String::new();
        for _ in 0..depth - 1 {
            prefix.push_str(branch);
            prefix.extend(std::iter::repeat_n(' ', self.indent_size));
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix
    }
}
