//! Error types for the view engine.

use reactv_core::ViewId;

/// Result type alias for host adapter calls.
pub type HostResult<T> = std::result::Result<T, HostError>;

/// Result type alias for engine operations.
pub type ViewResult<T> = std::result::Result<T, ViewError>;

/// Result type alias for prop and command decoding.
pub type PropResult<T> = std::result::Result<T, PropError>;

/// Failures reported by a [`ViewHost`](crate::host::ViewHost).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The handle does not name a live view.
    #[error("unknown view {0:?}")]
    UnknownView(ViewId),

    /// An attach or detach index was outside the real child list.
    #[error("child index {index} out of range for {len} attached children")]
    IndexOutOfRange { index: usize, len: usize },

    /// The view is not an attached child of the given parent.
    #[error("view {child:?} is not a child of {parent:?}")]
    NotAChild { parent: ViewId, child: ViewId },

    /// The view already has a parent.
    #[error("view {0:?} already has a parent")]
    AlreadyAttached(ViewId),

    /// An accessibility action was rejected by the view.
    #[error("accessibility action failed on {view:?}: {message}")]
    ActionFailed { view: ViewId, message: String },
}

/// Failures reported by the [`ViewEngine`](crate::ViewEngine).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// The view was never registered as a view group.
    #[error("view {0:?} is not a registered view group")]
    NotAGroup(ViewId),

    /// A clipping-only operation was called while clipping is off.
    #[error("subview clipping is not enabled on {0:?}")]
    ClippingDisabled(ViewId),

    /// The child is not part of the group's logical child list.
    #[error("view {child:?} is not a logical child of {parent:?}")]
    ChildNotFound { parent: ViewId, child: ViewId },

    /// A logical index was outside the shadow child list.
    #[error("logical index {index} out of range for {count} children")]
    LogicalIndexOutOfRange { index: usize, count: usize },

    #[error(transparent)]
    Host(#[from] HostError),
}

/// Failures decoding props and commands sent by the framework.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropError {
    /// The prop or command name is not handled by view groups.
    #[error("unknown {kind} '{name}'")]
    Unknown { kind: &'static str, name: String },

    /// The value had the wrong JSON shape.
    #[error("invalid value for '{name}': expected {expected}")]
    InvalidValue {
        name: String,
        expected: &'static str,
    },
}

impl PropError {
    pub(crate) fn unknown_prop(name: &str) -> Self {
        Self::Unknown {
            kind: "prop",
            name: name.to_string(),
        }
    }

    pub(crate) fn unknown_command(name: &str) -> Self {
        Self::Unknown {
            kind: "command",
            name: name.to_string(),
        }
    }

    pub(crate) fn invalid(name: &str, expected: &'static str) -> Self {
        Self::InvalidValue {
            name: name.to_string(),
            expected,
        }
    }
}
