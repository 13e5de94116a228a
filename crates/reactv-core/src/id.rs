//! Identifiers for host views.
//!
//! Two kinds of identity exist side by side:
//!
//! - [`ViewId`] is the engine's handle for a host view. It is a generational
//!   slotmap key, so a handle to a destroyed view never aliases a new one.
//!   This is what the engine stores when it needs to remember a view without
//!   owning it (for example the last focused descendant of a focus guide).
//! - [`ViewTag`] is the framework's integer tag. Focus destinations,
//!   `nextFocus*` props and outbound events all speak in tags.

use std::fmt;

use slotmap::new_key_type;

new_key_type! {
    /// A handle to a view known to the host adapter.
    ///
    /// Handles are cheap to copy and never keep the view alive. Whether the
    /// view still exists is checked through the host at use time.
    pub struct ViewId;
}

impl ViewId {
    /// Convert the handle to a raw u64 value.
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Create a handle from a raw u64 value.
    ///
    /// This does not check that the view exists.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// The framework's integer tag for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewTag(pub i32);

impl ViewTag {
    /// The "no id" sentinel used by hosts for untagged views.
    pub const NO_ID: ViewTag = ViewTag(-1);

    #[inline]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Returns `true` unless this is [`ViewTag::NO_ID`].
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != Self::NO_ID.0
    }
}

impl Default for ViewTag {
    fn default() -> Self {
        Self::NO_ID
    }
}

impl fmt::Display for ViewTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifies the rendering surface an event originated from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(pub i32);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface:{}", self.0)
    }
}
