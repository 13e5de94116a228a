//! UI-thread affinity checks.
//!
//! Every mutation of the view tree (child insertion and removal, clipping
//! passes, focus transitions) must run on the UI thread. The engine does not
//! take locks for this; it asserts affinity at the entry of each mutating
//! operation instead.
//!
//! # Usage
//!
//! ```ignore
//! use reactv_core::{debug_assert_ui_thread, thread_check::set_ui_thread};
//!
//! set_ui_thread();
//!
//! fn relayout() {
//!     debug_assert_ui_thread!();
//!     // ...
//! }
//! ```
//!
//! Objects that are created on the UI thread and must stay there carry a
//! [`ThreadAffinity`] and check it themselves.

use std::sync::OnceLock;
use std::thread::ThreadId;

static UI_THREAD_ID: OnceLock<ThreadId> = OnceLock::new();

/// Record the current thread as the UI thread.
///
/// Calling this again from the same thread is a no-op.
///
/// # Panics
///
/// Panics if a different thread was already registered.
pub fn set_ui_thread() {
    let current = std::thread::current().id();
    if UI_THREAD_ID.set(current).is_err() && UI_THREAD_ID.get() != Some(&current) {
        panic!("set_ui_thread() called from a second thread; the UI thread can only be set once");
    }
}

/// The registered UI thread, if any.
#[inline]
pub fn ui_thread_id() -> Option<ThreadId> {
    UI_THREAD_ID.get().copied()
}

/// Returns `true` on the UI thread, or when no UI thread was registered yet.
#[inline]
pub fn is_ui_thread() -> bool {
    match UI_THREAD_ID.get() {
        Some(&id) => std::thread::current().id() == id,
        None => true,
    }
}

/// Panics if the current thread is not the UI thread.
///
/// Active in release builds too. See [`debug_assert_ui_thread!`] for the
/// debug-only form.
#[macro_export]
macro_rules! assert_ui_thread {
    () => {
        $crate::assert_ui_thread!("view tree mutated off the UI thread")
    };
    ($msg:expr) => {
        if !$crate::thread_check::is_ui_thread() {
            $crate::thread_check::panic_not_ui_thread($msg, file!(), line!());
        }
    };
}

/// Debug-only variant of [`assert_ui_thread!`].
#[macro_export]
macro_rules! debug_assert_ui_thread {
    () => {
        #[cfg(debug_assertions)]
        $crate::assert_ui_thread!()
    };
    ($msg:expr) => {
        #[cfg(debug_assertions)]
        $crate::assert_ui_thread!($msg)
    };
}

#[cold]
#[inline(never)]
#[doc(hidden)]
pub fn panic_not_ui_thread(msg: &str, file: &str, line: u32) -> ! {
    let current = std::thread::current();
    let name = current.name().unwrap_or("<unnamed>");
    let ui = match ui_thread_id() {
        Some(id) => format!("{id:?}"),
        None => "<unregistered>".to_string(),
    };
    panic!(
        "UI thread violation: {msg}\n  at {file}:{line}\n  current thread: \"{name}\" ({:?})\n  UI thread: {ui}",
        current.id()
    )
}

/// Records the thread an object was created on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Bind to the calling thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    #[inline]
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Panics when called from a thread other than the bound one.
    pub fn assert_same_thread(&self, operation: &str) {
        if !self.is_same_thread() {
            self.panic_wrong_thread(operation);
        }
    }

    /// Debug-only form of [`assert_same_thread`](Self::assert_same_thread).
    #[inline]
    pub fn debug_assert_same_thread(&self, operation: &str) {
        #[cfg(debug_assertions)]
        self.assert_same_thread(operation);
        #[cfg(not(debug_assertions))]
        let _ = operation;
    }

    #[cold]
    #[inline(never)]
    fn panic_wrong_thread(&self, operation: &str) -> ! {
        let current = std::thread::current();
        panic!(
            "thread affinity violation in `{operation}`: owner thread {:?}, current thread \"{}\" ({:?})",
            self.thread_id,
            current.name().unwrap_or("<unnamed>"),
            current.id()
        )
    }
}
