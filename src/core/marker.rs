//! Identity tracking for actions whose side effect is already scheduled.
//!
//! The host may run a transition more than once for the same action. The
//! marker remembers the last action that had its effect scheduled, keyed by
//! `Arc` identity, so repeat runs with that exact action are recognised.

use std::fmt;
use std::sync::Arc;

/// Single-slot record of the last action whose effect was scheduled.
///
/// Comparison is by allocation identity (`Arc::ptr_eq`), never by value:
/// two structurally equal actions in separate allocations are distinct.
/// The marker holds a strong reference, so the remembered allocation can
/// never be freed and reused by a later action.
///
/// # Example
///
/// ```rust
/// use aftermath::core::ActionMarker;
/// use std::sync::Arc;
///
/// let mut marker = ActionMarker::new();
/// let load = Arc::new("load");
///
/// assert!(marker.mark(&load));
/// assert!(!marker.mark(&load));
///
/// // Same content, different identity
/// assert!(marker.mark(&Arc::new("load")));
/// ```
pub struct ActionMarker<A> {
    last: Option<Arc<A>>,
}

impl<A> ActionMarker<A> {
    /// Create an empty marker.
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Check whether `action` is the identity currently remembered.
    pub fn is_marked(&self, action: &Arc<A>) -> bool {
        self.last
            .as_ref()
            .is_some_and(|last| Arc::ptr_eq(last, action))
    }

    /// Remember `action` unless it is already the marked identity.
    ///
    /// Returns `true` when the marker moved to `action`, meaning the caller
    /// should schedule its effect. Returns `false` for a repeat.
    pub fn mark(&mut self, action: &Arc<A>) -> bool {
        if self.is_marked(action) {
            return false;
        }
        self.last = Some(Arc::clone(action));
        true
    }

    /// The last marked action, if any.
    pub fn current(&self) -> Option<&Arc<A>> {
        self.last.as_ref()
    }
}

impl<A> Default for ActionMarker<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for ActionMarker<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionMarker")
            .field("last", &self.last.as_ref().map(Arc::as_ptr))
            .finish()
    }
}
