//! Cloneable dispatch handles.

use crate::effects::orchestrator::Inner;
use std::convert::Infallible;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::debug;

/// Handle for submitting actions to a [`SideEffectReducer`].
///
/// Holds the instance weakly. Once the instance is dropped, dispatching is a
/// silent no-op, which is also what happens to follow-up actions of effects
/// that finish after teardown.
///
/// [`SideEffectReducer`]: crate::effects::SideEffectReducer
pub struct Dispatch<S, A, E = Infallible, Env = ()> {
    inner: Weak<Inner<S, A, E, Env>>,
}

impl<S, A, E, Env> Dispatch<S, A, E, Env>
where
    S: Clone + PartialEq + Send + Sync + 'static,
    A: Send + Sync + 'static,
    E: fmt::Display + Send + 'static,
    Env: Clone + Send + Sync + 'static,
{
    pub(crate) fn new(inner: Weak<Inner<S, A, E, Env>>) -> Self {
        Self { inner }
    }

    /// Submit an action, see [`SideEffectReducer::dispatch`].
    ///
    /// [`SideEffectReducer::dispatch`]: crate::effects::SideEffectReducer::dispatch
    pub fn dispatch(&self, action: A) {
        self.dispatch_shared(Arc::new(action));
    }

    /// Submit an action with caller-controlled identity.
    pub fn dispatch_shared(&self, action: Arc<A>) {
        match self.inner.upgrade() {
            Some(inner) => inner.enqueue(action),
            None => debug!("dispatch to a torn-down side effect reducer dropped"),
        }
    }
}

impl<S, A, E, Env> Dispatch<S, A, E, Env> {
    /// Whether the instance behind this handle still exists.
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl<S, A, E, Env> Clone for Dispatch<S, A, E, Env> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<S, A, E, Env> fmt::Debug for Dispatch<S, A, E, Env>
where
    S: Clone + PartialEq + Send + Sync + 'static,
    A: Send + Sync + 'static,
    E: fmt::Display + Send + 'static,
    Env: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let instance = self.inner.upgrade().map(|inner| inner.id());
        f.debug_struct("Dispatch")
            .field("instance", &instance)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::effects::{no_follow_up, SideEffectReducer};

    fn counter() -> SideEffectReducer<u32, u32, String> {
        SideEffectReducer::new(
            |total: &u32, n: &u32| total + n,
            |_: &u32, _: &u32| no_follow_up(),
            0,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn cloned_dispatchers_target_the_same_instance() {
        let machine = counter();
        let first = machine.dispatcher();
        let second = first.clone();

        first.dispatch(2);
        second.dispatch(3);

        assert_eq!(machine.state(), 5);
    }

    #[tokio::test]
    async fn dispatch_after_teardown_is_a_no_op() {
        let machine = counter();
        let dispatch = machine.dispatcher();
        assert!(dispatch.is_alive());

        drop(machine);

        assert!(!dispatch.is_alive());
        dispatch.dispatch(1);
    }

    #[tokio::test]
    async fn dispatch_from_another_thread() {
        let machine = counter();
        let dispatch = machine.dispatcher();

        std::thread::spawn(move || dispatch.dispatch(7))
            .join()
            .unwrap();

        assert_eq!(machine.state(), 7);
    }
}
