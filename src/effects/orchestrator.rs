//! Reducer instance that runs a side effect after every transition.

use crate::builder::{BuildError, SideEffectReducerBuilder};
use crate::core::{ActionMarker, InstanceId, Reducer, ReplayPolicy};
use crate::effects::dispatch::Dispatch;
use crate::effects::side_effect::SideEffect;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, trace, warn};

/// A reducer whose transitions are each followed by an asynchronous effect.
///
/// Every dispatched action runs the reducer synchronously, then hands the new
/// state and the same action to the effect factory. The effect runs on the
/// tokio runtime; when it yields a follow-up action, that action is
/// dispatched on this instance and the cycle repeats.
///
/// The instance owns its state slot and its action marker. Dropping it tears
/// the instance down: outstanding [`Dispatch`] handles and in-flight effects
/// become no-ops.
///
/// # Example
///
/// ```rust
/// use aftermath::effects::{follow_up, no_follow_up, SideEffectReducer};
///
/// #[derive(Debug)]
/// enum Action {
///     Start,
///     Finish,
/// }
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let machine = SideEffectReducer::new(
///     |steps: &u32, _: &Action| steps + 1,
///     |_: &u32, action: &Action| match action {
///         Action::Start => follow_up::<_, String, ()>(Action::Finish),
///         Action::Finish => no_follow_up(),
///     },
///     0,
/// )
/// .unwrap();
///
/// let mut updates = machine.subscribe();
/// machine.dispatch(Action::Start);
/// assert_eq!(machine.state(), 1);
///
/// updates.wait_for(|steps| *steps == 2).await.unwrap();
/// # });
/// ```
pub struct SideEffectReducer<S, A, E = Infallible, Env = ()> {
    inner: Arc<Inner<S, A, E, Env>>,
}

/// Shared core of one instance. Dispatchers and effect tasks hold it weakly.
pub(crate) struct Inner<S, A, E, Env> {
    id: InstanceId,
    reducer: Reducer<S, A>,
    effect: SideEffect<S, A, E, Env>,
    env: Env,
    runtime: Handle,
    replay: ReplayPolicy,
    state: watch::Sender<S>,
    // Lives beside the state rather than in it, so updating it never wakes
    // subscribers. The mutex doubles as the update lane.
    lane: Mutex<ActionMarker<A>>,
    pending: Mutex<VecDeque<Arc<A>>>,
}

/// Everything a built instance is made from.
pub(crate) struct Parts<S, A, E, Env> {
    pub reducer: Reducer<S, A>,
    pub effect: SideEffect<S, A, E, Env>,
    pub env: Env,
    pub runtime: Handle,
    pub replay: ReplayPolicy,
    pub initial_state: S,
}

impl<S, A, E> SideEffectReducer<S, A, E, ()>
where
    S: Clone + PartialEq + Send + Sync + 'static,
    A: Send + Sync + 'static,
    E: fmt::Display + Send + 'static,
{
    /// Create an instance from a reducer, an effect factory and an initial
    /// state, on the ambient tokio runtime.
    pub fn new<R, F>(reducer: R, effect: F, initial_state: S) -> Result<Self, BuildError>
    where
        R: Fn(&S, &A) -> S + Send + Sync + 'static,
        F: Fn(&S, &A) -> BoxedEffect<Option<A>, E, ()> + Send + Sync + 'static,
    {
        SideEffectReducerBuilder::new()
            .reducer(reducer)
            .effect(effect)
            .initial_state(initial_state)
            .build()
    }

    /// Create an instance whose initial state is `initializer(init_arg)`.
    ///
    /// The initializer runs once, while the instance is being built.
    pub fn with_initializer<R, F, I, G>(
        reducer: R,
        effect: F,
        init_arg: I,
        initializer: G,
    ) -> Result<Self, BuildError>
    where
        R: Fn(&S, &A) -> S + Send + Sync + 'static,
        F: Fn(&S, &A) -> BoxedEffect<Option<A>, E, ()> + Send + Sync + 'static,
        I: 'static,
        G: FnOnce(I) -> S + 'static,
    {
        SideEffectReducerBuilder::new()
            .reducer(reducer)
            .effect(effect)
            .initializer(init_arg, initializer)
            .build()
    }
}

impl<S, A, E, Env> SideEffectReducer<S, A, E, Env>
where
    S: Clone + PartialEq + Send + Sync + 'static,
    A: Send + Sync + 'static,
    E: fmt::Display + Send + 'static,
    Env: Clone + Send + Sync + 'static,
{
    pub(crate) fn from_parts(parts: Parts<S, A, E, Env>) -> Self {
        let (state, _) = watch::channel(parts.initial_state);
        let inner = Inner {
            id: InstanceId::new(),
            reducer: parts.reducer,
            effect: parts.effect,
            env: parts.env,
            runtime: parts.runtime,
            replay: parts.replay,
            state,
            lane: Mutex::new(ActionMarker::new()),
            pending: Mutex::new(VecDeque::new()),
        };
        debug!(instance = %inner.id, replay = ?inner.replay, "side effect reducer created");
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Start configuring an instance with an environment for its effects.
    pub fn builder(env: Env) -> SideEffectReducerBuilder<S, A, E, Env> {
        SideEffectReducerBuilder::with_env(env)
    }

    pub fn id(&self) -> InstanceId {
        self.inner.id
    }

    pub fn replay(&self) -> ReplayPolicy {
        self.inner.replay
    }

    /// Snapshot of the current committed state.
    pub fn state(&self) -> S {
        self.inner.state.borrow().clone()
    }

    /// Watch committed state.
    ///
    /// The receiver is notified only when a transition commits a state that
    /// differs from the previous one.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.inner.state.subscribe()
    }

    /// A cloneable handle for dispatching into this instance.
    pub fn dispatcher(&self) -> Dispatch<S, A, E, Env> {
        Dispatch::new(Arc::downgrade(&self.inner))
    }

    /// The current state together with a dispatcher.
    pub fn parts(&self) -> (S, Dispatch<S, A, E, Env>) {
        (self.state(), self.dispatcher())
    }

    /// Submit an action.
    ///
    /// The reducer runs before this returns, unless another dispatch is being
    /// applied at the same moment, in which case this one is applied right
    /// after it.
    pub fn dispatch(&self, action: A) {
        self.inner.enqueue(Arc::new(action));
    }

    /// Submit an action whose identity the caller controls.
    ///
    /// Dispatching the same `Arc` twice in a row runs the reducer twice but
    /// schedules its side effect only once.
    pub fn dispatch_shared(&self, action: Arc<A>) {
        self.inner.enqueue(action);
    }
}

impl<S, A, E, Env> Drop for SideEffectReducer<S, A, E, Env> {
    fn drop(&mut self) {
        debug!(instance = %self.inner.id, "side effect reducer torn down");
    }
}

impl<S, A, E, Env> fmt::Debug for SideEffectReducer<S, A, E, Env>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SideEffectReducer")
            .field("id", &self.inner.id)
            .field("replay", &self.inner.replay)
            .field("state", &*self.inner.state.borrow())
            .finish()
    }
}

impl<S, A, E, Env> Inner<S, A, E, Env>
where
    S: Clone + PartialEq + Send + Sync + 'static,
    A: Send + Sync + 'static,
    E: fmt::Display + Send + 'static,
    Env: Clone + Send + Sync + 'static,
{
    pub(crate) fn id(&self) -> InstanceId {
        self.id
    }

    /// Queue `action` and drain the queue if no other caller is draining it.
    pub(crate) fn enqueue(self: &Arc<Self>, action: Arc<A>) {
        lock(&self.pending).push_back(action);

        // First reducer panic seen while draining, re-raised once the queue
        // is empty so callers that got `WouldBlock` are not stranded.
        let mut failure = None;

        loop {
            let mut marker = match self.lane.try_lock() {
                Ok(guard) => guard,
                Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
                Err(TryLockError::WouldBlock) => break,
            };

            while let Some(action) = self.next_pending() {
                let applied =
                    panic::catch_unwind(AssertUnwindSafe(|| self.apply(&mut marker, action)));
                if let Err(payload) = applied {
                    // Nothing was committed for this action.
                    warn!(instance = %self.id, "reducer panicked, transition aborted");
                    if failure.is_none() {
                        failure = Some(payload);
                    }
                }
            }
            drop(marker);

            // Another caller may have queued after our last pop but failed to
            // take the lane before we released it.
            if !self.has_pending() {
                break;
            }
        }

        if let Some(payload) = failure {
            panic::resume_unwind(payload);
        }
    }

    fn next_pending(&self) -> Option<Arc<A>> {
        lock(&self.pending).pop_front()
    }

    fn has_pending(&self) -> bool {
        !lock(&self.pending).is_empty()
    }

    /// Run the transition as many times as the host policy asks, then commit.
    fn apply(self: &Arc<Self>, marker: &mut ActionMarker<A>, action: Arc<A>) {
        let previous = self.state.borrow().clone();

        let mut next = self.transition(marker, &previous, &action);
        for _ in 1..self.replay.passes() {
            next = self.transition(marker, &previous, &action);
        }

        let changed = self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
        trace!(instance = %self.id, changed, "transition committed");
    }

    /// The wrapper handed to the host: reduce, then schedule the effect once
    /// per action identity.
    fn transition(
        self: &Arc<Self>,
        marker: &mut ActionMarker<A>,
        previous: &S,
        action: &Arc<A>,
    ) -> S {
        let next = (self.reducer)(previous, &**action);

        if marker.is_marked(action) {
            trace!(instance = %self.id, "side effect already scheduled for this action");
        } else {
            self.schedule(&next, action);
            marker.mark(action);
        }

        next
    }

    fn schedule(self: &Arc<Self>, state: &S, action: &A) {
        let effect = (self.effect)(state, action);
        let env = self.env.clone();
        let dispatch = Dispatch::new(Arc::downgrade(self));
        let id = self.id;

        debug!(instance = %id, "side effect scheduled");
        self.runtime.spawn(async move {
            match effect.run(&env).await {
                Ok(Some(next)) => {
                    trace!(instance = %id, "side effect produced a follow-up action");
                    dispatch.dispatch(next);
                }
                Ok(None) => trace!(instance = %id, "side effect chain ended"),
                Err(error) => {
                    warn!(instance = %id, %error, "side effect failed; no follow-up action");
                }
            }
        });
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
