//! Reusable constructors that bind one side effect to many reducers.

use crate::builder::error::BuildError;
use crate::builder::orchestrator::SideEffectReducerBuilder;
use crate::core::ReplayPolicy;
use crate::effects::{SideEffect, SideEffectReducer};
use std::fmt;
use std::sync::Arc;
use stillwater::effect::BoxedEffect;
use tokio::runtime::Handle;

/// Constructor with a side effect already bound.
///
/// Every call to [`create`](Self::create) produces a fully independent
/// instance: its own state, its own action marker. Only the effect factory
/// and the environment are shared.
pub struct SideEffectReducerFactory<S, A, E, Env> {
    effect: SideEffect<S, A, E, Env>,
    env: Env,
    runtime: Option<Handle>,
    replay: ReplayPolicy,
}

/// Bind `effect` into a reusable constructor.
///
/// # Example
///
/// ```rust
/// use aftermath::builder::create_side_effect_reducer;
/// use aftermath::effects::no_follow_up;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let factory = create_side_effect_reducer(|_: &i32, _: &i32| no_follow_up::<i32, String, ()>());
///
/// let first = factory.create(|total: &i32, n: &i32| total + n, 0).unwrap();
/// let second = factory.create(|total: &i32, n: &i32| total * n, 1).unwrap();
///
/// first.dispatch(5);
/// second.dispatch(5);
/// assert_eq!((first.state(), second.state()), (5, 5));
/// # });
/// ```
pub fn create_side_effect_reducer<S, A, E, F>(effect: F) -> SideEffectReducerFactory<S, A, E, ()>
where
    S: Clone + PartialEq + Send + Sync + 'static,
    A: Send + Sync + 'static,
    E: fmt::Display + Send + 'static,
    F: Fn(&S, &A) -> BoxedEffect<Option<A>, E, ()> + Send + Sync + 'static,
{
    SideEffectReducerFactory::with_env(effect, ())
}

impl<S, A, E, Env> SideEffectReducerFactory<S, A, E, Env>
where
    S: Clone + PartialEq + Send + Sync + 'static,
    A: Send + Sync + 'static,
    E: fmt::Display + Send + 'static,
    Env: Clone + Send + Sync + 'static,
{
    /// Bind `effect` together with the environment it runs against.
    pub fn with_env<F>(effect: F, env: Env) -> Self
    where
        F: Fn(&S, &A) -> BoxedEffect<Option<A>, E, Env> + Send + Sync + 'static,
    {
        Self {
            effect: Arc::new(effect),
            env,
            runtime: None,
            replay: ReplayPolicy::default(),
        }
    }

    /// Spawn effects of created instances on `handle`.
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// Replay policy for created instances.
    pub fn replay(mut self, replay: ReplayPolicy) -> Self {
        self.replay = replay;
        self
    }

    /// A builder pre-filled with this factory's effect and settings.
    pub fn builder(&self) -> SideEffectReducerBuilder<S, A, E, Env> {
        let builder = SideEffectReducerBuilder::with_env(self.env.clone())
            .shared_effect(Arc::clone(&self.effect))
            .replay(self.replay);
        match &self.runtime {
            Some(handle) => builder.runtime(handle.clone()),
            None => builder,
        }
    }

    /// Create an instance running `reducer` from `initial_state`.
    pub fn create<R>(
        &self,
        reducer: R,
        initial_state: S,
    ) -> Result<SideEffectReducer<S, A, E, Env>, BuildError>
    where
        R: Fn(&S, &A) -> S + Send + Sync + 'static,
    {
        self.builder()
            .reducer(reducer)
            .initial_state(initial_state)
            .build()
    }

    /// Create an instance whose initial state is `initializer(init_arg)`.
    pub fn create_with<R, I, G>(
        &self,
        reducer: R,
        init_arg: I,
        initializer: G,
    ) -> Result<SideEffectReducer<S, A, E, Env>, BuildError>
    where
        R: Fn(&S, &A) -> S + Send + Sync + 'static,
        I: 'static,
        G: FnOnce(I) -> S + 'static,
    {
        self.builder()
            .reducer(reducer)
            .initializer(init_arg, initializer)
            .build()
    }
}

impl<S, A, E, Env: Clone> Clone for SideEffectReducerFactory<S, A, E, Env> {
    fn clone(&self) -> Self {
        Self {
            effect: Arc::clone(&self.effect),
            env: self.env.clone(),
            runtime: self.runtime.clone(),
            replay: self.replay,
        }
    }
}
