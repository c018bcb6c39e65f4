//! Builder for side effect reducers.

use crate::builder::error::BuildError;
use crate::core::{Reducer, ReplayPolicy};
use crate::effects::{Parts, SideEffect, SideEffectReducer};
use std::fmt;
use std::sync::Arc;
use stillwater::effect::BoxedEffect;
use tokio::runtime::Handle;

type Initializer<S> = Box<dyn FnOnce() -> S>;

/// Builder for constructing side effect reducers with a fluent API.
pub struct SideEffectReducerBuilder<S, A, E, Env> {
    reducer: Option<Reducer<S, A>>,
    effect: Option<SideEffect<S, A, E, Env>>,
    initial: Option<Initializer<S>>,
    env: Env,
    runtime: Option<Handle>,
    replay: ReplayPolicy,
}

impl<S, A, E> SideEffectReducerBuilder<S, A, E, ()>
where
    S: Clone + PartialEq + Send + Sync + 'static,
    A: Send + Sync + 'static,
    E: fmt::Display + Send + 'static,
{
    /// Create a builder for effects that need no environment.
    pub fn new() -> Self {
        Self::with_env(())
    }
}

impl<S, A, E, Env> SideEffectReducerBuilder<S, A, E, Env>
where
    S: Clone + PartialEq + Send + Sync + 'static,
    A: Send + Sync + 'static,
    E: fmt::Display + Send + 'static,
    Env: Clone + Send + Sync + 'static,
{
    /// Create a builder whose effects run against `env`.
    pub fn with_env(env: Env) -> Self {
        Self {
            reducer: None,
            effect: None,
            initial: None,
            env,
            runtime: None,
            replay: ReplayPolicy::default(),
        }
    }

    /// Set the reducer (required).
    pub fn reducer<R>(mut self, reducer: R) -> Self
    where
        R: Fn(&S, &A) -> S + Send + Sync + 'static,
    {
        self.reducer = Some(Arc::new(reducer));
        self
    }

    /// Set an already shared reducer (required, alternative to `.reducer()`).
    pub fn shared_reducer(mut self, reducer: Reducer<S, A>) -> Self {
        self.reducer = Some(reducer);
        self
    }

    /// Set the side effect factory (required).
    pub fn effect<F>(mut self, effect: F) -> Self
    where
        F: Fn(&S, &A) -> BoxedEffect<Option<A>, E, Env> + Send + Sync + 'static,
    {
        self.effect = Some(Arc::new(effect));
        self
    }

    /// Set an already shared side effect factory.
    pub fn shared_effect(mut self, effect: SideEffect<S, A, E, Env>) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Set the initial state.
    pub fn initial_state(mut self, state: S) -> Self {
        self.initial = Some(Box::new(move || state));
        self
    }

    /// Derive the initial state lazily as `initializer(init_arg)`.
    /// Replaces any state set with `.initial_state()`.
    pub fn initializer<I, G>(mut self, init_arg: I, initializer: G) -> Self
    where
        I: 'static,
        G: FnOnce(I) -> S + 'static,
    {
        self.initial = Some(Box::new(move || initializer(init_arg)));
        self
    }

    /// Spawn effects on `handle` instead of the ambient runtime.
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// Set how many times each transition runs per dispatch.
    pub fn replay(mut self, replay: ReplayPolicy) -> Self {
        self.replay = replay;
        self
    }

    /// Build the instance.
    /// Returns an error if required fields are missing or no runtime is
    /// reachable. The initializer only runs when everything else is valid.
    pub fn build(self) -> Result<SideEffectReducer<S, A, E, Env>, BuildError> {
        let reducer = self.reducer.ok_or(BuildError::MissingReducer)?;
        let effect = self.effect.ok_or(BuildError::MissingEffect)?;
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        let runtime = match self.runtime {
            Some(handle) => handle,
            None => Handle::try_current().map_err(|_| BuildError::NoRuntime)?,
        };

        Ok(SideEffectReducer::from_parts(Parts {
            reducer,
            effect,
            env: self.env,
            runtime,
            replay: self.replay,
            initial_state: initial(),
        }))
    }
}

impl<S, A, E> Default for SideEffectReducerBuilder<S, A, E, ()>
where
    S: Clone + PartialEq + Send + Sync + 'static,
    A: Send + Sync + 'static,
    E: fmt::Display + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
