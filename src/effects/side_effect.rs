//! Side effect factories run after each transition.

use std::sync::Arc;
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;

/// Factory for the effect that follows a transition.
///
/// Called with the post-transition state and the action that produced it.
/// The factory itself runs synchronously inside the transition; the effect it
/// returns runs later on the async runtime. Its output decides what happens
/// next:
///
/// - `Ok(Some(action))` dispatches `action` on the same instance
/// - `Ok(None)` ends the chain
/// - `Err(error)` ends the chain without a follow-up action
pub type SideEffect<S, A, E, Env> =
    Arc<dyn Fn(&S, &A) -> BoxedEffect<Option<A>, E, Env> + Send + Sync>;

/// Wrap a closure as a shared [`SideEffect`].
pub fn side_effect<S, A, E, Env, F>(f: F) -> SideEffect<S, A, E, Env>
where
    F: Fn(&S, &A) -> BoxedEffect<Option<A>, E, Env> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Effect that ends the chain without doing anything.
///
/// # Example
///
/// ```rust
/// use aftermath::effects::no_follow_up;
/// use stillwater::prelude::*;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let effect = no_follow_up::<u32, String, ()>();
/// assert_eq!(effect.run(&()).await, Ok(None));
/// # });
/// ```
pub fn no_follow_up<A, E, Env>() -> BoxedEffect<Option<A>, E, Env>
where
    A: Send + 'static,
    E: Send + 'static,
    Env: Clone + Send + Sync + 'static,
{
    pure(None).boxed()
}

/// Effect that immediately yields `action` as the follow-up.
pub fn follow_up<A, E, Env>(action: A) -> BoxedEffect<Option<A>, E, Env>
where
    A: Send + 'static,
    E: Send + 'static,
    Env: Clone + Send + Sync + 'static,
{
    pure(Some(action)).boxed()
}
