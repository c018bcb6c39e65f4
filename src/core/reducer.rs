//! Pure transition functions.

use std::sync::Arc;

/// Shared pure transition function: `(state, action) -> state`.
///
/// Reducers must be deterministic and free of side effects. The host may
/// call them more than once for the same input (see [`ReplayPolicy`]).
///
/// [`ReplayPolicy`]: crate::core::ReplayPolicy
pub type Reducer<S, A> = Arc<dyn Fn(&S, &A) -> S + Send + Sync>;

/// Wrap a closure as a shared [`Reducer`].
///
/// # Example
///
/// ```rust
/// use aftermath::core::reducer;
///
/// let add = reducer(|total: &i32, n: &i32| total + n);
/// assert_eq!(add(&40, &2), 42);
/// ```
pub fn reducer<S, A, F>(f: F) -> Reducer<S, A>
where
    F: Fn(&S, &A) -> S + Send + Sync + 'static,
{
    Arc::new(f)
}
