//! Aftermath: reducers with asynchronous follow-up side effects
//!
//! Aftermath keeps Stillwater's "pure core, imperative shell" split. State
//! changes happen in a pure reducer; everything that talks to the outside
//! world happens afterwards, in an effect that sees the new state and may
//! produce one follow-up action.
//!
//! # Core Concepts
//!
//! - **Reducer**: Pure `(state, action) -> state` function
//! - **Side effect**: Stillwater effect built from the new state and the
//!   action, yielding `Some(action)` to continue or `None` to stop
//! - **Action identity**: Effects are scheduled once per action allocation,
//!   even when the host runs a transition more than once
//! - **Dispatch**: Weak handle that feeds actions, including follow-ups,
//!   into one instance
//!
//! # Example
//!
//! ```rust
//! use aftermath::builder::create_side_effect_reducer;
//! use aftermath::effects::{follow_up, no_follow_up};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Search {
//!     pending: bool,
//!     hits: Vec<String>,
//! }
//!
//! #[derive(Debug)]
//! enum Action {
//!     Query(String),
//!     Results(Vec<String>),
//! }
//!
//! fn reduce(state: &Search, action: &Action) -> Search {
//!     match action {
//!         Action::Query(_) => Search { pending: true, ..state.clone() },
//!         Action::Results(hits) => Search { pending: false, hits: hits.clone() },
//!     }
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let search = create_side_effect_reducer(|_: &Search, action: &Action| match action {
//!     Action::Query(q) => follow_up::<_, String, ()>(Action::Results(vec![q.to_uppercase()])),
//!     Action::Results(_) => no_follow_up(),
//! });
//!
//! let machine = search
//!     .create(reduce, Search { pending: false, hits: vec![] })
//!     .unwrap();
//! let mut updates = machine.subscribe();
//!
//! machine.dispatch(Action::Query("rust".to_string()));
//! assert!(machine.state().pending);
//!
//! let done = updates.wait_for(|s| !s.pending).await.unwrap().clone();
//! assert_eq!(done.hits, vec!["RUST".to_string()]);
//! # });
//! ```

pub mod builder;
pub mod core;
pub mod effects;

// Re-export commonly used types
pub use builder::{create_side_effect_reducer, BuildError, SideEffectReducerBuilder};
pub use core::{ActionMarker, InstanceId, ReplayPolicy};
pub use effects::{follow_up, no_follow_up, Dispatch, SideEffectReducer};
