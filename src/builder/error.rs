//! Build errors for side effect reducers.

use thiserror::Error;

/// Errors that can occur when building a side effect reducer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Reducer not specified. Call .reducer(f) before .build()")]
    MissingReducer,

    #[error("Side effect not specified. Call .effect(f) before .build()")]
    MissingEffect,

    #[error("Initial state not specified. Call .initial_state(state) or .initializer(arg, f)")]
    MissingInitialState,

    #[error("No tokio runtime available. Build inside a runtime or call .runtime(handle)")]
    NoRuntime,
}
