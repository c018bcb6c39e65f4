//! Builder API for side effect reducers.
//!
//! This module provides the fluent builder used by every constructor and the
//! factory that binds one side effect to many reducers.

pub mod error;
pub mod factory;
pub mod orchestrator;

pub use error::BuildError;
pub use factory::{create_side_effect_reducer, SideEffectReducerFactory};
pub use orchestrator::SideEffectReducerBuilder;
