//! Pure building blocks of the orchestrator.
//!
//! This module contains the parts that never suspend and never touch the
//! runtime:
//! - Reducers as shared pure functions
//! - The identity marker that suppresses duplicate effect scheduling
//! - The host replay policy
//! - Instance identifiers for diagnostics

mod instance;
mod marker;
mod reducer;
mod replay;

pub use instance::InstanceId;
pub use marker::ActionMarker;
pub use reducer::{reducer, Reducer};
pub use replay::ReplayPolicy;
