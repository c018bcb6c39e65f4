//! The effectful shell around the pure reducer.
//!
//! This module runs side effects after transitions and feeds their
//! follow-up actions back into the same instance.
//!
//! # Key Concepts
//!
//! - **Side effects**: Stillwater effects produced per transition from the
//!   new state and the action
//! - **Orchestrator**: Applies transitions in dispatch order, schedules one
//!   effect per action identity, and re-dispatches follow-ups
//! - **Dispatch handles**: Weak, cloneable entry points that go quiet once
//!   the instance is dropped

mod dispatch;
mod orchestrator;
mod side_effect;

pub use dispatch::Dispatch;
pub use orchestrator::SideEffectReducer;
pub(crate) use orchestrator::Parts;
pub use side_effect::{follow_up, no_follow_up, side_effect, SideEffect};
