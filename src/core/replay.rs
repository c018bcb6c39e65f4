//! How many times the host runs a transition for one dispatch.

/// Host policy for re-running transitions.
///
/// Some hosts run update functions more than once per logical update to
/// check that they are pure. `Twice` reproduces that: the transition runs two
/// times against the same previous state and action, and the result of the
/// last run is committed. Side effects must still be scheduled only once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReplayPolicy {
    /// Run each transition once
    #[default]
    Once,

    /// Run each transition twice, keeping the second result
    Twice,
}

impl ReplayPolicy {
    /// Number of transition runs per dispatch.
    pub fn passes(self) -> usize {
        match self {
            Self::Once => 1,
            Self::Twice => 2,
        }
    }
}
