//! Identifiers for orchestrator instances.

use std::fmt;
use uuid::Uuid;

/// Unique identity of one orchestrator instance.
///
/// Only used to tell instances apart in log output; instances never share
/// state, so the id carries no behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InstanceId(Uuid);

impl InstanceId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(InstanceId::new(), InstanceId::new());
    }

    #[test]
    fn display_matches_uuid() {
        let id = InstanceId::new();
        assert_eq!(id.to_string(), id.as_uuid().to_string());
    }
}
