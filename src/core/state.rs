//! Dispatcher state snapshot

use serde::{Deserialize, Serialize};

use super::candidate::CandidateId;

/// Serializable summary of a [`TriggerMap`](super::TriggerMap)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DispatcherState {
    /// Number of registered objects
    pub candidates: usize,
    /// Objects carrying a distance rule
    pub rule_candidates: usize,
    /// Objects waiting for their movement to settle before starting
    pub pending_starts: Vec<CandidateId>,
    /// Objects started since the map was created or reset
    pub activations: u64,
}

impl DispatcherState {
    /// Check if an object is waiting to start
    pub fn is_pending(&self, id: CandidateId) -> bool {
        self.pending_starts.contains(&id)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_json() {
        let state = DispatcherState {
            candidates: 3,
            rule_candidates: 1,
            pending_starts: vec![CandidateId(2)],
            activations: 5,
        };

        let json = state.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["candidates"], 3);
        assert_eq!(value["pending_starts"][0], 2);
        assert_eq!(value["activations"], 5);
        assert!(state.is_pending(CandidateId(2)));
        assert!(!state.is_pending(CandidateId(3)));
    }
}
