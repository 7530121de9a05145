//! Events emitted when an object is started

use serde::{Deserialize, Serialize};

use super::candidate::CandidateId;
use crate::map::TilePos;

/// Why an object was started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationCause {
    /// The player touched it (stepped into range)
    Touch,
    /// It moved into range of the player and has finished its step
    MovementSettled,
}

/// Event emitted when an object's action should start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationEvent {
    /// The object to start
    pub candidate: CandidateId,
    /// Where the object was when it was started
    pub position: TilePos,
    /// What started it
    pub cause: ActivationCause,
}

impl ActivationEvent {
    /// The player touched an object
    pub fn touched(candidate: CandidateId, position: TilePos) -> Self {
        Self {
            candidate,
            position,
            cause: ActivationCause::Touch,
        }
    }

    /// A moving object reached the player and settled
    pub fn settled(candidate: CandidateId, position: TilePos) -> Self {
        Self {
            candidate,
            position,
            cause: ActivationCause::MovementSettled,
        }
    }
}

/// Callback type for activation events
pub type ActivationCallback = Box<dyn Fn(ActivationEvent) + Send + Sync>;

/// Registered activation callbacks, called in registration order
#[derive(Default)]
pub struct ActivationListeners {
    callbacks: Vec<ActivationCallback>,
}

impl ActivationListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a callback
    pub fn subscribe(&mut self, callback: ActivationCallback) {
        self.callbacks.push(callback);
    }

    /// Nobody is listening; callers may skip building events
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Deliver an event to every callback
    pub fn dispatch(&self, event: ActivationEvent) {
        self.callbacks.iter().for_each(|callback| callback(event));
    }
}

impl std::fmt::Debug for ActivationListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivationListeners")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_dispatch_reaches_every_listener() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = ActivationListeners::new();
        assert!(listeners.is_empty());

        for tag in ["a", "b"] {
            let seen = Arc::clone(&seen);
            listeners.subscribe(Box::new(move |event| {
                seen.lock().push((tag, event.candidate));
            }));
        }

        listeners.dispatch(ActivationEvent::touched(CandidateId(4), TilePos::new(1, 2)));

        assert_eq!(listeners.len(), 2);
        assert_eq!(*seen.lock(), vec![("a", CandidateId(4)), ("b", CandidateId(4))]);
    }

    #[test]
    fn test_event_constructors() {
        let event = ActivationEvent::settled(CandidateId(9), TilePos::new(0, 1));
        assert_eq!(event.cause, ActivationCause::MovementSettled);
        assert_eq!(event.position, TilePos::new(0, 1));
    }
}
