//! Activation dispatch
//!
//! This module contains the host-facing side of the crate:
//! - `Candidate` - A map object and its parsed rule
//! - `TriggerMap` - Dispatcher answering position queries and movement notifications
//! - `Host` - What the dispatcher reads from the host engine
//! - `ActivationEvent` - Emitted when an object should start

mod candidate;
mod dispatcher;
mod events;
mod host;
mod state;

pub use candidate::{ActivationKind, Candidate, CandidateId};
pub use dispatcher::TriggerMap;
pub use events::{ActivationCallback, ActivationCause, ActivationEvent, ActivationListeners};
pub use host::Host;
pub use state::DispatcherState;
