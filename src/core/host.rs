//! What the dispatcher needs from the host engine

use super::candidate::CandidateId;
use crate::flags::FlagStore;
use crate::map::TilePos;
use crate::triggers::TravelMode;

/// Host engine state consulted during dispatch
///
/// The switch table comes in through the [`FlagStore`] supertrait so that a
/// matched one-shot rule can latch its switch in the same pass.
pub trait Host: FlagStore {
    /// Whether an object's action is already running; all checks are skipped while it is
    fn is_event_running(&self) -> bool;

    /// Current travel mode of the player
    fn travel_mode(&self) -> TravelMode;

    /// Current tile of the player
    fn player_position(&self) -> TilePos;

    /// Whether an object is still animating a step
    fn is_moving(&self, id: CandidateId) -> bool;
}
