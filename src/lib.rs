//! Trigger Distance
//!
//! Distance based activation for tile map events. A map object normally
//! fires only when something steps onto its exact tile; tagging one of its
//! page comments with `<TriggerDistance: ...>` lets it fire within a radius,
//! along an axis band, or inside a rectangle around its position, gated by
//! travel mode and an optional one-shot switch.
//!
//! The crate is an embedding layer. The host engine owns the map, the
//! objects, and the switch table, and calls into [`TriggerMap`] at a few
//! well defined points:
//! - [`TriggerMap::on_configuration_loaded`] when an object's active page changes
//! - [`TriggerMap::on_position_query`] in place of its own exact-tile lookup
//! - [`TriggerMap::on_candidate_moved`] after each successful movement step
//! - [`TriggerMap::on_candidate_movement_settled`] when a step finishes animating
//!
//! ```
//! use trigger_distance::{parse_rule, TilePos, TravelMode, RangeEvaluator, MapTopology, SwitchTable};
//!
//! let rule = parse_rule("r2 s12 airship");
//! let evaluator = RangeEvaluator::new(MapTopology::bounded(20, 15));
//! let switches = SwitchTable::new();
//!
//! let outcome = evaluator.evaluate(
//!     &rule,
//!     TilePos::new(5, 5),
//!     TilePos::new(6, 6),
//!     TravelMode::Airship,
//!     &switches,
//! );
//! assert!(outcome.matched);
//! assert_eq!(outcome.flag_to_set, Some(12));
//! ```

pub mod config;
pub mod core;
pub mod flags;
pub mod map;
pub mod triggers;

// Re-export commonly used types
pub use config::{MapConfig, TriggerSettings};
pub use crate::core::{
    ActivationCause, ActivationEvent, ActivationKind, Candidate, CandidateId, DispatcherState,
    Host, TriggerMap,
};
pub use flags::{FlagStore, SharedSwitches, SwitchTable};
pub use map::{MapTopology, TilePos};
pub use triggers::{
    extract_tag, parse_rule, EvalOutcome, ModeSet, RangeEvaluator, TravelMode, TriggerRule,
};

/// Errors surfaced by the host-facing registry and configuration API.
///
/// Rule parsing and range evaluation never fail; malformed tags degrade to
/// defaults instead.
#[derive(Debug, thiserror::Error)]
pub enum TriggerError {
    #[error("unknown candidate: {0}")]
    UnknownCandidate(CandidateId),

    #[error("candidate already registered: {0}")]
    DuplicateCandidate(CandidateId),

    #[error("invalid map dimensions {width}x{height}: looping axes need a nonzero length")]
    InvalidMap { width: u32, height: u32 },

    #[error("failed to parse settings: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, TriggerError>;
