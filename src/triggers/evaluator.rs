//! Range evaluation of a trigger rule against a query position

use super::types::{TravelMode, TriggerRule};
use crate::flags::FlagStore;
use crate::map::{MapTopology, TilePos};

/// Result of evaluating one rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvalOutcome {
    /// Whether the query position is in range
    pub matched: bool,
    /// Switch the caller should turn on because the rule matched
    pub flag_to_set: Option<u32>,
}

impl EvalOutcome {
    /// Not in range
    pub const MISS: EvalOutcome = EvalOutcome {
        matched: false,
        flag_to_set: None,
    };
}

/// Evaluates trigger rules on a given map
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeEvaluator {
    topology: MapTopology,
}

impl RangeEvaluator {
    /// Create a new evaluator for the given map
    pub fn new(topology: MapTopology) -> Self {
        Self { topology }
    }

    pub fn topology(&self) -> &MapTopology {
        &self.topology
    }

    /// Evaluate a rule for an object at `candidate` against `query`
    ///
    /// Reads the rule's switch but never writes it; a match reports the
    /// switch in [`EvalOutcome::flag_to_set`] for the caller to apply.
    pub fn evaluate<F: FlagStore + ?Sized>(
        &self,
        rule: &TriggerRule,
        candidate: TilePos,
        query: TilePos,
        mode: TravelMode,
        flags: &F,
    ) -> EvalOutcome {
        if !rule.modes.contains(mode) {
            return EvalOutcome::MISS;
        }

        // Switch 0 is "no binding" even when the rule was built by hand
        let flag_id = rule.flag_id.filter(|&id| id > 0);
        if flag_id.is_some_and(|id| flags.value(id)) {
            return EvalOutcome::MISS;
        }

        if !self.in_shape(rule, candidate, query) {
            return EvalOutcome::MISS;
        }

        EvalOutcome {
            matched: true,
            flag_to_set: flag_id,
        }
    }

    /// Shape tests only, ignoring mode and switch gates
    pub fn in_shape(&self, rule: &TriggerRule, candidate: TilePos, query: TilePos) -> bool {
        let dx = self.topology.delta_x(candidate.x, query.x).unsigned_abs();
        let dy = self.topology.delta_y(candidate.y, query.y).unsigned_abs();
        let distance = self.topology.distance(candidate, query);

        let by_radius = rule.radius.is_some_and(|r| distance <= r);

        let by_axes = match (rule.axis_x, rule.axis_y) {
            (Some(ax), Some(ay)) => dx <= ax && dy <= ay,
            (Some(ax), None) => distance <= ax && dy == 0,
            (None, Some(ay)) => distance <= ay && dx == 0,
            (None, None) => false,
        };

        by_radius || by_axes
    }
}
