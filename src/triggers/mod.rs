//! Distance trigger rules
//!
//! This module turns an object's tag text into a [`TriggerRule`] and decides
//! whether a position is in range of it.

mod evaluator;
mod parser;
mod types;

pub use evaluator::{EvalOutcome, RangeEvaluator};
pub use parser::{extract_tag, parse_rule};
pub use types::{ModeSet, TravelMode, TriggerRule};
