//! Map objects subject to activation

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::map::TilePos;
use crate::triggers::TriggerRule;

/// Host-assigned object identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(pub u32);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which kind of contact normally starts an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivationKind {
    /// The player moves onto (or into range of) the object
    ActorTouch,
    /// The object moves onto (or into range of) the player
    ObjectTouch,
}

impl ActivationKind {
    /// The opposite kind
    pub fn other(self) -> Self {
        match self {
            ActivationKind::ActorTouch => ActivationKind::ObjectTouch,
            ActivationKind::ObjectTouch => ActivationKind::ActorTouch,
        }
    }
}

/// A map object as seen by the dispatcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,

    /// Last position reported by the host
    pub position: TilePos,

    /// Native activation kind of the active page
    pub kind: ActivationKind,

    /// Distance rule of the active page, `None` for plain exact-tile objects
    pub rule: Option<TriggerRule>,

    /// Object blocks movement ("same as characters" priority)
    pub blocks_movement: bool,

    /// Matched while moving; start once the step settles
    #[serde(default)]
    pub(crate) pending_start: bool,
}

impl Candidate {
    /// Create a plain exact-tile object
    pub fn new(id: CandidateId, position: TilePos, kind: ActivationKind) -> Self {
        Self {
            id,
            position,
            kind,
            rule: None,
            blocks_movement: false,
            pending_start: false,
        }
    }

    /// Attach a distance rule
    pub fn with_rule(mut self, rule: TriggerRule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Mark the object as blocking movement
    pub fn blocking(mut self) -> Self {
        self.blocks_movement = true;
        self
    }

    /// Whether a start is waiting for movement to settle
    pub fn is_pending_start(&self) -> bool {
        self.pending_start
    }

    /// Rule to evaluate for a query of the given kind
    ///
    /// `None` means the object falls back to exact-tile matching: it has no
    /// rule, or the query kind is not its own and it did not opt into combo.
    pub(crate) fn rule_for(&self, kind: ActivationKind) -> Option<&TriggerRule> {
        self.rule
            .as_ref()
            .filter(|rule| self.kind == kind || rule.combo)
    }
}
