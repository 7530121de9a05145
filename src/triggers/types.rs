//! Trigger rule type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the moving party is currently getting around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TravelMode {
    /// On foot
    Walk,
    /// Small water vehicle
    Boat,
    /// Large water vehicle
    Ship,
    /// Flying vehicle
    Airship,
}

impl TravelMode {
    /// All modes, in keyword order
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Walk,
        TravelMode::Boat,
        TravelMode::Ship,
        TravelMode::Airship,
    ];

    /// Mode for a tag keyword (already lowercased)
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "walk" => Some(TravelMode::Walk),
            "boat" => Some(TravelMode::Boat),
            "ship" => Some(TravelMode::Ship),
            "airship" => Some(TravelMode::Airship),
            _ => None,
        }
    }

    /// Tag keyword for this mode
    pub fn keyword(&self) -> &'static str {
        match self {
            TravelMode::Walk => "walk",
            TravelMode::Boat => "boat",
            TravelMode::Ship => "ship",
            TravelMode::Airship => "airship",
        }
    }

    fn bit(self) -> u8 {
        match self {
            TravelMode::Walk => 0b0001,
            TravelMode::Boat => 0b0010,
            TravelMode::Ship => 0b0100,
            TravelMode::Airship => 0b1000,
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Set of travel modes a rule fires for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ModeSet {
    bits: u8,
}

impl ModeSet {
    /// No modes
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Every mode
    pub const fn all() -> Self {
        Self { bits: 0b1111 }
    }

    /// Add a mode
    pub fn insert(&mut self, mode: TravelMode) {
        self.bits |= mode.bit();
    }

    /// Builder form of [`ModeSet::insert`]
    pub fn with(mut self, mode: TravelMode) -> Self {
        self.insert(mode);
        self
    }

    /// Check whether a mode is allowed
    pub fn contains(&self, mode: TravelMode) -> bool {
        self.bits & mode.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Allowed modes in keyword order
    pub fn iter(&self) -> impl Iterator<Item = TravelMode> + '_ {
        TravelMode::ALL.into_iter().filter(move |m| self.contains(*m))
    }
}

impl FromIterator<TravelMode> for ModeSet {
    fn from_iter<I: IntoIterator<Item = TravelMode>>(iter: I) -> Self {
        let mut set = ModeSet::empty();
        for mode in iter {
            set.insert(mode);
        }
        set
    }
}

/// A parsed distance rule
///
/// Magnitudes of `None` are unset and take no part in matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRule {
    /// Manhattan radius around the object
    pub radius: Option<u32>,

    /// Horizontal reach; a band on the object's row unless `axis_y` is also set
    pub axis_x: Option<u32>,

    /// Vertical reach; a band on the object's column unless `axis_x` is also set
    pub axis_y: Option<u32>,

    /// One-shot switch: turned on when the rule matches, and the rule stays
    /// silent while it is on
    pub flag_id: Option<u32>,

    /// Travel modes the rule fires for
    pub modes: ModeSet,

    /// Check under both activation kinds instead of only the object's own
    pub combo: bool,
}

impl Default for TriggerRule {
    /// Exact tile, every mode, no switch
    fn default() -> Self {
        Self {
            radius: Some(0),
            axis_x: None,
            axis_y: None,
            flag_id: None,
            modes: ModeSet::all(),
            combo: false,
        }
    }
}

impl TriggerRule {
    /// Rule covering every tile within `radius`
    pub fn radius(radius: u32) -> Self {
        Self {
            radius: Some(radius),
            ..Self::default()
        }
    }

    /// Rule covering the `axis_x` by `axis_y` rectangle
    pub fn rectangle(axis_x: u32, axis_y: u32) -> Self {
        Self {
            radius: None,
            axis_x: Some(axis_x),
            axis_y: Some(axis_y),
            ..Self::default()
        }
    }

    /// Bind a one-shot switch
    pub fn with_flag(mut self, flag_id: u32) -> Self {
        self.flag_id = (flag_id > 0).then_some(flag_id);
        self
    }

    /// Restrict the allowed travel modes
    pub fn with_modes(mut self, modes: ModeSet) -> Self {
        self.modes = if modes.is_empty() { ModeSet::all() } else { modes };
        self
    }

    /// Enable evaluation under both activation kinds
    pub fn with_combo(mut self) -> Self {
        self.combo = true;
        self
    }

    /// Whether any shape test is armed
    pub fn has_shape(&self) -> bool {
        self.radius.is_some() || self.axis_x.is_some() || self.axis_y.is_some()
    }

    /// Same gates, exact tile shape
    pub fn exact_tile(&self) -> Self {
        Self {
            radius: Some(0),
            axis_x: None,
            axis_y: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_keywords() {
        for mode in TravelMode::ALL {
            assert_eq!(TravelMode::from_keyword(mode.keyword()), Some(mode));
        }
        assert_eq!(TravelMode::from_keyword("horse"), None);
    }

    #[test]
    fn test_mode_set() {
        let set = ModeSet::empty().with(TravelMode::Boat).with(TravelMode::Airship);
        assert!(set.contains(TravelMode::Boat));
        assert!(!set.contains(TravelMode::Walk));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![TravelMode::Boat, TravelMode::Airship]
        );
        assert_eq!(ModeSet::all().iter().count(), 4);
        assert!(ModeSet::empty().is_empty());
    }

    #[test]
    fn test_rule_builder() {
        let rule = TriggerRule::radius(3)
            .with_flag(7)
            .with_modes(ModeSet::empty().with(TravelMode::Ship))
            .with_combo();

        assert_eq!(rule.radius, Some(3));
        assert_eq!(rule.flag_id, Some(7));
        assert!(rule.modes.contains(TravelMode::Ship));
        assert!(!rule.modes.contains(TravelMode::Walk));
        assert!(rule.combo);
    }

    #[test]
    fn test_rule_zero_flag_is_unbound() {
        assert_eq!(TriggerRule::radius(1).with_flag(0).flag_id, None);
    }

    #[test]
    fn test_exact_tile_keeps_gates() {
        let rule = TriggerRule::rectangle(4, 2).with_flag(9).with_combo();
        let exact = rule.exact_tile();
        assert_eq!(exact.radius, Some(0));
        assert_eq!(exact.axis_x, None);
        assert_eq!(exact.flag_id, Some(9));
        assert!(exact.combo);
    }
}
