//! Activation dispatcher
//!
//! Holds the objects of the active map in host iteration order and answers
//! the host's "what is here" questions with distance rules applied.

use std::borrow::Cow;

use super::candidate::{ActivationKind, Candidate, CandidateId};
use super::events::{ActivationCallback, ActivationCause, ActivationEvent, ActivationListeners};
use super::host::Host;
use super::state::DispatcherState;
use crate::config::TriggerSettings;
use crate::map::{MapTopology, TilePos};
use crate::triggers::{extract_tag, parse_rule, RangeEvaluator, TravelMode, TriggerRule};
use crate::{Result, TriggerError};

/// Distance aware replacement for the host's exact-tile object lookup
#[derive(Debug)]
pub struct TriggerMap {
    settings: TriggerSettings,
    evaluator: RangeEvaluator,
    candidates: Vec<Candidate>,
    listeners: ActivationListeners,
    activations: u64,
}

impl TriggerMap {
    /// Create a map from settings
    pub fn new(settings: TriggerSettings) -> Result<Self> {
        let topology = MapTopology::from_config(&settings.map)?;
        Ok(Self {
            settings,
            evaluator: RangeEvaluator::new(topology),
            candidates: Vec::new(),
            listeners: ActivationListeners::new(),
            activations: 0,
        })
    }

    /// Create a map with default settings and the given topology
    pub fn with_topology(topology: MapTopology) -> Self {
        Self {
            settings: TriggerSettings::default(),
            evaluator: RangeEvaluator::new(topology),
            candidates: Vec::new(),
            listeners: ActivationListeners::new(),
            activations: 0,
        }
    }

    pub fn settings(&self) -> &TriggerSettings {
        &self.settings
    }

    pub fn topology(&self) -> &MapTopology {
        self.evaluator.topology()
    }

    /// Register a callback for activation events
    pub fn on_activation(&mut self, callback: ActivationCallback) {
        self.listeners.subscribe(callback);
    }

    /// Register an object; iteration order is registration order
    pub fn add_candidate(&mut self, candidate: Candidate) -> Result<()> {
        if self.index_of(candidate.id).is_some() {
            return Err(TriggerError::DuplicateCandidate(candidate.id));
        }
        log::info!(
            "Registered candidate {} at {} ({:?}{})",
            candidate.id,
            candidate.position,
            candidate.kind,
            if candidate.rule.is_some() { ", distance rule" } else { "" }
        );
        self.candidates.push(candidate);
        Ok(())
    }

    /// Remove an object, returning it
    pub fn remove_candidate(&mut self, id: CandidateId) -> Result<Candidate> {
        let index = self.index_of(id).ok_or(TriggerError::UnknownCandidate(id))?;
        log::info!("Removed candidate {}", id);
        Ok(self.candidates.remove(index))
    }

    /// Look up an object
    pub fn candidate(&self, id: CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    /// All objects in iteration order
    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    /// Re-read an object's rule after its active page changed
    ///
    /// `comments` are the comment lines of the new page. Without a tag the
    /// object reverts to exact-tile matching.
    pub fn on_configuration_loaded<S: AsRef<str>>(
        &mut self,
        id: CandidateId,
        comments: &[S],
    ) -> Result<Option<&TriggerRule>> {
        let rule = extract_tag(comments, &self.settings.tag_name).map(|body| parse_rule(&body));
        self.set_rule(id, rule)
    }

    /// Replace an object's rule directly
    pub fn set_rule(&mut self, id: CandidateId, rule: Option<TriggerRule>) -> Result<Option<&TriggerRule>> {
        let candidate = self.get_mut(id)?;
        match &rule {
            Some(rule) => log::debug!("Candidate {} rule: {:?}", id, rule),
            None => log::debug!("Candidate {} has no distance rule", id),
        }
        candidate.rule = rule;
        Ok(candidate.rule.as_ref())
    }

    /// Local activation is never blocked by the player's vehicle; each rule's
    /// own mode gate decides.
    pub fn can_start_local_events(&self, _mode: TravelMode) -> bool {
        true
    }

    /// Objects in range of `query` for a query issued as `kind`
    ///
    /// Iterates in registration order. A switch latched by an earlier object
    /// is already on when later objects are checked. Returns nothing while
    /// the host is running an action.
    pub fn on_position_query<H: Host>(
        &self,
        host: &mut H,
        query: TilePos,
        kind: ActivationKind,
    ) -> Vec<CandidateId> {
        if host.is_event_running() {
            return Vec::new();
        }

        let mode = host.travel_mode();
        let mut matches = Vec::new();
        for candidate in &self.candidates {
            if self.matches(host, candidate, candidate.position, query, kind, mode) {
                matches.push(candidate.id);
            }
        }

        log::trace!("Query at {} ({:?}, {}): {} matches", query, kind, mode, matches.len());
        matches
    }

    /// Start every object the player reaches at `query`
    ///
    /// Objects whose native kind is in `kinds`, or whose rule opted into
    /// combo, are started; an activation event is emitted for each.
    /// Kinds are filtered after the query, so an in-range one-shot switch is
    /// latched even for an object of a kind not listed.
    pub fn start_map_events<H: Host>(
        &mut self,
        host: &mut H,
        query: TilePos,
        kinds: &[ActivationKind],
    ) -> Vec<CandidateId> {
        if !self.can_start_local_events(host.travel_mode()) {
            return Vec::new();
        }

        let started: Vec<CandidateId> = self
            .on_position_query(host, query, ActivationKind::ActorTouch)
            .into_iter()
            .filter(|&id| {
                self.candidate(id).is_some_and(|c| {
                    kinds.contains(&c.kind) || c.rule.as_ref().is_some_and(|r| r.combo)
                })
            })
            .collect();

        for &id in &started {
            if let Some(position) = self.candidate(id).map(|c| c.position) {
                self.activate(id, position, ActivationCause::Touch);
            }
        }
        started
    }

    /// Record a completed movement step of an object
    ///
    /// If the object now reaches the player as an object-touch trigger, it is
    /// marked to start once its movement settles. Returns whether a start is
    /// pending afterwards.
    pub fn on_candidate_moved<H: Host>(
        &mut self,
        host: &mut H,
        id: CandidateId,
        position: TilePos,
    ) -> Result<bool> {
        let index = self.index_of(id).ok_or_else(|| {
            log::warn!("Move reported for unknown candidate {}", id);
            TriggerError::UnknownCandidate(id)
        })?;
        self.candidates[index].position = position;

        let candidate = &self.candidates[index];
        if candidate.pending_start || host.is_event_running() {
            return Ok(candidate.pending_start);
        }

        let touches_player = candidate.kind == ActivationKind::ObjectTouch
            || candidate.rule.as_ref().is_some_and(|r| r.combo);
        if !touches_player {
            return Ok(false);
        }

        let player = host.player_position();
        let mode = host.travel_mode();
        let reaches = self.matches(host, candidate, position, player, ActivationKind::ObjectTouch, mode);

        if reaches {
            log::debug!("Candidate {} reached player at {}; start pending", id, player);
            self.candidates[index].pending_start = true;
        }
        Ok(reaches)
    }

    /// Record that an object finished animating its step
    ///
    /// Starts the object if a start was pending. Returns whether it started.
    pub fn on_candidate_movement_settled(&mut self, id: CandidateId) -> Result<bool> {
        let index = self.index_of(id).ok_or_else(|| {
            log::warn!("Settle reported for unknown candidate {}", id);
            TriggerError::UnknownCandidate(id)
        })?;
        Ok(self.start_pending(index))
    }

    /// Per-frame sweep: start every pending object the host reports as settled
    pub fn update<H: Host>(&mut self, host: &H) -> Vec<CandidateId> {
        let mut started = Vec::new();
        for index in 0..self.candidates.len() {
            let candidate = &self.candidates[index];
            if candidate.pending_start && !host.is_moving(candidate.id) {
                let id = candidate.id;
                if self.start_pending(index) {
                    started.push(id);
                }
            }
        }
        started
    }

    /// Drop every pending start, e.g. on map transfer
    pub fn clear_pending(&mut self) {
        for candidate in &mut self.candidates {
            candidate.pending_start = false;
        }
    }

    /// Snapshot of the dispatcher
    pub fn state(&self) -> DispatcherState {
        DispatcherState {
            candidates: self.candidates.len(),
            rule_candidates: self.candidates.iter().filter(|c| c.rule.is_some()).count(),
            pending_starts: self
                .candidates
                .iter()
                .filter(|c| c.pending_start)
                .map(|c| c.id)
                .collect(),
            activations: self.activations,
        }
    }

    /// Snapshot of the dispatcher as JSON
    pub fn state_json(&self) -> Result<String> {
        self.state().to_json()
    }

    /// Shared match decision for queries and movement checks
    ///
    /// Writes the rule's switch to the host when a one-shot rule matches.
    fn matches<H: Host>(
        &self,
        host: &mut H,
        candidate: &Candidate,
        position: TilePos,
        query: TilePos,
        kind: ActivationKind,
        mode: TravelMode,
    ) -> bool {
        let Some(rule) = candidate.rule_for(kind) else {
            return position == query
                && !(self.settings.airship_blocks_legacy && mode == TravelMode::Airship);
        };

        // A blocking object with no usable shape is still touched by bumping into it
        let rule = if candidate.blocks_movement && !rule.has_shape() {
            Cow::Owned(rule.exact_tile())
        } else {
            Cow::Borrowed(rule)
        };

        let outcome = self.evaluator.evaluate(&rule, position, query, mode, &*host);
        if outcome.matched {
            log::debug!("Candidate {} in range of {}", candidate.id, query);
            if let Some(flag_id) = outcome.flag_to_set {
                log::debug!("Latching switch {} for candidate {}", flag_id, candidate.id);
                host.set_value(flag_id, true);
            }
        }
        outcome.matched
    }

    fn start_pending(&mut self, index: usize) -> bool {
        let candidate = &mut self.candidates[index];
        if !candidate.pending_start {
            return false;
        }
        candidate.pending_start = false;
        let (id, position) = (candidate.id, candidate.position);
        log::debug!("Starting candidate {} after movement settled", id);
        self.activate(id, position, ActivationCause::MovementSettled);
        true
    }

    fn activate(&mut self, candidate: CandidateId, position: TilePos, cause: ActivationCause) {
        self.activations += 1;
        if self.listeners.is_empty() {
            log::trace!("No activation listeners; candidate {} started silently", candidate);
            return;
        }
        self.listeners.dispatch(ActivationEvent {
            candidate,
            position,
            cause,
        });
    }

    fn index_of(&self, id: CandidateId) -> Option<usize> {
        self.candidates.iter().position(|c| c.id == id)
    }

    fn get_mut(&mut self, id: CandidateId) -> Result<&mut Candidate> {
        self.candidates
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(TriggerError::UnknownCandidate(id))
    }
}
