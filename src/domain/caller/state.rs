//! CallerState - the central copy-on-write aggregate for one session.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::emotional_state::{advance_intensity, EmotionalState};
use super::ledger::{detect_categories, ConversationLedger, ConversationTurn, DetailCategory};
use crate::domain::foundation::{Intensity, Progress};
use crate::domain::scenario::{ScenarioContext, ScenarioType};

/// Everything the simulator knows about the caller at one point in time.
///
/// Mutable by replacement only: each processed exchange produces a new
/// `CallerState` from the previous one, so the state machine is trivially
/// testable and a session can never observe a half-applied turn.
///
/// # Invariants
///
/// - `emotional_state` is always `EmotionalState::from_intensity(intensity)`
/// - `key_details_revealed` only ever grows
/// - `scenario_progress` is exactly `0.15 * |key_details_revealed|`, capped at 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallerState {
    intensity: Intensity,
    emotional_state: EmotionalState,
    scenario_type: ScenarioType,
    key_details_revealed: BTreeSet<DetailCategory>,
    conversation_history: ConversationLedger,
    caller_profile: ScenarioContext,
    scenario_progress: Progress,
}

impl CallerState {
    /// Creates the initial state for a session.
    ///
    /// Intensity is preset by scenario severity (9 for violent/high-stakes
    /// categories, 7 otherwise) and the emotional state derived from it.
    pub fn new(scenario_type: ScenarioType, profile: ScenarioContext) -> Self {
        let intensity = scenario_type.initial_intensity();
        Self {
            intensity,
            emotional_state: EmotionalState::from_intensity(intensity),
            scenario_type,
            key_details_revealed: BTreeSet::new(),
            conversation_history: ConversationLedger::new(),
            caller_profile: profile,
            scenario_progress: Progress::ZERO,
        }
    }

    /// Applies one full dispatcher/caller exchange, returning the next state.
    ///
    /// Appends both turns, merges newly probed detail categories, recomputes
    /// progress, and advances intensity from the dispatcher phrasing and the
    /// cleaned response.
    pub fn apply_exchange(&self, dispatcher_utterance: &str, caller_response: &str) -> Self {
        let mut next = self.record_exchange(dispatcher_utterance, caller_response);

        for category in detect_categories(dispatcher_utterance) {
            next.key_details_revealed.insert(category);
        }
        next.scenario_progress = Progress::from_revealed_count(next.key_details_revealed.len());

        next.intensity = advance_intensity(self.intensity, dispatcher_utterance, caller_response);
        next.emotional_state = EmotionalState::from_intensity(next.intensity);

        next
    }

    /// Records an exchange without advancing any other state.
    ///
    /// Used on generation failure: the transcript still shows the exchange,
    /// but intensity, revealed details, and progress stay as they were.
    pub fn record_exchange(&self, dispatcher_utterance: &str, caller_response: &str) -> Self {
        let mut next = self.clone();
        next.conversation_history
            .append(ConversationTurn::dispatcher(dispatcher_utterance));
        next.conversation_history
            .append(ConversationTurn::caller(caller_response));
        next
    }

    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    pub fn emotional_state(&self) -> EmotionalState {
        self.emotional_state
    }

    pub fn scenario_type(&self) -> ScenarioType {
        self.scenario_type
    }

    pub fn key_details_revealed(&self) -> &BTreeSet<DetailCategory> {
        &self.key_details_revealed
    }

    pub fn history(&self) -> &ConversationLedger {
        &self.conversation_history
    }

    pub fn profile(&self) -> &ScenarioContext {
        &self.caller_profile
    }

    pub fn scenario_progress(&self) -> Progress {
        self.scenario_progress
    }

    /// True until the caller has spoken in response to a dispatcher turn.
    pub fn is_first_turn(&self) -> bool {
        self.conversation_history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scenario::select_variant;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn robbery_state() -> CallerState {
        let mut rng = StdRng::seed_from_u64(3);
        let profile = select_variant(ScenarioType::Robbery, &mut rng).unwrap();
        CallerState::new(ScenarioType::Robbery, profile)
    }

    fn hazard_state() -> CallerState {
        let mut rng = StdRng::seed_from_u64(3);
        let profile = select_variant(ScenarioType::TrafficHazard, &mut rng).unwrap();
        CallerState::new(ScenarioType::TrafficHazard, profile)
    }

    #[test]
    fn high_severity_scenario_starts_hysterical() {
        let state = robbery_state();
        assert_eq!(state.intensity().level(), 9);
        assert_eq!(state.emotional_state(), EmotionalState::Hysterical);
    }

    #[test]
    fn routine_scenario_starts_panicked() {
        let state = hazard_state();
        assert_eq!(state.intensity().level(), 7);
        assert_eq!(state.emotional_state(), EmotionalState::Panicked);
    }

    #[test]
    fn apply_exchange_does_not_mutate_original() {
        let state = robbery_state();
        let next = state.apply_exchange("Where are you?", "South Centre Mall.");

        assert!(state.history().is_empty());
        assert!(state.key_details_revealed().is_empty());
        assert_eq!(next.history().len(), 2);
    }

    #[test]
    fn apply_exchange_reveals_probed_categories() {
        let state = robbery_state();
        let next = state.apply_exchange("Where are you?", "South Centre Mall.");

        assert!(next.key_details_revealed().contains(&DetailCategory::Location));
        assert!(
            (next.scenario_progress().as_fraction() - 0.15).abs() < f32::EPSILON,
            "progress should be exactly one step"
        );
    }

    #[test]
    fn categories_are_monotonic_across_exchanges() {
        let mut state = robbery_state();
        let questions = [
            "Where are you?",
            "Is anyone hurt?",
            "Okay, stay with me.",
            "What's your phone number?",
        ];

        let mut last_count = 0;
        for question in questions {
            state = state.apply_exchange(question, "Okay.");
            assert!(state.key_details_revealed().len() >= last_count);
            last_count = state.key_details_revealed().len();
        }
    }

    #[test]
    fn progress_tracks_revealed_count_exactly() {
        let mut state = robbery_state();
        state = state.apply_exchange("Where are you? Is anyone hurt?", "At the mall.");

        let expected = 0.15 * state.key_details_revealed().len() as f32;
        assert!((state.scenario_progress().as_fraction() - expected.min(1.0)).abs() < f32::EPSILON);
    }

    #[test]
    fn emotional_state_always_matches_intensity() {
        let mut state = robbery_state();
        let lines = [
            "Calm down for me, okay?",
            "Help is on the way.",
            "huh",
            "Where are you?",
        ];
        for line in lines {
            state = state.apply_exchange(line, "Okay, please hurry.");
            assert_eq!(
                state.emotional_state(),
                EmotionalState::from_intensity(state.intensity())
            );
        }
    }

    #[test]
    fn record_exchange_leaves_state_untouched_except_history() {
        let state = robbery_state();
        let next = state.record_exchange("Where are you?", "I need help!");

        assert_eq!(next.intensity(), state.intensity());
        assert!(next.key_details_revealed().is_empty());
        assert_eq!(next.scenario_progress(), Progress::ZERO);
        assert_eq!(next.history().len(), 2);
    }

    #[test]
    fn first_turn_flag_clears_after_an_exchange() {
        let state = robbery_state();
        assert!(state.is_first_turn());
        let next = state.record_exchange("911, what is your emergency?", "I found someone bleeding!");
        assert!(!next.is_first_turn());
    }
}
