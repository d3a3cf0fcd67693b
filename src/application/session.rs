//! Session bookkeeping around a single training call.

use serde::{Deserialize, Serialize};

use crate::domain::caller::{CallerState, DetailCategory, EmotionalState};
use crate::domain::foundation::{Intensity, Progress, SessionId, Timestamp, TraineeId};
use crate::domain::scenario::ScenarioType;

/// One sample of the caller's emotional trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalTimelineEntry {
    pub timestamp: Timestamp,
    pub emotional_state: EmotionalState,
    pub intensity: Intensity,
}

/// A live training session: the caller state plus registry metadata.
#[derive(Debug, Clone)]
pub struct SessionData {
    session_id: SessionId,
    trainee_id: TraineeId,
    caller_state: CallerState,
    created_at: Timestamp,
    last_activity: Timestamp,
    active: bool,
    emotional_timeline: Vec<EmotionalTimelineEntry>,
}

impl SessionData {
    /// Opens a session. The initial emotional state is the timeline's first
    /// entry.
    pub fn new(session_id: SessionId, trainee_id: TraineeId, caller_state: CallerState) -> Self {
        let now = Timestamp::now();
        let first_entry = EmotionalTimelineEntry {
            timestamp: now,
            emotional_state: caller_state.emotional_state(),
            intensity: caller_state.intensity(),
        };
        Self {
            session_id,
            trainee_id,
            caller_state,
            created_at: now,
            last_activity: now,
            active: true,
            emotional_timeline: vec![first_entry],
        }
    }

    /// Installs the post-exchange caller state and samples the timeline.
    pub fn advance(&mut self, next_state: CallerState) {
        self.last_activity = Timestamp::now();
        self.emotional_timeline.push(EmotionalTimelineEntry {
            timestamp: self.last_activity,
            emotional_state: next_state.emotional_state(),
            intensity: next_state.intensity(),
        });
        self.caller_state = next_state;
    }

    /// Installs a state without sampling the timeline. Used when a failed
    /// generation only appended transcript entries.
    pub fn record_only(&mut self, next_state: CallerState) {
        self.last_activity = Timestamp::now();
        self.caller_state = next_state;
    }

    /// Marks the session finished.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.last_activity = Timestamp::now();
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn trainee_id(&self) -> &TraineeId {
        &self.trainee_id
    }

    pub fn caller_state(&self) -> &CallerState {
        &self.caller_state
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn last_activity(&self) -> Timestamp {
        self.last_activity
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn emotional_timeline(&self) -> &[EmotionalTimelineEntry] {
        &self.emotional_timeline
    }

    /// Builds the end-of-call debrief summary.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.session_id,
            scenario_type: self.caller_state.scenario_type(),
            duration_secs: self
                .last_activity
                .duration_since(&self.created_at)
                .num_seconds(),
            exchange_count: self.caller_state.history().exchange_count(),
            final_emotional_state: self.caller_state.emotional_state(),
            final_intensity: self.caller_state.intensity(),
            scenario_progress: self.caller_state.scenario_progress(),
            details_revealed: self.caller_state.key_details_revealed().iter().copied().collect(),
            emotional_timeline: self.emotional_timeline.clone(),
        }
    }
}

/// Debrief data returned when a session ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub scenario_type: ScenarioType,
    pub duration_secs: i64,
    pub exchange_count: usize,
    pub final_emotional_state: EmotionalState,
    pub final_intensity: Intensity,
    pub scenario_progress: Progress,
    pub details_revealed: Vec<DetailCategory>,
    pub emotional_timeline: Vec<EmotionalTimelineEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scenario::select_variant;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session() -> SessionData {
        let mut rng = StdRng::seed_from_u64(5);
        let profile = select_variant(ScenarioType::Robbery, &mut rng).unwrap();
        SessionData::new(
            SessionId::new(),
            TraineeId::new("trainee-7").unwrap(),
            CallerState::new(ScenarioType::Robbery, profile),
        )
    }

    #[test]
    fn new_session_is_active_with_one_timeline_entry() {
        let session = session();
        assert!(session.is_active());
        assert_eq!(session.emotional_timeline().len(), 1);
        assert_eq!(
            session.emotional_timeline()[0].emotional_state,
            EmotionalState::Hysterical
        );
    }

    #[test]
    fn advance_samples_the_timeline() {
        let mut session = session();
        let next = session
            .caller_state()
            .apply_exchange("Help is on the way, calm down.", "Okay, thank you.");
        session.advance(next);

        assert_eq!(session.emotional_timeline().len(), 2);
        assert!(!session.last_activity().is_before(&session.created_at()));
    }

    #[test]
    fn record_only_skips_the_timeline() {
        let mut session = session();
        let next = session
            .caller_state()
            .record_exchange("Where are you?", "I need help!");
        session.record_only(next);

        assert_eq!(session.emotional_timeline().len(), 1);
        assert_eq!(session.caller_state().history().len(), 2);
    }

    #[test]
    fn summary_reflects_final_state() {
        let mut session = session();
        let next = session
            .caller_state()
            .apply_exchange("Where are you? Is anyone hurt?", "At the mall, yes.");
        session.advance(next);
        session.deactivate();

        let summary = session.summary();
        assert!(!session.is_active());
        assert_eq!(summary.exchange_count, 1);
        assert_eq!(summary.scenario_type, ScenarioType::Robbery);
        assert!(summary.details_revealed.contains(&DetailCategory::Location));
        assert_eq!(summary.emotional_timeline.len(), 2);
        assert!(summary.duration_secs >= 0);
    }
}
