//! Simulation service - the session lifecycle.
//!
//! Owns the session registry and drives each turn: compose the prompt, get
//! raw text from the generation backend, run it through the compliance
//! pipeline, and advance the caller state machine. A turn never fails on
//! the backend's account; generation failures degrade to a scripted line
//! and leave the emotional state untouched.

use std::collections::HashMap;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::domain::caller::{CallerState, DetailCategory, EmotionalState};
use crate::domain::compliance::{sanitize, SanitizeContext};
use crate::domain::foundation::{
    DomainError, ErrorCode, Intensity, Progress, SessionId, TraineeId,
};
use crate::domain::prompt::{GenerationRequest, PromptComposer};
use crate::domain::scenario::{select_variant, ScenarioType};
use crate::ports::CallerGenerator;

use super::session::{SessionData, SessionSummary};

/// What the caller says when every generation attempt failed.
const GENERATION_FALLBACK: &str = "I need help!";

/// Result of opening a session.
#[derive(Debug, Clone)]
pub struct StartSessionOutcome {
    pub session_id: SessionId,
    pub scenario_type: ScenarioType,
    /// The caller's scripted first line, spoken before any dispatcher turn.
    pub opening_utterance: String,
    pub emotional_state: EmotionalState,
    pub intensity: Intensity,
}

/// Result of one dispatcher turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub caller_utterance: String,
    pub emotional_state: EmotionalState,
    pub intensity: Intensity,
    pub scenario_progress: Progress,
    pub details_revealed: Vec<DetailCategory>,
}

/// The session registry and turn engine.
///
/// Turns on the same session are serialized by a per-session lock; turns on
/// different sessions only contend for the generation backend.
pub struct Simulation {
    sessions: Mutex<HashMap<SessionId, Arc<Mutex<SessionData>>>>,
    generator: Arc<Mutex<dyn CallerGenerator>>,
    composer: PromptComposer,
    config: AppConfig,
    rng: std::sync::Mutex<StdRng>,
}

impl Simulation {
    /// Creates a simulation over the given backend.
    pub fn new(generator: impl CallerGenerator + 'static, config: AppConfig) -> Self {
        let backend = generator.backend_info();
        info!(backend = %backend.name, model = %backend.model, "simulation core ready");

        let rng = match config.simulation.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            sessions: Mutex::new(HashMap::new()),
            generator: Arc::new(Mutex::new(generator)),
            composer: PromptComposer::new(),
            config,
            rng: std::sync::Mutex::new(rng),
        }
    }

    /// Opens a session for a scenario code and returns the caller's opening
    /// line.
    pub async fn start_session(
        &self,
        scenario_code: &str,
        trainee_id: TraineeId,
    ) -> Result<StartSessionOutcome, DomainError> {
        let scenario_type = ScenarioType::from_code(scenario_code)?;
        let profile = {
            let mut rng = self.lock_rng();
            select_variant(scenario_type, &mut *rng)?
        };
        let opening_utterance = profile.initial_response.clone();

        let caller_state = CallerState::new(scenario_type, profile);
        let emotional_state = caller_state.emotional_state();
        let intensity = caller_state.intensity();

        let session_id = SessionId::new();
        let session = SessionData::new(session_id, trainee_id, caller_state);
        self.sessions
            .lock()
            .await
            .insert(session_id, Arc::new(Mutex::new(session)));

        info!(%session_id, scenario = %scenario_type, "session started");

        Ok(StartSessionOutcome {
            session_id,
            scenario_type,
            opening_utterance,
            emotional_state,
            intensity,
        })
    }

    /// Processes one dispatcher utterance and returns the caller's reply.
    pub async fn handle_turn(
        &self,
        session_id: SessionId,
        dispatcher_utterance: &str,
    ) -> Result<TurnOutcome, DomainError> {
        let handle = self.session_handle(session_id).await?;
        let mut session = handle.lock().await;

        if !session.is_active() {
            return Err(DomainError::new(
                ErrorCode::SessionInactive,
                "Session has already ended",
            )
            .with_detail("session_id", session_id.to_string()));
        }

        let state = session.caller_state();
        let request = self.composer.compose(state, dispatcher_utterance);
        let ctx = SanitizeContext {
            last_question: dispatcher_utterance,
            emotional_state: state.emotional_state(),
            is_first_turn: state.is_first_turn(),
        };

        match self.generate_with_retry(request, session_id).await {
            Some(raw) => {
                let cleaned = {
                    let mut rng = self.lock_rng();
                    sanitize(&raw, &ctx, &mut *rng)
                };
                debug!(%session_id, raw_len = raw.len(), "caller turn generated");
                let next = session
                    .caller_state()
                    .apply_exchange(dispatcher_utterance, &cleaned);
                session.advance(next);
                Ok(Self::outcome(&session, cleaned))
            }
            None => {
                warn!(%session_id, "generation exhausted retries, degrading to fallback line");
                let next = session
                    .caller_state()
                    .record_exchange(dispatcher_utterance, GENERATION_FALLBACK);
                session.record_only(next);
                Ok(Self::outcome(&session, GENERATION_FALLBACK.to_string()))
            }
        }
    }

    /// Ends a session and returns the debrief summary.
    pub async fn end_session(&self, session_id: SessionId) -> Result<SessionSummary, DomainError> {
        let handle = self.session_handle(session_id).await?;
        let mut session = handle.lock().await;

        if !session.is_active() {
            return Err(DomainError::new(
                ErrorCode::SessionInactive,
                "Session has already ended",
            )
            .with_detail("session_id", session_id.to_string()));
        }

        session.deactivate();
        let summary = session.summary();
        info!(
            %session_id,
            exchanges = summary.exchange_count,
            final_state = summary.final_emotional_state.as_str(),
            "session ended"
        );
        Ok(summary)
    }

    /// Number of sessions the registry knows about, active or not.
    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    async fn session_handle(
        &self,
        session_id: SessionId,
    ) -> Result<Arc<Mutex<SessionData>>, DomainError> {
        self.sessions
            .lock()
            .await
            .get(&session_id)
            .cloned()
            .ok_or_else(|| DomainError::session_not_found(session_id))
    }

    /// Runs generation under the configured budget, retrying retryable
    /// failures. Returns None when every attempt failed.
    async fn generate_with_retry(
        &self,
        request: GenerationRequest,
        session_id: SessionId,
    ) -> Option<String> {
        let budget = self.config.generation.timeout();
        let attempts = 1 + self.config.generation.max_retries;

        for attempt in 1..=attempts {
            let mut generator = self.generator.lock().await;
            let result = timeout(budget, generator.generate(request.clone())).await;
            drop(generator);

            match result {
                Ok(Ok(raw)) => return Some(raw),
                Ok(Err(error)) => {
                    warn!(%session_id, attempt, %error, "generation attempt failed");
                    if !error.is_retryable() {
                        return None;
                    }
                }
                Err(_) => {
                    warn!(
                        %session_id,
                        attempt,
                        timeout_ms = self.config.generation.timeout_ms,
                        "generation attempt timed out"
                    );
                }
            }
        }
        None
    }

    fn outcome(session: &SessionData, caller_utterance: String) -> TurnOutcome {
        let state = session.caller_state();
        TurnOutcome {
            caller_utterance,
            emotional_state: state.emotional_state(),
            intensity: state.intensity(),
            scenario_progress: state.scenario_progress(),
            details_revealed: state.key_details_revealed().iter().copied().collect(),
        }
    }

    fn lock_rng(&self) -> std::sync::MutexGuard<'_, StdRng> {
        match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockCallerGenerator;
    use crate::ports::GenerationError;

    fn seeded_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.simulation.rng_seed = Some(9);
        config
    }

    fn trainee() -> TraineeId {
        TraineeId::new("trainee-1").unwrap()
    }

    #[tokio::test]
    async fn unknown_scenario_code_is_rejected() {
        let sim = Simulation::new(MockCallerGenerator::new(), seeded_config());
        let err = sim.start_session("10-99", trainee()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownScenario);
    }

    #[tokio::test]
    async fn start_session_returns_the_scripted_opening() {
        let sim = Simulation::new(MockCallerGenerator::new(), seeded_config());
        let outcome = sim.start_session("10-30", trainee()).await.unwrap();

        assert_eq!(outcome.scenario_type, ScenarioType::Robbery);
        assert!(!outcome.opening_utterance.is_empty());
        assert_eq!(outcome.intensity.level(), 9);
        assert_eq!(outcome.emotional_state, EmotionalState::Hysterical);
        assert_eq!(sim.session_count().await, 1);
    }

    #[tokio::test]
    async fn a_turn_cleans_and_applies_the_response() {
        let generator =
            MockCallerGenerator::new().with_response("(crying) I'm at South Centre Mall!");
        let sim = Simulation::new(generator, seeded_config());
        let session = sim.start_session("10-30", trainee()).await.unwrap();

        let outcome = sim
            .handle_turn(session.session_id, "Where are you?")
            .await
            .unwrap();

        assert!(outcome.caller_utterance.contains("South Centre Mall"));
        assert!(!outcome.caller_utterance.contains("crying"));
        assert!(outcome.details_revealed.contains(&DetailCategory::Location));
        assert!(outcome.scenario_progress.as_fraction() > 0.0);
    }

    #[tokio::test]
    async fn missing_session_is_an_error() {
        let sim = Simulation::new(MockCallerGenerator::new(), seeded_config());
        let err = sim
            .handle_turn(SessionId::new(), "Hello?")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionNotFound);
    }

    #[tokio::test]
    async fn failed_generation_degrades_to_the_fallback_line() {
        let generator = MockCallerGenerator::new()
            .with_error(GenerationError::unavailable("model loading"))
            .with_error(GenerationError::unavailable("model loading"));
        let sim = Simulation::new(generator, seeded_config());
        let session = sim.start_session("10-30", trainee()).await.unwrap();
        let before = session.intensity;

        let outcome = sim
            .handle_turn(session.session_id, "Where are you?")
            .await
            .unwrap();

        assert_eq!(outcome.caller_utterance, GENERATION_FALLBACK);
        assert_eq!(outcome.intensity, before);
        assert!(outcome.details_revealed.is_empty());
    }

    #[tokio::test]
    async fn non_retryable_failure_stops_after_one_attempt() {
        let generator = MockCallerGenerator::new()
            .with_error(GenerationError::malformed("empty body"))
            .with_response("should never be consumed");
        let sim = Simulation::new(generator, seeded_config());
        let session = sim.start_session("10-34", trainee()).await.unwrap();

        let outcome = sim
            .handle_turn(session.session_id, "Where are you?")
            .await
            .unwrap();
        assert_eq!(outcome.caller_utterance, GENERATION_FALLBACK);
    }

    #[tokio::test]
    async fn retryable_failure_is_retried_once() {
        let generator = MockCallerGenerator::new()
            .with_error(GenerationError::network("connection reset"))
            .with_response("He's on the highway heading north fast.");
        let sim = Simulation::new(generator, seeded_config());
        let session = sim.start_session("10-88", trainee()).await.unwrap();

        let outcome = sim
            .handle_turn(session.session_id, "Where is the truck now?")
            .await
            .unwrap();
        assert!(outcome.caller_utterance.contains("highway"));
    }

    #[tokio::test]
    async fn ended_sessions_reject_further_turns() {
        let sim = Simulation::new(MockCallerGenerator::new(), seeded_config());
        let session = sim.start_session("10-30", trainee()).await.unwrap();

        let summary = sim.end_session(session.session_id).await.unwrap();
        assert_eq!(summary.exchange_count, 0);

        let err = sim
            .handle_turn(session.session_id, "Hello?")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionInactive);

        let err = sim.end_session(session.session_id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionInactive);
    }
}
