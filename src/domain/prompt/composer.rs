//! Prompt composition.
//!
//! Builds the persona system prompt and the rolling chat window that a
//! generation backend consumes. Pure string assembly; which model sees it
//! is the adapter's business.

use serde::{Deserialize, Serialize};

use crate::domain::caller::{CallerState, TurnRole};

/// Turns of history included in each request. Older turns fall out of the
/// prompt but stay in the ledger.
pub const HISTORY_WINDOW: usize = 6;

const BASE_TEMPERATURE: f32 = 0.7;
const TEMPERATURE_PER_LEVEL: f32 = 0.05;

/// Who a chat message is attributed to, in provider-agnostic terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One message handed to the generation backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

/// Everything a backend needs to generate one caller turn.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Persona instructions.
    pub system_prompt: String,
    /// Recent history plus the current dispatcher message.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature hint; hotter when the caller is more distressed.
    pub temperature: f32,
}

/// Builds generation requests from caller state.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptComposer;

impl PromptComposer {
    pub fn new() -> Self {
        Self
    }

    /// Composes the request for the next caller turn.
    pub fn compose(&self, state: &CallerState, dispatcher_utterance: &str) -> GenerationRequest {
        let mut messages: Vec<ChatMessage> = state
            .history()
            .recent_window(HISTORY_WINDOW)
            .iter()
            .map(|turn| match turn.role() {
                TurnRole::Dispatcher => ChatMessage::user(turn.content()),
                TurnRole::Caller => ChatMessage::assistant(turn.content()),
            })
            .collect();
        messages.push(ChatMessage::user(dispatcher_utterance));

        GenerationRequest {
            system_prompt: self.system_prompt(state),
            messages,
            temperature: Self::temperature_for(state),
        }
    }

    /// Temperature scales with distress so a hysterical caller reads less
    /// scripted than a relieved one.
    fn temperature_for(state: &CallerState) -> f32 {
        BASE_TEMPERATURE + TEMPERATURE_PER_LEVEL * state.intensity().level() as f32
    }

    fn system_prompt(&self, state: &CallerState) -> String {
        let profile = state.profile();
        let mut prompt = format!(
            "You are {name}, a 911 caller. You are NOT the dispatcher. Never break character.\n\
             \n\
             SITUATION: {situation}\n\
             CURRENT STATUS: {status}\n\
             LOCATION: {location}\n\
             YOUR PHONE NUMBER: {phone}\n\
             BACKGROUND: {background}\n\
             \n\
             EMOTIONAL STATE: You are {emotion} (distress {intensity}).\n",
            name = profile.caller_name,
            situation = profile.situation,
            status = profile.current_status,
            location = profile.location,
            phone = profile.phone,
            background = profile.caller_background,
            emotion = state.emotional_state().as_str(),
            intensity = state.intensity(),
        );

        if profile.is_witness() {
            prompt.push_str(
                "\nIMPORTANT: YOU ARE A WITNESS, NOT THE VICTIM. You are describing what you \
                 see happening to someone else. Do not claim their injuries as your own.\n",
            );
        }

        prompt.push_str(
            "\nRULES:\n\
             - Speak only as the caller, one short reply per turn.\n\
             - Answer only what the dispatcher asked. Do not volunteer extra details.\n\
             - Use plain spoken language. No narration, no stage directions, no lists.\n\
             - You do not know things the caller could not know.\n",
        );

        if state.is_first_turn() {
            prompt.push_str(&format!(
                "\nWhen the dispatcher asks what your emergency is, answer with exactly: \
                 \"{}\"\n",
                profile.initial_response
            ));
        }

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::caller::CallerState;
    use crate::domain::scenario::{select_variant, ScenarioType};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state_for(scenario: ScenarioType) -> CallerState {
        let mut rng = StdRng::seed_from_u64(11);
        let profile = select_variant(scenario, &mut rng).unwrap();
        CallerState::new(scenario, profile)
    }

    #[test]
    fn system_prompt_carries_the_persona() {
        let state = state_for(ScenarioType::HomeInvasion);
        let request = PromptComposer::new().compose(&state, "911, what is your emergency?");

        assert!(request.system_prompt.contains(&state.profile().caller_name));
        assert!(request.system_prompt.contains(&state.profile().location));
        assert!(request
            .system_prompt
            .contains(state.emotional_state().as_str()));
    }

    #[test]
    fn first_turn_pins_the_scripted_opening() {
        let state = state_for(ScenarioType::Theft);
        let request = PromptComposer::new().compose(&state, "911, what is your emergency?");
        assert!(request
            .system_prompt
            .contains(&state.profile().initial_response));

        let later = state.apply_exchange("911, what is your emergency?", "I was robbed!");
        let request = PromptComposer::new().compose(&later, "Where are you?");
        assert!(!request
            .system_prompt
            .contains("answer with exactly"));
    }

    #[test]
    fn current_message_is_last_and_from_the_user() {
        let state = state_for(ScenarioType::Robbery);
        let request = PromptComposer::new().compose(&state, "Is anyone hurt?");

        let last = request.messages.last().unwrap();
        assert_eq!(last.role, ChatRole::User);
        assert_eq!(last.content, "Is anyone hurt?");
    }

    #[test]
    fn history_window_is_bounded() {
        let mut state = state_for(ScenarioType::Robbery);
        for i in 0..10 {
            state = state.apply_exchange(&format!("question {i}"), "Okay.");
        }
        let request = PromptComposer::new().compose(&state, "Where are you?");

        // window plus the current message
        assert_eq!(request.messages.len(), HISTORY_WINDOW + 1);
        assert_eq!(request.messages[0].content, "question 7");
    }

    #[test]
    fn temperature_rises_with_intensity() {
        let robbery = state_for(ScenarioType::Robbery); // starts at 9
        let hazard = state_for(ScenarioType::TrafficHazard); // starts at 7

        let hot = PromptComposer::new().compose(&robbery, "Okay.").temperature;
        let cool = PromptComposer::new().compose(&hazard, "Okay.").temperature;
        assert!(hot > cool);
        assert!((hot - 1.15).abs() < 1e-6);
    }

    #[test]
    fn witness_scenarios_get_the_witness_block() {
        // 10-88 variants describe callers reporting on others
        let state = state_for(ScenarioType::TrafficHazard);
        let request = PromptComposer::new().compose(&state, "Okay.");
        if state.profile().is_witness() {
            assert!(request.system_prompt.contains("WITNESS, NOT THE VICTIM"));
        }
    }
}
