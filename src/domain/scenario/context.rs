//! Immutable per-call scenario facts.

use serde::{Deserialize, Serialize};

/// The facts of one scenario variant: who is calling, from where, about what.
///
/// Created once when a session starts and read-only afterwards. The prompt
/// composer reads these; nothing in the core ever mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioContext {
    /// Where the emergency is happening.
    pub location: String,
    /// The caller's name.
    pub caller_name: String,
    /// The caller's callback number.
    pub phone: String,
    /// What happened.
    pub situation: String,
    /// The situation as it stands right now.
    pub current_status: String,
    /// Who the caller is and how they relate to the incident.
    pub caller_background: String,
    /// The canonical answer to "911, what is your emergency?".
    pub initial_response: String,
}

impl ScenarioContext {
    /// Returns true if the caller is a witness or bystander rather than a
    /// participant in the incident.
    pub fn is_witness(&self) -> bool {
        let background = self.caller_background.to_lowercase();
        background.contains("witness") || background.contains("bystander")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_with_background(background: &str) -> ScenarioContext {
        ScenarioContext {
            location: "Somewhere".to_string(),
            caller_name: "Test Caller".to_string(),
            phone: "403-000-0000".to_string(),
            situation: "Something happened".to_string(),
            current_status: "Ongoing".to_string(),
            caller_background: background.to_string(),
            initial_response: "There's an emergency.".to_string(),
        }
    }

    #[test]
    fn witness_background_is_detected() {
        assert!(context_with_background("Pedestrian witness who saw it all").is_witness());
        assert!(context_with_background("Bystander who found the victim").is_witness());
    }

    #[test]
    fn participant_background_is_not_witness() {
        assert!(!context_with_background("Homeowner terrified for safety").is_witness());
    }
}
