//! Conversation ledger - the append-only record of a call.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::foundation::Timestamp;

/// Who spoke a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    /// The trainee dispatcher.
    Dispatcher,
    /// The simulated caller.
    Caller,
}

/// One utterance in the call. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    role: TurnRole,
    content: String,
    timestamp: Timestamp,
}

impl ConversationTurn {
    /// Creates a dispatcher turn stamped now.
    pub fn dispatcher(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Dispatcher,
            content: content.into(),
            timestamp: Timestamp::now(),
        }
    }

    /// Creates a caller turn stamped now.
    pub fn caller(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Caller,
            content: content.into(),
            timestamp: Timestamp::now(),
        }
    }

    pub fn role(&self) -> TurnRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }
}

/// A category of information the caller can disclose.
///
/// Closed set; once a category is triggered it stays revealed for the rest
/// of the session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DetailCategory {
    Location,
    Situation,
    People,
    Medical,
    Contact,
    Details,
    Vehicle,
    Hazards,
}

impl DetailCategory {
    /// All categories, in declaration order.
    pub const ALL: [DetailCategory; 8] = [
        DetailCategory::Location,
        DetailCategory::Situation,
        DetailCategory::People,
        DetailCategory::Medical,
        DetailCategory::Contact,
        DetailCategory::Details,
        DetailCategory::Vehicle,
        DetailCategory::Hazards,
    ];

    /// Dispatcher-utterance keywords that trigger this category.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            DetailCategory::Location => &["where", "location", "address"],
            DetailCategory::Situation => &["happened", "wrong", "emergency"],
            DetailCategory::People => &["anyone", "people", "others", "children"],
            DetailCategory::Medical => &["hurt", "injured", "medical", "conscious"],
            DetailCategory::Contact => &["phone", "number", "contact", "callback"],
            DetailCategory::Details => &["describe", "look like", "color", "model"],
            DetailCategory::Vehicle => &["vehicle", "car", "truck", "license", "plate"],
            DetailCategory::Hazards => &["weapon", "gun", "knife", "fire", "smoke", "danger"],
        }
    }
}

/// Returns true if the dispatcher line is the canonical call opening.
///
/// The opening question is exempt from detail detection: it does not count
/// as the dispatcher asking about the situation, and the caller's scripted
/// first answer volunteers nothing.
pub fn is_opening_question(utterance: &str) -> bool {
    let lower = utterance.to_lowercase();
    lower.contains("what is your emergency") || lower.contains("what's your emergency")
}

/// Detects which detail categories a dispatcher utterance asks about.
///
/// The canonical opening question triggers nothing.
pub fn detect_categories(dispatcher_utterance: &str) -> BTreeSet<DetailCategory> {
    if is_opening_question(dispatcher_utterance) {
        return BTreeSet::new();
    }
    let lower = dispatcher_utterance.to_lowercase();
    DetailCategory::ALL
        .iter()
        .copied()
        .filter(|category| category.keywords().iter().any(|kw| lower.contains(kw)))
        .collect()
}

/// Append-only ordered history of the call.
///
/// Full history is always retained; prompt construction may read a recent
/// window, but the ledger itself never drops entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationLedger {
    turns: Vec<ConversationTurn>,
}

impl ConversationLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one turn. The only mutation path.
    pub fn append(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// Returns all turns in order.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Returns the last `n` turns (or all, if fewer exist).
    pub fn recent_window(&self, n: usize) -> &[ConversationTurn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    /// Number of turns recorded.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True when no turns have been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of completed dispatcher/caller exchanges.
    pub fn exchange_count(&self) -> usize {
        self.turns.len() / 2
    }
}
