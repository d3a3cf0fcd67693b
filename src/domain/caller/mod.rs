//! Caller module - emotional state machine and per-session caller state.

mod emotional_state;
mod ledger;
mod state;

pub use emotional_state::{advance_intensity, EmotionalState};
pub use ledger::{
    detect_categories, is_opening_question, ConversationLedger, ConversationTurn, DetailCategory,
    TurnRole,
};
pub use state::CallerState;
