//! Prompt module - turns caller state into a generation request.

mod composer;

pub use composer::{ChatMessage, ChatRole, GenerationRequest, PromptComposer, HISTORY_WINDOW};
