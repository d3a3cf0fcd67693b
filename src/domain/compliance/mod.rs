//! Response compliance pipeline.
//!
//! Raw model output is untrusted: it carries template tokens, role labels,
//! stage directions, narrated emotion, formal register, and answers that
//! dodge the question. `sanitize` runs a fixed sequence of passes that turn
//! whatever came back into one line a real caller could have said. It never
//! fails; the worst input degrades to a fallback line.

mod artifacts;
mod fallback;
mod first_turn;
mod fragments;
mod leakage;
mod naturalize;
mod punctuation;
mod quality;
mod validator;

use rand::Rng;

use crate::domain::caller::EmotionalState;

pub use quality::question_quality;
pub use validator::{classify_question, correct, validate, QuestionCategory, QuestionKind};

/// Per-turn context the passes need.
#[derive(Debug, Clone, Copy)]
pub struct SanitizeContext<'a> {
    /// The dispatcher utterance the response answers. Raw, as typed.
    pub last_question: &'a str,
    /// The caller's state BEFORE this exchange advances it.
    pub emotional_state: EmotionalState,
    /// True until the caller has answered a dispatcher turn.
    pub is_first_turn: bool,
}

/// Runs the full pipeline over raw model output.
///
/// Pass order is fixed: artifacts, quotes/brackets, stage directions,
/// fragment repair, punctuation, minimum content, emotional leakage,
/// naturalization, first-turn constraint, question validation. A response
/// that empties out mid-pipeline is re-floored on the fallback line, so the
/// result is never blank.
pub fn sanitize<R: Rng + ?Sized>(raw: &str, ctx: &SanitizeContext<'_>, rng: &mut R) -> String {
    let text = artifacts::strip_artifacts(raw);
    let text = artifacts::strip_quotes_and_brackets(&text);
    let text = artifacts::strip_stage_directions(&text);
    let text = fragments::repair_fragments(&text);
    let text = punctuation::normalize_punctuation(&text, ctx.emotional_state);
    let text = fallback::ensure_minimum_content(&text, ctx.last_question);
    let text = leakage::remove_emotional_leakage(&text);
    // Leakage removal can gut a line that was all narration.
    let text = fallback::ensure_minimum_content(&text, ctx.last_question);
    let text = naturalize::naturalize(&text, ctx.emotional_state, rng);
    let text = first_turn::constrain_first_turn(&text, ctx);
    validator::correct(ctx.last_question, &text)
}

/// Trims and squeezes interior whitespace to single spaces.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
