//! Dispatcher question-quality scoring.
//!
//! Feeds the fractional intensity nudge: strong, specific questions settle
//! the caller slightly, vague mumbling agitates them.

use super::validator::{classify_question, contains_term};

/// Phrases that signal the dispatcher is reassuring the caller.
const REASSURING_PHRASES: [&str; 5] = [
    "help is on the way",
    "help is coming",
    "stay calm",
    "you're doing great",
    "okay",
];

/// Phrases that signal the dispatcher lost the thread.
const POOR_PHRASES: [&str; 4] = ["repeat", "slow down", "huh", "say again"];

/// Scores a dispatcher utterance in [0.0, 1.0].
///
/// Scoring is done in integer tenths and divided once at the end, so the
/// thresholds the caller logic compares against (0.5, 0.8) are exact.
pub fn question_quality(utterance: &str) -> f32 {
    let trimmed = utterance.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let lower = trimmed.to_lowercase();

    let mut tenths: i32 = 4;

    if trimmed.contains('?') {
        tenths += 2;
    }
    if classify_question(trimmed).is_some() {
        tenths += 2;
    }
    if REASSURING_PHRASES.iter().any(|p| contains_term(&lower, p)) {
        tenths += 1;
    }
    if POOR_PHRASES.iter().any(|p| contains_term(&lower, p)) {
        tenths -= 2;
    }
    if lower.split_whitespace().count() < 3 {
        tenths -= 2;
    }

    tenths.clamp(0, 10) as f32 / 10.0
}
