//! First-turn constraint: the scripted opening answer states the emergency
//! and nothing else, so the trainee has to ask.

use super::SanitizeContext;
use crate::domain::caller::is_opening_question;

/// Phrases that mean the model started volunteering details unprompted.
const VOLUNTEERED_DETAIL_MARKERS: [&str; 11] = [
    "because",
    "caused by",
    "due to",
    "broken",
    "bleeding",
    "injured",
    "trapped",
    "unconscious",
    "passed out",
    "license",
    "wearing",
];

const MAX_OPENING_WORDS: usize = 12;

/// Ninth pass: on the first exchange of a call, when the dispatcher asked
/// the canonical opening question, cuts the answer down to the bare
/// emergency statement.
pub fn constrain_first_turn(text: &str, ctx: &SanitizeContext<'_>) -> String {
    if !ctx.is_first_turn || !is_opening_question(ctx.last_question) {
        return text.to_string();
    }

    let lower = text.to_lowercase();
    let mut out = text.to_string();
    if VOLUNTEERED_DETAIL_MARKERS
        .iter()
        .any(|m| lower.contains(m))
    {
        let sentence = first_sentence(text);
        // Never cut below the minimum-content floor; a one-word opening
        // would bounce to the fallback line on the next pass.
        if sentence.split_whitespace().count() >= 3 {
            out = sentence;
        }
    }

    let words: Vec<&str> = out.split_whitespace().collect();
    if words.len() > MAX_OPENING_WORDS {
        let mut cut = words[..MAX_OPENING_WORDS].join(" ");
        while cut.ends_with([',', ';']) {
            cut.pop();
        }
        if !cut.ends_with(['.', '!', '?']) {
            cut.push('.');
        }
        out = cut;
    }
    out
}

fn first_sentence(text: &str) -> String {
    match text.find(['.', '!', '?']) {
        Some(idx) => text[..=idx].to_string(),
        None => text.to_string(),
    }
}
