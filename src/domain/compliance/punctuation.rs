//! Punctuation normalization, scaled to the caller's emotional state.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::domain::caller::EmotionalState;

/// Any run of two or more terminal marks, mixed or not.
static TERMINAL_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]{2,}").unwrap());

/// Collapses runs of terminal marks to a single mark: "?!" keeps the
/// question, "!." keeps the exclamation, "..." collapses to a period.
pub(crate) fn collapse_terminal_runs(text: &str) -> String {
    TERMINAL_RUN
        .replace_all(text, |caps: &Captures| {
            let run = &caps[0];
            if run.contains('?') {
                "?"
            } else if run.contains('!') {
                "!"
            } else {
                "."
            }
        })
        .into_owned()
}

/// Fifth pass: collapses punctuation runs, resolves mixed terminals, damps
/// exclamations to match the emotional state, and guarantees exactly one
/// terminal mark.
pub fn normalize_punctuation(text: &str, state: EmotionalState) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let collapsed = collapse_terminal_runs(trimmed);

    let mut damped = String::with_capacity(collapsed.len());
    let mut exclamations = 0;
    for c in collapsed.chars() {
        if c == '!' {
            exclamations += 1;
            if state.is_settled() || (state.is_agitated() && exclamations > 2) {
                damped.push('.');
            } else if state == EmotionalState::Worried && exclamations > 1 {
                damped.push('.');
            } else {
                damped.push('!');
            }
        } else {
            damped.push(c);
        }
    }

    let mut out = damped.trim_end().to_string();
    if !out.ends_with(['.', '!', '?']) {
        out.push('.');
    }
    out
}
