//! Naturalization: formal register to spoken register, plus optional
//! urgency markers when the caller is agitated.

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::{Captures, Regex};

use crate::domain::caller::EmotionalState;

/// Formal words no panicked caller would use, with their spoken stand-ins.
const SUBSTITUTIONS: [(&str, &str); 14] = [
    ("vehicle", "car"),
    ("automobile", "car"),
    ("unconscious", "passed out"),
    ("utilize", "use"),
    ("residence", "house"),
    ("individual", "person"),
    ("approximately", "about"),
    ("immediately", "right away"),
    ("assistance", "help"),
    ("purchase", "buy"),
    ("attempting", "trying"),
    ("observed", "saw"),
    ("proceeding", "going"),
    ("intoxicated", "drunk"),
];

/// Uncontracted pairs spoken English always contracts.
const CONTRACTIONS: [(&str, &str); 13] = [
    ("do not", "don't"),
    ("does not", "doesn't"),
    ("did not", "didn't"),
    ("cannot", "can't"),
    ("can not", "can't"),
    ("will not", "won't"),
    ("is not", "isn't"),
    ("are not", "aren't"),
    ("was not", "wasn't"),
    ("i am", "I'm"),
    ("i have", "I've"),
    ("i will", "I'll"),
    ("there is", "there's"),
];

static REWRITES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    SUBSTITUTIONS
        .iter()
        .chain(CONTRACTIONS.iter())
        .map(|(pattern, replacement)| {
            let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(pattern))).unwrap();
            (re, *replacement)
        })
        .collect()
});

/// Interjections an agitated caller may open with. Also the guard set: a
/// line already starting with one never gets another.
const URGENCY_MARKERS: [&str; 3] = ["Oh God, ", "Please, ", "Hurry, "];

const INTERJECTION_OPENINGS: [&str; 6] =
    ["oh god", "oh my god", "oh no", "please", "hurry", "help"];

/// Lines already opening with a structured answer keep their shape; an
/// interjection in front would undo the validator's work on a later run.
const ANSWER_OPENINGS: [&str; 5] = ["yes, ", "no, ", "it's ", "looks like ", "i'd say "];

/// Chance of prefixing an urgency marker on an agitated turn.
const URGENCY_MARKER_PROBABILITY: f64 = 0.15;

fn starts_with_interjection(text: &str) -> bool {
    let lower = text.trim_start().to_lowercase();
    INTERJECTION_OPENINGS.iter().any(|i| lower.starts_with(i))
        || ANSWER_OPENINGS.iter().any(|o| lower.starts_with(o))
}

fn preserve_leading_case(matched: &str, replacement: &str) -> String {
    if matched.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = replacement.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    } else {
        replacement.to_string()
    }
}

/// Eighth pass: applies the register rewrites (case-preserving) and, with
/// low probability on agitated turns, prefixes one urgency marker.
pub fn naturalize<R: Rng + ?Sized>(text: &str, state: EmotionalState, rng: &mut R) -> String {
    let mut out = text.to_string();
    for (re, replacement) in REWRITES.iter() {
        out = re
            .replace_all(&out, |caps: &Captures| {
                preserve_leading_case(&caps[0], replacement)
            })
            .into_owned();
    }

    if state.is_agitated()
        && !out.is_empty()
        && !starts_with_interjection(&out)
        && rng.gen_bool(URGENCY_MARKER_PROBABILITY)
    {
        if let Some(marker) = URGENCY_MARKERS.choose(rng) {
            let mut chars = out.chars();
            let lowered = match chars.next() {
                // The pronoun keeps its capital after a marker.
                Some('I') if !chars.as_str().chars().next().is_some_and(|c| c.is_alphabetic()) => {
                    out.clone()
                }
                Some(first) => format!("{}{}", first.to_lowercase(), chars.as_str()),
                None => out.clone(),
            };
            out = format!("{}{}", marker, lowered);
        }
    }

    out
}
