//! Emotional-leakage removal.
//!
//! Emotion must come through word choice and punctuation, never through the
//! caller narrating their own distress ("I'm crying", "shaking so badly").

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::collapse_whitespace;

/// Self-narrated distress descriptors. Closed list.
const LEAKAGE_PHRASES: [&str; 12] = [
    "breathing quickly",
    "breathing heavily",
    "taking deep breaths",
    "holding my chest",
    "clutching my heart",
    "hyperventilating",
    "panicking",
    "trembling",
    "shaking",
    "sobbing",
    "crying",
    "pacing",
];

static LEAKAGE_RE: Lazy<Regex> = Lazy::new(|| {
    let alternation = LEAKAGE_PHRASES.join("|");
    Regex::new(&format!(r"(?i)\b({})\b", alternation)).unwrap()
});

/// "-ly" adverbs, minus the conversational ones that carry meaning.
static LY_ADVERB: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Za-z]+ly\b").unwrap());

const KEPT_ADVERBS: [&str; 3] = ["only", "really", "actually"];

static ORPHANED_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+([,.!?;])").unwrap());
static DOUBLED_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*,").unwrap());

/// Seventh pass: strips self-narrated distress and decorative adverbs, then
/// repairs the punctuation holes.
pub fn remove_emotional_leakage(text: &str) -> String {
    let stripped = LEAKAGE_RE.replace_all(text, "");
    let stripped = LY_ADVERB.replace_all(&stripped, |caps: &Captures| {
        let word = caps[0].to_lowercase();
        if KEPT_ADVERBS.contains(&word.as_str()) {
            caps[0].to_string()
        } else {
            String::new()
        }
    });

    let collapsed = collapse_whitespace(&stripped);
    let repaired = ORPHANED_PUNCT.replace_all(&collapsed, "$1");
    let repaired = DOUBLED_COMMA.replace_all(&repaired, ",");
    // Closing punctuation holes can butt terminal marks together, expose a
    // lowercase sentence start, or recreate a stutter split; all three were
    // settled in earlier passes and must stay settled.
    let repaired = super::punctuation::collapse_terminal_runs(&repaired);
    let repaired = repaired.trim_start_matches([',', ';', ' ']).trim();
    super::fragments::repair_fragments(repaired)
}
