//! Fragment repair: rejoins stutter-split sentence starts and fixes
//! casing the artifact passes may have disturbed.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// A short word, a period, then a word that restarts it ("It. It's").
static SPLIT_FRAGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Za-z]{1,4})\.\s+([A-Za-z']+)").unwrap());

/// Lone lowercase pronoun "i".
static LONE_I: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bi\b").unwrap());

/// Fourth pass: rejoins split fragments, restores the pronoun "I", and
/// capitalizes sentence starts.
pub fn repair_fragments(text: &str) -> String {
    // Stutters chain ("It. It. It's"), so rejoin until nothing changes.
    let mut rejoined = text.to_string();
    loop {
        let next = SPLIT_FRAGMENT
            .replace_all(&rejoined, |caps: &Captures| {
                let fragment = caps[1].to_lowercase();
                let continuation = &caps[2];
                if continuation.len() > fragment.len()
                    && continuation.to_lowercase().starts_with(&fragment)
                {
                    continuation.to_string()
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned();
        if next == rejoined {
            break;
        }
        rejoined = next;
    }

    let restored = LONE_I.replace_all(&rejoined, "I");
    capitalize_sentences(&restored)
}

/// Uppercases the first letter of the text and of every sentence after a
/// terminal mark.
fn capitalize_sentences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_sentence_start = true;
    for c in text.chars() {
        if at_sentence_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            at_sentence_start = false;
        } else {
            if matches!(c, '.' | '!' | '?') {
                at_sentence_start = true;
            } else if !c.is_whitespace() {
                at_sentence_start = false;
            }
            out.push(c);
        }
    }
    out
}
