//! Raw model output hygiene: control tokens, role labels, wrapping quotes,
//! bracketed asides, and narrated stage directions.

use once_cell::sync::Lazy;
use regex::Regex;

use super::collapse_whitespace;

/// Template control tokens that must never reach the trainee.
const CONTROL_TOKENS: [&str; 7] = [
    "<|begin_of_text|>",
    "<|end_of_text|>",
    "<|eot_id|>",
    "<|start_header_id|>",
    "<|end_header_id|>",
    "<|im_start|>",
    "<|im_end|>",
];

/// Role labels models prepend when they narrate the transcript format.
/// Ordered longest-first so "assistant:" wins over "a:".
const ROLE_PREFIXES: [&str; 7] = [
    "911 caller:",
    "assistant:",
    "assistant",
    "response:",
    "caller:",
    "user:",
    "a:",
];

/// First pass: strips control tokens and markdown markers, keeps only the
/// first non-empty line, and peels role-label prefixes until none remain.
pub fn strip_artifacts(raw: &str) -> String {
    let mut text = raw.to_string();
    for token in CONTROL_TOKENS {
        text = text.replace(token, "");
    }
    text = text.replace(['*', '`'], "");

    // First non-empty line that is not itself a bare role label; chat
    // templates often put "assistant" alone on its own line.
    let mut line = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .find(|l| {
            let lower = l.to_lowercase();
            !ROLE_PREFIXES
                .iter()
                .any(|p| lower == *p || lower == p.trim_end_matches(':'))
        })
        .unwrap_or("")
        .to_string();

    loop {
        let lower = line.to_lowercase();
        let Some(prefix) = ROLE_PREFIXES.iter().find(|p| lower.starts_with(**p)) else {
            break;
        };
        line = line[prefix.len()..].trim_start().to_string();
    }

    line.trim().to_string()
}

static PAREN_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").unwrap());
static BRACKET_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").unwrap());

/// Second pass: removes a single pair of wrapping quotes and deletes
/// parenthesized or bracketed asides along with their content.
pub fn strip_quotes_and_brackets(text: &str) -> String {
    let mut out = text.trim().to_string();

    for (open, close) in [('"', '"'), ('\u{201c}', '\u{201d}'), ('\'', '\'')] {
        if out.len() >= 2 && out.starts_with(open) && out.ends_with(close) {
            out = out[open.len_utf8()..out.len() - close.len_utf8()].to_string();
            break;
        }
    }

    let out = PAREN_SPAN.replace_all(&out, "");
    let out = BRACKET_SPAN.replace_all(&out, "");
    collapse_whitespace(&out)
}

/// Narrated performance verbs; these describe the caller instead of letting
/// them speak.
const STAGE_DIRECTIONS: [&str; 12] = [
    "takes a deep breath",
    "breathing heavily",
    "clears throat",
    "sniffles",
    "whimpers",
    "whimpering",
    "sobbing",
    "sighing",
    "pauses",
    "gasping",
    "gasps",
    "sighs",
];

static STAGE_DIRECTION_RE: Lazy<Regex> = Lazy::new(|| {
    let alternation = STAGE_DIRECTIONS.join("|");
    Regex::new(&format!(r"(?i)\b({})\b", alternation)).unwrap()
});

static ORPHANED_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+([,.!?;])").unwrap());
static DOUBLED_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*,").unwrap());

/// Third pass: removes stage-direction verbs left outside brackets and
/// repairs the punctuation holes the removal leaves behind.
pub fn strip_stage_directions(text: &str) -> String {
    let stripped = STAGE_DIRECTION_RE.replace_all(text, "");
    let collapsed = collapse_whitespace(&stripped);
    let repaired = ORPHANED_PUNCT.replace_all(&collapsed, "$1");
    let repaired = DOUBLED_COMMA.replace_all(&repaired, ",");
    repaired
        .trim_start_matches([',', '.', ';', ' '])
        .trim()
        .to_string()
}
