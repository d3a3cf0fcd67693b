//! Question/answer validation - checks that a candidate response actually
//! addresses the dispatcher's question, and corrects it additively if not.

use once_cell::sync::Lazy;

use crate::domain::caller::is_opening_question;

/// Keyword-table question categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionCategory {
    Safe,
    Location,
    People,
    Vehicle,
    Hazard,
    Medical,
    Description,
}

/// What kind of question the dispatcher asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// Starts with an auxiliary verb; needs an explicit yes/no/hedge.
    YesNo,
    /// "How many" - needs a numeral token.
    Count,
    /// "What color" - needs a color word.
    Color,
    /// Keyword-classified category question.
    Category(QuestionCategory),
}

const AUX_VERBS: [&str; 11] = [
    "is", "are", "do", "does", "did", "was", "were", "has", "have", "can", "could",
];

const AFFIRMATION_TOKENS: [&str; 12] = [
    "yes", "yeah", "yep", "no", "nope", "not", "maybe", "think", "sure", "probably", "believe",
    "dunno",
];

const NUMERAL_WORDS: [&str; 15] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "dozen", "both",
];

const COLOR_WORDS: [&str; 15] = [
    "red", "blue", "green", "white", "black", "grey", "gray", "silver", "brown", "yellow",
    "orange", "dark", "light", "tan", "beige",
];

static QUESTION_KEYWORDS: Lazy<Vec<(QuestionCategory, &'static [&'static str])>> =
    Lazy::new(|| {
        vec![
            (QuestionCategory::Safe, &["safe", "danger"][..]),
            (
                QuestionCategory::Location,
                &["where", "address", "location", "intersection", "cross street"][..],
            ),
            (
                QuestionCategory::People,
                &["who", "anyone", "people", "others"][..],
            ),
            (
                QuestionCategory::Vehicle,
                &["vehicle", "car", "truck", "plate", "license"][..],
            ),
            (
                QuestionCategory::Hazard,
                &["weapon", "gun", "knife", "fire", "smoke", "armed", "hazard"][..],
            ),
            (
                QuestionCategory::Medical,
                &["hurt", "injured", "bleeding", "breathing", "conscious", "medical"][..],
            ),
            (
                QuestionCategory::Description,
                &["describe", "look like", "wearing", "model"][..],
            ),
        ]
    });

static RESPONSE_KEYWORDS: Lazy<Vec<(QuestionCategory, &'static [&'static str])>> =
    Lazy::new(|| {
        vec![
            (
                QuestionCategory::Safe,
                &["safe", "okay", "fine", "hiding", "scared", "afraid"][..],
            ),
            (
                QuestionCategory::Location,
                &[
                    "street",
                    "avenue",
                    "road",
                    "trail",
                    "drive",
                    "boulevard",
                    "highway",
                    "mall",
                    "store",
                    "station",
                    "house",
                    "home",
                    "apartment",
                    "corner",
                    "intersection",
                    "downtown",
                    "block",
                    "near",
                ][..],
            ),
            (
                QuestionCategory::People,
                &[
                    "people", "person", "man", "woman", "guy", "kid", "kids", "children",
                    "alone", "nobody", "everyone", "driver", "victim",
                ][..],
            ),
            (
                QuestionCategory::Vehicle,
                &[
                    "car",
                    "truck",
                    "suv",
                    "van",
                    "sedan",
                    "pickup",
                    "motorcycle",
                    "plate",
                    "license",
                ][..],
            ),
            (
                QuestionCategory::Hazard,
                &["gun", "knife", "weapon", "fire", "smoke", "armed", "spray"][..],
            ),
            (
                QuestionCategory::Medical,
                &[
                    "bleeding",
                    "breathing",
                    "conscious",
                    "unconscious",
                    "hurt",
                    "injured",
                    "awake",
                    "responsive",
                    "passed out",
                ][..],
            ),
            (
                QuestionCategory::Description,
                &[
                    "wearing", "tall", "short", "build", "hair", "jacket", "hoody", "cap",
                    "jeans", "shirt",
                ][..],
            ),
        ]
    });

/// Checks whether `term` occurs in `text` (case-insensitive).
///
/// Single words match on word boundaries; multi-word terms match as
/// substrings.
pub(crate) fn contains_term(text: &str, term: &str) -> bool {
    let lower = text.to_lowercase();
    if term.contains(' ') {
        return lower.contains(term);
    }
    lower
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .any(|word| word.trim_matches('\'') == term)
}

fn contains_numeral(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
        || NUMERAL_WORDS.iter().any(|w| contains_term(text, w))
}

fn contains_hedge(text: &str) -> bool {
    AFFIRMATION_TOKENS.iter().any(|t| contains_term(text, t))
}

/// The opener `correct()` prefixes for each question kind.
fn opener_for(kind: QuestionKind) -> &'static str {
    match kind {
        QuestionKind::YesNo => "Yes, ",
        QuestionKind::Count => "I'd say one, ",
        QuestionKind::Color => "Looks like ",
        QuestionKind::Category(QuestionCategory::Location) => "It's ",
        QuestionKind::Category(QuestionCategory::Vehicle)
        | QuestionKind::Category(QuestionCategory::Description) => "Looks like ",
        QuestionKind::Category(_) => "I'd say ",
    }
}

/// Classifies a dispatcher utterance by question kind.
///
/// Special forms (count, color, yes/no) take priority over the keyword
/// table. The canonical call opening is not classified; its handling is the
/// first-turn constraint's job.
pub fn classify_question(question: &str) -> Option<QuestionKind> {
    let trimmed = question.trim();
    if trimmed.is_empty() || is_opening_question(trimmed) {
        return None;
    }
    let lower = trimmed.to_lowercase();

    if lower.contains("how many") {
        return Some(QuestionKind::Count);
    }
    if lower.contains("what color") || lower.contains("what colour") {
        return Some(QuestionKind::Color);
    }
    if let Some(first_word) = lower
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .find(|w| !w.is_empty())
    {
        if AUX_VERBS.contains(&first_word) {
            return Some(QuestionKind::YesNo);
        }
    }

    QUESTION_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| contains_term(&lower, kw)))
        .map(|(category, _)| QuestionKind::Category(*category))
}

/// Returns true if the response addresses the question.
///
/// A response that begins with the kind's correction opener counts as a
/// direct answer; so does a hedge ("I'm not sure") for everything except
/// count questions, which always require a numeral.
pub fn validate(question: &str, response: &str) -> bool {
    let Some(kind) = classify_question(question) else {
        return true;
    };

    let lower = response.trim().to_lowercase();
    if lower.starts_with(&opener_for(kind).to_lowercase()) {
        // Opener implies numeral for Count ("I'd say one, "), so this is
        // safe for every kind.
        return true;
    }

    match kind {
        QuestionKind::YesNo => contains_hedge(response),
        QuestionKind::Count => contains_numeral(response),
        QuestionKind::Color => {
            COLOR_WORDS.iter().any(|c| contains_term(response, c)) || contains_hedge(response)
        }
        QuestionKind::Category(category) => {
            let keywords = RESPONSE_KEYWORDS
                .iter()
                .find(|(c, _)| c == &category)
                .map(|(_, kws)| *kws)
                .unwrap_or(&[]);
            keywords.iter().any(|kw| contains_term(response, kw)) || contains_hedge(response)
        }
    }
}

/// Corrects a response that fails validation by prefixing a minimal,
/// question-appropriate opener. Correction is additive: the original text
/// is kept, never regenerated. Valid responses pass through unchanged.
pub fn correct(question: &str, response: &str) -> String {
    if validate(question, response) {
        return response.to_string();
    }
    let Some(kind) = classify_question(question) else {
        return response.to_string();
    };

    let opener = opener_for(kind);
    let body = decapitalize(response.trim());
    format!("{}{}", opener, body)
}

/// Lowercases the first letter unless the text starts with the pronoun "I".
fn decapitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first == 'I' => {
            // "I", "I'm", "I'd" keep their capital; "It", "Is" do not when
            // followed by a lowercase continuation of a new clause.
            let rest: String = chars.collect();
            if rest.is_empty() || !rest.chars().next().is_some_and(|c| c.is_alphabetic()) {
                format!("I{}", rest)
            } else {
                format!("i{}", rest)
            }
        }
        Some(first) => format!("{}{}", first.to_lowercase(), chars.collect::<String>()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod classification {
        use super::*;

        #[test]
        fn where_question_is_location() {
            assert_eq!(
                classify_question("Where are you?"),
                Some(QuestionKind::Category(QuestionCategory::Location))
            );
        }

        #[test]
        fn aux_verb_start_is_yes_no() {
            assert_eq!(classify_question("Is anyone hurt?"), Some(QuestionKind::YesNo));
            assert_eq!(
                classify_question("Can you see the driver?"),
                Some(QuestionKind::YesNo)
            );
        }

        #[test]
        fn how_many_is_count() {
            assert_eq!(
                classify_question("How many people are there?"),
                Some(QuestionKind::Count)
            );
        }

        #[test]
        fn what_color_is_color() {
            assert_eq!(
                classify_question("What color is the car?"),
                Some(QuestionKind::Color)
            );
        }

        #[test]
        fn opening_question_is_not_classified() {
            assert_eq!(classify_question("911, what is your emergency?"), None);
        }

        #[test]
        fn small_talk_is_not_classified() {
            assert_eq!(classify_question("Okay, stay with me."), None);
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn location_answer_with_keyword_passes() {
            assert!(validate("Where are you?", "I'm at South Centre Mall."));
        }

        #[test]
        fn location_answer_without_keyword_fails() {
            assert!(!validate("Where are you?", "He ran off with my wallet."));
        }

        #[test]
        fn yes_no_requires_explicit_token() {
            assert!(validate("Is anyone hurt?", "Yes, the driver is bleeding."));
            assert!(validate("Is anyone hurt?", "I'm not sure."));
            assert!(!validate("Is anyone hurt?", "The car rolled over."));
        }

        #[test]
        fn count_requires_numeral() {
            assert!(validate("How many people are there?", "There are three of them."));
            assert!(validate("How many cars?", "2 cars."));
            assert!(!validate("How many people are there?", "A lot of people."));
        }

        #[test]
        fn count_rejects_bare_hedge() {
            assert!(!validate("How many people?", "I'm not sure."));
        }

        #[test]
        fn color_requires_color_word() {
            assert!(validate("What color is the car?", "It was white."));
            assert!(!validate("What color is the car?", "It drove off fast."));
        }

        #[test]
        fn unclassified_question_always_passes() {
            assert!(validate("Okay, stay with me.", "Okay."));
        }
    }

    mod correction {
        use super::*;

        #[test]
        fn valid_response_is_unchanged() {
            let text = "I'm at South Centre Mall.";
            assert_eq!(correct("Where are you?", text), text);
        }

        #[test]
        fn location_correction_prefixes_its() {
            let corrected = correct("Where are you?", "He ran off with my wallet.");
            assert!(corrected.starts_with("It's "));
            assert!(corrected.contains("he ran off with my wallet."));
        }

        #[test]
        fn corrected_location_response_validates() {
            let corrected = correct("Where are you?", "He ran off with my wallet.");
            assert!(validate("Where are you?", &corrected));
        }

        #[test]
        fn count_correction_injects_numeral() {
            let corrected = correct("How many people are there?", "A lot of people.");
            assert!(corrected.starts_with("I'd say one, "));
            assert!(validate("How many people are there?", &corrected));
        }

        #[test]
        fn yes_no_correction_prefixes_yes() {
            let corrected = correct("Is the driver awake?", "He rolled into the ditch.");
            assert!(corrected.starts_with("Yes, "));
        }

        #[test]
        fn correction_is_idempotent() {
            let question = "Where are you?";
            let once = correct(question, "He ran off with my wallet.");
            let twice = correct(question, &once);
            assert_eq!(once, twice);
        }

        #[test]
        fn correction_preserves_leading_i() {
            let corrected = correct("Where are you?", "I can't tell from here.");
            assert_eq!(corrected, "It's I can't tell from here.");
        }
    }
}
