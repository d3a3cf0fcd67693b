//! Minimum-content guarantee: an empty or near-empty cleaned response is
//! replaced with a plausible answer keyed off the question type.

use super::validator::contains_term;

const LOCATION_FALLBACK: &str = "It's on Deerfoot Trail.";
const CONTACT_FALLBACK: &str = "It's 403-561-9988.";
const DEFAULT_FALLBACK: &str = "I'm not sure about that.";

/// Picks the stand-in line for a question the model failed to answer.
pub fn fallback_for(last_question: &str) -> String {
    let lower = last_question.to_lowercase();
    if ["where", "address", "location"]
        .iter()
        .any(|kw| contains_term(&lower, kw))
    {
        LOCATION_FALLBACK.to_string()
    } else if ["phone", "number", "callback"]
        .iter()
        .any(|kw| contains_term(&lower, kw))
    {
        CONTACT_FALLBACK.to_string()
    } else {
        DEFAULT_FALLBACK.to_string()
    }
}

/// Sixth pass: replaces responses shorter than three words.
pub fn ensure_minimum_content(text: &str, last_question: &str) -> String {
    if text.split_whitespace().count() < 3 {
        fallback_for(last_question)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_response_uses_default_fallback() {
        assert_eq!(ensure_minimum_content("", "Okay."), DEFAULT_FALLBACK);
    }

    #[test]
    fn two_word_response_is_replaced() {
        assert_eq!(ensure_minimum_content("Uh, yes.", "Okay."), DEFAULT_FALLBACK);
    }

    #[test]
    fn three_word_response_is_kept() {
        assert_eq!(
            ensure_minimum_content("He ran off.", "Okay."),
            "He ran off."
        );
    }

    #[test]
    fn location_question_gets_a_location_answer() {
        assert_eq!(
            ensure_minimum_content("", "Where are you right now?"),
            LOCATION_FALLBACK
        );
    }

    #[test]
    fn contact_question_gets_a_number() {
        assert_eq!(
            ensure_minimum_content("", "What's your phone number?"),
            CONTACT_FALLBACK
        );
    }
}
