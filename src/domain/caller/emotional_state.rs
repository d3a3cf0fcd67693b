//! Emotional state of the simulated caller.
//!
//! The discrete state is never stored independently: it is always derived
//! from the 1-10 intensity value, so the two cannot diverge.

use serde::{Deserialize, Serialize};

use crate::domain::compliance::question_quality;
use crate::domain::foundation::Intensity;

/// The caller's discrete mood, derived from intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionalState {
    /// Composed and cooperative. Reserved for externally supplied states;
    /// the intensity derivation bottoms out at `Relieved`.
    Calm,
    /// Anxious but coherent.
    Worried,
    /// Distressed, speech fragmenting.
    Panicked,
    /// Barely coherent.
    Hysterical,
    /// Tension has broken; the caller is winding down.
    Relieved,
}

impl EmotionalState {
    /// Derives the discrete state from an intensity value.
    ///
    /// intensity <= 3 => Relieved, <= 5 => Worried, <= 8 => Panicked,
    /// otherwise Hysterical.
    pub fn from_intensity(intensity: Intensity) -> Self {
        match intensity.tenths() {
            t if t <= 30 => EmotionalState::Relieved,
            t if t <= 50 => EmotionalState::Worried,
            t if t <= 80 => EmotionalState::Panicked,
            _ => EmotionalState::Hysterical,
        }
    }

    /// Returns true for the high-distress states where exclamations and
    /// urgency markers are permitted.
    pub fn is_agitated(&self) -> bool {
        matches!(self, EmotionalState::Panicked | EmotionalState::Hysterical)
    }

    /// Returns true for the low-distress states where punctuation is damped.
    pub fn is_settled(&self) -> bool {
        matches!(self, EmotionalState::Calm | EmotionalState::Relieved)
    }

    /// Returns the state name as used in prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionalState::Calm => "calm",
            EmotionalState::Worried => "worried",
            EmotionalState::Panicked => "panicked",
            EmotionalState::Hysterical => "hysterical",
            EmotionalState::Relieved => "relieved",
        }
    }
}

/// Phrases from the dispatcher that de-escalate the caller one level.
const CALMING_PHRASES: [&str; 2] = ["calm down", "stay calm"];

/// Phrases signalling help is en route, the strongest de-escalator.
const HELP_PHRASES: [&str; 2] = ["help is coming", "on the way"];

/// Words in the caller's own reply that signal lingering urgency.
const URGENCY_WORDS: [&str; 3] = ["urgent", "quickly", "hurry"];

/// Advances intensity for one exchange.
///
/// The phrase rules are mutually exclusive and checked in priority order
/// (first match wins); the question-quality nudge is applied afterwards
/// regardless. The dispatcher line is evaluated raw; the response is the
/// post-cleaning text.
pub fn advance_intensity(
    intensity: Intensity,
    dispatcher_utterance: &str,
    response_text: &str,
) -> Intensity {
    let dispatcher = dispatcher_utterance.to_lowercase();
    let response = response_text.to_lowercase();

    let after_rules = if CALMING_PHRASES.iter().any(|p| dispatcher.contains(p)) {
        intensity.decrease(1, 1)
    } else if HELP_PHRASES.iter().any(|p| dispatcher.contains(p)) {
        intensity.decrease(2, 3)
    } else if URGENCY_WORDS.iter().any(|w| response.contains(w)) {
        intensity.increase(1)
    } else {
        intensity
    };

    let quality = question_quality(dispatcher_utterance);
    if quality < 0.5 {
        after_rules.nudge_tenths(5)
    } else if quality > 0.8 {
        after_rules.nudge_tenths(-3)
    } else {
        after_rules
    }
}
