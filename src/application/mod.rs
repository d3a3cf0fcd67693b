//! Application layer - session orchestration over the domain and ports.

mod session;
mod simulation;

pub use session::{EmotionalTimelineEntry, SessionData, SessionSummary};
pub use simulation::{Simulation, StartSessionOutcome, TurnOutcome};
