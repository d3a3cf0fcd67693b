//! Scenario module - emergency categories and their per-call facts.

mod catalog;
mod context;
mod scenario_type;

pub use catalog::{select_variant, variant_count};
pub use context::ScenarioContext;
pub use scenario_type::ScenarioType;
