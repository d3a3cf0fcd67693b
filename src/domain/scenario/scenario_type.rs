//! Scenario type enumeration keyed by dispatch code.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DomainError, Intensity};

/// A named emergency category, identified by its dispatch code.
///
/// The closed set of scenarios the simulator can run. Parsing an unknown
/// code fails at session creation; there is no fallback scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioType {
    /// 10-01: Injury motor vehicle collision.
    TrafficAccidentInjury,
    /// 10-02: Non-injury motor vehicle collision.
    TrafficAccidentNonInjury,
    /// 10-07: Third-party suicide threat.
    SuicideThreat,
    /// 10-08H: Home invasion.
    HomeInvasion,
    /// 10-21: Mental health concern.
    MentalHealth,
    /// 10-30: Robbery with injury.
    Robbery,
    /// 10-34: Theft from premises.
    Theft,
    /// 10-34-gas: Gas-and-dash theft.
    GasTheft,
    /// 10-83: Impaired driver in progress.
    ImpairedDriver,
    /// 10-88: Traffic hazard.
    TrafficHazard,
}

impl ScenarioType {
    /// All scenario types, in dispatch-code order.
    pub const ALL: [ScenarioType; 10] = [
        ScenarioType::TrafficAccidentInjury,
        ScenarioType::TrafficAccidentNonInjury,
        ScenarioType::SuicideThreat,
        ScenarioType::HomeInvasion,
        ScenarioType::MentalHealth,
        ScenarioType::Robbery,
        ScenarioType::Theft,
        ScenarioType::GasTheft,
        ScenarioType::ImpairedDriver,
        ScenarioType::TrafficHazard,
    ];

    /// Returns the dispatch code for this scenario.
    pub fn code(&self) -> &'static str {
        match self {
            ScenarioType::TrafficAccidentInjury => "10-01",
            ScenarioType::TrafficAccidentNonInjury => "10-02",
            ScenarioType::SuicideThreat => "10-07",
            ScenarioType::HomeInvasion => "10-08H",
            ScenarioType::MentalHealth => "10-21",
            ScenarioType::Robbery => "10-30",
            ScenarioType::Theft => "10-34",
            ScenarioType::GasTheft => "10-34-gas",
            ScenarioType::ImpairedDriver => "10-83",
            ScenarioType::TrafficHazard => "10-88",
        }
    }

    /// Parses a dispatch code string into a scenario type.
    ///
    /// # Errors
    ///
    /// - `UnknownScenario` if the code is not registered
    pub fn from_code(code: &str) -> Result<Self, DomainError> {
        ScenarioType::ALL
            .iter()
            .copied()
            .find(|s| s.code() == code)
            .ok_or_else(|| DomainError::unknown_scenario(code))
    }

    /// Returns true for violent or high-stakes scenarios.
    ///
    /// These start the caller at peak distress.
    pub fn is_high_severity(&self) -> bool {
        matches!(
            self,
            ScenarioType::Robbery | ScenarioType::HomeInvasion | ScenarioType::SuicideThreat
        )
    }

    /// Intensity the caller starts a session at for this scenario.
    pub fn initial_intensity(&self) -> Intensity {
        if self.is_high_severity() {
            Intensity::new(9)
        } else {
            Intensity::new(7)
        }
    }
}

impl fmt::Display for ScenarioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
