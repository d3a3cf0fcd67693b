//! Scenario catalog - the variant pool for each scenario type.

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

use super::{ScenarioContext, ScenarioType};
use crate::domain::foundation::DomainError;

static CATALOG: Lazy<HashMap<ScenarioType, Vec<ScenarioContext>>> = Lazy::new(build_catalog);

/// Selects a scenario variant for the given type using the supplied RNG.
///
/// Types with more than one registered variant get a random pick; the RNG is
/// injected so tests can pin the selection with a fixed seed.
///
/// # Errors
///
/// - `UnknownScenario` if the type has no registered variants
pub fn select_variant<R: Rng>(
    scenario: ScenarioType,
    rng: &mut R,
) -> Result<ScenarioContext, DomainError> {
    CATALOG
        .get(&scenario)
        .and_then(|variants| variants.choose(rng))
        .cloned()
        .ok_or_else(|| DomainError::unknown_scenario(scenario.code()))
}

/// Returns how many variants are registered for a scenario type.
pub fn variant_count(scenario: ScenarioType) -> usize {
    CATALOG.get(&scenario).map_or(0, Vec::len)
}

fn variant(
    location: &str,
    caller_name: &str,
    phone: &str,
    situation: &str,
    current_status: &str,
    caller_background: &str,
    initial_response: &str,
) -> ScenarioContext {
    ScenarioContext {
        location: location.to_string(),
        caller_name: caller_name.to_string(),
        phone: phone.to_string(),
        situation: situation.to_string(),
        current_status: current_status.to_string(),
        caller_background: caller_background.to_string(),
        initial_response: initial_response.to_string(),
    }
}

fn build_catalog() -> HashMap<ScenarioType, Vec<ScenarioContext>> {
    let mut catalog = HashMap::new();

    catalog.insert(
        ScenarioType::TrafficAccidentInjury,
        vec![
            variant(
                "Cranston Ave SE / Deerfoot Tr SE",
                "Broderick Greene",
                "403-561-9988",
                "Witnessed a rollover accident. White SUV is currently in the ditch off \
                 southbound Deerfoot Trail just south of Cranston Ave SE. Vehicle appears \
                 to have rolled over due to black ice conditions.",
                "Drive-by caller who has already left the scene. Observed the accident \
                 about 1 minute ago. Driver appears to be injured and trapped in the \
                 overturned vehicle.",
                "Excited drive-by caller who witnessed the accident while driving. Not at \
                 scene anymore but concerned about the driver's safety.",
                "There's been a bad accident!",
            ),
            variant(
                "Memorial Dr NW / 19 St NW",
                "Sarah Mitchell",
                "403-555-7234",
                "Multi-vehicle collision involving three cars. Front car stopped suddenly, \
                 causing chain reaction. Two vehicles have significant front/rear damage.",
                "All drivers are out of vehicles and appear conscious. Traffic is \
                 completely blocked eastbound on Memorial Drive. Some people seem shaken up.",
                "Pedestrian witness who saw the accident from the sidewalk. Stopped to \
                 help and call 911.",
                "There's been a three-car accident.",
            ),
        ],
    );

    catalog.insert(
        ScenarioType::TrafficAccidentNonInjury,
        vec![variant(
            "10 AV SW / 16 ST SW",
            "Candy Wise",
            "587-543-6789",
            "Non-injury accident - one vehicle rear ended another at intersection. Both \
             vehicles still drivable.",
            "Drivers are exchanging information. Traffic backing up but no injuries \
             reported.",
            "Witness who saw the accident but didn't stop. Vague about location details.",
            "I just saw a car accident!",
        )],
    );

    catalog.insert(
        ScenarioType::SuicideThreat,
        vec![variant(
            "Unknown",
            "Beth Hunter",
            "403-266-4357",
            "Male caller to distress center threatened to take pills after recent breakup.",
            "Caller hung up when told police would be contacted. Identity: Dan Depta, \
             possibly middle-aged, might be drinking.",
            "Distress center employee reporting third-party suicide threat. Cooperative \
             but lacks location information.",
            "A man threatened to kill himself!",
        )],
    );

    catalog.insert(
        ScenarioType::HomeInvasion,
        vec![variant(
            "33 Brightondale Pr SE",
            "Tony Hernandez",
            "403-483-4384",
            "Two men kicked down the door and invaded home. Used bear spray and knife. \
             Stole laptop.",
            "Caller hiding in bedroom. Intruders just left but might return. Caller's \
             eyes burning from bear spray. Home trashed.",
            "Homeowner terrified for safety. Hiding and afraid intruders might come back.",
            "Intruders broke into my home!",
        )],
    );

    catalog.insert(
        ScenarioType::MentalHealth,
        vec![variant(
            "N/A - Caller won't provide location",
            "Selena Crock",
            "403-271-8645",
            "Caller reporting feeling watched during shopping trip and noticing \
             suspicious number of red cars.",
            "Caller is safe but paranoid. Rambling about people looking at her and red \
             cars being suspicious.",
            "Individual experiencing paranoid thoughts. Refuses to provide location but \
             wants police awareness.",
            "People are acting suspiciously!",
        )],
    );

    catalog.insert(
        ScenarioType::Robbery,
        vec![variant(
            "South Centre Mall, 100 Anderson Rd SE",
            "Tony Hilson",
            "403-665-8532",
            "Just found a male bleeding outside Safeway; says he was stabbed and robbed \
             of his wallet and phone.",
            "Victim is conscious but bleeding from his arm. Suspect described as white \
             male, 25yrs old, 6', slim build, wearing white baseball cap, green hoody, \
             blue jeans. Last seen running towards Anderson Rd through mall parking lot.",
            "Bystander who found the victim. Upset but trying to help. Applying pressure \
             to wound while on call.",
            "I found someone bleeding!",
        )],
    );

    catalog.insert(
        ScenarioType::Theft,
        vec![variant(
            "705 8 ST SW",
            "Jamal Samsonoff",
            "825-834-4672",
            "Theft from convenience store - suspect grabbed chips and pop and ran away.",
            "Suspect ran toward LRT station eastbound. White male, 20-25, 6'0, heavy \
             build, blue shirt, jeans, red shoes.",
            "Store employee reporting theft, upset and wanting immediate police response.",
            "We've been robbed!",
        )],
    );

    catalog.insert(
        ScenarioType::GasTheft,
        vec![variant(
            "7-11 Woodbine, 460 Woodbine BV SW",
            "Janine Shotbothsides",
            "403-250-2374",
            "Vehicle drove off without paying for $82.39 worth of gas.",
            "Red pickup truck with license BPT5789 fled scene turning right toward 24 St. \
             Driver: WM, late 20s, baseball cap, grey winter jacket.",
            "Gas station employee reporting theft. Calm but wants police intervention.",
            "Someone stole gas!",
        )],
    );

    catalog.insert(
        ScenarioType::ImpairedDriver,
        vec![variant(
            "Stoney Trail/Country Hills BV",
            "Betty Jensen",
            "403-562-1159",
            "Observing vehicle swerving erratically, hitting brakes randomly, unable to \
             stay in lanes.",
            "Following vehicle eastbound on Stoney Trail. Driver appears impaired. Red VW \
             Golf, license BJR5561.",
            "Concerned driver returning from Banff to Airdrie. Insistent on following \
             vehicle despite safety concerns.",
            "I'm seeing a dangerous driver!",
        )],
    );

    catalog.insert(
        ScenarioType::TrafficHazard,
        vec![variant(
            "Northbound Deerfoot at 16 Av",
            "Candy Wise",
            "403-555-0123",
            "Car stopped on side of Deerfoot with person inside.",
            "Dark SUV parked on shoulder. Driver appears to be a white male in green \
             jacket.",
            "Drive-by caller reporting traffic hazard. Not stopping but concerned about \
             stopped vehicle.",
            "I saw a car stopped on the road!",
        )],
    );

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn every_scenario_type_has_at_least_one_variant() {
        for scenario in ScenarioType::ALL {
            assert!(
                variant_count(scenario) >= 1,
                "no variants for {}",
                scenario.code()
            );
        }
    }

    #[test]
    fn injury_collision_has_a_variant_pool() {
        assert_eq!(variant_count(ScenarioType::TrafficAccidentInjury), 2);
    }

    #[test]
    fn same_seed_selects_same_variant() {
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);

        let a = select_variant(ScenarioType::TrafficAccidentInjury, &mut rng_a).unwrap();
        let b = select_variant(ScenarioType::TrafficAccidentInjury, &mut rng_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn selected_variant_has_initial_response() {
        let mut rng = StdRng::seed_from_u64(1);
        let context = select_variant(ScenarioType::Robbery, &mut rng).unwrap();
        assert_eq!(context.initial_response, "I found someone bleeding!");
    }
}
