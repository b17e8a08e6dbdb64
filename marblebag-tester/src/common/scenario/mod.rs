pub mod catalog;

use crate::logic::SimulationPlan;
use catalog::find_catalog_scenario;

// Logic test scenario
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub plan: SimulationPlan,
}

impl TestScenario {
    #[must_use]
    pub fn simulation(name: impl Into<String>, plan: SimulationPlan) -> Self {
        Self {
            name: name.into(),
            plan,
        }
    }
}

const SCENARIOS: &[(&str, &str)] = &[
    ("smoke", "Smoke Test"),
    ("ledger-integrity", "Ledger Integrity"),
    ("bust-priority", "Bust Priority"),
    ("finish-accounting", "Finish Accounting"),
    ("invalid-bets", "Invalid Bet Handling"),
    ("draw-distribution", "Draw Distribution"),
    ("flat-bet", "Flat Bet Strategy"),
    ("fraction-bet", "Fraction Bet Strategy"),
    ("all-in", "All-In Strategy"),
];

pub fn get_scenario(name: &str) -> Option<TestScenario> {
    let key = match name.to_lowercase().as_str() {
        "ledger" => "ledger-integrity",
        "bust" => "bust-priority",
        "finish" => "finish-accounting",
        "bets" => "invalid-bets",
        "distribution" => "draw-distribution",
        "flat" => "flat-bet",
        "fraction" => "fraction-bet",
        other => return scenario_title(other).and_then(find_catalog_scenario),
    };
    scenario_title(key).and_then(find_catalog_scenario)
}

fn scenario_title(key: &str) -> Option<&'static str> {
    SCENARIOS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, title)| *title)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_scenario_resolves() {
        for (key, title) in list_scenarios() {
            let scenario = get_scenario(key).unwrap_or_else(|| panic!("missing {key}"));
            assert_eq!(scenario.name, title);
        }
    }

    #[test]
    fn aliases_and_case_are_accepted() {
        assert_eq!(get_scenario("FLAT").unwrap().name, "Flat Bet Strategy");
        assert_eq!(get_scenario("ledger").unwrap().name, "Ledger Integrity");
        assert!(get_scenario("unknown").is_none());
    }

    #[test]
    fn catalog_and_listing_agree() {
        assert_eq!(catalog::catalog_scenarios().len(), list_scenarios().len());
    }
}
