pub mod reports;
pub mod scenarios;
pub mod seeds;
pub mod tester;

pub use scenarios::{full_scenario_names, get_scenario, ladder_for, list_scenarios};
pub use seeds::{SeedInfo, resolve_seed_inputs};
pub use tester::*;
