pub mod policy;
pub mod reports;
pub mod seeds;
pub mod simulation;
pub mod sweep;
pub mod tester;

pub use policy::BettingStrategy;
pub use seeds::resolve_seed_inputs;
pub use simulation::{SimulationPlan, SimulationSummary};
pub use sweep::{SessionRecord, StrategyAggregate, aggregate_records, run_strategy_sweep};
pub use tester::*;
