use anyhow::{Context, Result};
use std::sync::Arc;

use marblebag_game::{Engine, Ending, RoundOutcome, SessionSummary, summarize};

use crate::logic::policy::BettingStrategy;

pub const DEFAULT_GOLD_START: f64 = 100.0;
pub const DEFAULT_DRAWS_TOTAL: u32 = 20;

/// Table setup and betting strategy for one automated session.
#[derive(Debug, Clone)]
pub struct SimulationPlan {
    pub strategy: BettingStrategy,
    pub gold_start: f64,
    pub draws_total: u32,
    pub expectations: Vec<SimulationExpectation>,
}

impl SimulationPlan {
    #[must_use]
    pub const fn new(strategy: BettingStrategy) -> Self {
        Self {
            strategy,
            gold_start: DEFAULT_GOLD_START,
            draws_total: DEFAULT_DRAWS_TOTAL,
            expectations: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_gold_start(mut self, gold_start: f64) -> Self {
        self.gold_start = gold_start;
        self
    }

    #[must_use]
    pub const fn with_draws(mut self, draws_total: u32) -> Self {
        self.draws_total = draws_total;
        self
    }

    #[must_use]
    pub fn with_expectation(mut self, expectation: impl Into<SimulationExpectation>) -> Self {
        self.expectations.push(expectation.into());
        self
    }
}

/// Assertion hook run after a simulation completes.
type SimulationExpectationFn =
    Arc<dyn Fn(&SimulationSummary) -> Result<()> + Send + Sync + 'static>;

#[derive(Clone)]
pub struct SimulationExpectation(SimulationExpectationFn);

impl std::fmt::Debug for SimulationExpectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationExpectation").finish()
    }
}

impl SimulationExpectation {
    pub fn evaluate(&self, summary: &SimulationSummary) -> Result<()> {
        (self.0)(summary)
    }
}

impl<F> From<F> for SimulationExpectation
where
    F: Fn(&SimulationSummary) -> Result<()> + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self(Arc::new(f))
    }
}

/// Complete record of a simulated session.
#[derive(Debug, Clone)]
pub struct SimulationSummary {
    pub seed: u64,
    pub strategy: BettingStrategy,
    pub draws_total: u32,
    pub history: Vec<RoundOutcome>,
    pub summary: SessionSummary,
    /// Generator calls consumed by the draw stream.
    pub rng_draws: u64,
}

impl SimulationSummary {
    #[must_use]
    pub const fn ending(&self) -> Ending {
        self.summary.ending
    }

    #[must_use]
    pub const fn net(&self) -> f64 {
        self.summary.net
    }
}

/// Play a full seeded session, betting by the plan's strategy until it ends.
pub fn run_plan(plan: &SimulationPlan, seed: u64) -> Result<SimulationSummary> {
    let mut engine = Engine::seeded(seed);
    let mut session = engine
        .start(plan.gold_start, f64::from(plan.draws_total))
        .context("session setup rejected")?;

    while !session.is_over() {
        let bet = plan.strategy.bet_for(session.gold_remaining());
        engine
            .play_round(&mut session, bet)
            .with_context(|| format!("round {} rejected bet {bet}", session.draw_index()))?;
    }

    log::debug!(
        "seed {seed} strategy {} ended {} after {} rounds",
        plan.strategy,
        session.status(),
        session.rounds_played()
    );

    Ok(SimulationSummary {
        seed,
        strategy: plan.strategy,
        draws_total: plan.draws_total,
        history: session.history().to_vec(),
        summary: summarize(&session),
        rng_draws: engine.source().draws(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plans_run_to_a_terminal_ending() {
        for strategy in BettingStrategy::SWEEP {
            let plan = SimulationPlan::new(strategy).with_draws(8);
            for seed in 0..20 {
                let summary = run_plan(&plan, seed).unwrap();
                assert_ne!(summary.ending(), Ending::Abandoned);
                assert!(summary.history.len() <= 8);
                assert_eq!(summary.summary.rounds_played, summary.history.len());
                assert!(summary.rng_draws >= u64::try_from(summary.history.len()).unwrap());
            }
        }
    }

    #[test]
    fn runs_are_reproducible_per_seed() {
        let plan = SimulationPlan::new(BettingStrategy::DEFAULT_FRACTION);
        let a = run_plan(&plan, 1337).unwrap();
        let b = run_plan(&plan, 1337).unwrap();
        assert_eq!(a.history, b.history);
        assert_eq!(a.rng_draws, b.rng_draws);
    }

    #[test]
    fn invalid_setup_is_reported() {
        let plan = SimulationPlan::new(BettingStrategy::AllIn).with_gold_start(-1.0);
        let err = run_plan(&plan, 1).unwrap_err();
        assert!(err.to_string().contains("session setup rejected"));
    }

    #[test]
    fn expectations_see_the_summary() {
        fn seed_is_nine(summary: &SimulationSummary) -> Result<()> {
            anyhow::ensure!(summary.seed == 9, "wrong seed");
            Ok(())
        }

        let plan = SimulationPlan::new(BettingStrategy::AllIn).with_expectation(seed_is_nine);
        let summary = run_plan(&plan, 9).unwrap();
        for expectation in &plan.expectations {
            expectation.evaluate(&summary).unwrap();
        }
    }
}
