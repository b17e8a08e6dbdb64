use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;

use marblebag_game::{Bag, ColorTally, Ending, MultiplierTable};

use crate::logic::policy::BettingStrategy;
use crate::logic::simulation::{SimulationPlan, run_plan};

/// One session from a strategy sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SessionRecord {
    pub strategy: BettingStrategy,
    pub seed: u64,
    pub ending: Ending,
    pub rounds_played: usize,
    pub final_gold: f64,
    pub net: f64,
    /// Sum of every bet placed in the session.
    pub wagered: f64,
    pub colors: ColorTally,
    pub rng_draws: u64,
}

/// Per-strategy statistics across a sweep.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyAggregate {
    pub strategy: BettingStrategy,
    pub iterations: usize,
    pub bust_rate: f64,
    pub finish_rate: f64,
    pub mean_net: f64,
    pub std_net: f64,
    /// Net predicted by the bag's expected multiplier for the mean amount wagered.
    pub expected_net: f64,
    pub mean_wagered: f64,
    pub mean_rounds: f64,
    pub colors: ColorTally,
}

/// Play every sweep strategy for each seed and iteration.
pub fn run_strategy_sweep(seeds: &[u64], iterations: usize) -> Result<Vec<SessionRecord>> {
    let iterations = iterations.max(1);
    let mut records =
        Vec::with_capacity(seeds.len() * BettingStrategy::SWEEP.len() * iterations);

    for strategy in BettingStrategy::SWEEP {
        let plan = SimulationPlan::new(strategy);
        for &seed in seeds {
            for iteration in 0..iterations {
                let iteration_offset = u64::try_from(iteration).unwrap_or(0);
                let iteration_seed = seed.wrapping_add(iteration_offset);
                let summary = run_plan(&plan, iteration_seed).with_context(|| {
                    format!("sweep failed for strategy {strategy}, seed {iteration_seed}")
                })?;
                records.push(SessionRecord {
                    strategy,
                    seed: iteration_seed,
                    ending: summary.ending(),
                    rounds_played: summary.summary.rounds_played,
                    final_gold: summary.summary.gold_final,
                    net: summary.net(),
                    wagered: summary.history.iter().map(|round| round.bet).sum(),
                    colors: summary.summary.colors,
                    rng_draws: summary.rng_draws,
                });
            }
        }
    }

    Ok(records)
}

pub fn aggregate_records(records: &[SessionRecord]) -> Vec<StrategyAggregate> {
    let mut builders: BTreeMap<&'static str, AggregateBuilder> = BTreeMap::new();
    for record in records {
        builders
            .entry(record.strategy.key())
            .or_insert_with(|| AggregateBuilder::new(record.strategy))
            .ingest(record);
    }
    builders.into_values().map(AggregateBuilder::finish).collect()
}

struct AggregateBuilder {
    strategy: BettingStrategy,
    iterations: u32,
    busts: u32,
    finishes: u32,
    net: RunningStats,
    wagered: RunningStats,
    rounds: RunningStats,
    colors: ColorTally,
}

impl AggregateBuilder {
    fn new(strategy: BettingStrategy) -> Self {
        Self {
            strategy,
            iterations: 0,
            busts: 0,
            finishes: 0,
            net: RunningStats::default(),
            wagered: RunningStats::default(),
            rounds: RunningStats::default(),
            colors: ColorTally::default(),
        }
    }

    fn ingest(&mut self, record: &SessionRecord) {
        self.iterations += 1;
        match record.ending {
            Ending::Bust => self.busts += 1,
            Ending::Finished => self.finishes += 1,
            Ending::Abandoned => {}
        }
        self.net.add(record.net);
        self.wagered.add(record.wagered);
        self.rounds
            .add(f64::from(u32::try_from(record.rounds_played).unwrap_or(u32::MAX)));
        self.colors.merge(&record.colors);
    }

    fn finish(self) -> StrategyAggregate {
        let denom = f64::from(self.iterations.max(1));
        let edge = MultiplierTable::STANDARD.expected_multiplier(&Bag::STANDARD);
        StrategyAggregate {
            strategy: self.strategy,
            iterations: usize::try_from(self.iterations).unwrap_or(usize::MAX),
            bust_rate: f64::from(self.busts) / denom,
            finish_rate: f64::from(self.finishes) / denom,
            mean_net: self.net.mean(),
            std_net: self.net.std_dev(),
            expected_net: edge * self.wagered.mean(),
            mean_wagered: self.wagered.mean(),
            mean_rounds: self.rounds.mean(),
            colors: self.colors,
        }
    }
}

#[derive(Debug, Default, Clone)]
struct RunningStats {
    count: u32,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    fn add(&mut self, value: f64) {
        self.count += 1;
        let count = f64::from(self.count);
        let delta = value - self.mean;
        self.mean += delta / count;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    const fn mean(&self) -> f64 {
        if self.count == 0 { 0.0 } else { self.mean }
    }

    fn variance(&self) -> f64 {
        if self.count > 1 {
            self.m2 / f64::from(self.count - 1)
        } else {
            0.0
        }
    }

    fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}
