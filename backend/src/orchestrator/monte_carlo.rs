//! Monte Carlo runner
//!
//! Generates one initial population from the master seed, then runs every
//! trial on a private copy of it. Trial seeds are derived from the master seed
//! before dispatch, so sequential and parallel runs produce identical results.

use crate::config::{compute_config_hash, SimulationConfig};
use crate::models::employee::Employee;
use crate::models::history::TrialHistory;
use crate::orchestrator::aggregate::{AggregateResult, RunMetadata};
use crate::orchestrator::engine::{SimulationEngine, SimulationError};
use crate::population::{headcount_by_branch, PopulationGenerator};
use crate::rng::{derive_seed, RngManager};
use rayon::prelude::*;
use tracing::{debug, info};

/// Runs N independent trials and aggregates them
#[derive(Debug, Clone)]
pub struct MonteCarloRunner {
    config: SimulationConfig,
    config_hash: String,
    master_seed: u64,
}

impl MonteCarloRunner {
    /// Validate the configuration and fix the master seed
    ///
    /// Without a configured seed, one is drawn from OS entropy and reported
    /// in the result so the run can be reproduced.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let config_hash = compute_config_hash(&config)?;
        let master_seed = config.rng_seed.unwrap_or_else(rand::random);

        Ok(Self {
            config,
            config_hash,
            master_seed,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn config_hash(&self) -> &str {
        &self.config_hash
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Seed of trial `index`
    pub fn trial_seed(&self, index: usize) -> u64 {
        derive_seed(self.master_seed, index as u64)
    }

    /// Synthesize the shared initial population
    pub fn generate_population(&self) -> Result<Vec<Employee>, SimulationError> {
        let generator =
            PopulationGenerator::new(&self.config.population, &self.config.rating_table)?;
        let mut rng = RngManager::new(self.master_seed);
        Ok(generator.generate(self.config.num_employees, &mut rng))
    }

    /// Run one trial with an explicit seed
    pub fn run_seeded_trial(
        &self,
        population: &[Employee],
        seed: u64,
    ) -> Result<TrialHistory, SimulationError> {
        let engine = SimulationEngine::new(&self.config, population.to_vec(), RngManager::new(seed))?;
        engine.run()
    }

    /// Run trial `index` of this run
    pub fn run_trial(
        &self,
        population: &[Employee],
        index: usize,
    ) -> Result<TrialHistory, SimulationError> {
        let seed = self.trial_seed(index);
        let history = self.run_seeded_trial(population, seed)?;
        debug!(
            trial = index,
            seed,
            final_headcount = history.last().map(|r| r.total_headcount()).unwrap_or(0),
            "trial complete"
        );
        Ok(history)
    }

    /// Run every trial, in trial order
    pub fn run_trials(&self, population: &[Employee]) -> Result<Vec<TrialHistory>, SimulationError> {
        let trials = self.config.num_trials;
        if self.config.parallel {
            (0..trials)
                .into_par_iter()
                .map(|i| self.run_trial(population, i))
                .collect()
        } else {
            (0..trials).map(|i| self.run_trial(population, i)).collect()
        }
    }

    /// Generate the population, run every trial, and aggregate
    pub fn run(&self) -> Result<AggregateResult, SimulationError> {
        info!(
            employees = self.config.num_employees,
            trials = self.config.num_trials,
            months = self.config.num_months,
            seed = self.master_seed,
            parallel = self.config.parallel,
            "starting Monte Carlo run"
        );

        let population = self.generate_population()?;
        let initial_headcount = headcount_by_branch(&population);
        let histories = self.run_trials(&population)?;

        let result = AggregateResult::from_histories(
            &histories,
            RunMetadata {
                config_hash: self.config_hash.clone(),
                master_seed: self.master_seed,
                initial_headcount,
            },
        )?;

        info!(
            run_id = %result.run_id,
            cash_out = result.final_summary.cash_out,
            opportunity_loss = result.final_summary.opportunity_loss,
            "Monte Carlo run complete"
        );
        Ok(result)
    }
}
