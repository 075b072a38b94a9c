//! Batch runs
//!
//! Repeats a simulation with independently seeded sources and aggregates the
//! per-generation results.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::breeding::traits::BreedingStrategy;
use crate::diagnostics::SimulationReport;
use crate::error::SimResult;
use crate::fitness::traits::FitnessCalculator;
use crate::random::RngSource;
use crate::simulation::engine::SimulationEngine;

/// Aggregate of many simulation runs
///
/// Generation `g` is averaged over the runs that reached it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Number of runs aggregated
    pub runs: usize,
    /// Runs that ended in extinction
    pub extinctions: usize,
    /// Runs that recorded each generation
    pub runs_per_generation: Vec<usize>,
    fitness_sums: Vec<f64>,
    quotient_sums: Vec<f64>,
}

impl BatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summarize a set of finished reports
    pub fn from_reports<'a, I>(reports: I) -> Self
    where
        I: IntoIterator<Item = &'a SimulationReport>,
    {
        let mut summary = Self::new();
        for report in reports {
            summary.record(report);
        }
        summary
    }

    /// Add one run
    pub fn record(&mut self, report: &SimulationReport) {
        self.runs += 1;
        if report.went_extinct() {
            self.extinctions += 1;
        }
        let len = report.num_generations();
        if self.runs_per_generation.len() < len {
            self.runs_per_generation.resize(len, 0);
            self.fitness_sums.resize(len, 0.0);
            self.quotient_sums.resize(len, 0.0);
        }
        for (g, stats) in report.generations.iter().enumerate() {
            self.runs_per_generation[g] += 1;
            self.fitness_sums[g] += stats.average_fitness;
            self.quotient_sums[g] += stats.average_fitness_quotient;
        }
    }

    /// Mean of the runs' average cohort fitness, per generation
    pub fn mean_average_fitness(&self) -> Vec<f64> {
        self.means(&self.fitness_sums)
    }

    /// Mean of the runs' average fitness quotient, per generation
    pub fn mean_quotient(&self) -> Vec<f64> {
        self.means(&self.quotient_sums)
    }

    /// Fraction of runs that went extinct
    pub fn extinction_rate(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.extinctions as f64 / self.runs as f64
        }
    }

    fn means(&self, sums: &[f64]) -> Vec<f64> {
        sums.iter()
            .zip(&self.runs_per_generation)
            .map(|(sum, &n)| sum / n as f64)
            .collect()
    }
}

/// Runs an engine `total_simulation_runs` times
///
/// Run `i` draws from `RngSource::seeded(base_seed + i)`, so a batch is
/// reproducible from its base seed.
pub struct BatchRunner<'a, Fit, S> {
    engine: &'a SimulationEngine<Fit, S>,
    base_seed: u64,
}

impl<'a, Fit, S> BatchRunner<'a, Fit, S>
where
    Fit: FitnessCalculator,
    S: BreedingStrategy,
{
    pub fn new(engine: &'a SimulationEngine<Fit, S>, base_seed: u64) -> Self {
        Self { engine, base_seed }
    }

    /// Run every simulation, handing each report to `on_report` as it finishes
    #[instrument(skip_all, fields(base_seed = self.base_seed))]
    pub fn run_with<F>(&self, mut on_report: F) -> SimResult<BatchSummary>
    where
        F: FnMut(usize, &SimulationReport),
    {
        let runs = self.engine.config().total_simulation_runs;
        let mut summary = BatchSummary::new();
        for i in 0..runs {
            let mut rng = RngSource::seeded(self.base_seed.wrapping_add(i as u64));
            let report = self.engine.run(&mut rng)?;
            summary.record(&report);
            on_report(i, &report);
        }
        info!(
            runs = summary.runs,
            extinctions = summary.extinctions,
            "batch finished"
        );
        Ok(summary)
    }

    /// Run every simulation and summarize
    pub fn run(&self) -> SimResult<BatchSummary> {
        self.run_with(|_, _| {})
    }
}
