//! Diagnostics and statistics
//!
//! This module provides per-generation cohort statistics and the report of a
//! whole simulation run.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::fitness::quotient::FitnessQuotient;
use crate::fitness::traits::{compare_fitness, FitnessCalculator};
use crate::population::individual::Cat;

/// Statistics for the cohort born in a single generation
///
/// An empty cohort has every field at zero, including the quotient.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationStatistics {
    /// Generation number (0 is the founding generation)
    pub generation: usize,
    /// Mean fitness
    pub average_fitness: f64,
    /// Sample (Bessel-corrected) standard deviation; 0 for fewer than two cats
    pub fitness_std_dev: f64,
    /// Lowest fitness
    pub min_fitness: f64,
    /// Highest fitness
    pub max_fitness: f64,
    /// Mean fitness converted to a quotient
    pub average_fitness_quotient: f64,
    /// Number of cats in the cohort
    pub population_size: usize,
    /// Requested percentiles, by percentile label
    pub percentiles: BTreeMap<u8, f64>,
}

impl GenerationStatistics {
    /// Statistics of an empty cohort
    pub fn empty(generation: usize) -> Self {
        Self {
            generation,
            ..Self::default()
        }
    }

    /// Compute statistics from raw fitness values
    ///
    /// NaN values sort below every number, so they surface as `min_fitness`
    /// and poison the mean rather than being dropped.
    pub fn from_fitnesses(generation: usize, mut fitnesses: Vec<f64>, percentiles: &[u8]) -> Self {
        if fitnesses.is_empty() {
            return Self::empty(generation);
        }

        fitnesses.sort_by(|a, b| compare_fitness(*a, *b));

        let n = fitnesses.len();
        let mean = fitnesses.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            fitnesses.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        Self {
            generation,
            average_fitness: mean,
            fitness_std_dev: variance.sqrt(),
            min_fitness: fitnesses[0],
            max_fitness: fitnesses[n - 1],
            average_fitness_quotient: FitnessQuotient::to_quotient(mean),
            population_size: n,
            percentiles: percentiles
                .iter()
                .map(|&p| (p, percentile(&fitnesses, p)))
                .collect(),
        }
    }

    /// Compute statistics for a cohort of cats
    pub fn from_cohort<'a, I, Fit>(
        generation: usize,
        cohort: I,
        fitness: &Fit,
        percentiles: &[u8],
    ) -> Self
    where
        I: IntoIterator<Item = &'a Cat>,
        Fit: FitnessCalculator + ?Sized,
    {
        let fitnesses = cohort.into_iter().map(|cat| fitness.fitness(cat)).collect();
        Self::from_fitnesses(generation, fitnesses, percentiles)
    }

    /// Check if no cat was born in this generation
    pub fn is_empty(&self) -> bool {
        self.population_size == 0
    }
}

/// Percentile of ascending `sorted` values, interpolating between closest ranks
///
/// `sorted` must be non-empty; `p` is clamped to 100.
fn percentile(sorted: &[f64], p: u8) -> f64 {
    let rank = f64::from(p.min(100)) / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// Why a run stopped
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// Every configured generation was simulated
    #[default]
    Completed,
    /// Mortality emptied the cattery at the start of this generation
    Extinct { generation: usize },
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => f.write_str("completed"),
            Self::Extinct { generation } => write!(f, "extinct in generation {generation}"),
        }
    }
}

/// Result of a simulation run
///
/// Generation `i` sits at index `i`. After an extinction the remaining
/// generations are simply absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Configuration the run used
    pub config: SimulationConfig,
    /// Statistics per generation
    pub generations: Vec<GenerationStatistics>,
    /// Reason for termination
    pub termination: TerminationReason,
    /// Total runtime in milliseconds
    pub total_runtime_ms: f64,
}

impl SimulationReport {
    /// Create an empty report for a configuration
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Record a generation's statistics
    pub fn record(&mut self, stats: GenerationStatistics) {
        self.generations.push(stats);
    }

    /// Get the number of generations recorded, founding included
    pub fn num_generations(&self) -> usize {
        self.generations.len()
    }

    /// Statistics of the founders
    pub fn baseline(&self) -> Option<&GenerationStatistics> {
        self.generations.first()
    }

    /// Statistics of the last simulated generation
    pub fn last(&self) -> Option<&GenerationStatistics> {
        self.generations.last()
    }

    pub fn went_extinct(&self) -> bool {
        matches!(self.termination, TerminationReason::Extinct { .. })
    }

    /// Get the history of mean fitness values
    pub fn mean_fitness_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.average_fitness).collect()
    }

    /// Get the history of max fitness values
    pub fn max_fitness_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.max_fitness).collect()
    }

    /// Get the history of average fitness quotients
    pub fn quotient_history(&self) -> Vec<f64> {
        self.generations
            .iter()
            .map(|g| g.average_fitness_quotient)
            .collect()
    }

    /// Mean fitness gained between the founders and the last generation
    pub fn fitness_gain(&self) -> Option<f64> {
        match (self.baseline(), self.last()) {
            (Some(first), Some(last)) => Some(last.average_fitness - first.average_fitness),
            _ => None,
        }
    }

    /// Set the total runtime
    pub fn set_runtime(&mut self, duration: Duration) {
        self.total_runtime_ms = duration.as_secs_f64() * 1000.0;
    }

    /// Get a summary of the simulation run
    pub fn summary(&self) -> String {
        let baseline = self.baseline().map_or(0.0, |g| g.average_fitness_quotient);
        let last = self.last().map_or(0.0, |g| g.average_fitness_quotient);

        format!(
            "Simulation Summary:\n\
             - Generations: {}\n\
             - Founder quotient: {:.2}\n\
             - Final quotient: {:.2}\n\
             - Runtime: {:.2}ms\n\
             - Termination: {}",
            self.num_generations(),
            baseline,
            last,
            self.total_runtime_ms,
            self.termination
        )
    }
}

pub mod prelude {
    pub use super::{GenerationStatistics, SimulationReport, TerminationReason};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::mean_trait::MeanTraitFitness;
    use crate::genome::trait_vector::TraitVector;
    use crate::population::individual::{CatId, Sex};
    use crate::time::SimDuration;
    use approx::assert_relative_eq;

    fn stats(generation: usize, mean: f64, max: f64) -> GenerationStatistics {
        GenerationStatistics {
            generation,
            average_fitness: mean,
            max_fitness: max,
            average_fitness_quotient: FitnessQuotient::to_quotient(mean),
            population_size: 1,
            ..GenerationStatistics::default()
        }
    }

    #[test]
    fn test_statistics_from_fitnesses() {
        let fitnesses = vec![30.0, 10.0, 50.0, 20.0, 40.0];
        let stats = GenerationStatistics::from_fitnesses(3, fitnesses, &[]);

        assert_eq!(stats.generation, 3);
        assert_eq!(stats.population_size, 5);
        assert_eq!(stats.max_fitness, 50.0);
        assert_eq!(stats.min_fitness, 10.0);
        assert_eq!(stats.average_fitness, 30.0);
        assert_relative_eq!(stats.fitness_std_dev, 250f64.sqrt());
        assert_eq!(stats.average_fitness_quotient, 550.0);
        assert!(stats.percentiles.is_empty());
    }

    #[test]
    fn test_statistics_single_cat() {
        let stats = GenerationStatistics::from_fitnesses(0, vec![1.5], &[]);
        assert_eq!(stats.fitness_std_dev, 0.0);
        assert_eq!(stats.min_fitness, 1.5);
        assert_eq!(stats.max_fitness, 1.5);
        assert_relative_eq!(stats.average_fitness_quotient, 122.5);
    }

    #[test]
    fn test_statistics_empty_cohort() {
        let stats = GenerationStatistics::from_fitnesses(4, Vec::new(), &[50]);
        assert_eq!(stats, GenerationStatistics::empty(4));
        assert!(stats.is_empty());
        assert_eq!(stats.average_fitness_quotient, 0.0);
        assert!(stats.percentiles.is_empty());
    }

    #[test]
    fn test_percentiles() {
        let fitnesses = vec![4.0, 1.0, 3.0, 2.0];
        let stats = GenerationStatistics::from_fitnesses(1, fitnesses, &[0, 25, 50, 100]);
        assert_relative_eq!(stats.percentiles[&0], 1.0);
        assert_relative_eq!(stats.percentiles[&25], 1.75);
        assert_relative_eq!(stats.percentiles[&50], 2.5);
        assert_relative_eq!(stats.percentiles[&100], 4.0);
    }

    #[test]
    fn test_statistics_with_nan_fitness() {
        let fitnesses: Vec<f64> = (0..60)
            .map(|i| if i % 3 == 0 { f64::NAN } else { i as f64 })
            .collect();
        let stats = GenerationStatistics::from_fitnesses(2, fitnesses, &[100]);

        assert_eq!(stats.population_size, 60);
        assert!(stats.min_fitness.is_nan());
        assert_eq!(stats.max_fitness, 59.0);
        assert_eq!(stats.percentiles[&100], 59.0);
        assert!(stats.average_fitness.is_nan());
    }

    #[test]
    fn test_statistics_from_cohort() {
        let fitness = MeanTraitFitness::new([0, 1]);
        let cats: Vec<Cat> = [[1.0, 3.0], [4.0, 6.0]]
            .into_iter()
            .map(|t| Cat::new(CatId::fresh(), SimDuration::ZERO, Sex::Male, TraitVector::from(t)))
            .collect();

        let stats = GenerationStatistics::from_cohort(0, &cats, &fitness, &[]);
        assert_eq!(stats.population_size, 2);
        assert_relative_eq!(stats.average_fitness, 3.5);
        assert_relative_eq!(stats.fitness_std_dev, 4.5f64.sqrt());
    }

    #[test]
    fn test_report_history() {
        let mut report = SimulationReport::new(SimulationConfig::default());
        for i in 0..5 {
            report.record(stats(i, (i + 1) as f64 * 0.5, (i + 1) as f64));
        }

        assert_eq!(report.num_generations(), 5);
        assert_eq!(report.baseline().unwrap().generation, 0);
        assert_eq!(report.last().unwrap().generation, 4);
        assert_eq!(report.mean_fitness_history(), vec![0.5, 1.0, 1.5, 2.0, 2.5]);
        assert_eq!(report.max_fitness_history(), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(report.quotient_history()[0], 107.5);
        assert_relative_eq!(report.fitness_gain().unwrap(), 2.0);
        assert!(!report.went_extinct());
    }

    #[test]
    fn test_empty_report() {
        let report = SimulationReport::new(SimulationConfig::default());
        assert!(report.baseline().is_none());
        assert!(report.fitness_gain().is_none());
        assert_eq!(report.termination, TerminationReason::Completed);
    }

    #[test]
    fn test_report_summary() {
        let mut report = SimulationReport::new(SimulationConfig::default());
        report.record(stats(0, 0.0, 1.0));
        report.record(stats(1, 1.0, 2.0));
        report.termination = TerminationReason::Extinct { generation: 2 };
        report.set_runtime(Duration::from_millis(1234));

        assert!(report.went_extinct());
        let summary = report.summary();
        assert!(summary.contains("Generations: 2"));
        assert!(summary.contains("Founder quotient: 100.00"));
        assert!(summary.contains("Final quotient: 115.00"));
        assert!(summary.contains("extinct in generation 2"));
    }

    #[test]
    fn test_report_json_roundtrip() {
        let mut report = SimulationReport::new(SimulationConfig::default());
        report.record(GenerationStatistics::from_fitnesses(0, vec![0.1, 0.2], &[50]));
        report.termination = TerminationReason::Extinct { generation: 1 };

        let json = serde_json::to_string(&report).unwrap();
        let back: SimulationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.termination, report.termination);
        assert_eq!(back.generations.len(), 1);
        assert_eq!(back.generations[0].percentiles.len(), 1);
    }
}
