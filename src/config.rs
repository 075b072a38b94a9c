//! Simulation configuration
//!
//! A single value object carries every tunable of a run. It is validated once
//! when an engine is built and stays immutable for the run's duration.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{EvolutionError, SimResult};
use crate::time::SimDuration;

/// Configuration of a breeding simulation
///
/// Durations serialize as (fractional) days.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of traits in every trait vector
    pub total_trait_count: usize,
    /// Trait indices averaged into fitness (order and duplicates irrelevant)
    pub fitness_trait_indices: Vec<usize>,
    /// Per-trait mutation standard deviation before scaling by `sqrt(|fitness traits|)`
    pub inheritance_mutation_std_dev: f64,
    /// Founders kept out of the selection pool
    pub initial_population_size: usize,
    /// Random candidates drawn to pick the founders from
    pub initial_population_selection_pool_size: usize,
    /// Clock advance per generation
    pub breeding_cycle_duration: SimDuration,
    /// Delay between mating and birth
    pub gestation_duration: SimDuration,
    /// Minimum age to breed
    pub fertility_age: SimDuration,
    /// Mortality half-life; non-positive disables mortality
    pub mortality_half_life: SimDuration,
    /// Breeding cycles to simulate after founding
    pub total_generations_to_simulate: usize,
    /// Females mated per cycle
    pub max_breeding_females: usize,
    /// Males allowed to sire per cycle (advisory for the default elitist rule)
    pub max_breeding_males: usize,
    /// Mean litter size
    pub litter_size_mean: f64,
    /// Litter size standard deviation
    pub litter_size_std_dev: f64,
    /// Independent runs performed by a batch
    pub total_simulation_runs: usize,
    /// Percentiles (0..=100) reported for each cohort
    pub fitness_percentiles: Vec<u8>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            total_trait_count: 1280,
            fitness_trait_indices: (0..640).collect(),
            inheritance_mutation_std_dev: 0.67,
            initial_population_size: 1,
            initial_population_selection_pool_size: 4,
            breeding_cycle_duration: SimDuration::days(30 * 10),
            gestation_duration: SimDuration::days(60),
            fertility_age: SimDuration::days(30 * 6),
            mortality_half_life: SimDuration::days(30 * 18),
            total_generations_to_simulate: 10,
            max_breeding_females: 2,
            max_breeding_males: 1,
            litter_size_mean: 4.5,
            litter_size_std_dev: 1.5,
            total_simulation_runs: 10_000,
            fitness_percentiles: Vec::new(),
        }
    }
}

impl SimulationConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of distinct fitness trait indices
    pub fn fitness_trait_count(&self) -> usize {
        self.fitness_trait_indices
            .iter()
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Standard deviation of founder traits
    ///
    /// Fitness averages `n` near-independent traits, so scaling each by
    /// `sqrt(n)` leaves founder fitness with standard deviation close to 1.
    pub fn founder_trait_std_dev(&self) -> f64 {
        (self.fitness_trait_count() as f64).sqrt()
    }

    /// Standard deviation of the mutation noise added to inherited traits
    pub fn mutation_std_dev(&self) -> f64 {
        (self.fitness_trait_count() as f64).sqrt() * self.inheritance_mutation_std_dev
    }

    /// Per-cycle death probability, or `None` when mortality is disabled
    pub fn death_probability(&self) -> Option<f64> {
        if !self.mortality_half_life.is_positive() {
            return None;
        }
        let t = self.breeding_cycle_duration.as_days();
        let half_life = self.mortality_half_life.as_days();
        Some(1.0 - 2f64.powf(-t / half_life))
    }

    /// Latest and earliest instants a run can reach
    ///
    /// The latest is the birth of the last cohort; the earliest is the birth
    /// of a synthetic parent in the last cycle. `None` if either overflows.
    fn simulation_horizon(&self) -> Option<(SimDuration, SimDuration)> {
        let generations = i64::try_from(self.total_generations_to_simulate).ok()?;
        let last_cycle = self.breeding_cycle_duration.checked_mul(generations)?;
        let latest = last_cycle.checked_add(self.gestation_duration)?;
        let earliest = last_cycle.checked_sub(self.fertility_age.checked_mul_f64(1.2)?)?;
        Some((latest, earliest))
    }

    /// Check the configuration for contract violations
    pub fn validate(&self) -> SimResult<()> {
        if let Some(&bad) = self
            .fitness_trait_indices
            .iter()
            .find(|&&i| i >= self.total_trait_count)
        {
            return Err(EvolutionError::Configuration(format!(
                "fitness trait index {bad} is out of range for {} traits",
                self.total_trait_count
            )));
        }
        if self.initial_population_selection_pool_size < self.initial_population_size {
            return Err(EvolutionError::Configuration(format!(
                "selection pool ({}) is smaller than the founder population ({})",
                self.initial_population_selection_pool_size, self.initial_population_size
            )));
        }
        if !self.breeding_cycle_duration.is_positive() {
            return Err(EvolutionError::Configuration(
                "breeding cycle duration must be positive".to_string(),
            ));
        }
        if self.gestation_duration.is_negative() {
            return Err(EvolutionError::Configuration(
                "gestation duration must not be negative".to_string(),
            ));
        }
        if self.fertility_age.is_negative() {
            return Err(EvolutionError::Configuration(
                "fertility age must not be negative".to_string(),
            ));
        }
        if self.simulation_horizon().is_none() {
            return Err(EvolutionError::Configuration(format!(
                "{} generations of {} overflow the simulation clock",
                self.total_generations_to_simulate, self.breeding_cycle_duration
            )));
        }
        for (name, value) in [
            ("inheritance mutation std dev", self.inheritance_mutation_std_dev),
            ("litter size mean", self.litter_size_mean),
            ("litter size std dev", self.litter_size_std_dev),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EvolutionError::Configuration(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if let Some(&bad) = self.fitness_percentiles.iter().find(|&&p| p > 100) {
            return Err(EvolutionError::Configuration(format!(
                "percentile {bad} is outside 0..=100"
            )));
        }
        Ok(())
    }
}
