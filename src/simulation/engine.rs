//! Simulation engine
//!
//! This module implements the generational breeding loop: founding,
//! mortality, breeding and per-cohort statistics.

use std::time::Instant;

use tracing::{debug, info, instrument};

use crate::breeding::elitist::ElitistStrategy;
use crate::breeding::traits::BreedingStrategy;
use crate::config::SimulationConfig;
use crate::diagnostics::{GenerationStatistics, SimulationReport, TerminationReason};
use crate::error::{EvolutionError, SimResult};
use crate::fitness::mean_trait::MeanTraitFitness;
use crate::fitness::traits::{rank_by_fitness, FitnessCalculator};
use crate::population::individual::{Cat, CatId, Sex};
use crate::population::population::Cattery;
use crate::random::RandomSource;
use crate::time::SimDuration;

/// Builder for SimulationEngine
pub struct SimulationEngineBuilder<Fit, S> {
    config: Option<SimulationConfig>,
    fitness: Option<Fit>,
    strategy: Option<S>,
}

impl SimulationEngineBuilder<(), ()> {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            config: None,
            fitness: None,
            strategy: None,
        }
    }
}

impl Default for SimulationEngineBuilder<(), ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Fit, S> SimulationEngineBuilder<Fit, S> {
    /// Set the configuration
    pub fn config(mut self, config: SimulationConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the fitness calculator used for founding and statistics
    pub fn fitness<NewFit>(self, fitness: NewFit) -> SimulationEngineBuilder<NewFit, S>
    where
        NewFit: FitnessCalculator,
    {
        SimulationEngineBuilder {
            config: self.config,
            fitness: Some(fitness),
            strategy: self.strategy,
        }
    }

    /// Set the breeding strategy
    pub fn strategy<NewS>(self, strategy: NewS) -> SimulationEngineBuilder<Fit, NewS>
    where
        NewS: BreedingStrategy,
    {
        SimulationEngineBuilder {
            config: self.config,
            fitness: self.fitness,
            strategy: Some(strategy),
        }
    }
}

impl<Fit, S> SimulationEngineBuilder<Fit, S>
where
    Fit: FitnessCalculator,
    S: BreedingStrategy,
{
    /// Build the engine, validating the configuration
    pub fn build(self) -> SimResult<SimulationEngine<Fit, S>> {
        let config = self.config.ok_or_else(|| {
            EvolutionError::Configuration("Configuration must be specified".to_string())
        })?;
        config.validate()?;

        let fitness = self.fitness.ok_or_else(|| {
            EvolutionError::Configuration("Fitness calculator must be specified".to_string())
        })?;

        let strategy = self.strategy.ok_or_else(|| {
            EvolutionError::Configuration("Breeding strategy must be specified".to_string())
        })?;

        Ok(SimulationEngine {
            config,
            fitness,
            strategy,
        })
    }
}

/// Generational breeding simulation
///
/// One engine can perform any number of runs; each run owns its cattery and
/// draws every stochastic outcome from the source passed to [`run`].
///
/// [`run`]: SimulationEngine::run
pub struct SimulationEngine<Fit, S> {
    config: SimulationConfig,
    fitness: Fit,
    strategy: S,
}

impl SimulationEngine<MeanTraitFitness, ElitistStrategy<MeanTraitFitness>> {
    /// Engine with mean-trait fitness and the elitist strategy
    pub fn elitist(config: SimulationConfig) -> SimResult<Self> {
        let strategy = ElitistStrategy::from_config(&config);
        SimulationEngineBuilder::new()
            .fitness(MeanTraitFitness::from_config(&config))
            .strategy(strategy)
            .config(config)
            .build()
    }
}

impl SimulationEngine<(), ()> {
    /// Create a builder for SimulationEngine
    pub fn builder() -> SimulationEngineBuilder<(), ()> {
        SimulationEngineBuilder::new()
    }
}

impl<Fit, S> SimulationEngine<Fit, S>
where
    Fit: FitnessCalculator,
    S: BreedingStrategy,
{
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn fitness(&self) -> &Fit {
        &self.fitness
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Run one simulation
    ///
    /// Generation 0 records the founders; generation `g` records the cohort
    /// conceived in breeding cycle `g`. If mortality empties the cattery the
    /// run stops early and the report ends at the previous generation.
    #[instrument(skip_all, fields(strategy = self.strategy.name()))]
    pub fn run<R: RandomSource>(&self, rng: &mut R) -> SimResult<SimulationReport> {
        let start_time = Instant::now();
        let config = &self.config;
        let percentiles = &config.fitness_percentiles;

        let mut report = SimulationReport::new(config.clone());
        let mut cattery = self.found(rng)?;
        let baseline = GenerationStatistics::from_cohort(
            0,
            cattery.born_at(SimDuration::ZERO),
            &self.fitness,
            percentiles,
        );
        debug!(
            founders = baseline.population_size,
            quotient = baseline.average_fitness_quotient,
            "founded cattery"
        );
        report.record(baseline);

        let death_probability = config.death_probability();
        let mut now = SimDuration::ZERO;

        for generation in 1..=config.total_generations_to_simulate {
            now += config.breeding_cycle_duration;

            if let Some(probability) = death_probability {
                let deceased: Vec<CatId> = cattery
                    .iter()
                    .filter(|_| rng.uniform() < probability)
                    .map(|cat| cat.id())
                    .collect();
                let removed = cattery.remove_deceased(&deceased);
                debug!(generation, removed, remaining = cattery.len(), "mortality");
            }

            if cattery.is_empty() {
                info!(generation, "cattery went extinct");
                report.termination = TerminationReason::Extinct { generation };
                break;
            }

            let result = self.strategy.apply(&cattery, now, &mut *rng);
            cattery.sterilize(&result.sterilized);
            cattery.extend(result.new_cats)?;

            let stats = GenerationStatistics::from_cohort(
                generation,
                cattery.born_at(now + config.gestation_duration),
                &self.fitness,
                percentiles,
            );
            debug!(
                generation,
                litters = result.mated_females.len(),
                kittens = stats.population_size,
                population = cattery.len(),
                quotient = stats.average_fitness_quotient,
                "generation complete"
            );
            report.record(stats);
        }

        report.set_runtime(start_time.elapsed());
        info!(
            generations = report.num_generations(),
            termination = %report.termination,
            "simulation finished"
        );
        Ok(report)
    }

    /// Draw the selection pool and keep its fittest members as founders
    fn found<R: RandomSource>(&self, rng: &mut R) -> SimResult<Cattery> {
        let config = &self.config;
        let std_dev = config.founder_trait_std_dev();
        let pool: Vec<Cat> = (0..config.initial_population_selection_pool_size)
            .map(|_| {
                let sex = Sex::coin_flip(&mut *rng);
                Cat::random(sex, SimDuration::ZERO, config.total_trait_count, std_dev, &mut *rng)
            })
            .collect();

        let mut ranked: Vec<&Cat> = pool.iter().collect();
        rank_by_fitness(&mut ranked, &self.fitness);

        let founders = ranked
            .into_iter()
            .take(config.initial_population_size)
            .cloned();
        Ok(Cattery::from_cats(founders)?)
    }
}
