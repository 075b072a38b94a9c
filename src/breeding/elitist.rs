//! Elitist breeding strategy
//!
//! The fittest fertile females are mated with the fittest fertile male, and
//! every fertile adult gets exactly one chance to breed.

use std::collections::BTreeSet;

use tracing::debug;

use crate::breeding::inheritance::Inheritance;
use crate::breeding::traits::{BreedingResult, BreedingStrategy};
use crate::config::SimulationConfig;
use crate::fitness::mean_trait::MeanTraitFitness;
use crate::fitness::traits::{rank_by_fitness, FitnessCalculator};
use crate::population::individual::{Cat, CatId, Sex};
use crate::population::population::Cattery;
use crate::random::RandomSource;
use crate::time::SimDuration;

/// Elitist selection and mating
///
/// Each cycle:
/// 1. Collect the fertile adults of each sex and rank them by fitness
///    (stable, so ties keep id order).
/// 2. For each sex with no fertile adult, introduce a synthetic adult of
///    that sex, old enough to breed. An empty cattery yields an empty result.
/// 3. Mate the top `max_breeding_females` females, one litter each, with
///    the top sire(s).
/// 4. Sterilize every cat that was in either fertile pool.
///
/// Synthetic parents are one-shot: they are reported in
/// [`BreedingResult::introduced`] and sterilized, but never join the cattery.
#[derive(Clone, Debug)]
pub struct ElitistStrategy<Fit> {
    config: SimulationConfig,
    inheritance: Inheritance,
    fitness: Fit,
    sire_count: usize,
    bootstrap_pool_size: usize,
}

impl ElitistStrategy<MeanTraitFitness> {
    /// Elitist strategy scoring cats by their mean fitness trait
    ///
    /// Always uses a single sire; `max_breeding_males` is advisory and only
    /// honored through [`ElitistStrategy::with_sire_count`].
    pub fn from_config(config: &SimulationConfig) -> Self {
        let strategy = Self::new(config.clone(), MeanTraitFitness::from_config(config));
        if config.max_breeding_males != strategy.sire_count {
            debug!(
                max_breeding_males = config.max_breeding_males,
                sire_count = strategy.sire_count,
                "elitist strategy ignores max_breeding_males"
            );
        }
        strategy
    }
}

impl<Fit: FitnessCalculator> ElitistStrategy<Fit> {
    /// Create an elitist strategy with a single sire per cycle
    pub fn new(config: SimulationConfig, fitness: Fit) -> Self {
        let inheritance = Inheritance::from_config(&config);
        Self {
            config,
            inheritance,
            fitness,
            sire_count: 1,
            bootstrap_pool_size: 1,
        }
    }

    /// Mate the top `sire_count` males, assigned round-robin to the ranked females
    pub fn with_sire_count(mut self, sire_count: usize) -> Self {
        assert!(sire_count > 0, "Sire count must be positive");
        self.sire_count = sire_count;
        self
    }

    /// Make each synthetic parent the fittest of `pool_size` random candidates
    pub fn with_bootstrap_pool_size(mut self, pool_size: usize) -> Self {
        assert!(pool_size > 0, "Bootstrap pool size must be positive");
        self.bootstrap_pool_size = pool_size;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn fitness(&self) -> &Fit {
        &self.fitness
    }

    pub fn sire_count(&self) -> usize {
        self.sire_count
    }

    pub fn bootstrap_pool_size(&self) -> usize {
        self.bootstrap_pool_size
    }

    /// Synthetic adult of the given sex, born `1.2 × fertility_age` before `now`
    fn bootstrap_parent(&self, sex: Sex, now: SimDuration, rng: &mut dyn RandomSource) -> Cat {
        let birth_time = now - self.config.fertility_age.mul_f64(1.2);
        let trait_count = self.config.total_trait_count;
        let std_dev = self.config.founder_trait_std_dev();

        let mut parent = Cat::random(sex, birth_time, trait_count, std_dev, &mut *rng);
        let mut score = self.fitness.fitness(&parent);
        for _ in 1..self.bootstrap_pool_size {
            let candidate = Cat::random(sex, birth_time, trait_count, std_dev, &mut *rng);
            let candidate_score = self.fitness.fitness(&candidate);
            if candidate_score > score {
                parent = candidate;
                score = candidate_score;
            }
        }
        debug!(id = %parent.id(), %sex, fitness = score, "introduced synthetic parent");
        parent
    }
}

impl<Fit: FitnessCalculator> BreedingStrategy for ElitistStrategy<Fit> {
    fn apply(
        &self,
        cattery: &Cattery,
        now: SimDuration,
        rng: &mut dyn RandomSource,
    ) -> BreedingResult {
        if cattery.is_empty() {
            return BreedingResult::empty();
        }

        let fertility_age = self.config.fertility_age;
        let mut introduced = Vec::new();
        for sex in [Sex::Male, Sex::Female] {
            if cattery.fertile_adults(sex, now, fertility_age).next().is_none() {
                introduced.push(self.bootstrap_parent(sex, now, &mut *rng));
            }
        }

        let pool = |sex: Sex| {
            let mut cats: Vec<&Cat> = cattery
                .fertile_adults(sex, now, fertility_age)
                .chain(introduced.iter().filter(|c| c.sex() == sex))
                .collect();
            rank_by_fitness(&mut cats, &self.fitness);
            cats
        };
        let males = pool(Sex::Male);
        let females = pool(Sex::Female);

        let sires = &males[..self.sire_count.min(males.len())];
        let birth_time = now + self.config.gestation_duration;
        let mut new_cats = Vec::new();
        let mut mated_females = Vec::new();
        for (rank, mother) in females
            .iter()
            .take(self.config.max_breeding_females)
            .enumerate()
        {
            let father = sires[rank % sires.len()];
            new_cats.extend(self.inheritance.litter(mother, father, birth_time, &mut *rng));
            mated_females.push(mother.id());
        }

        let mut seen = BTreeSet::new();
        let sterilized: Vec<CatId> = males
            .iter()
            .chain(females.iter())
            .map(|c| c.id())
            .filter(|id| seen.insert(*id))
            .collect();

        debug!(
            litters = mated_females.len(),
            kittens = new_cats.len(),
            sterilized = sterilized.len(),
            "breeding cycle"
        );

        BreedingResult {
            new_cats,
            mated_females,
            sterilized,
            introduced,
        }
    }

    fn name(&self) -> &'static str {
        "elitist"
    }
}
