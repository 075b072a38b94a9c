//! Inheritance model
//!
//! Litter size, offspring sex and trait mixing with mutation.

use crate::config::SimulationConfig;
use crate::genome::trait_vector::TraitVector;
use crate::population::individual::{Cat, CatId, Sex};
use crate::random::RandomSource;
use crate::time::SimDuration;

/// Probability that a kitten is male (100 males per 92 females)
pub const MALE_PROBABILITY: f64 = 100.0 / (100.0 + 92.0);

/// Largest litter a single mating can produce
pub const MAX_LITTER_SIZE: usize = 8;

/// Draw the sex of one kitten
pub fn offspring_sex<R: RandomSource + ?Sized>(rng: &mut R) -> Sex {
    if rng.uniform() < MALE_PROBABILITY {
        Sex::Male
    } else {
        Sex::Female
    }
}

/// Parameters of litter generation
///
/// Litter size is a rounded Gaussian clamped to `[0, MAX_LITTER_SIZE]`.
/// Every trait of a kitten comes from the mother or the father with equal
/// probability, plus Gaussian mutation noise.
#[derive(Clone, Debug, PartialEq)]
pub struct Inheritance {
    /// Mean litter size
    pub litter_size_mean: f64,
    /// Litter size standard deviation
    pub litter_size_std_dev: f64,
    /// Standard deviation of the noise added to each inherited trait
    pub mutation_std_dev: f64,
}

impl Inheritance {
    pub fn new(litter_size_mean: f64, litter_size_std_dev: f64, mutation_std_dev: f64) -> Self {
        Self {
            litter_size_mean,
            litter_size_std_dev,
            mutation_std_dev,
        }
    }

    /// Inheritance parameters of a configuration
    ///
    /// Mutation noise is scaled by `sqrt(|fitness traits|)`.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            config.litter_size_mean,
            config.litter_size_std_dev,
            config.mutation_std_dev(),
        )
    }

    /// Draw a litter size
    ///
    /// Halfway values round to even.
    pub fn litter_size<R: RandomSource + ?Sized>(&self, rng: &mut R) -> usize {
        let raw = rng.gaussian() * self.litter_size_std_dev + self.litter_size_mean;
        if !raw.is_finite() {
            return 0;
        }
        raw.round_ties_even().clamp(0.0, MAX_LITTER_SIZE as f64) as usize
    }

    /// Mix the parents' traits and add mutation noise
    ///
    /// Draws one coin and one Gaussian per trait, in trait order. Parents of
    /// different dimension yield a kitten of the shorter dimension.
    pub fn inherit_traits<R: RandomSource + ?Sized>(
        &self,
        mother: &TraitVector,
        father: &TraitVector,
        rng: &mut R,
    ) -> TraitVector {
        let traits = mother
            .iter()
            .zip(father.iter())
            .map(|(m, f)| {
                let inherited = if rng.uniform_int(2) == 0 { m } else { f };
                inherited + rng.gaussian() * self.mutation_std_dev
            })
            .collect();
        TraitVector::new(traits)
    }

    /// Generate one litter born at `birth_time`
    pub fn litter<R: RandomSource + ?Sized>(
        &self,
        mother: &Cat,
        father: &Cat,
        birth_time: SimDuration,
        rng: &mut R,
    ) -> Vec<Cat> {
        let size = self.litter_size(rng);
        (0..size)
            .map(|_| {
                let sex = offspring_sex(rng);
                let traits = self.inherit_traits(mother.traits(), father.traits(), rng);
                Cat::offspring(CatId::fresh(), birth_time, sex, traits, mother.id(), father.id())
            })
            .collect()
    }
}
