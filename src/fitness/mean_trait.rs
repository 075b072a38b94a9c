//! Mean-of-traits fitness
//!
//! Fitness is the arithmetic mean of a configured subset of trait values.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::config::SimulationConfig;
use crate::fitness::traits::FitnessCalculator;
use crate::population::individual::Cat;

/// Mean of the traits at a fixed set of indices
///
/// Duplicate indices are collapsed. With no indices every cat scores 0.0.
#[derive(Clone, Debug, PartialEq)]
pub struct MeanTraitFitness {
    indices: Arc<[usize]>,
}

impl MeanTraitFitness {
    /// Create a calculator over the given trait indices
    pub fn new<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        let unique: BTreeSet<usize> = indices.into_iter().collect();
        Self {
            indices: unique.into_iter().collect(),
        }
    }

    /// Create a calculator over the configured fitness trait indices
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.fitness_trait_indices.iter().copied())
    }

    /// The distinct indices contributing to fitness, ascending
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl FitnessCalculator for MeanTraitFitness {
    /// Panics if an index is out of range for the cat's trait vector.
    fn fitness(&self, cat: &Cat) -> f64 {
        if self.indices.is_empty() {
            return 0.0;
        }
        let traits = cat.traits();
        let sum: f64 = self.indices.iter().map(|&i| traits[i]).sum();
        sum / self.indices.len() as f64
    }
}
