//! Breeding strategy traits
//!
//! This module defines the breeding strategy trait and the result it returns.

use crate::population::individual::{Cat, CatId};
use crate::population::population::Cattery;
use crate::random::RandomSource;
use crate::time::SimDuration;

/// Outcome of one breeding cycle
///
/// These are intents: the strategy never touches the cattery, the engine
/// applies them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BreedingResult {
    /// Kittens conceived this cycle
    pub new_cats: Vec<Cat>,
    /// Females that were mated, best first
    pub mated_females: Vec<CatId>,
    /// Cats to sterilize, without duplicates
    pub sterilized: Vec<CatId>,
    /// Synthetic parents created because a sex had no fertile adult
    ///
    /// They are not part of the cattery; kittens may still name them as parents.
    pub introduced: Vec<Cat>,
}

impl BreedingResult {
    /// A cycle in which nothing happened
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of litters, i.e. mated females
    pub fn litter_count(&self) -> usize {
        self.mated_females.len()
    }

    /// Check if no kittens were conceived
    pub fn is_barren(&self) -> bool {
        self.new_cats.is_empty()
    }
}

/// Selection and mating policy
///
/// Given the current cattery and simulation time, decides who breeds, which
/// kittens are conceived and who is sterilized afterwards.
pub trait BreedingStrategy: Send + Sync {
    /// Run one breeding cycle
    fn apply(
        &self,
        cattery: &Cattery,
        now: SimDuration,
        rng: &mut dyn RandomSource,
    ) -> BreedingResult;

    /// Short name used in logs
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<S: BreedingStrategy + ?Sized> BreedingStrategy for Box<S> {
    fn apply(
        &self,
        cattery: &Cattery,
        now: SimDuration,
        rng: &mut dyn RandomSource,
    ) -> BreedingResult {
        (**self).apply(cattery, now, rng)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<S: BreedingStrategy + ?Sized> BreedingStrategy for &S {
    fn apply(
        &self,
        cattery: &Cattery,
        now: SimDuration,
        rng: &mut dyn RandomSource,
    ) -> BreedingResult {
        (**self).apply(cattery, now, rng)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// A strategy that never breeds
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBreeding;

impl BreedingStrategy for NoBreeding {
    fn apply(
        &self,
        _cattery: &Cattery,
        _now: SimDuration,
        _rng: &mut dyn RandomSource,
    ) -> BreedingResult {
        BreedingResult::empty()
    }

    fn name(&self) -> &'static str {
        "none"
    }
}
