//! Fitness traits
//!
//! This module defines the fitness evaluation trait.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::population::individual::Cat;

/// Fitness evaluation trait
///
/// Maps a cat to a scalar where higher is better. Implementations must be
/// pure: the engine and the breeding strategy may evaluate the same cat
/// many times and expect the same answer.
pub trait FitnessCalculator: Send + Sync {
    /// Evaluate the fitness of a cat
    fn fitness(&self, cat: &Cat) -> f64;
}

impl<F: FitnessCalculator + ?Sized> FitnessCalculator for &F {
    fn fitness(&self, cat: &Cat) -> f64 {
        (**self).fitness(cat)
    }
}

impl<F: FitnessCalculator + ?Sized> FitnessCalculator for Arc<F> {
    fn fitness(&self, cat: &Cat) -> f64 {
        (**self).fitness(cat)
    }
}

impl<F: FitnessCalculator + ?Sized> FitnessCalculator for Box<F> {
    fn fitness(&self, cat: &Cat) -> f64 {
        (**self).fitness(cat)
    }
}

/// A simple function wrapper for fitness evaluation
#[derive(Clone)]
pub struct FnFitness<F>
where
    F: Fn(&Cat) -> f64,
{
    f: F,
}

impl<F> FnFitness<F>
where
    F: Fn(&Cat) -> f64,
{
    /// Create a new function-based fitness calculator
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> FitnessCalculator for FnFitness<F>
where
    F: Fn(&Cat) -> f64 + Send + Sync,
{
    fn fitness(&self, cat: &Cat) -> f64 {
        (self.f)(cat)
    }
}

impl<F> std::fmt::Debug for FnFitness<F>
where
    F: Fn(&Cat) -> f64,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnFitness")
    }
}

/// Total order on fitness values, NaN below every number
///
/// Numbers compare as usual (`-0.0 == 0.0`); all NaNs are equal to each other.
pub fn compare_fitness(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) if a < b => Ordering::Less,
        (false, false) if a > b => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

/// Sort cats by fitness, best first
///
/// The sort is stable, so cats of equal fitness keep their input order.
/// Cats scoring NaN rank last.
pub fn rank_by_fitness<'a, Fit>(cats: &mut [&'a Cat], fitness: &Fit)
where
    Fit: FitnessCalculator + ?Sized,
{
    let mut scored: Vec<(f64, &'a Cat)> =
        cats.iter().map(|c| (fitness.fitness(c), *c)).collect();
    scored.sort_by(|a, b| compare_fitness(b.0, a.0));
    for (slot, (_, cat)) in cats.iter_mut().zip(scored) {
        *slot = cat;
    }
}
