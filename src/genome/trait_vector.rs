//! Trait vector genome
//!
//! This module provides the fixed-length, immutable vector of real-valued
//! traits that makes up an individual's genome.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::GenomeError;
use crate::random::RandomSource;

/// Immutable fixed-length vector of trait values
///
/// Equality is element-wise and the hash is consistent with it. The backing
/// storage is shared, so cloning never copies the traits. The unchecked
/// constructors accept NaN; see the note on the `Eq` impl.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TraitVector {
    traits: Arc<[f64]>,
}

impl TraitVector {
    /// Create a trait vector, taking ownership of the values
    pub fn new(traits: Vec<f64>) -> Self {
        Self {
            traits: traits.into(),
        }
    }

    /// Create a trait vector after checking that every value is finite
    pub fn try_new(traits: Vec<f64>) -> Result<Self, GenomeError> {
        if let Some(index) = traits.iter().position(|t| !t.is_finite()) {
            return Err(GenomeError::NonFiniteTrait { index });
        }
        Ok(Self::new(traits))
    }

    /// Create a trait vector of the expected length
    pub fn with_dimension(traits: Vec<f64>, expected: usize) -> Result<Self, GenomeError> {
        if traits.len() != expected {
            return Err(GenomeError::DimensionMismatch {
                expected,
                actual: traits.len(),
            });
        }
        Self::try_new(traits)
    }

    /// Copy the values out of a slice
    pub fn from_slice(traits: &[f64]) -> Self {
        Self {
            traits: Arc::from(traits),
        }
    }

    /// Create a vector filled with a constant value
    pub fn filled(len: usize, value: f64) -> Self {
        Self::new(vec![value; len])
    }

    /// Draw `len` independent traits, each `N(0, std_dev²)`
    pub fn sample<R: RandomSource + ?Sized>(len: usize, std_dev: f64, rng: &mut R) -> Self {
        Self::new((0..len).map(|_| rng.gaussian() * std_dev).collect())
    }

    /// Number of traits
    pub fn len(&self) -> usize {
        self.traits.len()
    }

    /// Check if the vector holds no traits
    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }

    /// Trait value at `index`, or `None` when out of range
    pub fn get(&self, index: usize) -> Option<f64> {
        self.traits.get(index).copied()
    }

    /// Borrow the trait values
    pub fn as_slice(&self) -> &[f64] {
        &self.traits
    }

    /// Iterate over the trait values
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.traits.iter().copied()
    }
}

impl PartialEq for TraitVector {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.traits, &other.traits) || self.traits[..] == other.traits[..]
    }
}

/// Reflexive only for finite traits: a vector holding NaN is equal to its
/// clones (shared storage) but not to a separately built copy. Use
/// [`TraitVector::try_new`] to rule NaN out.
impl Eq for TraitVector {}

impl Hash for TraitVector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.traits.len().hash(state);
        for &value in self.traits.iter() {
            // 0.0 == -0.0, so both must hash alike
            let canonical = if value == 0.0 { 0.0f64 } else { value };
            canonical.to_bits().hash(state);
        }
    }
}

impl std::ops::Index<usize> for TraitVector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.traits[index]
    }
}

impl From<Vec<f64>> for TraitVector {
    fn from(traits: Vec<f64>) -> Self {
        Self::new(traits)
    }
}

impl<const N: usize> From<[f64; N]> for TraitVector {
    fn from(arr: [f64; N]) -> Self {
        Self::from_slice(&arr)
    }
}

impl<'a> IntoIterator for &'a TraitVector {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.traits.iter()
    }
}
