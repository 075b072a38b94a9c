//! Individual cat type
//!
//! This module provides the `Cat` type together with its identifier and sex.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::genome::trait_vector::TraitVector;
use crate::random::RandomSource;
use crate::time::SimDuration;

static NEXT_CAT_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of a cat
///
/// Fresh ids come from a process-wide counter, so they are never reused and
/// sort in creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CatId(pub u64);

impl CatId {
    /// Allocate a new id
    pub fn fresh() -> Self {
        Self(NEXT_CAT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for CatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cat({})", self.0)
    }
}

impl From<u64> for CatId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<CatId> for u64 {
    fn from(id: CatId) -> Self {
        id.0
    }
}

/// Sex of an individual
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Fair coin between the two sexes
    pub fn coin_flip<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        if rng.uniform() < 0.5 {
            Sex::Male
        } else {
            Sex::Female
        }
    }

    /// The other sex
    pub fn opposite(self) -> Self {
        match self {
            Sex::Male => Sex::Female,
            Sex::Female => Sex::Male,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => f.write_str("male"),
            Sex::Female => f.write_str("female"),
        }
    }
}

/// An individual in the cattery
///
/// Everything but the fertility flag is fixed at construction. Fertility is
/// only ever cleared through [`Cattery::sterilize`].
///
/// [`Cattery::sterilize`]: crate::population::population::Cattery::sterilize
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cat {
    id: CatId,
    birth_time: SimDuration,
    sex: Sex,
    traits: TraitVector,
    fertile: bool,
    mother: Option<CatId>,
    father: Option<CatId>,
}

impl Cat {
    /// Create a fertile founder-style cat with no recorded parents
    pub fn new(id: CatId, birth_time: SimDuration, sex: Sex, traits: TraitVector) -> Self {
        Self {
            id,
            birth_time,
            sex,
            traits,
            fertile: true,
            mother: None,
            father: None,
        }
    }

    /// Create a fertile offspring of the given parents
    pub fn offspring(
        id: CatId,
        birth_time: SimDuration,
        sex: Sex,
        traits: TraitVector,
        mother: CatId,
        father: CatId,
    ) -> Self {
        Self {
            id,
            birth_time,
            sex,
            traits,
            fertile: true,
            mother: Some(mother),
            father: Some(father),
        }
    }

    /// Random fertile cat with a fresh id
    ///
    /// Every trait is drawn as `N(0, trait_std_dev²)`.
    pub fn random<R: RandomSource + ?Sized>(
        sex: Sex,
        birth_time: SimDuration,
        trait_count: usize,
        trait_std_dev: f64,
        rng: &mut R,
    ) -> Self {
        Self::new(
            CatId::fresh(),
            birth_time,
            sex,
            TraitVector::sample(trait_count, trait_std_dev, rng),
        )
    }

    /// Builder-style initial fertility (defaults to fertile)
    pub fn with_fertility(mut self, fertile: bool) -> Self {
        self.fertile = fertile;
        self
    }

    pub fn id(&self) -> CatId {
        self.id
    }

    pub fn birth_time(&self) -> SimDuration {
        self.birth_time
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn traits(&self) -> &TraitVector {
        &self.traits
    }

    pub fn is_fertile(&self) -> bool {
        self.fertile
    }

    pub fn mother(&self) -> Option<CatId> {
        self.mother
    }

    pub fn father(&self) -> Option<CatId> {
        self.father
    }

    /// Age at the given simulation time (negative before birth)
    pub fn age(&self, now: SimDuration) -> SimDuration {
        now - self.birth_time
    }

    /// Fertile flag set and at least `fertility_age` old at `now`
    pub fn can_breed(&self, now: SimDuration, fertility_age: SimDuration) -> bool {
        self.fertile && self.age(now) >= fertility_age
    }

    pub(crate) fn sterilize(&mut self) {
        self.fertile = false;
    }
}
