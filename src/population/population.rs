//! Cattery type
//!
//! This module provides the id-keyed container holding every living cat of a run.

use std::collections::btree_map::{self, BTreeMap};

use crate::error::PopulationError;
use crate::population::individual::{Cat, CatId, Sex};
use crate::time::SimDuration;

/// A population of cats keyed by id
///
/// Iteration follows id order, which is creation order for ids from
/// [`CatId::fresh`]. Fertility flags are only changed through
/// [`Cattery::sterilize`].
#[derive(Clone, Debug, Default)]
pub struct Cattery {
    cats: BTreeMap<CatId, Cat>,
}

impl Cattery {
    /// Create an empty cattery
    pub fn new() -> Self {
        Self {
            cats: BTreeMap::new(),
        }
    }

    /// Create a cattery from an initial set of cats
    pub fn from_cats<I: IntoIterator<Item = Cat>>(cats: I) -> Result<Self, PopulationError> {
        let mut cattery = Self::new();
        cattery.extend(cats)?;
        Ok(cattery)
    }

    /// Get the number of cats
    pub fn len(&self) -> usize {
        self.cats.len()
    }

    /// Check if the cattery is empty
    pub fn is_empty(&self) -> bool {
        self.cats.is_empty()
    }

    /// Add one cat
    pub fn insert(&mut self, cat: Cat) -> Result<(), PopulationError> {
        match self.cats.entry(cat.id()) {
            btree_map::Entry::Occupied(_) => Err(PopulationError::DuplicateId(cat.id())),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(cat);
                Ok(())
            }
        }
    }

    /// Add many cats, stopping at the first duplicate id
    pub fn extend<I: IntoIterator<Item = Cat>>(&mut self, cats: I) -> Result<(), PopulationError> {
        for cat in cats {
            self.insert(cat)?;
        }
        Ok(())
    }

    /// Look up a cat by id
    pub fn get(&self, id: CatId) -> Option<&Cat> {
        self.cats.get(&id)
    }

    /// Check whether a cat with this id is present
    pub fn contains(&self, id: CatId) -> bool {
        self.cats.contains_key(&id)
    }

    /// Clear the fertility flag of every listed cat
    ///
    /// Ids not present are ignored. Returns how many cats were found.
    pub fn sterilize<'a, I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = &'a CatId>,
    {
        let mut found = 0;
        for id in ids {
            if let Some(cat) = self.cats.get_mut(id) {
                cat.sterilize();
                found += 1;
            }
        }
        found
    }

    /// Remove every listed cat
    ///
    /// Ids not present are ignored. Returns how many cats were removed.
    pub fn remove_deceased<'a, I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = &'a CatId>,
    {
        ids.into_iter()
            .filter(|id| self.cats.remove(*id).is_some())
            .count()
    }

    /// Remove every cat
    pub fn clear(&mut self) {
        self.cats.clear();
    }

    /// Replace the whole population
    pub fn replace<I: IntoIterator<Item = Cat>>(&mut self, cats: I) -> Result<(), PopulationError> {
        self.clear();
        self.extend(cats)
    }

    /// Iterate over the cats in id order
    pub fn iter(&self) -> impl Iterator<Item = &Cat> {
        self.cats.values()
    }

    /// Iterate over the ids in order
    pub fn ids(&self) -> impl Iterator<Item = CatId> + '_ {
        self.cats.keys().copied()
    }

    /// Cats born exactly at `birth_time`
    pub fn born_at(&self, birth_time: SimDuration) -> impl Iterator<Item = &Cat> {
        self.cats
            .values()
            .filter(move |cat| cat.birth_time() == birth_time)
    }

    /// Fertile cats of the given sex that are old enough to breed at `now`
    pub fn fertile_adults(
        &self,
        sex: Sex,
        now: SimDuration,
        fertility_age: SimDuration,
    ) -> impl Iterator<Item = &Cat> {
        self.cats
            .values()
            .filter(move |cat| cat.sex() == sex && cat.can_breed(now, fertility_age))
    }
}

impl<'a> IntoIterator for &'a Cattery {
    type Item = &'a Cat;
    type IntoIter = btree_map::Values<'a, CatId, Cat>;

    fn into_iter(self) -> Self::IntoIter {
        self.cats.values()
    }
}

impl IntoIterator for Cattery {
    type Item = Cat;
    type IntoIter = btree_map::IntoValues<CatId, Cat>;

    fn into_iter(self) -> Self::IntoIter {
        self.cats.into_values()
    }
}
