//! Genome representation
//!
//! This module provides the immutable `TraitVector` genome.

pub mod trait_vector;

pub mod prelude {
    pub use super::trait_vector::*;
}
