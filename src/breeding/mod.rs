//! Breeding strategies
//!
//! This module provides the pluggable selection-and-mating policy, the
//! inheritance model it uses to produce litters, and the elitist policy.

pub mod elitist;
pub mod inheritance;
pub mod traits;

pub mod prelude {
    pub use super::elitist::*;
    pub use super::inheritance::*;
    pub use super::traits::*;
}
