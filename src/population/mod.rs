//! Population management
//!
//! This module provides the `Cat` individual and the `Cattery` population.

pub mod individual;
#[allow(clippy::module_inception)]
pub mod population;

pub mod prelude {
    pub use super::individual::*;
    pub use super::population::*;
}
