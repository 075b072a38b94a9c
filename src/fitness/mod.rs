//! Fitness evaluation
//!
//! This module provides the fitness abstraction, the mean-of-traits
//! calculator and the quotient scale used for reporting.

pub mod mean_trait;
pub mod quotient;
pub mod traits;

pub mod prelude {
    pub use super::mean_trait::*;
    pub use super::quotient::*;
    pub use super::traits::*;
}
