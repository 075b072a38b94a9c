//! Fitness quotient
//!
//! Re-expresses raw fitness on an IQ-like scale. Raw fitness is read as a
//! z-score against a fixed reference population (mean 0, standard deviation
//! 1) and mapped to mean 100, standard deviation 15.

/// Reference population mean of raw fitness
pub const REFERENCE_MEAN: f64 = 0.0;
/// Reference population standard deviation of raw fitness
pub const REFERENCE_STD_DEV: f64 = 1.0;
/// Quotient assigned to the reference mean
pub const QUOTIENT_MEAN: f64 = 100.0;
/// Quotient points per reference standard deviation
pub const QUOTIENT_STD_DEV: f64 = 15.0;

/// Stateless raw-fitness-to-quotient converter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FitnessQuotient;

impl FitnessQuotient {
    /// Convert a raw fitness value to its quotient
    pub fn to_quotient(raw_fitness: f64) -> f64 {
        let z_score = (raw_fitness - REFERENCE_MEAN) / REFERENCE_STD_DEV;
        z_score * QUOTIENT_STD_DEV + QUOTIENT_MEAN
    }

    /// Inverse of [`FitnessQuotient::to_quotient`]
    pub fn to_raw(quotient: f64) -> f64 {
        (quotient - QUOTIENT_MEAN) / QUOTIENT_STD_DEV * REFERENCE_STD_DEV + REFERENCE_MEAN
    }
}
