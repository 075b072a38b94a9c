//! Simulation clock
//!
//! Birth times, ages and cycle lengths are all expressed as a signed
//! [`SimDuration`] relative to the start of a run. Millisecond resolution
//! keeps arithmetic exact, which the per-generation cohort filter relies on.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// A signed span of simulated time
///
/// Serialized as a (possibly fractional) number of days.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct SimDuration {
    millis: i64,
}

impl SimDuration {
    /// The zero duration; also the start of every run
    pub const ZERO: Self = Self { millis: 0 };

    /// Create from whole milliseconds
    pub const fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    /// Create from a number of days, rounded to the nearest millisecond
    ///
    /// Panics if `days` is not finite or overflows the millisecond range;
    /// see [`SimDuration::try_from_days`].
    pub fn from_days(days: f64) -> Self {
        match Self::try_from_days(days) {
            Ok(duration) => duration,
            Err(message) => panic!("{message}"),
        }
    }

    /// Create from a number of days, rejecting values that do not fit
    pub fn try_from_days(days: f64) -> Result<Self, String> {
        if !days.is_finite() {
            return Err(format!("duration must be a finite number of days, got {days}"));
        }
        Self::from_millis_f64(days * MILLIS_PER_DAY)
            .ok_or_else(|| format!("duration of {days} days is out of range"))
    }

    fn from_millis_f64(millis: f64) -> Option<Self> {
        let millis = millis.round();
        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        if millis.is_finite() && millis >= i64::MIN as f64 && millis < i64::MAX as f64 {
            Some(Self::from_millis(millis as i64))
        } else {
            None
        }
    }

    /// Create from whole days
    pub const fn days(days: i64) -> Self {
        Self {
            millis: days * 86_400_000,
        }
    }

    /// Whole milliseconds
    pub const fn as_millis(&self) -> i64 {
        self.millis
    }

    /// Length in days
    pub fn as_days(&self) -> f64 {
        self.millis as f64 / MILLIS_PER_DAY
    }

    /// Scale by a real factor, rounding to the nearest millisecond
    pub fn mul_f64(self, factor: f64) -> Self {
        Self {
            millis: (self.millis as f64 * factor).round() as i64,
        }
    }

    /// Scale by a real factor, or `None` if the result does not fit
    pub fn checked_mul_f64(self, factor: f64) -> Option<Self> {
        Self::from_millis_f64(self.millis as f64 * factor)
    }

    /// Multiply by an integer count, or `None` on overflow
    pub fn checked_mul(self, count: i64) -> Option<Self> {
        self.millis.checked_mul(count).map(Self::from_millis)
    }

    /// Add, or `None` on overflow
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.millis.checked_add(rhs.millis).map(Self::from_millis)
    }

    /// Subtract, or `None` on overflow
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.millis.checked_sub(rhs.millis).map(Self::from_millis)
    }

    /// Strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.millis > 0
    }

    /// Strictly less than zero
    pub fn is_negative(&self) -> bool {
        self.millis < 0
    }
}

impl Add for SimDuration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            millis: self.millis + rhs.millis,
        }
    }
}

impl AddAssign for SimDuration {
    fn add_assign(&mut self, rhs: Self) {
        self.millis += rhs.millis;
    }
}

impl Sub for SimDuration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            millis: self.millis - rhs.millis,
        }
    }
}

impl SubAssign for SimDuration {
    fn sub_assign(&mut self, rhs: Self) {
        self.millis -= rhs.millis;
    }
}

impl Neg for SimDuration {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            millis: -self.millis,
        }
    }
}

impl fmt::Display for SimDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d", self.as_days())
    }
}

impl From<SimDuration> for f64 {
    fn from(duration: SimDuration) -> Self {
        duration.as_days()
    }
}

impl TryFrom<f64> for SimDuration {
    type Error = String;

    fn try_from(days: f64) -> Result<Self, Self::Error> {
        Self::try_from_days(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_roundtrip() {
        let d = SimDuration::from_days(1.5);
        assert_eq!(d.as_millis(), 129_600_000);
        assert_eq!(d.as_days(), 1.5);
        assert_eq!(SimDuration::days(60), SimDuration::from_days(60.0));
    }

    #[test]
    fn test_arithmetic_is_exact() {
        let cycle = SimDuration::days(300);
        let gestation = SimDuration::days(60);
        let mut clock = SimDuration::ZERO;
        clock += cycle;
        clock += cycle;
        assert_eq!(clock + gestation, SimDuration::days(660));
        assert_eq!(clock - cycle, cycle);
    }

    #[test]
    fn test_mul_f64_can_go_negative() {
        let age = SimDuration::days(180);
        assert_eq!(age.mul_f64(1.2), SimDuration::days(216));

        let birth = SimDuration::days(100) - age.mul_f64(1.2);
        assert!(birth.is_negative());
        assert_eq!(-birth, SimDuration::days(116));
    }

    #[test]
    fn test_serde_as_days() {
        let json = serde_json::to_string(&SimDuration::days(30)).unwrap();
        assert_eq!(json, "30.0");

        let back: SimDuration = serde_json::from_str("0.5").unwrap();
        assert_eq!(back, SimDuration::from_millis(43_200_000));
    }

    #[test]
    fn test_display() {
        assert_eq!(SimDuration::days(2).to_string(), "2d");
    }

    #[test]
    fn test_out_of_range_days_rejected() {
        assert!(SimDuration::try_from_days(2e11).is_err());
        assert!(SimDuration::try_from_days(-2e11).is_err());
        assert!(SimDuration::try_from_days(f64::NAN).is_err());
        assert!(SimDuration::try_from(f64::INFINITY).is_err());
        assert_eq!(SimDuration::try_from_days(-1.0), Ok(SimDuration::days(-1)));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_from_days_panics_out_of_range() {
        let _ = SimDuration::from_days(1e300);
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = SimDuration::from_millis(i64::MAX);
        assert_eq!(max.checked_add(SimDuration::from_millis(1)), None);
        let min = SimDuration::from_millis(i64::MIN);
        assert_eq!(min.checked_sub(SimDuration::from_millis(1)), None);
        assert_eq!(max.checked_mul(2), None);
        assert_eq!(max.checked_mul_f64(1.2), None);
        assert_eq!(
            SimDuration::days(300).checked_mul(10),
            Some(SimDuration::days(3000))
        );
        assert_eq!(
            SimDuration::days(180).checked_mul_f64(1.2),
            Some(SimDuration::days(216))
        );
    }
}
