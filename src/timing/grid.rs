use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::rational::{const_gcd, prime_factors, Rational};

/// Clock ticks per second for a microsecond-resolution sample timer.
pub const DEFAULT_CLOCK_RESOLUTION: u64 = 1_000_000;

/// Sampling grid on which every configured frequency completes a whole
/// number of periods.
///
/// `sample_count` is the smallest count such that all signals align within
/// `sample_count * timer_increment` clock ticks at `points_per_period`
/// samples per period of the fastest-aligned composite cycle.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleGrid {
    /// Clock ticks between two consecutive samples
    pub timer_increment: u64,
    /// Total number of samples in one repeat window
    pub sample_count: u64,
    /// Smallest device buffer that holds the table plus one spare row
    pub min_buffer_size: u64,
}

/// Errors that can occur when computing a sampling grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateError {
    /// No frequencies were supplied
    EmptyFrequencies,
    /// `points_per_period` was zero
    ZeroPointsPerPeriod,
    /// `clock_resolution` was zero
    ZeroClockResolution,
    /// A frequency of zero has no period to sample
    ZeroFrequency,
}

impl fmt::Display for RateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateError::EmptyFrequencies => {
                write!(f, "at least one frequency is required")
            }
            RateError::ZeroPointsPerPeriod => {
                write!(f, "points per period must be nonzero")
            }
            RateError::ZeroClockResolution => {
                write!(f, "clock resolution must be nonzero")
            }
            RateError::ZeroFrequency => {
                write!(f, "frequencies must be positive")
            }
        }
    }
}

impl std::error::Error for RateError {}

/// Compute the sampling grid for a set of rational frequencies.
///
/// All arithmetic is exact until the final floor, so identical inputs always
/// produce identical grids:
///
/// 1. Each frequency is normalized to the integer domain by scaling it by its
///    own denominator (for a reduced rational this is just its numerator).
/// 2. The repeat point — the shortest interval in which every signal
///    completes a whole number of cycles — is the reciprocal of the GCD of
///    the normalized frequencies.
/// 3. Each signal's period count within that window is factored into prime
///    powers, and the factorizations are merged by maximum exponent per
///    prime. Their product is the common period multiple.
/// 4. `sample_count = points_per_period * common_multiple`, and the timer
///    increment is the repeat window divided into `sample_count` slots,
///    floored to whole clock ticks.
pub fn calculate_sample_rates(
    frequencies: &[Rational],
    points_per_period: u32,
    clock_resolution: u64,
) -> Result<SampleGrid, RateError> {
    if frequencies.is_empty() {
        return Err(RateError::EmptyFrequencies);
    }
    if points_per_period == 0 {
        return Err(RateError::ZeroPointsPerPeriod);
    }
    if clock_resolution == 0 {
        return Err(RateError::ZeroClockResolution);
    }
    if frequencies.iter().any(|f| f.numer == 0) {
        return Err(RateError::ZeroFrequency);
    }

    // Scaling a reduced rational by its own denominator leaves its numerator
    let normalized: Vec<u64> = frequencies.iter().map(|f| f.reduce().numer).collect();

    let common_divisor = normalized.iter().copied().fold(0, const_gcd);
    let repeat_point = Rational::integer(common_divisor).recip();

    // Periods completed by each signal within the repeat window, merged into
    // a single prime-power map by maximum exponent (the LCM construction)
    let mut merged: BTreeMap<u64, u32> = BTreeMap::new();
    for &freq in &normalized {
        let periods = repeat_point.div(Rational::integer(freq).recip());
        debug_assert!(periods.is_integer());
        for (prime, exponent) in prime_factors(periods.floor()) {
            let entry = merged.entry(prime).or_insert(0);
            if exponent > *entry {
                *entry = exponent;
            }
        }
    }
    let common_multiple: u64 = merged.iter().map(|(prime, exp)| prime.pow(*exp)).product();

    let sample_count = points_per_period as u64 * common_multiple;
    let timer_increment = repeat_point
        .div(Rational::integer(sample_count))
        .mul(Rational::integer(clock_resolution))
        .floor();
    let min_buffer_size = (frequencies.len() as u64 + 1) * sample_count + 1;

    Ok(SampleGrid {
        timer_increment,
        sample_count,
        min_buffer_size,
    })
}
