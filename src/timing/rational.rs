use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Exact non-negative rational number.
/// Always stored reduced; all operations preserve exact ratios—no floating
/// point drift until the caller explicitly converts with [`Rational::to_f64`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    /// Numerator
    pub numer: u64,
    /// Denominator (never zero)
    pub denom: u64,
}

impl Rational {
    /// Create a rational from numerator and denominator, reduced to lowest
    /// terms. Panics if `denom` is zero.
    pub const fn new(numer: u64, denom: u64) -> Self {
        assert!(denom != 0, "rational denominator must be nonzero");
        Rational { numer, denom }.reduce()
    }

    /// Create a whole-number rational `n/1`
    pub const fn integer(n: u64) -> Self {
        Rational { numer: n, denom: 1 }
    }

    /// Reduce the fraction to lowest terms using GCD
    pub const fn reduce(self) -> Self {
        if self.numer == 0 {
            return Rational { numer: 0, denom: 1 };
        }
        let gcd = const_gcd(self.numer, self.denom);
        Rational {
            numer: self.numer / gcd,
            denom: self.denom / gcd,
        }
    }

    /// Multiply two rationals
    pub const fn mul(self, other: Self) -> Self {
        Rational {
            numer: self.numer * other.numer,
            denom: self.denom * other.denom,
        }
        .reduce()
    }

    /// Divide by another rational. Panics if `other` is zero.
    pub const fn div(self, other: Self) -> Self {
        self.mul(other.recip())
    }

    /// Reciprocal. Panics if the value is zero.
    pub const fn recip(self) -> Self {
        assert!(self.numer != 0, "cannot take reciprocal of zero");
        Rational {
            numer: self.denom,
            denom: self.numer,
        }
    }

    /// Greatest common divisor of two rationals:
    /// `gcd(a/b, c/d) = gcd(a, c) / lcm(b, d)`
    pub const fn gcd(self, other: Self) -> Self {
        Rational {
            numer: const_gcd(self.numer, other.numer),
            denom: const_lcm(self.denom, other.denom),
        }
        .reduce()
    }

    /// Least common multiple of two rationals:
    /// `lcm(a/b, c/d) = lcm(a, c) / gcd(b, d)`
    pub const fn lcm(self, other: Self) -> Self {
        Rational {
            numer: const_lcm(self.numer, other.numer),
            denom: const_gcd(self.denom, other.denom),
        }
        .reduce()
    }

    /// True when the value is a whole number
    pub const fn is_integer(self) -> bool {
        self.denom == 1
    }

    /// Largest whole number not greater than the value
    pub const fn floor(self) -> u64 {
        self.numer / self.denom
    }

    /// Lossy conversion to floating point
    pub fn to_f64(self) -> f64 {
        self.numer as f64 / self.denom as f64
    }
}

impl From<u64> for Rational {
    fn from(n: u64) -> Self {
        Rational::integer(n)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom == 1 {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

/// Compute greatest common divisor (Euclidean algorithm)
/// Used to reduce fractions to lowest terms
pub const fn const_gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let temp = b;
        b = a % b;
        a = temp;
    }
    a
}

/// Compute least common multiple via the GCD identity
pub const fn const_lcm(a: u64, b: u64) -> u64 {
    if a == 0 || b == 0 {
        return 0;
    }
    (a / const_gcd(a, b)) * b
}

/// Prime-power decomposition of `n` by trial division.
/// Returns an ordered `prime -> exponent` map; `n = 0` or `n = 1` yield an
/// empty map.
pub fn prime_factors(mut n: u64) -> BTreeMap<u64, u32> {
    let mut factors = BTreeMap::new();
    if n < 2 {
        return factors;
    }
    let mut candidate = 2;
    while candidate * candidate <= n {
        while n % candidate == 0 {
            *factors.entry(candidate).or_insert(0) += 1;
            n /= candidate;
        }
        candidate += if candidate == 2 { 1 } else { 2 };
    }
    if n > 1 {
        *factors.entry(n).or_insert(0) += 1;
    }
    factors
}
