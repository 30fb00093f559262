//! Fixed-point amount type.
//!
//! An amount is an integral part plus a fractional part counted in
//! 10^-18 units. The fraction is unsigned, so it can never be negative.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of fractional units in one integral unit.
pub const FRACTION_UNITS: u64 = 1_000_000_000_000_000_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount {
    integral: i64,
    fraction: u64,
}

impl Amount {
    pub const ZERO: Self = Self {
        integral: 0,
        fraction: 0,
    };

    /// Build an amount. Fractions of a whole unit or more are carried into
    /// the integral part.
    pub fn new(integral: i64, fraction: u64) -> Self {
        let carry = (fraction / FRACTION_UNITS) as i64;
        Self {
            integral: integral.saturating_add(carry),
            fraction: fraction % FRACTION_UNITS,
        }
    }

    pub fn from_integral(integral: i64) -> Self {
        Self {
            integral,
            fraction: 0,
        }
    }

    pub fn integral(&self) -> i64 {
        self.integral
    }

    pub fn fraction(&self) -> u64 {
        self.fraction
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fraction == 0 {
            write!(f, "{}", self.integral)
        } else {
            let digits = format!("{:018}", self.fraction);
            write!(f, "{}.{}", self.integral, digits.trim_end_matches('0'))
        }
    }
}
