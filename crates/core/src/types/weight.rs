//! Shipping weight in whole pounds.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use serde::{Deserialize, Serialize};

/// A weight in whole pounds.
///
/// Cart totals multiply by quantity, so the backing integer is wide enough
/// that a single line can never overflow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(u64);

impl Pounds {
    #[must_use]
    pub const fn new(pounds: u64) -> Self {
        Self(pounds)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Weight of `quantity` units, saturating instead of wrapping.
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as u64))
    }
}

impl fmt::Display for Pounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} lb", self.0)
    }
}

impl Add for Pounds {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Pounds {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Pounds::new(0).to_string(), "0 lb");
        assert_eq!(Pounds::new(1000).to_string(), "1000 lb");
    }

    #[test]
    fn test_times_and_sum() {
        let total: Pounds = [Pounds::new(5).times(2), Pounds::new(20).times(1)]
            .into_iter()
            .sum();
        assert_eq!(total, Pounds::new(30));
    }

    #[test]
    fn test_times_saturates() {
        assert_eq!(Pounds::new(u64::MAX).times(2), Pounds::new(u64::MAX));
    }
}
