//! Line quantity that can never be zero.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when constructing a [`Quantity`] from zero.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("quantity must be at least 1")]
pub struct QuantityError;

/// Number of units on a cart line.
///
/// Always at least 1. A line whose quantity would drop to zero is removed
/// from the cart instead, so there is no representable "zero" line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(1);

    /// Create a quantity, rejecting zero.
    #[must_use]
    pub const fn new(n: u32) -> Option<Self> {
        if n == 0 { None } else { Some(Self(n)) }
    }

    /// Get the underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Quantity for a freshly appended line: `max(delta, 1)`.
    #[must_use]
    pub fn from_delta(delta: i32) -> Self {
        u32::try_from(delta)
            .ok()
            .and_then(Self::new)
            .unwrap_or(Self::ONE)
    }

    /// Apply a signed delta.
    ///
    /// Returns `None` when the result would be zero or negative, meaning the
    /// line should be removed. Growth saturates at `u32::MAX`.
    #[must_use]
    pub fn apply_delta(self, delta: i32) -> Option<Self> {
        let next = i64::from(self.0) + i64::from(delta);
        if next <= 0 {
            return None;
        }
        Some(Self(u32::try_from(next).unwrap_or(u32::MAX)))
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        Self::new(n).ok_or(QuantityError)
    }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> Self {
        q.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
