use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Largest integer an `f64` represents exactly (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A non-negative, finite calorie amount.
///
/// Whole amounts serialize as JSON integers (`95`), fractional amounts as
/// floats (`95.5`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Calories(f64);

impl Calories {
    pub const ZERO: Calories = Calories(0.0);

    /// Returns `None` if `value` is negative, NaN or infinite.
    pub fn new(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        // Normalize -0.0
        Some(Self(if value == 0.0 { 0.0 } else { value }))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    fn is_whole(self) -> bool {
        self.0.fract() == 0.0 && self.0 <= MAX_EXACT_INTEGER
    }
}

impl Add for Calories {
    type Output = Calories;

    /// Saturates at `f64::MAX` so a total is always finite.
    fn add(self, rhs: Self) -> Self::Output {
        Calories((self.0 + rhs.0).min(f64::MAX))
    }
}

impl Sum for Calories {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Calories::ZERO, Add::add)
    }
}

impl fmt::Display for Calories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Calories {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_whole() {
            serializer.serialize_u64(self.0 as u64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Calories {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Calories::new(value).ok_or_else(|| {
            de::Error::custom(format!(
                "calories must be a non-negative number, got {}",
                value
            ))
        })
    }
}
