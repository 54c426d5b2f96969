use serde_json::Value;
use thiserror::Error;

use super::calories::Calories;

/// Reasons a creation payload is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required")]
    EmptyName,
    #[error("Calories are required")]
    MissingCalories,
    #[error("Calories must be a number")]
    NotANumber,
    #[error("Calories must not be negative")]
    NegativeCalories,
}

/// A validated request to log a food item.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub name: String,
    pub calories: Calories,
}

impl NewEntry {
    /// Checks a decoded `{ name, calories }` payload.
    ///
    /// `calories` must be a JSON number; numeric-looking strings are rejected.
    pub fn validate(payload: &Value) -> Result<Self, ValidationError> {
        let name = payload
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(ValidationError::EmptyName)?;

        let calories = match payload.get("calories") {
            None | Some(Value::Null) => return Err(ValidationError::MissingCalories),
            Some(Value::Number(n)) => n.as_f64().ok_or(ValidationError::NotANumber)?,
            Some(_) => return Err(ValidationError::NotANumber),
        };

        if calories < 0.0 {
            return Err(ValidationError::NegativeCalories);
        }
        let calories = Calories::new(calories).ok_or(ValidationError::NotANumber)?;

        Ok(Self {
            name: name.to_string(),
            calories,
        })
    }
}
