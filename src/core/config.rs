//! Engine configuration.
//!
//! `EngineConfig` holds the numeric rules the engine enforces: global
//! parameter ranges, the starting terraform rating and the price of buying a
//! drawn card. `Default` gives the standard game. Overrides can be layered on
//! with the `with_*` builders or loaded from JSON, where missing fields fall
//! back to the defaults.

use serde::{Deserialize, Serialize};

use super::error::Result;

/// Inclusive range of a global parameter and its step size.
///
/// Temperature moves 2 °C per step, oxygen and oceans move 1 per step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterRange {
    pub min: i32,
    pub max: i32,
    pub step: i32,
}

impl ParameterRange {
    #[must_use]
    pub const fn new(min: i32, max: i32, step: i32) -> Self {
        Self { min, max, step }
    }

    /// Raise `current` by `steps`, clamped to `max`.
    ///
    /// Returns the new value and the number of whole steps actually applied.
    /// Non-positive `steps` leave the value unchanged.
    ///
    /// ```
    /// use terraform_rules::core::ParameterRange;
    ///
    /// let temperature = ParameterRange::new(-30, 8, 2);
    /// assert_eq!(temperature.raise(4, 5), (8, 2));
    /// assert_eq!(temperature.raise(8, 1), (8, 0));
    /// ```
    #[must_use]
    pub fn raise(&self, current: i32, steps: i32) -> (i32, i32) {
        if steps <= 0 || self.step <= 0 {
            return (current, 0);
        }
        let target = current.saturating_add(steps.saturating_mul(self.step));
        let new_value = target.min(self.max).max(current);
        (new_value, (new_value - current) / self.step)
    }

    /// Clamp an arbitrary value into the range.
    #[must_use]
    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }

    #[must_use]
    pub fn is_maxed(&self, current: i32) -> bool {
        current >= self.max
    }
}

/// Rules the engine enforces, with standard-game defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Temperature in °C.
    pub temperature: ParameterRange,
    /// Oxygen in percent.
    pub oxygen: ParameterRange,
    /// Ocean tiles placed.
    pub oceans: ParameterRange,
    pub starting_terraform_rating: i32,
    /// Credits charged per card bought from a card-draw selection.
    pub card_buy_cost: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            temperature: ParameterRange::new(-30, 8, 2),
            oxygen: ParameterRange::new(0, 14, 1),
            oceans: ParameterRange::new(0, 9, 1),
            starting_terraform_rating: 20,
            card_buy_cost: 3,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON override document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_temperature(mut self, range: ParameterRange) -> Self {
        self.temperature = range;
        self
    }

    #[must_use]
    pub fn with_oxygen(mut self, range: ParameterRange) -> Self {
        self.oxygen = range;
        self
    }

    #[must_use]
    pub fn with_oceans(mut self, range: ParameterRange) -> Self {
        self.oceans = range;
        self
    }

    #[must_use]
    pub fn with_starting_terraform_rating(mut self, rating: i32) -> Self {
        self.starting_terraform_rating = rating;
        self
    }

    #[must_use]
    pub fn with_card_buy_cost(mut self, cost: i32) -> Self {
        self.card_buy_cost = cost;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.temperature, ParameterRange::new(-30, 8, 2));
        assert_eq!(config.oxygen.max, 14);
        assert_eq!(config.oceans.max, 9);
        assert_eq!(config.starting_terraform_rating, 20);
        assert_eq!(config.card_buy_cost, 3);
    }

    #[test]
    fn test_raise_clamps() {
        let oxygen = ParameterRange::new(0, 14, 1);
        assert_eq!(oxygen.raise(13, 3), (14, 1));
        assert_eq!(oxygen.raise(14, 3), (14, 0));
        assert_eq!(oxygen.raise(5, 0), (5, 0));
        assert_eq!(oxygen.raise(5, -2), (5, 0));
    }

    #[test]
    fn test_raise_temperature_steps() {
        let temperature = ParameterRange::new(-30, 8, 2);
        assert_eq!(temperature.raise(-30, 1), (-28, 1));
        assert_eq!(temperature.raise(6, 3), (8, 1));
    }

    #[test]
    fn test_from_json_partial() {
        let config = EngineConfig::from_json(r#"{"cardBuyCost": 4}"#).unwrap();
        assert_eq!(config.card_buy_cost, 4);
        assert_eq!(config.starting_terraform_rating, 20);
    }

    #[test]
    fn test_builders() {
        let config = EngineConfig::new()
            .with_oxygen(ParameterRange::new(0, 5, 1))
            .with_starting_terraform_rating(14);
        assert_eq!(config.oxygen.max, 5);
        assert_eq!(config.starting_terraform_rating, 14);
    }
}
