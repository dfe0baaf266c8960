//! Global terraforming parameters.
//!
//! Temperature, oxygen and oceans only ever rise, one step at a time, and
//! stop at their configured maximum. Raising a maxed parameter is not an
//! error: it applies 0 steps.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{CancelToken, DomainEvent, EngineConfig, EventBus, ParameterRange, Result};

/// Point-in-time view of all three parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSnapshot {
    pub temperature: i32,
    pub oxygen: i32,
    pub oceans: i32,
}

#[derive(Debug)]
pub struct GlobalParameters {
    values: RwLock<ParameterSnapshot>,
    temperature: ParameterRange,
    oxygen: ParameterRange,
    oceans: ParameterRange,
    events: EventBus,
}

impl GlobalParameters {
    /// Parameters at their configured minimums, publishing nowhere.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_events(config, EventBus::new())
    }

    pub(crate) fn with_events(config: &EngineConfig, events: EventBus) -> Self {
        Self {
            values: RwLock::new(ParameterSnapshot {
                temperature: config.temperature.min,
                oxygen: config.oxygen.min,
                oceans: config.oceans.min,
            }),
            temperature: config.temperature,
            oxygen: config.oxygen,
            oceans: config.oceans,
            events,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> ParameterSnapshot {
        *self.values.read()
    }

    #[must_use]
    pub fn temperature(&self) -> i32 {
        self.values.read().temperature
    }

    #[must_use]
    pub fn oxygen(&self) -> i32 {
        self.values.read().oxygen
    }

    #[must_use]
    pub fn oceans(&self) -> i32 {
        self.values.read().oceans
    }

    /// All three parameters at maximum.
    #[must_use]
    pub fn is_terraformed(&self) -> bool {
        let values = self.snapshot();
        self.temperature.is_maxed(values.temperature)
            && self.oxygen.is_maxed(values.oxygen)
            && self.oceans.is_maxed(values.oceans)
    }

    /// Raise temperature by up to `steps`; returns steps actually applied.
    pub fn increase_temperature(&self, cancel: &CancelToken, steps: i32) -> Result<i32> {
        cancel.check()?;
        let (old, new, applied) = {
            let mut values = self.values.write();
            let old = values.temperature;
            let (new, applied) = self.temperature.raise(old, steps);
            values.temperature = new;
            (old, new, applied)
        };
        if applied > 0 {
            self.events.publish(DomainEvent::TemperatureChanged { old, new });
        } else {
            debug!(requested = steps, current = old, "temperature not raised");
        }
        Ok(applied)
    }

    /// Raise oxygen by up to `steps`; returns steps actually applied.
    pub fn increase_oxygen(&self, cancel: &CancelToken, steps: i32) -> Result<i32> {
        cancel.check()?;
        let (old, new, applied) = {
            let mut values = self.values.write();
            let old = values.oxygen;
            let (new, applied) = self.oxygen.raise(old, steps);
            values.oxygen = new;
            (old, new, applied)
        };
        if applied > 0 {
            self.events.publish(DomainEvent::OxygenChanged { old, new });
        } else {
            debug!(requested = steps, current = old, "oxygen not raised");
        }
        Ok(applied)
    }

    /// Record one placed ocean. `false` once all oceans are out.
    pub fn place_ocean(&self, cancel: &CancelToken) -> Result<bool> {
        cancel.check()?;
        let (old, new, applied) = {
            let mut values = self.values.write();
            let old = values.oceans;
            let (new, applied) = self.oceans.raise(old, 1);
            values.oceans = new;
            (old, new, applied)
        };
        if applied > 0 {
            self.events.publish(DomainEvent::OceansChanged { old, new });
        }
        Ok(applied > 0)
    }

    /// Overwrite the temperature, clamped to its range. For setup and tests.
    pub fn set_temperature(&self, value: i32) {
        self.values.write().temperature = self.temperature.clamp(value);
    }

    /// Overwrite the oxygen level, clamped to its range.
    pub fn set_oxygen(&self, value: i32) {
        self.values.write().oxygen = self.oxygen.clamp(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineError;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_starts_at_minimum() {
        let params = GlobalParameters::new(&EngineConfig::default());
        assert_eq!(
            params.snapshot(),
            ParameterSnapshot { temperature: -30, oxygen: 0, oceans: 0 }
        );
        assert!(!params.is_terraformed());
    }

    #[test]
    fn test_temperature_clamps_at_max() {
        let params = GlobalParameters::new(&EngineConfig::default());
        params.set_temperature(4);

        let cancel = CancelToken::new();
        assert_eq!(params.increase_temperature(&cancel, 5).unwrap(), 2);
        assert_eq!(params.temperature(), 8);
        assert_eq!(params.increase_temperature(&cancel, 1).unwrap(), 0);
    }

    #[test]
    fn test_oxygen_non_positive_steps() {
        let params = GlobalParameters::new(&EngineConfig::default());
        let cancel = CancelToken::new();
        assert_eq!(params.increase_oxygen(&cancel, 0).unwrap(), 0);
        assert_eq!(params.increase_oxygen(&cancel, -3).unwrap(), 0);
        assert_eq!(params.oxygen(), 0);
    }

    #[test]
    fn test_oceans_run_out() {
        let config = EngineConfig::default().with_oceans(ParameterRange::new(0, 1, 1));
        let params = GlobalParameters::new(&config);
        let cancel = CancelToken::new();

        assert!(params.place_ocean(&cancel).unwrap());
        assert!(!params.place_ocean(&cancel).unwrap());
        assert_eq!(params.oceans(), 1);
    }

    #[test]
    fn test_cancelled_raise_changes_nothing() {
        let params = GlobalParameters::new(&EngineConfig::default());
        let cancel = CancelToken::new();
        cancel.cancel();

        assert!(matches!(params.increase_oxygen(&cancel, 2), Err(EngineError::Cancelled)));
        assert_eq!(params.oxygen(), 0);
    }

    #[test]
    fn test_events_only_on_change() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        bus.subscribe(move |event| sink.lock().push(event.clone()));

        let params = GlobalParameters::with_events(&EngineConfig::default(), bus);
        params.set_oxygen(13);
        let cancel = CancelToken::new();
        params.increase_oxygen(&cancel, 2).unwrap();
        params.increase_oxygen(&cancel, 2).unwrap();

        assert_eq!(*seen.lock(), vec![DomainEvent::OxygenChanged { old: 13, new: 14 }]);
    }
}
