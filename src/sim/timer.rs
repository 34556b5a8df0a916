//! Accumulated-milliseconds spawn timer

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Fires once the accumulated time reaches the interval
///
/// Firing resets the accumulator to exactly zero, so any overshoot past
/// the interval is dropped rather than carried into the next cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    interval_ms: f32,
    elapsed_ms: f32,
}

impl SpawnTimer {
    pub fn new(name: &'static str, interval_ms: f32) -> Result<Self, SettingsError> {
        if !(interval_ms > 0.0) || !interval_ms.is_finite() {
            return Err(SettingsError::NonPositiveInterval {
                name,
                value: interval_ms,
            });
        }
        Ok(Self {
            interval_ms,
            elapsed_ms: 0.0,
        })
    }

    /// Advance by `dt_ms`; returns true on the tick the timer fires
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms = 0.0;
            true
        } else {
            false
        }
    }

    pub fn interval_ms(&self) -> f32 {
        self.interval_ms
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_at_interval() {
        let mut timer = SpawnTimer::new("test", 1200.0).unwrap();
        assert!(!timer.tick(600.0));
        assert!(!timer.tick(599.0));
        assert!(timer.tick(1.0));
        assert_eq!(timer.elapsed_ms(), 0.0);
    }

    #[test]
    fn test_overshoot_is_dropped() {
        let mut timer = SpawnTimer::new("test", 1500.0).unwrap();
        assert!(!timer.tick(1400.0));
        // 1520 ms accumulated: subtracting would carry 20 ms over
        assert!(timer.tick(120.0));
        assert_eq!(timer.elapsed_ms(), 0.0);
        assert!(!timer.tick(1499.0));
    }

    #[test]
    fn test_one_fire_per_tick() {
        let mut timer = SpawnTimer::new("test", 100.0).unwrap();
        // A long frame still fires once
        assert!(timer.tick(1000.0));
        assert!(!timer.tick(50.0));
    }

    #[test]
    fn test_rejects_bad_interval() {
        assert!(SpawnTimer::new("zero", 0.0).is_err());
        assert!(SpawnTimer::new("negative", -1.0).is_err());
        assert!(SpawnTimer::new("nan", f32::NAN).is_err());
    }
}
