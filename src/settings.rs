//! Game settings
//!
//! Read from JSON handed over by the front end. Nothing is written back to
//! storage; every page load starts from defaults plus whatever JSON it passes.

use serde::{Deserialize, Serialize};

use crate::consts::{
    ANIMATION_DURATION, DEFAULT_MARKER_COUNT, MAX_MARKER_COUNT, MIN_TICK_INTERVAL, TICK_INTERVAL,
};

/// Tunable game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Markers laid out on each restart ("Points" input)
    pub marker_count: u32,
    /// Flash time before a correct marker vanishes (seconds)
    pub animation_duration: f64,
    /// Timer cadence (seconds)
    pub tick_interval: f64,
    /// Layout seed; random when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            marker_count: DEFAULT_MARKER_COUNT,
            animation_duration: ANIMATION_DURATION,
            tick_interval: TICK_INTERVAL,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Replace out-of-range values with their defaults or nearest bound
    pub fn sanitized(mut self) -> Self {
        if self.marker_count > MAX_MARKER_COUNT {
            log::warn!(
                "marker_count {} too large, using {}",
                self.marker_count,
                MAX_MARKER_COUNT
            );
            self.marker_count = MAX_MARKER_COUNT;
        }
        if !self.animation_duration.is_finite() || self.animation_duration < 0.0 {
            log::warn!(
                "Invalid animation_duration {}, using {}",
                self.animation_duration,
                ANIMATION_DURATION
            );
            self.animation_duration = ANIMATION_DURATION;
        }
        if !self.tick_interval.is_finite() || self.tick_interval <= 0.0 {
            log::warn!(
                "Invalid tick_interval {}, using {}",
                self.tick_interval,
                TICK_INTERVAL
            );
            self.tick_interval = TICK_INTERVAL;
        } else if self.tick_interval < MIN_TICK_INTERVAL {
            log::warn!(
                "tick_interval {} too short to keep up, using {}",
                self.tick_interval,
                MIN_TICK_INTERVAL
            );
            self.tick_interval = MIN_TICK_INTERVAL;
        }
        self
    }

    /// Seed to use for the next game
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.marker_count, 10);
        assert_eq!(settings.animation_duration, 0.3);
        assert_eq!(settings.tick_interval, 0.1);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json(r#"{"marker_count": 25, "seed": 7}"#).unwrap();
        assert_eq!(settings.marker_count, 25);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.resolve_seed(), 7);
        assert_eq!(settings.animation_duration, ANIMATION_DURATION);
    }

    #[test]
    fn test_invalid_timings_sanitized() {
        let settings =
            Settings::from_json(r#"{"animation_duration": -1.0, "tick_interval": 0.0}"#).unwrap();
        assert_eq!(settings.animation_duration, ANIMATION_DURATION);
        assert_eq!(settings.tick_interval, TICK_INTERVAL);
    }

    #[test]
    fn test_short_tick_interval_raised() {
        let settings = Settings::from_json(r#"{"tick_interval": 0.001}"#).unwrap();
        assert_eq!(settings.tick_interval, MIN_TICK_INTERVAL);
    }

    #[test]
    fn test_marker_count_capped() {
        let settings = Settings::from_json(r#"{"marker_count": 4294967295}"#).unwrap();
        assert_eq!(settings.marker_count, MAX_MARKER_COUNT);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(Settings::from_json("{").is_err());
        assert!(Settings::from_json(r#"{"marker_count": -3}"#).is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            marker_count: 3,
            seed: Some(42),
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}
