//! Simulation settings
//!
//! Read once at startup from an optional JSON file. Any field left out of the
//! file keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How the collision resolver enumerates entity pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PairScan {
    /// Each unordered pair once (i < j by slot); effects apply exactly once
    #[default]
    Unordered,
    /// Every ordered pair (A, B) with A != B; effects apply once per ordering
    Ordered,
}

impl PairScan {
    pub fn as_str(&self) -> &'static str {
        match self {
            PairScan::Unordered => "unordered",
            PairScan::Ordered => "ordered",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "unordered" | "once" => Some(PairScan::Unordered),
            "ordered" | "twice" => Some(PairScan::Ordered),
            _ => None,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Timing ===
    /// Fixed simulation rate
    pub ticks_per_second: u32,
    /// Cap on ticks run per host callback (None = catch up fully)
    pub max_catch_up_ticks: Option<u32>,

    // === Simulation ===
    /// Session seed for the RNG stream
    pub seed: u64,
    /// Collision pair enumeration policy
    pub pair_scan: PairScan,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            ticks_per_second: TICKS_PER_SECOND,
            max_catch_up_ticks: None,

            seed: DEFAULT_SEED,
            pair_scan: PairScan::Unordered,
        }
    }
}

impl Settings {
    /// Seconds per fixed tick
    pub fn tick_duration(&self) -> f64 {
        1.0 / self.ticks_per_second as f64
    }

    /// Parse settings from JSON, falling back to defaults on error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Invalid settings JSON ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Load settings from a JSON file, falling back to defaults on error
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(e) => {
                log::warn!("Could not read {} ({e}), using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Replace out-of-range values with their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.playfield_width.is_finite() && self.playfield_width > 0.0) {
            log::warn!("playfield_width {} out of range", self.playfield_width);
            self.playfield_width = defaults.playfield_width;
        }
        if !(self.playfield_height.is_finite() && self.playfield_height > 0.0) {
            log::warn!("playfield_height {} out of range", self.playfield_height);
            self.playfield_height = defaults.playfield_height;
        }
        if self.ticks_per_second == 0 {
            log::warn!("ticks_per_second must be positive");
            self.ticks_per_second = defaults.ticks_per_second;
        }
        if self.max_catch_up_ticks == Some(0) {
            log::warn!("max_catch_up_ticks of 0 would stall the simulation");
            self.max_catch_up_ticks = None;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tick_duration() {
        let settings = Settings::default();
        assert!((settings.tick_duration() - 1.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "playfield_width": 640.0, "pair_scan": "ordered" }"#);
        assert_eq!(settings.playfield_width, 640.0);
        assert_eq!(settings.playfield_height, PLAYFIELD_HEIGHT);
        assert_eq!(settings.pair_scan, PairScan::Ordered);
        assert_eq!(settings.ticks_per_second, TICKS_PER_SECOND);
    }

    #[test]
    fn test_bad_json_falls_back() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[test]
    fn test_sanitize_rejects_nonsense() {
        let settings = Settings::from_json(
            r#"{ "playfield_width": -1.0, "ticks_per_second": 0, "max_catch_up_ticks": 0 }"#,
        );
        assert_eq!(settings.playfield_width, PLAYFIELD_WIDTH);
        assert_eq!(settings.ticks_per_second, TICKS_PER_SECOND);
        assert_eq!(settings.max_catch_up_ticks, None);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_from(Path::new("/nonexistent/arcade-sim.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_pair_scan_names() {
        assert_eq!(PairScan::from_str("Ordered"), Some(PairScan::Ordered));
        assert_eq!(PairScan::from_str("once"), Some(PairScan::Unordered));
        assert_eq!(PairScan::from_str("sideways"), None);
        assert_eq!(PairScan::Unordered.as_str(), "unordered");
    }
}
