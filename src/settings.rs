//! Simulation settings
//!
//! Loaded from JSON; every field is optional and falls back to its default.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{MALLET_ACCELERATION, MALLET_WEIGHT, MAX_SCORE};
use crate::error::EngineError;
use crate::sim::MoveContext;

/// Tunables for a field and its objects
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Timing ===
    /// Fixed simulation rate
    pub tick_hz: u32,

    // === Match ===
    /// Goals needed to win a match
    pub max_score: u32,
    /// Seed for serve jitter
    pub seed: u64,
    /// Horizontal speed of a serve
    pub serve_speed: f32,

    // === Mallets ===
    pub mallet_weight: f32,
    /// Multiplier applied to input directions
    pub mallet_acceleration: f32,

    // === Move context overrides (derived from field size when unset) ===
    pub puck_move: Option<MoveContext>,
    pub mallet_move: Option<MoveContext>,
    pub racket_move: Option<MoveContext>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: 1000.0,
            field_height: 600.0,

            tick_hz: 60,

            max_score: MAX_SCORE,
            seed: 0,
            serve_speed: 15.0,

            mallet_weight: MALLET_WEIGHT,
            mallet_acceleration: MALLET_ACCELERATION,

            puck_move: None,
            mallet_move: None,
            racket_move: None,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("serve_speed", self.serve_speed),
            ("mallet_weight", self.mallet_weight),
            ("mallet_acceleration", self.mallet_acceleration),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(EngineError::InvalidSettings(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.tick_hz == 0 {
            return Err(EngineError::InvalidSettings("tick_hz must be non-zero".into()));
        }
        if self.max_score == 0 {
            return Err(EngineError::InvalidSettings("max_score must be non-zero".into()));
        }
        for ctx in [&self.puck_move, &self.mallet_move, &self.racket_move]
            .into_iter()
            .flatten()
        {
            ctx.validate()?;
        }
        Ok(())
    }

    /// Wall-clock period of one tick
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_hz.max(1)))
    }

    pub fn puck_radius(&self) -> f32 {
        self.field_height / 30.0
    }

    pub fn mallet_radius(&self) -> f32 {
        self.field_height / 15.0
    }

    /// Puck movement: fast, never stops, no decay
    pub fn puck_move_context(&self) -> MoveContext {
        self.puck_move.unwrap_or_else(|| {
            let r = self.puck_radius();
            MoveContext {
                max_velocity: r / 5.0,
                min_velocity: Some(r / 10.0),
                damping: 1.0,
                ..MoveContext::default()
            }
        })
    }

    /// Mallet movement: capped relative to the puck, decays when idle
    pub fn mallet_move_context(&self) -> MoveContext {
        self.mallet_move.unwrap_or_else(|| MoveContext {
            max_velocity: self.puck_radius() / 5.0,
            ..MoveContext::default()
        })
    }

    pub fn racket_move_context(&self) -> MoveContext {
        self.racket_move.unwrap_or_else(|| MoveContext {
            max_velocity: 7.0,
            damping: 1.0,
            ..MoveContext::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.max_score, MAX_SCORE);
        assert!((settings.puck_radius() - 20.0).abs() < 1e-4);
        assert!((settings.mallet_radius() - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"seed": 42, "max_score": 3}"#).unwrap();
        assert_eq!(settings.seed, 42);
        assert_eq!(settings.max_score, 3);
        assert_eq!(settings.field_width, 1000.0);
        assert!(settings.puck_move.is_none());
    }

    #[test]
    fn test_json_round_trip_keeps_overrides() {
        let mut settings = Settings::default();
        settings.mallet_move = Some(MoveContext::new(12.0, None, 1.5).unwrap());
        let json = settings.to_json().unwrap();
        let back = Settings::from_json(&json).unwrap();
        assert_eq!(back.mallet_move_context().max_velocity, 12.0);
        assert_eq!(back.mallet_move_context().damping, 1.5);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{"field_width": -5.0}"#),
            Err(EngineError::InvalidSettings(_))
        ));
        assert!(Settings::from_json(r#"{"tick_hz": 0}"#).is_err());
        assert!(Settings::from_json(r#"{"max_score": 0}"#).is_err());
        assert!(matches!(
            Settings::from_json(r#"{"puck_move": {"damping": 0.0}}"#),
            Err(EngineError::InvalidMoveContext(_))
        ));
        assert!(matches!(Settings::from_json("not json"), Err(EngineError::Json(_))));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = Settings::load("/nonexistent/air-hockey/settings.json");
        assert!(matches!(result, Err(EngineError::Io(_))));
    }

    #[test]
    fn test_derived_move_contexts() {
        let settings = Settings::default();
        let puck = settings.puck_move_context();
        assert!((puck.max_velocity - 4.0).abs() < 1e-4);
        assert_eq!(puck.min_velocity, Some(2.0));
        assert_eq!(puck.damping, 1.0);
        assert!((settings.mallet_move_context().max_velocity - 4.0).abs() < 1e-4);
        assert_eq!(settings.racket_move_context().max_velocity, 7.0);
    }

    #[test]
    fn test_tick_period() {
        let settings = Settings {
            tick_hz: 50,
            ..Settings::default()
        };
        assert_eq!(settings.tick_period(), Duration::from_millis(20));
    }
}
