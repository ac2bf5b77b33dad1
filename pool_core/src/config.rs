use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::params::Params;

/// Which player takes the opening break
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Breaker {
    #[default]
    First,
    Second,
    /// Seeded coin toss
    Lag,
}

/// Match configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub table_width: f32,
    pub table_length: f32,
    pub pocket_radius: f32,
    pub ball_radius: f32,
    pub ball_mass: f32,
    pub damping: f32,
    pub stop_speed: f32,
    pub placement_speed: f32,
    pub max_cue_offset: f32,
    pub cue_charge_speed: f32,
    pub max_dt: f32,
    pub player_names: [String; 2],
    pub breaker: Breaker,
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_width: Params::TABLE_WIDTH,
            table_length: Params::TABLE_LENGTH,
            pocket_radius: Params::POCKET_RADIUS,
            ball_radius: Params::BALL_RADIUS,
            ball_mass: Params::BALL_MASS,
            damping: Params::DAMPING,
            stop_speed: Params::STOP_SPEED,
            placement_speed: Params::PLACEMENT_SPEED,
            max_cue_offset: Params::MAX_CUE_OFFSET,
            cue_charge_speed: Params::CUE_CHARGE_SPEED,
            max_dt: Params::MAX_DT,
            player_names: ["Player1".to_string(), "Player2".to_string()],
            breaker: Breaker::First,
            seed: 12345,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON config; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("table_width", self.table_width),
            ("table_length", self.table_length),
            ("pocket_radius", self.pocket_radius),
            ("ball_radius", self.ball_radius),
            ("ball_mass", self.ball_mass),
            ("stop_speed", self.stop_speed),
            ("placement_speed", self.placement_speed),
            ("max_cue_offset", self.max_cue_offset),
            ("cue_charge_speed", self.cue_charge_speed),
            ("max_dt", self.max_dt),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.damping.is_nan() || self.damping <= 0.0 || self.damping >= 1.0 {
            return Err(ConfigError::DampingOutOfRange(self.damping));
        }

        if self.pocket_radius <= self.ball_radius {
            return Err(ConfigError::PocketTooSmall {
                pocket: self.pocket_radius,
                ball: self.ball_radius,
            });
        }

        for (seat, name) in self.player_names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyName { seat });
            }
        }

        Ok(())
    }

    pub fn half_width(&self) -> f32 {
        self.table_width / 2.0
    }

    pub fn half_length(&self) -> f32 {
        self.table_length / 2.0
    }
}
