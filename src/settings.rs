//! Game settings and match tuning
//!
//! Supplied by the shell (JSON or defaults) and validated before a match
//! session or app is built. Nothing here is written back to disk.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::Field;

/// Tuning for a single match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub field: Field,
    /// First side to reach this many points wins
    pub winning_score: u32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Pixels per tick
    pub paddle_speed: f32,

    pub ball_radius: f32,
    /// Pixels per tick at kickoff
    pub ball_start_speed: f32,
    /// Added on every point scored
    pub ball_speed_increment: f32,

    /// CPU moves at `paddle_speed * cpu_speed_factor`
    pub cpu_speed_factor: f32,
    /// Aim error amplitude while the player has 0 points
    pub cpu_error_max: f32,
    /// Aim error amplitude once the player reaches the winning score
    pub cpu_error_min: f32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            field: Field::default(),
            winning_score: WINNING_SCORE,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            ball_radius: BALL_RADIUS,
            ball_start_speed: BALL_START_SPEED,
            ball_speed_increment: BALL_SPEED_INCREMENT,
            cpu_speed_factor: CPU_SPEED_FACTOR,
            cpu_error_max: CPU_ERROR_MAX,
            cpu_error_min: CPU_ERROR_MIN,
        }
    }
}

impl MatchConfig {
    /// Reject configurations that would produce a broken or already-finished match
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.winning_score == 0 {
            return Err(ConfigError::ZeroWinningScore);
        }

        let all = [
            ("field.width", self.field.width),
            ("field.height", self.field.height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_radius", self.ball_radius),
            ("ball_start_speed", self.ball_start_speed),
            ("ball_speed_increment", self.ball_speed_increment),
            ("cpu_speed_factor", self.cpu_speed_factor),
            ("cpu_error_max", self.cpu_error_max),
            ("cpu_error_min", self.cpu_error_min),
        ];
        if let Some((name, value)) = all.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NotFinite { name, value });
        }

        let positive = [
            ("field.width", self.field.width),
            ("field.height", self.field.height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_radius", self.ball_radius),
            ("ball_start_speed", self.ball_start_speed),
            ("cpu_speed_factor", self.cpu_speed_factor),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if self.ball_speed_increment < 0.0 {
            return Err(ConfigError::NonPositive {
                name: "ball_speed_increment",
                value: self.ball_speed_increment,
            });
        }
        if self.cpu_error_min < 0.0 {
            return Err(ConfigError::NonPositive {
                name: "cpu_error_min",
                value: self.cpu_error_min,
            });
        }
        if self.cpu_error_min > self.cpu_error_max {
            return Err(ConfigError::InvertedErrorRange {
                min: self.cpu_error_min,
                max: self.cpu_error_max,
            });
        }
        if self.cpu_error_max > self.field.height {
            return Err(ConfigError::ErrorAboveField {
                max: self.cpu_error_max,
                height: self.field.height,
            });
        }

        let paddles_fit = self.paddle_height <= self.field.height
            && PLAYER_PADDLE_X + self.paddle_width < self.field.width - CPU_PADDLE_INSET
            && self.ball_radius * 2.0 < self.field.height;
        if !paddles_fit {
            return Err(ConfigError::FieldTooSmall {
                width: self.field.width,
                height: self.field.height,
            });
        }

        Ok(())
    }
}

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sound effects and music on/off (toggled from the main menu)
    pub sound_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Seed for the app RNG; `None` lets the shell pick one
    pub seed: Option<u64>,
    /// Match tuning
    #[serde(rename = "match")]
    pub match_config: MatchConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            seed: None,
            match_config: MatchConfig::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded settings (winning score {})", settings.match_config.winning_score);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let volumes = [
            ("master_volume", self.master_volume),
            ("sfx_volume", self.sfx_volume),
            ("music_volume", self.music_volume),
        ];
        for (name, value) in volumes {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::VolumeOutOfRange { name, value });
            }
        }
        self.match_config.validate()
    }
}
