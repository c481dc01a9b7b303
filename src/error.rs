//! Error types
//!
//! Only configuration errors ever leave the core. Audio and asset failures
//! are reported by collaborators, logged, and replaced by silence or
//! primitive shapes.

use crate::renderer::AssetKind;

/// Rejected match or settings configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("winning score must be at least 1")]
    ZeroWinningScore,

    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} must be finite (got {value})")]
    NotFinite { name: &'static str, value: f32 },

    #[error("CPU error {max} exceeds the field height {height}")]
    ErrorAboveField { max: f32, height: f32 },

    #[error("CPU error range is inverted: min {min} > max {max}")]
    InvertedErrorRange { min: f32, max: f32 },

    #[error("field {width}x{height} is too small for the paddles")]
    FieldTooSmall { width: f32, height: f32 },

    #[error("volume {name} must be within 0..=1 (got {value})")]
    VolumeOutOfRange { name: &'static str, value: f32 },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure reported by an audio backend
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("audio device unavailable")]
    DeviceUnavailable,

    #[error("unknown audio clip: {0}")]
    MissingClip(&'static str),
}

/// Failure reported by an asset source
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {0:?}")]
    NotFound(AssetKind),

    #[error("failed to decode {kind:?}: {reason}")]
    Decode { kind: AssetKind, reason: String },
}
