//! Ping Pong - player vs CPU arcade Pong
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (paddles, ball, collisions, CPU opponent)
//! - `app`: Menu / play / pause / end-screen state machine
//! - `renderer`: Draw command vocabulary and visual styles
//! - `audio`: Sound cues and background music session
//! - `platform`: Frame pacing for the native loop
//! - `settings`: Player preferences and match tuning
//! - `ui`: Buttons and text animation

pub mod app;
pub mod audio;
pub mod error;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use app::{App, AppState, Flow};
pub use error::{AssetError, AudioError, ConfigError};
pub use input::InputSnapshot;
pub use settings::{MatchConfig, Settings};

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults (pixels, pixels per tick)
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_SPEED: f32 = 7.0;
    /// Player paddle distance from the left wall
    pub const PLAYER_PADDLE_X: f32 = 30.0;
    /// CPU paddle left edge distance from the right wall
    pub const CPU_PADDLE_INSET: f32 = 40.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_SPEED: f32 = 5.0;
    /// Added to the ball speed on every point scored
    pub const BALL_SPEED_INCREMENT: f32 = 0.5;
    /// Launch angle after every reset (degrees)
    pub const BALL_LAUNCH_ANGLE_DEG: f32 = 45.0;
    /// Ticks the ball flashes after a paddle hit
    pub const HIT_FLASH_TICKS: u32 = 10;

    /// CPU paddle moves at this fraction of its nominal speed
    pub const CPU_SPEED_FACTOR: f32 = 0.7;
    /// CPU aim error bounds (pixels)
    pub const CPU_ERROR_MAX: f32 = 80.0;
    pub const CPU_ERROR_MIN: f32 = 8.0;

    pub const WINNING_SCORE: u32 = 3;

    /// Damping for hover / pulse smoothing
    pub const SMOOTHING: f32 = 0.2;
    /// Ticks the score interstitial stays on screen
    pub const EXPLOSION_TICKS: u32 = 30;
}

/// Move `current` a fixed fraction of the way toward `target`.
///
/// Applied once per tick this gives an exponential approach that never
/// overshoots for `factor` in `(0, 1]`.
#[inline]
pub fn smooth_toward(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Fold `value` into `[min, max]` by mirror reflection at each bound.
///
/// This is the closed form of a ball bouncing between two walls: every
/// crossing of a bound reflects the remaining distance back into the range.
#[inline]
pub fn fold_into(value: f32, min: f32, max: f32) -> f32 {
    let span = max - min;
    if span <= 0.0 {
        return min;
    }
    let period = 2.0 * span;
    let t = (value - min).rem_euclid(period);
    if t > span { min + period - t } else { min + t }
}
