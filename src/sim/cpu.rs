//! CPU opponent
//!
//! Predicts where the ball will cross the CPU paddle's plane (folding wall
//! bounces analytically), adds an aim error that shrinks as the player
//! scores, and steers the paddle toward that point at a capped speed.

use rand::Rng;

use super::state::{Ball, Field, Paddle};
use crate::fold_into;

/// Aim error tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    /// Error amplitude at player score 0
    pub error_max: f32,
    /// Error amplitude at player score == winning score
    pub error_min: f32,
    pub winning_score: u32,
}

impl Difficulty {
    /// Error amplitude for the given player score. Linear from `error_max`
    /// at 0 points to `error_min` at the winning score, flat afterwards.
    pub fn error_amplitude(&self, player_score: u32) -> f32 {
        let progress = if self.winning_score == 0 {
            1.0
        } else {
            (player_score as f32 / self.winning_score as f32).clamp(0.0, 1.0)
        };
        self.error_max - (self.error_max - self.error_min) * progress
    }
}

/// Vertical position where the ball center will be when its right edge
/// reaches `plane_x`, with wall bounces folded into the field.
pub fn project_intercept(ball: &Ball, plane_x: f32, field: &Field) -> f32 {
    if ball.vel.x <= 0.0 {
        return ball.pos.y;
    }
    let distance = plane_x - (ball.pos.x + ball.radius);
    let time = (distance / ball.vel.x).max(0.0);
    let projected = ball.pos.y + ball.vel.y * time;
    fold_into(projected, ball.radius, field.height - ball.radius)
}

/// CPU controller state
#[derive(Debug, Clone)]
pub struct CpuController {
    difficulty: Difficulty,
    speed_factor: f32,
    /// Aim error for the current approach; `None` while the ball moves away
    aim_error: Option<f32>,
}

impl CpuController {
    pub fn new(difficulty: Difficulty, speed_factor: f32) -> Self {
        Self {
            difficulty,
            speed_factor,
            aim_error: None,
        }
    }

    pub fn aim_error(&self) -> Option<f32> {
        self.aim_error
    }

    /// Choose this tick's target. The aim error is drawn once when the ball
    /// turns toward the CPU and held for the rest of that approach.
    pub fn choose_target<R: Rng>(
        &mut self,
        ball: &Ball,
        paddle: &Paddle,
        field: &Field,
        player_score: u32,
        rng: &mut R,
    ) -> f32 {
        if ball.vel.x > 0.0 {
            let error = *self.aim_error.get_or_insert_with(|| {
                let amplitude = self.difficulty.error_amplitude(player_score);
                amplitude * rng.random_range(-1.0f32..=1.0)
            });
            project_intercept(ball, paddle.left(), field) + error
        } else {
            self.aim_error = None;
            field.height / 2.0
        }
    }

    /// Step the paddle toward `target_y`, never overshooting
    pub fn steer(&self, paddle: &mut Paddle, target_y: f32) {
        let max_step = paddle.speed * self.speed_factor;
        let delta = (target_y - paddle.center_y()).clamp(-max_step, max_step);
        paddle.move_by(delta);
    }

    /// Choose a target and move toward it
    pub fn update<R: Rng>(
        &mut self,
        ball: &Ball,
        paddle: &mut Paddle,
        field: &Field,
        player_score: u32,
        rng: &mut R,
    ) {
        let target = self.choose_target(ball, paddle, field, player_score, rng);
        self.steer(paddle, target);
    }
}
