//! Match entities and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// The rectangular play area. Origin is the top-left corner, y grows down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self::new(FIELD_WIDTH, FIELD_HEIGHT)
    }
}

impl Field {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Which paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Cpu,
}

/// Things that happened during one tick, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    WallHit,
    PaddleHit(Side),
    /// The given side scored a point
    Scored(Side),
}

/// Pending score interstitial, from the player's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Explosion {
    /// Player just scored
    Win,
    /// CPU just scored
    Lose,
}

/// Match outcome query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalState {
    Ongoing,
    PlayerWon,
    CpuWon,
}

impl TerminalState {
    pub fn is_terminal(&self) -> bool {
        *self != TerminalState::Ongoing
    }
}

/// A paddle. Only moves vertically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per tick
    pub speed: f32,
    /// Bottom bound for the paddle (top bound is 0)
    field_height: f32,
}

impl Paddle {
    /// Create a paddle at `x`, vertically centered in the field
    pub fn new(x: f32, size: Vec2, speed: f32, field: &Field) -> Self {
        Self {
            pos: Vec2::new(x, field.height / 2.0 - size.y / 2.0),
            size,
            speed,
            field_height: field.height,
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    /// Move vertically by `delta`, clamped to the field
    pub fn move_by(&mut self, delta: f32) {
        self.pos.y += delta;
        if self.top() < 0.0 {
            self.pos.y = 0.0;
        }
        if self.bottom() > self.field_height {
            self.pos.y = self.field_height - self.size.y;
        }
    }

    /// Half-open rectangle test: left/top inclusive, right/bottom exclusive
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Pixels per tick. Only ever grows during a match.
    speed: f32,
    /// Ticks of paddle-hit flash remaining (visual only)
    pub hit_flash: u32,
}

impl Ball {
    /// Ball at the field center heading right-and-down at 45°
    pub fn new(field: &Field, radius: f32, speed: f32) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius,
            speed,
            hit_flash: 0,
        };
        ball.reset(field, 1.0);
        ball
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Increase speed. Negative amounts are ignored.
    pub fn accelerate(&mut self, amount: f32) {
        self.speed += amount.max(0.0);
    }

    pub fn left_edge(&self) -> Vec2 {
        Vec2::new(self.pos.x - self.radius, self.pos.y)
    }

    pub fn right_edge(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.radius, self.pos.y)
    }

    /// Advance one tick. Returns true if the ball bounced off the top or bottom wall.
    pub fn integrate(&mut self, field: &Field) -> bool {
        self.pos += self.vel;

        let mut wall_hit = false;
        if self.pos.y - self.radius < 0.0 && self.vel.y < 0.0 {
            self.vel.y = -self.vel.y;
            wall_hit = true;
        } else if self.pos.y + self.radius > field.height && self.vel.y > 0.0 {
            self.vel.y = -self.vel.y;
            wall_hit = true;
        }

        self.hit_flash = self.hit_flash.saturating_sub(1);
        wall_hit
    }

    /// Back to center with a fresh 45° velocity at the current speed.
    /// `direction` picks left (negative) or right (positive).
    pub fn reset(&mut self, field: &Field, direction: f32) {
        self.pos = field.center();
        let angle = BALL_LAUNCH_ANGLE_DEG.to_radians();
        let dir_x = if direction < 0.0 { -1.0 } else { 1.0 };
        self.vel = Vec2::new(angle.cos() * self.speed * dir_x, angle.sin() * self.speed);
    }

    /// Arm the paddle-hit flash
    pub fn flash(&mut self) {
        self.hit_flash = HIT_FLASH_TICKS;
    }
}
