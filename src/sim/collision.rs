//! Collision detection and scoring
//!
//! The ball is tested against each paddle with a single point on its
//! circumference (the edge facing that paddle) rather than a full
//! circle/rectangle intersection. A hit only counts while the ball is
//! moving toward the paddle, so a ball that stays inside the paddle for a
//! few ticks is reflected once.

use super::state::{Ball, Field, Paddle, Side};

/// Reflect the ball off the player paddle if it is approaching and touching.
/// Returns true on a hit.
pub fn resolve_player_paddle(ball: &mut Ball, paddle: &Paddle) -> bool {
    if ball.vel.x < 0.0 && paddle.contains_point(ball.left_edge()) {
        ball.vel.x = -ball.vel.x;
        ball.flash();
        true
    } else {
        false
    }
}

/// Reflect the ball off the CPU paddle if it is approaching and touching.
/// Returns true on a hit.
pub fn resolve_cpu_paddle(ball: &mut Ball, paddle: &Paddle) -> bool {
    if ball.vel.x > 0.0 && paddle.contains_point(ball.right_edge()) {
        ball.vel.x = -ball.vel.x;
        ball.flash();
        true
    } else {
        false
    }
}

/// Which side scored, if the ball center has left the field horizontally
pub fn check_goal(ball: &Ball, field: &Field) -> Option<Side> {
    if ball.pos.x < 0.0 {
        Some(Side::Cpu)
    } else if ball.pos.x > field.width {
        Some(Side::Player)
    } else {
        None
    }
}
