//! Per-tick input snapshot supplied by the platform shell

use glam::Vec2;

/// Input for a single tick.
///
/// Held keys (`move_up`, `move_down`) report the current key state. The
/// `*_pressed` / `clicked` fields are edges: true only on the tick the key
/// or button went down.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    /// Move player paddle up (W)
    pub move_up: bool,
    /// Move player paddle down (S)
    pub move_down: bool,
    /// Pause / resume (Escape)
    pub pause_pressed: bool,
    /// Any key went down this tick
    pub any_key_pressed: bool,
    /// Pointer position in field coordinates
    pub pointer: Vec2,
    /// Primary button clicked this tick
    pub clicked: bool,
    /// Window close / quit request
    pub quit: bool,
}

impl InputSnapshot {
    /// A click at `pos`
    pub fn click_at(pos: Vec2) -> Self {
        Self {
            pointer: pos,
            clicked: true,
            ..Default::default()
        }
    }

    /// Escape pressed this tick
    pub fn pause() -> Self {
        Self {
            pause_pressed: true,
            any_key_pressed: true,
            ..Default::default()
        }
    }

    /// Net vertical direction from held keys (-1, 0 or 1)
    pub fn vertical_axis(&self) -> f32 {
        match (self.move_up, self.move_down) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// Any discrete input this tick (used to dismiss end screens)
    pub fn any_discrete(&self) -> bool {
        self.any_key_pressed || self.pause_pressed || self.clicked
    }
}
