//! Match simulation
//!
//! All gameplay logic lives here:
//! - Fixed timestep only (one `update` per tick, velocities in pixels per tick)
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies; side effects are
//!   reported as events for the caller to act on

pub mod collision;
pub mod cpu;
pub mod session;
pub mod state;

pub use collision::{check_goal, resolve_cpu_paddle, resolve_player_paddle};
pub use cpu::{CpuController, Difficulty, project_intercept};
pub use session::MatchSession;
pub use state::{Ball, Explosion, Field, GameEvent, Paddle, Side, TerminalState};
