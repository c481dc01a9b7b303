//! Match session: two paddles, one ball, the score, and the per-tick update

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{check_goal, resolve_cpu_paddle, resolve_player_paddle};
use super::cpu::{CpuController, Difficulty};
use super::state::{Ball, Explosion, Field, GameEvent, Paddle, Side, TerminalState};
use crate::audio::SoundEffect;
use crate::consts::{CPU_PADDLE_INSET, PLAYER_PADDLE_X};
use crate::error::ConfigError;
use crate::input::InputSnapshot;
use crate::settings::MatchConfig;

/// One match, player (left) vs CPU (right)
#[derive(Debug, Clone)]
pub struct MatchSession {
    config: MatchConfig,
    pub player: Paddle,
    pub cpu: Paddle,
    pub ball: Ball,
    player_score: u32,
    cpu_score: u32,
    sound_enabled: bool,
    /// Set when a point is scored, cleared by `take_explosion`
    pending_explosion: Option<Explosion>,
    /// Events from the most recent `update`
    events: Vec<GameEvent>,
    controller: CpuController,
    rng: Pcg32,
    ticks: u64,
}

impl MatchSession {
    /// Start a fresh 0-0 match. Fails on invalid configuration.
    pub fn new(config: MatchConfig, sound_enabled: bool, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let field = config.field;
        let paddle_size = Vec2::new(config.paddle_width, config.paddle_height);
        let player = Paddle::new(PLAYER_PADDLE_X, paddle_size, config.paddle_speed, &field);
        let cpu = Paddle::new(
            field.width - CPU_PADDLE_INSET,
            paddle_size,
            config.paddle_speed,
            &field,
        );
        let ball = Ball::new(&field, config.ball_radius, config.ball_start_speed);
        let controller = CpuController::new(
            Difficulty {
                error_max: config.cpu_error_max,
                error_min: config.cpu_error_min,
                winning_score: config.winning_score,
            },
            config.cpu_speed_factor,
        );

        Ok(Self {
            config,
            player,
            cpu,
            ball,
            player_score: 0,
            cpu_score: 0,
            sound_enabled,
            pending_explosion: None,
            events: Vec::new(),
            controller,
            rng: Pcg32::seed_from_u64(seed),
            ticks: 0,
        })
    }

    pub fn field(&self) -> Field {
        self.config.field
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn player_score(&self) -> u32 {
        self.player_score
    }

    pub fn cpu_score(&self) -> u32 {
        self.cpu_score
    }

    pub fn winning_score(&self) -> u32 {
        self.config.winning_score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    /// Advance the match by one tick
    pub fn update(&mut self, input: &InputSnapshot) {
        self.events.clear();
        if self.terminal_state().is_terminal() {
            return;
        }
        self.ticks += 1;
        let field = self.config.field;

        // Player paddle
        let axis = input.vertical_axis();
        if axis != 0.0 {
            self.player.move_by(axis * self.player.speed);
        }

        // CPU paddle
        self.controller.update(
            &self.ball,
            &mut self.cpu,
            &field,
            self.player_score,
            &mut self.rng,
        );

        // Ball
        if self.ball.integrate(&field) {
            self.events.push(GameEvent::WallHit);
        }

        if resolve_player_paddle(&mut self.ball, &self.player) {
            self.events.push(GameEvent::PaddleHit(Side::Player));
        }
        if resolve_cpu_paddle(&mut self.ball, &self.cpu) {
            self.events.push(GameEvent::PaddleHit(Side::Cpu));
        }

        if let Some(scorer) = check_goal(&self.ball, &field) {
            self.score_point(scorer);
        }
    }

    fn score_point(&mut self, scorer: Side) {
        let field = self.config.field;
        match scorer {
            Side::Player => {
                self.player_score += 1;
                self.pending_explosion = Some(Explosion::Win);
            }
            Side::Cpu => {
                self.cpu_score += 1;
                self.pending_explosion = Some(Explosion::Lose);
            }
        }
        log::info!(
            "{:?} scored ({} - {})",
            scorer,
            self.player_score,
            self.cpu_score
        );

        self.ball.accelerate(self.config.ball_speed_increment);
        let direction = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.ball.reset(&field, direction);
        self.events.push(GameEvent::Scored(scorer));
    }

    /// Has either side reached the winning score?
    pub fn terminal_state(&self) -> TerminalState {
        if self.player_score >= self.config.winning_score {
            TerminalState::PlayerWon
        } else if self.cpu_score >= self.config.winning_score {
            TerminalState::CpuWon
        } else {
            TerminalState::Ongoing
        }
    }

    /// Consume the pending score interstitial, if any
    pub fn take_explosion(&mut self) -> Option<Explosion> {
        self.pending_explosion.take()
    }

    pub fn pending_explosion(&self) -> Option<Explosion> {
        self.pending_explosion
    }

    /// Events produced by the last `update`
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Sound cues for the last `update` (empty with sound off)
    pub fn sound_cues(&self) -> impl Iterator<Item = SoundEffect> + '_ {
        let enabled = self.sound_enabled;
        self.events
            .iter()
            .filter(move |_| enabled)
            .map(|event| SoundEffect::from(*event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> MatchSession {
        MatchSession::new(MatchConfig::default(), true, 12345).unwrap()
    }

    /// Put the ball just past the left goal line heading out
    fn force_cpu_point(s: &mut MatchSession) {
        s.ball.pos = Vec2::new(2.0, 300.0);
        s.ball.vel = Vec2::new(-5.0, 1.0);
        s.update(&InputSnapshot::default());
    }

    fn force_player_point(s: &mut MatchSession) {
        s.ball.pos = Vec2::new(798.0, 300.0);
        s.ball.vel = Vec2::new(5.0, 1.0);
        s.update(&InputSnapshot::default());
    }

    #[test]
    fn test_new_session_is_zero_zero() {
        let s = session();
        assert_eq!((s.player_score(), s.cpu_score()), (0, 0));
        assert_eq!(s.terminal_state(), TerminalState::Ongoing);
        assert_eq!(s.ball.pos, s.field().center());
        assert_eq!(s.pending_explosion(), None);
    }

    #[test]
    fn test_zero_winning_score_rejected() {
        let config = MatchConfig {
            winning_score: 0,
            ..Default::default()
        };
        assert!(matches!(
            MatchSession::new(config, true, 1),
            Err(ConfigError::ZeroWinningScore)
        ));
    }

    #[test]
    fn test_player_input_moves_paddle() {
        let mut s = session();
        let start = s.player.top();
        s.update(&InputSnapshot {
            move_up: true,
            ..Default::default()
        });
        assert_eq!(s.player.top(), start - 7.0);
        s.update(&InputSnapshot {
            move_up: true,
            move_down: true,
            ..Default::default()
        });
        assert_eq!(s.player.top(), start - 7.0);
    }

    #[test]
    fn test_three_cpu_points_ends_match() {
        let mut s = session();
        for i in 1..=3 {
            assert_eq!(s.terminal_state(), TerminalState::Ongoing);
            force_cpu_point(&mut s);
            assert_eq!(s.cpu_score(), i);
            assert_eq!(s.take_explosion(), Some(Explosion::Lose));
            assert_eq!(s.take_explosion(), None);
        }
        assert_eq!(s.terminal_state(), TerminalState::CpuWon);
    }

    #[test]
    fn test_player_win() {
        let mut s = session();
        for _ in 0..3 {
            force_player_point(&mut s);
        }
        assert_eq!(s.player_score(), 3);
        assert_eq!(s.terminal_state(), TerminalState::PlayerWon);
        assert_eq!(s.take_explosion(), Some(Explosion::Win));
    }

    #[test]
    fn test_score_speeds_up_and_resets_ball() {
        let mut s = session();
        let before = s.ball.speed();
        force_player_point(&mut s);

        assert_eq!(s.ball.speed(), before + s.config().ball_speed_increment);
        assert_eq!(s.ball.pos, s.field().center());
        assert!((s.ball.vel.length() - s.ball.speed()).abs() < 1e-4);
        assert!(s.events().contains(&GameEvent::Scored(Side::Player)));
    }

    #[test]
    fn test_speed_never_decreases() {
        let mut s = session();
        let mut last = s.ball.speed();
        for _ in 0..5_000 {
            s.update(&InputSnapshot::default());
            assert!(s.ball.speed() >= last);
            last = s.ball.speed();
            if s.terminal_state().is_terminal() {
                break;
            }
        }
    }

    #[test]
    fn test_scores_frozen_once_terminal() {
        let mut s = session();
        for _ in 0..3 {
            force_cpu_point(&mut s);
        }
        force_cpu_point(&mut s);
        force_player_point(&mut s);
        assert_eq!((s.player_score(), s.cpu_score()), (0, 3));
        assert!(s.events().is_empty());
    }

    #[test]
    fn test_sound_cues_follow_flag() {
        let mut s = session();
        force_cpu_point(&mut s);
        assert_eq!(s.sound_cues().collect::<Vec<_>>(), vec![SoundEffect::Score]);

        s.set_sound_enabled(false);
        force_cpu_point(&mut s);
        assert_eq!(s.sound_cues().count(), 0);
        assert_eq!(s.events().len(), 1);
    }

    #[test]
    fn test_wall_bounce_emits_cue() {
        let mut s = session();
        let radius = s.ball.radius;
        s.ball.pos = Vec2::new(400.0, radius + 1.0);
        s.ball.vel = Vec2::new(5.0, -5.0);
        s.update(&InputSnapshot::default());

        assert!(s.ball.vel.y > 0.0);
        assert_eq!(s.events(), &[GameEvent::WallHit]);
        assert_eq!(s.sound_cues().collect::<Vec<_>>(), vec![SoundEffect::WallHit]);

        s.set_sound_enabled(false);
        s.ball.pos = Vec2::new(400.0, s.field().height - radius - 1.0);
        s.ball.vel = Vec2::new(5.0, 5.0);
        s.update(&InputSnapshot::default());
        assert_eq!(s.events(), &[GameEvent::WallHit]);
        assert_eq!(s.sound_cues().count(), 0);
    }

    #[test]
    fn test_same_seed_same_match() {
        let mut a = session();
        let mut b = session();
        for _ in 0..2_000 {
            a.update(&InputSnapshot::default());
            b.update(&InputSnapshot::default());
        }
        assert_eq!(a.ball.pos, b.ball.pos);
        assert_eq!(a.cpu.pos, b.cpu.pos);
        assert_eq!(a.cpu_score(), b.cpu_score());
    }
}
