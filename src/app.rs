//! Application state machine
//!
//! Sequences the main menu, the match, the pause screen and the win/lose
//! screens. Every state change goes through [`AppState::next`]; each call to
//! [`App::tick`] consumes one input snapshot, advances the active state by
//! one tick and draws one frame.

use glam::Vec2;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::{AudioSession, MusicTrack, SoundEffect};
use crate::consts::EXPLOSION_TICKS;
use crate::error::ConfigError;
use crate::input::InputSnapshot;
use crate::renderer::{DrawSurface, Interstitial, Styles, scene};
use crate::settings::Settings;
use crate::sim::{Field, MatchSession, TerminalState};
use crate::ui::{Button, Pulse};

const BUTTON_FONT_SIZE: f32 = 40.0;
const START_LABEL: &str = "Start Game - VS CPU";

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Playing,
    Paused,
    Won,
    Lost,
}

/// Triggers for state changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// "Start" activated in the main menu
    Start,
    /// Pause key while playing
    Pause,
    /// Pause key or "Resume" while paused
    Resume,
    /// "Main Menu" while paused
    MainMenu,
    /// Match reported a player win
    PlayerWon,
    /// Match reported a CPU win
    CpuWon,
    /// Any input on an end screen
    Dismiss,
}

impl AppState {
    /// Transition table. `None` means the event is not valid in this state.
    pub fn next(self, event: AppEvent) -> Option<AppState> {
        use AppEvent::*;
        use AppState::*;
        match (self, event) {
            (Menu, Start) => Some(Playing),
            (Playing, Pause) => Some(Paused),
            (Playing, PlayerWon) => Some(Won),
            (Playing, CpuWon) => Some(Lost),
            (Paused, Resume) => Some(Playing),
            (Paused, MainMenu) => Some(Menu),
            (Won, Dismiss) | (Lost, Dismiss) => Some(Menu),
            _ => None,
        }
    }

    /// States that own a match session
    pub fn has_session(self) -> bool {
        matches!(self, AppState::Playing | AppState::Paused)
    }
}

/// What the shell should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Button identities across screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Start,
    ToggleSound,
    Quit,
    Resume,
    MainMenu,
}

fn sound_label(enabled: bool) -> &'static str {
    if enabled { "Sound - ON" } else { "Sound - OFF" }
}

fn menu_buttons(field: &Field, sound_enabled: bool) -> Vec<(ButtonAction, Button)> {
    let c = field.center();
    vec![
        (
            ButtonAction::Start,
            Button::new(START_LABEL, Vec2::new(c.x, c.y - 20.0), BUTTON_FONT_SIZE),
        ),
        (
            ButtonAction::ToggleSound,
            Button::new(
                sound_label(sound_enabled),
                Vec2::new(c.x, c.y + 40.0),
                BUTTON_FONT_SIZE,
            ),
        ),
        (
            ButtonAction::Quit,
            Button::new("Quit", Vec2::new(c.x, c.y + 100.0), BUTTON_FONT_SIZE),
        ),
    ]
}

fn pause_buttons(field: &Field) -> Vec<(ButtonAction, Button)> {
    let c = field.center();
    vec![
        (
            ButtonAction::Resume,
            Button::new("Resume", Vec2::new(c.x, c.y - 40.0), BUTTON_FONT_SIZE),
        ),
        (
            ButtonAction::MainMenu,
            Button::new("Main Menu", Vec2::new(c.x, c.y + 20.0), BUTTON_FONT_SIZE),
        ),
        (
            ButtonAction::Quit,
            Button::new("Quit", Vec2::new(c.x, c.y + 80.0), BUTTON_FONT_SIZE),
        ),
    ]
}

/// Hover-update every button and return the first one clicked
fn update_buttons(
    buttons: &mut [(ButtonAction, Button)],
    input: &InputSnapshot,
) -> Option<ButtonAction> {
    for (_, button) in buttons.iter_mut() {
        button.update(input.pointer);
    }
    buttons
        .iter()
        .find(|(_, button)| button.is_clicked(input))
        .map(|(action, _)| *action)
}

/// The whole game above the platform layer
pub struct App {
    state: AppState,
    settings: Settings,
    styles: Styles,
    session: Option<MatchSession>,
    /// Seeds each new match
    rng: Pcg32,
    menu_buttons: Vec<(ButtonAction, Button)>,
    pause_buttons: Vec<(ButtonAction, Button)>,
    pulse: Pulse,
    interstitial: Option<Interstitial>,
    /// Final score of the last finished match (player, cpu)
    last_score: Option<(u32, u32)>,
    /// On-enter actions for the initial state still pending
    entered: bool,
}

impl App {
    pub fn new(settings: Settings, styles: Styles) -> Result<Self, ConfigError> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("App initialized with seed: {}", seed);

        let field = settings.match_config.field;
        Ok(Self {
            state: AppState::Menu,
            menu_buttons: menu_buttons(&field, settings.sound_enabled),
            pause_buttons: pause_buttons(&field),
            settings,
            styles,
            session: None,
            rng: Pcg32::seed_from_u64(seed),
            pulse: Pulse::new(),
            interstitial: None,
            last_score: None,
            entered: false,
        })
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn session(&self) -> Option<&MatchSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut MatchSession> {
        self.session.as_mut()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn sound_enabled(&self) -> bool {
        self.settings.sound_enabled
    }

    pub fn last_score(&self) -> Option<(u32, u32)> {
        self.last_score
    }

    pub fn interstitial(&self) -> Option<&Interstitial> {
        self.interstitial.as_ref()
    }

    fn field(&self) -> Field {
        self.settings.match_config.field
    }

    /// Where a button currently is, if it is on the active screen
    pub fn button_center(&self, action: ButtonAction) -> Option<Vec2> {
        let buttons = match self.state {
            AppState::Menu => &self.menu_buttons,
            AppState::Paused => &self.pause_buttons,
            _ => return None,
        };
        buttons
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, b)| b.pos)
    }

    /// Label of a button on any screen
    pub fn button_label(&self, action: ButtonAction) -> Option<&str> {
        self.menu_buttons
            .iter()
            .chain(self.pause_buttons.iter())
            .find(|(a, _)| *a == action)
            .map(|(_, b)| b.label.as_str())
    }

    /// Advance one tick and draw one frame
    pub fn tick(
        &mut self,
        input: &InputSnapshot,
        surface: &mut dyn DrawSurface,
        audio: &mut AudioSession,
    ) -> Flow {
        if input.quit {
            log::info!("Quit requested");
            return Flow::Quit;
        }

        if !self.entered {
            self.entered = true;
            self.on_enter(audio);
        }

        let flow = match self.state {
            AppState::Menu => self.tick_menu(input, audio),
            AppState::Playing => self.tick_playing(input, audio),
            AppState::Paused => self.tick_paused(input, audio),
            AppState::Won | AppState::Lost => self.tick_end(input, audio),
        };

        if flow == Flow::Continue {
            self.render(surface);
        }
        flow
    }

    /// Apply `event` if the table allows it. Returns true on a state change.
    fn transition(&mut self, event: AppEvent, audio: &mut AudioSession) -> bool {
        let Some(next) = self.state.next(event) else {
            log::debug!("Ignoring {:?} in {:?}", event, self.state);
            return false;
        };
        log::info!("{:?} -> {:?} ({:?})", self.state, next, event);
        self.state = next;
        if !next.has_session() {
            self.session = None;
        }
        self.on_enter(audio);
        true
    }

    fn on_enter(&mut self, audio: &mut AudioSession) {
        let sound = self.settings.sound_enabled;
        match self.state {
            AppState::Menu => {
                self.interstitial = None;
                let field = self.field();
                self.menu_buttons = menu_buttons(&field, sound);
                if sound {
                    audio.play_music(MusicTrack::Menu);
                }
            }
            AppState::Playing => {
                if sound {
                    audio.play_music(MusicTrack::Game);
                }
            }
            AppState::Paused => {
                let field = self.field();
                self.pause_buttons = pause_buttons(&field);
                if sound {
                    audio.play_music(MusicTrack::Pause);
                }
            }
            AppState::Won | AppState::Lost => {
                self.interstitial = None;
                self.pulse = Pulse::new();
            }
        }
    }

    fn click(&self, audio: &mut AudioSession) {
        if self.settings.sound_enabled {
            audio.play(SoundEffect::Click);
        }
    }

    fn tick_menu(&mut self, input: &InputSnapshot, audio: &mut AudioSession) -> Flow {
        match update_buttons(&mut self.menu_buttons, input) {
            Some(ButtonAction::Start) => {
                self.click(audio);
                self.start_match(audio);
            }
            Some(ButtonAction::ToggleSound) => {
                self.settings.sound_enabled = !self.settings.sound_enabled;
                let enabled = self.settings.sound_enabled;
                log::info!("Sound {}", if enabled { "on" } else { "off" });
                audio.set_muted(!enabled);
                if let Some((_, button)) = self
                    .menu_buttons
                    .iter_mut()
                    .find(|(a, _)| *a == ButtonAction::ToggleSound)
                {
                    button.set_label(sound_label(enabled));
                }
                if enabled {
                    self.click(audio);
                    audio.play_music(MusicTrack::Menu);
                } else {
                    audio.stop_music();
                }
            }
            Some(ButtonAction::Quit) => return Flow::Quit,
            _ => {}
        }
        Flow::Continue
    }

    fn start_match(&mut self, audio: &mut AudioSession) {
        let seed = self.rng.next_u64();
        match MatchSession::new(
            self.settings.match_config.clone(),
            self.settings.sound_enabled,
            seed,
        ) {
            Ok(session) => {
                self.session = Some(session);
                self.transition(AppEvent::Start, audio);
            }
            Err(e) => log::error!("Could not start match: {}", e),
        }
    }

    fn tick_playing(&mut self, input: &InputSnapshot, audio: &mut AudioSession) -> Flow {
        if input.pause_pressed {
            self.transition(AppEvent::Pause, audio);
            return Flow::Continue;
        }

        let Some(session) = self.session.as_mut() else {
            log::error!("Playing without a match session, returning to menu");
            self.state = AppState::Menu;
            self.on_enter(audio);
            return Flow::Continue;
        };

        session.update(input);
        for cue in session.sound_cues() {
            audio.play(cue);
        }

        if let Some(fx) = self.interstitial.as_mut() {
            fx.remaining = fx.remaining.saturating_sub(1);
            if fx.remaining == 0 {
                self.interstitial = None;
            }
        }
        if let Some(kind) = session.take_explosion() {
            self.interstitial = Some(Interstitial {
                kind,
                remaining: EXPLOSION_TICKS,
                total: EXPLOSION_TICKS,
            });
        }

        let outcome = session.terminal_state();
        let score = (session.player_score(), session.cpu_score());
        match outcome {
            TerminalState::Ongoing => {}
            TerminalState::PlayerWon => {
                self.last_score = Some(score);
                self.transition(AppEvent::PlayerWon, audio);
            }
            TerminalState::CpuWon => {
                self.last_score = Some(score);
                self.transition(AppEvent::CpuWon, audio);
            }
        }
        Flow::Continue
    }

    fn tick_paused(&mut self, input: &InputSnapshot, audio: &mut AudioSession) -> Flow {
        let clicked = update_buttons(&mut self.pause_buttons, input);
        if input.pause_pressed {
            self.transition(AppEvent::Resume, audio);
            return Flow::Continue;
        }
        match clicked {
            Some(ButtonAction::Resume) => {
                self.click(audio);
                self.transition(AppEvent::Resume, audio);
            }
            Some(ButtonAction::MainMenu) => {
                self.click(audio);
                self.transition(AppEvent::MainMenu, audio);
            }
            Some(ButtonAction::Quit) => return Flow::Quit,
            _ => {}
        }
        Flow::Continue
    }

    fn tick_end(&mut self, input: &InputSnapshot, audio: &mut AudioSession) -> Flow {
        self.pulse.tick();
        if input.any_discrete() {
            self.transition(AppEvent::Dismiss, audio);
        }
        Flow::Continue
    }

    fn render(&self, surface: &mut dyn DrawSurface) {
        let field = self.field();
        match self.state {
            AppState::Menu => scene::draw_menu(
                surface,
                &field,
                &self.styles,
                self.menu_buttons.iter().map(|(_, b)| b),
            ),
            AppState::Playing => {
                if let Some(session) = &self.session {
                    scene::draw_match(surface, session, &self.styles, self.interstitial.as_ref());
                }
            }
            AppState::Paused => scene::draw_pause(
                surface,
                &field,
                &self.styles,
                self.pause_buttons.iter().map(|(_, b)| b),
            ),
            AppState::Won => {
                scene::draw_end(surface, &field, &self.styles, "You Win!", self.pulse.scale())
            }
            AppState::Lost => {
                scene::draw_end(surface, &field, &self.styles, "You Lose!", self.pulse.scale())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::tests::{Cue, RecordingAudio};
    use crate::renderer::CommandBuffer;

    struct Harness {
        app: App,
        surface: CommandBuffer,
        audio: AudioSession,
        backend: RecordingAudio,
    }

    impl Harness {
        fn new() -> Self {
            let settings = Settings {
                seed: Some(2024),
                ..Default::default()
            };
            let backend = RecordingAudio::default();
            Self {
                app: App::new(settings, Styles::default()).unwrap(),
                surface: CommandBuffer::new(),
                audio: AudioSession::new(Box::new(backend.clone())),
                backend,
            }
        }

        fn tick(&mut self, input: InputSnapshot) -> Flow {
            self.surface.take();
            self.app.tick(&input, &mut self.surface, &mut self.audio)
        }

        fn idle(&mut self) -> Flow {
            self.tick(InputSnapshot::default())
        }

        fn press(&mut self, action: ButtonAction) -> Flow {
            let pos = self.app.button_center(action).expect("button on screen");
            self.tick(InputSnapshot::click_at(pos))
        }

        fn start(&mut self) {
            self.idle();
            self.press(ButtonAction::Start);
            assert_eq!(self.app.state(), AppState::Playing);
        }

        /// Drive the ball past the player's goal line
        fn concede(&mut self) {
            let session = self.app.session_mut().unwrap();
            session.ball.pos = Vec2::new(2.0, 300.0);
            session.ball.vel = Vec2::new(-5.0, 1.0);
            self.idle();
        }
    }

    #[test]
    fn test_transition_table() {
        use AppEvent::*;
        use AppState::*;
        let states = [Menu, Playing, Paused, Won, Lost];
        let events = [Start, Pause, Resume, MainMenu, PlayerWon, CpuWon, Dismiss];
        let valid: Vec<(AppState, AppEvent, AppState)> = states
            .iter()
            .flat_map(|&s| events.iter().map(move |&e| (s, e)))
            .filter_map(|(s, e)| s.next(e).map(|n| (s, e, n)))
            .collect();
        assert_eq!(
            valid,
            vec![
                (Menu, Start, Playing),
                (Playing, Pause, Paused),
                (Playing, PlayerWon, Won),
                (Playing, CpuWon, Lost),
                (Paused, Resume, Playing),
                (Paused, MainMenu, Menu),
                (Won, Dismiss, Menu),
                (Lost, Dismiss, Menu),
            ]
        );
    }

    #[test]
    fn test_starts_in_menu_with_music() {
        let mut h = Harness::new();
        assert_eq!(h.idle(), Flow::Continue);
        assert_eq!(h.app.state(), AppState::Menu);
        assert!(h.app.session().is_none());
        assert_eq!(h.backend.cues(), vec![Cue::Music(MusicTrack::Menu)]);
        assert!(h.surface.texts().any(|t| t == "Ping Pong"));
    }

    #[test]
    fn test_start_creates_fresh_session() {
        let mut h = Harness::new();
        h.start();
        let session = h.app.session().unwrap();
        assert_eq!((session.player_score(), session.cpu_score()), (0, 0));
        assert_eq!(h.audio.current_track(), Some(MusicTrack::Game));
    }

    #[test]
    fn test_click_outside_buttons_does_nothing() {
        let mut h = Harness::new();
        h.tick(InputSnapshot::click_at(Vec2::new(5.0, 5.0)));
        assert_eq!(h.app.state(), AppState::Menu);
    }

    #[test]
    fn test_pause_leaves_session_untouched() {
        let mut h = Harness::new();
        h.start();
        for _ in 0..10 {
            h.idle();
        }
        let before = h.app.session().unwrap().clone();

        h.tick(InputSnapshot::pause());
        assert_eq!(h.app.state(), AppState::Paused);
        for _ in 0..10 {
            h.idle();
        }
        let after = h.app.session().unwrap();
        assert_eq!(after.ball.pos, before.ball.pos);
        assert_eq!(after.cpu.pos, before.cpu.pos);
        assert_eq!(after.ticks(), before.ticks());
        assert!(h.surface.texts().any(|t| t == "Paused"));
    }

    #[test]
    fn test_pause_key_resumes() {
        let mut h = Harness::new();
        h.start();
        h.tick(InputSnapshot::pause());
        h.tick(InputSnapshot::pause());
        assert_eq!(h.app.state(), AppState::Playing);
        assert_eq!(h.audio.current_track(), Some(MusicTrack::Game));
    }

    #[test]
    fn test_resume_button() {
        let mut h = Harness::new();
        h.start();
        h.tick(InputSnapshot::pause());
        h.press(ButtonAction::Resume);
        assert_eq!(h.app.state(), AppState::Playing);
        assert!(h.app.session().is_some());
    }

    #[test]
    fn test_main_menu_discards_session() {
        let mut h = Harness::new();
        h.start();
        h.tick(InputSnapshot::pause());
        h.press(ButtonAction::MainMenu);
        assert_eq!(h.app.state(), AppState::Menu);
        assert!(h.app.session().is_none());

        // A new match starts from scratch
        h.press(ButtonAction::Start);
        let session = h.app.session().unwrap();
        assert_eq!(session.ticks(), 0);
    }

    #[test]
    fn test_losing_match_reaches_lost_then_menu() {
        let mut h = Harness::new();
        h.start();
        for _ in 0..2 {
            h.concede();
            assert_eq!(h.app.state(), AppState::Playing);
        }
        assert!(h.app.interstitial().is_some());
        h.concede();

        assert_eq!(h.app.state(), AppState::Lost);
        assert!(h.app.session().is_none());
        assert_eq!(h.app.last_score(), Some((0, 3)));
        assert!(h.surface.texts().any(|t| t == "You Lose!"));

        // Idle ticks keep the end screen up
        for _ in 0..30 {
            h.idle();
        }
        assert_eq!(h.app.state(), AppState::Lost);

        h.tick(InputSnapshot {
            any_key_pressed: true,
            ..Default::default()
        });
        assert_eq!(h.app.state(), AppState::Menu);
        assert_eq!(h.app.button_label(ButtonAction::Start), Some(START_LABEL));
    }

    #[test]
    fn test_winning_match() {
        let mut h = Harness::new();
        h.start();
        for _ in 0..3 {
            let session = h.app.session_mut().unwrap();
            session.ball.pos = Vec2::new(798.0, 300.0);
            session.ball.vel = Vec2::new(5.0, 1.0);
            h.idle();
        }
        assert_eq!(h.app.state(), AppState::Won);
        h.tick(InputSnapshot::click_at(Vec2::ZERO));
        assert_eq!(h.app.state(), AppState::Menu);
    }

    #[test]
    fn test_sound_toggle() {
        let mut h = Harness::new();
        h.idle();
        h.press(ButtonAction::ToggleSound);
        assert!(!h.app.sound_enabled());
        assert_eq!(h.app.button_label(ButtonAction::ToggleSound), Some("Sound - OFF"));
        assert_eq!(h.audio.current_track(), None);
        assert_eq!(h.backend.cues().last(), Some(&Cue::Stop));

        // Matches started with sound off emit no cues
        h.press(ButtonAction::Start);
        let before = h.backend.cues().len();
        h.concede();
        assert_eq!(h.backend.cues().len(), before);
        assert!(!h.app.session().unwrap().sound_enabled());
    }

    #[test]
    fn test_sound_toggle_back_on_restarts_menu_music() {
        let mut h = Harness::new();
        h.idle();
        h.press(ButtonAction::ToggleSound);
        h.press(ButtonAction::ToggleSound);
        assert!(h.app.sound_enabled());
        assert_eq!(h.app.button_label(ButtonAction::ToggleSound), Some("Sound - ON"));
        assert_eq!(h.audio.current_track(), Some(MusicTrack::Menu));
    }

    #[test]
    fn test_score_cue_reaches_audio() {
        let mut h = Harness::new();
        h.start();
        h.concede();
        assert!(h.backend.cues().contains(&Cue::Sound(SoundEffect::Score)));
    }

    #[test]
    fn test_quit_honored_in_every_state() {
        let quit = InputSnapshot {
            quit: true,
            ..Default::default()
        };

        let mut h = Harness::new();
        assert_eq!(h.tick(quit.clone()), Flow::Quit);

        let mut h = Harness::new();
        h.start();
        assert_eq!(h.tick(quit.clone()), Flow::Quit);

        let mut h = Harness::new();
        h.start();
        h.tick(InputSnapshot::pause());
        assert_eq!(h.tick(quit), Flow::Quit);
    }

    #[test]
    fn test_quit_buttons() {
        let mut h = Harness::new();
        h.idle();
        assert_eq!(h.press(ButtonAction::Quit), Flow::Quit);

        let mut h = Harness::new();
        h.start();
        h.tick(InputSnapshot::pause());
        assert_eq!(h.press(ButtonAction::Quit), Flow::Quit);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = Settings::default();
        settings.match_config.winning_score = 0;
        assert!(App::new(settings, Styles::default()).is_err());
    }
}
