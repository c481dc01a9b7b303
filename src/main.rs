//! Ping Pong entry point
//!
//! Headless native shell: loads settings, then drives the app at the fixed
//! tick rate with a scripted player until one match has been played out.
//! A windowed front end supplies its own `DrawSurface`, `AudioBackend` and
//! input mapping in place of the ones used here.

use std::time::{SystemTime, UNIX_EPOCH};

use ping_pong::app::ButtonAction;
use ping_pong::audio::{AudioSession, LogAudio};
use ping_pong::platform::FrameClock;
use ping_pong::renderer::{CommandBuffer, NoAssets, Styles};
use ping_pong::{App, AppState, Flow, InputSnapshot, Settings};

/// Paddle dead zone around the ball, in pixels
const TRACK_DEAD_ZONE: f32 = 12.0;
/// Safety stop for the scripted run
const MAX_TICKS: u64 = 60 * 60 * 10;

fn load_settings() -> Settings {
    let Some(path) = std::env::args().nth(1) else {
        return Settings::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => match Settings::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}, using defaults", path, e);
                Settings::default()
            }
        },
        Err(e) => {
            log::warn!("Could not read {}: {}, using defaults", path, e);
            Settings::default()
        }
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Scripted stand-in for a human at the keyboard
struct Autopilot {
    finished_match: bool,
}

impl Autopilot {
    fn input(&mut self, app: &App) -> InputSnapshot {
        match app.state() {
            AppState::Menu if self.finished_match => InputSnapshot {
                quit: true,
                ..Default::default()
            },
            AppState::Menu | AppState::Paused => {
                let action = if app.state() == AppState::Menu {
                    ButtonAction::Start
                } else {
                    ButtonAction::Resume
                };
                app.button_center(action)
                    .map(InputSnapshot::click_at)
                    .unwrap_or_default()
            }
            AppState::Playing => {
                let Some(session) = app.session() else {
                    return InputSnapshot::default();
                };
                let offset = session.ball.pos.y - session.player.center_y();
                InputSnapshot {
                    move_up: offset < -TRACK_DEAD_ZONE,
                    move_down: offset > TRACK_DEAD_ZONE,
                    ..Default::default()
                }
            }
            AppState::Won | AppState::Lost => {
                self.finished_match = true;
                InputSnapshot {
                    any_key_pressed: true,
                    ..Default::default()
                }
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Ping Pong starting...");

    let mut settings = load_settings();
    if settings.seed.is_none() {
        settings.seed = Some(time_seed());
    }

    let mut audio = AudioSession::with_settings(Box::new(LogAudio), &settings);
    let styles = Styles::resolve(&mut NoAssets);
    let mut app = match App::new(settings, styles) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    let mut clock = FrameClock::default();
    let mut frame = CommandBuffer::new();
    let mut pilot = Autopilot {
        finished_match: false,
    };

    loop {
        let input = pilot.input(&app);
        if app.tick(&input, &mut frame, &mut audio) == Flow::Quit {
            break;
        }
        let commands = frame.take();

        if clock.frames() % 60 == 0 {
            if let Some(session) = app.session() {
                log::debug!(
                    "tick {} score {}-{} ({} draw commands)",
                    session.ticks(),
                    session.player_score(),
                    session.cpu_score(),
                    commands.len()
                );
            }
        }
        if clock.frames() >= MAX_TICKS {
            log::warn!("Stopping after {} frames", clock.frames());
            break;
        }
        clock.wait();
    }

    match app.last_score() {
        Some((player, cpu)) => log::info!("Final score: player {} - cpu {}", player, cpu),
        None => log::info!("No match finished"),
    }
    log::info!("{} late frames", clock.late_frames());
}

#[cfg(target_arch = "wasm32")]
fn main() {}
