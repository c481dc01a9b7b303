//! Audio cues and background music
//!
//! The core never touches an audio device. It asks an [`AudioBackend`] to
//! play one-shot effects and looping tracks; backend failures are logged
//! and dropped so a missing device never interrupts a tick.

use crate::error::AudioError;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits top or bottom wall
    WallHit,
    /// A point was scored
    Score,
    /// Menu button clicked
    Click,
}

impl SoundEffect {
    pub fn id(&self) -> &'static str {
        match self {
            SoundEffect::PaddleHit => "paddle_hit",
            SoundEffect::WallHit => "wall_hit",
            SoundEffect::Score => "score",
            SoundEffect::Click => "click",
        }
    }
}

impl From<GameEvent> for SoundEffect {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::WallHit => SoundEffect::WallHit,
            GameEvent::PaddleHit(_) => SoundEffect::PaddleHit,
            GameEvent::Scored(_) => SoundEffect::Score,
        }
    }
}

/// Looping background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicTrack {
    Menu,
    Game,
    Pause,
}

impl MusicTrack {
    pub fn id(&self) -> &'static str {
        match self {
            MusicTrack::Menu => "menu",
            MusicTrack::Game => "game",
            MusicTrack::Pause => "pause",
        }
    }
}

/// Platform audio. Implemented by the shell.
pub trait AudioBackend {
    /// Fire-and-forget one-shot effect at `volume` (0.0 - 1.0)
    fn play_sound(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;
    /// Start looping `track`, replacing whatever is playing
    fn play_music(&mut self, track: MusicTrack, volume: f32) -> Result<(), AudioError>;
    fn stop_music(&mut self) -> Result<(), AudioError>;
}

/// Backend that only logs cues. Used when no audio device is available.
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioBackend for LogAudio {
    fn play_sound(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
        log::debug!("[SOUND] {} (vol {:.2})", effect.id(), volume);
        Ok(())
    }

    fn play_music(&mut self, track: MusicTrack, volume: f32) -> Result<(), AudioError> {
        log::info!("[MUSIC] Now playing {} (vol {:.2})", track.id(), volume);
        Ok(())
    }

    fn stop_music(&mut self) -> Result<(), AudioError> {
        log::info!("[MUSIC] Stopped");
        Ok(())
    }
}

/// Owns the backend plus everything the game needs to know about what is
/// currently audible.
pub struct AudioSession {
    backend: Box<dyn AudioBackend>,
    current_track: Option<MusicTrack>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl AudioSession {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            current_track: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    /// Session with volumes and mute state taken from settings
    pub fn with_settings(backend: Box<dyn AudioBackend>, settings: &Settings) -> Self {
        let mut session = Self::new(backend);
        session.set_master_volume(settings.master_volume);
        session.set_sfx_volume(settings.sfx_volume);
        session.set_music_volume(settings.music_volume);
        session.set_muted(!settings.sound_enabled);
        session
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute effects (music is stopped separately)
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn current_track(&self) -> Option<MusicTrack> {
        self.current_track
    }

    fn sfx_level(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn music_level(&self) -> f32 {
        self.master_volume * self.music_volume
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.sfx_level();
        if vol <= 0.0 {
            return;
        }
        if let Err(e) = self.backend.play_sound(effect, vol) {
            log::warn!("Failed to play {}: {}", effect.id(), e);
        }
    }

    /// Loop `track` unless it is already the current track
    pub fn play_music(&mut self, track: MusicTrack) {
        if self.current_track == Some(track) {
            return;
        }
        match self.backend.play_music(track, self.music_level()) {
            Ok(()) => self.current_track = Some(track),
            Err(e) => {
                log::warn!("Failed to start {} music: {}", track.id(), e);
                self.current_track = None;
            }
        }
    }

    pub fn stop_music(&mut self) {
        self.current_track = None;
        if let Err(e) = self.backend.stop_music() {
            log::warn!("Failed to stop music: {}", e);
        }
    }
}
