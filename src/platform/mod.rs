//! Platform shell
//!
//! Everything the host loop does around `Game::update`:
//! - Frame timing with the dt clamp
//! - Button edge detection
//! - Audio routing after each update
//! - Restarting the level when gameplay settings changed during a pause

use crate::audio::{AudioRouter, AudioSink, SoundCue};
use crate::consts::MAX_FRAME_DT;
use crate::input::{Controls, InputTracker};
use crate::settings::Settings;
use crate::sim::{Game, GamePhase, RandomSource, SimRng};

/// Converts frame timestamps into clamped simulation steps
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous frame, in [0, MAX_FRAME_DT]. The first frame is 0.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms.replace(now_ms) {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        dt.clamp(0.0, MAX_FRAME_DT)
    }
}

/// One running game plus the shell state around it
pub struct Session<S: AudioSink, R: RandomSource = SimRng> {
    game: Game<R>,
    tracker: InputTracker,
    clock: FrameClock,
    audio: AudioRouter,
    sink: S,
    settings_dirty: bool,
    last_phase: GamePhase,
}

impl<S: AudioSink, R: RandomSource> Session<S, R> {
    pub fn new(game: Game<R>, sink: S) -> Self {
        let audio = AudioRouter::new(game.settings());
        let last_phase = game.phase();
        Self {
            game,
            tracker: InputTracker::new(),
            clock: FrameClock::new(),
            audio,
            sink,
            settings_dirty: false,
            last_phase,
        }
    }

    /// Run one display frame. Returns the dt that was simulated.
    pub fn frame(&mut self, now_ms: f64, held: &Controls) -> f32 {
        let dt = self.clock.advance(now_ms);
        let input = self.tracker.snapshot(held);
        self.game.update(dt, &input);

        let phase = self.game.phase();
        if phase != self.last_phase {
            if self.last_phase == GamePhase::Pause && self.settings_dirty {
                log::info!(
                    "Gameplay settings changed while paused, restarting level {}",
                    self.game.level_index()
                );
                self.game.start_level(self.game.level_index() as i32);
                self.settings_dirty = false;
            }
            self.last_phase = phase;
        }

        self.audio.dispatch(self.game.events(), phase, &mut self.sink);
        dt
    }

    /// Apply edited settings. Gameplay changes are deferred to the next
    /// resume from pause; volume changes apply at once.
    pub fn apply_settings(&mut self, settings: &Settings) {
        let next = settings.normalized();
        if self.game.settings().affects_level(&next) {
            self.settings_dirty = true;
        }
        self.game.set_settings(&next);
        self.audio.update_volumes(&next, &mut self.sink);
        self.audio.play(SoundCue::Ui, &mut self.sink);
    }

    /// The settings panel is shown exactly while paused
    pub fn settings_panel_open(&self) -> bool {
        self.game.phase() == GamePhase::Pause
    }

    pub fn is_settings_dirty(&self) -> bool {
        self.settings_dirty
    }

    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    pub fn audio(&self) -> &AudioRouter {
        &self.audio
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
