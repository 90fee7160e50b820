//! Audio cue routing
//!
//! The simulation raises `GameEvent`s; this module maps them to named cues,
//! works out channel volumes from the settings and drives an `AudioSink`.
//! Playback itself belongs to the host.

use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase};

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Menu confirm / pause toggle
    Ui,
    Coin,
    Fail,
    Success,
}

impl SoundCue {
    /// Asset name used by the host
    pub fn name(self) -> &'static str {
        match self {
            SoundCue::Ui => "ui",
            SoundCue::Coin => "coin",
            SoundCue::Fail => "fail",
            SoundCue::Success => "success",
        }
    }
}

impl From<GameEvent> for SoundCue {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::UiClick => SoundCue::Ui,
            GameEvent::CoinCollected => SoundCue::Coin,
            GameEvent::Failure => SoundCue::Fail,
            GameEvent::Success => SoundCue::Success,
        }
    }
}

/// Looping background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ambience {
    Traffic,
}

impl Ambience {
    pub fn name(self) -> &'static str {
        match self {
            Ambience::Traffic => "traffic",
        }
    }
}

/// Traffic hum plays only while the level is live
pub fn ambience_for(phase: GamePhase) -> Option<Ambience> {
    match phase {
        GamePhase::Play => Some(Ambience::Traffic),
        _ => None,
    }
}

/// Effective gain of a channel under the master volume, clamped to [0, 1]
#[inline]
pub fn compute_volume(master: f32, channel: f32) -> f32 {
    let volume = master * channel;
    if volume.is_nan() {
        return 0.0;
    }
    volume.clamp(0.0, 1.0)
}

/// Gains for each channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixLevels {
    pub master: f32,
    pub sfx: f32,
    pub ambience: f32,
}

impl MixLevels {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            master: compute_volume(settings.master_volume, 1.0),
            sfx: compute_volume(settings.master_volume, settings.sfx_volume),
            ambience: compute_volume(settings.master_volume, settings.ambience_volume),
        }
    }
}

/// Host-side playback
pub trait AudioSink {
    fn play_sfx(&mut self, cue: SoundCue, volume: f32);
    /// Switch the looping track; `None` stops it
    fn set_ambience(&mut self, track: Option<Ambience>, volume: f32);
}

/// Counters for the audio debug overlay
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AudioDebug {
    pub sfx_played: u32,
    pub last_sfx: Option<SoundCue>,
    pub ambience: Option<Ambience>,
}

/// Turns game events and phase changes into sink calls
#[derive(Debug, Clone)]
pub struct AudioRouter {
    levels: MixLevels,
    ambience: Option<Ambience>,
    debug: AudioDebug,
}

impl AudioRouter {
    pub fn new(settings: &Settings) -> Self {
        Self {
            levels: MixLevels::from_settings(settings),
            ambience: None,
            debug: AudioDebug::default(),
        }
    }

    pub fn levels(&self) -> MixLevels {
        self.levels
    }

    pub fn debug(&self) -> AudioDebug {
        self.debug
    }

    /// Recompute gains; a running ambience track picks up the new level
    pub fn update_volumes(&mut self, settings: &Settings, sink: &mut impl AudioSink) {
        self.levels = MixLevels::from_settings(settings);
        if self.ambience.is_some() {
            sink.set_ambience(self.ambience, self.levels.ambience);
        }
    }

    pub fn play(&mut self, cue: SoundCue, sink: &mut impl AudioSink) {
        sink.play_sfx(cue, self.levels.sfx);
        self.debug.sfx_played += 1;
        self.debug.last_sfx = Some(cue);
    }

    /// Play every event's cue, then bring the ambience in line with `phase`
    pub fn dispatch(&mut self, events: &[GameEvent], phase: GamePhase, sink: &mut impl AudioSink) {
        for &event in events {
            self.play(event.into(), sink);
        }

        let wanted = ambience_for(phase);
        if wanted != self.ambience {
            sink.set_ambience(wanted, self.levels.ambience);
            self.ambience = wanted;
            self.debug.ambience = wanted;
        }
    }
}

/// Sink that only logs, for headless runs
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAudioSink;

impl AudioSink for LogAudioSink {
    fn play_sfx(&mut self, cue: SoundCue, volume: f32) {
        log::debug!("sfx {} at {:.2}", cue.name(), volume);
    }

    fn set_ambience(&mut self, track: Option<Ambience>, volume: f32) {
        match track {
            Some(track) => log::debug!("ambience {} at {:.2}", track.name(), volume),
            None => log::debug!("ambience stopped"),
        }
    }
}
