//! Game state and the top-level orchestrator
//!
//! `Game` owns the phase, the current level's entities, the normalized
//! settings and the injected random source. Entities live in a `LevelState`
//! that every `start_level` replaces wholesale.

use serde::{Deserialize, Serialize};

use super::entities::{AirMonster, Coin, GroundMonster, Vehicle};
use super::phase::{GamePhase, PhaseEvent, transition};
use super::player::Player;
use super::rng::{RandomSource, SimRng};
use super::spawn::{
    Playfield, build_air_monsters, build_coins, build_ground_monsters, build_vehicles,
};
use super::tick;
use crate::input::InputSnapshot;
use crate::level::{LevelConfig, clamp_level, generate_level};
use crate::settings::Settings;

/// Notifications for the audio and rendering layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEvent {
    UiClick,
    CoinCollected,
    Failure,
    Success,
}

/// Everything built by `start_level`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelState {
    pub config: LevelConfig,
    pub player: Player,
    pub vehicles: Vec<Vehicle>,
    pub ground_monsters: Vec<GroundMonster>,
    pub air_monsters: Vec<AirMonster>,
    pub coins: Vec<Coin>,
    pub coins_collected: u32,
}

/// The orchestrator
#[derive(Debug, Clone)]
pub struct Game<R: RandomSource = SimRng> {
    pub(crate) phase: GamePhase,
    /// Current level (1..=9)
    pub(crate) level_index: u32,
    pub(crate) level: Option<LevelState>,
    pub(crate) settings: Settings,
    pub(crate) field: Playfield,
    pub(crate) rng: R,
    /// Events raised by the most recent `update`
    pub(crate) events: Vec<GameEvent>,
}

impl Game<SimRng> {
    /// Default playfield and settings with a seeded PCG stream
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Playfield::default(), Settings::default(), SimRng::from_seed(seed))
    }
}

impl<R: RandomSource> Game<R> {
    /// New game on the title screen; no level is built yet
    pub fn new(field: Playfield, settings: Settings, rng: R) -> Self {
        Self {
            phase: GamePhase::Title,
            level_index: 1,
            level: None,
            settings: settings.normalized(),
            field,
            rng,
            events: Vec::new(),
        }
    }

    /// Rebuild the level at `index` (clamped to 1..=9). The phase is left alone.
    pub fn start_level(&mut self, index: i32) {
        let level_index = clamp_level(index);
        let config = generate_level(level_index as i32);

        let mut player = Player::new(level_index);
        player.spawn_in(&self.field);

        let vehicles = build_vehicles(&config, &self.field, &self.settings, &mut self.rng);
        let coins = build_coins(&config, &self.field, &mut self.rng);
        let ground_monsters = build_ground_monsters(&config, &self.field);
        let air_monsters = build_air_monsters(&config, &self.field);

        log::info!(
            "Starting level {}: {} lanes, {} vehicles, {} ground / {} air monsters, {} coins",
            level_index,
            config.lane_count(),
            vehicles.len(),
            ground_monsters.len(),
            air_monsters.len(),
            coins.len()
        );

        self.level_index = level_index;
        self.level = Some(LevelState {
            config,
            player,
            vehicles,
            ground_monsters,
            air_monsters,
            coins,
            coins_collected: 0,
        });
    }

    /// Replace the settings; level-shaping values apply from the next `start_level`
    pub fn set_settings(&mut self, settings: &Settings) {
        self.settings = settings.normalized();
    }

    /// Advance by `dt` seconds (caller keeps `dt <= consts::MAX_FRAME_DT`)
    pub fn update(&mut self, dt: f32, input: &InputSnapshot) {
        self.events.clear();

        if self.phase == GamePhase::Play {
            tick::tick(self, input, dt);
            return;
        }

        if input.confirm && self.apply(PhaseEvent::Confirm) {
            return;
        }
        if input.pause {
            self.apply(PhaseEvent::TogglePause);
        }
    }

    /// Run `event` through the transition table. Returns whether it was accepted.
    pub(crate) fn apply(&mut self, event: PhaseEvent) -> bool {
        let Some(step) = transition(self.phase, event, self.level_index) else {
            return false;
        };
        if let Some(level) = step.start_level {
            self.start_level(level as i32);
        }
        log::info!(
            "Phase {:?} -> {:?} (level {})",
            self.phase,
            step.next,
            self.level_index
        );
        self.phase = step.next;
        self.emit(step.cue);
        true
    }

    /// Record an event, once per update
    pub(crate) fn emit(&mut self, event: GameEvent) {
        if !self.events.contains(&event) {
            self.events.push(event);
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn level_index(&self) -> u32 {
        self.level_index
    }

    pub fn level(&self) -> Option<&LevelState> {
        self.level.as_ref()
    }

    pub fn coins_collected(&self) -> u32 {
        self.level.as_ref().map_or(0, |level| level.coins_collected)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn field(&self) -> &Playfield {
        &self.field
    }

    /// Events raised by the most recent `update`, in detection order
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
