//! Cross Road - a lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (player, entities, collisions, game state machine)
//! - `level`: Procedural difficulty scaling per level
//! - `input`: Keyboard/touch merging and press edge detection
//! - `settings`: Normalized user settings
//! - `persistence`: Key-value storage seam for settings
//! - `audio`: Cue routing and channel volume math
//! - `platform`: Frame clock and the per-frame session driver

pub mod audio;
pub mod input;
pub mod level;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use level::{LevelConfig, generate_level};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Reference playfield size
    pub const BASE_WIDTH: f32 = 960.0;
    pub const BASE_HEIGHT: f32 = 540.0;

    /// Largest dt the shell may hand to `Game::update` (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Highest level; winning it completes the run
    pub const LEVEL_COUNT: u32 = 9;

    /// Height of the safe strips at the top and bottom of the playfield
    pub const SAFE_ZONE_HEIGHT: f32 = 60.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 18.0;
    pub const PLAYER_SPEED: f32 = 160.0;
    pub const DASH_SPEED: f32 = 320.0;
    pub const DASH_DURATION: f32 = 0.18;
    pub const BASE_MAX_STAMINA: f32 = 100.0;
    /// Extra max stamina per level
    pub const STAMINA_PER_LEVEL: f32 = 8.0;

    /// Vehicles
    pub const VEHICLE_BASE_WIDTH: f32 = 42.0;
    /// Vehicle height as a fraction of its lane band
    pub const VEHICLE_HEIGHT_RATIO: f32 = 0.6;
    pub const MIN_VEHICLES_PER_LANE: u32 = 5;
    pub const MAX_VEHICLES_PER_LANE: u32 = 8;
    pub const FAST_SPEED_FACTOR: f32 = 1.35;
    pub const SLOW_SPEED_FACTOR: f32 = 0.75;
    /// Both speed phases last this long (seconds)
    pub const SPEED_PHASE_DURATION: f32 = 1.5;

    /// Monsters
    pub const GROUND_MONSTER_SIZE: f32 = 18.0;
    pub const GROUND_PATROL_MARGIN: f32 = 40.0;
    pub const AIR_MONSTER_SIZE: f32 = 16.0;

    /// Coins
    pub const COIN_RADIUS: f32 = 6.0;
    pub const COIN_EDGE_PADDING: f32 = 14.0;
    pub const COIN_ATTEMPTS_PER_COIN: u32 = 30;
}
