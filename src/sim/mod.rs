//! Simulation core
//!
//! All gameplay logic lives here:
//! - Input arrives as an `InputSnapshot`, dt from the caller
//! - Randomness only through an injected `RandomSource`
//! - No rendering, audio or platform dependencies

pub mod coins;
pub mod collision;
pub mod entities;
pub mod hud;
pub mod phase;
pub mod player;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;

pub use coins::{can_win, collect_coin, should_collect_coin};
pub use collision::{Aabb, aabb_intersects};
pub use entities::{AirMonster, Coin, GroundMonster, Heading, SpeedPhase, SpeedPhaseKind, Vehicle};
pub use hud::HudView;
pub use phase::{GamePhase, PhaseEvent, Transition, transition};
pub use player::{Player, StaminaRates};
pub use rng::{RandomSource, ScriptedRng, SimRng};
pub use spawn::{Playfield, build_air_monsters, build_coins, build_ground_monsters, build_vehicles};
pub use state::{Game, GameEvent, LevelState};
pub use tick::tick;
