//! Top-level game phases and their transition table
//!
//! Transitions are keyed on `(phase, event)`. Pairs missing from the table
//! are no-ops: `transition` returns `None` and nothing changes.

use serde::{Deserialize, Serialize};

use super::state::GameEvent;
use crate::consts::LEVEL_COUNT;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    Title,
    /// Active simulation
    Play,
    /// Simulation frozen
    Pause,
    /// Level cleared, waiting for confirm
    Win,
    /// Player was hit, waiting for confirm
    Fail,
    /// Final level cleared
    Complete,
}

/// Things that can move the game between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    Confirm,
    TogglePause,
    /// Player touched a hazard
    Lethal,
    /// Player reached the far safe zone with enough coins
    Cleared,
}

/// Result of an accepted transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: GamePhase,
    /// Level to (re)build before entering `next`
    pub start_level: Option<u32>,
    pub cue: GameEvent,
}

impl Transition {
    const fn to(next: GamePhase, cue: GameEvent) -> Self {
        Self {
            next,
            start_level: None,
            cue,
        }
    }

    const fn starting(next: GamePhase, level: u32) -> Self {
        Self {
            next,
            start_level: Some(level),
            cue: GameEvent::UiClick,
        }
    }
}

/// Look up `(phase, event)` in the transition table
pub fn transition(phase: GamePhase, event: PhaseEvent, level_index: u32) -> Option<Transition> {
    use GamePhase::*;
    use PhaseEvent::*;

    let step = match (phase, event) {
        (Title, Confirm) => Transition::starting(Play, 1),
        (Play, TogglePause) => Transition::to(Pause, GameEvent::UiClick),
        (Play, Lethal) => Transition::to(Fail, GameEvent::Failure),
        (Play, Cleared) => Transition::to(Win, GameEvent::Success),
        (Pause, TogglePause) => Transition::to(Play, GameEvent::UiClick),
        (Fail, Confirm) => Transition::starting(Play, level_index),
        (Win, Confirm) if level_index >= LEVEL_COUNT => {
            Transition::to(Complete, GameEvent::UiClick)
        }
        (Win, Confirm) => Transition::starting(Play, level_index + 1),
        (Complete, Confirm) => Transition::to(Title, GameEvent::UiClick),
        _ => return None,
    };
    Some(step)
}
