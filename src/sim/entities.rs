//! Level entities and their per-tick updates
//!
//! Entities are plain data; all mutation goes through the `update` methods
//! below, called by the play tick in a fixed order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::rng::RandomSource;

/// Direction of horizontal travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    /// Left to right (+1)
    Forward,
    /// Right to left (-1)
    Reverse,
}

impl Heading {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Heading::Forward => 1.0,
            Heading::Reverse => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Heading::Forward => Heading::Reverse,
            Heading::Reverse => Heading::Forward,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedPhaseKind {
    Fast,
    Slow,
}

/// Fast/slow alternation for variable-speed vehicles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedPhase {
    pub phase: SpeedPhaseKind,
    /// Time spent in the current phase
    pub phase_time: f32,
    pub fast_speed: f32,
    pub slow_speed: f32,
    pub fast_duration: f32,
    pub slow_duration: f32,
}

impl SpeedPhase {
    fn duration(&self) -> f32 {
        match self.phase {
            SpeedPhaseKind::Fast => self.fast_duration,
            SpeedPhaseKind::Slow => self.slow_duration,
        }
    }

    /// Advance the phase timer and return the speed for this tick
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.phase_time += dt;
        if self.phase_time >= self.duration() {
            self.phase_time = 0.0;
            self.phase = match self.phase {
                SpeedPhaseKind::Fast => SpeedPhaseKind::Slow,
                SpeedPhaseKind::Slow => SpeedPhaseKind::Fast,
            };
        }
        match self.phase {
            SpeedPhaseKind::Fast => self.fast_speed,
            SpeedPhaseKind::Slow => self.slow_speed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub lane: u32,
    pub heading: Heading,
    pub speed: f32,
    /// Present only for variable-speed vehicles
    pub speed_phase: Option<SpeedPhase>,
    pub reverse_chance: f32,
    pub reverse_cooldown: f32,
    /// 0xRRGGBB body colour
    pub color: u32,
}

/// Cooldown after a reversal, in [3, 5) seconds
const REVERSE_COOLDOWN_MIN: f32 = 3.0;
const REVERSE_COOLDOWN_MAX: f32 = 5.0;

impl Vehicle {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    pub fn is_variable(&self) -> bool {
        self.speed_phase.is_some()
    }

    /// Count the cooldown down; once it is spent, maybe turn around
    pub fn maybe_reverse(&mut self, dt: f32, chance: f32, rng: &mut impl RandomSource) -> bool {
        self.reverse_cooldown = (self.reverse_cooldown - dt).max(0.0);
        if self.reverse_cooldown > 0.0 {
            return false;
        }
        if rng.next_f32() < chance {
            self.heading = self.heading.flipped();
            self.reverse_cooldown = rng.between(REVERSE_COOLDOWN_MIN, REVERSE_COOLDOWN_MAX);
            return true;
        }
        false
    }

    /// Reverse check, then speed phase, then travel with toroidal wrap
    pub fn update(&mut self, dt: f32, width: f32, rng: &mut impl RandomSource) {
        self.maybe_reverse(dt, self.reverse_chance, rng);

        if let Some(phase) = self.speed_phase.as_mut() {
            self.speed = phase.advance(dt);
        }

        self.pos.x += self.speed * self.heading.sign() * dt;
        match self.heading {
            Heading::Forward if self.pos.x > width => self.pos.x = -self.size.x,
            Heading::Reverse if self.pos.x + self.size.x < 0.0 => self.pos.x = width,
            _ => {}
        }
    }
}

/// Patrols horizontally between two bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundMonster {
    pub pos: Vec2,
    pub size: Vec2,
    pub min_x: f32,
    pub max_x: f32,
    pub speed: f32,
    pub heading: Heading,
}

impl GroundMonster {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    pub fn update(&mut self, dt: f32) {
        self.pos.x += self.speed * self.heading.sign() * dt;
        if self.pos.x <= self.min_x {
            self.pos.x = self.min_x;
            self.heading = Heading::Forward;
        } else if self.pos.x >= self.max_x {
            self.pos.x = self.max_x;
            self.heading = Heading::Reverse;
        }
    }
}

/// Chases the player, but only while the player is airborne
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirMonster {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub active: bool,
}

impl AirMonster {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Plain pursuit toward `target`, no leading
    pub fn update(&mut self, dt: f32, target: Vec2, player_flying: bool) {
        self.active = player_flying;
        if !self.active {
            return;
        }
        let dir = (target - self.pos).normalize_or_zero();
        self.pos += dir * self.speed * dt;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// Centre
    pub pos: Vec2,
    pub radius: f32,
    pub collected: bool,
}

impl Coin {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            radius,
            collected: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::around(self.pos, self.radius)
    }
}
