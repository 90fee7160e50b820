//! Player sprite and its stamina / dash / flight sub-model
//!
//! The movement modes are implicit in three values: `is_flying`,
//! `dash_time_remaining` (0 = not dashing) and `stamina`. Stamina gates both
//! modes; a dash cannot start while flying.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::spawn::Playfield;
use crate::consts::*;

/// Per-second stamina rates for the current level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaminaRates {
    pub fly_drain_per_sec: f32,
    pub dash_drain_per_sec: f32,
    pub regen_per_sec: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub dash_speed: f32,
    pub dash_duration: f32,
    pub dash_time_remaining: f32,
    /// Direction locked in when the dash started
    pub dash_vector: Vec2,
    /// Dash time consumed by the current tick (0 when not dashing)
    #[serde(default)]
    pub dash_step: f32,
    pub stamina: f32,
    pub max_stamina: f32,
    pub is_flying: bool,
}

impl Player {
    /// Fresh player for a level; max stamina grows with the level
    pub fn new(level: u32) -> Self {
        let max_stamina = BASE_MAX_STAMINA + level as f32 * STAMINA_PER_LEVEL;
        Self {
            pos: Vec2::ZERO,
            size: Vec2::splat(PLAYER_SIZE),
            speed: PLAYER_SPEED,
            dash_speed: DASH_SPEED,
            dash_duration: DASH_DURATION,
            dash_time_remaining: 0.0,
            dash_vector: Vec2::ZERO,
            dash_step: 0.0,
            stamina: max_stamina,
            max_stamina,
            is_flying: false,
        }
    }

    /// Place the player horizontally centred in the bottom safe zone
    pub fn spawn_in(&mut self, field: &Playfield) {
        self.pos = Vec2::new(
            field.width / 2.0 - self.size.x / 2.0,
            field.height - SAFE_ZONE_HEIGHT / 2.0 - self.size.y / 2.0,
        );
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn is_dashing(&self) -> bool {
        self.dash_time_remaining > 0.0
    }

    /// Start a dash along `input`. Returns whether it started.
    pub fn try_start_dash(&mut self, input: Vec2) -> bool {
        if self.is_flying || self.is_dashing() || self.stamina <= 0.0 || input == Vec2::ZERO {
            return false;
        }
        self.dash_vector = input;
        self.dash_time_remaining = self.dash_duration;
        true
    }

    /// Flip flight on request. Landing always works; take-off needs stamina
    /// and ends any running dash.
    pub fn toggle_flight(&mut self, requested: bool) {
        if !requested {
            return;
        }
        if self.is_flying {
            self.is_flying = false;
        } else if self.stamina > 0.0 {
            self.is_flying = true;
            self.dash_time_remaining = 0.0;
            self.dash_step = 0.0;
        }
    }

    /// Consume up to `dt` of the running dash
    pub fn advance_dash(&mut self, dt: f32) {
        self.dash_step = dt.min(self.dash_time_remaining).max(0.0);
        self.dash_time_remaining = (self.dash_time_remaining - dt).max(0.0);
    }

    pub fn update_stamina(&mut self, dt: f32, rates: &StaminaRates) {
        let stamina = if self.is_flying {
            self.stamina - rates.fly_drain_per_sec * dt
        } else if self.dash_step > 0.0 {
            self.stamina - rates.dash_drain_per_sec * self.dash_step
        } else {
            self.stamina + rates.regen_per_sec * dt
        };
        self.stamina = stamina.clamp(0.0, self.max_stamina);
    }

    /// Neither movement mode survives an empty stamina bar
    pub fn enforce_stamina_cutoff(&mut self) {
        if self.stamina <= 0.0 {
            self.stamina = 0.0;
            self.is_flying = false;
            self.dash_time_remaining = 0.0;
            self.dash_step = 0.0;
        }
    }

    /// Dash overrides steering while it has time left this tick
    pub fn apply_movement(&mut self, input: Vec2, dt: f32) {
        if self.dash_step > 0.0 {
            self.pos += self.dash_vector * self.dash_speed * self.dash_step;
        } else {
            self.pos += input * self.speed * dt;
        }
    }

    pub fn clamp_to(&mut self, field: &Playfield) {
        self.pos.x = self.pos.x.clamp(0.0, (field.width - self.size.x).max(0.0));
        self.pos.y = self.pos.y.clamp(0.0, (field.height - self.size.y).max(0.0));
    }

    /// 0..1 fill of the stamina bar
    pub fn stamina_ratio(&self) -> f32 {
        if self.max_stamina > 0.0 {
            self.stamina / self.max_stamina
        } else {
            0.0
        }
    }
}
