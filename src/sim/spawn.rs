//! Entity factories
//!
//! Build the concrete vehicle, monster and coin populations for a level.
//! They run once per `start_level` and draw all their randomness from the
//! injected `RandomSource`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::{
    AirMonster, Coin, GroundMonster, Heading, SpeedPhase, SpeedPhaseKind, Vehicle,
};
use super::rng::RandomSource;
use crate::consts::*;
use crate::level::LevelConfig;
use crate::settings::Settings;

/// Vehicle colours keyed by lane direction
pub const FORWARD_VEHICLE_COLOR: u32 = 0xF8575D;
pub const REVERSE_VEHICLE_COLOR: u32 = 0x4BC0FF;

/// Playfield dimensions; the road sits between the two safe zones
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(BASE_WIDTH, BASE_HEIGHT)
    }
}

impl Playfield {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn road_top(&self) -> f32 {
        SAFE_ZONE_HEIGHT
    }

    #[inline]
    pub fn road_bottom(&self) -> f32 {
        self.height - SAFE_ZONE_HEIGHT
    }

    #[inline]
    pub fn road_height(&self) -> f32 {
        self.road_bottom() - self.road_top()
    }
}

/// Vehicles for one lane after the user scale, always within 5..=8
pub fn vehicles_in_lane(config: &LevelConfig, lane_index: u32, count_scale: f32) -> u32 {
    let scaled = (config.vehicle_count_per_lane as f32 * count_scale)
        .round()
        .clamp(0.0, MAX_VEHICLES_PER_LANE as f32) as u32;
    (scaled + lane_index % 2).clamp(MIN_VEHICLES_PER_LANE, MAX_VEHICLES_PER_LANE)
}

pub fn build_vehicles(
    config: &LevelConfig,
    field: &Playfield,
    settings: &Settings,
    rng: &mut impl RandomSource,
) -> Vec<Vehicle> {
    let lane_height = field.road_height() / config.lane_count().max(1) as f32;
    let vehicle_height = lane_height * VEHICLE_HEIGHT_RATIO;
    let mut vehicles = Vec::new();

    for lane in &config.lanes {
        let y = field.road_top()
            + lane.index as f32 * lane_height
            + lane_height * (1.0 - VEHICLE_HEIGHT_RATIO) / 2.0;
        let count = vehicles_in_lane(config, lane.index, settings.vehicle_count_scale);
        let base_speed = lane.speed * settings.speed_scale;
        let color = match lane.direction {
            Heading::Forward => FORWARD_VEHICLE_COLOR,
            Heading::Reverse => REVERSE_VEHICLE_COLOR,
        };

        for v in 0..count {
            let length_scale = rng.between(settings.length_min, settings.length_max);
            let is_variable = rng.next_f32() < config.variable_speed_chance;
            let phase_offset = rng.between(0.0, SPEED_PHASE_DURATION);
            let reverse_cooldown = rng.between(1.0, 3.0);

            vehicles.push(Vehicle {
                pos: Vec2::new((v as f32 * (field.width / count as f32)) % field.width, y),
                size: Vec2::new(VEHICLE_BASE_WIDTH * length_scale, vehicle_height),
                lane: lane.index,
                heading: lane.direction,
                speed: base_speed,
                speed_phase: is_variable.then(|| SpeedPhase {
                    phase: SpeedPhaseKind::Fast,
                    phase_time: phase_offset,
                    fast_speed: base_speed * FAST_SPEED_FACTOR,
                    slow_speed: base_speed * SLOW_SPEED_FACTOR,
                    fast_duration: SPEED_PHASE_DURATION,
                    slow_duration: SPEED_PHASE_DURATION,
                }),
                reverse_chance: settings.reverse_chance,
                reverse_cooldown,
                color,
            });
        }
    }

    vehicles
}

/// Coins scattered over the road with a minimum spacing
///
/// Placement is rejection-sampled for up to `coin_count * 30` attempts; any
/// slots still empty after that are filled without the spacing rule.
pub fn build_coins(
    config: &LevelConfig,
    field: &Playfield,
    rng: &mut impl RandomSource,
) -> Vec<Coin> {
    let min_dist = 18.0 + config.coin_spread * 24.0;
    let target = config.coin_count as usize;
    let max_attempts = config.coin_count * COIN_ATTEMPTS_PER_COIN;
    let mut coins: Vec<Coin> = Vec::with_capacity(target);

    let mut attempts = 0;
    while coins.len() < target && attempts < max_attempts {
        attempts += 1;
        let pos = sample_coin_pos(field, rng);
        if coins.iter().any(|c| c.pos.distance(pos) < min_dist) {
            continue;
        }
        coins.push(Coin::new(pos, COIN_RADIUS));
    }

    if coins.len() < target {
        log::debug!(
            "Coin spacing gave up after {} attempts, placing {} unspaced",
            attempts,
            target - coins.len()
        );
    }
    while coins.len() < target {
        coins.push(Coin::new(sample_coin_pos(field, rng), COIN_RADIUS));
    }

    coins
}

fn sample_coin_pos(field: &Playfield, rng: &mut impl RandomSource) -> Vec2 {
    Vec2::new(
        rng.between(COIN_EDGE_PADDING, field.width - COIN_EDGE_PADDING),
        rng.between(
            field.road_top() + COIN_EDGE_PADDING,
            field.road_bottom() - COIN_EDGE_PADDING,
        ),
    )
}

/// Evenly spaced down the road, alternating the side they start on
pub fn build_ground_monsters(config: &LevelConfig, field: &Playfield) -> Vec<GroundMonster> {
    let count = config.ground_monster_count;
    let spacing = field.road_height() / (count + 1) as f32;
    let min_x = GROUND_PATROL_MARGIN;
    let max_x = field.width - GROUND_PATROL_MARGIN - GROUND_MONSTER_SIZE;

    (0..count)
        .map(|i| {
            let starts_left = i % 2 == 0;
            GroundMonster {
                pos: Vec2::new(
                    if starts_left { min_x } else { max_x },
                    field.road_top() + spacing * (i + 1) as f32 - GROUND_MONSTER_SIZE / 2.0,
                ),
                size: Vec2::splat(GROUND_MONSTER_SIZE),
                min_x,
                max_x,
                speed: 40.0 + i as f32 * 6.0,
                heading: if starts_left {
                    Heading::Forward
                } else {
                    Heading::Reverse
                },
            }
        })
        .collect()
}

/// Stacked near the top-right corner, each one faster than the last
pub fn build_air_monsters(config: &LevelConfig, field: &Playfield) -> Vec<AirMonster> {
    (0..config.air_monster_count)
        .map(|i| AirMonster {
            pos: Vec2::new(field.width - 80.0 - i as f32 * 20.0, 30.0 + i as f32 * 20.0),
            size: Vec2::splat(AIR_MONSTER_SIZE),
            speed: 80.0 + i as f32 * 10.0,
            active: false,
        })
        .collect()
}
