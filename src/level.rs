//! Level generation
//!
//! Difficulty scaling is a pure function of the level index. Only entity
//! instantiation (see `sim::spawn`) draws random numbers.

use serde::{Deserialize, Serialize};

use crate::consts::LEVEL_COUNT;
use crate::sim::entities::Heading;
use crate::sim::player::StaminaRates;

/// One horizontal band of road
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneConfig {
    pub index: u32,
    pub direction: Heading,
    /// Base speed before the user speed scale (units/sec)
    pub speed: f32,
    pub vehicle_count: u32,
}

/// Immutable per-level tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Clamped level index (1..=9)
    pub level: u32,
    pub lanes: Vec<LaneConfig>,
    pub ground_monster_count: u32,
    pub air_monster_count: u32,
    pub stamina_regen_per_sec: f32,
    pub fly_drain_per_sec: f32,
    pub dash_drain_per_sec: f32,
    /// Probability that a vehicle alternates fast/slow phases
    pub variable_speed_chance: f32,
    pub vehicle_length_range: (f32, f32),
    pub coin_count: u32,
    pub coin_target: u32,
    pub coin_spread: f32,
    pub reverse_chance: f32,
    pub vehicle_count_per_lane: u32,
}

impl LevelConfig {
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Slowest and fastest lane base speeds
    pub fn speed_range(&self) -> (f32, f32) {
        self.lanes
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), lane| {
                (lo.min(lane.speed), hi.max(lane.speed))
            })
    }

    pub fn stamina_rates(&self) -> StaminaRates {
        StaminaRates {
            fly_drain_per_sec: self.fly_drain_per_sec,
            dash_drain_per_sec: self.dash_drain_per_sec,
            regen_per_sec: self.stamina_regen_per_sec,
        }
    }
}

/// Clamp any level index into 1..=9
#[inline]
pub fn clamp_level(level: i32) -> u32 {
    level.clamp(1, LEVEL_COUNT as i32) as u32
}

/// Minimum-distance knob for coin placement at a level
pub fn coin_spread(level: i32) -> f32 {
    0.2 + clamp_level(level) as f32 * 0.06
}

/// Build the configuration for a level
pub fn generate_level(level: i32) -> LevelConfig {
    let level = clamp_level(level);
    let lane_count = 3 + level;
    let base_speed = 60.0 + level as f32 * 12.0;

    let lanes = (0..lane_count)
        .map(|index| LaneConfig {
            index,
            direction: if index % 2 == 0 {
                Heading::Forward
            } else {
                Heading::Reverse
            },
            speed: base_speed + index as f32 * 6.0,
            vehicle_count: 2 + level / 2,
        })
        .collect();

    LevelConfig {
        level,
        lanes,
        ground_monster_count: level / 2,
        air_monster_count: level.div_ceil(2).max(1),
        stamina_regen_per_sec: 10.0,
        fly_drain_per_sec: 20.0,
        dash_drain_per_sec: 25.0,
        variable_speed_chance: (0.15 + level as f32 * 0.05).min(0.6),
        vehicle_length_range: (0.7, 1.3),
        coin_count: 15,
        coin_target: 9,
        coin_spread: coin_spread(level as i32),
        reverse_chance: (0.1 + level as f32 * 0.01).min(0.2),
        vehicle_count_per_lane: (5 + level / 3).min(8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_level_one_layout() {
        let config = generate_level(1);
        assert_eq!(config.level, 1);
        assert_eq!(config.lane_count(), 4);
        assert_eq!(config.lanes[0].speed, 72.0);
        assert_eq!(config.lanes[3].speed, 90.0);
        assert_eq!(config.lanes[0].direction, Heading::Forward);
        assert_eq!(config.lanes[1].direction, Heading::Reverse);
        assert_eq!(config.ground_monster_count, 0);
        assert_eq!(config.air_monster_count, 1);
        assert_eq!(config.vehicle_count_per_lane, 5);
    }

    #[test]
    fn test_level_nine_caps() {
        let config = generate_level(9);
        assert_eq!(config.lane_count(), 12);
        assert_eq!(config.ground_monster_count, 4);
        assert_eq!(config.air_monster_count, 5);
        assert!((config.variable_speed_chance - 0.6).abs() < 1e-6);
        assert!((config.reverse_chance - 0.19).abs() < 1e-6);
        assert_eq!(config.vehicle_count_per_lane, 8);
    }

    #[test]
    fn test_out_of_range_levels_clamp() {
        assert_eq!(generate_level(0), generate_level(1));
        assert_eq!(generate_level(-7), generate_level(1));
        assert_eq!(generate_level(42), generate_level(9));
    }

    #[test]
    fn test_higher_levels_widen_speed_range() {
        let low = generate_level(1).speed_range();
        let high = generate_level(9).speed_range();
        assert!(high.1 - high.0 > low.1 - low.0);
        assert!(high.0 > low.0);
    }

    #[test]
    fn test_coin_spread_increases_with_level() {
        assert!(coin_spread(9) > coin_spread(1));
    }

    #[test]
    fn test_monotonic_difficulty() {
        for level in 1..9 {
            let a = generate_level(level);
            let b = generate_level(level + 1);
            assert!(b.lanes[0].speed >= a.lanes[0].speed);
            assert!(b.reverse_chance >= a.reverse_chance);
            assert!(b.coin_spread >= a.coin_spread);
            assert!(b.variable_speed_chance >= a.variable_speed_chance);
        }
    }

    proptest! {
        #[test]
        fn generation_is_pure_and_keeps_coin_rules(level in -20i32..40) {
            let a = generate_level(level);
            let b = generate_level(level);
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(a.lane_count() as u32, 3 + a.level);
            prop_assert_eq!(a.coin_target, 9);
            prop_assert_eq!(a.coin_count, 15);
            prop_assert!((1..=9).contains(&a.level));
        }
    }
}
