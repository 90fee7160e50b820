//! Per-tick play simulation
//!
//! Runs only in `GamePhase::Play`. Order within a tick is fixed: pause
//! request, player sub-model, vehicles, ground monsters, air monsters,
//! collisions, coins, win test. A lethal hit ends the tick on the spot.

use super::coins::{can_win, collect_coin, should_collect_coin};
use super::collision::aabb_intersects;
use super::phase::{GamePhase, PhaseEvent};
use super::rng::RandomSource;
use super::spawn::Playfield;
use super::state::{Game, GameEvent, LevelState};
use crate::input::InputSnapshot;

/// What a single play step produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct StepReport {
    lethal: bool,
    coins_gained: u32,
    cleared: bool,
}

/// Advance the play simulation by `dt`
pub fn tick<R: RandomSource>(game: &mut Game<R>, input: &InputSnapshot, dt: f32) {
    if game.phase != GamePhase::Play {
        return;
    }

    if input.pause {
        game.apply(PhaseEvent::TogglePause);
        return;
    }

    let Some(level) = game.level.as_mut() else {
        log::warn!("Play tick without a level, ignoring");
        return;
    };
    let report = step_level(level, &game.field, &mut game.rng, input, dt);

    if report.lethal {
        game.apply(PhaseEvent::Lethal);
        return;
    }
    if report.coins_gained > 0 {
        game.emit(GameEvent::CoinCollected);
    }
    if report.cleared {
        game.apply(PhaseEvent::Cleared);
    }
}

fn step_level(
    level: &mut LevelState,
    field: &Playfield,
    rng: &mut impl RandomSource,
    input: &InputSnapshot,
    dt: f32,
) -> StepReport {
    let movement = input.movement();
    let rates = level.config.stamina_rates();

    // Player
    let player = &mut level.player;
    if input.dash {
        player.try_start_dash(movement);
    }
    player.toggle_flight(input.flight_toggle);
    player.advance_dash(dt);
    player.update_stamina(dt, &rates);
    player.enforce_stamina_cutoff();
    player.apply_movement(movement, dt);
    player.clamp_to(field);

    // Hazards
    for vehicle in &mut level.vehicles {
        vehicle.update(dt, field.width, rng);
    }
    for monster in &mut level.ground_monsters {
        monster.update(dt);
    }
    for monster in &mut level.air_monsters {
        monster.update(dt, player.pos, player.is_flying);
    }

    // Collisions
    let body = player.bounds();
    let grounded_hit = !player.is_flying
        && (level.vehicles.iter().any(|v| aabb_intersects(&body, &v.bounds()))
            || level
                .ground_monsters
                .iter()
                .any(|m| aabb_intersects(&body, &m.bounds())));
    let air_hit = level
        .air_monsters
        .iter()
        .any(|m| m.active && aabb_intersects(&body, &m.bounds()));
    if grounded_hit || air_hit {
        return StepReport {
            lethal: true,
            ..Default::default()
        };
    }

    // Coins
    let target = level.config.coin_target;
    let before = level.coins_collected;
    for coin in level.coins.iter_mut().filter(|c| !c.collected) {
        let can_collect = should_collect_coin(player, coin);
        level.coins_collected = collect_coin(level.coins_collected, target, coin, can_collect);
    }

    StepReport {
        lethal: false,
        coins_gained: level.coins_collected - before,
        cleared: can_win(
            level.coins_collected,
            target,
            player.pos.y,
            field.road_top(),
            player.size.y,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::entities::Coin;
    use crate::sim::rng::ScriptedRng;
    use glam::Vec2;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    /// Level started and in play. The scripted rng never reverses a vehicle.
    fn playing(level: i32) -> Game<ScriptedRng> {
        let mut game = Game::new(
            Playfield::default(),
            Settings::default(),
            ScriptedRng::constant(0.99),
        );
        game.start_level(level);
        game.phase = GamePhase::Play;
        game
    }

    fn level_mut(game: &mut Game<ScriptedRng>) -> &mut LevelState {
        game.level.as_mut().unwrap()
    }

    fn idle() -> InputSnapshot {
        InputSnapshot::default()
    }

    fn vehicle_positions(game: &Game<ScriptedRng>) -> Vec<Vec2> {
        game.level().unwrap().vehicles.iter().map(|v| v.pos).collect()
    }

    #[test]
    fn test_dash_covers_exact_distance() {
        let mut game = playing(1);
        let toggle = InputSnapshot {
            flight_toggle: true,
            ..Default::default()
        };

        // Burn some stamina in the air, then land and wait for a full bar
        game.update(DT, &toggle);
        assert!(game.level().unwrap().player.is_flying);
        for _ in 0..30 {
            game.update(DT, &idle());
        }
        game.update(DT, &toggle);
        let player = &game.level().unwrap().player;
        assert!(!player.is_flying);
        assert!(player.stamina < player.max_stamina);

        let mut ticks = 0;
        while {
            let p = &game.level().unwrap().player;
            p.stamina < p.max_stamina
        } {
            assert!(ticks < 2000, "stamina never refilled");
            game.update(DT, &idle());
            ticks += 1;
        }
        assert!(ticks > 0);
        let start = game.level().unwrap().player.pos;

        let dash = InputSnapshot {
            keys: Vec2::X,
            dash: true,
            ..Default::default()
        };
        game.update(DT, &dash);
        assert!(game.level().unwrap().player.is_dashing());

        for _ in 0..30 {
            game.update(DT, &idle());
        }

        let player = &game.level().unwrap().player;
        assert!(!player.is_dashing());
        assert_eq!(game.phase(), GamePhase::Play);
        let moved = player.pos - start;
        assert!((moved.x - 320.0 * 0.18).abs() < 1e-3, "moved {moved:?}");
        assert_eq!(moved.y, 0.0);
    }

    #[test]
    fn test_vehicle_hit_fails_same_tick_and_freezes() {
        let mut game = playing(1);
        {
            let level = level_mut(&mut game);
            let player_pos = level.player.pos;
            level.vehicles[0].pos = player_pos;
            level.vehicles[0].speed = 0.0;
            level.vehicles[0].reverse_cooldown = 100.0;
            level.coins.push(Coin::new(player_pos + Vec2::splat(9.0), 6.0));
        }

        game.update(DT, &idle());
        assert_eq!(game.phase(), GamePhase::Fail);
        assert_eq!(game.events(), &[GameEvent::Failure]);
        assert_eq!(game.coins_collected(), 0);

        let frozen = vehicle_positions(&game);
        let player = game.level().unwrap().player.pos;
        for _ in 0..10 {
            game.update(DT, &idle());
        }
        assert_eq!(vehicle_positions(&game), frozen);
        assert_eq!(game.level().unwrap().player.pos, player);
    }

    #[test]
    fn test_flying_skips_ground_hazards() {
        let mut game = playing(2);
        {
            let level = level_mut(&mut game);
            level.player.is_flying = true;
            let player_pos = level.player.pos;
            level.vehicles[0].pos = player_pos;
            level.vehicles[0].speed = 0.0;
            level.vehicles[0].reverse_cooldown = 100.0;
        }
        game.update(DT, &idle());
        assert_eq!(game.phase(), GamePhase::Play);
        assert!(game.level().unwrap().air_monsters.iter().all(|m| m.active));
    }

    #[test]
    fn test_air_monster_catches_flying_player() {
        let mut game = playing(1);
        {
            let level = level_mut(&mut game);
            level.player.is_flying = true;
            level.air_monsters[0].pos = level.player.pos + Vec2::new(4.0, 0.0);
        }
        game.update(DT, &idle());
        assert_eq!(game.phase(), GamePhase::Fail);
    }

    #[test]
    fn test_stamina_cutoff_grounds_before_air_check() {
        let mut game = playing(1);
        {
            let level = level_mut(&mut game);
            level.player.is_flying = true;
            level.player.stamina = 0.1;
            level.air_monsters[0].pos = level.player.pos;
        }
        game.update(DT, &idle());
        let level = game.level().unwrap();
        assert_eq!(game.phase(), GamePhase::Play);
        assert_eq!(level.player.stamina, 0.0);
        assert!(!level.player.is_flying);
        assert!(!level.air_monsters[0].active);
    }

    #[test]
    fn test_pause_freezes_entities() {
        let mut game = playing(3);
        game.update(DT, &idle());
        let pause = InputSnapshot {
            pause: true,
            ..Default::default()
        };

        game.update(DT, &pause);
        assert_eq!(game.phase(), GamePhase::Pause);
        assert_eq!(game.events(), &[GameEvent::UiClick]);

        let frozen = vehicle_positions(&game);
        let player = game.level().unwrap().player.clone();
        let moving = InputSnapshot {
            keys: Vec2::Y,
            dash: true,
            ..Default::default()
        };
        for _ in 0..20 {
            game.update(DT, &moving);
        }
        assert_eq!(vehicle_positions(&game), frozen);
        assert_eq!(game.level().unwrap().player.pos, player.pos);
        assert_eq!(game.level().unwrap().player.stamina, player.stamina);

        game.update(DT, &pause);
        assert_eq!(game.phase(), GamePhase::Play);
        assert_eq!(vehicle_positions(&game), frozen);
    }

    #[test]
    fn test_coin_event_fires_once_per_tick() {
        let mut game = playing(1);
        {
            let level = level_mut(&mut game);
            let centre = level.player.pos + Vec2::splat(9.0);
            level.coins.clear();
            level.coins.push(Coin::new(centre, 6.0));
            level.coins.push(Coin::new(centre + Vec2::new(2.0, 0.0), 6.0));
        }
        game.update(DT, &idle());
        assert_eq!(game.coins_collected(), 2);
        assert_eq!(game.events(), &[GameEvent::CoinCollected]);

        game.update(DT, &idle());
        assert_eq!(game.coins_collected(), 2);
        assert!(game.events().is_empty());
    }

    #[test]
    fn test_safe_zone_without_coins_does_not_win() {
        let mut game = playing(1);
        {
            let level = level_mut(&mut game);
            level.player.pos.y = 20.0;
            level.coins_collected = 8;
        }
        game.update(DT, &idle());
        assert_eq!(game.phase(), GamePhase::Play);
    }

    #[test]
    fn test_win_advances_to_next_level() {
        let mut game = playing(1);
        {
            let level = level_mut(&mut game);
            level.player.pos.y = 40.0;
            level.coins_collected = 9;
        }
        game.update(DT, &idle());
        assert_eq!(game.phase(), GamePhase::Win);
        assert_eq!(game.events(), &[GameEvent::Success]);

        let confirm = InputSnapshot {
            confirm: true,
            ..Default::default()
        };
        game.update(DT, &confirm);
        assert_eq!(game.phase(), GamePhase::Play);
        assert_eq!(game.level_index(), 2);
        assert_eq!(game.coins_collected(), 0);
        assert_eq!(game.level().unwrap().config.level, 2);
    }

    #[test]
    fn test_final_win_completes_then_returns_to_title() {
        let mut game = playing(9);
        {
            let level = level_mut(&mut game);
            level.player.pos.y = 40.0;
            level.coins_collected = 9;
        }
        game.update(DT, &idle());
        assert_eq!(game.phase(), GamePhase::Win);

        let confirm = InputSnapshot {
            confirm: true,
            ..Default::default()
        };
        game.update(DT, &confirm);
        assert_eq!(game.phase(), GamePhase::Complete);
        assert_eq!(game.level_index(), 9);

        game.update(DT, &confirm);
        assert_eq!(game.phase(), GamePhase::Title);

        game.update(DT, &confirm);
        assert_eq!(game.phase(), GamePhase::Play);
        assert_eq!(game.level_index(), 1);
    }

    #[test]
    fn test_fail_confirm_restarts_same_level() {
        let mut game = playing(5);
        {
            let level = level_mut(&mut game);
            level.ground_monsters[0].pos = level.player.pos;
            level.ground_monsters[0].speed = 0.0;
        }
        game.update(DT, &idle());
        assert_eq!(game.phase(), GamePhase::Fail);

        let confirm = InputSnapshot {
            confirm: true,
            ..Default::default()
        };
        game.update(DT, &confirm);
        assert_eq!(game.phase(), GamePhase::Play);
        assert_eq!(game.level_index(), 5);
        assert_eq!(game.events(), &[GameEvent::UiClick]);
        let level = game.level().unwrap();
        assert!(level.ground_monsters[0].speed > 0.0);
    }

    #[test]
    fn test_determinism() {
        let mut a = Game::with_seed(99999);
        let mut b = Game::with_seed(99999);
        let inputs = [
            InputSnapshot {
                confirm: true,
                ..Default::default()
            },
            InputSnapshot {
                keys: Vec2::new(0.6, -0.8),
                ..Default::default()
            },
            InputSnapshot {
                keys: Vec2::X,
                dash: true,
                ..Default::default()
            },
            InputSnapshot::default(),
        ];
        for input in inputs.iter().cycle().take(120) {
            a.update(DT, input);
            b.update(DT, input);
        }
        assert_eq!(a.phase(), b.phase());
        let (la, lb) = (a.level().unwrap(), b.level().unwrap());
        assert_eq!(la.player.pos, lb.player.pos);
        assert_eq!(la.vehicles, lb.vehicles);
        assert_eq!(la.coins, lb.coins);
    }

    proptest! {
        #[test]
        fn stamina_and_mode_invariants_hold(
            steps in prop::collection::vec(
                (-1.0f32..1.0, -1.0f32..1.0, any::<bool>(), any::<bool>(), 0.001f32..0.05),
                1..200,
            ),
        ) {
            let mut game = Game::with_seed(42);
            game.start_level(3);
            game.phase = GamePhase::Play;

            for (x, y, dash, flight, dt) in steps {
                let input = InputSnapshot {
                    keys: Vec2::new(x, y).clamp_length_max(1.0),
                    dash,
                    flight_toggle: flight,
                    ..Default::default()
                };
                game.update(dt, &input);

                let player = &game.level().unwrap().player;
                prop_assert!(player.stamina >= 0.0 && player.stamina <= player.max_stamina);
                prop_assert!(player.dash_time_remaining >= 0.0);
                prop_assert!(!(player.is_flying && player.is_dashing()));
                if player.stamina == 0.0 {
                    prop_assert!(!player.is_flying);
                }
                let field = game.field();
                prop_assert!(player.pos.x >= 0.0 && player.pos.x <= field.width - player.size.x);
                prop_assert!(player.pos.y >= 0.0 && player.pos.y <= field.height - player.size.y);
            }
        }
    }
}
