//! HUD read-model
//!
//! Numbers the overlay draws, derived from state after `update` returns.

use super::spawn::Playfield;
use super::state::LevelState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudView {
    /// Stamina bar fill (0..1)
    pub stamina_ratio: f32,
    /// Remaining dash time as a fraction of the full dash, while dashing
    pub dash_ratio: Option<f32>,
    pub level: u32,
    pub coins_collected: u32,
    pub coin_target: u32,
    pub is_flying: bool,
    /// Player is in the far safe zone but short of the coin target
    pub show_coin_hint: bool,
}

impl HudView {
    pub fn new(level_index: u32, level: &LevelState, field: &Playfield) -> Self {
        let player = &level.player;
        let dash_ratio = (player.is_dashing() && player.dash_duration > 0.0)
            .then(|| player.dash_time_remaining / player.dash_duration);
        let in_far_zone = player.pos.y <= field.road_top() - player.size.y / 2.0;

        Self {
            stamina_ratio: player.stamina_ratio(),
            dash_ratio,
            level: level_index,
            coins_collected: level.coins_collected,
            coin_target: level.config.coin_target,
            is_flying: player.is_flying,
            show_coin_hint: in_far_zone && level.coins_collected < level.config.coin_target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Game;

    fn level_one() -> Game {
        let mut game = Game::with_seed(11);
        game.start_level(1);
        game
    }

    #[test]
    fn test_fresh_level_hud() {
        let game = level_one();
        let hud = HudView::new(game.level_index(), game.level().unwrap(), game.field());
        assert_eq!(hud.stamina_ratio, 1.0);
        assert_eq!(hud.dash_ratio, None);
        assert_eq!((hud.level, hud.coins_collected, hud.coin_target), (1, 0, 9));
        assert!(!hud.show_coin_hint);
    }

    #[test]
    fn test_coin_hint_in_far_zone() {
        let mut game = level_one();
        let level = game.level.as_mut().unwrap();
        level.player.pos.y = 30.0;
        level.coins_collected = 4;
        let hud = HudView::new(1, game.level().unwrap(), game.field());
        assert!(hud.show_coin_hint);

        let level = game.level.as_mut().unwrap();
        level.coins_collected = 9;
        let hud = HudView::new(1, game.level().unwrap(), game.field());
        assert!(!hud.show_coin_hint);
    }

    #[test]
    fn test_dash_ratio_while_dashing() {
        let mut game = level_one();
        let player = &mut game.level.as_mut().unwrap().player;
        assert!(player.try_start_dash(glam::Vec2::X));
        player.advance_dash(0.09);
        let hud = HudView::new(1, game.level().unwrap(), game.field());
        let ratio = hud.dash_ratio.unwrap();
        assert!((ratio - 0.5).abs() < 1e-4);
    }
}
