//! Coin pickup and the win condition

use super::collision::aabb_intersects;
use super::entities::Coin;
use super::player::Player;

/// Grounded player overlapping the coin's box
pub fn should_collect_coin(player: &Player, coin: &Coin) -> bool {
    !player.is_flying && aabb_intersects(&player.bounds(), &coin.bounds())
}

/// Collect `coin` if allowed, returning the new running count
///
/// Already-collected coins and coins beyond the target leave the count alone.
pub fn collect_coin(current: u32, target: u32, coin: &mut Coin, can_collect: bool) -> u32 {
    if !can_collect || coin.collected || current >= target {
        return current;
    }
    coin.collected = true;
    current + 1
}

/// Enough coins and the player has reached the far safe zone
pub fn can_win(coin_count: u32, target: u32, player_y: f32, road_top: f32, player_h: f32) -> bool {
    coin_count >= target && player_y <= road_top - player_h / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn player_at(x: f32, y: f32) -> Player {
        let mut p = Player::new(1);
        p.pos = Vec2::new(x, y);
        p
    }

    #[test]
    fn test_overlap_collects_when_grounded() {
        let coin = Coin::new(Vec2::new(110.0, 110.0), 6.0);
        assert!(should_collect_coin(&player_at(100.0, 100.0), &coin));
        assert!(!should_collect_coin(&player_at(300.0, 100.0), &coin));
    }

    #[test]
    fn test_flying_player_cannot_collect() {
        let coin = Coin::new(Vec2::new(110.0, 110.0), 6.0);
        let mut p = player_at(100.0, 100.0);
        p.is_flying = true;
        assert!(!should_collect_coin(&p, &coin));
    }

    #[test]
    fn test_edge_contact_does_not_collect() {
        // Player spans x 100..118, coin box spans 118..130
        let coin = Coin::new(Vec2::new(124.0, 109.0), 6.0);
        assert!(!should_collect_coin(&player_at(100.0, 100.0), &coin));
    }

    #[test]
    fn test_collect_is_idempotent() {
        let mut coin = Coin::new(Vec2::ZERO, 6.0);
        let count = collect_coin(0, 9, &mut coin, true);
        assert_eq!(count, 1);
        assert!(coin.collected);
        assert_eq!(collect_coin(count, 9, &mut coin, true), 1);
    }

    #[test]
    fn test_collect_respects_flag_and_target() {
        let mut coin = Coin::new(Vec2::ZERO, 6.0);
        assert_eq!(collect_coin(3, 9, &mut coin, false), 3);
        assert!(!coin.collected);
        assert_eq!(collect_coin(9, 9, &mut coin, true), 9);
        assert!(!coin.collected);
    }

    #[test]
    fn test_can_win_needs_both_conditions() {
        assert!(!can_win(8, 9, 40.0, 60.0, 18.0));
        assert!(can_win(9, 9, 40.0, 60.0, 18.0));
        assert!(!can_win(9, 9, 200.0, 60.0, 18.0));
        assert!(can_win(9, 9, 51.0, 60.0, 18.0));
        assert!(!can_win(9, 9, 51.5, 60.0, 18.0));
    }
}
