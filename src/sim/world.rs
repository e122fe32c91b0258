/// World state: the grid plus every live actor and the world clock.
///
/// The clock is plain elapsed seconds; jump grace windows compare
/// against it rather than counting down per-frame timers.

use crate::config::GameConfig;
use crate::domain::grid::TileGrid;
use crate::sim::actor::{Enemy, Player};
use crate::sim::level::Level;

pub struct WorldState {
    pub grid: TileGrid,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    time: f32,
}

impl WorldState {
    pub fn new(level: Level, cfg: &GameConfig) -> Self {
        let player = Player::new(level.player_spawn, &cfg.player);
        let enemies = level
            .enemy_spawns
            .iter()
            .map(|&(kind, spawn)| Enemy::new(kind, spawn, kind.config(cfg)))
            .collect();
        WorldState {
            grid: level.grid,
            player,
            enemies,
            time: 0.0,
        }
    }

    /// Current world-clock reading in seconds.
    pub fn now(&self) -> f32 {
        self.time
    }

    pub(crate) fn advance_clock(&mut self, dt: f32) {
        self.time += dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::EnemyKind;
    use crate::sim::level::demo_level;
    use glam::Vec2;

    #[test]
    fn builds_from_level_and_config() {
        let w = WorldState::new(demo_level(), &GameConfig::default());
        assert_eq!(w.enemies.len(), 2);
        assert_eq!(w.now(), 0.0);
        assert!(w.grid.cols() > 0);
    }

    #[test]
    fn enemy_kinds_pick_their_preset() {
        let cfg = GameConfig::default();
        let w = WorldState::new(demo_level(), &cfg);
        for e in &w.enemies {
            let expected = match e.kind {
                EnemyKind::Grunt => Vec2::from(cfg.grunt.collider),
                EnemyKind::Brute => Vec2::from(cfg.brute.collider),
            };
            assert_eq!(e.kin.collider, expected);
        }
    }
}
