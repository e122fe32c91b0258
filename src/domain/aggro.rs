/// Enemy aggro, chase, and leash behavior.
///
/// The mode (idle / chasing / returning home) is derived fresh every
/// frame from distances; only the `returning_home` hysteresis bit is
/// stored. Two thresholds prevent boundary flicker: return-mode starts
/// past `leash_range + LEASH_EPS` and ends only once both the enemy and
/// the player are back within `leash_range - leash_margin`.
///
/// Locomotion is expressed as a target x for the horizontal model, never
/// a velocity: chasing targets the player offset by the stop distance,
/// returning targets home clamped against overshoot. A ground-ahead
/// probe vetoes either when the next step has no floor.

use glam::Vec2;

use super::grid::TileGrid;
use crate::config::AggroTuning;

/// Hysteresis entry epsilon on the leash boundary.
const LEASH_EPS: f32 = 0.001;

/// Ledge probe reach past the collider's leading edge.
const LEDGE_PROBE_EPS: f32 = 0.1;

/// This frame's locomotion decision for the enemy controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AggroDecision {
    /// Where the horizontal model should steer, if anywhere.
    pub target_x: Option<f32>,
    pub chasing: bool,
    pub returning_home: bool,
    /// Attacks stay allowed (aggro range) even while returning.
    pub may_attack: bool,
    /// The ground-ahead probe vetoed this frame's step; the caller must
    /// cancel horizontal velocity, not merely stop steering.
    pub ledge_blocked: bool,
}

#[derive(Clone, Debug)]
pub struct AggroController {
    tuning: AggroTuning,
    home: Vec2,
    returning_home: bool,
}

impl AggroController {
    /// `home` is fixed at spawn and never moves.
    pub fn new(tuning: AggroTuning, home: Vec2) -> Self {
        AggroController { tuning, home, returning_home: false }
    }

    pub fn home(&self) -> Vec2 {
        self.home
    }

    pub fn is_returning_home(&self) -> bool {
        self.returning_home
    }

    /// Is there solid floor one step ahead in `dir` (+1 right, -1 left)?
    /// Probes half a collider width plus epsilon ahead, at foot height.
    pub fn has_ground_ahead(
        grid: &TileGrid,
        pos: Vec2,
        collider: Vec2,
        dir: f32,
    ) -> bool {
        let ahead_x = pos.x + dir.signum() * (collider.x * 0.5 + LEDGE_PROBE_EPS);
        let foot_y = pos.y - collider.y * 0.5 - LEDGE_PROBE_EPS;
        grid.point_solid(ahead_x, foot_y)
    }

    /// Derive this frame's decision from the already-resolved positions.
    pub fn decide(
        &mut self,
        grid: &TileGrid,
        enemy_pos: Vec2,
        collider: Vec2,
        player_x: f32,
    ) -> AggroDecision {
        let abs_dx = (player_x - enemy_pos.x).abs();
        let in_aggro = abs_dx <= self.tuning.aggro_range;

        let player_from_home = (player_x - self.home.x).abs();
        let enemy_from_home = (enemy_pos.x - self.home.x).abs();
        let leash = self.tuning.leash_range;

        if player_from_home > leash + LEASH_EPS || enemy_from_home > leash + LEASH_EPS {
            self.returning_home = true;
        } else if self.returning_home
            && in_aggro
            && player_from_home <= leash - self.tuning.leash_margin
            && enemy_from_home <= leash - self.tuning.leash_margin
        {
            self.returning_home = false;
        }

        if self.returning_home {
            let dx = self.home.x - enemy_pos.x;
            if dx.abs() <= self.tuning.home_tolerance {
                // Arrived; hold position.
                return AggroDecision {
                    target_x: None,
                    chasing: false,
                    returning_home: true,
                    may_attack: in_aggro,
                    ledge_blocked: false,
                };
            }
            let blocked = !Self::has_ground_ahead(grid, enemy_pos, collider, dx);
            return AggroDecision {
                target_x: if blocked { None } else { Some(self.home.x) },
                chasing: false,
                returning_home: true,
                may_attack: in_aggro,
                ledge_blocked: blocked,
            };
        }

        if !in_aggro {
            return AggroDecision {
                target_x: None,
                chasing: false,
                returning_home: false,
                may_attack: false,
                ledge_blocked: false,
            };
        }

        // Chase: halt just outside melee range, never past the leash.
        let dir = (player_x - enemy_pos.x).signum();
        let raw_target = player_x - dir * self.tuning.desired_stop_distance;
        let target = raw_target.clamp(self.home.x - leash, self.home.x + leash);

        // Already at or past the stop point: hold.
        let step = target - enemy_pos.x;
        if step.abs() < self.tuning.home_tolerance
            || (step != 0.0 && step.signum() != dir && dir != 0.0)
        {
            return AggroDecision {
                target_x: None,
                chasing: true,
                returning_home: false,
                may_attack: true,
                ledge_blocked: false,
            };
        }

        // Edge protection: a missing floor ahead cancels the chase step.
        if !Self::has_ground_ahead(grid, enemy_pos, collider, step) {
            return AggroDecision {
                target_x: None,
                chasing: false,
                returning_home: false,
                may_attack: true,
                ledge_blocked: true,
            };
        }

        AggroDecision {
            target_x: Some(target),
            chasing: true,
            returning_home: false,
            may_attack: true,
            ledge_blocked: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tile::Tile;

    fn tuning() -> AggroTuning {
        AggroTuning {
            aggro_range: 5.0,
            leash_range: 8.0,
            leash_margin: 0.05,
            desired_stop_distance: 1.2,
            home_tolerance: 0.15,
        }
    }

    /// 30-wide strip with a continuous floor at row 0.
    fn floor_grid() -> TileGrid {
        let mut g = TileGrid::new(30, 8);
        for x in 0..30 {
            g.set(x, 0, Tile::Ground);
        }
        g
    }

    /// Floor with a gap at columns 12..=13.
    fn gapped_grid() -> TileGrid {
        let mut g = floor_grid();
        g.set(12, 0, Tile::Empty);
        g.set(13, 0, Tile::Empty);
        g
    }

    const COLLIDER: Vec2 = Vec2::new(0.8, 0.8);

    fn enemy_at(x: f32) -> Vec2 {
        // Standing flush on the floor row.
        Vec2::new(x, 1.4)
    }

    #[test]
    fn idle_outside_aggro_range() {
        let g = floor_grid();
        let mut c = AggroController::new(tuning(), Vec2::new(10.0, 1.4));
        let d = c.decide(&g, enemy_at(10.0), COLLIDER, 16.0);
        assert!(!d.chasing);
        assert!(!d.may_attack);
        assert_eq!(d.target_x, None);
    }

    #[test]
    fn chases_toward_player_with_stop_offset() {
        let g = floor_grid();
        let mut c = AggroController::new(tuning(), Vec2::new(10.0, 1.4));
        let d = c.decide(&g, enemy_at(10.0), COLLIDER, 14.0);
        assert!(d.chasing);
        assert_eq!(d.target_x, Some(14.0 - 1.2));
    }

    #[test]
    fn holds_at_stop_distance() {
        let g = floor_grid();
        let mut c = AggroController::new(tuning(), Vec2::new(10.0, 1.4));
        let d = c.decide(&g, enemy_at(12.85), COLLIDER, 14.0);
        assert!(d.chasing);
        assert_eq!(d.target_x, None);
        assert!(d.may_attack);
    }

    #[test]
    fn chase_target_clamped_to_leash() {
        let g = floor_grid();
        let mut c = AggroController::new(tuning(), Vec2::new(10.0, 1.4));
        // Player at 17.5: within leash (7.5 from home) but close enough
        // to aggro only if the enemy has drifted; use enemy at 14.
        let d = c.decide(&g, enemy_at(14.0), COLLIDER, 17.5);
        assert!(d.chasing);
        // Raw target 16.3, leash cap 18.0: raw wins here.
        assert_eq!(d.target_x, Some(16.3));
    }

    #[test]
    fn leash_scenario_player_walks_out() {
        // aggro=5, leash=8, home=(10,·): chase while |player-enemy|<=5,
        // return once the player passes leash range from home.
        let g = floor_grid();
        let mut c = AggroController::new(tuning(), Vec2::new(10.0, 1.4));
        let enemy = enemy_at(10.0);

        for px in [11.0, 13.0, 15.0] {
            let d = c.decide(&g, enemy, COLLIDER, px);
            assert!(d.chasing, "player at {px} within aggro should chase");
            assert!(!d.returning_home);
        }
        // Player beyond aggro but inside leash: idle, not returning.
        let d = c.decide(&g, enemy, COLLIDER, 17.0);
        assert!(!d.chasing);
        assert!(!d.returning_home);
        // Player past the leash boundary: return mode latches.
        let d = c.decide(&g, enemy, COLLIDER, 18.5);
        assert!(d.returning_home);
    }

    #[test]
    fn hysteresis_holds_until_below_margin() {
        let g = floor_grid();
        let mut c = AggroController::new(tuning(), Vec2::new(10.0, 1.4));
        // Enemy drifted past the leash: return mode on.
        let d = c.decide(&g, enemy_at(18.2), COLLIDER, 18.0);
        assert!(d.returning_home);
        // Player pops back just inside the leash boundary — not enough:
        // must drop below leash - margin with the enemy too.
        let d = c.decide(&g, enemy_at(17.99), COLLIDER, 17.99);
        assert!(d.returning_home, "inside leash but above leash-margin");
        // Both comfortably back inside: releases.
        let d = c.decide(&g, enemy_at(12.0), COLLIDER, 13.0);
        assert!(!d.returning_home);
        assert!(d.chasing);
    }

    #[test]
    fn returning_targets_home_and_allows_attack_in_range() {
        let g = floor_grid();
        let mut c = AggroController::new(tuning(), Vec2::new(10.0, 1.4));
        let d = c.decide(&g, enemy_at(18.5), COLLIDER, 20.0);
        assert!(d.returning_home);
        assert_eq!(d.target_x, Some(10.0));
        assert!(d.may_attack, "player at 20 is within aggro of enemy at 18.5");
        // Out of aggro range while returning: locomotion only.
        let d = c.decide(&g, enemy_at(15.0), COLLIDER, 25.0);
        assert!(!d.may_attack);
        assert_eq!(d.target_x, Some(10.0));
    }

    #[test]
    fn arrival_at_home_holds() {
        let g = floor_grid();
        let mut c = AggroController::new(tuning(), Vec2::new(10.0, 1.4));
        c.returning_home = true;
        let d = c.decide(&g, enemy_at(10.1), COLLIDER, 25.0);
        assert_eq!(d.target_x, None);
        assert!(d.returning_home);
    }

    #[test]
    fn ledge_probe_blocks_chase() {
        let g = gapped_grid();
        let mut c = AggroController::new(tuning(), Vec2::new(10.0, 1.4));
        // Enemy at the lip of the gap (floor missing at 12..=13),
        // player on the far side.
        let d = c.decide(&g, enemy_at(11.5), COLLIDER, 15.0);
        assert_eq!(d.target_x, None);
        assert!(!d.chasing, "chase flag drops when the floor ahead is gone");
        assert!(d.ledge_blocked);
        assert!(d.may_attack);
    }

    #[test]
    fn ledge_probe_blocks_return() {
        let g = gapped_grid();
        let mut c = AggroController::new(tuning(), Vec2::new(10.0, 1.4));
        c.returning_home = true;
        // Returning leftward toward home, gap in the way.
        let d = c.decide(&g, enemy_at(14.4), COLLIDER, 30.0);
        assert_eq!(d.target_x, None);
        assert!(d.ledge_blocked);
        assert!(d.returning_home);
    }

    #[test]
    fn has_ground_ahead_probe() {
        let g = gapped_grid();
        assert!(AggroController::has_ground_ahead(&g, enemy_at(10.0), COLLIDER, 1.0));
        assert!(!AggroController::has_ground_ahead(&g, enemy_at(11.8), COLLIDER, 1.0));
        assert!(AggroController::has_ground_ahead(&g, enemy_at(11.8), COLLIDER, -1.0));
    }
}
