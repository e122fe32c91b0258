/// Vertical and horizontal motion models.
///
/// Designers tune in time-to-apex and jump heights, not accelerations;
/// the physical constants are derived once when the tuning is loaded:
///
///   gravity          = -2·max_jump_height / time_to_apex²
///   falling_gravity  = -2·max_jump_height / time_to_ground²
///   jump_velocity    =  2·max_jump_height / time_to_apex
///   min_jump_time    =  2·min_jump_height / jump_velocity
///   move_accel       =  max_speed / max_speed_time
///
/// Rising and falling use different gravities (snappier descent), and an
/// early jump release multiplies rising gravity to cut the jump short.

use glam::Vec2;

use super::collide::ContactState;
use crate::config::MovementTuning;

/// Physical constants derived from `MovementTuning`. Time denominators
/// are clamped away from zero so malformed tuning degrades to extreme
/// values instead of NaN.
#[derive(Clone, Copy, Debug)]
pub struct MotionModel {
    pub gravity: f32,
    pub falling_gravity: f32,
    pub jump_velocity: f32,
    pub min_jump_time: f32,
    pub release_gravity_multiplier: f32,
    pub max_fall_speed: f32,
    pub wall_slide_gravity: f32,
    pub wall_slide_max_speed: f32,
    pub max_speed: f32,
    pub move_accel: f32,
    pub stop_accel: f32,
    pub turn_accel: f32,
}

impl MotionModel {
    pub fn derive(t: &MovementTuning) -> Self {
        let t_up = t.time_to_apex.max(f32::EPSILON);
        let t_down = t.time_to_ground.max(f32::EPSILON);
        let jump_velocity = 2.0 * t.max_jump_height / t_up;
        MotionModel {
            gravity: -2.0 * t.max_jump_height / (t_up * t_up),
            falling_gravity: -2.0 * t.max_jump_height / (t_down * t_down),
            jump_velocity,
            min_jump_time: 2.0 * t.min_jump_height / jump_velocity.max(f32::EPSILON),
            release_gravity_multiplier: t.release_gravity_multiplier,
            max_fall_speed: t.max_fall_speed,
            wall_slide_gravity: -t.wall_slide_gravity.abs(),
            wall_slide_max_speed: t.wall_slide_max_speed,
            max_speed: t.max_speed,
            move_accel: t.max_speed / t.max_speed_time.max(f32::EPSILON),
            stop_accel: t.max_speed / t.stop_time.max(f32::EPSILON),
            turn_accel: t.max_speed / t.turn_time.max(f32::EPSILON),
        }
    }

    /// Advance horizontal velocity toward `move_dir * max_speed`.
    ///
    /// `move_dir` is -1/0/+1. Reversing uses the turn acceleration,
    /// releasing input decays with the stop acceleration; speed is
    /// clamped to `max_speed` in both directions.
    pub fn apply_horizontal(&self, vel: &mut Vec2, move_dir: f32, dt: f32) {
        if move_dir != 0.0 {
            let turning = vel.x != 0.0 && vel.x.signum() != move_dir.signum();
            let accel = if turning { self.turn_accel } else { self.move_accel };
            vel.x += move_dir * accel * dt;
            vel.x = vel.x.clamp(-self.max_speed, self.max_speed);
        } else if vel.x != 0.0 {
            let decel = self.stop_accel * dt;
            if vel.x.abs() <= decel {
                vel.x = 0.0;
            } else {
                vel.x -= vel.x.signum() * decel;
            }
        }
    }

    /// Advance vertical velocity for one frame.
    ///
    /// Branches on the actor's state *before* this frame's movement:
    ///   - grounded with the descent already resolved (`vel.y == 0`):
    ///     stays pinned. A descent still in flight keeps its gravity
    ///     even when the ground probe fires, so the resolver is the one
    ///     to stop it, clamping the bottom edge flush; pinning on probe
    ///     contact would freeze the actor at whatever height the last
    ///     integration step left it.
    ///   - rising: apex gravity, multiplied once the jump has been
    ///     released and `min_jump_time` has elapsed since launch
    ///   - falling against a wall: wall-slide gravity, clamped to the
    ///     slide speed
    ///   - falling free: falling gravity, clamped to `max_fall_speed`
    pub fn apply_vertical(
        &self,
        vel: &mut Vec2,
        contacts: ContactState,
        jump_released_early: bool,
        dt: f32,
    ) {
        if contacts.on_ground && vel.y == 0.0 {
            return;
        }
        if vel.y > 0.0 {
            let mult = if jump_released_early {
                self.release_gravity_multiplier
            } else {
                1.0
            };
            vel.y += self.gravity * mult * dt;
        } else if contacts.any_wall() {
            vel.y += self.wall_slide_gravity * dt;
            vel.y = vel.y.max(-self.wall_slide_max_speed);
        } else {
            vel.y += self.falling_gravity * dt;
            vel.y = vel.y.max(-self.max_fall_speed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tuning() -> MovementTuning {
        MovementTuning {
            max_speed: 6.0,
            max_speed_time: 0.2,
            stop_time: 0.1,
            turn_time: 0.05,
            max_jump_height: 3.0,
            min_jump_height: 0.8,
            time_to_apex: 0.4,
            time_to_ground: 0.3,
            release_gravity_multiplier: 2.5,
            max_fall_speed: 14.0,
            wall_slide_gravity: 8.0,
            wall_slide_max_speed: 2.5,
        }
    }

    #[test]
    fn derived_constants_match_formulas() {
        let m = MotionModel::derive(&tuning());
        assert_relative_eq!(m.gravity, -2.0 * 3.0 / (0.4 * 0.4));
        assert_relative_eq!(m.falling_gravity, -2.0 * 3.0 / (0.3 * 0.3));
        assert_relative_eq!(m.jump_velocity, 2.0 * 3.0 / 0.4);
        assert_relative_eq!(m.min_jump_time, 2.0 * 0.8 / 15.0);
        assert_relative_eq!(m.move_accel, 6.0 / 0.2);
    }

    #[test]
    fn zero_time_tuning_does_not_produce_nan() {
        let mut t = tuning();
        t.time_to_apex = 0.0;
        t.max_speed_time = 0.0;
        let m = MotionModel::derive(&t);
        assert!(m.gravity.is_finite() || m.gravity.is_infinite());
        assert!(!m.gravity.is_nan());
        assert!(!m.jump_velocity.is_nan());
        assert!(!m.min_jump_time.is_nan());
    }

    #[test]
    fn jump_apex_reached_near_time_to_apex() {
        // Integrate the launch: velocity should cross zero close to
        // time_to_apex and close to max_jump_height.
        let m = MotionModel::derive(&tuning());
        let mut vel = Vec2::new(0.0, m.jump_velocity);
        let mut y = 0.0;
        let mut t = 0.0;
        let dt = 0.001;
        let airborne = ContactState::default();
        while vel.y > 0.0 {
            m.apply_vertical(&mut vel, airborne, false, dt);
            y += vel.y * dt;
            t += dt;
        }
        assert!((t - 0.4).abs() < 0.01, "apex at t={t}");
        assert!((y - 3.0).abs() < 0.1, "apex height {y}");
    }

    #[test]
    fn early_release_cuts_jump_short() {
        let m = MotionModel::derive(&tuning());
        let airborne = ContactState::default();
        let dt = 0.001;

        let mut full = Vec2::new(0.0, m.jump_velocity);
        let mut full_h = 0.0;
        while full.y > 0.0 {
            m.apply_vertical(&mut full, airborne, false, dt);
            full_h += full.y * dt;
        }

        let mut cut = Vec2::new(0.0, m.jump_velocity);
        let mut cut_h = 0.0;
        let mut t = 0.0;
        while cut.y > 0.0 {
            m.apply_vertical(&mut cut, airborne, t >= m.min_jump_time, dt);
            cut_h += cut.y * dt;
            t += dt;
        }

        assert!(cut_h < full_h * 0.8, "cut={cut_h} full={full_h}");
        assert!(cut_h >= 0.8 - 0.1, "min jump height honored, cut={cut_h}");
    }

    #[test]
    fn grounded_rest_stays_pinned() {
        let m = MotionModel::derive(&tuning());
        let grounded = ContactState { on_ground: true, ..Default::default() };
        let mut vel = Vec2::new(3.0, 0.0);
        m.apply_vertical(&mut vel, grounded, false, 0.016);
        assert_eq!(vel.y, 0.0);
        // Rising while grounded (just jumped) is not suppressed.
        let mut vel = Vec2::new(0.0, m.jump_velocity);
        m.apply_vertical(&mut vel, grounded, false, 0.016);
        assert!(vel.y > 0.0);
    }

    #[test]
    fn descent_in_probe_range_keeps_falling() {
        // The ground probe fires slightly before the feet touch; the
        // descent must keep its gravity until the resolver clamps it
        // flush, or the rest height would depend on fall history.
        let m = MotionModel::derive(&tuning());
        let grounded = ContactState { on_ground: true, ..Default::default() };
        let mut vel = Vec2::new(0.0, -5.0);
        m.apply_vertical(&mut vel, grounded, false, 0.016);
        assert!(vel.y < -5.0);
    }

    #[test]
    fn fall_speed_clamped() {
        let m = MotionModel::derive(&tuning());
        let airborne = ContactState::default();
        let mut vel = Vec2::new(0.0, -0.1);
        for _ in 0..2000 {
            m.apply_vertical(&mut vel, airborne, false, 0.016);
        }
        assert_relative_eq!(vel.y, -14.0);
    }

    #[test]
    fn wall_slide_clamps_to_slide_speed() {
        let m = MotionModel::derive(&tuning());
        let on_wall = ContactState { on_right_wall: true, ..Default::default() };
        let mut vel = Vec2::new(0.0, -0.1);
        for _ in 0..2000 {
            m.apply_vertical(&mut vel, on_wall, false, 0.016);
        }
        assert_relative_eq!(vel.y, -2.5);
    }

    #[test]
    fn horizontal_accelerates_and_clamps() {
        let m = MotionModel::derive(&tuning());
        let mut vel = Vec2::ZERO;
        for _ in 0..100 {
            m.apply_horizontal(&mut vel, 1.0, 0.016);
        }
        assert_relative_eq!(vel.x, 6.0);
    }

    #[test]
    fn horizontal_stop_decays_to_zero() {
        let m = MotionModel::derive(&tuning());
        let mut vel = Vec2::new(6.0, 0.0);
        for _ in 0..100 {
            m.apply_horizontal(&mut vel, 0.0, 0.016);
        }
        assert_eq!(vel.x, 0.0);
    }

    #[test]
    fn turning_uses_faster_accel() {
        let m = MotionModel::derive(&tuning());
        let mut turning = Vec2::new(-6.0, 0.0);
        let mut starting = Vec2::ZERO;
        m.apply_horizontal(&mut turning, 1.0, 0.016);
        m.apply_horizontal(&mut starting, 1.0, 0.016);
        let turn_delta = turning.x - -6.0;
        let start_delta = starting.x;
        assert!(turn_delta > start_delta);
    }
}
