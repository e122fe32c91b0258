/// Jump timing: coyote time, jump buffering, wall jumps.
///
/// No explicit state enum — the state lives in three timestamps on the
/// world clock plus the per-jump release latch:
///
///   last_pressed   — most recent jump press (buffer window)
///   last_grounded  — most recent frame with ground contact (coyote window)
///   last_jump      — launch time of the current jump (min-jump gating)
///
/// A jump fires while the buffer window is open AND (the coyote window
/// is open OR exactly one wall is touched). Firing invalidates the
/// press/grounded timestamps so one press cannot launch twice.

use glam::Vec2;

use super::collide::ContactState;
use crate::config::JumpTuning;

/// Unreachably old timestamp; `now - NEVER` exceeds every window.
const NEVER: f32 = -1.0e9;

/// What kind of jump fired this frame, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    WallLeft,
    WallRight,
}

#[derive(Clone, Debug)]
pub struct JumpTimer {
    tuning: JumpTuning,
    last_pressed: f32,
    last_grounded: f32,
    last_jump: f32,
    /// Latched once the key goes up during the current jump. A re-press
    /// mid-air must not restore full rise gravity.
    released: bool,
}

impl JumpTimer {
    pub fn new(tuning: JumpTuning) -> Self {
        JumpTimer {
            tuning,
            last_pressed: NEVER,
            last_grounded: NEVER,
            last_jump: NEVER,
            released: true,
        }
    }

    /// Record this frame's input edge and hold state.
    pub fn observe_input(&mut self, now: f32, pressed: bool, held: bool) {
        if pressed {
            self.last_pressed = now;
        }
        if !held {
            self.released = true;
        }
    }

    /// Record this frame's contact flags (computed before movement).
    pub fn observe_contacts(&mut self, now: f32, contacts: ContactState) {
        if contacts.on_ground {
            self.last_grounded = now;
        }
    }

    /// Should rising gravity be multiplied this frame? True once the
    /// jump key has gone up since launch and the minimum jump time has
    /// elapsed. Stays true for the rest of the jump.
    pub fn released_early(&self, now: f32, min_jump_time: f32) -> bool {
        self.released && (now - self.last_jump) >= min_jump_time
    }

    /// Attempt to fire a jump. Must run after contact recomputation and
    /// the horizontal model, before position integration.
    ///
    /// On success sets `vel.y` to the jump impulse (and `vel.x` to the
    /// wall kick for wall jumps), consumes both grace timestamps, and
    /// reports which kind of jump fired.
    pub fn try_jump(
        &mut self,
        now: f32,
        vel: &mut Vec2,
        contacts: ContactState,
        jump_velocity: f32,
        move_dir: f32,
    ) -> Option<JumpKind> {
        let buffered = (now - self.last_pressed) < self.tuning.buffer_window;
        if !buffered {
            return None;
        }
        let coyote = (now - self.last_grounded) < self.tuning.coyote_window;

        let kind = if coyote {
            JumpKind::Ground
        } else if contacts.single_wall() {
            if contacts.on_left_wall {
                JumpKind::WallLeft
            } else {
                JumpKind::WallRight
            }
        } else {
            return None;
        };

        vel.y = jump_velocity;
        match kind {
            JumpKind::Ground => {}
            JumpKind::WallLeft | JumpKind::WallRight => {
                // Kick away from the wall. Holding input toward the wall
                // gives the weaker kick (a shimmy), input away or neutral
                // the stronger escape kick.
                let away = if kind == JumpKind::WallLeft { 1.0 } else { -1.0 };
                let toward_wall = move_dir != 0.0 && move_dir.signum() == -away;
                let kick = if toward_wall {
                    self.tuning.wall_kick_toward
                } else {
                    self.tuning.wall_kick_away
                };
                vel.x = away * kick;
            }
        }

        self.last_pressed = NEVER;
        self.last_grounded = NEVER;
        self.last_jump = now;
        self.released = false;
        Some(kind)
    }
}
