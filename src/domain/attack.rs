/// Melee attack timing: Idle → Attacking → Idle.
///
/// One timer drives the swing, a second the cooldown. The cooldown
/// starts the moment the swing starts and overlaps it, so a new attack
/// cannot begin until the cooldown elapses even after a short swing.
/// The hit itself is a single latched event at a normalized point in the
/// animation, consumed exactly once through `poll_hit`.
///
/// Every attacker shares this machine: enemy presets parameterize it
/// with their ranges, the player's combo chain re-runs it per step and
/// advances on the `Finished` event.

use crate::config::AttackTuning;

/// What the attack machine did this frame. Replaces animation-end
/// callbacks: the caller (combo chain, AI) reacts to the returned value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackEvent {
    None,
    Started,
    /// Target left break range mid-swing; no hit, no completion.
    Canceled,
    Finished,
}

#[derive(Clone, Debug)]
pub struct MeleeAttackTimer {
    tuning: AttackTuning,
    cooldown_timer: f32,
    attack_timer: f32,
    attacking: bool,
    hit_fired: bool,
    hit_queued: bool,
}

impl MeleeAttackTimer {
    pub fn new(tuning: AttackTuning) -> Self {
        MeleeAttackTimer {
            tuning,
            cooldown_timer: 0.0,
            attack_timer: 0.0,
            attacking: false,
            hit_fired: false,
            hit_queued: false,
        }
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    /// Can a new swing start right now (idle and off cooldown)?
    pub fn ready(&self) -> bool {
        !self.attacking && self.cooldown_timer <= 0.0
    }

    /// Advance one frame.
    ///
    /// `distance` is the absolute distance to the target this frame;
    /// `anim_duration` is the full swing duration (combo steps vary it).
    /// `want_attack` gates starting (enemies pass `true`; the player
    /// passes the attack press).
    pub fn update(
        &mut self,
        dt: f32,
        distance: f32,
        anim_duration: f32,
        want_attack: bool,
    ) -> AttackEvent {
        self.cooldown_timer = (self.cooldown_timer - dt).max(0.0);

        if !self.attacking {
            if want_attack && self.cooldown_timer <= 0.0 && distance <= self.tuning.start_range {
                self.attacking = true;
                self.attack_timer = 0.0;
                self.hit_fired = false;
                // Cooldown runs concurrently with the swing.
                self.cooldown_timer = self.tuning.cooldown;
                return AttackEvent::Started;
            }
            return AttackEvent::None;
        }

        // Target escaped: interrupt, distinct from normal completion.
        if distance > self.tuning.break_range {
            self.attacking = false;
            self.hit_fired = false;
            return AttackEvent::Canceled;
        }

        self.attack_timer += dt;

        if !self.hit_fired && self.attack_timer >= anim_duration * self.tuning.hit_time_normalized {
            self.hit_fired = true;
            if distance <= self.tuning.hit_range {
                self.hit_queued = true;
            }
        }

        if self.attack_timer >= anim_duration {
            self.attacking = false;
            return AttackEvent::Finished;
        }
        AttackEvent::None
    }

    /// Edge-triggered: true exactly once per qualifying swing, then
    /// cleared. The sole way a caller learns a hit landed.
    pub fn poll_hit(&mut self) -> bool {
        let hit = self.hit_queued;
        self.hit_queued = false;
        hit
    }
}
