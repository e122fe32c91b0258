/// Actors: the player and enemies, composed from the domain components.
///
/// Both run the same per-frame pipeline (see `sim::step`):
///   (a) recompute contact flags from the current position
///   (b) horizontal acceleration model
///   (c) vertical motion model + jump machine
///   (d) integrate a candidate position
///   (e) kinematic resolution against the grid
///   (f) attack / aggro machines on the already-resolved position
///
/// Enemy behavior variants are data, not subclasses: an `EnemyKind`
/// selects a tuning bundle and every enemy shares one implementation.

use glam::Vec2;

use crate::config::{EnemyConfig, GameConfig, PlayerConfig};
use crate::domain::aggro::{AggroController, AggroDecision};
use crate::domain::attack::{AttackEvent, MeleeAttackTimer};
use crate::domain::collide::{self, ContactState, ProbeSet};
use crate::domain::grid::TileGrid;
use crate::domain::jump::{JumpKind, JumpTimer};
use crate::domain::motion::MotionModel;

/// Frame input sampled by the host loop for the player.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlayerInput {
    /// -1 left, 0 none, +1 right.
    pub move_dir: f32,
    /// Edge: the jump key went down this frame.
    pub jump_pressed: bool,
    /// Level: the jump key is currently down.
    pub jump_held: bool,
    /// Edge: the attack key went down this frame.
    pub attack_pressed: bool,
}

/// Position, velocity, and this frame's contact flags.
#[derive(Clone, Debug)]
pub struct Kinematics {
    pub pos: Vec2,
    pub vel: Vec2,
    pub contacts: ContactState,
    pub collider: Vec2,
    probes: ProbeSet,
}

impl Kinematics {
    pub fn new(pos: Vec2, collider: Vec2, probes: ProbeSet) -> Self {
        Kinematics {
            pos,
            vel: Vec2::ZERO,
            contacts: ContactState::default(),
            collider,
            probes,
        }
    }

    /// Phase (a): contacts from the *current* position, pre-movement.
    pub fn refresh_contacts(&mut self, grid: &TileGrid) {
        self.contacts = self.probes.contacts(grid, self.pos);
    }

    /// Phases (d)+(e): integrate and resolve against the grid.
    pub fn integrate_and_resolve(&mut self, grid: &TileGrid, dt: f32) {
        let next = self.pos + self.vel * dt;
        collide::resolve_movement(grid, &mut self.pos, &mut self.vel, next, self.collider);
    }
}

// ══════════════════════════════════════════════════════════════
// Player
// ══════════════════════════════════════════════════════════════

pub struct Player {
    pub kin: Kinematics,
    motion: MotionModel,
    jump: JumpTimer,
    attack: MeleeAttackTimer,
    cfg: PlayerConfig,
    /// Current combo step, 0-based into `combo_durations`.
    combo_step: usize,
    /// Remaining life of a buffered attack press.
    attack_buffer: f32,
    hurt_timer: f32,
}

impl Player {
    pub fn new(spawn: Vec2, cfg: &PlayerConfig) -> Self {
        let collider = Vec2::from(cfg.collider);
        Player {
            kin: Kinematics::new(spawn, collider, ProbeSet::from_tuning(collider, &cfg.probes)),
            motion: MotionModel::derive(&cfg.movement),
            jump: JumpTimer::new(cfg.jump.clone()),
            attack: MeleeAttackTimer::new(cfg.attack.clone()),
            cfg: cfg.clone(),
            combo_step: 0,
            attack_buffer: 0.0,
            hurt_timer: 0.0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.kin.pos
    }

    pub fn velocity(&self) -> Vec2 {
        self.kin.vel
    }

    pub fn is_attacking(&self) -> bool {
        self.attack.is_attacking()
    }

    pub fn is_hurt_locked(&self) -> bool {
        self.hurt_timer > 0.0
    }

    pub fn combo_step(&self) -> usize {
        self.combo_step
    }

    /// Edge-triggered hit consumption; see `MeleeAttackTimer::poll_hit`.
    pub fn poll_attack_hit(&mut self) -> bool {
        self.attack.poll_hit()
    }

    /// A hit landed on the player: lock input for the hurt duration.
    pub fn hurt(&mut self) {
        self.hurt_timer = self.cfg.hurt_lock;
    }

    /// Phases (a)-(e). Returns the jump that fired, if any.
    pub fn update_motion(
        &mut self,
        grid: &TileGrid,
        input: PlayerInput,
        now: f32,
        dt: f32,
    ) -> Option<JumpKind> {
        self.hurt_timer = (self.hurt_timer - dt).max(0.0);
        let locked = self.is_hurt_locked();

        self.kin.refresh_contacts(grid);
        self.jump.observe_contacts(now, self.kin.contacts);
        self.jump
            .observe_input(now, input.jump_pressed && !locked, input.jump_held);
        if input.attack_pressed && !locked {
            self.attack_buffer = self.cfg.combo_window;
        } else {
            self.attack_buffer = (self.attack_buffer - dt).max(0.0);
        }

        let move_dir = if locked { 0.0 } else { input.move_dir };
        self.motion.apply_horizontal(&mut self.kin.vel, move_dir, dt);

        let released_early = self.jump.released_early(now, self.motion.min_jump_time);
        self.motion
            .apply_vertical(&mut self.kin.vel, self.kin.contacts, released_early, dt);
        let jumped = self.jump.try_jump(
            now,
            &mut self.kin.vel,
            self.kin.contacts,
            self.motion.jump_velocity,
            move_dir,
        );

        self.kin.integrate_and_resolve(grid, dt);
        jumped
    }

    /// Phase (f): drive the combo chain. `distance` is to the nearest
    /// enemy (`f32::INFINITY` when there is none). Returns the combo
    /// step that started this frame, if one did.
    pub fn update_attack(&mut self, dt: f32, distance: f32) -> Option<usize> {
        let duration = self
            .cfg
            .combo_durations
            .get(self.combo_step)
            .copied()
            .unwrap_or(0.35);
        let want = self.attack_buffer > 0.0 && !self.is_hurt_locked();

        match self.attack.update(dt, distance, duration, want) {
            AttackEvent::Started => {
                self.attack_buffer = 0.0;
                Some(self.combo_step)
            }
            AttackEvent::Finished => {
                // A press buffered during the swing advances the chain;
                // otherwise the combo resets to the opener. An empty
                // combo table from user tuning falls back to the default
                // duration and never advances.
                if self.attack_buffer > 0.0 && !self.cfg.combo_durations.is_empty() {
                    self.combo_step = (self.combo_step + 1) % self.cfg.combo_durations.len();
                } else {
                    self.combo_step = 0;
                }
                None
            }
            AttackEvent::Canceled => {
                self.combo_step = 0;
                None
            }
            AttackEvent::None => None,
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Enemy
// ══════════════════════════════════════════════════════════════

/// Behavior preset selector. All variants share one implementation,
/// parameterized by the tuning bundle the kind selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Grunt,
    Brute,
}

impl EnemyKind {
    pub fn config<'a>(&self, cfg: &'a GameConfig) -> &'a EnemyConfig {
        match self {
            EnemyKind::Grunt => &cfg.grunt,
            EnemyKind::Brute => &cfg.brute,
        }
    }
}

pub struct Enemy {
    pub kin: Kinematics,
    pub kind: EnemyKind,
    motion: MotionModel,
    attack: MeleeAttackTimer,
    aggro: AggroController,
    anim_duration: f32,
    hurt_lock: f32,
    hurt_timer: f32,
    chasing: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, spawn: Vec2, cfg: &EnemyConfig) -> Self {
        let collider = Vec2::from(cfg.collider);
        Enemy {
            kin: Kinematics::new(spawn, collider, ProbeSet::from_tuning(collider, &cfg.probes)),
            kind,
            motion: MotionModel::derive(&cfg.movement),
            attack: MeleeAttackTimer::new(cfg.attack.clone()),
            aggro: AggroController::new(cfg.aggro.clone(), spawn),
            anim_duration: cfg.anim_duration,
            hurt_lock: cfg.hurt_lock,
            hurt_timer: 0.0,
            chasing: false,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.kin.pos
    }

    pub fn velocity(&self) -> Vec2 {
        self.kin.vel
    }

    pub fn is_chasing(&self) -> bool {
        self.chasing
    }

    pub fn is_attacking(&self) -> bool {
        self.attack.is_attacking()
    }

    pub fn is_returning_home(&self) -> bool {
        self.aggro.is_returning_home()
    }

    pub fn home(&self) -> Vec2 {
        self.aggro.home()
    }

    pub fn poll_attack_hit(&mut self) -> bool {
        self.attack.poll_hit()
    }

    pub fn hurt(&mut self) {
        self.hurt_timer = self.hurt_lock;
    }

    /// Phases (a)-(e). The AI decision is sampled at frame start, in
    /// place of player input; it is returned for phase (f).
    pub fn update_motion(&mut self, grid: &TileGrid, player_x: f32, dt: f32) -> AggroDecision {
        self.hurt_timer = (self.hurt_timer - dt).max(0.0);

        self.kin.refresh_contacts(grid);
        let decision = self
            .aggro
            .decide(grid, self.kin.pos, self.kin.collider, player_x);
        self.chasing = decision.chasing;

        if self.hurt_timer > 0.0 {
            // Hurt lock: no locomotion, keep falling physics only.
            self.motion.apply_horizontal(&mut self.kin.vel, 0.0, dt);
        } else if decision.ledge_blocked {
            self.kin.vel.x = 0.0;
        } else if let Some(target) = decision.target_x {
            let dx = target - self.kin.pos.x;
            self.motion
                .apply_horizontal(&mut self.kin.vel, dx.signum(), dt);
            // Never overshoot the target within one frame.
            if (self.kin.vel.x * dt).abs() > dx.abs() {
                self.kin.vel.x = dx / dt;
            }
        } else {
            self.motion.apply_horizontal(&mut self.kin.vel, 0.0, dt);
        }

        self.motion
            .apply_vertical(&mut self.kin.vel, self.kin.contacts, false, dt);
        self.kin.integrate_and_resolve(grid, dt);
        decision
    }

    /// Phase (f): the attack machine, gated by the aggro decision.
    pub fn update_attack(&mut self, dt: f32, distance: f32, may_attack: bool) -> AttackEvent {
        let want = may_attack && self.hurt_timer <= 0.0;
        self.attack.update(dt, distance, self.anim_duration, want)
    }
}
