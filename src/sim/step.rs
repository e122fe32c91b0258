/// One fixed-timestep frame of the simulation.
///
/// Per-actor phase order is strict and shared by player and enemies:
///   (a) contact flags from the current, pre-movement position
///   (b) horizontal model (input or AI steering)
///   (c) vertical model + jump machine
///   (d) integrate a candidate position
///   (e) kinematic resolution
///   (f) attack and aggro machines, fed already-resolved positions
///
/// Phases (a)-(e) live in the actors (`update_motion`); this module runs
/// them in order, then runs phase (f) across actors and collects the
/// frame's events.

use crate::sim::actor::PlayerInput;
use crate::sim::event::GameEvent;
use crate::sim::world::WorldState;

pub fn step(world: &mut WorldState, input: PlayerInput, dt: f32) -> Vec<GameEvent> {
    let now = world.now();
    let mut events = vec![];

    // Phases (a)-(e), player first so enemies steer at this frame's
    // resolved player position.
    world.player.update_motion(&world.grid, input, now, dt);
    let player_pos = world.player.position();

    let decisions: Vec<_> = world
        .enemies
        .iter_mut()
        .map(|e| e.update_motion(&world.grid, player_pos.x, dt))
        .collect();

    // Phase (f): player combo against the nearest enemy.
    let nearest = world
        .enemies
        .iter()
        .enumerate()
        .map(|(i, e)| (i, (e.position() - player_pos).length()))
        .min_by(|a, b| a.1.total_cmp(&b.1));
    let nearest_distance = nearest.map_or(f32::INFINITY, |(_, d)| d);

    if let Some(step) = world.player.update_attack(dt, nearest_distance) {
        events.push(GameEvent::PlayerSwing { step });
    }
    if world.player.poll_attack_hit() {
        if let Some((i, _)) = nearest {
            world.enemies[i].hurt();
            events.push(GameEvent::PlayerHitEnemy { enemy: i });
        }
    }

    // Phase (f): enemy attacks, gated by each one's aggro decision.
    let mut player_was_hit = false;
    for (i, (enemy, decision)) in world.enemies.iter_mut().zip(&decisions).enumerate() {
        let distance = (player_pos - enemy.position()).length();
        enemy.update_attack(dt, distance, decision.may_attack);
        if enemy.poll_attack_hit() {
            player_was_hit = true;
            events.push(GameEvent::EnemyHitPlayer { enemy: i });
        }
    }
    if player_was_hit {
        world.player.hurt();
    }

    if world
        .grid
        .box_hazard(world.player.position(), world.player.kin.collider)
    {
        events.push(GameEvent::PlayerTouchedHazard);
    }

    world.advance_clock(dt);
    events
}
