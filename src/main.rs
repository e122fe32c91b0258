/// Entry point: a scripted headless run of the demo arena.
///
/// There is no renderer or input device here; the simulation core is
/// the product. The demo drives the player through a fixed input script
/// at a fixed timestep and logs the events the world emits, which
/// doubles as a smoke test of the whole pipeline.

mod config;
mod domain;
mod sim;

use anyhow::Result;

use config::GameConfig;
use sim::actor::PlayerInput;
use sim::level::demo_level;
use sim::step::step;
use sim::world::WorldState;

const DT: f32 = 1.0 / 60.0;
const RUN_SECONDS: f32 = 12.0;

/// Input script: walk right toward the grunt, jump the mid-room wall,
/// then mash attack once close.
fn scripted_input(t: f32) -> PlayerInput {
    let mut input = PlayerInput::default();
    if t < 6.0 {
        input.move_dir = 1.0;
    }
    let jumping = (1.0..1.4).contains(&t) || (3.0..3.4).contains(&t);
    if jumping {
        input.jump_held = true;
    }
    input.jump_pressed = (1.0..1.0 + DT).contains(&t) || (3.0..3.0 + DT).contains(&t);
    if t >= 4.0 {
        // A press every tenth of a second.
        input.attack_pressed = (t / 0.1).fract() < DT / 0.1;
    }
    input
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GameConfig::load();
    let mut world = WorldState::new(demo_level(), &config);
    log::info!(
        "demo arena: {}x{} tiles, {} enemies",
        world.grid.cols(),
        world.grid.rows(),
        world.enemies.len()
    );

    let frames = (RUN_SECONDS / DT) as usize;
    let mut event_count = 0usize;
    for _ in 0..frames {
        let t = world.now();
        let events = step(&mut world, scripted_input(t), DT);
        for ev in &events {
            log::info!("[t={t:6.2}] {ev:?}");
        }
        event_count += events.len();
    }

    let p = world.player.position();
    log::info!(
        "ran {frames} frames ({RUN_SECONDS}s): player at ({:.2}, {:.2}), {event_count} events",
        p.x,
        p.y
    );
    for (i, e) in world.enemies.iter().enumerate() {
        let pos = e.position();
        log::info!(
            "enemy {i} ({:?}) at ({:.2}, {:.2}) chasing={} attacking={}",
            e.kind,
            pos.x,
            pos.y,
            e.is_chasing(),
            e.is_attacking()
        );
    }
    Ok(())
}
