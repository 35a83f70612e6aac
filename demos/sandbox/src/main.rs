//! Collision sandbox
//!
//! Builds a small tiled room, drops two crates into it - one with a
//! sideways push current applied - and prints the world state once per
//! simulated second.
//!
//! Usage: cargo run -p sandbox
//! Set RUST_LOG=warn to see absorbed faults (stale removals etc.).

use ember_math::{Rect, Vec2};
use ember_physics::prelude::*;

const TILE: f32 = 32.0;
const ROOM_W: i32 = 10;
const ROOM_H: i32 = 6;
const TICK: f32 = 1.0 / 60.0;

fn main() {
    env_logger::init();

    let config = PhysicsConfig::default()
        .with_max_static_extent(TILE)
        .with_push_retention(0.5)
        .with_debug_mirror(true);
    if let Err(err) = config.validate() {
        log::error!("bad physics configuration: {err}");
        return;
    }

    let mut world = PhysicsWorld::new(config);

    // Floor, ceiling and walls of the room.
    for x in 0..ROOM_W {
        world.create_static_body(tile(x, 0));
        world.create_static_body(tile(x, ROOM_H - 1));
    }
    for y in 1..ROOM_H - 1 {
        world.create_static_body(tile(0, y));
        world.create_static_body(tile(ROOM_W - 1, y));
    }

    let falling = world.create_kinematic_body(
        KinematicBodyDesc::new(Rect::new(3.0 * TILE, TILE, 24.0, 24.0))
            .with_velocity(Vec2::new(0.0, 2.0)),
    );
    let drifting = world.create_kinematic_body(
        KinematicBodyDesc::new(Rect::new(5.0 * TILE, TILE, 24.0, 24.0))
            .with_mass(2.0)
            .with_velocity(Vec2::new(0.0, 2.0)),
    );

    println!(
        "room: {}x{} tiles, {} static bodies, {} kinematic bodies",
        ROOM_W,
        ROOM_H,
        world.static_body_count(),
        world.kinematic_body_count()
    );

    for second in 1..=5 {
        for _ in 0..60 {
            // A current pushing the second crate toward the right wall.
            if let Err(err) = world.apply_push(drifting, Vec2::new(0.6, 0.0)) {
                log::warn!("push failed: {err}");
            }
            world.update(TICK);
        }

        println!("t = {second}s");
        for &(handle, rect) in world.debug_mirror().kinematic_rects() {
            let tag = if handle == falling { "falling" } else { "drifting" };
            println!(
                "  {tag}: left={:.1} top={:.1} contacts={}",
                rect.left,
                rect.top,
                world.contacts().iter().filter(|c| c.body == handle).count()
            );
        }
    }

    // Scene teardown: everything goes, handles become stale.
    world.clear();
    println!(
        "after clear: {} static, {} kinematic",
        world.static_body_count(),
        world.kinematic_body_count()
    );
}

fn tile(x: i32, y: i32) -> Rect {
    Rect::new(x as f32 * TILE, y as f32 * TILE, TILE, TILE)
}
