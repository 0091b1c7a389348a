//! Headless demo: a pile of random boxes and circles raining onto a static
//! floor, with a steering force applied to one of them. Run with
//! `RUST_LOG=debug` to watch the world's lifecycle events.

use anyhow::Result;
use log::info;
use pulse2d::{Body, Shape, Vec2, World};
use rand::Rng;

const DT: f32 = 1.0 / 60.0;
const SUBSTEPS: u32 = 8;
const FRAMES: u32 = 600;
const STEER_FORCE: f32 = 4000.0;
const CULL_Y: f32 = 2000.0;

fn main() -> Result<()> {
    env_logger::init();

    let mut world = World::default();
    world.add_body(Body::new_box(
        Vec2::new(512.0, 551.0),
        1024.0,
        50.0,
        1.0,
        0.5,
        0.0,
        true,
    )?);

    let mut rng = rand::thread_rng();
    for _ in 0..12 {
        let position = Vec2::new(rng.gen_range(64.0..960.0), rng.gen_range(0.0..200.0));
        let restitution = rng.gen_range(0.1..0.9);
        let body = if rng.gen_bool(0.5) {
            Body::new_box(
                position,
                rng.gen_range(20.0..60.0),
                rng.gen_range(20.0..60.0),
                1.0,
                restitution,
                0.0,
                false,
            )?
        } else {
            Body::new_circle(position, rng.gen_range(10.0..30.0), 1.0, restitution, 0.0, false)?
        };
        world.add_body(body);
    }

    // the first dynamic body takes the demo input force
    let steered = 1;

    for frame in 0..FRAMES {
        // a synthetic input direction standing in for keyboard state
        let direction = Vec2::new((frame as f32 * 0.05).cos(), 0.0).normalize();
        if let Some(body) = world.body_mut(steered) {
            body.add_force(direction * STEER_FORCE);
        }

        world.step(DT, SUBSTEPS);

        let culled = world.cull_below(CULL_Y);
        if culled > 0 {
            info!("frame {}: culled {} fallen bodies", frame, culled);
        }
    }

    for (index, body) in world.bodies().iter().enumerate() {
        let position = body.position();
        match body.shape() {
            Shape::Box { width, height, .. } => {
                println!("#{index}: box {width}x{height} at ({:.1}, {:.1})", position.x, position.y)
            }
            Shape::Circle { radius } => {
                println!("#{index}: circle r={radius} at ({:.1}, {:.1})", position.x, position.y)
            }
        }
    }
    println!("{} bodies alive after {} frames", world.body_count(), FRAMES);

    Ok(())
}
