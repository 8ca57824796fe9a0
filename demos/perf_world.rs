use glam::Vec2;
use std::time::Instant;
use tumble::*;

fn lcg(seed: &mut u32) -> u32 {
    *seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
    *seed
}

fn unit(seed: &mut u32) -> f32 {
    lcg(seed) as f32 / u32::MAX as f32
}

fn main() {
    let mut cfg = WorldConfig::with_bounds(2000.0, 2000.0);
    cfg.enable_timing = true;
    cfg.max_contacts = 100_000;
    let mut world = PhysicsWorld::new(cfg);
    world.add_force(ForceField::drag(0.0005));

    let n = 1_000usize; // number of bodies (pairs grow as n^2)
    let mut seed = 1u32;
    for i in 0..n {
        let x = unit(&mut seed) * 1980.0;
        let y = unit(&mut seed) * 1980.0;
        let vx = unit(&mut seed) * 200.0 - 100.0;
        let vy = unit(&mut seed) * 200.0 - 100.0;
        let material = Material::from_block_type(i as u32 % 4);
        world.add_body(
            Body::new(x, y, 10.0, 10.0, 1.0)
                .with_material(material)
                .with_velocity(Vec2::new(vx, vy)),
        );
    }

    let frames = 60;
    let t0 = Instant::now();
    let mut contacts = 0usize;
    for _ in 0..frames {
        world.step(1.0 / 60.0);
        contacts += world.drain_contacts().len();
    }
    let total = t0.elapsed();
    let stats = world.debug_stats();

    if let Some(t) = world.timing() {
        println!(
            "N={} pairs/step={} last step={:.3}ms (forces={:.3}ms integrate={:.3}ms collide={:.3}ms bounds={:.3}ms) contacts={}",
            n,
            stats.pairs_tested,
            t.step_ms,
            t.forces_ms,
            t.integrate_ms,
            t.collide_ms,
            t.bounds_ms,
            contacts
        );
    }
    println!("{} frames in {:?} ({:?}/frame)", frames, total, total / frames);
}
