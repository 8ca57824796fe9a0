use glam::Vec2;
use tumble::*;

/// World(100x100) with a single dynamic box and gravity 10.
fn drop_world() -> (PhysicsWorld, BodyId) {
    let mut world = PhysicsWorld::with_bounds(100.0, 100.0);
    world.set_gravity(10.0);
    let id = world.add_body(
        Body::new(40.0, 0.0, 10.0, 10.0, 1.0)
            .with_restitution(0.5)
            .with_friction(0.2),
    );
    (world, id)
}

#[test]
fn drop_to_floor_bounces_with_half_speed() {
    let (mut world, id) = drop_world();

    let mut steps = 0;
    let pre_impact_vy = loop {
        let before = world.body(id).unwrap().clone();
        world.step(1.0);
        steps += 1;
        let contacts = world.drain_contacts();
        if contacts.iter().any(|c| c.kind == ContactKind::Floor) {
            // Velocity the integrator produced this step, before the bounce.
            break before.velocity().y + 10.0;
        }
        assert!(steps < 100, "body never reached the floor");
    };

    let body = world.body(id).unwrap();
    assert_eq!(steps, 4);
    assert_eq!(pre_impact_vy, 40.0);
    assert_eq!(body.position(), Vec2::new(40.0, 90.0));
    assert_eq!(body.velocity().y, -pre_impact_vy * 0.5);
    // Pure vertical fall: nothing for ground friction to dampen.
    assert_eq!(body.velocity().x, 0.0);
}

#[test]
fn free_fall_single_step() {
    let mut world = PhysicsWorld::with_bounds(100.0, 100.0);
    let id = world.add_body(Body::new(0.0, 0.0, 1.0, 1.0, 1.0));
    world.step(1.0);
    let body = world.body(id).unwrap();
    assert_eq!(body.velocity(), Vec2::new(0.0, 9.8));
    assert_eq!(body.position(), Vec2::new(0.0, 9.8));
}

#[test]
fn box_comes_to_rest_on_static_platform() {
    let mut world = PhysicsWorld::with_bounds(200.0, 200.0);
    let platform = world.add_body(Body::fixed(0.0, 150.0, 200.0, 20.0));
    let block = world.add_body(
        Body::new(90.0, 100.0, 20.0, 20.0, 1.0)
            .with_material(Material::Stone),
    );

    for _ in 0..600 {
        world.step(1.0 / 60.0);
    }

    let b = world.body(block).unwrap();
    let p = world.body(platform).unwrap();
    assert_eq!(p.position(), Vec2::new(0.0, 150.0));
    // Settled within one frame of gravity penetration above the platform.
    assert!(b.bounds_rect().bottom() <= p.bounds_rect().top() + 0.1);
    assert!(b.bounds_rect().bottom() >= p.bounds_rect().top() - 0.1);
    assert!(b.velocity().y.abs() < 1.0);
}

#[test]
fn cannonball_knocks_block_sideways() {
    let mut world = PhysicsWorld::with_bounds(500.0, 400.0);
    world.set_gravity(0.0);
    let block = world.add_body(Body::new(200.0, 300.0, 40.0, 40.0, 1.0).with_material(Material::Wood));
    let ball = world.add_body(
        Body::new(150.0, 310.0, 12.0, 12.0, 1.0)
            .with_material(Material::Cannonball)
            .with_velocity(Vec2::new(60.0, 0.0)),
    );

    let mut hit = None;
    for _ in 0..60 {
        world.step(1.0 / 60.0);
        if let Some(c) = world
            .drain_contacts()
            .into_iter()
            .find(|c| c.kind == ContactKind::Body)
        {
            hit = Some(c);
            break;
        }
    }

    let c = hit.expect("cannonball never reached the block");
    assert_eq!(c.a, block);
    assert_eq!(c.b, Some(ball));
    assert_eq!(c.axis, Axis::Horizontal);
    assert!(world.body(block).unwrap().velocity().x > 0.0);
    assert!(world.body(ball).unwrap().velocity().x < 60.0);
}

#[test]
fn scene_file_round_trip_through_world() {
    let yaml = "
world:
  width: 100.0
  height: 100.0
  gravity: 0.0
bodies:
  - position: [20.0, 50.0]
    size: [10.0, 10.0]
  - position: [28.0, 50.0]
    size: [10.0, 10.0]
";
    let scene = SceneConfig::from_yaml_str(yaml).unwrap();
    let (mut world, ids) = PhysicsWorld::from_scene(&scene);
    world.step(1.0);
    assert_eq!(world.body(ids[0]).unwrap().position(), Vec2::new(19.0, 50.0));
    assert_eq!(world.body(ids[1]).unwrap().position(), Vec2::new(29.0, 50.0));
}
