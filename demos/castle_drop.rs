use glam::Vec2;
use tumble::*;

/// Castle block owning a simulated body.
struct BuildingBlock {
    rect: Rect,
    material: Material,
    body: Option<BodyId>,
}

impl BuildingBlock {
    fn new(x: f32, y: f32, w: f32, h: f32, block_type: u32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            material: Material::from_block_type(block_type),
            body: None,
        }
    }
}

impl HasPhysicsBody for BuildingBlock {
    fn physics_body(&self) -> Body {
        Body::new(self.rect.x, self.rect.y, self.rect.w, self.rect.h, 1.0).with_material(self.material)
    }

    fn attach_body(&mut self, id: BodyId) {
        self.body = Some(id);
    }

    fn body_id(&self) -> Option<BodyId> {
        self.body
    }
}

/// Short-lived projectile.
struct Cannonball {
    origin: Vec2,
    velocity: Vec2,
    lifetime: u32,
    body: Option<BodyId>,
}

impl HasPhysicsBody for Cannonball {
    fn physics_body(&self) -> Body {
        Body::new(self.origin.x, self.origin.y, 12.0, 12.0, 1.0)
            .with_material(Material::Cannonball)
            .with_velocity(self.velocity)
    }

    fn attach_body(&mut self, id: BodyId) {
        self.body = Some(id);
    }

    fn body_id(&self) -> Option<BodyId> {
        self.body
    }
}

fn main() {
    let mut world = PhysicsWorld::with_bounds(500.0, 400.0);
    world.set_gravity(300.0);

    // Two towers and a lintel
    let mut blocks = vec![
        BuildingBlock::new(300.0, 360.0, 40.0, 40.0, 0),
        BuildingBlock::new(300.0, 320.0, 40.0, 40.0, 2),
        BuildingBlock::new(400.0, 360.0, 40.0, 40.0, 0),
        BuildingBlock::new(400.0, 320.0, 40.0, 40.0, 2),
        BuildingBlock::new(300.0, 300.0, 140.0, 20.0, 1),
    ];
    for block in blocks.iter_mut() {
        world.register(block);
    }

    let mut ball = Cannonball {
        origin: Vec2::new(20.0, 300.0),
        velocity: Vec2::new(400.0, -150.0),
        lifetime: 300,
        body: None,
    };
    world.register(&mut ball);

    let dt = 1.0 / 60.0;
    for frame in 0..360 {
        world.step(dt);
        for c in world.drain_contacts() {
            if c.kind == ContactKind::Body && (Some(c.a) == ball.body || c.b == ball.body) {
                println!("frame {frame}: cannonball hit ({:?} vs {:?}) axis={:?}", c.a, c.b, c.axis);
            }
        }

        if ball.body.is_some() {
            ball.lifetime = ball.lifetime.saturating_sub(1);
            if ball.lifetime == 0 {
                world.unregister(&ball);
                ball.body = None;
                println!("frame {frame}: cannonball expired");
            }
        }
    }

    for (i, block) in blocks.iter().enumerate() {
        if let Some(b) = block.body.and_then(|id| world.body(id)) {
            println!(
                "block {} ({:?}): pos=({:.1},{:.1}) vel=({:.1},{:.1})",
                i,
                block.material,
                b.position().x,
                b.position().y,
                b.velocity().x,
                b.velocity().y
            );
        }
    }
    let stats = world.debug_stats();
    println!("bodies={} pairs/step={}", stats.bodies, stats.pairs_tested);
}
