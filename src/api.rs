use glam::Vec2;

use crate::body::Body;
use crate::forces::ForceField;
use crate::types::*;

/// Public API contract for the rigid-body world.
pub trait PhysicsWorldApi {
    /// Construct a new world with the given configuration.
    fn new(cfg: WorldConfig) -> Self
    where
        Self: Sized;

    // --- Membership --------------------------------------------------------

    /// Register a body at the end of the registration order.
    fn add_body(&mut self, body: Body) -> BodyId;

    /// Unregister a body. Unknown ids are ignored.
    fn remove_body(&mut self, id: BodyId) -> Option<Body>;

    /// Register a force field at the end of the field order.
    fn add_force(&mut self, field: ForceField) -> ForceId;

    /// Unregister a force field. Unknown ids are ignored.
    fn remove_force(&mut self, id: ForceId) -> Option<ForceField>;

    /// Register a game object's body and hand the assigned id back to it.
    fn register(&mut self, object: &mut dyn HasPhysicsBody) -> BodyId;

    /// Remove a game object's body if it was registered.
    fn unregister(&mut self, object: &dyn HasPhysicsBody) -> Option<Body>;

    // --- Simulation --------------------------------------------------------

    /// Run one step: forces, integration, collisions, world bounds.
    fn step(&mut self, dt: f32);

    /// Set the default gravity field's vertical strength in place.
    fn set_gravity(&mut self, strength: f32);

    /// Last strength passed to `set_gravity` (or the configured initial one).
    fn gravity(&self) -> f32;

    // --- Read access -------------------------------------------------------

    fn body(&self, id: BodyId) -> Option<&Body>;

    fn body_mut(&mut self, id: BodyId) -> Option<&mut Body>;

    fn force(&self, id: ForceId) -> Option<&ForceField>;

    fn force_mut(&mut self, id: ForceId) -> Option<&mut ForceField>;

    /// Snapshot of all bodies in registration order.
    fn bodies(&self) -> Vec<Body>;

    /// Ids of all bodies in registration order.
    fn body_ids(&self) -> Vec<BodyId>;

    /// Drain and return the contacts recorded by the last step.
    fn drain_contacts(&mut self) -> Vec<Contact>;

    // --- Queries -----------------------------------------------------------

    /// Bodies whose rectangles contain `p` (edges inclusive).
    fn query_point(&self, p: Vec2) -> Vec<BodyId>;

    /// Bodies overlapping `rect` with positive area.
    fn query_rect(&self, rect: Rect) -> Vec<BodyId>;

    /// Closest body along `origin + dir * t` for `t` in `[0, max_t]`.
    fn raycast(&self, origin: Vec2, dir: Vec2, max_t: f32) -> Option<RayHit>;
}

/// Capability for game objects that own a simulated body (blocks, projectiles).
pub trait HasPhysicsBody {
    /// Initial body handed to the world at registration.
    fn physics_body(&self) -> Body;

    /// Store the id the world assigned.
    fn attach_body(&mut self, id: BodyId);

    fn body_id(&self) -> Option<BodyId>;
}

/// Rectangle primitives required by the world.
pub trait NarrowphaseApi {
    fn overlap_rect_rect(a: &Rect, b: &Rect) -> bool;
    fn overlap_point_rect(p: Vec2, r: &Rect) -> bool;

    /// Minimum-penetration separation of A from B.
    /// Ties resolve in the order left, right, top, bottom.
    fn separation(a: &Rect, b: &Rect) -> Option<Separation>;

    /// 1-D elastic collision; returns the new velocities of A and B.
    fn elastic_1d(va: f32, ma: f32, vb: f32, mb: f32) -> (f32, f32);

    /// Slab test; returns entry parameter and face normal.
    fn ray_rect(origin: Vec2, dir: Vec2, r: &Rect) -> Option<(f32, Vec2)>;
}
