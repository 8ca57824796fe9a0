use glam::Vec2;

use crate::material::Material;
use crate::types::Rect;

/// Axis-aligned rigid body with linear motion only.
///
/// Position is the top-left corner of the body's rectangle; +y points down.
///
/// Preconditions (not checked): `size` components are positive, and `mass` is
/// positive unless the body is static. Violating them yields non-finite or
/// otherwise meaningless numbers rather than an error.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    position: Vec2,
    velocity: Vec2,
    acceleration: Vec2,
    size: Vec2,
    mass: f32,
    restitution: f32,
    friction: f32,
    is_static: bool,
}

impl Body {
    pub const DEFAULT_RESTITUTION: f32 = 0.8;
    pub const DEFAULT_FRICTION: f32 = 0.1;

    /// Dynamic body at rest with default restitution and friction.
    pub fn new(x: f32, y: f32, w: f32, h: f32, mass: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            size: Vec2::new(w, h),
            mass,
            restitution: Self::DEFAULT_RESTITUTION,
            friction: Self::DEFAULT_FRICTION,
            is_static: false,
        }
    }

    /// Immovable anchor (floors, platforms). Mass is irrelevant for static bodies.
    pub fn fixed(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(x, y, w, h, 0.0).with_static(true)
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.set_restitution(restitution);
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.set_friction(friction);
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Apply the preset's mass, restitution and friction.
    pub fn with_material(mut self, material: Material) -> Self {
        self.mass = material.mass();
        self.set_restitution(material.restitution());
        self.set_friction(material.friction());
        self
    }

    // --- Accessors ---------------------------------------------------------

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    pub fn friction(&self) -> f32 {
        self.friction
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass;
    }

    pub fn set_static(&mut self, is_static: bool) {
        self.is_static = is_static;
    }

    /// Clamped into [0, 1].
    pub fn set_restitution(&mut self, restitution: f32) {
        self.restitution = restitution.clamp(0.0, 1.0);
    }

    /// Clamped into [0, 1].
    pub fn set_friction(&mut self, friction: f32) {
        self.friction = friction.clamp(0.0, 1.0);
    }

    // --- Dynamics ----------------------------------------------------------

    /// Accumulate `force / mass` into the acceleration for the next integration.
    pub fn apply_force(&mut self, force: Vec2) {
        if self.is_static {
            return;
        }
        self.acceleration += force / self.mass;
    }

    /// Instantaneous velocity change of `impulse / mass`.
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if self.is_static {
            return;
        }
        self.velocity += impulse / self.mass;
    }

    /// Semi-implicit Euler: velocity first, then position with the new velocity.
    /// Clears the acceleration accumulator.
    pub fn integrate(&mut self, dt: f32) {
        if self.is_static {
            return;
        }
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
        self.acceleration = Vec2::ZERO;
    }

    pub fn bounds_rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    /// Strict AABB overlap with positive area.
    pub fn collides_with(&self, other: &Body) -> bool {
        self.bounds_rect().intersects(&other.bounds_rect())
    }

    // Collision/boundary response writes. Static bodies ignore them.

    pub(crate) fn nudge(&mut self, delta: Vec2) {
        if self.is_static {
            return;
        }
        self.position += delta;
    }

    pub(crate) fn set_velocity_x(&mut self, vx: f32) {
        if self.is_static {
            return;
        }
        self.velocity.x = vx;
    }

    pub(crate) fn set_velocity_y(&mut self, vy: f32) {
        if self.is_static {
            return;
        }
        self.velocity.y = vy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let b = Body::new(1.0, 2.0, 3.0, 4.0, 5.0);
        assert_eq!(b.position(), Vec2::new(1.0, 2.0));
        assert_eq!(b.velocity(), Vec2::ZERO);
        assert_eq!(b.restitution(), 0.8);
        assert_eq!(b.friction(), 0.1);
        assert!(!b.is_static());
        assert_eq!(b.center(), Vec2::new(2.5, 4.0));
    }

    #[test]
    fn test_coefficients_are_clamped() {
        let mut b = Body::new(0.0, 0.0, 1.0, 1.0, 1.0);
        b.set_restitution(1.7);
        b.set_friction(-0.3);
        assert_eq!(b.restitution(), 1.0);
        assert_eq!(b.friction(), 0.0);
        let b = b.with_restitution(-2.0).with_friction(4.0);
        assert_eq!(b.restitution(), 0.0);
        assert_eq!(b.friction(), 1.0);
    }

    #[test]
    fn test_apply_force_divides_by_mass() {
        let mut b = Body::new(0.0, 0.0, 1.0, 1.0, 2.0);
        b.apply_force(Vec2::new(4.0, -6.0));
        b.apply_force(Vec2::new(2.0, 0.0));
        assert_eq!(b.acceleration(), Vec2::new(3.0, -3.0));
    }

    #[test]
    fn test_apply_impulse_changes_velocity_directly() {
        let mut b = Body::new(0.0, 0.0, 1.0, 1.0, 4.0);
        b.apply_impulse(Vec2::new(8.0, 2.0));
        assert_eq!(b.velocity(), Vec2::new(2.0, 0.5));
        assert_eq!(b.position(), Vec2::ZERO);
    }

    #[test]
    fn test_integrate_is_semi_implicit() {
        let mut b = Body::new(0.0, 0.0, 1.0, 1.0, 1.0).with_velocity(Vec2::new(1.0, 0.0));
        b.apply_force(Vec2::new(0.0, 9.8));
        b.integrate(1.0);
        assert_eq!(b.velocity(), Vec2::new(1.0, 9.8));
        // Position uses the updated velocity.
        assert_eq!(b.position(), Vec2::new(1.0, 9.8));
        assert_eq!(b.acceleration(), Vec2::ZERO);
    }

    #[test]
    fn test_static_body_is_immovable() {
        let mut b = Body::fixed(5.0, 5.0, 10.0, 10.0).with_velocity(Vec2::ZERO);
        let before = b.clone();
        b.apply_force(Vec2::new(1e9, -1e9));
        b.apply_impulse(Vec2::new(-3.0, 7.0));
        b.integrate(100.0);
        b.nudge(Vec2::new(4.0, 4.0));
        b.set_velocity_x(12.0);
        b.set_velocity_y(-12.0);
        assert_eq!(b, before);
    }

    #[test]
    fn test_collides_with_requires_positive_overlap() {
        let a = Body::new(0.0, 0.0, 10.0, 10.0, 1.0);
        let touching = Body::new(10.0, 0.0, 10.0, 10.0, 1.0);
        let overlapping = Body::new(9.0, 9.0, 10.0, 10.0, 1.0);
        assert!(!a.collides_with(&touching));
        assert!(a.collides_with(&overlapping));
    }

    #[test]
    fn test_with_material() {
        let b = Body::new(0.0, 0.0, 12.0, 12.0, 1.0).with_material(Material::Cannonball);
        assert_eq!(b.mass(), 0.8);
        assert_eq!(b.restitution(), 0.6);
        assert_eq!(b.friction(), 0.3);
    }
}
