use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable handle for a body registered in a [`crate::PhysicsWorld`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub u64);

/// Stable handle for a force field registered in a [`crate::PhysicsWorld`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ForceId(pub u64);

impl ForceId {
    /// Handle of the gravity field every world is created with.
    pub const DEFAULT_GRAVITY: ForceId = ForceId(0);
}

/// Axis-aligned rectangle, top-left corner plus size. +y points down.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self::new(min.x, min.y, size.x, size.y)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// True when the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Closed containment test (edges count as inside).
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Overlap with positive area. Touching edges do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }
}

/// Which side of A the minimum-penetration axis points out of.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    /// A's right edge is inside B; A is pushed toward -x.
    Left,
    /// B's right edge is inside A; A is pushed toward +x.
    Right,
    /// A's bottom edge is inside B; A is pushed toward -y.
    Top,
    /// B's bottom edge is inside A; A is pushed toward +y.
    Bottom,
}

/// Minimum-translation result for two overlapping rectangles.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Separation {
    /// Vector to add to A (and subtract from B) to separate them. One component is zero.
    pub correction: Vec2,
    /// Penetration depth along the chosen axis (> 0).
    pub depth: f32,
    pub side: Side,
}

/// Axis used for the velocity response of a resolved pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Contact discriminator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContactKind {
    /// Two registered bodies overlapped.
    Body,
    Floor,
    Ceiling,
    LeftWall,
    RightWall,
}

/// Contact recorded while resolving a step.
#[derive(Copy, Clone, Debug)]
pub struct Contact {
    pub kind: ContactKind,
    pub a: BodyId,
    /// Second body for [`ContactKind::Body`] contacts.
    pub b: Option<BodyId>,
    /// Positional correction applied to `a` (world bounds) or split between `a` and `b`.
    pub correction: Vec2,
    pub axis: Axis,
}

/// Closest ray hit returned by [`crate::PhysicsWorld::raycast`].
#[derive(Copy, Clone, Debug)]
pub struct RayHit {
    pub body: BodyId,
    /// Ray parameter of the entry point (`origin + dir * toi`).
    pub toi: f32,
    /// Entry face normal; zero when the origin starts inside the body.
    pub normal: Vec2,
    pub point: Vec2,
}

fn default_gravity() -> f32 {
    9.8
}

fn default_max_contacts() -> usize {
    1024
}

/// World-level configuration. Bounds are fixed for the world's lifetime.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Right wall at `x = width`.
    pub width: f32,
    /// Floor at `y = height`.
    pub height: f32,
    /// Initial strength of the default gravity field (+y is down).
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    /// Maximum number of contacts recorded per step; extra are dropped.
    #[serde(default = "default_max_contacts")]
    pub max_contacts: usize,
    /// Enable per-phase timing of `step` (adds small overhead when true).
    #[serde(default)]
    pub enable_timing: bool,
}

impl WorldConfig {
    pub fn with_bounds(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            gravity: default_gravity(),
            max_contacts: default_max_contacts(),
            enable_timing: false,
        }
    }
}

/// Debug statistics for the world and its last step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    pub bodies: usize,
    pub static_bodies: usize,
    /// Registered fields, the default gravity slot included while attached.
    pub forces: usize,
    pub active_forces: usize,
    /// Unordered pairs examined in the last step (n*(n-1)/2).
    pub pairs_tested: usize,
    /// Body-body contacts resolved in the last step.
    pub pair_contacts: usize,
}

/// Timing breakdown for the last completed `step`.
#[derive(Copy, Clone, Debug, Default)]
pub struct StepTiming {
    pub step_ms: f64,
    pub forces_ms: f64,
    pub integrate_ms: f64,
    pub collide_ms: f64,
    pub bounds_ms: f64,
}
