//! Force fields evaluated against every dynamic body each step.
//!
//! Fields never touch bodies themselves; they return a force vector which the
//! world feeds into [`Body::apply_force`]. The variant set is closed:
//!
//! - **Gravity**: `direction * mass`, a uniform acceleration once divided by mass
//! - **Drag**: opposes velocity with magnitude `coefficient * speed²`
//! - **Spring**: pulls the body's center toward an anchor, damped by velocity

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::body::Body;

/// Force model parameters.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ForceKind {
    Gravity { direction: Vec2 },
    Drag { coefficient: f32 },
    Spring { anchor: Vec2, stiffness: f32, damping: f32 },
}

/// A registered force field. Inactive fields stay registered but contribute nothing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ForceField {
    kind: ForceKind,
    magnitude: f32,
    active: bool,
}

impl ForceField {
    pub fn new(kind: ForceKind, magnitude: f32) -> Self {
        Self {
            kind,
            magnitude,
            active: true,
        }
    }

    /// Vertical gravity of the given strength (+y is down).
    pub fn gravity(strength: f32) -> Self {
        Self::gravity_vector(Vec2::new(0.0, strength))
    }

    pub fn gravity_vector(direction: Vec2) -> Self {
        Self::new(ForceKind::Gravity { direction }, direction.length())
    }

    pub fn drag(coefficient: f32) -> Self {
        Self::new(ForceKind::Drag { coefficient }, coefficient)
    }

    pub fn spring(anchor: Vec2, stiffness: f32, damping: f32) -> Self {
        Self::new(
            ForceKind::Spring {
                anchor,
                stiffness,
                damping,
            },
            stiffness,
        )
    }

    pub fn kind(&self) -> &ForceKind {
        &self.kind
    }

    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    pub fn set_magnitude(&mut self, magnitude: f32) {
        self.magnitude = magnitude;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_gravity(&self) -> bool {
        matches!(self.kind, ForceKind::Gravity { .. })
    }

    /// Replace a gravity field's vector and refresh its magnitude.
    /// Returns false (and changes nothing) for other kinds.
    pub fn set_gravity_vector(&mut self, g: Vec2) -> bool {
        match &mut self.kind {
            ForceKind::Gravity { direction } => {
                *direction = g;
                self.magnitude = g.length();
                true
            }
            _ => false,
        }
    }

    /// Instantaneous force on `body`. Zero when inactive or the body is static.
    pub fn calculate(&self, body: &Body) -> Vec2 {
        if !self.active || body.is_static() {
            return Vec2::ZERO;
        }
        match self.kind {
            ForceKind::Gravity { direction } => direction * body.mass(),
            ForceKind::Drag { coefficient } => {
                let v = body.velocity();
                let speed = v.length();
                if speed == 0.0 {
                    return Vec2::ZERO;
                }
                -(v / speed) * (coefficient * speed * speed)
            }
            ForceKind::Spring {
                anchor,
                stiffness,
                damping,
            } => {
                let displacement = anchor - body.center();
                displacement * stiffness - body.velocity() * damping
            }
        }
    }
}
