//! Scene configuration loaded from YAML.
//!
//! A scene is a world configuration plus the force fields and bodies to
//! register, in order:
//!
//! ```yaml
//! world:
//!   width: 500.0
//!   height: 400.0
//!   gravity: 9.8          # default gravity strength (+y is down)
//!   max_contacts: 1024    # optional
//!   enable_timing: false  # optional
//!
//! forces:
//!   - type: drag
//!     coefficient: 0.001
//!   - type: spring
//!     anchor: [250.0, 100.0]
//!     stiffness: 2.0
//!     damping: 0.5
//!
//! bodies:
//!   - position: [0.0, 380.0]
//!     size: [500.0, 20.0]
//!     is_static: true
//!   - position: [200.0, 300.0]
//!     size: [40.0, 40.0]
//!     material: stone
//!   - position: [20.0, 200.0]
//!     size: [12.0, 12.0]
//!     material: cannonball
//!     velocity: [15.0, -5.0]
//! ```
//!
//! Explicit `mass`, `restitution` and `friction` override the material preset.

use std::fs;
use std::path::Path;

use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::api::PhysicsWorldApi;
use crate::body::Body;
use crate::forces::{ForceField, ForceKind};
use crate::material::Material;
use crate::types::{BodyId, WorldConfig};
use crate::world::PhysicsWorld;

/// Error type for scene loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "YAML parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// Initial state of one body in a scene.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BodyConfig {
    /// Top-left corner.
    pub position: Vec2,
    pub size: Vec2,
    #[serde(default)]
    pub velocity: Option<Vec2>,
    #[serde(default)]
    pub material: Option<Material>,
    #[serde(default)]
    pub mass: Option<f32>,
    #[serde(default)]
    pub restitution: Option<f32>,
    #[serde(default)]
    pub friction: Option<f32>,
    #[serde(default)]
    pub is_static: bool,
}

impl BodyConfig {
    /// Mass when neither `mass` nor `material` is given.
    pub const DEFAULT_MASS: f32 = 1.0;

    pub fn build(&self) -> Body {
        let mut body = Body::new(
            self.position.x,
            self.position.y,
            self.size.x,
            self.size.y,
            Self::DEFAULT_MASS,
        );
        if let Some(material) = self.material {
            body = body.with_material(material);
        }
        if let Some(mass) = self.mass {
            body.set_mass(mass);
        }
        if let Some(r) = self.restitution {
            body.set_restitution(r);
        }
        if let Some(fr) = self.friction {
            body.set_friction(fr);
        }
        if let Some(v) = self.velocity {
            body.set_velocity(v);
        }
        body.with_static(self.is_static)
    }
}

/// Top-level scene wrapper.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneConfig {
    pub world: WorldConfig,
    #[serde(default)]
    pub forces: Vec<ForceKind>,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
}

impl SceneConfig {
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }
}

impl PhysicsWorld {
    /// Build a world from a scene. Returns the body ids in scene order.
    pub fn from_scene(scene: &SceneConfig) -> (Self, Vec<BodyId>) {
        let mut world = <Self as PhysicsWorldApi>::new(scene.world.clone());
        for kind in &scene.forces {
            let field = match *kind {
                ForceKind::Gravity { direction } => ForceField::gravity_vector(direction),
                ForceKind::Drag { coefficient } => ForceField::drag(coefficient),
                ForceKind::Spring {
                    anchor,
                    stiffness,
                    damping,
                } => ForceField::spring(anchor, stiffness, damping),
            };
            world.add_force(field);
        }
        let ids = scene.bodies.iter().map(|b| world.add_body(b.build())).collect();
        debug!(
            "loaded scene: {} bodies, {} extra forces",
            scene.bodies.len(),
            scene.forces.len()
        );
        (world, ids)
    }
}
