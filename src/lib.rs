//! tumble: 2D axis-aligned rigid-body physics (forces, integration, collision response)

pub mod types;
pub mod api;
pub mod body;
pub mod forces;
pub mod material;
pub mod narrowphase;
pub mod world;
pub mod config;

pub use crate::types::*;
pub use crate::api::*;
pub use crate::body::Body;
pub use crate::forces::{ForceField, ForceKind};
pub use crate::material::Material;
pub use crate::world::PhysicsWorld;
pub use crate::config::{BodyConfig, ConfigError, SceneConfig};
