use serde::{Deserialize, Serialize};

/// Material presets for the game's building blocks and projectiles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Stone,
    Wood,
    Brick,
    /// Fallback for unknown block types.
    Generic,
    Cannonball,
}

impl Material {
    pub fn mass(self) -> f32 {
        match self {
            Material::Stone => 3.0,
            Material::Wood => 1.5,
            Material::Brick => 2.5,
            Material::Generic => 2.0,
            Material::Cannonball => 0.8,
        }
    }

    pub fn restitution(self) -> f32 {
        match self {
            Material::Stone => 0.3,
            Material::Wood => 0.5,
            Material::Brick => 0.4,
            Material::Generic => 0.4,
            Material::Cannonball => 0.6,
        }
    }

    pub fn friction(self) -> f32 {
        match self {
            Material::Stone => 0.8,
            Material::Wood => 0.6,
            Material::Brick => 0.7,
            Material::Generic => 0.7,
            Material::Cannonball => 0.3,
        }
    }

    /// Map a numeric block type (0 stone, 1 wood, 2 brick) to its material.
    pub fn from_block_type(block_type: u32) -> Self {
        match block_type {
            0 => Material::Stone,
            1 => Material::Wood,
            2 => Material::Brick,
            _ => Material::Generic,
        }
    }
}
