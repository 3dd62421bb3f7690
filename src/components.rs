use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::vfx::EffectKind;

/// Position component - world coordinates (grid-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    /// Euclidean distance in tiles
    pub fn distance_to(&self, x: i32, y: i32) -> f32 {
        self.as_vec2().distance(Vec2::new(x as f32, y as f32))
    }
}

/// Health component
#[derive(Debug, Clone, Copy)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self {
            current: max,
            max,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.current <= 0
    }
}

/// The closed set of things that can stand in the dungeon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    ProjectileEnemy,
    SwordEnemy,
    Tree,
    Loot,
}

/// Capability: loses health while the player stays within `reach`
#[derive(Debug, Clone, Copy)]
pub struct Damageable {
    pub reach: f32,
    /// Damage taken per frame in reach
    pub damage: i32,
}

/// Capability: picked up once the player comes within `reach`
#[derive(Debug, Clone, Copy)]
pub struct Collectible {
    pub reach: f32,
    pub collected: bool,
    /// Effect played after collection (sparkle for loot, shrink for trees)
    pub fade: EffectKind,
}

/// Where an object is on its way out of the active set
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lifecycle {
    /// Still in play
    Alive,
    /// Defeated or collected; stays only to animate this terminal effect
    Fading(EffectKind),
    /// Terminal effect finished; safe to despawn
    Expired,
}
