//! Core gameplay constants (torch, objects).

/// Base torch radius in tiles
pub const TORCH_BASE_RADIUS: f32 = 7.0;
/// Flicker phase advance per lit frame (radians)
pub const TORCH_FLICKER_SPEED: f32 = 0.1;
/// Flicker amplitude in tiles
pub const TORCH_FLICKER_AMPLITUDE: f32 = 1.0;

/// Starting health of every spawned object
pub const OBJECT_STARTING_HEALTH: i32 = 100;

/// Projectile enemies take damage from this far away (tiles)
pub const PROJECTILE_ENEMY_REACH: f32 = 5.0;
/// Damage dealt to a projectile enemy per frame in reach
pub const PROJECTILE_ENEMY_DAMAGE: i32 = 10;
/// Sword enemies must be adjacent (diagonals included)
pub const SWORD_ENEMY_REACH: f32 = 1.5;
/// Damage dealt to a sword enemy per frame in reach
pub const SWORD_ENEMY_DAMAGE: i32 = 20;
/// Pickup distance for trees and loot (tiles)
pub const COLLECT_REACH: f32 = 2.0;
