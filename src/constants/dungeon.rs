//! Dungeon generation constants.

/// Number of room placement attempts per generation
pub const DUNGEON_ROOM_ATTEMPTS: u32 = 20;
/// Minimum room side length (inclusive)
pub const DUNGEON_MIN_ROOM_SIZE: i32 = 6;
/// Maximum room side length (inclusive)
pub const DUNGEON_MAX_ROOM_SIZE: i32 = 12;
/// Probability of carving a corridor horizontal-first
pub const DUNGEON_HORIZONTAL_FIRST_CHANCE: f64 = 0.5;
/// Default dungeon width
pub const DUNGEON_DEFAULT_WIDTH: usize = 60;
/// Default dungeon height
pub const DUNGEON_DEFAULT_HEIGHT: usize = 45;
