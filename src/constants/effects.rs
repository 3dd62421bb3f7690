//! Transient visual effect durations, in frames.

/// Hit flash length, re-armed on every hit
pub const FLASH_DURATION: u32 = 10;
/// Pickup burst length for collected loot
pub const SPARKLE_DURATION: u32 = 10;
/// Fade-out length for defeated enemies and felled trees
pub const DEATH_FADE_DURATION: u32 = 20;
