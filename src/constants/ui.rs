//! Minimap constants.

/// Minimap wall color
pub const MINIMAP_WALL_COLOR: [u8; 3] = [40, 40, 40];
/// Minimap floor color
pub const MINIMAP_FLOOR_COLOR: [u8; 3] = [150, 150, 150];
/// Pixels per tile on the minimap
pub const MINIMAP_DEFAULT_SCALE: u32 = 4;
