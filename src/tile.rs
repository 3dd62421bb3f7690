use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    #[default]
    Wall,
    Floor,
}

impl TileType {
    pub fn is_walkable(&self) -> bool {
        matches!(self, TileType::Floor)
    }

    /// Minimap color for this tile type
    pub fn minimap_color(&self) -> [u8; 3] {
        match self {
            TileType::Wall => crate::constants::MINIMAP_WALL_COLOR,
            TileType::Floor => crate::constants::MINIMAP_FLOOR_COLOR,
        }
    }
}
