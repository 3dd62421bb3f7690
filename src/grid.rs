use std::collections::VecDeque;

use rand::Rng;

use crate::dungeon_gen::{DungeonGenerator, GenerationError, GeneratorConfig, Rect};
use crate::tile::TileType;

/// The generated level: a row-major tile grid plus the rooms in the order
/// they were placed. Consecutive rooms are joined by a corridor.
#[derive(Debug, Clone)]
pub struct DungeonMap {
    pub width: usize,
    pub height: usize,
    tiles: Vec<TileType>,
    rooms: Vec<Rect>,
}

impl DungeonMap {
    /// Generate a dungeon. Fails if no room could be placed.
    pub fn generate(
        width: usize,
        height: usize,
        config: &GeneratorConfig,
        rng: &mut impl Rng,
    ) -> Result<Self, GenerationError> {
        let result = DungeonGenerator::generate(width, height, config, rng)?;

        Ok(Self {
            width,
            height,
            tiles: result.tiles,
            rooms: result.rooms,
        })
    }

    pub fn get(&self, x: i32, y: i32) -> Option<TileType> {
        self.index(x, y).map(|idx| self.tiles[idx])
    }

    pub fn is_floor(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|tile| tile.is_walkable())
    }

    /// Row-major tiles, indexed `y * width + x`
    pub fn tiles(&self) -> &[TileType] {
        &self.tiles
    }

    pub fn rooms(&self) -> &[Rect] {
        &self.rooms
    }

    pub fn room_center(&self, index: usize) -> Option<(i32, i32)> {
        self.rooms.get(index).map(Rect::center)
    }

    /// Where the player starts: the center of the first room.
    pub fn start_position(&self) -> (i32, i32) {
        // Generation never yields an empty room list
        self.rooms.first().map(Rect::center).unwrap_or((0, 0))
    }

    /// Flood fill over floor tiles (4-connected). Returns a row-major mask of
    /// reachable cells; empty everywhere if the start is not floor.
    pub fn reachable_from(&self, x: i32, y: i32) -> Vec<bool> {
        let mut reached = vec![false; self.tiles.len()];
        if !self.is_floor(x, y) {
            return reached;
        }

        let mut queue = VecDeque::new();
        if let Some(idx) = self.index(x, y) {
            reached[idx] = true;
        }
        queue.push_back((x, y));

        while let Some((cx, cy)) = queue.pop_front() {
            for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                let (nx, ny) = (cx + dx, cy + dy);
                let Some(idx) = self.index(nx, ny) else {
                    continue;
                };
                if reached[idx] || !self.tiles[idx].is_walkable() {
                    continue;
                }
                reached[idx] = true;
                queue.push_back((nx, ny));
            }
        }

        reached
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generate_seeded(seed: u64) -> DungeonMap {
        let mut rng = StdRng::seed_from_u64(seed);
        DungeonMap::generate(60, 45, &GeneratorConfig::default(), &mut rng).unwrap()
    }

    #[test]
    fn test_dungeon_has_expected_dimensions() {
        let map = generate_seeded(1);
        assert_eq!(map.tiles().len(), 60 * 45);
        assert_eq!(map.get(60, 0), None);
        assert_eq!(map.get(0, 45), None);
        assert_eq!(map.get(-1, 3), None);
    }

    #[test]
    fn test_border_is_always_wall() {
        for seed in 0..20 {
            let map = generate_seeded(seed);
            for x in 0..60 {
                assert_eq!(map.get(x, 0), Some(TileType::Wall));
                assert_eq!(map.get(x, 44), Some(TileType::Wall));
            }
            for y in 0..45 {
                assert_eq!(map.get(0, y), Some(TileType::Wall));
                assert_eq!(map.get(59, y), Some(TileType::Wall));
            }
        }
    }

    #[test]
    fn test_rooms_never_overlap() {
        for seed in 0..50 {
            let map = generate_seeded(seed);
            let rooms = map.rooms();
            assert!(!rooms.is_empty());
            assert!(rooms.len() <= 20);
            for (i, a) in rooms.iter().enumerate() {
                for b in &rooms[i + 1..] {
                    assert!(!a.intersects(b), "seed {}: {:?} overlaps {:?}", seed, a, b);
                }
            }
        }
    }

    #[test]
    fn test_room_footprints_are_floor() {
        let map = generate_seeded(11);
        for room in map.rooms() {
            for y in room.y..room.y + room.height {
                for x in room.x..room.x + room.width {
                    assert!(map.is_floor(x, y));
                }
            }
        }
    }

    #[test]
    fn test_all_rooms_reachable() {
        for seed in 0..50 {
            let map = generate_seeded(seed);
            let (sx, sy) = map.start_position();
            let reached = map.reachable_from(sx, sy);
            for room in map.rooms() {
                let (cx, cy) = room.center();
                assert!(
                    reached[cy as usize * map.width + cx as usize],
                    "seed {}: room {:?} unreachable",
                    seed,
                    room
                );
            }
            // Every floor tile belongs to the single connected component
            let floor = map.tiles().iter().filter(|t| **t == TileType::Floor).count();
            assert_eq!(reached.iter().filter(|r| **r).count(), floor);
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = generate_seeded(42);
        let b = generate_seeded(42);
        assert_eq!(a.rooms(), b.rooms());
        assert_eq!(a.tiles(), b.tiles());
    }

    #[test]
    fn test_reachable_from_wall_is_empty() {
        let map = generate_seeded(5);
        assert!(map.reachable_from(0, 0).iter().all(|r| !r));
    }

    #[test]
    fn test_fixed_sequence_regression() {
        // Weyl sequence: each draw advances the state by a fixed odd step
        let mut rng = StepRng::new(0x0123_4567_89ab_cdef, 0x9e37_79b9_7f4a_7c15);
        let map = DungeonMap::generate(60, 45, &GeneratorConfig::default(), &mut rng).unwrap();
        assert_eq!(map.rooms().len(), 7);
        assert_eq!(map.rooms()[0], Rect::new(27, 2, 9, 6));
        assert_eq!(map.room_center(0), Some((31, 5)));
        assert_eq!(map.start_position(), (31, 5));
        assert_eq!(map.rooms()[6], Rect::new(14, 25, 7, 11));
    }
}
