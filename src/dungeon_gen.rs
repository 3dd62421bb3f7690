use crate::constants::*;
use crate::tile::TileType;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A rectangle representing a room or region
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Inclusive overlap test. Rooms that merely share an edge count as
    /// intersecting, which keeps at least one wall tile between rooms.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.x + other.width
            && self.x + self.width >= other.x
            && self.y <= other.y + other.height
            && self.y + self.height >= other.y
    }
}

/// Room placement parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Candidate rooms sampled; not the number of rooms placed
    pub attempts: u32,
    pub min_size: i32,
    pub max_size: i32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            attempts: DUNGEON_ROOM_ATTEMPTS,
            min_size: DUNGEON_MIN_ROOM_SIZE,
            max_size: DUNGEON_MAX_ROOM_SIZE,
        }
    }
}

/// Error type for dungeon generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Every candidate was rejected (or `attempts` was zero)
    NoRooms { attempts: u32 },
    /// Room size bounds are unusable
    InvalidConfig { min_size: i32, max_size: i32 },
    /// The map cannot fit a maximum-size room inside its border
    MapTooSmall { width: usize, height: usize, max_size: i32 },
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::NoRooms { attempts } => {
                write!(f, "no room could be placed in {} attempts", attempts)
            }
            GenerationError::InvalidConfig { min_size, max_size } => {
                write!(f, "invalid room size range {}..={}", min_size, max_size)
            }
            GenerationError::MapTooSmall { width, height, max_size } => write!(
                f,
                "{}x{} map is too small for rooms up to {} tiles",
                width, height, max_size
            ),
        }
    }
}

impl std::error::Error for GenerationError {}

/// Samples candidate rooms and rejects ones that collide with accepted rooms.
pub struct RoomPlanner {
    map_width: i32,
    map_height: i32,
    min_size: i32,
    max_size: i32,
}

impl RoomPlanner {
    pub fn new(map_width: usize, map_height: usize, config: &GeneratorConfig) -> Result<Self, GenerationError> {
        if config.min_size < 1 || config.min_size > config.max_size {
            return Err(GenerationError::InvalidConfig {
                min_size: config.min_size,
                max_size: config.max_size,
            });
        }

        // x is drawn from [1, width - w - 1), which is empty unless width > w + 2
        let fits = |side: usize| side as i64 >= config.max_size as i64 + 3;
        if !fits(map_width) || !fits(map_height) {
            return Err(GenerationError::MapTooSmall {
                width: map_width,
                height: map_height,
                max_size: config.max_size,
            });
        }

        Ok(Self {
            map_width: map_width as i32,
            map_height: map_height as i32,
            min_size: config.min_size,
            max_size: config.max_size,
        })
    }

    /// Draw a candidate room that never touches the outer border.
    /// Draw order is width, height, x, y.
    pub fn sample(&self, rng: &mut impl Rng) -> Rect {
        let w = rng.gen_range(self.min_size..=self.max_size);
        let h = rng.gen_range(self.min_size..=self.max_size);
        let x = rng.gen_range(1..self.map_width - w - 1);
        let y = rng.gen_range(1..self.map_height - h - 1);
        Rect::new(x, y, w, h)
    }

    pub fn accepts(&self, candidate: &Rect, rooms: &[Rect]) -> bool {
        !rooms.iter().any(|room| candidate.intersects(room))
    }
}

/// Carves floor into a row-major tile buffer.
pub struct TunnelCarver<'a> {
    width: usize,
    height: usize,
    tiles: &'a mut [TileType],
}

impl<'a> TunnelCarver<'a> {
    pub fn new(width: usize, height: usize, tiles: &'a mut [TileType]) -> Self {
        debug_assert_eq!(tiles.len(), width * height);
        Self { width, height, tiles }
    }

    fn set_floor(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.tiles[y as usize * self.width + x as usize] = TileType::Floor;
    }

    pub fn carve_room(&mut self, room: &Rect) {
        for y in room.y..room.y + room.height {
            for x in room.x..room.x + room.width {
                self.set_floor(x, y);
            }
        }
    }

    /// Connect two rooms with an L-shaped corridor between their centers.
    pub fn connect(&mut self, from: &Rect, to: &Rect, rng: &mut impl Rng) {
        let (x1, y1) = from.center();
        let (x2, y2) = to.center();

        // Randomly choose to go horizontal-then-vertical or vertical-then-horizontal
        if rng.gen_bool(DUNGEON_HORIZONTAL_FIRST_CHANCE) {
            self.h_corridor(x1, x2, y1);
            self.v_corridor(y1, y2, x2);
        } else {
            self.v_corridor(y1, y2, x1);
            self.h_corridor(x1, x2, y2);
        }
    }

    pub fn h_corridor(&mut self, x1: i32, x2: i32, y: i32) {
        for x in x1.min(x2)..=x1.max(x2) {
            self.set_floor(x, y);
        }
    }

    pub fn v_corridor(&mut self, y1: i32, y2: i32, x: i32) {
        for y in y1.min(y2)..=y1.max(y2) {
            self.set_floor(x, y);
        }
    }
}

/// Result of dungeon generation
pub struct DungeonResult {
    pub tiles: Vec<TileType>,
    pub rooms: Vec<Rect>,
}

pub struct DungeonGenerator;

impl DungeonGenerator {
    /// Place up to `config.attempts` rooms, chaining each new room to the
    /// previous one with a corridor.
    pub fn generate(
        width: usize,
        height: usize,
        config: &GeneratorConfig,
        rng: &mut impl Rng,
    ) -> Result<DungeonResult, GenerationError> {
        puffin::profile_function!();

        let planner = RoomPlanner::new(width, height, config)?;
        let mut tiles = vec![TileType::Wall; width * height];
        let mut rooms: Vec<Rect> = Vec::new();
        let mut rejected = 0u32;

        {
            let mut carver = TunnelCarver::new(width, height, &mut tiles);
            for _ in 0..config.attempts {
                let candidate = planner.sample(rng);
                if !planner.accepts(&candidate, &rooms) {
                    rejected += 1;
                    continue;
                }

                carver.carve_room(&candidate);
                if let Some(prev) = rooms.last() {
                    carver.connect(prev, &candidate, rng);
                }
                rooms.push(candidate);
            }
        }

        if rooms.is_empty() {
            return Err(GenerationError::NoRooms {
                attempts: config.attempts,
            });
        }

        tracing::debug!(
            rooms = rooms.len(),
            rejected,
            width,
            height,
            "generated dungeon"
        );

        Ok(DungeonResult { tiles, rooms })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(0, 0, 10, 10);
        assert_eq!(rect.center(), (5, 5));

        let rect2 = Rect::new(5, 5, 7, 6);
        assert_eq!(rect2.center(), (8, 8));
    }

    #[test]
    fn test_touching_rooms_intersect() {
        let a = Rect::new(1, 1, 6, 6);
        // Shares the x = 7 edge with a
        let b = Rect::new(7, 1, 6, 6);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_gap_of_one_tile_does_not_intersect() {
        let a = Rect::new(1, 1, 6, 6);
        let b = Rect::new(8, 1, 6, 6);
        assert!(!a.intersects(&b));

        let c = Rect::new(1, 8, 6, 6);
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_sampled_rooms_stay_inside_border() {
        let planner = RoomPlanner::new(30, 20, &GeneratorConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let room = planner.sample(&mut rng);
            assert!((6..=12).contains(&room.width));
            assert!((6..=12).contains(&room.height));
            assert!(room.x >= 1 && room.x + room.width <= 30 - 2);
            assert!(room.y >= 1 && room.y + room.height <= 20 - 2);
        }
    }

    #[test]
    fn test_invalid_size_range_rejected() {
        let config = GeneratorConfig { attempts: 5, min_size: 9, max_size: 4 };
        assert_eq!(
            RoomPlanner::new(60, 45, &config).err(),
            Some(GenerationError::InvalidConfig { min_size: 9, max_size: 4 })
        );
    }

    #[test]
    fn test_map_too_small_rejected() {
        let config = GeneratorConfig::default();
        let err = DungeonGenerator::generate(14, 45, &config, &mut StdRng::seed_from_u64(1)).err();
        assert_eq!(
            err,
            Some(GenerationError::MapTooSmall { width: 14, height: 45, max_size: 12 })
        );
        // 15 = 12 + 3 is the smallest usable side
        assert!(DungeonGenerator::generate(15, 15, &config, &mut StdRng::seed_from_u64(1)).is_ok());
    }

    #[test]
    fn test_zero_attempts_is_fatal() {
        let config = GeneratorConfig { attempts: 0, ..GeneratorConfig::default() };
        let err = DungeonGenerator::generate(60, 45, &config, &mut StdRng::seed_from_u64(1)).err();
        assert_eq!(err, Some(GenerationError::NoRooms { attempts: 0 }));
    }

    #[test]
    fn test_corridor_includes_both_endpoints() {
        let mut tiles = vec![TileType::Wall; 10 * 10];
        let mut carver = TunnelCarver::new(10, 10, &mut tiles);
        carver.h_corridor(7, 2, 4);
        carver.v_corridor(1, 3, 5);
        for x in 2..=7 {
            assert_eq!(tiles[4 * 10 + x], TileType::Floor);
        }
        for y in 1..=3 {
            assert_eq!(tiles[y * 10 + 5], TileType::Floor);
        }
        assert_eq!(tiles[4 * 10 + 1], TileType::Wall);
        assert_eq!(tiles[4 * 10 + 8], TileType::Wall);
    }

    #[test]
    fn test_connect_makes_single_bend() {
        let a = Rect::new(1, 1, 4, 4); // center (3, 3)
        let b = Rect::new(10, 12, 4, 4); // center (12, 14)
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..8 {
            let mut tiles = vec![TileType::Wall; 20 * 20];
            TunnelCarver::new(20, 20, &mut tiles).connect(&a, &b, &mut rng);
            let floor = tiles.iter().filter(|t| **t == TileType::Floor).count();
            // 10 horizontal + 12 vertical, sharing the corner tile
            assert_eq!(floor, 10 + 12 - 1);
            let corner_h = tiles[3 * 20 + 12] == TileType::Floor;
            let corner_v = tiles[14 * 20 + 3] == TileType::Floor;
            assert!(corner_h ^ corner_v);
        }
    }
}
