//! Fog of war: the set of tiles the torch has ever lit.
//!
//! Cells are indexed exactly like [`DungeonMap`](crate::grid::DungeonMap)
//! tiles (`y * width + x`), and once explored they stay explored.

use crate::grid::DungeonMap;

/// Read-only copy of the explored mask, handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityGrid {
    pub width: usize,
    pub height: usize,
    cells: Vec<bool>,
}

impl VisibilityGrid {
    pub fn get(&self, x: i32, y: i32) -> Option<bool> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.cells[y as usize * self.width + x as usize])
    }

    /// Row-major cells, indexed `y * width + x`
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }
}

pub struct VisibilityTracker {
    grid: VisibilityGrid,
}

impl VisibilityTracker {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid: VisibilityGrid {
                width,
                height,
                cells: vec![false; width * height],
            },
        }
    }

    /// Tracker sized to match a dungeon.
    pub fn for_map(map: &DungeonMap) -> Self {
        Self::new(map.width, map.height)
    }

    pub fn width(&self) -> usize {
        self.grid.width
    }

    pub fn height(&self) -> usize {
        self.grid.height
    }

    /// Mark every cell within `radius` of `center` (inclusive) as explored.
    ///
    /// Scans the whole grid; call at most once per frame and skip it while the
    /// torch is out. A non-positive radius does nothing.
    ///
    /// # Panics
    /// If `center` lies outside the grid.
    pub fn update(&mut self, center: (i32, i32), radius: i32) {
        puffin::profile_function!();

        self.assert_in_range(center.0, center.1);
        if radius <= 0 {
            return;
        }

        let (cx, cy) = center;
        let radius_sq = radius as i64 * radius as i64;
        let width = self.grid.width;

        for y in 0..self.grid.height {
            let dy = y as i64 - cy as i64;
            let row = &mut self.grid.cells[y * width..(y + 1) * width];
            for (x, cell) in row.iter_mut().enumerate() {
                let dx = x as i64 - cx as i64;
                if dx * dx + dy * dy <= radius_sq {
                    *cell = true;
                }
            }
        }
    }

    /// # Panics
    /// If `(x, y)` lies outside the grid.
    pub fn is_explored(&self, x: i32, y: i32) -> bool {
        self.assert_in_range(x, y);
        self.grid.cells[y as usize * self.grid.width + x as usize]
    }

    /// Non-panicking lookup; `None` outside the grid.
    pub fn explored_at(&self, x: i32, y: i32) -> Option<bool> {
        self.grid.get(x, y)
    }

    pub fn explored_count(&self) -> usize {
        self.grid.cells.iter().filter(|c| **c).count()
    }

    pub fn snapshot(&self) -> VisibilityGrid {
        self.grid.clone()
    }

    /// Borrowed view of the explored mask, for renderers that draw every frame.
    pub fn view(&self) -> &VisibilityGrid {
        &self.grid
    }

    fn assert_in_range(&self, x: i32, y: i32) {
        assert!(
            self.grid.get(x, y).is_some(),
            "IndexOutOfRange: ({}, {}) outside {}x{} visibility grid",
            x,
            y,
            self.grid.width,
            self.grid.height
        );
    }
}
