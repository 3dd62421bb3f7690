//! Fog-of-war minimap rendering.

use image::{Rgb, RgbImage};

use crate::grid::DungeonMap;
use crate::visibility::VisibilityGrid;

/// Render explored tiles as `scale`-sized blocks; unexplored tiles stay black.
///
/// A `scale` of 0 is treated as 1.
pub fn render_minimap(map: &DungeonMap, visibility: &VisibilityGrid, scale: u32) -> RgbImage {
    puffin::profile_function!();

    let scale = scale.max(1);
    let mut img = RgbImage::new(map.width as u32 * scale, map.height as u32 * scale);

    for y in 0..map.height as i32 {
        for x in 0..map.width as i32 {
            if visibility.get(x, y) != Some(true) {
                continue;
            }
            let Some(tile) = map.get(x, y) else {
                continue;
            };
            let color = Rgb(tile.minimap_color());
            let (px, py) = (x as u32 * scale, y as u32 * scale);
            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(px + dx, py + dy, color);
                }
            }
        }
    }

    img
}
