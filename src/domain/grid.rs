/// TileGrid — the world's terrain, a fixed-size 2D array of tiles.
///
/// Coordinates:
///   - 1 world unit == 1 tile, +y is up.
///   - A tile's origin is its floor corner: world point (wx, wy) falls in
///     cell `(floor(wx), floor(wy))`.
///
/// Out-of-bounds queries answer "not solid" rather than erroring; level
/// boundaries are expected to be authored as explicit wall tiles.

use glam::Vec2;

use super::tile::Tile;

#[derive(Clone, Debug)]
pub struct TileGrid {
    tiles: Vec<Tile>,
    cols: usize,
    rows: usize,
}

impl TileGrid {
    /// Create an all-empty grid of the given size.
    pub fn new(cols: usize, rows: usize) -> Self {
        TileGrid { tiles: vec![Tile::Empty; cols * rows], cols, rows }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Tile at grid cell (x, y). None when out of bounds.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Tile> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.cols || y >= self.rows {
            return None;
        }
        Some(self.tiles[y * self.cols + x])
    }

    /// Set a tile. No-op out of bounds (editor-facing; the sim never
    /// mutates terrain mid-frame).
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.cols && y < self.rows {
            self.tiles[y * self.cols + x] = tile;
        }
    }

    /// World coordinate → grid cell.
    #[inline]
    pub fn world_to_grid(wx: f32, wy: f32) -> (i32, i32) {
        (wx.floor() as i32, wy.floor() as i32)
    }

    /// Is the world point inside a solid tile? Out of bounds → false.
    #[inline]
    pub fn point_solid(&self, wx: f32, wy: f32) -> bool {
        let (gx, gy) = Self::world_to_grid(wx, wy);
        self.get(gx, gy).map_or(false, Tile::is_solid)
    }

    /// Is the world point inside a hazard tile?
    #[inline]
    pub fn point_hazard(&self, wx: f32, wy: f32) -> bool {
        let (gx, gy) = Self::world_to_grid(wx, wy);
        self.get(gx, gy).map_or(false, Tile::is_hazard)
    }

    /// Does a box (center + full size) overlap solid terrain?
    ///
    /// Tests only the four corners. This is deliberately NOT a swept or
    /// clipped test: actors are smaller than one tile, so a corner check
    /// is sufficient. A solid strip thinner than the gap between two
    /// opposite corners can slip through — known approximation, kept.
    pub fn box_solid(&self, center: Vec2, size: Vec2) -> bool {
        let half = size * 0.5;
        self.point_solid(center.x - half.x, center.y - half.y)
            || self.point_solid(center.x + half.x, center.y - half.y)
            || self.point_solid(center.x - half.x, center.y + half.y)
            || self.point_solid(center.x + half.x, center.y + half.y)
    }

    /// Does a box overlap hazard terrain? Four-corner sampling, as above.
    pub fn box_hazard(&self, center: Vec2, size: Vec2) -> bool {
        let half = size * 0.5;
        self.point_hazard(center.x - half.x, center.y - half.y)
            || self.point_hazard(center.x + half.x, center.y - half.y)
            || self.point_hazard(center.x - half.x, center.y + half.y)
            || self.point_hazard(center.x + half.x, center.y + half.y)
    }
}
