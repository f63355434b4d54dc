//! The contract every playable level type satisfies.
//!
//! Levels wrap horizontally: walking off the right edge re-enters on the left.
//! Vertical coordinates do not wrap.
//!
//! Coordinates passed to [`LevelView::is_enterable`] and
//! [`LevelView::is_passable`] are pixels, with tiles [`TILE_SIZE`] pixels
//! square. Grid mutation and [`LevelView::tile`] take tile coordinates.

use tradewinds_core::{CollisionType, Direction, TileId, TILE_SIZE};

use crate::{CollisionRegistry, LookupPolicy, TileGrid, WorldError};

/// Map `x` into `[0, period)` so that `x` and `x + k * period` agree.
///
/// Non-finite `x` has no position on the ring and maps to `0.0`.
pub fn wrap_coordinate(x: f64, period: f64) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }
    // Adding zero folds -0.0 into 0.0.
    let wrapped = x.rem_euclid(period) + 0.0;
    // rem_euclid can round up to `period` for tiny negative inputs.
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}

/// Screen window a level is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// World x (pixels) shown at the window's left edge.
    pub origin_x: f64,
    /// World y (pixels) shown at the window's top edge.
    pub origin_y: f64,
    /// Screen x of the window's left edge.
    pub screen_x: i32,
    /// Screen y of the window's top edge.
    pub screen_y: i32,
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
}

/// Drawing surface supplied by the presentation layer.
pub trait TileCanvas {
    /// Draw `tile` with its top-left corner at screen pixel `(x, y)`.
    fn draw_tile(&mut self, tile: TileId, x: i32, y: i32);
}

/// Operations shared by every level type.
pub trait LevelView {
    /// Tile grid backing the level.
    fn grid(&self) -> &TileGrid;

    /// Collision table the level classifies tiles with.
    fn registry(&self) -> &CollisionRegistry;

    /// How unregistered tile ids are treated.
    fn lookup_policy(&self) -> LookupPolicy;

    /// Replace the tile at `(col, row)`; fails without side effects when out of range.
    fn set_tile(&mut self, col: usize, row: usize, tile: TileId) -> Result<(), WorldError>;

    /// Width in tiles.
    fn width(&self) -> usize {
        self.grid().width()
    }

    /// Height in tiles.
    fn height(&self) -> usize {
        self.grid().height()
    }

    /// Tile at `(col, row)`.
    fn tile(&self, col: usize, row: usize) -> Option<TileId> {
        self.grid().get(col, row)
    }

    /// Horizontal period of the level in pixels.
    fn pixel_width(&self) -> f64 {
        (self.width() as u64 * TILE_SIZE as u64) as f64
    }

    /// Normalise a horizontal pixel coordinate into `[0, pixel_width)`.
    fn wrap_col(&self, x: f64) -> f64 {
        wrap_coordinate(x, self.pixel_width())
    }

    /// Collision type of the tile under pixel `(x, y)`.
    fn collision_at(&self, x: i64, y: i64) -> Result<CollisionType, WorldError> {
        let (col, row) = pixel_to_tile(self.width(), self.height(), x, y)?;
        let tile = self.grid().get(col, row).ok_or(WorldError::OutOfBounds {
            col: col as i64,
            row: row as i64,
            width: self.width(),
            height: self.height(),
        })?;
        self.registry().lookup(tile, self.lookup_policy())
    }

    /// Whether the tile under pixel `(x, y)` can be crossed moving in `direction`.
    fn is_passable(&self, x: i64, y: i64, direction: Direction) -> Result<bool, WorldError> {
        Ok(self.collision_at(x, y)?.passable(direction))
    }

    /// Whether the tile under pixel `(x, y)` can be entered at all, i.e. is
    /// passable in at least one direction. Use [`LevelView::is_passable`] when
    /// the direction of travel matters.
    fn is_enterable(&self, x: i64, y: i64) -> Result<bool, WorldError> {
        Ok(self.collision_at(x, y)?.any_passable())
    }

    /// Draw the tiles visible through `viewport`. Never mutates the level.
    fn render(&self, canvas: &mut dyn TileCanvas, viewport: Viewport) {
        let width = self.width();
        let height = self.height();
        if width == 0 || height == 0 {
            return;
        }
        let size = TILE_SIZE as f64;
        let left = self.wrap_col(viewport.origin_x);
        let first_col = (left / size).floor() as i64;
        let first_row = (viewport.origin_y / size).floor() as i64;
        let offset_x = (left - first_col as f64 * size).round() as i32;
        let offset_y = (viewport.origin_y - first_row as f64 * size).round() as i32;
        let cols = viewport.width / TILE_SIZE + 2;
        let rows = viewport.height / TILE_SIZE + 2;

        for dy in 0..rows as i64 {
            let row = first_row + dy;
            if row < 0 || row >= height as i64 {
                continue;
            }
            let screen_y = viewport.screen_y - offset_y + (dy as i32) * TILE_SIZE as i32;
            if screen_y >= viewport.screen_y + viewport.height as i32 {
                break;
            }
            for dx in 0..cols as i64 {
                let screen_x = viewport.screen_x - offset_x + (dx as i32) * TILE_SIZE as i32;
                if screen_x >= viewport.screen_x + viewport.width as i32 {
                    break;
                }
                let col = (first_col + dx).rem_euclid(width as i64) as usize;
                if let Some(tile) = self.grid().get(col, row as usize) {
                    canvas.draw_tile(tile, screen_x, screen_y);
                }
            }
        }
    }
}

/// Convert a pixel position to tile coordinates, wrapping x and bounding y.
fn pixel_to_tile(width: usize, height: usize, x: i64, y: i64) -> Result<(usize, usize), WorldError> {
    let size = TILE_SIZE as i64;
    let row = y.div_euclid(size);
    if width == 0 || row < 0 || row >= height as i64 {
        return Err(WorldError::OutOfBounds {
            col: x.div_euclid(size),
            row,
            width,
            height,
        });
    }
    let col = x.rem_euclid(width as i64 * size) / size;
    Ok((col as usize, row as usize))
}
