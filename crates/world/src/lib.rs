#![warn(missing_docs)]
//! Port levels: tile grids, their binary codec, collision lookup and the
//! level contract gameplay code talks to.

mod collision;
mod grid;
mod level;
mod port;

pub use collision::{CollisionRegistry, CollisionRegistryBuilder, LookupPolicy};
pub use grid::{TileGrid, TileGridCodec, BYTES_PER_TILE};
pub use level::{wrap_coordinate, LevelView, TileCanvas, Viewport};
pub use port::{Port, PortInfo, PortMap};

use thiserror::Error;
use tradewinds_core::TileId;

/// Errors raised by grid, codec and level operations.
#[derive(Debug, Error)]
pub enum WorldError {
    /// Grid data ended before every tile was read.
    #[error("grid data truncated: expected {expected} tiles, found {found}")]
    TruncatedGrid {
        /// Tiles the level type requires.
        expected: usize,
        /// Complete tiles present in the input.
        found: usize,
    },
    /// Strict decoding found bytes after the last tile.
    #[error("grid data has {extra} unexpected trailing bytes")]
    TrailingBytes {
        /// Number of surplus bytes.
        extra: usize,
    },
    /// Tile data length does not match the grid dimensions.
    #[error("expected {expected} tiles, got {found}")]
    TileCountMismatch {
        /// `width * height`.
        expected: usize,
        /// Length supplied.
        found: usize,
    },
    /// A grid of the wrong size was handed to a fixed-size level or codec.
    #[error("grid is {}x{}, expected {}x{}", .found.0, .found.1, .expected.0, .expected.1)]
    DimensionMismatch {
        /// Required (width, height).
        expected: (usize, usize),
        /// Supplied (width, height).
        found: (usize, usize),
    },
    /// Classification was requested for a tile id with no registry entry.
    #[error("tile id {0} has no collision entry")]
    UnknownTileId(TileId),
    /// A classification entry referenced an undeclared collision class.
    #[error("collision class {index} is out of range ({count} classes declared)")]
    UnknownCollisionClass {
        /// Referenced class index.
        index: usize,
        /// Number of declared classes.
        count: usize,
    },
    /// Tile coordinates outside the grid.
    #[error("tile ({col}, {row}) is outside the {width}x{height} grid")]
    OutOfBounds {
        /// Requested column.
        col: i64,
        /// Requested row.
        row: i64,
        /// Grid width in tiles.
        width: usize,
        /// Grid height in tiles.
        height: usize,
    },
    /// Underlying reader or writer failed.
    #[error("grid I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
