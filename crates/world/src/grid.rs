//! Row-major tile grids and their headerless binary encoding.
//!
//! On disk a grid is `width * height` consecutive big-endian 16-bit tile ids,
//! row 0 first and columns left to right within each row. There is no header
//! or length prefix; the dimensions come from the level type.

use std::io::{self, Read, Write};

use tradewinds_core::TileId;
use tracing::warn;

use crate::WorldError;

/// Bytes used by one encoded tile id.
pub const BYTES_PER_TILE: usize = 2;

/// Fixed-size grid of tile ids stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<TileId>,
}

impl TileGrid {
    /// Allocate a grid filled with tile id 0.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0)
    }

    /// Allocate a grid with every cell set to `tile`.
    pub fn filled(width: usize, height: usize, tile: TileId) -> Self {
        Self {
            width,
            height,
            tiles: vec![tile; width * height],
        }
    }

    /// Wrap row-major tile data. The slice length must be `width * height`.
    pub fn from_tiles(
        width: usize,
        height: usize,
        tiles: Vec<TileId>,
    ) -> Result<Self, WorldError> {
        let expected = width * height;
        if tiles.len() != expected {
            return Err(WorldError::TileCountMismatch {
                expected,
                found: tiles.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, col: usize, row: usize) -> Option<usize> {
        (col < self.width && row < self.height).then(|| row * self.width + col)
    }

    /// Tile at `(col, row)`, or `None` outside the grid.
    pub fn get(&self, col: usize, row: usize) -> Option<TileId> {
        self.index(col, row).map(|idx| self.tiles[idx])
    }

    /// Overwrite one cell. Out-of-range coordinates leave the grid untouched.
    pub fn set(&mut self, col: usize, row: usize, tile: TileId) -> Result<(), WorldError> {
        let idx = self.index(col, row).ok_or(WorldError::OutOfBounds {
            col: col as i64,
            row: row as i64,
            width: self.width,
            height: self.height,
        })?;
        self.tiles[idx] = tile;
        Ok(())
    }

    /// Borrow all tiles in row-major order.
    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    /// Iterate rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[TileId]> {
        self.tiles.chunks(self.width.max(1))
    }
}

/// How a decoder treats bytes after the last expected tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrailingData {
    Ignore,
    Reject,
}

/// Reads and writes grids of one fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGridCodec {
    width: usize,
    height: usize,
}

impl TileGridCodec {
    /// Codec for grids of `width` columns by `height` rows.
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Tiles per encoded grid.
    pub const fn tile_count(&self) -> usize {
        self.width * self.height
    }

    /// Exact byte length of an encoded grid.
    pub const fn byte_len(&self) -> usize {
        self.tile_count() * BYTES_PER_TILE
    }

    /// Decode one grid. Bytes past the last tile are ignored (and logged).
    pub fn decode<R: Read>(&self, reader: R) -> Result<TileGrid, WorldError> {
        self.decode_with(reader, TrailingData::Ignore)
    }

    /// Decode one grid and fail if the stream holds anything after it.
    pub fn decode_exact<R: Read>(&self, reader: R) -> Result<TileGrid, WorldError> {
        self.decode_with(reader, TrailingData::Reject)
    }

    fn decode_with<R: Read>(
        &self,
        mut reader: R,
        trailing: TrailingData,
    ) -> Result<TileGrid, WorldError> {
        let mut bytes = vec![0u8; self.byte_len()];
        let filled = read_up_to(&mut reader, &mut bytes)?;
        if filled < bytes.len() {
            return Err(WorldError::TruncatedGrid {
                expected: self.tile_count(),
                found: filled / BYTES_PER_TILE,
            });
        }

        match trailing {
            TrailingData::Ignore => {
                let mut next_byte = [0u8; 1];
                if read_up_to(&mut reader, &mut next_byte)? > 0 {
                    warn!(
                        expected_bytes = self.byte_len(),
                        "grid data continues past the last tile; ignoring the remainder"
                    );
                }
            }
            TrailingData::Reject => {
                let extra = io::copy(&mut reader, &mut io::sink())?;
                if extra > 0 {
                    return Err(WorldError::TrailingBytes {
                        extra: extra as usize,
                    });
                }
            }
        }

        let tiles = bytes
            .chunks_exact(BYTES_PER_TILE)
            .map(|pair| TileId::from_be_bytes([pair[0], pair[1]]))
            .collect();
        TileGrid::from_tiles(self.width, self.height, tiles)
    }

    /// Write `grid` in the on-disk layout.
    pub fn encode<W: Write>(&self, grid: &TileGrid, mut writer: W) -> Result<(), WorldError> {
        self.check_dimensions(grid)?;
        writer.write_all(&encode_tiles(grid))?;
        writer.flush()?;
        Ok(())
    }

    /// Encode `grid` into a fresh buffer.
    pub fn to_bytes(&self, grid: &TileGrid) -> Result<Vec<u8>, WorldError> {
        self.check_dimensions(grid)?;
        Ok(encode_tiles(grid))
    }

    /// Ensure `grid` has the dimensions this codec was built for.
    pub fn check_dimensions(&self, grid: &TileGrid) -> Result<(), WorldError> {
        if grid.width() != self.width || grid.height() != self.height {
            return Err(WorldError::DimensionMismatch {
                expected: (self.width, self.height),
                found: (grid.width(), grid.height()),
            });
        }
        Ok(())
    }
}

fn encode_tiles(grid: &TileGrid) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(grid.tiles().len() * BYTES_PER_TILE);
    for tile in grid.tiles() {
        bytes.extend_from_slice(&tile.to_be_bytes());
    }
    bytes
}

/// Fill as much of `buf` as the reader allows; returns the byte count read.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODEC: TileGridCodec = TileGridCodec::new(3, 2);

    #[test]
    fn decodes_row_major_big_endian() {
        let bytes = [0, 1, 0, 2, 0, 3, 1, 0, 0xff, 0xff, 0, 0];
        let grid = CODEC.decode(&bytes[..]).expect("decode");
        assert_eq!(grid.get(0, 0), Some(1));
        assert_eq!(grid.get(2, 0), Some(3));
        assert_eq!(grid.get(0, 1), Some(256));
        assert_eq!(grid.get(1, 1), Some(0xffff));
        assert_eq!(grid.rows().count(), 2);
    }

    #[test]
    fn short_input_reports_tiles_found() {
        let bytes = [0u8; 7];
        match CODEC.decode(&bytes[..]) {
            Err(WorldError::TruncatedGrid { expected, found }) => {
                assert_eq!(expected, 6);
                assert_eq!(found, 3);
            }
            other => panic!("expected truncation, got {other:?}"),
        }
    }

    #[test]
    fn trailing_bytes_ignored_by_default_but_rejected_when_exact() {
        let mut bytes = vec![0u8; CODEC.byte_len()];
        bytes.extend_from_slice(&[9, 9, 9]);
        assert_eq!(CODEC.decode(&bytes[..]).expect("lenient"), TileGrid::new(3, 2));
        assert!(matches!(
            CODEC.decode_exact(&bytes[..]),
            Err(WorldError::TrailingBytes { extra: 3 })
        ));
    }

    #[test]
    fn encode_rejects_wrong_dimensions() {
        let grid = TileGrid::new(2, 3);
        assert!(matches!(
            CODEC.to_bytes(&grid),
            Err(WorldError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn set_out_of_range_leaves_grid_unchanged() {
        let mut grid = TileGrid::filled(3, 2, 7);
        let before = grid.clone();
        assert!(matches!(
            grid.set(3, 0, 1),
            Err(WorldError::OutOfBounds { col: 3, row: 0, .. })
        ));
        assert!(grid.set(0, 2, 1).is_err());
        assert_eq!(grid, before);
    }

    #[test]
    fn from_tiles_checks_length() {
        assert!(TileGrid::from_tiles(2, 2, vec![0; 3]).is_err());
        assert!(TileGrid::from_tiles(2, 2, vec![0; 4]).is_ok());
    }
}
