#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod collision;
pub mod country;

pub use collision::{CollisionType, Direction};
pub use country::{Country, CountryParseError};

/// Tile identifier stored in port grids and classification tables.
///
/// Ids are not dense: a grid may reference ids that the collision table never
/// mentions.
pub type TileId = u16;

/// Side length of a square tile in pixels.
pub const TILE_SIZE: u32 = 32;
