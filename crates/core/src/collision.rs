//! Directional passability.
//!
//! A [`CollisionType`] records, per cardinal [`Direction`], whether a tile can
//! be crossed that way. Classification files list the four flags in
//! [`Direction::ALL`] order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cardinal directions in classification-file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// Toward decreasing rows.
    Up = 0,
    /// Toward increasing rows.
    Down = 1,
    /// Toward decreasing columns.
    Left = 2,
    /// Toward increasing columns.
    Right = 3,
}

impl Direction {
    /// Every direction, in the order flags appear on disk.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Position of this direction inside a [`CollisionType`].
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// Passability flags for the four cardinal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionType([bool; 4]);

impl CollisionType {
    /// Impassable from every side.
    pub const BLOCKED: Self = Self([false; 4]);
    /// Passable from every side.
    pub const OPEN: Self = Self([true; 4]);

    /// Build from flags ordered as [`Direction::ALL`].
    pub const fn new(flags: [bool; 4]) -> Self {
        Self(flags)
    }

    /// Whether the tile may be crossed in `direction`.
    pub const fn passable(self, direction: Direction) -> bool {
        self.0[direction.index()]
    }

    /// True when at least one direction is passable.
    pub fn any_passable(self) -> bool {
        self.0.iter().any(|&flag| flag)
    }

    /// Raw flags in [`Direction::ALL`] order.
    pub const fn flags(self) -> [bool; 4] {
        self.0
    }
}

impl Default for CollisionType {
    fn default() -> Self {
        Self::BLOCKED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_follow_direction_order() {
        let kind = CollisionType::new([true, false, false, true]);
        assert!(kind.passable(Direction::Up));
        assert!(!kind.passable(Direction::Down));
        assert!(!kind.passable(Direction::Left));
        assert!(kind.passable(Direction::Right));
        assert!(kind.any_passable());
    }

    #[test]
    fn blocked_and_open_are_extremes() {
        assert!(!CollisionType::BLOCKED.any_passable());
        assert_eq!(CollisionType::OPEN.flags(), [true; 4]);
        assert_eq!(CollisionType::default(), CollisionType::BLOCKED);
    }

    #[test]
    fn directions_index_their_disk_position() {
        for (position, dir) in Direction::ALL.into_iter().enumerate() {
            assert_eq!(dir.index(), position);
        }
        assert_eq!(Direction::Left.to_string(), "left");
    }
}
