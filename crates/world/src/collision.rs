//! Tile id → passability lookup shared by every level.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tradewinds_core::{CollisionType, TileId};
use tracing::warn;

use crate::WorldError;

/// What a lookup does with a tile id the registry has never seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupPolicy {
    /// Fail with [`WorldError::UnknownTileId`].
    #[default]
    Strict,
    /// Treat the tile as blocked from every side.
    Lenient,
}

/// Immutable mapping from tile ids to collision classes.
///
/// Built once through [`CollisionRegistryBuilder`] and then shared read-only
/// (usually behind an `Arc`) by every level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionRegistry {
    classes: Vec<CollisionType>,
    /// Ordered map keeps iteration deterministic for tooling output.
    tiles: BTreeMap<TileId, usize>,
}

impl CollisionRegistry {
    /// Start a registry over the declared collision classes.
    pub fn builder(classes: Vec<CollisionType>) -> CollisionRegistryBuilder {
        CollisionRegistryBuilder {
            registry: CollisionRegistry {
                classes,
                tiles: BTreeMap::new(),
            },
        }
    }

    /// Collision type registered for `tile`.
    pub fn classify(&self, tile: TileId) -> Result<CollisionType, WorldError> {
        self.tiles
            .get(&tile)
            .map(|&class| self.classes[class])
            .ok_or(WorldError::UnknownTileId(tile))
    }

    /// Collision type for `tile`, treating unregistered ids as blocked.
    pub fn classify_or_blocked(&self, tile: TileId) -> CollisionType {
        self.classify(tile).unwrap_or_else(|_| {
            warn!(tile, "tile id has no collision entry; treating as blocked");
            CollisionType::BLOCKED
        })
    }

    /// Classify according to `policy`.
    pub fn lookup(&self, tile: TileId, policy: LookupPolicy) -> Result<CollisionType, WorldError> {
        match policy {
            LookupPolicy::Strict => self.classify(tile),
            LookupPolicy::Lenient => Ok(self.classify_or_blocked(tile)),
        }
    }

    /// Whether `tile` has an entry.
    pub fn contains(&self, tile: TileId) -> bool {
        self.tiles.contains_key(&tile)
    }

    /// Number of registered tile ids.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns true when no tile ids are registered.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of declared collision classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Collision type declared at `index`.
    pub fn class(&self, index: usize) -> Option<CollisionType> {
        self.classes.get(index).copied()
    }

    /// Iterate `(tile id, class index)` pairs in ascending tile id order.
    pub fn iter(&self) -> impl Iterator<Item = (TileId, usize)> + '_ {
        self.tiles.iter().map(|(&tile, &class)| (tile, class))
    }
}

/// Mutable stage of a [`CollisionRegistry`]; consumed by [`build`](Self::build).
#[derive(Debug)]
pub struct CollisionRegistryBuilder {
    registry: CollisionRegistry,
}

impl CollisionRegistryBuilder {
    /// Map `tile` to the class declared at `class_index`.
    ///
    /// A later assignment for the same tile replaces the earlier one.
    pub fn assign(&mut self, tile: TileId, class_index: usize) -> Result<&mut Self, WorldError> {
        let count = self.registry.classes.len();
        if class_index >= count {
            return Err(WorldError::UnknownCollisionClass {
                index: class_index,
                count,
            });
        }
        if let Some(previous) = self.registry.tiles.insert(tile, class_index) {
            if previous != class_index {
                warn!(tile, previous, class_index, "collision entry reassigned");
            }
        }
        Ok(self)
    }

    /// Freeze the registry.
    pub fn build(self) -> CollisionRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradewinds_core::Direction;

    fn sample() -> CollisionRegistry {
        let mut builder = CollisionRegistry::builder(vec![
            CollisionType::OPEN,
            CollisionType::BLOCKED,
            CollisionType::new([false, true, false, true]),
        ]);
        builder
            .assign(0, 0)
            .and_then(|b| b.assign(12, 1))
            .and_then(|b| b.assign(40, 2))
            .expect("valid classes");
        builder.build()
    }

    #[test]
    fn classifies_registered_tiles() {
        let registry = sample();
        assert_eq!(registry.classify(0).unwrap(), CollisionType::OPEN);
        assert_eq!(registry.classify(12).unwrap(), CollisionType::BLOCKED);
        let ramp = registry.classify(40).unwrap();
        assert!(ramp.passable(Direction::Down));
        assert!(!ramp.passable(Direction::Up));
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.class_count(), 3);
    }

    #[test]
    fn unknown_tile_is_an_error_in_strict_mode() {
        let registry = sample();
        assert!(matches!(
            registry.classify(999),
            Err(WorldError::UnknownTileId(999))
        ));
        assert!(registry.lookup(999, LookupPolicy::Strict).is_err());
    }

    #[test]
    fn unknown_tile_is_blocked_in_lenient_mode() {
        let registry = sample();
        assert_eq!(registry.classify_or_blocked(999), CollisionType::BLOCKED);
        assert_eq!(
            registry.lookup(999, LookupPolicy::Lenient).unwrap(),
            CollisionType::BLOCKED
        );
    }

    #[test]
    fn class_index_out_of_range_is_rejected() {
        let mut builder = CollisionRegistry::builder(vec![CollisionType::OPEN]);
        assert!(matches!(
            builder.assign(5, 1),
            Err(WorldError::UnknownCollisionClass { index: 1, count: 1 })
        ));
        assert!(builder.build().is_empty());
    }

    #[test]
    fn later_assignment_wins_and_iteration_is_sorted() {
        let mut builder = CollisionRegistry::builder(vec![CollisionType::OPEN, CollisionType::BLOCKED]);
        builder
            .assign(9, 0)
            .and_then(|b| b.assign(3, 0))
            .and_then(|b| b.assign(9, 1))
            .expect("valid");
        let registry = builder.build();
        assert_eq!(registry.iter().collect::<Vec<_>>(), vec![(3, 0), (9, 1)]);
    }
}
