//! Port levels.
//!
//! [`PortMap`] is the bare level used by editing tools: a grid bound to the
//! shared collision registry. [`Port`] adds the metadata and entity lists a
//! playable port carries.

use std::sync::Arc;

use tradewinds_core::{Country, TileId};

use crate::{CollisionRegistry, LevelView, LookupPolicy, TileGrid, TileGridCodec, WorldError};

/// Tile grid bound to a shared collision registry.
#[derive(Debug, Clone)]
pub struct PortMap {
    grid: TileGrid,
    registry: Arc<CollisionRegistry>,
    policy: LookupPolicy,
}

impl PortMap {
    /// Port width in tiles.
    pub const WIDTH: usize = 96;
    /// Port height in tiles.
    pub const HEIGHT: usize = 64;
    /// Codec for port grid files.
    pub const CODEC: TileGridCodec = TileGridCodec::new(Self::WIDTH, Self::HEIGHT);

    /// Bind `grid` to `registry`. The grid must be `WIDTH` x `HEIGHT`.
    pub fn new(grid: TileGrid, registry: Arc<CollisionRegistry>) -> Result<Self, WorldError> {
        Self::CODEC.check_dimensions(&grid)?;
        Ok(Self {
            grid,
            registry,
            policy: LookupPolicy::default(),
        })
    }

    /// Use `policy` for tiles missing from the registry.
    pub fn with_lookup_policy(mut self, policy: LookupPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Shared handle to the registry.
    pub fn shared_registry(&self) -> &Arc<CollisionRegistry> {
        &self.registry
    }

    /// Tile ids in the grid that the registry has no entry for, ascending.
    pub fn unclassified_tiles(&self) -> Vec<TileId> {
        let mut missing: Vec<TileId> = self
            .grid
            .tiles()
            .iter()
            .copied()
            .filter(|&tile| !self.registry.contains(tile))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }
}

impl LevelView for PortMap {
    fn grid(&self) -> &TileGrid {
        &self.grid
    }

    fn registry(&self) -> &CollisionRegistry {
        &self.registry
    }

    fn lookup_policy(&self) -> LookupPolicy {
        self.policy
    }

    fn set_tile(&mut self, col: usize, row: usize, tile: TileId) -> Result<(), WorldError> {
        self.grid.set(col, row, tile)
    }
}

/// Descriptive and economic data for a port.
#[derive(Debug, Clone, PartialEq)]
pub struct PortInfo {
    /// Display name.
    pub name: String,
    /// Sea area the port belongs to.
    pub area: String,
    /// Affiliated country.
    pub country: Country,
    /// Whether the port is the capital of `country`.
    pub capital: bool,
    /// Economy level.
    pub economy: i32,
    /// Investment accumulated toward the next economy level.
    pub economy_invest: i32,
    /// Industry level.
    pub industry: i32,
    /// Investment accumulated toward the next industry level.
    pub industry_invest: i32,
    /// Price multiplier in normalised units (100 in a descriptor is 1.0 here).
    pub price_index: f64,
}

impl PortInfo {
    /// True when this port is the capital of `country`.
    pub fn is_capital_of(&self, country: Country) -> bool {
        self.capital && self.country == country
    }
}

/// A fully assembled port: grid, metadata, NPCs and buildings.
///
/// `N` and `B` are whatever the NPC and building factories produce; the port
/// only stores them in descriptor order.
#[derive(Debug, Clone)]
pub struct Port<N, B> {
    map: PortMap,
    info: PortInfo,
    npcs: Vec<N>,
    buildings: Vec<B>,
}

impl<N, B> Port<N, B> {
    /// Combine an already-bound map with its metadata and entities.
    pub fn new(map: PortMap, info: PortInfo, npcs: Vec<N>, buildings: Vec<B>) -> Self {
        Self {
            map,
            info,
            npcs,
            buildings,
        }
    }

    /// Port metadata.
    pub fn info(&self) -> &PortInfo {
        &self.info
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Normalised price index.
    pub fn price_index(&self) -> f64 {
        self.info.price_index
    }

    /// NPCs in descriptor order.
    pub fn npcs(&self) -> &[N] {
        &self.npcs
    }

    /// Buildings in descriptor order.
    pub fn buildings(&self) -> &[B] {
        &self.buildings
    }

    /// Underlying bare level.
    pub fn map(&self) -> &PortMap {
        &self.map
    }
}

impl<N, B> LevelView for Port<N, B> {
    fn grid(&self) -> &TileGrid {
        self.map.grid()
    }

    fn registry(&self) -> &CollisionRegistry {
        self.map.registry()
    }

    fn lookup_policy(&self) -> LookupPolicy {
        self.map.lookup_policy()
    }

    fn set_tile(&mut self, col: usize, row: usize, tile: TileId) -> Result<(), WorldError> {
        self.map.set_tile(col, row, tile)
    }
}
