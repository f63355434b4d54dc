//! On-disk port fixtures.
//!
//! A [`PortFixture`] owns a fresh directory under the system temp dir laid
//! out like `asset/ports` (default file names). It is removed on drop.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tradewinds_core::TileId;
use tradewinds_world::{PortMap, TileGrid};

static NEXT_FIXTURE: AtomicU64 = AtomicU64::new(0);

/// Two-class table: class 0 open everywhere, class 1 blocked. Tile 0 is water
/// (open) and tile 1 is a wall (blocked).
pub const BASIC_COLLISION_TABLE: &str = "2
true true true true
false false false false
0 0
1 1
";

/// Temporary port asset directory.
pub struct PortFixture {
    root: PathBuf,
}

impl PortFixture {
    /// Create an empty fixture directory tagged with `label`.
    pub fn new(label: &str) -> Result<Self> {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let root = std::env::temp_dir().join(format!(
            "tradewinds_{label}_{}_{nanos}_{}",
            std::process::id(),
            NEXT_FIXTURE.fetch_add(1, Ordering::Relaxed)
        ));
        fs::create_dir_all(&root)
            .with_context(|| format!("failed to create fixture dir {}", root.display()))?;
        tracing::debug!(root = %root.display(), "port fixture created");
        Ok(Self { root })
    }

    /// Fixture with [`BASIC_COLLISION_TABLE`] already written.
    pub fn with_basic_table(label: &str) -> Result<Self> {
        let fixture = Self::new(label)?;
        fixture.write_collision_table(BASIC_COLLISION_TABLE)?;
        Ok(fixture)
    }

    /// Directory to point a `PortPaths` at.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a file inside the fixture.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Write `portTileCollision`.
    pub fn write_collision_table(&self, table: &str) -> Result<PathBuf> {
        self.write_file("portTileCollision", table.as_bytes())
    }

    /// Write `port_<id>.json`.
    pub fn write_descriptor(&self, id: u32, descriptor: &Value) -> Result<PathBuf> {
        let text = serde_json::to_string_pretty(descriptor)?;
        self.write_file(&format!("port_{id}.json"), text.as_bytes())
    }

    /// Write `port_<id>` encoded with the port grid codec.
    pub fn write_grid(&self, id: u32, grid: &TileGrid) -> Result<PathBuf> {
        let bytes = PortMap::CODEC.to_bytes(grid)?;
        self.write_file(&format!("port_{id}"), &bytes)
    }

    /// Write a port-sized grid with every tile set to `tile`.
    pub fn write_filled_grid(&self, id: u32, tile: TileId) -> Result<PathBuf> {
        self.write_grid(id, &TileGrid::filled(PortMap::WIDTH, PortMap::HEIGHT, tile))
    }

    /// Write arbitrary bytes to `name`.
    pub fn write_file(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path(name);
        fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}

impl Drop for PortFixture {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

/// Descriptor for a small pirate port with the given entity sections.
pub fn nassau_descriptor(npcs: Value, buildings: Value) -> Value {
    json!({
        "info": {
            "name": "Nassau",
            "area": "Caribbean",
            "country": "PIRATE",
            "capital": false,
            "economy": 3,
            "economy_invest": 0,
            "industry": 1,
            "industry_invest": 0,
            "price_index": 10000
        },
        "npcs": npcs,
        "buildings": buildings
    })
}
