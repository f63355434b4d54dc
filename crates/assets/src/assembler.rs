//! Turns descriptors and grid files into ports.

use std::convert::Infallible;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tradewinds_world::{CollisionRegistry, LevelView, LookupPolicy, Port, PortMap};
use tracing::{debug, info};

use crate::{AssetError, PortDescriptor, PortId, PortPaths};

/// Builds NPCs from the `npcs` section of a descriptor.
pub trait NpcFactory {
    /// NPC handle stored on the port.
    type Npc;
    /// Failure raised for an unusable fragment.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build one NPC list from the raw fragments, preserving order.
    fn npcs(&self, fragments: &[Value]) -> Result<Vec<Self::Npc>, Self::Error>;
}

/// Builds buildings from the `buildings` section of a descriptor.
pub trait PlaceFactory {
    /// Building handle stored on the port.
    type Building;
    /// Failure raised for an unusable fragment.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build one building list from the raw fragments, preserving order.
    fn buildings(&self, fragments: &[Value]) -> Result<Vec<Self::Building>, Self::Error>;
}

/// NPC factory that keeps each fragment as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct FragmentNpcFactory;

impl NpcFactory for FragmentNpcFactory {
    type Npc = Value;
    type Error = Infallible;

    fn npcs(&self, fragments: &[Value]) -> Result<Vec<Value>, Infallible> {
        Ok(fragments.to_vec())
    }
}

/// Building factory that keeps each fragment as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct FragmentPlaceFactory;

impl PlaceFactory for FragmentPlaceFactory {
    type Building = Value;
    type Error = Infallible;

    fn buildings(&self, fragments: &[Value]) -> Result<Vec<Value>, Infallible> {
        Ok(fragments.to_vec())
    }
}

/// Assembles ports from on-disk assets.
///
/// The collision registry is built once by the caller and shared with every
/// level this assembler produces.
#[derive(Debug)]
pub struct PortAssembler<NF, PF> {
    paths: PortPaths,
    registry: Arc<CollisionRegistry>,
    npc_factory: NF,
    place_factory: PF,
    policy: LookupPolicy,
}

impl<NF, PF> PortAssembler<NF, PF>
where
    NF: NpcFactory,
    PF: PlaceFactory,
{
    /// Create an assembler reading from `paths`.
    pub fn new(
        paths: PortPaths,
        registry: Arc<CollisionRegistry>,
        npc_factory: NF,
        place_factory: PF,
    ) -> Self {
        Self {
            paths,
            registry,
            npc_factory,
            place_factory,
            policy: LookupPolicy::default(),
        }
    }

    /// Lookup policy applied to every level built afterwards.
    pub fn with_lookup_policy(mut self, policy: LookupPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Asset layout in use.
    pub fn paths(&self) -> &PortPaths {
        &self.paths
    }

    /// Shared collision registry.
    pub fn registry(&self) -> &Arc<CollisionRegistry> {
        &self.registry
    }

    /// Load descriptor and grid for port `id` and assemble the port.
    pub fn build_port(&self, id: PortId) -> Result<Port<NF::Npc, PF::Building>, AssetError> {
        let descriptor = PortDescriptor::load(&self.paths.descriptor_path(id))?;
        let map = self.build_level(&self.paths.grid_path(id))?;
        self.assemble(map, &descriptor)
    }

    /// Combine an already-loaded map with `descriptor`.
    pub fn assemble(
        &self,
        map: PortMap,
        descriptor: &PortDescriptor,
    ) -> Result<Port<NF::Npc, PF::Building>, AssetError> {
        let info = descriptor.port_info()?;
        let npcs = self
            .npc_factory
            .npcs(descriptor.npc_fragments())
            .map_err(|err| AssetError::Entities {
                origin: descriptor.origin().to_string(),
                section: "npcs",
                source: Box::new(err),
            })?;
        let buildings = self
            .place_factory
            .buildings(descriptor.building_fragments())
            .map_err(|err| AssetError::Entities {
                origin: descriptor.origin().to_string(),
                section: "buildings",
                source: Box::new(err),
            })?;

        info!(
            name = %info.name,
            country = %info.country,
            npcs = npcs.len(),
            buildings = buildings.len(),
            "port assembled"
        );
        Ok(Port::new(map, info, npcs, buildings))
    }

    /// Load a bare level (grid and registry only) from an arbitrary grid file.
    pub fn build_level(&self, path: &Path) -> Result<PortMap, AssetError> {
        debug!(path = %path.display(), "reading port grid");
        let file = File::open(path).map_err(|err| AssetError::io(path, err))?;
        let grid = PortMap::CODEC
            .decode(BufReader::new(file))
            .map_err(|source| AssetError::Grid {
                path: path.to_path_buf(),
                source,
            })?;
        let map = PortMap::new(grid, Arc::clone(&self.registry)).map_err(|source| {
            AssetError::Grid {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(map.with_lookup_policy(self.policy))
    }

    /// Write `level`'s grid to `path`, creating parent directories.
    ///
    /// The grid is encoded before the file is touched, so a rejected level
    /// leaves any existing file intact.
    pub fn save_level(&self, level: &impl LevelView, path: &Path) -> Result<(), AssetError> {
        let bytes = PortMap::CODEC
            .to_bytes(level.grid())
            .map_err(|source| AssetError::Grid {
                path: path.to_path_buf(),
                source,
            })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| AssetError::io(parent, err))?;
        }
        fs::write(path, bytes).map_err(|err| AssetError::io(path, err))?;
        debug!(path = %path.display(), "port grid saved");
        Ok(())
    }

    /// Grid file the editor opens by default.
    pub fn default_map_file(&self) -> PathBuf {
        self.paths.default_map_path()
    }
}
