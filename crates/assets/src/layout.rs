use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Numeric identifier of a port level.
pub type PortId = u32;

/// Where port assets live on disk.
///
/// With the defaults, port 3 reads `asset/ports/port_3` (grid) and
/// `asset/ports/port_3.json` (descriptor), and every port shares
/// `asset/ports/portTileCollision`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortPaths {
    /// Directory holding every port file.
    pub root: PathBuf,
    /// File name of the collision classification table.
    pub collision_file: String,
    /// Prefix of per-port grid and descriptor files.
    pub port_prefix: String,
}

impl Default for PortPaths {
    fn default() -> Self {
        Self {
            root: PathBuf::from("asset/ports"),
            collision_file: "portTileCollision".to_string(),
            port_prefix: "port_".to_string(),
        }
    }
}

impl PortPaths {
    /// Layout with default file names under `root`.
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Collision classification table.
    pub fn collision_path(&self) -> PathBuf {
        self.root.join(&self.collision_file)
    }

    /// Binary grid of port `id`.
    pub fn grid_path(&self, id: PortId) -> PathBuf {
        self.root.join(format!("{}{}", self.port_prefix, id))
    }

    /// Descriptor of port `id`.
    pub fn descriptor_path(&self, id: PortId) -> PathBuf {
        self.root.join(format!("{}{}.json", self.port_prefix, id))
    }

    /// Grid the editor opens when no file is chosen.
    pub fn default_map_path(&self) -> PathBuf {
        self.grid_path(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_asset_tree() {
        let paths = PortPaths::default();
        assert_eq!(paths.collision_path(), PathBuf::from("asset/ports/portTileCollision"));
        assert_eq!(paths.grid_path(7), PathBuf::from("asset/ports/port_7"));
        assert_eq!(paths.descriptor_path(7), PathBuf::from("asset/ports/port_7.json"));
        assert_eq!(paths.default_map_path(), PathBuf::from("asset/ports/port_0"));
    }

    #[test]
    fn rooted_layout_keeps_file_names() {
        let paths = PortPaths::rooted_at("/tmp/ports");
        assert_eq!(paths.grid_path(2), PathBuf::from("/tmp/ports/port_2"));
    }
}
