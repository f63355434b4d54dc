use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;
use tradewinds_assets::{PortId, PortPaths};
use tradewinds_world::LookupPolicy;

pub const DEFAULT_CONFIG_PATH: &str = "config/tradewinds.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    /// Where port grids, descriptors and the collision table live.
    pub assets: PortPaths,
    /// Port loaded at startup.
    pub start_port: PortId,
    /// Treatment of tile ids missing from the collision table.
    pub lookup: LookupPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            assets: PortPaths::default(),
            start_port: 0,
            lookup: LookupPolicy::Strict,
        }
    }
}

impl GameConfig {
    /// Load configuration from `path`, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<GameConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    GameConfig::default()
                }
            },
            Err(err) => {
                if err.kind() == std::io::ErrorKind::NotFound {
                    warn!("Config not found at {}. Using defaults", path.display());
                } else {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                GameConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = GameConfig::load_from_path(Path::new("no/such/tradewinds.toml"));
        assert_eq!(cfg, GameConfig::default());
        assert_eq!(cfg.assets.root, PathBuf::from("asset/ports"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg: GameConfig = toml::from_str(
            r#"
start_port = 4
lookup = "lenient"

[assets]
root = "data/ports"
"#,
        )
        .expect("parses");
        assert_eq!(cfg.start_port, 4);
        assert_eq!(cfg.lookup, LookupPolicy::Lenient);
        assert_eq!(cfg.assets.root, PathBuf::from("data/ports"));
        assert_eq!(cfg.assets.collision_file, "portTileCollision");
    }

    #[test]
    fn saved_config_round_trips() {
        let path = std::env::temp_dir().join(format!(
            "tradewinds_config_{}/tradewinds.toml",
            std::process::id()
        ));
        let cfg = GameConfig {
            start_port: 12,
            ..GameConfig::default()
        };
        cfg.save_to_path(&path).expect("save");
        assert_eq!(GameConfig::load_from_path(&path), cfg);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
