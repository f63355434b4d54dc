//! tradewinds - port levels for a maritime trading game
//!
//! Boots the level pipeline: builds the shared collision registry once, then
//! assembles the configured port and reports what was loaded.

mod config;

use anyhow::{Context, Result};
use config::{GameConfig, DEFAULT_CONFIG_PATH};
use std::collections::BTreeMap;
use std::{env, path::PathBuf, sync::Arc};
use tracing::info;
use tradewinds_assets::{
    registry_from_file, FragmentNpcFactory, FragmentPlaceFactory, PortAssembler, PortId,
};
use tradewinds_core::TileId;
use tradewinds_world::LevelView;

fn main() -> Result<()> {
    // WARN by default; override with RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting tradewinds v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1))?;
    let mut config = GameConfig::load_from_path(&cli.config);
    if let Some(root) = cli.assets {
        config.assets.root = root;
    }
    if let Some(port) = cli.port {
        config.start_port = port;
    }
    if cli.write_config {
        config
            .save_to_path(&cli.config)
            .with_context(|| format!("failed to write {}", cli.config.display()))?;
        println!("wrote {}", cli.config.display());
        return Ok(());
    }

    let collision_path = config.assets.collision_path();
    let registry = registry_from_file(&collision_path)
        .with_context(|| format!("cannot start without {}", collision_path.display()))?;

    let assembler = PortAssembler::new(
        config.assets.clone(),
        Arc::new(registry),
        FragmentNpcFactory,
        FragmentPlaceFactory,
    )
    .with_lookup_policy(config.lookup);

    let port = assembler
        .build_port(config.start_port)
        .with_context(|| format!("failed to load port {}", config.start_port))?;

    let info = port.info();
    println!(
        "{} ({}) - {}{}",
        info.name,
        info.area,
        info.country,
        if info.capital { ", capital" } else { "" }
    );
    println!(
        "economy {} (+{}), industry {} (+{}), price index {:.2}",
        info.economy, info.economy_invest, info.industry, info.industry_invest, info.price_index
    );
    println!(
        "{}x{} tiles, {} npcs, {} buildings, {} distinct tiles",
        port.width(),
        port.height(),
        port.npcs().len(),
        port.buildings().len(),
        tile_histogram(port.grid().tiles()).len()
    );
    Ok(())
}

fn tile_histogram(tiles: &[TileId]) -> BTreeMap<TileId, usize> {
    let mut counts = BTreeMap::new();
    for &tile in tiles {
        *counts.entry(tile).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, PartialEq)]
struct CliOptions {
    config: PathBuf,
    assets: Option<PathBuf>,
    port: Option<PortId>,
    write_config: bool,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Result<Self> {
        let mut opts = CliOptions {
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
            assets: None,
            port: None,
            write_config: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let path = args.next().context("--config requires a path")?;
                    opts.config = PathBuf::from(path);
                }
                "--assets" => {
                    let path = args.next().context("--assets requires a directory")?;
                    opts.assets = Some(PathBuf::from(path));
                }
                "--port" => {
                    let id = args.next().context("--port requires a port id")?;
                    opts.port = Some(
                        id.parse::<PortId>()
                            .with_context(|| format!("invalid port id '{id}'"))?,
                    );
                }
                "--write-config" => opts.write_config = true,
                other => tracing::warn!("Ignoring unknown argument {other}"),
            }
        }
        Ok(opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliOptions> {
        CliOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults_without_arguments() {
        let opts = parse(&[]).unwrap();
        assert_eq!(opts.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert_eq!(opts.assets, None);
        assert_eq!(opts.port, None);
        assert!(!opts.write_config);
    }

    #[test]
    fn accepts_overrides() {
        let opts = parse(&["--assets", "/tmp/ports", "--port", "7", "--config", "x.toml"]).unwrap();
        assert_eq!(opts.assets, Some(PathBuf::from("/tmp/ports")));
        assert_eq!(opts.port, Some(7));
        assert_eq!(opts.config, PathBuf::from("x.toml"));
    }

    #[test]
    fn rejects_bad_port_and_missing_values() {
        assert!(parse(&["--port", "seven"]).is_err());
        assert!(parse(&["--port"]).is_err());
        assert!(parse(&["--assets"]).is_err());
    }

    #[test]
    fn histogram_counts_each_tile() {
        let counts = tile_histogram(&[3, 1, 3, 3]);
        assert_eq!(counts.get(&3), Some(&3));
        assert_eq!(counts.get(&1), Some(&1));
        assert_eq!(counts.len(), 2);
    }
}
