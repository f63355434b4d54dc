use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tradewinds_assets::{
    registry_from_file, FragmentNpcFactory, FragmentPlaceFactory, PortAssembler, PortId,
    PortPaths,
};
use tradewinds_core::TileId;
use tradewinds_world::{LevelView, LookupPolicy, PortMap, TileGrid};

type Assembler = PortAssembler<FragmentNpcFactory, FragmentPlaceFactory>;

#[derive(Parser, Debug)]
#[command(author, version, about = "Port level inspection and editing for tradewinds", long_about = None)]
struct Args {
    /// Directory holding port grids, descriptors and the collision table
    #[arg(short, long, default_value = "asset/ports")]
    assets: PathBuf,

    #[command(subcommand)]
    command: EditorCommand,
}

#[derive(Subcommand, Debug)]
enum EditorCommand {
    /// Print a port's metadata and tile usage
    Show {
        /// Port id
        port: PortId,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Change one tile of a grid file
    SetTile {
        /// Column (0-based)
        col: usize,
        /// Row (0-based)
        row: usize,
        /// New tile id
        tile: TileId,
        /// Grid file to edit (defaults to the editor's default map)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Write the result here instead of overwriting the input
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Create a grid file with every tile set to one id
    Fill {
        /// Output grid file
        output: PathBuf,
        /// Tile id to fill with
        #[arg(long, default_value_t = 0)]
        tile: TileId,
    },
    /// Verify that every tile in a grid file has a collision entry
    Check {
        /// Grid file (defaults to the editor's default map)
        file: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
struct PortSummary {
    name: String,
    area: String,
    country: String,
    capital: bool,
    economy: i32,
    economy_invest: i32,
    industry: i32,
    industry_invest: i32,
    price_index: f64,
    npcs: usize,
    buildings: usize,
    tiles: BTreeMap<TileId, usize>,
    unclassified: Vec<TileId>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();
    run(args)
}

fn run(args: Args) -> Result<()> {
    match args.command {
        EditorCommand::Show { port, json } => {
            let summary = summarize(&assembler(&args.assets, LookupPolicy::Strict)?, port)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }
        }
        EditorCommand::SetTile {
            col,
            row,
            tile,
            file,
            output,
        } => {
            let assembler = assembler(&args.assets, LookupPolicy::Lenient)?;
            let input = file.unwrap_or_else(|| assembler.default_map_file());
            let output = output.unwrap_or_else(|| input.clone());
            set_tile(&assembler, &input, &output, col, row, tile)?;
            println!("set ({col}, {row}) to {tile} in {}", output.display());
        }
        EditorCommand::Fill { output, tile } => {
            fill(&output, tile)?;
            println!(
                "wrote {}x{} grid of tile {tile} to {}",
                PortMap::WIDTH,
                PortMap::HEIGHT,
                output.display()
            );
        }
        EditorCommand::Check { file } => {
            let assembler = assembler(&args.assets, LookupPolicy::Lenient)?;
            let file = file.unwrap_or_else(|| assembler.default_map_file());
            let missing = unclassified(&assembler, &file)?;
            if !missing.is_empty() {
                bail!(
                    "{} uses tile ids without collision entries: {:?}",
                    file.display(),
                    missing
                );
            }
            println!("{}: every tile is classified", file.display());
        }
    }
    Ok(())
}

fn assembler(root: &Path, policy: LookupPolicy) -> Result<Assembler> {
    let paths = PortPaths::rooted_at(root);
    let collision = paths.collision_path();
    let registry = registry_from_file(&collision)
        .with_context(|| format!("Failed to load collision table {}", collision.display()))?;
    Ok(PortAssembler::new(
        paths,
        Arc::new(registry),
        FragmentNpcFactory,
        FragmentPlaceFactory,
    )
    .with_lookup_policy(policy))
}

fn summarize(assembler: &Assembler, id: PortId) -> Result<PortSummary> {
    let port = assembler
        .build_port(id)
        .with_context(|| {
            format!(
                "Failed to load port {id} from {}",
                assembler.paths().descriptor_path(id).display()
            )
        })?;
    let info = port.info();
    let mut tiles = BTreeMap::new();
    for &tile in port.grid().tiles() {
        *tiles.entry(tile).or_insert(0) += 1;
    }
    Ok(PortSummary {
        name: info.name.clone(),
        area: info.area.clone(),
        country: info.country.to_string(),
        capital: info.capital,
        economy: info.economy,
        economy_invest: info.economy_invest,
        industry: info.industry,
        industry_invest: info.industry_invest,
        price_index: info.price_index,
        npcs: port.npcs().len(),
        buildings: port.buildings().len(),
        tiles,
        unclassified: port.map().unclassified_tiles(),
    })
}

fn print_summary(summary: &PortSummary) {
    println!(
        "{} ({}) - {}{}",
        summary.name,
        summary.area,
        summary.country,
        if summary.capital { ", capital" } else { "" }
    );
    println!(
        "economy {} (+{}), industry {} (+{}), price index {:.2}",
        summary.economy,
        summary.economy_invest,
        summary.industry,
        summary.industry_invest,
        summary.price_index
    );
    println!("{} npcs, {} buildings", summary.npcs, summary.buildings);
    for (tile, count) in &summary.tiles {
        println!("  tile {tile:>5}: {count}");
    }
    if !summary.unclassified.is_empty() {
        println!("unclassified tiles: {:?}", summary.unclassified);
    }
}

fn set_tile(
    assembler: &Assembler,
    input: &Path,
    output: &Path,
    col: usize,
    row: usize,
    tile: TileId,
) -> Result<()> {
    let mut level = assembler
        .build_level(input)
        .with_context(|| format!("Failed to open {}", input.display()))?;
    level
        .set_tile(col, row, tile)
        .with_context(|| format!("Cannot edit {}", input.display()))?;
    if !level.registry().contains(tile) {
        tracing::warn!(tile, "tile id has no collision entry");
    }
    assembler
        .save_level(&level, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(())
}

fn fill(output: &Path, tile: TileId) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {parent:?}"))?;
        }
    }
    let grid = TileGrid::filled(PortMap::WIDTH, PortMap::HEIGHT, tile);
    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    PortMap::CODEC
        .encode(&grid, BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(())
}

fn unclassified(assembler: &Assembler, file: &Path) -> Result<Vec<TileId>> {
    let level = assembler
        .build_level(file)
        .with_context(|| format!("Failed to open {}", file.display()))?;
    Ok(level.unclassified_tiles())
}
