#![warn(missing_docs)]
//! Port asset loading: collision tables, level descriptors, grid files and
//! the assembler that turns them into playable ports.

mod assembler;
mod descriptor;
mod layout;
mod loader;

pub use assembler::{
    FragmentNpcFactory, FragmentPlaceFactory, NpcFactory, PlaceFactory, PortAssembler,
};
pub use descriptor::{PortDescriptor, PRICE_INDEX_SCALE};
pub use layout::{PortId, PortPaths};
pub use loader::{registry_from_file, registry_from_str};

use std::path::{Path, PathBuf};

use thiserror::Error;
use tradewinds_world::WorldError;

/// Errors emitted while loading port assets.
#[derive(Debug, Error)]
pub enum AssetError {
    /// A required file does not exist.
    #[error("required file {} not found", .path.display())]
    NotFound {
        /// Missing file.
        path: PathBuf,
    },
    /// Reading or writing a file failed for another reason.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// The collision classification table is malformed.
    #[error("malformed collision table {origin} (line {line}): {reason}")]
    Malformed {
        /// File name or `<inline>`.
        origin: String,
        /// 1-based line of the offending token (0 at end of input).
        line: usize,
        /// What was wrong.
        reason: String,
    },
    /// A grid file could not be decoded or encoded.
    #[error("grid file {}: {source}", .path.display())]
    Grid {
        /// Grid file.
        path: PathBuf,
        /// Codec failure.
        #[source]
        source: WorldError,
    },
    /// A level descriptor is not a valid document.
    #[error("cannot parse port descriptor {origin}: {source}")]
    Descriptor {
        /// File name or `<inline>`.
        origin: String,
        /// Parser failure.
        #[source]
        source: serde_json::Error,
    },
    /// A descriptor field is missing or has the wrong type.
    #[error("port descriptor {origin}: field '{field}' {reason}")]
    Config {
        /// File name or `<inline>`.
        origin: String,
        /// Offending field.
        field: &'static str,
        /// What was wrong.
        reason: String,
    },
    /// An entity factory rejected its descriptor section.
    #[error("port descriptor {origin}: {section} section rejected: {source}")]
    Entities {
        /// File name or `<inline>`.
        origin: String,
        /// `npcs` or `buildings`.
        section: &'static str,
        /// Factory failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl AssetError {
    /// Classify an I/O failure on `path`, singling out missing files.
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            AssetError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            AssetError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Origin label used in errors for data that did not come from a file.
pub(crate) const INLINE_ORIGIN: &str = "<inline>";
