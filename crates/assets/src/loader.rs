//! Collision classification tables.
//!
//! The table is a whitespace-separated token stream:
//!
//! ```text
//! 3                      # number of collision classes N
//! true true true true    # class 0: up down left right
//! false false false false
//! false true false true
//! 0 0                    # tile id, class index ... until end of input
//! 12 1
//! ```
//!
//! Booleans are `true`/`false` in any case. Tile ids accept the unsigned
//! 16-bit range as well as negative 16-bit values, which map to the same bit
//! pattern.

use std::fs;
use std::path::Path;

use tradewinds_core::{CollisionType, TileId};
use tradewinds_world::{CollisionRegistry, WorldError};
use tracing::{debug, info};

use crate::{AssetError, INLINE_ORIGIN};

/// Load a collision registry from the table at `path`.
pub fn registry_from_file(path: &Path) -> Result<CollisionRegistry, AssetError> {
    debug!(path = %path.display(), "reading collision table");
    let data = fs::read_to_string(path).map_err(|err| AssetError::io(path, err))?;
    parse_registry(&data, &path.display().to_string())
}

/// Load a collision registry from an in-memory table.
pub fn registry_from_str(input: &str) -> Result<CollisionRegistry, AssetError> {
    parse_registry(input, INLINE_ORIGIN)
}

fn parse_registry(input: &str, origin: &str) -> Result<CollisionRegistry, AssetError> {
    let mut tokens = Tokens::new(input, origin);

    let class_count = tokens.next_int("collision class count")?;
    let class_count = usize::try_from(class_count)
        .map_err(|_| tokens.error(format!("collision class count {class_count} is negative")))?;

    // Every class consumes at least four tokens, so the input bounds the capacity.
    let mut classes = Vec::with_capacity(class_count.min(input.len() / 8));
    for class in 0..class_count {
        let mut flags = [false; 4];
        for flag in &mut flags {
            *flag = tokens.next_bool(&format!("flag of collision class {class}"))?;
        }
        classes.push(CollisionType::new(flags));
    }

    let mut builder = CollisionRegistry::builder(classes);
    while tokens.has_next() {
        let raw_tile = tokens.next_int("tile id")?;
        let tile = tile_id(raw_tile).ok_or_else(|| {
            tokens.error(format!("tile id {raw_tile} does not fit in 16 bits"))
        })?;
        let raw_class = tokens.next_int(&format!("collision class of tile {tile}"))?;
        let class = usize::try_from(raw_class).map_err(|_| {
            tokens.error(format!(
                "tile {tile} references negative collision class {raw_class}"
            ))
        })?;
        builder.assign(tile, class).map_err(|err| match err {
            WorldError::UnknownCollisionClass { count, .. } => tokens.error(format!(
                "tile {tile} references collision class {class} but only {count} are declared"
            )),
            other => tokens.error(other.to_string()),
        })?;
    }

    let registry = builder.build();
    info!(
        origin,
        classes = registry.class_count(),
        tiles = registry.len(),
        "collision registry built"
    );
    Ok(registry)
}

fn tile_id(raw: i64) -> Option<TileId> {
    if let Ok(tile) = TileId::try_from(raw) {
        Some(tile)
    } else {
        i16::try_from(raw).ok().map(|signed| signed as TileId)
    }
}

/// Whitespace tokenizer that remembers the line of the last token read.
struct Tokens<'a> {
    origin: &'a str,
    iter: std::iter::Peekable<Box<dyn Iterator<Item = (usize, &'a str)> + 'a>>,
    line: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str, origin: &'a str) -> Self {
        let iter: Box<dyn Iterator<Item = (usize, &'a str)> + 'a> = Box::new(
            input
                .lines()
                .enumerate()
                .flat_map(|(idx, line)| line.split_whitespace().map(move |tok| (idx + 1, tok))),
        );
        Self {
            origin,
            iter: iter.peekable(),
            line: 0,
        }
    }

    fn has_next(&mut self) -> bool {
        self.iter.peek().is_some()
    }

    fn next_token(&mut self, what: &str) -> Result<&'a str, AssetError> {
        match self.iter.next() {
            Some((line, token)) => {
                self.line = line;
                Ok(token)
            }
            None => {
                self.line = 0;
                Err(self.error(format!("unexpected end of input, expected {what}")))
            }
        }
    }

    fn next_int(&mut self, what: &str) -> Result<i64, AssetError> {
        let token = self.next_token(what)?;
        token
            .parse()
            .map_err(|_| self.error(format!("expected {what}, found '{token}'")))
    }

    fn next_bool(&mut self, what: &str) -> Result<bool, AssetError> {
        let token = self.next_token(what)?;
        if token.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if token.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(self.error(format!("expected {what} (true/false), found '{token}'")))
        }
    }

    fn error(&self, reason: String) -> AssetError {
        AssetError::Malformed {
            origin: self.origin.to_string(),
            line: self.line,
            reason,
        }
    }
}
