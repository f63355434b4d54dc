//! Port descriptors.
//!
//! A descriptor is a JSON document with an `info` object holding the port's
//! metadata and two arrays, `npcs` and `buildings`, whose elements are handed
//! unchanged to the entity factories. Info values may be typed JSON values or
//! strings; each field is coerced explicitly so a bad value is reported by
//! name.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tradewinds_core::Country;
use tradewinds_world::PortInfo;
use tracing::debug;

use crate::{AssetError, INLINE_ORIGIN};

/// Descriptor price indices are stored multiplied by this factor.
pub const PRICE_INDEX_SCALE: f64 = 100.0;

/// Parsed but not yet coerced port descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct PortDescriptor {
    info: Map<String, Value>,
    #[serde(default)]
    npcs: Vec<Value>,
    #[serde(default)]
    buildings: Vec<Value>,
    #[serde(skip)]
    origin: String,
}

impl PortDescriptor {
    /// Read the descriptor at `path`.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        debug!(path = %path.display(), "reading port descriptor");
        let data = fs::read_to_string(path).map_err(|err| AssetError::io(path, err))?;
        Self::parse_with_origin(&data, path.display().to_string())
    }

    /// Parse a descriptor held in memory.
    pub fn parse_str(input: &str) -> Result<Self, AssetError> {
        Self::parse_with_origin(input, INLINE_ORIGIN.to_string())
    }

    fn parse_with_origin(input: &str, origin: String) -> Result<Self, AssetError> {
        match serde_json::from_str::<PortDescriptor>(input) {
            Ok(mut descriptor) => {
                descriptor.origin = origin;
                Ok(descriptor)
            }
            Err(source) => Err(AssetError::Descriptor { origin, source }),
        }
    }

    /// Where the descriptor came from (path or `<inline>`).
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Raw NPC fragments in document order.
    pub fn npc_fragments(&self) -> &[Value] {
        &self.npcs
    }

    /// Raw building fragments in document order.
    pub fn building_fragments(&self) -> &[Value] {
        &self.buildings
    }

    /// Coerce the `info` section into port metadata.
    ///
    /// The price index is divided by [`PRICE_INDEX_SCALE`] here and nowhere
    /// else.
    pub fn port_info(&self) -> Result<PortInfo, AssetError> {
        let raw_price = self.decimal("price_index")?;
        Ok(PortInfo {
            name: self.text("name")?,
            area: self.text("area")?,
            country: self.country("country")?,
            capital: self.boolean("capital")?,
            economy: self.integer("economy")?,
            economy_invest: self.integer("economy_invest")?,
            industry: self.integer("industry")?,
            industry_invest: self.integer("industry_invest")?,
            price_index: raw_price / PRICE_INDEX_SCALE,
        })
    }

    fn field(&self, field: &'static str) -> Result<&Value, AssetError> {
        self.info
            .get(field)
            .ok_or_else(|| self.config_error(field, "is missing"))
    }

    fn config_error(&self, field: &'static str, reason: impl Into<String>) -> AssetError {
        AssetError::Config {
            origin: self.origin.clone(),
            field,
            reason: reason.into(),
        }
    }

    fn text(&self, field: &'static str) -> Result<String, AssetError> {
        match self.field(field)? {
            Value::String(s) => Ok(s.clone()),
            other => Err(self.config_error(field, format!("must be a string, found {other}"))),
        }
    }

    fn integer(&self, field: &'static str) -> Result<i32, AssetError> {
        let value = self.field(field)?;
        let parsed = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        parsed
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| self.config_error(field, format!("must be an integer, found {value}")))
    }

    fn decimal(&self, field: &'static str) -> Result<f64, AssetError> {
        let value = self.field(field)?;
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed
            .filter(|n| n.is_finite())
            .ok_or_else(|| self.config_error(field, format!("must be a number, found {value}")))
    }

    fn boolean(&self, field: &'static str) -> Result<bool, AssetError> {
        let value = self.field(field)?;
        match value {
            Value::Bool(b) => Ok(*b),
            Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Ok(true),
            Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Ok(false),
            other => Err(self.config_error(field, format!("must be true or false, found {other}"))),
        }
    }

    fn country(&self, field: &'static str) -> Result<Country, AssetError> {
        let name = self.text(field)?;
        name.parse::<Country>()
            .map_err(|err| self.config_error(field, err.to_string()))
    }
}
