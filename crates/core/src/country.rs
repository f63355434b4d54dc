//! Nations a port can be affiliated with.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a country name is not one of the known variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown country '{0}'")]
pub struct CountryParseError(String);

/// Closed set of countries known to the game.
///
/// Names parse exactly as written in level descriptors (upper case).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Country {
    /// Kingdom of England.
    England,
    /// Kingdom of Spain.
    Spain,
    /// Kingdom of Portugal.
    Portugal,
    /// Dutch Republic.
    Netherlands,
    /// Kingdom of France.
    France,
    /// Republic of Venice.
    Venice,
    /// Ottoman Empire.
    Ottoman,
    /// Pirate haven with no crown.
    Pirate,
    /// Unaffiliated free port.
    Neutral,
}

impl Country {
    /// Every country, in declaration order.
    pub const ALL: [Country; 9] = [
        Country::England,
        Country::Spain,
        Country::Portugal,
        Country::Netherlands,
        Country::France,
        Country::Venice,
        Country::Ottoman,
        Country::Pirate,
        Country::Neutral,
    ];

    /// Descriptor spelling of the country.
    pub const fn as_str(self) -> &'static str {
        match self {
            Country::England => "ENGLAND",
            Country::Spain => "SPAIN",
            Country::Portugal => "PORTUGAL",
            Country::Netherlands => "NETHERLANDS",
            Country::France => "FRANCE",
            Country::Venice => "VENICE",
            Country::Ottoman => "OTTOMAN",
            Country::Pirate => "PIRATE",
            Country::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Country {
    type Err = CountryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Country::ALL
            .into_iter()
            .find(|country| country.as_str() == s)
            .ok_or_else(|| CountryParseError(s.to_string()))
    }
}
