//! Country records and identifiers.
//!
//! A country is identified by its 3-letter code; the display name is a
//! secondary lookup key. Records are immutable once built and are shared
//! between the cache and the search machinery as `Arc<Country>`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// 3-letter uppercase country code, the graph-node identity.
///
/// Parsed codes are normalized to uppercase, so `"fra".parse()` and
/// `"FRA".parse()` produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rejected country-code input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid country code {0:?}: expected exactly 3 ASCII letters")]
pub struct InvalidCode(pub String);

impl FromStr for CountryCode {
    type Err = InvalidCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 3 && s.bytes().all(|b| b.is_ascii_alphabetic()) {
            Ok(CountryCode(s.to_ascii_uppercase()))
        } else {
            Err(InvalidCode(s.to_string()))
        }
    }
}

/// One country as returned by the lookup service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    /// Common display name.
    pub name: String,
    /// Canonical identity.
    pub code: CountryCode,
    /// Codes of countries sharing a land border, in service order.
    pub neighbors: Vec<CountryCode>,
}

impl Country {
    /// An island has no land borders, so no overland route can touch it.
    pub fn is_island(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Does this country share a land border with `other`?
    pub fn borders(&self, other: &CountryCode) -> bool {
        self.neighbors.contains(other)
    }
}

/// Lightweight record for the country listing; never used for routing.
#[derive(Debug, Clone, PartialEq)]
pub struct CountrySummary {
    pub name: String,
    pub code: CountryCode,
    /// Surface area in km², used only for ordering the listing.
    pub area: f64,
}
