//! RESTCountries v3.1 resolver.
//!
//! Speaks the public RESTCountries wire protocol:
//!
//! | Lookup | Path | Notes |
//! |--------|------|-------|
//! | by code | `GET /alpha/{code}?fields=name,cca3,borders` | single object |
//! | by name | `GET /name/{name}?fields=name,cca3,borders` | array, first match is canonical |
//! | listing | `GET /all?fields=name,cca3,area` | array of summaries |
//!
//! The `borders` field may be absent from a response; that is how the
//! service encodes an island.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

use super::{CountryResolver, ResolveError};
use crate::country::{Country, CountryCode, CountrySummary};

/// Fields requested for single-country lookups.
const ROUTE_FIELDS: &str = "name,cca3,borders";
/// Fields requested for the bulk listing.
const LIST_FIELDS: &str = "name,cca3,area";

const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Rejected resolver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid base URL {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error("invalid timeout {value:?}: expected whole seconds")]
    InvalidTimeout { value: String },
}

/// Connection settings for the RESTCountries service.
#[derive(Debug, Clone)]
pub struct RestResolverConfig {
    /// Base URL of the service.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for RestResolverConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL parses"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl RestResolverConfig {
    /// Load settings from the environment, falling back to defaults.
    ///
    /// Variables:
    /// - `OVERLAND_API_URL` (default: `https://restcountries.com/v3.1/`)
    /// - `OVERLAND_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("OVERLAND_API_URL") {
            config.base_url = Url::parse(&url).map_err(|e| ConfigError::InvalidBaseUrl {
                url,
                message: e.to_string(),
            })?;
        }
        if let Ok(value) = std::env::var("OVERLAND_TIMEOUT_SECS") {
            let secs: u64 = value
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout { value })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

/// HTTP client for the RESTCountries service.
#[derive(Debug, Clone)]
pub struct RestResolver {
    http: reqwest::Client,
    base_url: Url,
}

impl RestResolver {
    pub fn new(config: RestResolverConfig) -> Result<Self, ResolveError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ResolveError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    fn endpoint(&self, segments: &[&str], fields: &str) -> Result<Url, ResolveError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ResolveError::Transport("base URL cannot hold a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        url.set_query(Some(&format!("fields={fields}")));
        Ok(url)
    }

    async fn get_json<T>(&self, url: Url, query: &str) -> Result<T, ResolveError>
    where
        T: serde::de::DeserializeOwned,
    {
        debug!(%url, "country service request");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ResolveError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ResolveError::Malformed(e.to_string()))
        } else if status == reqwest::StatusCode::NOT_FOUND {
            Err(ResolveError::NotFound {
                query: query.to_string(),
            })
        } else {
            Err(ResolveError::Status {
                status: status.as_u16(),
            })
        }
    }
}

// -- Wire types ---------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct WireCountry {
    name: WireName,
    cca3: String,
    /// Absent for islands.
    #[serde(default)]
    borders: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct WireName {
    common: String,
}

#[derive(Debug, Deserialize)]
struct WireSummary {
    name: WireName,
    cca3: String,
    #[serde(default)]
    area: f64,
}

impl WireCountry {
    fn into_country(self) -> Result<Country, ResolveError> {
        let code = parse_code(&self.cca3)?;
        let neighbors = self
            .borders
            .iter()
            .map(|b| parse_code(b))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Country {
            name: self.name.common,
            code,
            neighbors,
        })
    }
}

fn parse_code(raw: &str) -> Result<CountryCode, ResolveError> {
    CountryCode::from_str(raw).map_err(|e| ResolveError::Malformed(e.to_string()))
}

#[async_trait]
impl CountryResolver for RestResolver {
    async fn by_code(&self, code: &CountryCode) -> Result<Country, ResolveError> {
        let url = self.endpoint(&["alpha", code.as_str()], ROUTE_FIELDS)?;
        let wire: WireCountry = self.get_json(url, code.as_str()).await?;
        wire.into_country()
    }

    async fn by_name(&self, name: &str) -> Result<Country, ResolveError> {
        let url = self.endpoint(&["name", name], ROUTE_FIELDS)?;
        let matches: Vec<WireCountry> = self.get_json(url, name).await?;
        let first = matches.into_iter().next().ok_or_else(|| ResolveError::NotFound {
            query: name.to_string(),
        })?;
        first.into_country()
    }

    async fn all_countries(&self) -> Result<Vec<CountrySummary>, ResolveError> {
        let url = self.endpoint(&["all"], LIST_FIELDS)?;
        let wire: Vec<WireSummary> = self.get_json(url, "all").await?;
        wire.into_iter()
            .map(|summary| {
                Ok(CountrySummary {
                    name: summary.name.common,
                    code: parse_code(&summary.cca3)?,
                    area: summary.area,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_restcountries() {
        let config = RestResolverConfig::default();
        assert_eq!(config.base_url.as_str(), "https://restcountries.com/v3.1/");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn endpoint_joins_segments_and_fields() {
        let resolver = RestResolver::new(RestResolverConfig::default()).unwrap();
        let url = resolver.endpoint(&["alpha", "FRA"], ROUTE_FIELDS).unwrap();
        assert_eq!(
            url.as_str(),
            "https://restcountries.com/v3.1/alpha/FRA?fields=name,cca3,borders"
        );
    }

    #[test]
    fn wire_country_decodes_missing_borders_as_island() {
        let wire: WireCountry =
            serde_json::from_str(r#"{"name":{"common":"Iceland"},"cca3":"ISL"}"#).unwrap();
        let country = wire.into_country().unwrap();
        assert_eq!(country.name, "Iceland");
        assert!(country.is_island());
    }

    #[test]
    fn wire_country_rejects_bad_codes() {
        let wire: WireCountry =
            serde_json::from_str(r#"{"name":{"common":"Nowhere"},"cca3":"n/a"}"#).unwrap();
        assert!(matches!(
            wire.into_country(),
            Err(ResolveError::Malformed(_))
        ));
    }
}
