#![allow(dead_code)]
//! Shared fixtures: a scripted in-memory country resolver.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use overland_core::country::{Country, CountryCode, CountrySummary};
use overland_core::resolver::{CountryResolver, ResolveError};

pub struct FixtureResolver {
    countries: HashMap<CountryCode, Country>,
    aliases: HashMap<String, CountryCode>,
    areas: HashMap<CountryCode, f64>,
    calls: AtomicU64,
}

impl FixtureResolver {
    /// Build a resolver from `(code, name, neighbors)` triples.
    pub fn new(entries: Vec<(&str, &str, Vec<&str>)>) -> Self {
        let mut countries = HashMap::new();
        for (code, name, neighbors) in entries {
            let code = CountryCode::from_str(code).unwrap();
            let neighbors = neighbors
                .into_iter()
                .map(|n| CountryCode::from_str(n).unwrap())
                .collect();
            countries.insert(
                code.clone(),
                Country {
                    name: name.to_string(),
                    code,
                    neighbors,
                },
            );
        }
        Self {
            countries,
            aliases: HashMap::new(),
            areas: HashMap::new(),
            calls: AtomicU64::new(0),
        }
    }

    /// Register an alternate spelling for a country, the way the live
    /// service matches several names onto one record.
    pub fn with_alias(mut self, name: &str, code: &str) -> Self {
        self.aliases
            .insert(name.to_string(), CountryCode::from_str(code).unwrap());
        self
    }

    pub fn with_area(mut self, code: &str, area: f64) -> Self {
        self.areas.insert(CountryCode::from_str(code).unwrap(), area);
        self
    }

    /// Calls that reached this resolver, cache hits excluded.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CountryResolver for FixtureResolver {
    async fn by_code(&self, code: &CountryCode) -> Result<Country, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.countries
            .get(code)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound {
                query: code.to_string(),
            })
    }

    async fn by_name(&self, name: &str) -> Result<Country, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(code) = self.aliases.get(name) {
            return Ok(self.countries[code].clone());
        }
        self.countries
            .values()
            .find(|country| country.name == name)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound {
                query: name.to_string(),
            })
    }

    async fn all_countries(&self) -> Result<Vec<CountrySummary>, ResolveError> {
        Ok(self
            .countries
            .values()
            .map(|country| CountrySummary {
                name: country.name.clone(),
                code: country.code.clone(),
                area: self.areas.get(&country.code).copied().unwrap_or(0.0),
            })
            .collect())
    }
}

/// A small fixture Europe: Iberia through central Europe, plus islands.
pub fn europe() -> Vec<(&'static str, &'static str, Vec<&'static str>)> {
    vec![
        ("PRT", "Portugal", vec!["ESP"]),
        ("ESP", "Spain", vec!["PRT", "FRA"]),
        ("FRA", "France", vec!["ESP", "DEU", "ITA"]),
        ("ITA", "Italy", vec!["FRA"]),
        ("DEU", "Germany", vec!["FRA", "POL", "CZE"]),
        ("CZE", "Czechia", vec!["DEU", "POL"]),
        ("POL", "Poland", vec!["DEU", "CZE"]),
        ("ISL", "Iceland", vec![]),
        ("AUS", "Australia", vec![]),
    ]
}
