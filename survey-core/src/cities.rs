use std::collections::HashSet;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::sample::Coordinate;

/// Offline geographic reference table, compiled into the binary.
const CITY_TABLE: &str = include_str!("../data/cities.csv");

/// One entry of the reference table.
#[derive(Debug, Clone, Deserialize)]
pub struct CityEntry {
    pub city: String,
    pub country: String,
    pub lat: f64,
    pub lng: f64,
}

/// Nearest-city lookup over the embedded reference table.
#[derive(Debug)]
pub struct CityIndex {
    entries: Vec<CityEntry>,
}

impl CityIndex {
    /// Parse the embedded table. Fails only if the compiled-in data is
    /// malformed.
    pub fn embedded() -> Result<Self> {
        Self::from_csv(CITY_TABLE)
    }

    pub fn from_csv(data: &str) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let entries: Vec<CityEntry> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .context("Failed to parse city reference table")?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Closest known city by great-circle distance. Linear scan; the
    /// table is small and lives in memory.
    pub fn nearest(&self, coord: Coordinate) -> Option<&CityEntry> {
        self.entries
            .iter()
            .min_by(|a, b| distance_km(a, coord).total_cmp(&distance_km(b, coord)))
    }
}

fn distance_km(entry: &CityEntry, coord: Coordinate) -> f64 {
    haversine::distance(
        haversine::Location {
            latitude: coord.latitude,
            longitude: coord.longitude,
        },
        haversine::Location {
            latitude: entry.lat,
            longitude: entry.lng,
        },
        haversine::Units::Kilometers,
    )
}

/// Map each coordinate to its nearest city name, deduplicated by exact
/// name with first-occurrence order preserved.
pub fn resolve_cities(index: &CityIndex, coords: &[Coordinate]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut cities = Vec::new();

    for &coord in coords {
        if let Some(entry) = index.nearest(coord)
            && seen.insert(entry.city.clone())
        {
            cities.push(entry.city.clone());
        }
    }

    cities
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate { latitude, longitude }
    }

    #[test]
    fn embedded_table_parses_and_is_nonempty() {
        let index = CityIndex::embedded().expect("embedded table must parse");
        assert!(index.len() > 300);
    }

    #[test]
    fn embedded_table_can_satisfy_the_advisory_minimum() {
        // The >= min_cities check is advisory, but it must at least be
        // reachable: the reference table needs comfortably more unique
        // names than the default threshold.
        let index = CityIndex::embedded().unwrap();
        let min = crate::config::Config::default().min_cities;

        let unique: HashSet<&str> =
            index.entries.iter().map(|e| e.city.as_str()).collect();
        assert!(
            unique.len() > min + 100,
            "reference table has {} unique names, need well over {min}",
            unique.len()
        );
    }

    #[test]
    fn nearest_finds_the_obvious_city() {
        let index = CityIndex::embedded().unwrap();

        // Right on top of Reykjavik.
        let entry = index.nearest(coord(64.1, -21.9)).unwrap();
        assert_eq!(entry.city, "Reykjavik");

        // Deep southern ocean resolves to a far-south port.
        let entry = index.nearest(coord(-75.0, -68.0)).unwrap();
        assert_eq!(entry.city, "Ushuaia");
    }

    #[test]
    fn nearest_on_empty_index_is_none() {
        let index = CityIndex::from_csv("city,country,lat,lng\n").unwrap();
        assert!(index.nearest(coord(0.0, 0.0)).is_none());
    }

    #[test]
    fn resolve_deduplicates_preserving_first_seen_order() {
        let index = CityIndex::from_csv(
            "city,country,lat,lng\n\
             Alpha,AA,10.0,10.0\n\
             Beta,BB,-10.0,-10.0\n",
        )
        .unwrap();

        let coords = [
            coord(9.0, 9.0),    // Alpha
            coord(-9.0, -9.0),  // Beta
            coord(11.0, 11.0),  // Alpha again, dropped
            coord(-11.0, -11.0), // Beta again, dropped
        ];

        let cities = resolve_cities(&index, &coords);
        assert_eq!(cities, vec!["Alpha".to_string(), "Beta".to_string()]);
    }
}
