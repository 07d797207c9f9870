//! Read-only county reference data.
//!
//! Region and county tables are owned by the host application; the engine
//! only needs capacity figures and the county → region mapping, which it
//! reads through [`CountyCatalog`].

use greenfield_logic::{CountyId, RegionId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountyInfo {
    pub id: CountyId,
    pub region_id: RegionId,
    pub name: String,
    /// Land suitable for development, MW equivalent.
    pub land_capacity_mw: f64,
    /// Free grid connection capacity, MW.
    pub grid_capacity_mw: f64,
}

pub trait CountyCatalog {
    fn counties(&self) -> &[CountyInfo];

    fn county(&self, id: &str) -> Option<&CountyInfo> {
        self.counties().iter().find(|c| c.id == id)
    }

    /// Distinct region ids, sorted.
    fn regions(&self) -> Vec<RegionId> {
        let mut regions: Vec<RegionId> = self.counties().iter().map(|c| c.region_id.clone()).collect();
        regions.sort();
        regions.dedup();
        regions
    }
}

/// Catalog backed by an in-memory table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticCatalog {
    pub counties: Vec<CountyInfo>,
}

impl StaticCatalog {
    pub fn new(counties: Vec<CountyInfo>) -> Self {
        Self { counties }
    }

    /// Parse a JSON array of counties.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let counties: Vec<CountyInfo> = serde_json::from_str(json)?;
        Ok(Self { counties })
    }

    /// A small built-in table, enough for tests and demos.
    pub fn sample() -> Self {
        let county = |id: &str, region: &str, name: &str, land: f64, grid: f64| CountyInfo {
            id: id.to_string(),
            region_id: region.to_string(),
            name: name.to_string(),
            land_capacity_mw: land,
            grid_capacity_mw: grid,
        };
        Self::new(vec![
            county("pl-0201", "dolnoslaskie", "Bolesławiec", 300.0, 200.0),
            county("pl-0202", "dolnoslaskie", "Dzierżoniów", 150.0, 80.0),
            county("pl-1403", "mazowieckie", "Ciechanów", 400.0, 250.0),
            county("pl-1404", "mazowieckie", "Garwolin", 250.0, 120.0),
            county("pl-2201", "pomorskie", "Bytów", 500.0, 300.0),
            county("pl-2202", "pomorskie", "Chojnice", 60.0, 45.0),
        ])
    }
}

impl CountyCatalog for StaticCatalog {
    fn counties(&self) -> &[CountyInfo] {
        &self.counties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_and_regions() {
        let catalog = StaticCatalog::sample();
        assert_eq!(catalog.county("pl-2201").map(|c| c.region_id.as_str()), Some("pomorskie"));
        assert!(catalog.county("nowhere").is_none());
        assert_eq!(
            catalog.regions(),
            vec!["dolnoslaskie", "mazowieckie", "pomorskie"]
        );
    }

    #[test]
    fn parses_json() {
        let json = r#"[{"id":"c1","region_id":"r1","name":"One","land_capacity_mw":10.0,"grid_capacity_mw":5.0}]"#;
        let catalog = StaticCatalog::from_json(json).unwrap();
        assert_eq!(catalog.counties().len(), 1);
    }
}
