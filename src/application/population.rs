//! World -> region -> country population data source.
//!
//! Works on records the host has already fetched and decoded; no network and
//! no payload format lives here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::builder::{NodeSpec, TreeBuilder};
use crate::application::error::ApplicationResult;
use crate::config::Settings;
use crate::domain::{Flavor, TreeArena};

/// Pseudo-region the statistics provider uses for country groupings.
pub const AGGREGATES_REGION: &str = "Aggregates";

/// One population figure for one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationRecord {
    pub country: String,
    /// Raw value as reported; may be missing or non-numeric
    pub value: Option<String>,
}

/// Region membership of one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub name: String,
    pub region: Option<String>,
}

/// Country name to population, keeping only usable figures.
///
/// A record is dropped if its country name is empty or its value is missing,
/// does not parse as an integer, or is not positive.
pub fn populations_by_country(records: &[PopulationRecord]) -> BTreeMap<String, u64> {
    records
        .iter()
        .filter(|r| !r.country.is_empty())
        .filter_map(|r| {
            let value = r.value.as_deref()?.trim().parse::<u64>().ok()?;
            (value > 0).then(|| (r.country.clone(), value))
        })
        .collect()
}

/// Countries grouped by region, regions in order of first appearance.
///
/// Records without a region, in the aggregates pseudo-region, or with an
/// empty name are ignored.
pub fn countries_by_region(records: &[CountryRecord]) -> Vec<(String, Vec<String>)> {
    let mut regions: Vec<(String, Vec<String>)> = Vec::new();
    for record in records {
        let Some(region) = record.region.as_deref() else {
            continue;
        };
        if region == AGGREGATES_REGION || record.name.is_empty() {
            continue;
        }
        match regions.iter_mut().find(|(name, _)| name == region) {
            Some((_, countries)) => countries.push(record.name.clone()),
            None => regions.push((region.to_string(), vec![record.name.clone()])),
        }
    }
    regions
}

/// Shape of the three-level population tree.
///
/// Countries without population data are left out; a region left with no
/// countries stays as a zero-weight leaf.
pub fn population_spec(
    world_label: &str,
    populations: &BTreeMap<String, u64>,
    regions: &[(String, Vec<String>)],
) -> NodeSpec {
    let region_specs = regions
        .iter()
        .map(|(region, countries)| {
            let leaves = countries
                .iter()
                .filter_map(|country| {
                    populations
                        .get(country)
                        .map(|&population| NodeSpec::leaf(country.clone(), population))
                })
                .collect();
            NodeSpec::branch(region.clone(), leaves)
        })
        .collect();
    NodeSpec::branch(world_label, region_specs)
}

/// Builds the population tree with the population flavor.
#[instrument(level = "debug", skip_all)]
pub fn build_population_tree(
    populations: &[PopulationRecord],
    countries: &[CountryRecord],
    settings: &Settings,
) -> ApplicationResult<TreeArena> {
    let populations = populations_by_country(populations);
    let regions = countries_by_region(countries);
    debug!(
        countries = populations.len(),
        regions = regions.len(),
        "building population tree"
    );
    let spec = population_spec(&settings.world_label, &populations, &regions);
    Ok(TreeBuilder::from_settings(Flavor::Population, settings).build(&spec)?)
}
