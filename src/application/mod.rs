//! Application layer: data sources and tree builders
//!
//! This layer turns external data (directories, decoded population records)
//! into trees that satisfy the domain's construction contract.

pub mod builder;
pub mod error;
pub mod filesystem;
pub mod population;

pub use builder::{insert_spec, NodeSpec, TreeBuilder};
pub use error::{ApplicationError, ApplicationResult};
pub use filesystem::{build_filesystem_tree, load_filesystem_tree};
pub use population::{
    build_population_tree, countries_by_region, populations_by_country, population_spec,
    CountryRecord, PopulationRecord,
};
