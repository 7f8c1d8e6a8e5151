//! Tree flavors and the path separator each one joins labels with.

use std::fmt;

pub const POPULATION_SEPARATOR: &str = "-->";
pub const FILESYSTEM_SEPARATOR: &str = "/";

/// Data domain of a tree; decides how root-to-leaf paths are joined.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Flavor {
    /// World -> region -> country.
    #[default]
    Population,
    /// Folders and files.
    FileSystem,
    Custom { separator: String },
}

impl Flavor {
    pub fn separator(&self) -> &str {
        match self {
            Flavor::Population => POPULATION_SEPARATOR,
            Flavor::FileSystem => FILESYSTEM_SEPARATOR,
            Flavor::Custom { separator } => separator,
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flavor::Population => write!(f, "population"),
            Flavor::FileSystem => write!(f, "filesystem"),
            Flavor::Custom { separator } => write!(f, "custom({separator})"),
        }
    }
}
