//! Domain layer: the treemap tree and its algorithms
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod arena;
pub mod color;
pub mod display;
pub mod error;
pub mod flavor;
pub mod geometry;
pub mod layout;
pub mod mutation;
pub mod query;

pub use arena::{TreeArena, TreemapNode};
pub use color::{ColorSource, RandomColors, Rgb, SeededColors};
pub use display::TreeNodeConvert;
pub use error::{DomainError, DomainResult};
pub use flavor::Flavor;
pub use geometry::{Point, Rect, Tile};
pub use query::hit_test;
