//! Weighted hierarchies rendered as space-filling treemaps.
//!
//! A tree lives in a [`TreeArena`]: it is built bottom-up, laid out into
//! integer rectangles with [`TreeArena::layout`], queried with
//! [`TreeArena::leaves`], [`hit_test`] and [`TreeArena::path`], and edited with
//! [`TreeArena::remove_node`], [`TreeArena::increase_weight`] and
//! [`TreeArena::decrease_weight`].

pub mod application;
pub mod config;
pub mod domain;
pub mod util;

pub use application::{ApplicationError, ApplicationResult, NodeSpec, TreeBuilder};
pub use config::Settings;
pub use domain::{
    hit_test, ColorSource, DomainError, DomainResult, Flavor, Point, RandomColors, Rect, Rgb,
    SeededColors, Tile, TreeArena, TreeNodeConvert, TreemapNode,
};
pub use generational_arena::Index;
