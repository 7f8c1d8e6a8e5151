//! Declarative, bottom-up tree construction.

use generational_arena::Index;
use tracing::instrument;

use crate::config::Settings;
use crate::domain::{ColorSource, DomainResult, Flavor, TreeArena};

/// Shape of a tree to build: what a data source hands to the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeSpec {
    /// An empty tree: no label, no children, weight 0
    Empty,
    Leaf { label: String, weight: u64 },
    /// Weight is derived from the children
    Branch { label: String, children: Vec<NodeSpec> },
}

impl NodeSpec {
    pub fn leaf(label: impl Into<String>, weight: u64) -> Self {
        Self::Leaf {
            label: label.into(),
            weight,
        }
    }

    pub fn branch(label: impl Into<String>, children: Vec<NodeSpec>) -> Self {
        Self::Branch {
            label: label.into(),
            children,
        }
    }
}

/// Builds a `TreeArena` from a `NodeSpec`, children before parents.
pub struct TreeBuilder {
    flavor: Flavor,
    separator: Option<String>,
    colors: Option<Box<dyn ColorSource>>,
}

impl TreeBuilder {
    pub fn new(flavor: Flavor) -> Self {
        Self {
            flavor,
            separator: None,
            colors: None,
        }
    }

    /// Separator and color seed taken from `settings`.
    pub fn from_settings(flavor: Flavor, settings: &Settings) -> Self {
        let separator = settings.separator_for(&flavor);
        Self {
            flavor,
            separator: Some(separator),
            colors: Some(settings.color_source()),
        }
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    pub fn color_source(mut self, colors: impl ColorSource + 'static) -> Self {
        self.colors = Some(Box::new(colors));
        self
    }

    /// A fresh arena configured like this builder, with no nodes yet.
    pub fn arena(self) -> TreeArena {
        let mut tree = match self.colors {
            Some(colors) => TreeArena::with_boxed_color_source(self.flavor, colors),
            None => TreeArena::new(self.flavor),
        };
        if let Some(separator) = self.separator {
            tree.set_separator(separator);
        }
        tree
    }

    /// Builds `spec` and makes its top node the root.
    #[instrument(level = "debug", skip(self, spec))]
    pub fn build(self, spec: &NodeSpec) -> DomainResult<TreeArena> {
        let mut tree = self.arena();
        let root = insert_spec(&mut tree, spec)?;
        tree.set_root(root)?;
        Ok(tree)
    }
}

/// Inserts `spec` as a new parentless subtree of `tree`.
pub fn insert_spec(tree: &mut TreeArena, spec: &NodeSpec) -> DomainResult<Index> {
    match spec {
        NodeSpec::Empty => Ok(tree.insert_empty()),
        NodeSpec::Leaf { label, weight } => Ok(tree.insert_leaf(label.clone(), *weight)),
        NodeSpec::Branch { label, children } => {
            let kids = children
                .iter()
                .map(|child| insert_spec(tree, child))
                .collect::<DomainResult<Vec<_>>>()?;
            tree.insert_branch(label.clone(), kids)
        }
    }
}
