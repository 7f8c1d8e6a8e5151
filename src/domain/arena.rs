use std::collections::HashSet;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::color::{ColorSource, RandomColors, Rgb};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::flavor::Flavor;

/// Tree node in the arena-based hierarchy structure.
///
/// Fields are private: the shape of a tree only changes through the arena's
/// construction and mutation operations, which keep `parent` and `children`
/// consistent with each other.
#[derive(Debug, Clone)]
pub struct TreemapNode {
    /// Domain value; `None` marks an empty tree
    pub(crate) label: Option<String>,
    /// Own weight for a leaf, sum of the children for an internal node
    pub(crate) weight: u64,
    /// Only leaf colors are ever rendered
    pub(crate) color: Rgb,
    /// Index of parent node in the arena, None for root nodes
    pub(crate) parent: Option<Index>,
    /// Indices of child nodes in the arena, in layout order
    pub(crate) children: Vec<Index>,
}

impl TreemapNode {
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn parent(&self) -> Option<Index> {
        self.parent
    }

    pub fn children(&self) -> &[Index] {
        &self.children
    }

    /// An empty tree has no label (and therefore no children and weight 0).
    pub fn is_empty(&self) -> bool {
        self.label.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl fmt::Display for TreemapNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label.as_deref().unwrap_or(""), self.weight)
    }
}

/// Arena-based tree structure holding one treemap hierarchy.
///
/// Nodes are built bottom-up: children are inserted first, then the parent
/// constructor adopts them. Detached subtrees (see `remove_node`) stay in the
/// arena until they are re-attached or discarded.
pub struct TreeArena {
    /// Arena storage for all tree nodes
    arena: Arena<TreemapNode>,
    /// Designated root, None until set
    root: Option<Index>,
    flavor: Flavor,
    /// Joins labels in `path`; defaults to the flavor's separator
    separator: String,
    colors: Box<dyn ColorSource>,
}

impl fmt::Debug for TreeArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeArena")
            .field("arena", &self.arena)
            .field("root", &self.root)
            .field("flavor", &self.flavor)
            .field("separator", &self.separator)
            .finish_non_exhaustive()
    }
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new(Flavor::default())
    }
}

impl TreeArena {
    pub fn new(flavor: Flavor) -> Self {
        Self::with_color_source(flavor, RandomColors)
    }

    pub fn with_color_source(flavor: Flavor, colors: impl ColorSource + 'static) -> Self {
        Self::with_boxed_color_source(flavor, Box::new(colors))
    }

    pub fn with_boxed_color_source(flavor: Flavor, colors: Box<dyn ColorSource>) -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            separator: flavor.separator().to_string(),
            flavor,
            colors,
        }
    }

    pub fn flavor(&self) -> &Flavor {
        &self.flavor
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn set_separator(&mut self, separator: impl Into<String>) {
        self.separator = separator.into();
    }

    /// General construction contract.
    ///
    /// With children, the weight is their sum and `explicit_weight` is ignored;
    /// each child is stamped with the new node as parent. Without children the
    /// weight is `explicit_weight`. A label is required unless the node is an
    /// empty tree (no children, weight 0).
    #[instrument(level = "trace", skip(self))]
    pub fn make_node(
        &mut self,
        label: Option<String>,
        children: Vec<Index>,
        explicit_weight: u64,
    ) -> DomainResult<Index> {
        if label.is_none() && (!children.is_empty() || explicit_weight > 0) {
            return Err(DomainError::MissingLabel);
        }

        let mut seen = HashSet::with_capacity(children.len());
        let mut weight = 0u64;
        for &child_idx in &children {
            let child = self.node(child_idx)?;
            if child.parent.is_some() {
                return Err(DomainError::AlreadyAttached(child_idx));
            }
            if !seen.insert(child_idx) {
                return Err(DomainError::DuplicateChild(child_idx));
            }
            weight = weight
                .checked_add(child.weight)
                .ok_or(DomainError::WeightOverflow(child_idx))?;
        }
        if children.is_empty() {
            weight = explicit_weight;
        }

        let adopted_root = self.root.is_some_and(|root| children.contains(&root));
        let node = TreemapNode {
            label,
            weight,
            color: self.colors.next_color(),
            parent: None,
            children: children.clone(),
        };
        let node_idx = self.arena.insert(node);

        for child_idx in children {
            if let Some(child) = self.arena.get_mut(child_idx) {
                child.parent = Some(node_idx);
            }
        }
        // A designated root that gets adopted hands the role to its new parent
        if adopted_root {
            self.root = Some(node_idx);
        }

        Ok(node_idx)
    }

    pub fn insert_leaf(&mut self, label: impl Into<String>, weight: u64) -> Index {
        let node = TreemapNode {
            label: Some(label.into()),
            weight,
            color: self.colors.next_color(),
            parent: None,
            children: Vec::new(),
        };
        self.arena.insert(node)
    }

    pub fn insert_branch(
        &mut self,
        label: impl Into<String>,
        children: Vec<Index>,
    ) -> DomainResult<Index> {
        self.make_node(Some(label.into()), children, 0)
    }

    pub fn insert_empty(&mut self) -> Index {
        let node = TreemapNode {
            label: None,
            weight: 0,
            color: self.colors.next_color(),
            parent: None,
            children: Vec::new(),
        };
        self.arena.insert(node)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn set_root(&mut self, idx: Index) -> DomainResult<()> {
        if self.node(idx)?.parent.is_some() {
            return Err(DomainError::NotParentless(idx));
        }
        self.root = Some(idx);
        Ok(())
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub(crate) fn replace_root(&mut self, root: Option<Index>) {
        self.root = root;
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreemapNode> {
        self.arena.get(idx)
    }

    /// Like `get_node`, but a stale or foreign index is an error.
    pub fn node(&self, idx: Index) -> DomainResult<&TreemapNode> {
        self.arena.get(idx).ok_or(DomainError::NodeNotFound(idx))
    }

    pub(crate) fn node_mut(&mut self, idx: Index) -> DomainResult<&mut TreemapNode> {
        self.arena.get_mut(idx).ok_or(DomainError::NodeNotFound(idx))
    }

    pub(crate) fn free(&mut self, idx: Index) -> Option<TreemapNode> {
        self.arena.remove(idx)
    }

    pub fn contains(&self, idx: Index) -> bool {
        self.arena.contains(idx)
    }

    /// Number of live nodes, including detached subtrees.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order traversal from the root.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self, self.root)
    }

    /// Pre-order traversal of the subtree at `idx`, `idx` included.
    pub fn descendants(&self, idx: Index) -> TreeIterator<'_> {
        TreeIterator::new(self, Some(idx))
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, self.root)
    }

    pub fn postorder_from(&self, idx: Index) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, Some(idx))
    }

    /// Strict ancestors of `idx`, nearest first.
    pub fn ancestors(&self, idx: Index) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            next: self.get_node(idx).and_then(|n| n.parent),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Internal nodes under `idx` whose weight differs from their children's sum.
    ///
    /// Weight propagation never re-sums children, so misuse such as
    /// `decrease_weight` on an internal node is only visible here.
    pub fn weight_mismatches(&self, idx: Index) -> Vec<Index> {
        self.postorder_from(idx)
            .filter(|(_, node)| !node.children.is_empty())
            .filter(|(_, node)| {
                let sum: u128 = node
                    .children
                    .iter()
                    .filter_map(|&c| self.get_node(c))
                    .map(|c| u128::from(c.weight))
                    .sum();
                sum != u128::from(node.weight)
            })
            .map(|(node_idx, _)| node_idx)
            .collect()
    }
}

pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena, start: Option<Index>) -> Self {
        Self {
            arena,
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreemapNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a TreeArena, start: Option<Index>) -> Self {
        Self {
            arena,
            stack: start.map(|idx| (idx, false)).into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreemapNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}

pub struct Ancestors<'a> {
    arena: &'a TreeArena,
    next: Option<Index>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (Index, &'a TreemapNode);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next?;
        let node = self.arena.get_node(idx)?;
        self.next = node.parent;
        Some((idx, node))
    }
}
