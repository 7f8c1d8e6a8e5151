//! Plain-text rendering of a tree as `label (weight)` lines.

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::TreeArena;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

// One `label (weight)` line per node, children in layout order
impl TreeNodeConvert for TreeArena {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(arena: &TreeArena, node_idx: Index) -> Tree<String> {
            match arena.get_node(node_idx) {
                Some(node) => Tree::new(node.to_string()).with_leaves(
                    node.children()
                        .iter()
                        .map(|&child_idx| build_tree(arena, child_idx)),
                ),
                None => Tree::new(format!("<stale {node_idx:?}>")),
            }
        }

        match self.root() {
            Some(root_idx) => build_tree(self, root_idx),
            None => Tree::new("Empty tree".to_string()),
        }
    }
}
