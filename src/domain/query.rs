//! Leaf enumeration, hit testing and root-to-node paths.

use generational_arena::Index;
use tracing::instrument;

use crate::domain::arena::TreeArena;
use crate::domain::error::DomainResult;
use crate::domain::geometry::{Point, Rect, Tile};

impl TreeArena {
    /// Non-empty leaves under `node` in layout order.
    ///
    /// Any subtree of weight 0 is skipped, at every level, exactly like
    /// `layout` skips it; index `i` here belongs to tile `i` there.
    #[instrument(level = "debug", skip(self))]
    pub fn leaves(&self, node: Index) -> DomainResult<Vec<Index>> {
        self.node(node)?;
        let mut leaves = Vec::new();
        self.collect_leaves(node, &mut leaves);
        Ok(leaves)
    }

    fn collect_leaves(&self, node_idx: Index, leaves: &mut Vec<Index>) {
        let Some(node) = self.get_node(node_idx) else {
            return;
        };
        if node.is_empty() || node.weight == 0 {
            return;
        }
        if node.children.is_empty() {
            leaves.push(node_idx);
        } else {
            for &child in &node.children {
                self.collect_leaves(child, leaves);
            }
        }
    }

    /// Labels from the root down to `node`, joined by `separator`.
    ///
    /// An empty node contributes an empty label.
    #[instrument(level = "trace", skip(self))]
    pub fn path_to(&self, node: Index, separator: &str) -> DomainResult<String> {
        let start = self.node(node)?;
        let mut labels: Vec<&str> = vec![start.label().unwrap_or_default()];
        labels.extend(self.ancestors(node).map(|(_, n)| n.label().unwrap_or_default()));
        labels.reverse();
        Ok(labels.join(separator))
    }

    /// `path_to` with this tree's separator.
    pub fn path(&self, node: Index) -> DomainResult<String> {
        self.path_to(node, self.separator())
    }

    /// Lays out `node` in `rect` and hit-tests `point` against fresh lists.
    pub fn leaf_at(&self, node: Index, rect: Rect, point: Point) -> DomainResult<Option<Index>> {
        let tiles = self.layout(node, rect)?;
        let leaves = self.leaves(node)?;
        Ok(hit_test(point, &tiles, &leaves))
    }
}

/// The leaf whose tile strictly contains `point`.
///
/// `tiles` and `leaves` must come from `layout` and `leaves` on the same tree
/// state: they are matched by position, so a stale pair gives wrong answers.
pub fn hit_test(point: Point, tiles: &[Tile], leaves: &[Index]) -> Option<Index> {
    tiles
        .iter()
        .position(|tile| tile.rect.contains(point))
        .and_then(|i| leaves.get(i).copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::color::Rgb;
    use crate::domain::flavor::Flavor;

    fn tree() -> TreeArena {
        TreeArena::with_color_source(Flavor::Population, || Rgb::new(9, 9, 9))
    }

    #[test]
    fn given_zero_weight_subtrees_when_listing_leaves_then_skipped() {
        let mut tree = tree();
        let a = tree.insert_leaf("a", 1);
        let zero = tree.insert_leaf("zero", 0);
        let empty = tree.insert_empty();
        let z1 = tree.insert_leaf("z1", 0);
        let dead = tree.insert_branch("dead", vec![z1]).unwrap();
        let b = tree.insert_leaf("b", 2);
        let root = tree.insert_branch("root", vec![a, zero, empty, dead, b]).unwrap();

        assert_eq!(tree.leaves(root).unwrap(), vec![a, b]);
        assert_eq!(tree.layout(root, Rect::new(0, 0, 30, 3)).unwrap().len(), 2);
    }

    #[test]
    fn given_point_outside_all_tiles_when_hit_testing_then_none() {
        let mut tree = tree();
        let a = tree.insert_leaf("a", 30);
        let b = tree.insert_leaf("b", 70);
        let root = tree.insert_branch("root", vec![a, b]).unwrap();
        let rect = Rect::new(0, 0, 100, 10);

        assert_eq!(tree.leaf_at(root, rect, Point::new(50, 5)).unwrap(), Some(b));
        assert_eq!(tree.leaf_at(root, rect, Point::new(10, 5)).unwrap(), Some(a));
        assert_eq!(tree.leaf_at(root, rect, Point::new(150, 5)).unwrap(), None);
    }

    #[test]
    fn given_mismatched_lists_when_hit_testing_then_none() {
        let tiles = [Tile {
            rect: Rect::new(0, 0, 10, 10),
            color: Rgb::default(),
        }];
        assert_eq!(hit_test(Point::new(5, 5), &tiles, &[]), None);
    }

    #[test]
    fn given_root_when_building_path_then_just_its_label() {
        let mut tree = tree();
        let root = tree.insert_leaf("World", 1);
        assert_eq!(tree.path(root).unwrap(), "World");
    }
}
