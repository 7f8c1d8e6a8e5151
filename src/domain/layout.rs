//! Slice-and-dice treemap layout.
//!
//! Each level splits its rectangle along the longer side (height on ties).
//! Every child but the last drawn one gets `floor(weight * axis / total)`
//! pixels; the last one takes whatever is left, so the pieces tile the parent
//! exactly despite rounding.

use generational_arena::Index;
use tracing::instrument;

use crate::domain::arena::TreeArena;
use crate::domain::error::DomainResult;
use crate::domain::geometry::{Rect, Tile};

impl TreeArena {
    /// Tiles for every non-empty leaf under `node`, in depth-first child order.
    ///
    /// Returns an empty vector for an empty tree, a zero-weight node or a
    /// zero-area rectangle. The order matches `leaves(node)` one-to-one.
    #[instrument(level = "debug", skip(self))]
    pub fn layout(&self, node: Index, rect: Rect) -> DomainResult<Vec<Tile>> {
        self.node(node)?;
        let mut tiles = Vec::new();
        if rect.is_degenerate() {
            return Ok(tiles);
        }
        self.layout_into(node, rect, &mut tiles);
        Ok(tiles)
    }

    fn layout_into(&self, node_idx: Index, rect: Rect, tiles: &mut Vec<Tile>) {
        let Some(node) = self.get_node(node_idx) else {
            return;
        };
        if node.is_empty() || node.weight == 0 {
            return;
        }
        if node.children.is_empty() {
            tiles.push(Tile {
                rect,
                color: node.color,
            });
            return;
        }

        let along_width = rect.width > rect.height;
        let axis = if along_width { rect.width } else { rect.height };

        // Trailing zero-weight children draw nothing, so the remainder goes to
        // the last child that does.
        let Some(last) = node
            .children
            .iter()
            .rposition(|&c| self.get_node(c).is_some_and(|c| c.weight > 0))
        else {
            return;
        };

        let mut offset = 0u32;
        for (i, &child_idx) in node.children.iter().enumerate().take(last + 1) {
            let Some(child) = self.get_node(child_idx) else {
                continue;
            };
            let remaining = axis - offset;
            let extent = if i == last {
                remaining
            } else {
                proportional_extent(child.weight, node.weight, axis).min(remaining)
            };

            let sub = if along_width {
                Rect::new(
                    rect.x.saturating_add_unsigned(offset),
                    rect.y,
                    extent,
                    rect.height,
                )
            } else {
                Rect::new(
                    rect.x,
                    rect.y.saturating_add_unsigned(offset),
                    rect.width,
                    extent,
                )
            };
            self.layout_into(child_idx, sub, tiles);
            offset += extent;
        }
    }
}

/// `floor(weight / total * axis)` without floating point.
fn proportional_extent(weight: u64, total: u64, axis: u32) -> u32 {
    let scaled = u128::from(weight) * u128::from(axis) / u128::from(total);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::color::Rgb;
    use crate::domain::flavor::Flavor;

    fn counting_tree() -> TreeArena {
        let mut n = 0u8;
        TreeArena::with_color_source(Flavor::Population, move || {
            n = n.wrapping_add(1);
            Rgb::new(n, n, n)
        })
    }

    #[test]
    fn given_two_leaves_when_wider_than_tall_then_splits_along_width() {
        let mut tree = counting_tree();
        let a = tree.insert_leaf("a", 30);
        let b = tree.insert_leaf("b", 70);
        let root = tree.insert_branch("root", vec![a, b]).unwrap();

        let tiles = tree.layout(root, Rect::new(0, 0, 100, 10)).unwrap();

        let rects: Vec<Rect> = tiles.iter().map(|t| t.rect).collect();
        assert_eq!(
            rects,
            vec![Rect::new(0, 0, 30, 10), Rect::new(30, 0, 70, 10)]
        );
        assert_eq!(tiles[0].color, tree.node(a).unwrap().color());
        assert_eq!(tiles[1].color, tree.node(b).unwrap().color());
    }

    #[test]
    fn given_square_rect_when_splitting_then_uses_height() {
        let mut tree = counting_tree();
        let a = tree.insert_leaf("a", 1);
        let b = tree.insert_leaf("b", 1);
        let root = tree.insert_branch("root", vec![a, b]).unwrap();

        let tiles = tree.layout(root, Rect::new(0, 0, 10, 10)).unwrap();

        assert_eq!(tiles[0].rect, Rect::new(0, 0, 10, 5));
        assert_eq!(tiles[1].rect, Rect::new(0, 5, 10, 5));
    }

    #[test]
    fn given_rounding_when_splitting_then_last_child_absorbs_remainder() {
        let mut tree = counting_tree();
        let kids: Vec<_> = (0..3).map(|i| tree.insert_leaf(format!("c{i}"), 1)).collect();
        let root = tree.insert_branch("root", kids).unwrap();

        let tiles = tree.layout(root, Rect::new(0, 0, 100, 1)).unwrap();

        let widths: Vec<u32> = tiles.iter().map(|t| t.rect.width).collect();
        assert_eq!(widths, vec![33, 33, 34]);
    }

    #[test]
    fn given_trailing_zero_weight_child_when_splitting_then_no_gap() {
        let mut tree = counting_tree();
        let a = tree.insert_leaf("a", 1);
        let b = tree.insert_leaf("b", 1);
        let zero = tree.insert_leaf("zero", 0);
        let root = tree.insert_branch("root", vec![a, b, zero]).unwrap();

        let tiles = tree.layout(root, Rect::new(0, 0, 101, 1)).unwrap();

        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[1].rect, Rect::new(50, 0, 51, 1));
    }

    #[test]
    fn given_leaf_when_laying_out_then_returns_whole_rect() {
        let mut tree = counting_tree();
        let leaf = tree.insert_leaf("only", 5);
        let rect = Rect::new(3, 4, 20, 10);
        let tiles = tree.layout(leaf, rect).unwrap();
        assert_eq!(tiles, vec![Tile { rect, color: tree.node(leaf).unwrap().color() }]);
    }

    #[test]
    fn given_degenerate_inputs_when_laying_out_then_empty() {
        let mut tree = counting_tree();
        let empty = tree.insert_empty();
        let zero = tree.insert_leaf("zero", 0);
        let some = tree.insert_leaf("some", 3);

        assert!(tree.layout(empty, Rect::new(0, 0, 10, 10)).unwrap().is_empty());
        assert!(tree.layout(zero, Rect::new(0, 0, 10, 10)).unwrap().is_empty());
        assert!(tree.layout(some, Rect::new(0, 0, 0, 10)).unwrap().is_empty());
    }

    #[test]
    fn given_offset_origin_when_splitting_then_children_are_offset() {
        let mut tree = counting_tree();
        let a = tree.insert_leaf("a", 1);
        let b = tree.insert_leaf("b", 3);
        let root = tree.insert_branch("root", vec![a, b]).unwrap();

        let tiles = tree.layout(root, Rect::new(10, 20, 4, 40)).unwrap();

        assert_eq!(tiles[0].rect, Rect::new(10, 20, 4, 10));
        assert_eq!(tiles[1].rect, Rect::new(10, 30, 4, 30));
    }
}
