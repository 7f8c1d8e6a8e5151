//! Structural edits and weight adjustments.
//!
//! Weights are propagated along the parent chain only, never re-derived by
//! summing children, so every operation here is O(depth).

use generational_arena::Index;
use tracing::{debug, instrument, warn};

use crate::domain::arena::TreeArena;
use crate::domain::error::{DomainError, DomainResult};

impl TreeArena {
    /// Detaches `idx` from its parent and subtracts its weight from every ancestor.
    ///
    /// The detached subtree stays in the arena as its own parentless tree.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_node(&mut self, idx: Index) -> DomainResult<()> {
        let node = self.node(idx)?;
        let parent_idx = node.parent.ok_or(DomainError::RootRemoval(idx))?;
        let weight = node.weight;
        let chain = self.chain_from(parent_idx);

        self.node_mut(parent_idx)?.children.retain(|&c| c != idx);
        for ancestor_idx in chain {
            let ancestor = self.node_mut(ancestor_idx)?;
            ancestor.weight = ancestor.weight.saturating_sub(weight);
        }
        self.node_mut(idx)?.parent = None;

        debug!(?idx, ?parent_idx, weight, "node removed");
        Ok(())
    }

    /// Adds `amount` to `idx` and to every strict ancestor.
    #[instrument(level = "debug", skip(self))]
    pub fn increase_weight(&mut self, idx: Index, amount: u64) -> DomainResult<()> {
        let node = self.node(idx)?;
        if node.is_empty() && amount > 0 {
            return Err(DomainError::MissingLabel);
        }
        let chain = self.chain_from(idx);
        self.ensure_room(&chain, amount)?;
        for target in chain {
            let n = self.node_mut(target)?;
            n.weight += amount;
        }
        debug!(?idx, amount, "weight increased");
        Ok(())
    }

    /// Subtracts `amount` from `idx` and every strict ancestor, but only if
    /// the node keeps a weight of at least 1.
    ///
    /// Returns `false` (and changes nothing) when the floor would be crossed.
    /// Meant for leaves: on an internal node it desynchronizes the node from
    /// its children's sum.
    #[instrument(level = "debug", skip(self))]
    pub fn decrease_weight(&mut self, idx: Index, amount: u64) -> DomainResult<bool> {
        let node = self.node(idx)?;
        match node.weight.checked_sub(amount) {
            Some(remaining) if remaining >= 1 => {}
            _ => {
                warn!(?idx, weight = node.weight, amount, "decrease refused: weight would drop below 1");
                return Ok(false);
            }
        }
        for target in self.chain_from(idx) {
            let n = self.node_mut(target)?;
            n.weight = n.weight.saturating_sub(amount);
        }
        debug!(?idx, amount, "weight decreased");
        Ok(true)
    }

    /// Appends the parentless subtree `child` as the last child of `parent`.
    ///
    /// A leaf parent turns into an internal node, so its own weight is replaced
    /// by the child's weight along the whole chain.
    #[instrument(level = "debug", skip(self))]
    pub fn attach(&mut self, parent: Index, child: Index) -> DomainResult<()> {
        let child_node = self.node(child)?;
        let parent_node = self.node(parent)?;
        if child_node.parent.is_some() {
            return Err(DomainError::AlreadyAttached(child));
        }
        if parent_node.is_empty() {
            return Err(DomainError::EmptyParent(parent));
        }
        let chain = self.chain_from(parent);
        if chain.contains(&child) {
            return Err(DomainError::CycleDetected { parent, child });
        }

        let added = child_node.weight;
        let replaced = if parent_node.children.is_empty() {
            parent_node.weight
        } else {
            0
        };
        let top = chain.last().copied();
        if replaced < added {
            self.ensure_room(&chain, added - replaced)?;
        }

        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        for target in chain {
            let n = self.node_mut(target)?;
            n.weight = n.weight.saturating_sub(replaced) + added;
        }
        if self.root() == Some(child) {
            self.replace_root(top);
        }

        debug!(?parent, ?child, added, "node attached");
        Ok(())
    }

    /// Frees a detached subtree from the arena; returns the number of nodes freed.
    #[instrument(level = "debug", skip(self))]
    pub fn discard(&mut self, idx: Index) -> DomainResult<usize> {
        if self.node(idx)?.parent.is_some() {
            return Err(DomainError::StillAttached(idx));
        }
        let doomed: Vec<Index> = self.descendants(idx).map(|(i, _)| i).collect();
        for &node_idx in &doomed {
            self.free(node_idx);
        }
        if self.root() == Some(idx) {
            self.replace_root(None);
        }
        debug!(?idx, freed = doomed.len(), "subtree discarded");
        Ok(doomed.len())
    }

    /// Fails if adding `amount` would overflow any node in `chain`.
    fn ensure_room(&self, chain: &[Index], amount: u64) -> DomainResult<()> {
        for &target in chain {
            if self.node(target)?.weight.checked_add(amount).is_none() {
                return Err(DomainError::WeightOverflow(target));
            }
        }
        Ok(())
    }

    /// `idx` followed by its strict ancestors, nearest first.
    fn chain_from(&self, idx: Index) -> Vec<Index> {
        std::iter::once(idx)
            .chain(self.ancestors(idx).map(|(i, _)| i))
            .collect()
    }
}
