//! Domain-level errors (no external dependencies)

use generational_arena::Index;
use thiserror::Error;

/// Domain errors are contract violations of the tree operations.
///
/// Every operation validates before it mutates, so an `Err` always leaves the
/// arena exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("node not found: {0:?}")]
    NodeNotFound(Index),

    #[error("a label is required for a node with children or positive weight")]
    MissingLabel,

    #[error("node already has a parent: {0:?}")]
    AlreadyAttached(Index),

    #[error("node listed more than once as a child: {0:?}")]
    DuplicateChild(Index),

    #[error("cannot remove a root node: {0:?}")]
    RootRemoval(Index),

    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    CycleDetected { parent: Index, child: Index },

    #[error("cannot attach children to an empty node: {0:?}")]
    EmptyParent(Index),

    #[error("node is still attached to a parent: {0:?}")]
    StillAttached(Index),

    #[error("only a parentless node can be the root: {0:?}")]
    NotParentless(Index),

    #[error("weight of {0:?} would exceed u64::MAX")]
    WeightOverflow(Index),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
