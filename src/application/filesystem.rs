//! Folders-and-files data source.
//!
//! Directories become internal nodes labelled with their name, regular files
//! become leaves weighted by their size in bytes.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use generational_arena::Index;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::application::builder::TreeBuilder;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{Flavor, TreeArena};

/// Walks `path` and builds its tree with the filesystem flavor.
pub fn build_filesystem_tree(path: &Path, settings: &Settings) -> ApplicationResult<TreeArena> {
    let tree = TreeBuilder::from_settings(Flavor::FileSystem, settings).arena();
    load_filesystem_tree(path, tree)
}

/// Walks `path` into `tree` and sets the top entry as root.
///
/// Entries are visited contents-first and sorted by file name, so every
/// directory sees all of its children before it is built and sibling order is
/// deterministic.
///
/// Symbolic links below `path` are not followed: each one becomes a leaf
/// weighted by the link's own size, so a linked directory is neither descended
/// into nor counted twice. A symlinked `path` itself is resolved.
#[instrument(level = "debug", skip(tree))]
pub fn load_filesystem_tree(path: &Path, mut tree: TreeArena) -> ApplicationResult<TreeArena> {
    if !path.exists() {
        return Err(ApplicationError::NotFound(path.to_path_buf()));
    }

    let mut pending: HashMap<PathBuf, Vec<Index>> = HashMap::new();
    let mut root = None;

    for entry in WalkDir::new(path)
        .follow_links(false)
        .sort_by_file_name()
        .contents_first(true) {
        let entry = entry.map_err(|e| ApplicationError::Walk {
            path: path.to_path_buf(),
            source: e,
        })?;
        let label = entry_label(entry.path());

        let idx = if entry.file_type().is_dir() {
            let children = pending.remove(entry.path()).unwrap_or_default();
            tree.make_node(Some(label), children, 0)?
        } else {
            let metadata = entry.metadata().map_err(|e| ApplicationError::Walk {
                path: entry.path().to_path_buf(),
                source: e,
            })?;
            tree.insert_leaf(label, metadata.len())
        };

        if entry.depth() == 0 {
            root = Some(idx);
        } else if let Some(parent) = entry.path().parent() {
            pending.entry(parent.to_path_buf()).or_default().push(idx);
        }
    }

    if let Some(root) = root {
        tree.set_root(root)?;
        debug!(nodes = tree.len(), weight = tree.node(root)?.weight(), "filesystem tree built");
    }
    Ok(tree)
}

/// Last path component, or the whole path for roots like `/`.
fn entry_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
