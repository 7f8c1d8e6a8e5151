//! Tests for the filesystem data source

use std::fs;
use std::path::Path;

use rstest::rstest;
use tempfile::TempDir;

use rstreemap::application::build_filesystem_tree;
use rstreemap::util::testing::init_test_setup;
use rstreemap::{ApplicationError, Flavor, Rect, Settings, TreeArena};

fn create_file(dir: &TempDir, name: &str, size: usize) {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(&path, vec![b'x'; size]).expect("write file");
}

fn seeded() -> Settings {
    Settings {
        color_seed: Some(1),
        ..Settings::default()
    }
}

fn labels(tree: &TreeArena, nodes: &[rstreemap::Index]) -> Vec<String> {
    nodes
        .iter()
        .map(|&i| tree.node(i).unwrap().label().unwrap().to_string())
        .collect()
}

#[rstest]
fn given_directory_when_building_then_folders_sum_file_sizes() {
    // Arrange
    init_test_setup();
    let temp = TempDir::new().unwrap();
    create_file(&temp, "b.txt", 30);
    create_file(&temp, "a.txt", 10);
    create_file(&temp, "sub/c.bin", 60);
    fs::create_dir_all(temp.path().join("void")).unwrap();

    // Act
    let tree = build_filesystem_tree(temp.path(), &seeded()).unwrap();

    // Assert
    let root = tree.root().unwrap();
    assert_eq!(tree.flavor(), &Flavor::FileSystem);
    assert_eq!(tree.node(root).unwrap().weight(), 100);
    assert!(tree.weight_mismatches(root).is_empty());

    let children = tree.node(root).unwrap().children().to_vec();
    assert_eq!(labels(&tree, &children), vec!["a.txt", "b.txt", "sub", "void"]);

    let void = children[3];
    assert_eq!(tree.node(void).unwrap().weight(), 0);
    assert!(tree.node(void).unwrap().is_leaf());
}

#[cfg(unix)]
#[rstest]
fn given_symlinked_directory_when_building_then_link_is_leaf_and_not_followed() {
    init_test_setup();
    let temp = TempDir::new().unwrap();
    create_file(&temp, "sub/c.bin", 60);
    let link = temp.path().join("link");
    std::os::unix::fs::symlink(temp.path().join("sub"), &link).unwrap();
    let link_size = fs::symlink_metadata(&link).unwrap().len();

    let tree = build_filesystem_tree(temp.path(), &seeded()).unwrap();

    let root = tree.root().unwrap();
    let children = tree.node(root).unwrap().children().to_vec();
    assert_eq!(labels(&tree, &children), vec!["link", "sub"]);

    let link_node = tree.node(children[0]).unwrap();
    assert!(link_node.is_leaf());
    assert_eq!(link_node.weight(), link_size);
    assert_eq!(tree.node(root).unwrap().weight(), 60 + link_size);
    assert_eq!(tree.leaves(root).unwrap().len(), 2);
}

#[rstest]
fn given_nested_file_when_building_path_then_uses_slash() {
    init_test_setup();
    let temp = TempDir::new().unwrap();
    create_file(&temp, "sub/deeper/c.bin", 5);

    let tree = build_filesystem_tree(temp.path(), &seeded()).unwrap();
    let root = tree.root().unwrap();
    let leaves = tree.leaves(root).unwrap();

    let root_name = temp.path().file_name().unwrap().to_string_lossy().to_string();
    assert_eq!(leaves.len(), 1);
    assert_eq!(
        tree.path(leaves[0]).unwrap(),
        format!("{root_name}/sub/deeper/c.bin")
    );
}

#[rstest]
fn given_directory_when_laid_out_then_one_tile_per_nonempty_file() {
    init_test_setup();
    let temp = TempDir::new().unwrap();
    create_file(&temp, "a", 1);
    create_file(&temp, "b", 2);
    create_file(&temp, "empty", 0);
    create_file(&temp, "x/y", 3);

    let tree = build_filesystem_tree(temp.path(), &seeded()).unwrap();
    let root = tree.root().unwrap();
    let tiles = tree.layout(root, Rect::new(0, 0, 60, 20)).unwrap();

    assert_eq!(tiles.len(), 3);
    assert_eq!(tiles.len(), tree.leaves(root).unwrap().len());
}

#[rstest]
fn given_plain_file_when_building_then_single_leaf_tree() {
    let temp = TempDir::new().unwrap();
    create_file(&temp, "solo.dat", 42);

    let tree = build_filesystem_tree(&temp.path().join("solo.dat"), &seeded()).unwrap();

    let root = tree.root().unwrap();
    assert_eq!(tree.node(root).unwrap().label(), Some("solo.dat"));
    assert_eq!(tree.node(root).unwrap().weight(), 42);
    assert_eq!(tree.len(), 1);
}

#[rstest]
fn given_nonexistent_path_when_building_then_not_found() {
    let result = build_filesystem_tree(Path::new("/definitely/not/here"), &seeded());
    assert!(matches!(result, Err(ApplicationError::NotFound(_))));
}

#[rstest]
fn given_configured_separator_when_building_then_path_uses_it() {
    let temp = TempDir::new().unwrap();
    create_file(&temp, "d/f", 1);
    let mut settings = seeded();
    settings.separators.filesystem = "\\".into();

    let tree = build_filesystem_tree(temp.path(), &settings).unwrap();
    let leaf = tree.leaves(tree.root().unwrap()).unwrap()[0];

    assert!(tree.path(leaf).unwrap().ends_with("\\d\\f"));
}
