//! Integration tests for recursive tree operations.
//!
//! These tests build small trees on disk and check end-to-end workflows:
//! mirroring one tree into another, pruning, permission propagation and
//! removal of empty directory chains.

mod common;

use common::TreeFixture;
use filekit::config::FsConfig;
use filekit::{CompareOptions, Error, Filesystem, RemoveEmptyDirOptions};

fn strict() -> CompareOptions {
    CompareOptions::default()
        .with_filecontent(true)
        .with_emptydir(true)
}

// =============================================================================
// sync_dir / compare_dir
// =============================================================================

#[test]
fn test_sync_dir_mirrors_source() {
    let sandbox = TreeFixture::new()
        .with_file("src/a.txt", "new a")
        .with_file("src/sub/b.txt", "b")
        .with_file("src/sub/deep/c.txt", "c")
        .with_dir("src/empty")
        .with_file("dest/a.txt", "old a")
        .with_file("dest/stale.txt", "stale")
        .with_file("dest/sub/old/x.txt", "x")
        .build();
    let fs = Filesystem::new();
    let (src, dest) = (sandbox.path("src"), sandbox.path("dest"));

    assert!(!fs.compare_dir(&src, &dest, &strict()));
    fs.sync_dir(&src, &dest).unwrap();

    assert!(fs.compare_dir(&src, &dest, &strict()));
    assert_eq!(sandbox.read("dest/a.txt"), "new a");
    assert!(!sandbox.exists("dest/stale.txt"));
    assert!(!sandbox.exists("dest/sub/old"));
    assert!(sandbox.exists("dest/empty"));
}

#[test]
fn test_sync_dir_is_idempotent() {
    let sandbox = TreeFixture::new()
        .with_file("src/one.txt", "1")
        .with_file("src/two/three.txt", "3")
        .build();
    let fs = Filesystem::new();
    let (src, dest) = (sandbox.path("src"), sandbox.path("dest"));

    fs.sync_dir(&src, &dest).unwrap();
    fs.sync_dir(&src, &dest).unwrap();

    assert!(fs.compare_dir(&src, &dest, &strict()));
    assert_eq!(fs.ls(&dest).unwrap(), vec!["one.txt", "two"]);
}

#[test]
fn test_sync_dir_missing_source_still_prunes() {
    let sandbox = TreeFixture::new().with_file("dest/left.txt", "x").build();
    let fs = Filesystem::new();

    let result = fs.sync_dir(&sandbox.path("missing"), &sandbox.path("dest"));

    assert!(matches!(result, Err(Error::PathNotFound { .. })));
    assert!(!sandbox.exists("dest"));
}

#[test]
fn test_compare_dir_content_sensitivity() {
    let sandbox = TreeFixture::new()
        .with_file("a/f.txt", "same size 1")
        .with_file("b/f.txt", "same size 2")
        .build();
    let fs = Filesystem::new();
    let (a, b) = (sandbox.path("a"), sandbox.path("b"));

    assert!(fs.compare_dir(&a, &b, &CompareOptions::default()));
    assert!(!fs.compare_dir(&a, &b, &strict()));
}

#[test]
fn test_compare_and_cleanup_only_touches_target() {
    let sandbox = TreeFixture::new()
        .with_file("keep/a.txt", "a")
        .with_file("prune/a.txt", "a")
        .with_file("prune/extra/b.txt", "b")
        .build();
    let fs = Filesystem::new();

    fs.compare_and_cleanup(&sandbox.path("prune"), &sandbox.path("keep"))
        .unwrap();

    assert!(sandbox.exists("prune/a.txt"));
    assert!(!sandbox.exists("prune/extra"));
    assert!(sandbox.exists("keep/a.txt"));
}

#[test]
#[cfg(unix)]
fn test_compare_and_cleanup_keeps_link_targets() {
    let sandbox = TreeFixture::new()
        .with_file("outside/precious.txt", "p")
        .with_dir("reference")
        .with_dir("target")
        .build();
    std::os::unix::fs::symlink(sandbox.path_buf("outside"), sandbox.path_buf("target/link"))
        .unwrap();
    let fs = Filesystem::new();

    fs.compare_and_cleanup(&sandbox.path("target"), &sandbox.path("reference"))
        .unwrap();

    assert!(!sandbox.exists("target/link"));
    assert_eq!(sandbox.read("outside/precious.txt"), "p");
}

// =============================================================================
// Permissions
// =============================================================================

#[test]
#[cfg(unix)]
fn test_configured_modes_flow_through_copy_r() {
    let sandbox = TreeFixture::new()
        .with_file("src/a.txt", "a")
        .with_file("src/nested/b.txt", "b")
        .build();
    let config = FsConfig {
        file_default_permission: Some("640".to_string()),
        dir_default_permission: Some("0750".to_string()),
        ..Default::default()
    };
    let fs = Filesystem::with_config(&config).unwrap();

    fs.copy_r(&sandbox.path("src"), &sandbox.path("dest"), None)
        .unwrap();

    assert_eq!(fs.get_permission(&sandbox.path("dest/a.txt")).unwrap(), "640");
    assert_eq!(fs.get_permission(&sandbox.path("dest/nested/b.txt")).unwrap(), "640");
    assert_eq!(fs.get_permission(&sandbox.path("dest/nested")).unwrap(), "750");
}

#[test]
#[cfg(unix)]
fn test_chmod_r_separate_modes() {
    let sandbox = TreeFixture::new()
        .with_file("tree/a.txt", "a")
        .with_file("tree/sub/b.txt", "b")
        .build();
    let fs = Filesystem::new();

    fs.chmod_r(&sandbox.path("tree"), Some(0o600), Some(0o711))
        .unwrap();

    assert_eq!(fs.get_permission(&sandbox.path("tree")).unwrap(), "711");
    assert_eq!(fs.get_permission(&sandbox.path("tree/sub")).unwrap(), "711");
    assert_eq!(fs.get_permission(&sandbox.path("tree/sub/b.txt")).unwrap(), "600");
}

// =============================================================================
// Removal
// =============================================================================

#[test]
fn test_remove_empty_dir_collapses_chains() {
    let sandbox = TreeFixture::new()
        .with_dir("root/chain/of/empty/dirs")
        .with_file("root/kept/file.txt", "x")
        .with_dir("root/kept/empty")
        .build();
    let fs = Filesystem::new();

    fs.remove_empty_dir(&sandbox.path("root"), &RemoveEmptyDirOptions::default())
        .unwrap();

    assert!(!sandbox.exists("root/chain"));
    assert!(!sandbox.exists("root/kept/empty"));
    assert!(sandbox.exists("root/kept/file.txt"));
}

#[test]
fn test_remove_empty_dir_rejects_file() {
    let sandbox = TreeFixture::new().with_file("plain.txt", "x").build();
    let fs = Filesystem::new();

    let err = fs
        .remove_empty_dir(&sandbox.path("plain.txt"), &RemoveEmptyDirOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

#[test]
fn test_rm_then_mkdir_r_round() {
    let sandbox = TreeFixture::new().with_file("work/a/b/c.txt", "c").build();
    let fs = Filesystem::new();
    let work = sandbox.path("work");

    fs.rm(&work).unwrap();
    assert!(!sandbox.exists("work"));
    assert!(fs.rm(&work).unwrap_err().is_not_found());

    fs.mkdir_r(&format!("{work}/a/b"), None).unwrap();
    assert!(fs.is_dir(&format!("{work}/a/b")));
}

#[test]
fn test_rename_force_creates_destination_parent() {
    let sandbox = TreeFixture::new().with_file("in/file.txt", "payload").build();
    let fs = Filesystem::new();

    fs.rename_force(&sandbox.path("in/file.txt"), &sandbox.path("out/deep/file.txt"))
        .unwrap();

    assert_eq!(sandbox.read("out/deep/file.txt"), "payload");
    assert!(!sandbox.exists("in/file.txt"));
}
