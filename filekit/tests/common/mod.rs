//! Common test utilities for integration tests.
//!
//! Provides a scratch directory wrapper that speaks the string paths the
//! library takes, and a builder for small directory trees.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory, removed when dropped.
pub struct Sandbox {
    dir: TempDir,
}

#[allow(dead_code)]
impl Sandbox {
    /// Creates an empty sandbox.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// The sandbox root on disk.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `relative` inside the sandbox, as a string.
    pub fn path(&self, relative: &str) -> String {
        self.path_buf(relative).to_str().unwrap().to_string()
    }

    /// Absolute path of `relative` inside the sandbox.
    pub fn path_buf(&self, relative: &str) -> PathBuf {
        if relative.is_empty() {
            self.dir.path().to_path_buf()
        } else {
            self.dir.path().join(relative)
        }
    }

    /// Writes a file, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path_buf(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Creates a directory and its parents.
    pub fn mkdir(&self, relative: &str) {
        fs::create_dir_all(self.path_buf(relative)).unwrap();
    }

    /// Reads a file as UTF-8.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path_buf(relative)).unwrap()
    }

    /// Whether anything exists at `relative`, not following symlinks.
    pub fn exists(&self, relative: &str) -> bool {
        fs::symlink_metadata(self.path_buf(relative)).is_ok()
    }
}

/// Builder for directory trees inside a fresh [`Sandbox`].
///
/// # Examples
///
/// ```no_run
/// # use common::TreeFixture;
/// let sandbox = TreeFixture::new()
///     .with_file("src/a.txt", "a")
///     .with_dir("src/empty")
///     .build();
/// ```
#[allow(dead_code)]
#[derive(Default)]
pub struct TreeFixture {
    files: Vec<(String, String)>,
    dirs: Vec<String>,
}

#[allow(dead_code)]
impl TreeFixture {
    /// Creates a builder for an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given content.
    pub fn with_file(mut self, relative: &str, content: &str) -> Self {
        self.files.push((relative.to_string(), content.to_string()));
        self
    }

    /// Adds an (initially empty) directory.
    pub fn with_dir(mut self, relative: &str) -> Self {
        self.dirs.push(relative.to_string());
        self
    }

    /// Materializes the tree.
    pub fn build(self) -> Sandbox {
        let sandbox = Sandbox::new();
        for dir in &self.dirs {
            sandbox.mkdir(dir);
        }
        for (file, content) in &self.files {
            sandbox.write(file, content);
        }
        sandbox
    }
}
