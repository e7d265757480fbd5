//! Test utilities shared across test modules

use std::fs;
use std::path::PathBuf;

use crate::paths::Paths;
use tempfile::TempDir;

/// Create a Paths struct pointing at `<temp>/.kconf` (not yet created)
pub fn setup_test_paths(temp_dir: &TempDir) -> Paths {
    Paths {
        library_dir: temp_dir.path().join(".kconf"),
    }
}

/// Like `setup_test_paths`, with the library directory already in place
pub fn setup_library(temp_dir: &TempDir) -> Paths {
    let paths = setup_test_paths(temp_dir);
    paths.ensure_library_dir().unwrap();
    paths
}

/// Write a dummy kubeconfig into `<temp>/configs/<name>` and return its path
pub fn write_kubeconfig(temp_dir: &TempDir, name: &str) -> PathBuf {
    let dir = temp_dir.path().join("configs");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, "apiVersion: v1\nkind: Config\n").unwrap();
    path
}
