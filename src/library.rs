//! The kubeconfig library: a flat directory of symlinks.
//!
//! Each symlink is one entry. Its file name is the alias and its target is the
//! absolute path of a kubeconfig somewhere on disk. There is no other state;
//! everything here is recomputed from the directory on every call.
//!
//! Listings are sorted by alias explicitly. `read_dir` order is filesystem
//! dependent, and selector indices are only reproducible if every listing
//! agrees on one order.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{KconfError, KconfResult};
use crate::fs_utils::{absolute, make_symlink, occupied};
use crate::paths::Paths;

/// One alias/target pair stored as a symlink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Symlink name
    pub alias: String,
    /// Where the symlink points
    pub target: PathBuf,
    /// The symlink itself (library_dir/alias)
    pub path: PathBuf,
}

impl Entry {
    /// Whether the referenced kubeconfig is still there
    pub fn target_exists(&self) -> bool {
        self.path.exists()
    }
}

/// List library entries sorted by alias
///
/// Only symlinks count as entries; directories, regular files and names that
/// are not valid UTF-8 are skipped.
pub fn list_entries(paths: &Paths) -> KconfResult<Vec<Entry>> {
    let dir = &paths.library_dir;
    let read_err = |e: io::Error| KconfError::io("Failed to read library directory", dir, e);

    let mut entries = Vec::new();
    for dir_entry in fs::read_dir(dir).map_err(read_err)? {
        let dir_entry = dir_entry.map_err(read_err)?;
        let file_type = dir_entry.file_type().map_err(read_err)?;
        if !file_type.is_symlink() {
            continue;
        }

        let path = dir_entry.path();
        let Some(alias) = dir_entry.file_name().to_str().map(str::to_string) else {
            tracing::warn!(path = %path.display(), "skipping entry with non UTF-8 name");
            continue;
        };
        let target = fs::read_link(&path)
            .map_err(|e| KconfError::io("Failed to read symlink", &path, e))?;

        entries.push(Entry {
            alias,
            target,
            path,
        });
    }

    entries.sort_by(|a, b| a.alias.cmp(&b.alias));
    Ok(entries)
}

/// Derive an alias from a file path
///
/// Takes the base name up to the first `.`, so `kube_config_cluster.yml`
/// becomes `kube_config_cluster` and `prod.eu.yaml` becomes `prod`.
pub fn derive_alias(file: &str) -> String {
    let base = Path::new(file)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(file);
    base.split('.').next().unwrap_or_default().to_string()
}

/// Validate an alias
///
/// Aliases become file names inside the library, so they may not be empty,
/// `.`/`..`, or contain a path separator.
pub fn validate_alias(alias: &str) -> KconfResult<()> {
    if alias.is_empty() {
        return Err(KconfError::usage("alias cannot be empty"));
    }

    if alias == "." || alias == ".." {
        return Err(KconfError::usage(format!("invalid alias {alias:?}")));
    }

    if alias.contains('/') || alias.contains(std::path::MAIN_SEPARATOR) {
        return Err(KconfError::usage(format!(
            "invalid alias {alias:?}: aliases cannot contain path separators"
        )));
    }

    Ok(())
}

/// Add `file` to the library under `alias`
///
/// A missing or blank alias is derived from the file name.
///
/// Never replaces an existing entry: a taken alias is a conflict, including
/// when another process creates it between the check and the symlink call.
pub fn add_entry(paths: &Paths, file: &str, alias: Option<&str>) -> KconfResult<Entry> {
    let alias = match alias.filter(|a| !a.trim().is_empty()) {
        Some(alias) => alias.to_string(),
        None => derive_alias(file),
    };
    validate_alias(&alias)?;

    let target = absolute(Path::new(file))
        .map_err(|e| KconfError::io("Failed to resolve path", file, e))?;
    if !target.exists() {
        return Err(KconfError::not_found(format!(
            "kubeconfig not found: {}",
            target.display()
        )));
    }

    let path = paths.entry_path(&alias);
    if occupied(&path) {
        return Err(KconfError::Conflict { alias });
    }

    match make_symlink(&target, &path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(KconfError::Conflict { alias });
        }
        Err(e) => return Err(KconfError::io("Failed to create symlink", &path, e)),
    }

    tracing::debug!(alias = %alias, target = %target.display(), "added entry");
    Ok(Entry {
        alias,
        target,
        path,
    })
}

/// Delete the symlink behind `entry`, returning the target it pointed to
///
/// The kubeconfig itself is left alone.
pub fn remove_entry(entry: &Entry) -> KconfResult<PathBuf> {
    let target = fs::read_link(&entry.path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => {
            KconfError::not_found(format!("no such entry: {}", entry.alias))
        }
        _ => KconfError::io("Failed to read symlink", &entry.path, e),
    })?;

    fs::remove_file(&entry.path)
        .map_err(|e| KconfError::io("Failed to remove symlink", &entry.path, e))?;

    tracing::debug!(alias = %entry.alias, "removed entry");
    Ok(target)
}
