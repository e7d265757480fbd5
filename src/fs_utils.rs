//! Filesystem utility functions
//!
//! Small wrappers around `std::fs` used by the library store. None of them
//! follow the final symlink unless stated otherwise.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Permissions for a freshly created library directory
pub const LIBRARY_DIR_MODE: u32 = 0o755;

/// Create a single directory level, tolerating one that already exists
///
/// Parents are not created. Returns `true` when the directory was created by
/// this call and `false` when it was already there.
pub fn ensure_dir(path: &Path, mode: u32) -> io::Result<bool> {
    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    match builder.create(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(false),
        Err(e) => Err(e),
    }
}

/// Check whether anything (including a dangling symlink) occupies `path`
pub fn occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Make `path` absolute against the current directory without touching symlinks
pub fn absolute(path: &Path) -> io::Result<PathBuf> {
    std::path::absolute(path)
}

/// Create a symlink at `link` pointing to `target`
///
/// Fails with `AlreadyExists` instead of replacing an existing name.
pub fn make_symlink(target: &Path, link: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
    }

    #[cfg(windows)]
    {
        std::os::windows::fs::symlink_file(target, link)
    }

    #[cfg(not(any(unix, windows)))]
    {
        let _ = (target, link);
        Err(io::Error::from(io::ErrorKind::Unsupported))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_creates_once() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("lib");

        assert!(ensure_dir(&dir, LIBRARY_DIR_MODE).unwrap());
        assert!(dir.is_dir());
        assert!(!ensure_dir(&dir, LIBRARY_DIR_MODE).unwrap());
    }

    #[test]
    fn test_ensure_dir_is_not_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("missing").join("lib");

        assert!(ensure_dir(&dir, LIBRARY_DIR_MODE).is_err());
    }

    #[test]
    fn test_ensure_dir_rejects_regular_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("lib");
        fs::write(&file, "").unwrap();

        assert!(ensure_dir(&file, LIBRARY_DIR_MODE).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_dir_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("lib");
        ensure_dir(&dir, LIBRARY_DIR_MODE).unwrap();

        let mode = fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
        // umask may only strip bits
        assert_eq!(mode & !LIBRARY_DIR_MODE, 0);
    }

    #[test]
    fn test_occupied_sees_dangling_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let link = temp_dir.path().join("dangling");
        make_symlink(&temp_dir.path().join("gone"), &link).unwrap();

        assert!(!link.exists());
        assert!(occupied(&link));
    }

    #[test]
    fn test_make_symlink_does_not_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("cfg");
        fs::write(&target, "a").unwrap();
        let link = temp_dir.path().join("link");

        make_symlink(&target, &link).unwrap();
        let err = make_symlink(&target, &link).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }

    #[test]
    fn test_absolute_keeps_absolute_paths() {
        let path = Path::new("/tmp/cfg.yml");
        assert_eq!(absolute(path).unwrap(), PathBuf::from("/tmp/cfg.yml"));
        assert!(absolute(Path::new("cfg.yml")).unwrap().is_absolute());
    }
}
