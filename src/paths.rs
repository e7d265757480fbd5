use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::{KconfError, KconfResult};
use crate::fs_utils::{LIBRARY_DIR_MODE, ensure_dir};

/// Environment variable overriding the library directory
pub const LIBRARY_PATH_VAR: &str = "KCONF_LIBRARY_PATH";

/// Environment variable kubectl reads; holds the active selection
pub const KUBECONFIG_VAR: &str = "KUBECONFIG";

/// Library directory name under the home directory
pub const DEFAULT_LIBRARY_DIR: &str = ".kconf";

/// All computed paths used by kconf
#[derive(Debug, Clone)]
pub struct Paths {
    /// ~/.kconf, or the override
    pub library_dir: PathBuf,
}

impl Paths {
    /// Compute the library location.
    ///
    /// A non-blank `override_dir` wins; otherwise the library lives in
    /// `~/.kconf`. Nothing is created here.
    pub fn resolve(override_dir: Option<&str>) -> KconfResult<Self> {
        let library_dir = match override_dir.map(str::trim).filter(|s| !s.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => {
                let base_dirs = BaseDirs::new().ok_or(KconfError::NoHome)?;
                base_dirs.home_dir().join(DEFAULT_LIBRARY_DIR)
            }
        };

        Ok(Self { library_dir })
    }

    /// Path of the symlink backing `alias`
    pub fn entry_path(&self, alias: &str) -> PathBuf {
        self.library_dir.join(alias)
    }

    /// Create the library directory if it is missing (single level only)
    pub fn ensure_library_dir(&self) -> KconfResult<()> {
        let created = ensure_dir(&self.library_dir, LIBRARY_DIR_MODE).map_err(|e| {
            KconfError::io("Failed to create library directory", &self.library_dir, e)
        })?;
        if created {
            tracing::debug!(dir = %self.library_dir.display(), "created library directory");
        }
        Ok(())
    }
}
