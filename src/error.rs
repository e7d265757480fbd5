//! Error taxonomy for library operations.
//!
//! The command layer works in `anyhow`; everything below it reports one of
//! these kinds so callers (and tests) can tell a conflict from a missing file
//! without matching on message text.

use std::io;
use std::path::PathBuf;

pub type KconfResult<T> = Result<T, KconfError>;

#[derive(Debug, thiserror::Error)]
pub enum KconfError {
    /// Wrong argument count or an invalid flag combination
    #[error("{0}")]
    Usage(String),

    /// Referenced file or entry is missing
    #[error("{0}")]
    NotFound(String),

    /// An entry with this alias already exists
    #[error("kubeconfig already exists: {alias:?}")]
    Conflict { alias: String },

    /// Selector index outside `1..=len`
    #[error("index out of range: {index} (library has {len} entries)")]
    Range { index: i64, len: usize },

    #[error("Failed to determine home directory")]
    NoHome,

    #[error("{context}: {}", path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl KconfError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn io(context: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            context,
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message_quotes_alias() {
        let err = KconfError::Conflict {
            alias: "prod".to_string(),
        };
        assert_eq!(err.to_string(), "kubeconfig already exists: \"prod\"");
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = KconfError::io(
            "Failed to read library directory",
            "/nope",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert_eq!(err.to_string(), "Failed to read library directory: /nope");
        assert!(std::error::Error::source(&err).is_some());
    }
}
