//! Operation selection.
//!
//! `kconf` has no subcommands. The operation comes from at most one switch
//! (`-a`, `-s`, `-l`, `-r`), and without a switch it is inferred from how many
//! positional arguments were given:
//!
//! | positional args | operation |
//! |-----------------|-----------|
//! | 0               | list      |
//! | 1               | set       |
//! | 2               | add       |
//! | 3+              | nothing   |

use std::fmt;

use crate::error::{KconfError, KconfResult};

/// Message printed when more than one operation switch is given
pub const INVALID_FLAGS: &str = "error validating flags";

/// Operation switches as given on the command line
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OperationFlags {
    pub add: bool,
    pub set: bool,
    pub list: bool,
    pub remove: bool,
}

impl OperationFlags {
    fn count(&self) -> usize {
        [self.add, self.set, self.list, self.remove]
            .into_iter()
            .filter(|f| *f)
            .count()
    }

    /// No switch or exactly one switch
    pub fn is_valid(&self) -> bool {
        self.count() <= 1
    }
}

/// The operation a single invocation performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Set,
    List,
    Remove,
    /// Unclassified invocation; dispatching it succeeds without doing anything
    None,
}

impl Operation {
    /// Pick the operation from validated flags, falling back to `argc`
    pub fn classify(flags: OperationFlags, argc: usize) -> Self {
        if flags.add {
            Self::Add
        } else if flags.set {
            Self::Set
        } else if flags.list {
            Self::List
        } else if flags.remove {
            Self::Remove
        } else {
            match argc {
                0 => Self::List,
                1 => Self::Set,
                2 => Self::Add,
                _ => Self::None,
            }
        }
    }

    /// Validate `flags`, then classify
    ///
    /// Two or more switches is a usage error; nothing may be dispatched in
    /// that case.
    pub fn select(flags: OperationFlags, argc: usize) -> KconfResult<Self> {
        if !flags.is_valid() {
            return Err(KconfError::usage(INVALID_FLAGS));
        }

        let op = Self::classify(flags, argc);
        tracing::debug!(?flags, argc, operation = %op, "selected operation");
        Ok(op)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Add => "add",
            Self::Set => "set",
            Self::List => "list",
            Self::Remove => "remove",
            Self::None => "none",
        };
        f.write_str(name)
    }
}
