//! Selector resolution.
//!
//! A selector is whatever the user typed to pick an entry: either a 1-based
//! position in the current listing or an alias. Positions are only meaningful
//! against the listing they were printed from; adding or removing an entry
//! shifts every index after it.

use crate::error::{KconfError, KconfResult};
use crate::library::Entry;

/// How a selector was interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector<'a> {
    /// 1-based position (unchecked, may be zero or negative)
    Index(i64),
    /// Literal alias, already trimmed
    Alias(&'a str),
}

impl<'a> Selector<'a> {
    /// Anything written as an integer is a position, everything else an alias
    ///
    /// Integers too large for `i64` saturate, so they still end up out of range
    /// instead of being looked up as aliases.
    pub fn parse(raw: &'a str) -> Self {
        if !is_integer(raw) {
            return Self::Alias(raw.trim());
        }

        match raw.parse::<i64>() {
            Ok(index) => Self::Index(index),
            Err(_) if raw.starts_with('-') => Self::Index(i64::MIN),
            Err(_) => Self::Index(i64::MAX),
        }
    }
}

/// Optional sign followed by at least one ASCII digit
fn is_integer(raw: &str) -> bool {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Resolve the first argument in `args` against `entries`
///
/// Fails with a usage error when `args` is empty.
pub fn resolve_args<'e>(args: &[String], entries: &'e [Entry]) -> KconfResult<&'e Entry> {
    let selector = args
        .first()
        .ok_or_else(|| KconfError::usage("not enough arguments"))?;
    if args.len() > 1 {
        tracing::debug!(ignored = ?&args[1..], "ignoring extra arguments");
    }
    resolve(selector, entries)
}

/// Resolve one selector against an alias-sorted listing
pub fn resolve<'e>(raw: &str, entries: &'e [Entry]) -> KconfResult<&'e Entry> {
    match Selector::parse(raw) {
        Selector::Index(index) => {
            tracing::debug!(index, "resolving by position");
            usize::try_from(index)
                .ok()
                .and_then(|i| i.checked_sub(1))
                .and_then(|i| entries.get(i))
                .ok_or(KconfError::Range {
                    index,
                    len: entries.len(),
                })
        }
        Selector::Alias(alias) => {
            tracing::debug!(alias, "resolving by alias");
            entries
                .iter()
                .find(|e| e.alias == alias)
                .ok_or_else(|| KconfError::not_found(format!("no such entry: {alias}")))
        }
    }
}
