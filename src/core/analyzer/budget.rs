//! Result ceiling and the running counter spent against it

use crate::utils::error::{MapperError, Result};
use std::fmt;

/// Ceiling applied when the configured limit is `0`
pub const DEFAULT_RESULT_LIMIT: usize = 1000;

/// Configured limit value that disables truncation
pub const UNLIMITED_RESULTS: i64 = -1;

/// Resolved result ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultLimit {
    Limited(usize),
    Unlimited,
}

impl Default for ResultLimit {
    fn default() -> Self {
        Self::Limited(DEFAULT_RESULT_LIMIT)
    }
}

impl ResultLimit {
    /// Resolve a configured limit: `0` means the default ceiling, `-1` means
    /// unlimited, positive values are taken as-is.
    pub fn from_setting(value: i64) -> Result<Self> {
        match value {
            0 => Ok(Self::default()),
            UNLIMITED_RESULTS => Ok(Self::Unlimited),
            n if n > 0 => usize::try_from(n)
                .map(Self::Limited)
                .map_err(|_| MapperError::config(format!("result limit {} is too large", n))),
            n => Err(MapperError::config(format!(
                "result limit must be {} (unlimited), 0 (default) or positive, got {}",
                UNLIMITED_RESULTS, n
            ))),
        }
    }

    /// Maximum number of retained records, `None` when unlimited
    pub fn ceiling(&self) -> Option<usize> {
        match self {
            Self::Limited(max) => Some(*max),
            Self::Unlimited => None,
        }
    }
}

impl fmt::Display for ResultLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited(max) => write!(f, "{}", max),
            Self::Unlimited => write!(f, "unlimited"),
        }
    }
}

/// Running count of retained records for one category
///
/// A single budget is threaded through every scope of a collection pass so
/// the ceiling is global, not per namespace.
#[derive(Debug, Clone)]
pub struct Budget {
    limit: ResultLimit,
    retained: usize,
    exhausted: bool,
}

impl Budget {
    pub fn new(limit: ResultLimit) -> Self {
        Self {
            limit,
            retained: 0,
            exhausted: false,
        }
    }

    /// Claim room for one record. Returns `false`, and marks the budget
    /// exhausted, once the ceiling has been reached.
    pub fn try_take(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        match self.limit.ceiling() {
            Some(max) if self.retained >= max => {
                self.exhausted = true;
                false
            }
            _ => {
                self.retained += 1;
                true
            }
        }
    }

    /// Keep the items accepted by `keep`, in order, until the budget refuses
    /// one; everything after that point is abandoned.
    pub fn retain<T, F>(&mut self, items: impl IntoIterator<Item = T>, mut keep: F) -> Vec<T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut kept = Vec::new();
        for item in items {
            if !keep(&item) {
                continue;
            }
            if !self.try_take() {
                break;
            }
            kept.push(item);
        }
        kept
    }

    pub fn retained(&self) -> usize {
        self.retained
    }

    /// Whether a record has been refused for lack of room
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn limit(&self) -> ResultLimit {
        self.limit
    }
}
