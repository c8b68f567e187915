//! Cache Keys
//!
//! Keys are always held in their string form so that numeric and string
//! identifiers for the same film or user land on the same entry.

use std::fmt;

// == Cache Key ==
/// String-coerced identifier used by the films and ratings namespaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CacheKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CacheKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&String> for CacheKey {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CacheKey {
                fn from(value: $t) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64, usize);

// == Watchlist Key ==
/// Composite key for the watchlists namespace, tagged by its owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WatchlistKey {
    pub owner: CacheKey,
}

impl WatchlistKey {
    pub fn new(owner: impl Into<CacheKey>) -> Self {
        Self {
            owner: owner.into(),
        }
    }
}

impl fmt::Display for WatchlistKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "watchlist-{}", self.owner)
    }
}
