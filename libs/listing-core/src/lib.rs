//! Generic list-view primitives shared by table-like views:
//! sort selection with header-click semantics and page windows.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod page;
pub use page::{clamp_page_index, page_count, paginate, Page, PageInfo};

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("page size must be positive")]
    InvalidPageSize,
    #[error("invalid sort direction: {0}")]
    InvalidSortDirection(String),
    #[error("invalid sort token: {0}")]
    InvalidSortToken(String),
    #[error("unknown sort field: {0}")]
    UnknownSortField(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn reverse(self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }

    /// Orient an ascending comparison result for this direction.
    #[inline]
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDir {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDir::Asc),
            "desc" => Ok(SortDir::Desc),
            other => Err(Error::InvalidSortDirection(other.to_string())),
        }
    }
}

/// A key that knows how to compare two records of type `T` in ascending order.
pub trait SortKey<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Active sort selection of a table view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec<K> {
    pub key: K,
    pub dir: SortDir,
}

impl<K: Copy + PartialEq> SortSpec<K> {
    pub fn asc(key: K) -> Self {
        Self {
            key,
            dir: SortDir::Asc,
        }
    }

    pub fn desc(key: K) -> Self {
        Self {
            key,
            dir: SortDir::Desc,
        }
    }

    /// Header-click transition: the same key flips the direction,
    /// a different key starts ascending.
    #[must_use]
    pub fn toggled(self, key: K) -> Self {
        if self.key == key {
            Self {
                key,
                dir: self.dir.reverse(),
            }
        } else {
            Self::asc(key)
        }
    }
}

impl<K: fmt::Display> SortSpec<K> {
    /// Signed token form: `+name` / `-name`.
    pub fn to_signed_token(&self) -> String {
        let sign = match self.dir {
            SortDir::Asc => '+',
            SortDir::Desc => '-',
        };
        format!("{}{}", sign, self.key)
    }
}

impl<K> SortSpec<K>
where
    K: FromStr,
{
    /// Parse `name`, `+name` or `-name`. A bare field sorts ascending.
    pub fn from_signed_token(token: &str) -> Result<Self, Error> {
        let token = token.trim();
        let (dir, field) = match token.as_bytes().first() {
            Some(b'+') => (SortDir::Asc, &token[1..]),
            Some(b'-') => (SortDir::Desc, &token[1..]),
            Some(_) => (SortDir::Asc, token),
            None => return Err(Error::InvalidSortToken(token.to_string())),
        };
        if field.is_empty() {
            return Err(Error::InvalidSortToken(token.to_string()));
        }
        let key = field
            .parse::<K>()
            .map_err(|_| Error::UnknownSortField(field.to_string()))?;
        Ok(Self { key, dir })
    }
}

/// Stable in-place sort. Equal keys keep their relative order in both directions.
pub fn sort_stable<T, K: SortKey<T>>(items: &mut [T], spec: &SortSpec<K>) {
    items.sort_by(|a, b| spec.dir.apply(spec.key.compare(a, b)));
}
