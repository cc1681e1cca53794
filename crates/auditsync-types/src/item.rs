use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::TypeError;

/// Stable identifier of a checklist item, e.g. `"1.4.3"`.
///
/// Unique within one audit and used as the join key for merge and diff.
/// Human ordering is by dotted numeric segments, see [`ItemId::cmp_dotted`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create an item id. Surrounding whitespace is trimmed.
    pub fn new(id: impl AsRef<str>) -> Result<Self, TypeError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TypeError::EmptyItemId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the id is empty. Only reachable through
    /// deserialization, which leaves rejection to
    /// [`FindingSet`](crate::FindingSet).
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    /// Numeric value of each dot-separated segment. Segments that are not
    /// plain numbers count as zero.
    pub fn segments(&self) -> impl Iterator<Item = u64> + '_ {
        self.0
            .split('.')
            .map(|seg| seg.trim().parse::<u64>().unwrap_or(0))
    }

    /// Natural checklist ordering: `1.2.1 < 1.10.1 < 2.1.1`.
    ///
    /// Segments compare numerically and a missing segment counts as zero, so
    /// `1.2` and `1.2.0` tie on segments. Ties fall back to the raw string to
    /// keep the order total.
    pub fn cmp_dotted(&self, other: &Self) -> Ordering {
        let mut left = self.segments();
        let mut right = other.segments();
        loop {
            match (left.next(), right.next()) {
                (None, None) => break,
                (l, r) => match l.unwrap_or(0).cmp(&r.unwrap_or(0)) {
                    Ordering::Equal => continue,
                    unequal => return unequal,
                },
            }
        }
        self.0.cmp(&other.0)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self(raw.trim().to_string()))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
