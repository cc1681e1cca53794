//! Conformance statuses and the ranking every merge and diff decision is
//! defined in terms of.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::TypeError;

/// Outcome recorded for one checklist item.
///
/// Ordered by degree of conformance achieved:
/// `NotTested`/`NotApplicable` (rank 0) < `DoesNotSupport` (1) <
/// `PartiallySupports` (2) < `Supports` (3). The two rank-0 statuses carry no
/// conformance signal and never conflict with anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ConformanceStatus {
    /// No evaluation recorded yet.
    #[default]
    NotTested,
    /// The item does not apply to the product under test.
    NotApplicable,
    DoesNotSupport,
    PartiallySupports,
    Supports,
}

impl ConformanceStatus {
    /// All statuses, lowest rank first.
    pub const ALL: [ConformanceStatus; 5] = [
        ConformanceStatus::NotTested,
        ConformanceStatus::NotApplicable,
        ConformanceStatus::DoesNotSupport,
        ConformanceStatus::PartiallySupports,
        ConformanceStatus::Supports,
    ];

    /// Degree of conformance achieved.
    pub const fn rank(self) -> u8 {
        match self {
            Self::NotTested | Self::NotApplicable => 0,
            Self::DoesNotSupport => 1,
            Self::PartiallySupports => 2,
            Self::Supports => 3,
        }
    }

    /// Returns `true` for statuses that carry no conformance signal.
    pub const fn is_neutral(self) -> bool {
        self.rank() == 0
    }

    /// Human-readable label used in reports.
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotTested => "Not Tested",
            Self::NotApplicable => "Not Applicable",
            Self::DoesNotSupport => "Does Not Support",
            Self::PartiallySupports => "Partially Supports",
            Self::Supports => "Supports",
        }
    }
}

impl fmt::Display for ConformanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ConformanceStatus {
    type Err = TypeError;

    /// Parses variant names, report labels, and common export synonyms.
    /// Case, whitespace, `_` and `-` are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "" | "nottested" | "notevaluated" | "untested" => Ok(Self::NotTested),
            "notapplicable" | "n/a" | "na" => Ok(Self::NotApplicable),
            "doesnotsupport" => Ok(Self::DoesNotSupport),
            "partiallysupports" | "partial" => Ok(Self::PartiallySupports),
            "supports" => Ok(Self::Supports),
            _ => Err(TypeError::UnknownStatus(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for ConformanceStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Direction of a status change between two records of the same item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    Improved,
    Regressed,
    Unchanged,
}

/// Classify the move from `old` to `new` by the sign of the rank delta.
///
/// Presence and absence are not statuses: callers comparing snapshots must
/// handle items that exist on only one side before calling this.
pub fn compare_status(old: ConformanceStatus, new: ConformanceStatus) -> Transition {
    match new.rank().cmp(&old.rank()) {
        std::cmp::Ordering::Greater => Transition::Improved,
        std::cmp::Ordering::Less => Transition::Regressed,
        std::cmp::Ordering::Equal => Transition::Unchanged,
    }
}
