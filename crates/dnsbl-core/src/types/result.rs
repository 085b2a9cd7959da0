use serde::{Deserialize, Serialize};
use std::fmt;

use super::QueryTarget;

/// Result of a single lookup.
///
/// Serializes as a bare boolean when TXT records were not requested and as
/// `{"listed": .., "txt": [..]}` when they were.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LookupResult {
    /// Listed flag only
    Listed(bool),
    /// Listed flag with the TXT records for the same name
    WithTxt {
        /// Whether the A lookup returned any address
        listed: bool,
        /// TXT records, one string per record
        txt: Vec<String>,
    },
}

impl LookupResult {
    /// Whether the address is listed
    #[must_use]
    pub const fn is_listed(&self) -> bool {
        match self {
            Self::Listed(listed) | Self::WithTxt { listed, .. } => *listed,
        }
    }

    /// TXT records, if they were requested
    #[must_use]
    pub fn txt(&self) -> Option<&[String]> {
        match self {
            Self::Listed(_) => None,
            Self::WithTxt { txt, .. } => Some(txt),
        }
    }

    /// Split into the listed flag and the optional TXT records
    #[must_use]
    pub fn into_parts(self) -> (bool, Option<Vec<String>>) {
        match self {
            Self::Listed(listed) => (listed, None),
            Self::WithTxt { listed, txt } => (listed, Some(txt)),
        }
    }
}

/// A query target enriched with its result, as returned by `batch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    /// IP address that was checked
    pub address: String,
    /// Blacklist zone it was checked against
    pub blacklist: String,
    /// Whether the address is listed
    pub listed: bool,
    /// TXT records (present only when requested)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txt: Option<Vec<String>>,
}

impl BatchItem {
    /// Merge a lookup result into its target
    #[must_use]
    pub fn new(target: QueryTarget, result: LookupResult) -> Self {
        let (listed, txt) = result.into_parts();
        Self {
            address: target.address,
            blacklist: target.blacklist,
            listed,
            txt,
        }
    }
}

/// Why a query ended the way it did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    /// A lookup returned at least one address
    Listed,
    /// The name does not exist or has no A records
    NotListed,
    /// The per-query timer fired first
    TimedOut,
    /// The resolver handle was cancelled
    Cancelled,
    /// Any other resolver failure (SERVFAIL, refused, network error)
    Failed(String),
}

impl fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Listed => write!(f, "listed"),
            Self::NotListed => write!(f, "not listed"),
            Self::TimedOut => write!(f, "timed out"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Failed(msg) => write!(f, "failed: {msg}"),
        }
    }
}

/// Detailed outcome of one query.
///
/// `listed` and `txt` carry exactly what `lookup`/`batch` would return; the
/// status adds the reason behind a negative answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryReport {
    /// IP address that was checked
    pub address: String,
    /// Blacklist zone it was checked against
    pub blacklist: String,
    /// DNS name that was queried
    pub query_name: String,
    /// Whether the address is listed
    pub listed: bool,
    /// TXT records (present only when requested)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txt: Option<Vec<String>>,
    /// How the query ended
    pub status: QueryStatus,
    /// Wall time spent on the query
    pub elapsed_ms: u64,
}

impl QueryReport {
    /// Result in the default contract shape
    #[must_use]
    pub fn to_lookup_result(&self) -> LookupResult {
        match &self.txt {
            Some(txt) => LookupResult::WithTxt {
                listed: self.listed,
                txt: txt.clone(),
            },
            None => LookupResult::Listed(self.listed),
        }
    }

    /// Convert into the batch item shape
    #[must_use]
    pub fn into_batch_item(self) -> BatchItem {
        BatchItem {
            address: self.address,
            blacklist: self.blacklist,
            listed: self.listed,
            txt: self.txt,
        }
    }
}
