use serde::{Deserialize, Serialize};

use crate::{ptr, Result};

/// One address checked against one blacklist zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryTarget {
    /// IP address being checked
    pub address: String,
    /// Blacklist zone, e.g. `zen.spamhaus.org`
    pub blacklist: String,
}

impl QueryTarget {
    /// Create a target
    #[must_use]
    pub fn new(address: impl Into<String>, blacklist: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            blacklist: blacklist.into(),
        }
    }

    /// DNS name queried for this target (reversed address + `.` + zone)
    pub fn query_name(&self) -> Result<String> {
        ptr::query_name(&self.address, &self.blacklist)
    }

    /// Cartesian product of addresses and blacklists, address-major.
    #[must_use]
    pub fn product(addresses: &[String], blacklists: &[String]) -> Vec<Self> {
        addresses
            .iter()
            .flat_map(|address| {
                blacklists
                    .iter()
                    .map(move |blacklist| Self::new(address.clone(), blacklist.clone()))
            })
            .collect()
    }
}
