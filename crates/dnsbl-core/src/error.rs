use thiserror::Error;

/// Result type alias for DNSBL operations
pub type Result<T> = std::result::Result<T, DnsblError>;

/// Errors surfaced to callers of `lookup` and `batch`.
///
/// DNS-level failures (NXDOMAIN, SERVFAIL, timeouts, unreachable servers) are
/// never reported here; they collapse into a negative result.
#[derive(Error, Debug)]
pub enum DnsblError {
    /// Address could not be turned into a reverse name
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    /// Blacklist zone is unusable as a query suffix
    #[error("invalid blacklist domain: {0:?}")]
    InvalidBlacklist(String),

    /// Options are out of range or a server address is malformed
    #[error("configuration error: {0}")]
    Config(String),

    /// A resolver handle could not be constructed
    #[error("resolver error: {0}")]
    Resolver(String),

    /// Config file could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for the options schema
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
