//! dnsbl-check - DNSBL lookups from the command line.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dnsbl_cli::run().await
}
