//! `dnsbl-check batch` - every address against every blacklist.

use anyhow::Result;

use super::Context;
use crate::cli::args::BatchArgs;
use crate::output;

pub async fn execute(ctx: Context, args: BatchArgs) -> Result<()> {
    let client = ctx.client();

    // Flatten and drop blanks left by trailing commas
    let addresses = clean(args.addresses);
    let blacklists = clean(args.blacklists);

    if ctx.detailed {
        let reports = client.batch_reports(addresses, blacklists).await?;
        print!("{}", output::render_reports(ctx.output_format, &reports)?);
    } else {
        let items = client.batch(addresses, blacklists).await?;
        print!("{}", output::render_items(ctx.output_format, &items)?);
    }

    Ok(())
}

fn clean(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}
