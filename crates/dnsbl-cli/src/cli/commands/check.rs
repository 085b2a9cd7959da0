//! `dnsbl-check check` - one address against one blacklist.

use anyhow::Result;
use dnsbl::{BatchItem, QueryTarget};

use super::Context;
use crate::cli::args::CheckArgs;
use crate::output;

pub async fn execute(ctx: Context, args: CheckArgs) -> Result<()> {
    let client = ctx.client();

    if ctx.detailed {
        let report = client.inspect(&args.address, &args.blacklist).await?;
        print!("{}", output::render_reports(ctx.output_format, &[report])?);
    } else {
        let result = client.lookup(&args.address, &args.blacklist).await?;
        let item = BatchItem::new(QueryTarget::new(args.address, args.blacklist), result);
        print!("{}", output::render_items(ctx.output_format, &[item])?);
    }

    Ok(())
}
