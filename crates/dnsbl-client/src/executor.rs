//! One blacklist check against one resolver handle.

use dnsbl_core::{LookupOptions, QueryReport, QueryStatus, QueryTarget};
use tokio::time::Instant;
use tracing::debug;

use crate::resolver::{ResolveFailure, ResolverHandle};

type Answer = (Vec<std::net::Ipv4Addr>, Option<Vec<String>>);

/// Run the query for `target` under `query_name`, racing it against the
/// per-query timer.
///
/// Every failure mode collapses to `listed == false` (with an empty TXT list
/// when TXT was requested); only the report status tells them apart. When the
/// timer wins, the handle is cancelled before returning.
pub(crate) async fn execute<H>(
    target: QueryTarget,
    query_name: String,
    handle: &H,
    options: &LookupOptions,
) -> QueryReport
where
    H: ResolverHandle + ?Sized,
{
    let start = Instant::now();
    let include_txt = options.include_txt;

    let resolution = async {
        if include_txt {
            let (addrs, txt) =
                tokio::try_join!(handle.resolve_a(&query_name), handle.resolve_txt(&query_name))?;
            Ok::<Answer, ResolveFailure>((addrs, Some(txt)))
        } else {
            Ok((handle.resolve_a(&query_name).await?, None))
        }
    };

    let (listed, txt, status) = match tokio::time::timeout(options.timeout(), resolution).await {
        Ok(Ok((addrs, txt))) => {
            let listed = !addrs.is_empty();
            let status = if listed {
                QueryStatus::Listed
            } else {
                QueryStatus::NotListed
            };
            (listed, txt, status)
        }
        Ok(Err(failure)) => {
            let status = match failure {
                ResolveFailure::NotFound => QueryStatus::NotListed,
                ResolveFailure::Cancelled => QueryStatus::Cancelled,
                ResolveFailure::Failed(msg) => QueryStatus::Failed(msg),
            };
            (false, include_txt.then(Vec::new), status)
        }
        Err(_) => {
            handle.cancel();
            debug!(
                name = %query_name,
                timeout_ms = options.timeout_ms,
                "DNSBL query timed out, resolver cancelled"
            );
            (false, include_txt.then(Vec::new), QueryStatus::TimedOut)
        }
    };

    debug!(name = %query_name, listed, status = %status, "DNSBL query finished");

    QueryReport {
        address: target.address,
        blacklist: target.blacklist,
        query_name,
        listed,
        txt,
        status,
        elapsed_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolverFactory;
    use crate::stub::{StubFactory, Zone};
    use dnsbl_core::LookupResult;
    use std::net::Ipv4Addr;
    use std::time::Duration;

    const NAME: &str = "2.0.0.127.zen.spamhaus.org";

    fn target() -> QueryTarget {
        QueryTarget::new("127.0.0.2", "zen.spamhaus.org")
    }

    async fn run(factory: &StubFactory, options: &LookupOptions) -> QueryReport {
        let handle = factory.create(&options.servers).unwrap();
        execute(target(), NAME.to_string(), &handle, options).await
    }

    #[tokio::test]
    async fn test_listed_when_a_records_present() {
        let factory = StubFactory::new(Zone::new().with_a(NAME, [Ipv4Addr::new(127, 0, 0, 2)]));
        let report = run(&factory, &LookupOptions::default()).await;

        assert!(report.listed);
        assert_eq!(report.status, QueryStatus::Listed);
        assert_eq!(report.query_name, NAME);
        assert_eq!(report.to_lookup_result(), LookupResult::Listed(true));
    }

    #[tokio::test]
    async fn test_nxdomain_is_not_listed() {
        let factory = StubFactory::new(Zone::new());
        let report = run(&factory, &LookupOptions::default()).await;

        assert!(!report.listed);
        assert_eq!(report.status, QueryStatus::NotListed);
        assert_eq!(report.txt, None);
    }

    #[tokio::test]
    async fn test_empty_answer_is_not_listed() {
        let factory = StubFactory::new(Zone::new().with_a(NAME, []));
        let report = run(&factory, &LookupOptions::default()).await;

        assert!(!report.listed);
        assert_eq!(report.status, QueryStatus::NotListed);
    }

    #[tokio::test]
    async fn test_server_failure_collapses_to_negative() {
        let factory = StubFactory::new(
            Zone::new()
                .with_a(NAME, [Ipv4Addr::new(127, 0, 0, 2)])
                .failing(ResolveFailure::Failed("SERVFAIL".into())),
        );
        let report = run(&factory, &LookupOptions::default().include_txt(true)).await;

        assert!(!report.listed);
        assert_eq!(report.txt, Some(Vec::new()));
        assert_eq!(report.status, QueryStatus::Failed("SERVFAIL".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_cancels_handle() {
        let factory = StubFactory::new(Zone::new().hanging());
        let stats = factory.stats();
        let options = LookupOptions::default().timeout_ms(250);

        let report = run(&factory, &options).await;

        assert!(!report.listed);
        assert_eq!(report.status, QueryStatus::TimedOut);
        assert!(report.elapsed_ms >= 250);
        assert!(report.elapsed_ms <= 260, "took {}ms", report.elapsed_ms);
        assert_eq!(stats.cancelled(), 1);
        assert_eq!(stats.active(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_with_txt_gives_empty_list() {
        let factory = StubFactory::new(Zone::new().hanging());
        let options = LookupOptions::default().timeout_ms(100).include_txt(true);

        let report = run(&factory, &options).await;
        assert_eq!(
            report.to_lookup_result(),
            LookupResult::WithTxt {
                listed: false,
                txt: vec![]
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_answer_before_timer_does_not_cancel() {
        let factory = StubFactory::new(
            Zone::new()
                .with_a(NAME, [Ipv4Addr::new(127, 0, 0, 2)])
                .with_delay(NAME, Duration::from_millis(40)),
        );
        let stats = factory.stats();

        let report = run(&factory, &LookupOptions::default().timeout_ms(50)).await;

        assert!(report.listed);
        assert_eq!(stats.cancelled(), 0);
    }

    #[tokio::test]
    async fn test_txt_records_returned_when_listed() {
        let factory = StubFactory::new(
            Zone::new()
                .with_a(NAME, [Ipv4Addr::new(127, 0, 0, 2)])
                .with_txt(NAME, ["spam=yes"]),
        );
        let report = run(&factory, &LookupOptions::default().include_txt(true)).await;

        assert_eq!(
            report.to_lookup_result(),
            LookupResult::WithTxt {
                listed: true,
                txt: vec!["spam=yes".to_string()]
            }
        );
    }

    #[tokio::test]
    async fn test_missing_txt_makes_whole_query_negative() {
        let factory = StubFactory::new(Zone::new().with_a(NAME, [Ipv4Addr::new(127, 0, 0, 2)]));
        let report = run(&factory, &LookupOptions::default().include_txt(true)).await;

        assert!(!report.listed);
        assert_eq!(report.txt, Some(Vec::new()));
        assert_eq!(report.status, QueryStatus::NotListed);
    }

    #[tokio::test]
    async fn test_repeated_lookups_are_identical() {
        let factory = StubFactory::new(
            Zone::new()
                .with_a(NAME, [Ipv4Addr::new(127, 0, 0, 2)])
                .with_txt(NAME, ["spam=yes"]),
        );
        let options = LookupOptions::default().include_txt(true);

        let first = run(&factory, &options).await.to_lookup_result();
        for _ in 0..5 {
            assert_eq!(run(&factory, &options).await.to_lookup_result(), first);
        }
    }
}
