//! Output formatting for different formats.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use dnsbl::{BatchItem, QueryReport};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned, colored lines
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// CSV output
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Render plain results (`check` / `batch`).
pub fn render_items(format: OutputFormat, items: &[BatchItem]) -> Result<String> {
    let mut out = String::new();

    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(items)?)?;
        }
        OutputFormat::Csv => {
            writeln!(out, "address,blacklist,listed,txt")?;
            for item in items {
                writeln!(
                    out,
                    "{},{},{},{}",
                    item.address,
                    item.blacklist,
                    item.listed,
                    csv_field(item.txt.as_deref())
                )?;
            }
        }
        OutputFormat::Pretty => {
            let width = address_width(items.iter().map(|i| i.address.as_str()));
            for item in items {
                write!(
                    out,
                    "  {:width$}  {}  {}",
                    item.address.cyan(),
                    verdict(item.listed),
                    item.blacklist
                )?;
                if let Some(txt) = item.txt.as_deref().filter(|t| !t.is_empty()) {
                    write!(out, "  {}", txt.join(" | ").dimmed())?;
                }
                writeln!(out)?;
            }
        }
    }

    Ok(out)
}

/// Render detailed results (`--detailed`).
pub fn render_reports(format: OutputFormat, reports: &[QueryReport]) -> Result<String> {
    let mut out = String::new();

    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(reports)?)?;
        }
        OutputFormat::Csv => {
            writeln!(out, "address,blacklist,listed,txt,status,elapsed_ms")?;
            for report in reports {
                writeln!(
                    out,
                    "{},{},{},{},{},{}",
                    report.address,
                    report.blacklist,
                    report.listed,
                    csv_field(report.txt.as_deref()),
                    csv_quote(&report.status.to_string()),
                    report.elapsed_ms
                )?;
            }
        }
        OutputFormat::Pretty => {
            let width = address_width(reports.iter().map(|r| r.address.as_str()));
            for report in reports {
                write!(
                    out,
                    "  {:width$}  {}  {}  {} ({} ms)",
                    report.address.cyan(),
                    verdict(report.listed),
                    report.blacklist,
                    report.status.to_string().dimmed(),
                    report.elapsed_ms
                )?;
                if let Some(txt) = report.txt.as_deref().filter(|t| !t.is_empty()) {
                    write!(out, "  {}", txt.join(" | ").dimmed())?;
                }
                writeln!(out)?;
            }
        }
    }

    Ok(out)
}

fn verdict(listed: bool) -> colored::ColoredString {
    if listed {
        "LISTED".red().bold()
    } else {
        "clean ".green()
    }
}

fn address_width<'a>(addresses: impl Iterator<Item = &'a str>) -> usize {
    addresses.map(str::len).max().unwrap_or(0)
}

fn csv_field(txt: Option<&[String]>) -> String {
    txt.map_or_else(String::new, |records| csv_quote(&records.join(";")))
}

fn csv_quote(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnsbl::QueryStatus;

    fn items() -> Vec<BatchItem> {
        vec![
            BatchItem {
                address: "127.0.0.2".into(),
                blacklist: "zen.spamhaus.org".into(),
                listed: true,
                txt: Some(vec!["spam=yes".into(), "see, https://example.org".into()]),
            },
            BatchItem {
                address: "192.0.2.1".into(),
                blacklist: "zen.spamhaus.org".into(),
                listed: false,
                txt: Some(vec![]),
            },
        ]
    }

    #[test]
    fn test_output_format_names() {
        assert_eq!(OutputFormat::from_str("json", true).unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("yaml", true).is_err());
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }

    #[test]
    fn test_render_items_csv() {
        let out = render_items(OutputFormat::Csv, &items()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "address,blacklist,listed,txt");
        assert_eq!(
            lines[1],
            "127.0.0.2,zen.spamhaus.org,true,\"spam=yes;see, https://example.org\""
        );
        assert_eq!(lines[2], "192.0.2.1,zen.spamhaus.org,false,");
    }

    #[test]
    fn test_render_items_json() {
        let out = render_items(OutputFormat::Json, &items()).unwrap();
        let parsed: Vec<BatchItem> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, items());
    }

    #[test]
    fn test_render_items_pretty() {
        colored::control::set_override(false);
        let out = render_items(OutputFormat::Pretty, &items()).unwrap();
        assert!(out.contains("127.0.0.2  LISTED  zen.spamhaus.org  spam=yes"));
        assert!(out.contains("192.0.2.1  clean   zen.spamhaus.org"));
    }

    #[test]
    fn test_render_reports_csv() {
        let reports = vec![QueryReport {
            address: "192.0.2.1".into(),
            blacklist: "bl.example.org".into(),
            query_name: "1.2.0.192.bl.example.org".into(),
            listed: false,
            txt: None,
            status: QueryStatus::TimedOut,
            elapsed_ms: 5001,
        }];

        let out = render_reports(OutputFormat::Csv, &reports).unwrap();
        assert!(out.ends_with("192.0.2.1,bl.example.org,false,,timed out,5001\n"));
    }
}
