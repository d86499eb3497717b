//! Text rendering for the values written into the page.

use std::sync::LazyLock;

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Utc};
use regex::{Captures, Regex};

const BYTES_PER_MB: u128 = 1024 * 1024;

/// Abbreviated month names of the it-IT locale.
const IT_MONTHS_SHORT: [&str; 12] = [
    "gen", "feb", "mar", "apr", "mag", "giu", "lug", "ago", "set", "ott", "nov", "dic",
];

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(v?)\d+\.\d+\.\d+").expect("version pattern is valid"));

/// Version shown on the page: the tag without its leading "v".
pub fn display_version(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

/// Returns true if `text` contains a version-like substring.
pub fn contains_version(text: &str) -> bool {
    VERSION_PATTERN.is_match(text)
}

/// Replaces every version-like substring in `text` with `version`.
///
/// A leading "v" on the replaced substring is kept.
pub fn replace_versions(text: &str, version: &str) -> String {
    VERSION_PATTERN
        .replace_all(text, |caps: &Captures| format!("{}{}", &caps[1], version))
        .into_owned()
}

/// Renders a byte count as megabytes with one fractional digit, e.g. "1.4 MB".
///
/// Ties round up: 1.25 MB renders as "1.3 MB".
pub fn format_size(bytes: u64) -> String {
    let tenths = (bytes as u128 * 20 + BYTES_PER_MB) / (2 * BYTES_PER_MB);
    format!("{}.{} MB", tenths / 10, tenths % 10)
}

/// Renders an ISO 8601 timestamp as an it-IT long date, e.g. "5 mar 2024".
///
/// The calendar day is taken in UTC.
pub fn format_date(timestamp: &str) -> Result<String> {
    let date = DateTime::parse_from_rfc3339(timestamp)
        .with_context(|| format!("Invalid timestamp: {}", timestamp))?
        .with_timezone(&Utc);

    Ok(format!(
        "{} {} {}",
        date.day(),
        IT_MONTHS_SHORT[date.month0() as usize],
        date.year()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_version() {
        assert_eq!(display_version("v2.9.87"), "2.9.87");
        assert_eq!(display_version("2.9.87"), "2.9.87");
        assert_eq!(display_version("vv1.0.0"), "v1.0.0");
    }

    #[test]
    fn test_replace_versions_keeps_prefix() {
        assert_eq!(
            replace_versions("Download v2.9.80 now", "2.9.87"),
            "Download v2.9.87 now"
        );
        assert_eq!(replace_versions("Version 2.9.80", "2.9.87"), "Version 2.9.87");
    }

    #[test]
    fn test_replace_versions_without_version_is_unchanged() {
        assert_eq!(replace_versions("Download now", "2.9.87"), "Download now");
        assert_eq!(replace_versions("Build 2.9", "2.9.87"), "Build 2.9");
        assert!(!contains_version("Download now"));
    }

    #[test]
    fn test_replace_versions_replaces_every_occurrence() {
        assert_eq!(
            replace_versions("v1.0.0 replaces 0.9.9", "2.0.0"),
            "v2.0.0 replaces 2.0.0"
        );
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(104_857_600), "100.0 MB");
        assert_eq!(format_size(1_048_576), "1.0 MB");
        assert_eq!(format_size(1_500_000), "1.4 MB");
        assert_eq!(format_size(0), "0.0 MB");
    }

    #[test]
    fn test_format_size_rounds_ties_up() {
        assert_eq!(format_size(262_144), "0.3 MB");
        assert_eq!(format_size(1_310_720), "1.3 MB");
        assert_eq!(format_size(2_883_584), "2.8 MB");
        assert_eq!(format_size(u64::MAX), "17592186044416.0 MB");
    }

    #[test]
    fn test_format_size_is_monotonic() {
        let sizes = [0, 1, 52_428, 1_048_576, 1_500_000, 104_857_600, 5_000_000_000];
        let rendered: Vec<f64> = sizes
            .iter()
            .map(|&b| {
                format_size(b)
                    .trim_end_matches(" MB")
                    .parse::<f64>()
                    .unwrap()
            })
            .collect();
        assert!(rendered.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-05T10:00:00Z").unwrap(), "5 mar 2024");
        assert_eq!(format_date("2023-12-31T23:59:59Z").unwrap(), "31 dic 2023");
        assert_eq!(format_date("2025-08-15T00:00:00+00:00").unwrap(), "15 ago 2025");
    }

    #[test]
    fn test_format_date_normalizes_to_utc() {
        assert_eq!(format_date("2024-03-05T23:30:00-02:00").unwrap(), "6 mar 2024");
    }

    #[test]
    fn test_format_date_invalid() {
        let err = format_date("yesterday").unwrap_err();
        assert!(err.to_string().contains("yesterday"));
    }
}
