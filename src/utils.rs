// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::{Datelike, Days, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::{Decimal, RoundingStrategy};

const UA: &str = concat!("ynabctl/", env!("CARGO_PKG_VERSION"));

pub fn http_client(timeout: Duration) -> reqwest::Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(UA)
        .build()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn fmt_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn first_of_month(d: NaiveDate) -> NaiveDate {
    d - Days::new(u64::from(d.day0()))
}

/// Resolve a month argument to the first day of that month.
///
/// Accepts `current` (relative to `today`), `YYYY-MM-DD` or `YYYY-MM`.
pub fn resolve_month(s: &str, today: NaiveDate) -> Result<NaiveDate> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("current") {
        return Ok(first_of_month(today));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(first_of_month(d));
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d") {
        return Ok(d);
    }
    bail!(
        "Invalid month '{}', expected YYYY-MM-DD, YYYY-MM or 'current'",
        s
    )
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Milliunits as a two-decimal string, computed exactly.
pub fn fmt_milliunits(milliunits: i64) -> String {
    let d = Decimal::new(milliunits, 3)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", d)
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn current_month_resolves_to_first_day() {
        assert_eq!(
            resolve_month("current", ymd(2025, 2, 28)).unwrap(),
            ymd(2025, 2, 1)
        );
    }

    #[test]
    fn explicit_months_are_normalized() {
        let today = ymd(2025, 6, 15);
        assert_eq!(resolve_month("2024-12-17", today).unwrap(), ymd(2024, 12, 1));
        assert_eq!(resolve_month("2024-03", today).unwrap(), ymd(2024, 3, 1));
        assert!(resolve_month("next", today).is_err());
        assert!(resolve_month("2024-13", today).is_err());
    }

    #[test]
    fn milliunits_format_exactly() {
        assert_eq!(fmt_milliunits(0), "0.00");
        assert_eq!(fmt_milliunits(-25500), "-25.50");
        assert_eq!(fmt_milliunits(12345), "12.35");
        assert_eq!(fmt_milliunits(1_000_000_001), "1000000.00");
    }

    #[test]
    fn user_agent_is_name_and_version() {
        assert_eq!(UA, format!("ynabctl/{}", env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("short", 30), "short");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
    }
}
