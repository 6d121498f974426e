//! Month-bucketing of menu dates.
//!
//! Two consumers share the same month table: aggregation ([`Season::from_iso`])
//! which yields `None` for dateless menus, and display ([`season_label`]) which
//! renders those as "Anytime".

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub fn from_month(month: u32) -> Option<Season> {
        match month {
            12 | 1 | 2 => Some(Season::Winter),
            3..=5 => Some(Season::Spring),
            6..=8 => Some(Season::Summer),
            9..=11 => Some(Season::Fall),
            _ => None,
        }
    }

    pub fn from_date(date: NaiveDate) -> Season {
        // chrono months are always 1..=12
        Season::from_month(date.month()).unwrap_or(Season::Fall)
    }

    /// Season of an ISO date string; `None` when absent or unparseable.
    pub fn from_iso(iso: Option<&str>) -> Option<Season> {
        iso.and_then(parse_iso_date).map(Season::from_date)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        }
    }

    /// Case-insensitive parse of a season name
    pub fn parse(name: &str) -> Option<Season> {
        match name.trim().to_lowercase().as_str() {
            "winter" => Some(Season::Winter),
            "spring" => Some(Season::Spring),
            "summer" => Some(Season::Summer),
            "fall" | "autumn" => Some(Season::Fall),
            _ => None,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn parse_iso_date(iso: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d").ok()
}

/// Display label for a menu's season; dateless menus read "Anytime".
pub fn season_label(iso: Option<&str>) -> &'static str {
    Season::from_iso(iso).map_or("Anytime", |s| s.as_str())
}

/// Short display date such as "Oct 5, 2026", or "Undated".
pub fn format_date(iso: Option<&str>) -> String {
    match iso.and_then(parse_iso_date) {
        Some(date) => short_date(date),
        None => "Undated".to_string(),
    }
}

pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Long display date used in export headings, such as "October 5, 2026".
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_month_maps_to_one_season() {
        let expected = [
            Season::Winter,
            Season::Winter,
            Season::Spring,
            Season::Spring,
            Season::Spring,
            Season::Summer,
            Season::Summer,
            Season::Summer,
            Season::Fall,
            Season::Fall,
            Season::Fall,
            Season::Winter,
        ];
        for (index, season) in expected.iter().enumerate() {
            let month = index as u32 + 1;
            assert_eq!(Season::from_month(month), Some(*season));
            let iso = format!("2023-{:02}-15", month);
            assert_eq!(Season::from_iso(Some(&iso)), Some(*season));
        }
        assert_eq!(Season::from_month(0), None);
        assert_eq!(Season::from_month(13), None);
    }

    #[test]
    fn test_from_date_agrees_with_month_table() {
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        while date.year() == 2024 {
            assert_eq!(Some(Season::from_date(date)), Season::from_month(date.month()));
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_dateless_has_no_season() {
        assert_eq!(Season::from_iso(None), None);
        assert_eq!(Season::from_iso(Some("")), None);
        assert_eq!(Season::from_iso(Some("2023-02-30")), None);
        assert_eq!(Season::from_iso(Some("next week")), None);
    }

    #[test]
    fn test_season_label_uses_anytime_for_display() {
        assert_eq!(season_label(Some("2021-06-01")), "Summer");
        assert_eq!(season_label(Some("2020-12-31")), "Winter");
        assert_eq!(season_label(None), "Anytime");
        assert_eq!(season_label(Some("garbage")), "Anytime");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(Some("2021-06-01")), "Jun 1, 2021");
        assert_eq!(format_date(None), "Undated");
        assert_eq!(format_date(Some("06/01/2021")), "Undated");
    }

    #[test]
    fn test_long_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 5).unwrap();
        assert_eq!(long_date(date), "October 5, 2026");
    }

    #[test]
    fn test_parse_season_name() {
        assert_eq!(Season::parse("Autumn"), Some(Season::Fall));
        assert_eq!(Season::parse(" summer "), Some(Season::Summer));
        assert_eq!(Season::parse("monsoon"), None);
    }
}
