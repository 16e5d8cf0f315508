//! Month-picker date normalization.
//!
//! Forms submit `YYYY-MM`; the database stores a full date pinned to the first
//! of the month (`YYYY-MM-01`); responses serialize back to `YYYY-MM` so a
//! saved entry round-trips into the edit form unchanged.

use chrono::NaiveDate;

/// Parses a month-picker value into a stored date.
/// Accepts `YYYY-MM` (pinned to day 1) or a full `YYYY-MM-DD`.
pub fn parse_month(value: &str) -> Result<NaiveDate, String> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
        .map_err(|_| format!("Invalid month value '{value}', expected YYYY-MM"))
}

/// Converts an optional month-picker value; empty strings count as absent.
pub fn parse_month_opt(value: &Option<String>) -> Result<Option<NaiveDate>, String> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_month(s).map(Some),
    }
}

pub fn format_month(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Serde adapter: `Option<NaiveDate>` ⇄ optional `YYYY-MM` string.
pub mod month_opt {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_some(&super::format_month(*d)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let value: Option<String> = Option::deserialize(deserializer)?;
        super::parse_month_opt(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_is_pinned_to_first_day() {
        assert_eq!(
            parse_month("2024-09").unwrap(),
            NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
        );
    }

    #[test]
    fn test_full_date_passes_through() {
        assert_eq!(
            parse_month("2024-09-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 9, 15).unwrap()
        );
    }

    #[test]
    fn test_round_trip_is_identity_on_months() {
        let stored = parse_month("2023-02").unwrap();
        assert_eq!(format_month(stored), "2023-02");
    }

    #[test]
    fn test_empty_string_is_absent() {
        assert_eq!(parse_month_opt(&Some(String::new())).unwrap(), None);
        assert_eq!(parse_month_opt(&None).unwrap(), None);
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("yesterday").is_err());
    }
}
