//! Lenient date parsing for request payloads.
//!
//! Browsers submit `new Date()` as an RFC 3339 timestamp even where the record only
//! stores a calendar date, so both shapes are accepted.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.with_timezone(&Utc).date_naive())
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::default())))
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 timestamp ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

pub(crate) fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_timestamp(&value).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_timestamps_collapse_to_dates() {
        let date = parse_date("2024-12-03T15:30:00.000Z").expect("parses");
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 12, 3).unwrap());
    }

    #[test]
    fn plain_dates_become_midnight_timestamps() {
        let timestamp = parse_timestamp("2024-11-25").expect("parses");
        assert_eq!(timestamp.to_rfc3339(), "2024-11-25T00:00:00+00:00");
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_date("next tuesday").is_err());
        assert!(parse_timestamp("2024-13-40").is_err());
    }
}
