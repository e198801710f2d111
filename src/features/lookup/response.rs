use crate::data_model::{AuthoritativeTime, ZoneInfo};
use crate::error::ClockError;
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::Deserialize;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

#[derive(Debug, Deserialize)]
struct CurrentTimeResponse {
    datetime: Option<String>,
    timezone_name: Option<String>,
    timezone_abbreviation: Option<String>,
    /// Hours from UTC; some zones use fractions.
    gmt_offset: Option<f64>,
}

/// Turns a lookup response body into the authoritative time it reports.
pub fn parse_response_body(body: &[u8]) -> Result<AuthoritativeTime, ClockError> {
    let response: CurrentTimeResponse = serde_json::from_slice(body)
        .map_err(|err| ClockError::parse(format!("body is not a JSON object: {err}")))?;

    let raw = response
        .datetime
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ClockError::parse("missing `datetime` field"))?;
    let (local, explicit_offset) = parse_datetime(raw)?;

    let offset = explicit_offset.or_else(|| response.gmt_offset.and_then(offset_from_hours));
    Ok(AuthoritativeTime {
        local,
        zone: ZoneInfo {
            name: non_empty(response.timezone_name),
            abbreviation: non_empty(response.timezone_abbreviation),
            offset,
        },
    })
}

/// Accepts `YYYY-MM-DD HH:MM:SS`, the `T`-separated form, and RFC 3339 with an offset.
pub fn parse_datetime(raw: &str) -> Result<(NaiveDateTime, Option<FixedOffset>), ClockError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok((parsed.naive_local(), Some(*parsed.offset())));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|local| (local, None))
        .ok_or_else(|| ClockError::parse(format!("unrecognised datetime `{raw}`")))
}

fn offset_from_hours(hours: f64) -> Option<FixedOffset> {
    if !hours.is_finite() {
        return None;
    }
    FixedOffset::east_opt((hours * 3600.0).round() as i32)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{parse_datetime, parse_response_body};
    use crate::error::ClockError;
    use chrono::{FixedOffset, NaiveDate};

    #[test]
    fn parses_service_payload_with_zone_metadata() {
        let body = br#"{
            "datetime": "2020-05-01 14:33:04",
            "timezone_name": "Central European Summer Time",
            "timezone_location": "Europe/Berlin",
            "timezone_abbreviation": "CEST",
            "gmt_offset": 2,
            "is_dst": true,
            "requested_location": "Europe/Berlin"
        }"#;

        let time = parse_response_body(body).expect("time");
        let expected = NaiveDate::from_ymd_opt(2020, 5, 1)
            .and_then(|date| date.and_hms_opt(14, 33, 4))
            .expect("valid date");
        assert_eq!(time.local, expected);
        assert_eq!(time.zone.abbreviation.as_deref(), Some("CEST"));
        assert_eq!(time.zone.offset, FixedOffset::east_opt(7200));
    }

    #[test]
    fn fractional_gmt_offset_is_kept() {
        let body = br#"{"datetime": "2021-01-01 10:00:00", "gmt_offset": 5.5}"#;
        let time = parse_response_body(body).expect("time");
        assert_eq!(time.zone.offset, FixedOffset::east_opt(5 * 3600 + 1800));
    }

    #[test]
    fn missing_datetime_is_parse_error() {
        let err = parse_response_body(br#"{"timezone_abbreviation": "JST"}"#)
            .expect_err("should fail");
        assert!(matches!(err, ClockError::Parse { .. }));
    }

    #[test]
    fn non_json_body_is_parse_error() {
        let err = parse_response_body(b"<html>oops</html>").expect_err("should fail");
        assert!(matches!(err, ClockError::Parse { .. }));
    }

    #[test]
    fn unparseable_datetime_is_parse_error() {
        let err =
            parse_response_body(br#"{"datetime": "yesterday-ish"}"#).expect_err("should fail");
        assert!(matches!(err, ClockError::Parse { .. }));
    }

    #[test]
    fn rfc3339_offset_wins_over_naive_forms() {
        let (local, offset) = parse_datetime("2022-07-04T09:15:00-04:00").expect("parse");
        assert_eq!(local.to_string(), "2022-07-04 09:15:00");
        assert_eq!(offset, FixedOffset::west_opt(4 * 3600));

        let (local, offset) = parse_datetime("2022-07-04T09:15:00.250").expect("parse");
        assert_eq!(local.to_string(), "2022-07-04 09:15:00.250");
        assert!(offset.is_none());
    }
}
