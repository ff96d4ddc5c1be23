//! Normalization of `period_end` / `period` fields in forecast payloads.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeDelta, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

const PERIOD_END: &str = "period_end";
const PERIOD: &str = "period";

/// One element of a forecast or estimated-actuals series with its timing
/// fields parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodEntry {
    /// End of the averaging period, if the entry had one.
    pub period_end: Option<DateTime<Utc>>,
    /// Length of the averaging period, if the entry had one.
    pub period: Option<TimeDelta>,
    /// All remaining fields, as returned by the API.
    pub fields: Map<String, Value>,
}

impl PeriodEntry {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Start of the period, when both timing fields are present.
    pub fn period_start(&self) -> Option<DateTime<Utc>> {
        Some(self.period_end? - self.period?)
    }
}

/// A payload whose series under `key` has been normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPayload {
    /// Top-level key the series was read from (the endpoint name).
    pub key: String,
    /// Normalized series. Empty when the payload had no such key.
    pub entries: Vec<PeriodEntry>,
    /// Every other top-level key, untouched.
    pub rest: Map<String, Value>,
}

impl ParsedPayload {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PeriodEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a ParsedPayload {
    type Item = &'a PeriodEntry;
    type IntoIter = std::slice::Iter<'a, PeriodEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for PeriodEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        if let Some(end) = self.period_end {
            map.serialize_entry(PERIOD_END, &end.to_rfc3339_opts(SecondsFormat::AutoSi, true))?;
        }
        if let Some(period) = self.period {
            map.serialize_entry(PERIOD, &period.to_string())?;
        }
        map.end()
    }
}

/// Serializes to the original document shape, with timestamps as RFC 3339
/// strings and periods as ISO-8601 durations.
impl Serialize for ParsedPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (k, v) in &self.rest {
            map.serialize_entry(k, v)?;
        }
        map.serialize_entry(&self.key, &self.entries)?;
        map.end()
    }
}

/// Splits the array under `key` out of `payload` and parses each entry's
/// `period_end` and `period`. Missing keys or fields are left absent.
pub fn parse_periods(payload: Value, key: &str) -> Result<ParsedPayload> {
    let mut rest = match payload {
        Value::Object(map) => map,
        other => return Err(shape_error(format!("expected a JSON object, got {}", other))),
    };

    let entries = match rest.remove(key) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(parse_entry)
            .collect::<Result<Vec<_>>>()?,
        Some(other) => {
            return Err(shape_error(format!(
                "expected `{}` to be an array, got {}",
                key, other
            )));
        }
    };

    Ok(ParsedPayload {
        key: key.to_string(),
        entries,
        rest,
    })
}

fn parse_entry(item: Value) -> Result<PeriodEntry> {
    let mut fields = match item {
        Value::Object(map) => map,
        other => return Err(shape_error(format!("expected an object entry, got {}", other))),
    };

    let period_end = fields
        .remove(PERIOD_END)
        .map(|v| {
            let s = field_str(PERIOD_END, v)?;
            parse_datetime(&s).map_err(|reason| Error::Timestamp {
                field: PERIOD_END,
                value: s,
                reason,
            })
        })
        .transpose()?;

    let period = fields
        .remove(PERIOD)
        .map(|v| {
            let s = field_str(PERIOD, v)?;
            parse_duration(&s).map_err(|reason| Error::Timestamp {
                field: PERIOD,
                value: s,
                reason,
            })
        })
        .transpose()?;

    Ok(PeriodEntry {
        period_end,
        period,
        fields,
    })
}

fn field_str(field: &'static str, v: Value) -> Result<String> {
    match v {
        Value::String(s) => Ok(s),
        other => Err(Error::Timestamp {
            field,
            value: other.to_string(),
            reason: "expected a string".to_string(),
        }),
    }
}

fn shape_error(msg: String) -> Error {
    Error::Decode(<serde_json::Error as serde::de::Error>::custom(msg))
}

/// Parses an ISO-8601 timestamp. Values without an offset are taken as UTC.
pub fn parse_datetime(s: &str) -> std::result::Result<DateTime<Utc>, String> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    // Basic-format offsets such as `+1000`.
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map(|dt| dt.and_utc())
        .map_err(|e| format!("not an ISO-8601 timestamp ({})", e))
}

/// Parses an ISO-8601 duration such as `PT30M`, `PT1H30M`, `P1DT12H` or
/// `P2W`.
///
/// Year and month components have no fixed length and are rejected unless
/// zero.
pub fn parse_duration(s: &str) -> std::result::Result<TimeDelta, String> {
    let s = s.trim();
    check_designators(s)?;

    match iso8601::duration(s)? {
        iso8601::Duration::Weeks(weeks) => Ok(TimeDelta::weeks(i64::from(weeks))),
        iso8601::Duration::YMDHMS {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
        } => {
            if year != 0 || month != 0 {
                return Err("calendar years and months are not supported".to_string());
            }
            Ok(TimeDelta::days(i64::from(day))
                + TimeDelta::hours(i64::from(hour))
                + TimeDelta::minutes(i64::from(minute))
                + TimeDelta::seconds(i64::from(second))
                + TimeDelta::milliseconds(i64::from(millisecond)))
        }
    }
}

/// Each designator must carry a value and appear at most once, in
/// `PnYnMnWnDTnHnMnS` order, so nothing is left over for the parser to drop.
fn check_designators(s: &str) -> std::result::Result<(), String> {
    let body = s
        .strip_prefix('P')
        .ok_or_else(|| "duration must start with `P`".to_string())?;

    let mut in_time = false;
    let mut has_value = false;
    let mut last_rank = None;
    for c in body.chars() {
        match c {
            '0'..='9' | '.' | ',' => {
                has_value = true;
                continue;
            }
            'T' if !in_time && !has_value => {
                in_time = true;
                continue;
            }
            _ => {}
        }

        let rank = match (in_time, c) {
            (false, 'Y') => 0,
            (false, 'M') => 1,
            (false, 'W') => 2,
            (false, 'D') => 3,
            (true, 'H') => 4,
            (true, 'M') => 5,
            (true, 'S') => 6,
            _ => return Err(format!("unexpected `{}`", c)),
        };
        if !has_value {
            return Err(format!("missing value before `{}`", c));
        }
        if last_rank.is_some_and(|last| rank <= last) {
            return Err(format!("designator `{}` is repeated or out of order", c));
        }
        last_rank = Some(rank);
        has_value = false;
    }

    if has_value {
        return Err("trailing value without designator".to_string());
    }
    if last_rank.is_none() || (in_time && last_rank < Some(4)) {
        return Err("duration has no components".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn parses_forecast_entries() {
        let payload = json!({
            "forecasts": [
                {
                    "pv_estimate": "9.5",
                    "period_end": "2018-01-01T01:00:00.00000Z",
                    "period": "PT30M"
                },
                {
                    "pv_estimate": "10",
                    "period_end": "2018-01-01T12:30:00.00000Z",
                    "period": "PT30M"
                }
            ]
        });

        let parsed = parse_periods(payload, "forecasts").expect("parse");
        assert_eq!(parsed.len(), 2);

        let first = &parsed.entries[0];
        assert_eq!(
            first.period_end,
            Some(Utc.with_ymd_and_hms(2018, 1, 1, 1, 0, 0).unwrap())
        );
        assert_eq!(first.period, Some(TimeDelta::minutes(30)));
        assert_eq!(first.get("pv_estimate"), Some(&json!("9.5")));
        assert_eq!(
            first.period_start(),
            Some(Utc.with_ymd_and_hms(2018, 1, 1, 0, 30, 0).unwrap())
        );
    }

    #[test]
    fn missing_key_and_fields_are_not_errors() {
        let parsed = parse_periods(json!({"other": 1}), "forecasts").expect("parse");
        assert!(parsed.is_empty());
        assert_eq!(parsed.rest.get("other"), Some(&json!(1)));

        let parsed = parse_periods(json!({"forecasts": [{"ghi": 690}]}), "forecasts")
            .expect("parse");
        let entry = &parsed.entries[0];
        assert_eq!(entry.period_end, None);
        assert_eq!(entry.period, None);
        assert_eq!(entry.get("ghi"), Some(&json!(690)));
    }

    #[test]
    fn invalid_timestamp_is_reported() {
        let err = parse_periods(
            json!({"forecasts": [{"period_end": "yesterday", "period": "PT30M"}]}),
            "forecasts",
        )
        .unwrap_err();
        match err {
            Error::Timestamp { field, value, .. } => {
                assert_eq!(field, "period_end");
                assert_eq!(value, "yesterday");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_array_series_is_a_decode_error() {
        let err = parse_periods(json!({"forecasts": "nope"}), "forecasts").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn datetime_variants() {
        let expected = Utc.with_ymd_and_hms(2018, 2, 2, 3, 30, 0).unwrap();
        assert_eq!(parse_datetime("2018-02-02T03:30:00.0000000Z"), Ok(expected));
        assert_eq!(parse_datetime("2018-02-02T13:30:00+10:00"), Ok(expected));
        assert_eq!(parse_datetime("2018-02-02T03:30:00"), Ok(expected));
        assert!(parse_datetime("2018-02-02").is_err());
    }

    #[test]
    fn basic_format_offset() {
        let expected = Utc.with_ymd_and_hms(2017, 12, 31, 15, 0, 0).unwrap();
        assert_eq!(parse_datetime("2018-01-01T01:00:00+1000"), Ok(expected));
    }

    #[test]
    fn duration_variants() {
        assert_eq!(parse_duration("PT5M"), Ok(TimeDelta::minutes(5)));
        assert_eq!(parse_duration("PT30M"), Ok(TimeDelta::minutes(30)));
        assert_eq!(parse_duration("PT1H30M"), Ok(TimeDelta::minutes(90)));
        assert_eq!(parse_duration("P1DT12H"), Ok(TimeDelta::hours(36)));
        assert_eq!(parse_duration("P2W"), Ok(TimeDelta::days(14)));
    }

    #[test]
    fn duration_rejects_malformed() {
        assert!(parse_duration("30M").is_err());
        assert!(parse_duration("P").is_err());
        assert!(parse_duration("PT").is_err());
        assert!(parse_duration("P1DT").is_err());
        assert!(parse_duration("PT30").is_err());
        assert!(parse_duration("P1M").is_err());
        assert!(parse_duration("PTM").is_err());
        assert!(parse_duration("PT1X").is_err());
    }

    #[test]
    fn duration_rejects_repeated_or_out_of_order_designators() {
        assert!(parse_duration("PT1S1H").is_err());
        assert!(parse_duration("PT1H1H").is_err());
        assert!(parse_duration("P1D1W").is_err());
        assert!(parse_duration("P1DT1H1D").is_err());
    }

    #[test]
    fn parsed_payload_serializes_back_to_json() {
        let payload = json!({
            "forecasts": [
                {
                    "pv_estimate": "9.5",
                    "period_end": "2018-01-01T01:00:00.00000Z",
                    "period": "PT30M"
                },
                {"ghi": 690}
            ],
            "other": 1
        });

        let parsed = parse_periods(payload, "forecasts").expect("parse");
        let value = serde_json::to_value(&parsed).expect("serialize");
        assert_eq!(
            value,
            json!({
                "forecasts": [
                    {
                        "pv_estimate": "9.5",
                        "period_end": "2018-01-01T01:00:00Z",
                        "period": "PT1800S"
                    },
                    {"ghi": 690}
                ],
                "other": 1
            })
        );
    }
}
