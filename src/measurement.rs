use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// A single measured production value for a site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    #[serde(serialize_with = "serialize_period_end")]
    pub period_end: DateTime<Utc>,
    /// ISO-8601 duration of the averaging period, e.g. `PT5M`.
    pub period: String,
    /// Average power over the period, in kW.
    pub total_power: f64,
}

impl Measurement {
    pub fn new(period_end: DateTime<Utc>, period: impl Into<String>, total_power: f64) -> Self {
        Self {
            period_end,
            period: period.into(),
            total_power,
        }
    }
}

fn serialize_period_end<S: Serializer>(
    value: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

/// Upload body for the `measurements` endpoint.
///
/// The API accepts either one `measurement` object or a `measurements` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Measurements {
    #[serde(rename = "measurement")]
    Single(Measurement),
    #[serde(rename = "measurements")]
    Batch(Vec<Measurement>),
}

impl From<Measurement> for Measurements {
    fn from(m: Measurement) -> Self {
        Measurements::Single(m)
    }
}

impl From<Vec<Measurement>> for Measurements {
    fn from(v: Vec<Measurement>) -> Self {
        Measurements::Batch(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample() -> Measurement {
        Measurement::new(
            Utc.with_ymd_and_hms(2018, 2, 2, 3, 30, 0).unwrap(),
            "PT5M",
            1.23456,
        )
    }

    #[test]
    fn single_measurement_shape() {
        let body = serde_json::to_value(Measurements::from(sample())).expect("serialize");
        assert_eq!(
            body,
            json!({
                "measurement": {
                    "period_end": "2018-02-02T03:30:00Z",
                    "period": "PT5M",
                    "total_power": 1.23456
                }
            })
        );
    }

    #[test]
    fn batch_measurement_shape() {
        let body = serde_json::to_value(Measurements::from(vec![sample(), sample()]))
            .expect("serialize");
        let items = body["measurements"].as_array().expect("array");
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["period"], json!("PT5M"));
    }
}
