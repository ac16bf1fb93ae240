// File: crates/sparkline-core/src/observation.rs
// Summary: Raw observation model ({value, timestamp}) and timestamp parsing into UTC instants.
// Notes:
// - Feeds deliver either `{price, timestamp}` or `{date, value}` records; both shapes
//   deserialize into `Observation` through field aliases.
// - Nothing here fails hard. Unparseable timestamps and non-numeric values surface as
//   `None` / NaN so the sampler can drop them with the other invalid entries.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Epoch magnitudes at or above this are read as milliseconds, below as seconds.
pub const EPOCH_MILLIS_CUTOFF: f64 = 1e11;

/// Naive date-time layouts tried after RFC 3339. All are read as UTC.
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Timestamp as delivered by the API: an ISO-8601 string or an epoch number.
/// `Invalid` stands in for a missing, null or otherwise unusable field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Epoch(f64),
    Text(String),
    #[default]
    Invalid,
}

impl Timestamp {
    /// Parse into a UTC instant; `None` when the value cannot be interpreted.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Epoch(v) => epoch_to_datetime(*v),
            Timestamp::Text(s) => parse_text(s),
            Timestamp::Invalid => None,
        }
    }

    /// Milliseconds since the Unix epoch, the comparable form used for sorting.
    pub fn instant_ms(&self) -> Option<i64> {
        self.to_datetime().map(|dt| dt.timestamp_millis())
    }
}

impl From<&str> for Timestamp {
    fn from(s: &str) -> Self { Timestamp::Text(s.to_string()) }
}

impl From<String> for Timestamp {
    fn from(s: String) -> Self { Timestamp::Text(s) }
}

impl From<i64> for Timestamp {
    fn from(v: i64) -> Self { Timestamp::Epoch(v as f64) }
}

impl From<f64> for Timestamp {
    fn from(v: f64) -> Self { Timestamp::Epoch(v) }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self { Timestamp::Epoch(dt.timestamp_millis() as f64) }
}

fn epoch_to_datetime(v: f64) -> Option<DateTime<Utc>> {
    if !v.is_finite() { return None; }
    let ms = if v.abs() >= EPOCH_MILLIS_CUTOFF { v } else { v * 1000.0 };
    if ms.abs() >= i64::MAX as f64 { return None; }
    DateTime::<Utc>::from_timestamp_millis(ms.round() as i64)
}

fn parse_text(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() { return None; }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, layout) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| Utc.from_utc_datetime(&naive));
    }
    // Some endpoints send epoch values as strings.
    s.parse::<f64>().ok().and_then(epoch_to_datetime)
}

/// Which values are meaningful for a series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueDomain {
    /// Prices, index levels, market caps: strictly positive.
    #[default]
    Positive,
    /// Flows and percentage changes: any finite value, including negatives and zero.
    Signed,
}

impl ValueDomain {
    #[inline]
    pub fn accepts(&self, v: f64) -> bool {
        match self {
            ValueDomain::Positive => v.is_finite() && v > 0.0,
            ValueDomain::Signed => v.is_finite(),
        }
    }
}

/// A single timestamped scalar data point feeding a chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(alias = "price", default = "missing_value", deserialize_with = "number_or_text")]
    pub value: f64,
    #[serde(alias = "date", alias = "time", default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Timestamp,
}

impl Observation {
    pub fn new(value: f64, timestamp: impl Into<Timestamp>) -> Self {
        Self { value, timestamp: timestamp.into() }
    }

    /// Instant in epoch milliseconds when both the value and timestamp are usable
    /// under `domain`.
    pub fn valid_instant(&self, domain: ValueDomain) -> Option<i64> {
        if !domain.accepts(self.value) { return None; }
        self.timestamp.instant_ms()
    }
}

fn missing_value() -> f64 { f64::NAN }

/// Accept `12.5` as well as `"12.5"`; anything else becomes NaN and is filtered later.
fn number_or_text<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
        Other(IgnoredAny),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Num(v) => v,
        Raw::Text(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        Raw::Other(_) => f64::NAN,
    })
}

/// One bad timestamp must not fail the whole response; it becomes `Invalid` and the
/// sampler drops the record.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Epoch(f64),
        Text(String),
        Other(IgnoredAny),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Epoch(v) => Timestamp::Epoch(v),
        Raw::Text(s) => Timestamp::Text(s),
        Raw::Other(_) => Timestamp::Invalid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc3339_and_naive_forms_agree() {
        let a = Timestamp::from("2024-05-01T09:30:00Z").instant_ms();
        let b = Timestamp::from("2024-05-01 09:30:00").instant_ms();
        let c = Timestamp::from("2024-05-01T09:30").instant_ms();
        assert!(a.is_some());
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        let a = Timestamp::from("2024-05-01T18:30:00+09:00").instant_ms();
        let b = Timestamp::from("2024-05-01T09:30:00Z").instant_ms();
        assert_eq!(a, b);
    }

    #[test]
    fn bare_date_is_midnight_utc() {
        let ms = Timestamp::from("2024-01-02").instant_ms().unwrap();
        assert_eq!(ms, 1_704_153_600_000);
    }

    #[test]
    fn epoch_seconds_and_millis() {
        let secs = Timestamp::Epoch(1_704_153_600.0).instant_ms();
        let millis = Timestamp::Epoch(1_704_153_600_000.0).instant_ms();
        assert_eq!(secs, millis);
        assert_eq!(Timestamp::from("1704153600").instant_ms(), secs);
    }

    #[test]
    fn garbage_timestamps_are_none() {
        assert!(Timestamp::from("yesterday").instant_ms().is_none());
        assert!(Timestamp::from("").instant_ms().is_none());
        assert!(Timestamp::Epoch(f64::NAN).instant_ms().is_none());
        assert!(Timestamp::Epoch(f64::INFINITY).instant_ms().is_none());
    }

    #[test]
    fn domain_filters() {
        assert!(ValueDomain::Positive.accepts(0.01));
        assert!(!ValueDomain::Positive.accepts(0.0));
        assert!(!ValueDomain::Positive.accepts(-1.0));
        assert!(ValueDomain::Signed.accepts(-1.0));
        assert!(ValueDomain::Signed.accepts(0.0));
        assert!(!ValueDomain::Signed.accepts(f64::NAN));
    }

    #[test]
    fn deserializes_both_record_shapes() {
        let price: Observation =
            serde_json::from_str(r#"{"price": 101.5, "timestamp": "2024-05-01T09:30:00Z"}"#).unwrap();
        assert_eq!(price.value, 101.5);
        let dated: Observation =
            serde_json::from_str(r#"{"date": 1714555800000, "value": "-3.25"}"#).unwrap();
        assert_eq!(dated.value, -3.25);
        assert_eq!(dated.timestamp, Timestamp::Epoch(1_714_555_800_000.0));
    }

    #[test]
    fn non_numeric_value_becomes_nan() {
        let obs: Observation = serde_json::from_str(r#"{"value": "n/a", "date": "2024-05-01"}"#).unwrap();
        assert!(obs.value.is_nan());
        assert!(obs.valid_instant(ValueDomain::Signed).is_none());
        let null: Observation = serde_json::from_str(r#"{"value": null, "date": "2024-05-01"}"#).unwrap();
        assert!(null.value.is_nan());
        let missing: Observation = serde_json::from_str(r#"{"date": "2024-05-01"}"#).unwrap();
        assert!(missing.value.is_nan());
    }

    #[test]
    fn unusable_timestamps_deserialize_as_invalid() {
        for body in [
            r#"{"price": 1.0, "timestamp": null}"#,
            r#"{"price": 1.0, "timestamp": true}"#,
            r#"{"price": 1.0, "timestamp": {"secs": 5}}"#,
            r#"{"price": 1.0}"#,
        ] {
            let obs: Observation = serde_json::from_str(body).unwrap();
            assert_eq!(obs.timestamp, Timestamp::Invalid, "{body}");
            assert!(obs.valid_instant(ValueDomain::Positive).is_none());
        }
    }
}
