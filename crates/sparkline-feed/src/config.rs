// File: crates/sparkline-feed/src/config.rs
// Summary: Remote key/string configuration (titles, counts, toggles) with client-side defaults.
// Notes:
// - Values are stored as strings exactly as the config service sends them; typed getters
//   parse on read and fall back to the caller's default on a missing or unparsable key.

use std::collections::HashMap;

use serde::Deserialize;
use sparkline_core::SampleOptions;

use crate::Result;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RemoteConfig {
    values: HashMap<String, String>,
}

#[derive(Deserialize)]
struct Entry {
    key: String,
    value: serde_json::Value,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Wrapped { result: Vec<Entry> },
    Entries(Vec<Entry>),
    Map(HashMap<String, serde_json::Value>),
}

fn stringify(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

impl RemoteConfig {
    pub fn new() -> Self { Self::default() }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Merge a config payload. Accepts `{ "k": v }`, `[{ "key": k, "value": v }]`,
    /// or the latter wrapped in `{ "result": [...] }`. Later keys win.
    pub fn merge_json(&mut self, body: &str) -> Result<usize> {
        let pairs: Vec<(String, serde_json::Value)> = match serde_json::from_str::<Payload>(body)? {
            Payload::Map(map) => map.into_iter().collect(),
            Payload::Entries(entries) | Payload::Wrapped { result: entries } => {
                entries.into_iter().map(|e| (e.key, e.value)).collect()
            }
        };
        let merged = pairs.len();
        for (key, value) in pairs {
            self.values.insert(key, stringify(value));
        }
        tracing::debug!(merged, total = self.values.len(), "remote config merged");
        Ok(merged)
    }

    pub fn contains(&self, key: &str) -> bool { self.values.contains_key(key) }

    pub fn len(&self) -> usize { self.values.len() }

    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.values.get(key).map(String::as_str).unwrap_or(default)
    }

    pub fn get_usize(&self, key: &str, default: usize) -> usize {
        self.parse_or(key, default, |raw| raw.trim().parse().ok())
    }

    pub fn get_f64(&self, key: &str, default: f64) -> f64 {
        self.parse_or(key, default, |raw| raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
    }

    /// `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`, case-insensitive.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.parse_or(key, default, |raw| match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        })
    }

    /// Overlay `{prefix}.max_points`, `{prefix}.flat_threshold`, `{prefix}.fill` and
    /// `{prefix}.padding` onto `base`.
    pub fn sample_options(&self, prefix: &str, base: SampleOptions) -> SampleOptions {
        let key = |name: &str| format!("{prefix}.{name}");
        let mut options = base;
        if self.contains(&key("max_points")) {
            options.max_points = Some(self.get_usize(&key("max_points"), options.max_points.unwrap_or(0)))
                .filter(|&n| n > 0);
        }
        options.flat_threshold = self.get_f64(&key("flat_threshold"), options.flat_threshold);
        options.with_fill = self.get_bool(&key("fill"), options.with_fill);
        options.padding_ratio = self.get_f64(&key("padding"), options.padding_ratio);
        options
    }

    fn parse_or<T>(&self, key: &str, default: T, parse: impl FnOnce(&str) -> Option<T>) -> T {
        match self.values.get(key) {
            None => default,
            Some(raw) => parse(raw).unwrap_or_else(|| {
                tracing::warn!(key, value = %raw, "unparsable config value; using default");
                default
            }),
        }
    }
}
