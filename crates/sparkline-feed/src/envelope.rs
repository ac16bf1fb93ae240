// File: crates/sparkline-feed/src/envelope.rs
// Summary: Response envelope handling; endpoints answer with a bare array or `{ "result": [...] }`.

use serde::Deserialize;
use sparkline_core::Observation;

use crate::Result;

/// Either response shape. Callers must accept both.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { result: Vec<T> },
    Bare(Vec<T>),
}

impl<T> Envelope<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Envelope::Wrapped { result } => result,
            Envelope::Bare(items) => items,
        }
    }
}

/// Parse a response body into observations, whichever envelope it uses.
pub fn parse_observations(body: &str) -> Result<Vec<Observation>> {
    let envelope: Envelope<Observation> = serde_json::from_str(body)?;
    Ok(envelope.into_items())
}
