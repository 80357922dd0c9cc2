pub mod de;
pub mod types;

pub use types::*;

use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

/// Parse HAR text into a generic JSON document
pub fn parse_json(s: &str) -> Result<Value> {
    serde_json::from_str(s).map_err(Error::Parse)
}

/// Parse HAR from a string
pub fn parse_str(s: &str) -> Result<Har> {
    parse_json(s).map(|value| from_value(&value))
}

/// Build the typed HAR model from an already parsed document.
///
/// Never fails: fields that do not fit the model are dropped by the
/// tolerant deserializers, and anything else degrades to an empty log.
pub fn from_value(value: &Value) -> Har {
    Har::deserialize(value).unwrap_or_else(|err| {
        tracing::warn!("HAR document does not fit the model, using an empty log: {}", err);
        Har::default()
    })
}
