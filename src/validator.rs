//! Structural check of a parsed HAR document.
//!
//! Only the shape the mapper relies on is required: a `log` object with an
//! `entries` array whose elements carry a `request`. Unknown fields are
//! always accepted.

use crate::error::{Error, Result, SchemaViolation};
use serde_json::{Map, Value};

const MUST_BE_OBJECT: &str = "must be object";
const MUST_BE_ARRAY: &str = "must be array";

fn required(property: &str) -> String {
    format!("must have required property '{}'", property)
}

fn check_log(log: &Map<String, Value>, violations: &mut Vec<SchemaViolation>) {
    if let Some(pages) = log.get("pages") {
        if !pages.is_array() {
            violations.push(SchemaViolation::new("/log/pages", MUST_BE_ARRAY));
        }
    }

    match log.get("entries") {
        None => violations.push(SchemaViolation::new("/log", required("entries"))),
        Some(Value::Array(entries)) => {
            for (i, entry) in entries.iter().enumerate() {
                let path = format!("/log/entries/{}", i);
                match entry {
                    Value::Object(entry) if !entry.contains_key("request") => {
                        violations.push(SchemaViolation::new(path, required("request")));
                    }
                    Value::Object(_) => {}
                    _ => violations.push(SchemaViolation::new(path, MUST_BE_OBJECT)),
                }
            }
        }
        Some(_) => violations.push(SchemaViolation::new("/log/entries", MUST_BE_ARRAY)),
    }
}

/// Every violation found in the document, in document order
pub fn violations(document: &Value) -> Vec<SchemaViolation> {
    let mut violations = Vec::new();
    let empty = Map::new();
    let root = match document {
        Value::Object(root) => root,
        Value::Null => &empty,
        _ => {
            violations.push(SchemaViolation::new("", MUST_BE_OBJECT));
            return violations;
        }
    };

    match root.get("log") {
        None => violations.push(SchemaViolation::new("", required("log"))),
        Some(Value::Object(log)) => check_log(log, &mut violations),
        Some(_) => violations.push(SchemaViolation::new("/log", MUST_BE_OBJECT)),
    }
    violations
}

/// Fail with a structural error when the document lacks the HAR shape
pub fn validate_structure(document: &Value) -> Result<()> {
    let violations = violations(document);
    if violations.is_empty() {
        Ok(())
    } else {
        tracing::debug!("HAR structure check found {} violations", violations.len());
        Err(Error::Structural { violations })
    }
}
