//! Error type shared by every stage of a HAR conversion.
//!
//! Input, parse and structural errors end a conversion before any mapping
//! happens and are reported as a failed validation result. Option errors are
//! returned to the caller. Body, multipart and URL errors never leave the
//! mapper: they are caught where they happen and replaced by a fallback.

use serde::Serialize;
use thiserror::Error;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, Error>;

/// Prefix of every structural validation message
pub const STRUCTURAL_ERROR_PREFIX: &str = "Invalid syntax provided for HAR content";

/// Message used when the input is not JSON
pub const PARSE_ERROR_MESSAGE: &str = "Cannot parse json object";

/// One failed check of the HAR structural validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaViolation {
    /// JSON pointer of the offending value, empty for the document root
    pub instance_path: String,
    /// Human readable reason, e.g. `must have required property 'log'`
    pub message: String,
}

impl SchemaViolation {
    pub fn new(instance_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            instance_path: instance_path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "\"{}\" {}", self.instance_path, self.message)
        }
    }
}

/// Discriminant of [`Error`], handy for matching without destructuring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Parse,
    Structural,
    OptionNotFound,
    OptionValue,
    BodyParse,
    MultipartParse,
    MalformedUrl,
}

#[derive(Debug, Error)]
pub enum Error {
    /// Missing, unreadable or mistyped input descriptor
    #[error("{0}")]
    Input(String),

    /// The input is not valid JSON
    #[error("Cannot parse json object")]
    Parse(#[source] serde_json::Error),

    /// The JSON document does not have the required HAR shape
    #[error("{}", format_structural(.violations))]
    Structural { violations: Vec<SchemaViolation> },

    /// An option id that the registry does not declare
    #[error("Option '{0}' is not supported")]
    OptionNotFound(String),

    /// A declared option with a value outside its allowed set
    #[error("{0}")]
    OptionValue(String),

    /// A JSON payload that could not be parsed
    #[error("Cannot parse body as JSON: {0}")]
    BodyParse(#[source] serde_json::Error),

    /// A multipart payload that could not be split into parts
    #[error("Cannot parse multipart body: {0}")]
    MultipartParse(String),

    /// A string that is not an absolute URL
    #[error("Invalid URL: {url}")]
    MalformedUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

fn format_structural(violations: &[SchemaViolation]) -> String {
    match violations.first() {
        Some(first) if !first.message.is_empty() => {
            format!("{STRUCTURAL_ERROR_PREFIX} {first}")
        }
        _ => STRUCTURAL_ERROR_PREFIX.to_string(),
    }
}

impl Error {
    pub fn input<S: Into<String>>(msg: S) -> Self {
        Self::Input(msg.into())
    }

    pub fn multipart<S: Into<String>>(msg: S) -> Self {
        Self::MultipartParse(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Input(_) => ErrorKind::Input,
            Error::Parse(_) => ErrorKind::Parse,
            Error::Structural { .. } => ErrorKind::Structural,
            Error::OptionNotFound(_) => ErrorKind::OptionNotFound,
            Error::OptionValue(_) => ErrorKind::OptionValue,
            Error::BodyParse(_) => ErrorKind::BodyParse,
            Error::MultipartParse(_) => ErrorKind::MultipartParse,
            Error::MalformedUrl { .. } => ErrorKind::MalformedUrl,
        }
    }

    /// Schema violations carried by a structural error
    pub fn violations(&self) -> &[SchemaViolation] {
        match self {
            Error::Structural { violations } => violations,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_message_uses_first_violation() {
        let err = Error::Structural {
            violations: vec![
                SchemaViolation::new("/log", "must have required property 'entries'"),
                SchemaViolation::new("/other", "ignored"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Invalid syntax provided for HAR content \"/log\" must have required property 'entries'"
        );
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn test_structural_message_at_root_has_no_path() {
        let err = Error::Structural {
            violations: vec![SchemaViolation::new("", "must have required property 'log'")],
        };
        assert_eq!(
            err.to_string(),
            "Invalid syntax provided for HAR content must have required property 'log'"
        );
    }

    #[test]
    fn test_structural_message_without_details() {
        let err = Error::Structural { violations: vec![] };
        assert_eq!(err.to_string(), STRUCTURAL_ERROR_PREFIX);

        let err = Error::Structural {
            violations: vec![SchemaViolation::new("", "")],
        };
        assert_eq!(err.to_string(), STRUCTURAL_ERROR_PREFIX);
    }

    #[test]
    fn test_parse_error_message() {
        let source = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        let err = Error::Parse(source);
        assert_eq!(err.to_string(), "Cannot parse json object");
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
