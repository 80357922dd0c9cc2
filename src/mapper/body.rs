//! Body classification for requests and responses.
//!
//! The declared MIME type picks a handler from an ordered rule list:
//! JSON, XML, multipart form, URL-encoded form (including the legacy
//! capture heuristic), known text types, and finally "unsupported".
//! Payloads with a size of zero or less never get a body.

use crate::collection::{KeyValue, Language, RequestBody};
use crate::error::{Error, Result};
use crate::har::{PostParam, Request, Response};
use crate::mapper::form_data::form_data_from_request;
use crate::options::{IndentCharacter, ProcessOptions};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// What a payload looks like to the classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct Payload<'a> {
    pub mime_type: &'a str,
    pub text: Option<&'a str>,
    pub params: Option<&'a [PostParam]>,
    pub size: Option<f64>,
}

impl Payload<'_> {
    fn essence(&self) -> String {
        self.mime_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase()
    }

    fn has_body(&self) -> bool {
        self.size.is_some_and(|size| size > 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Json,
    Xml,
    FormData,
    UrlEncoded,
    Text(Language),
    Unsupported,
}

struct Rule {
    matches: fn(&Payload) -> bool,
    kind: BodyKind,
}

const RULES: [Rule; 6] = [
    Rule {
        matches: |p| p.essence() == "application/json",
        kind: BodyKind::Json,
    },
    Rule {
        matches: |p| p.essence() == "application/xml",
        kind: BodyKind::Xml,
    },
    Rule {
        matches: |p| p.mime_type.to_ascii_lowercase().contains("multipart/form-data"),
        kind: BodyKind::FormData,
    },
    Rule {
        matches: |p| {
            p.mime_type
                .to_ascii_lowercase()
                .contains("application/x-www-form-urlencoded")
                || is_legacy_url_encoded(p)
        },
        kind: BodyKind::UrlEncoded,
    },
    Rule {
        matches: |p| p.essence() == "text/html",
        kind: BodyKind::Text(Language::Html),
    },
    Rule {
        matches: |p| {
            matches!(
                p.essence().as_str(),
                "text/css" | "text/plain" | "text/javascript" | "application/javascript"
            )
        },
        kind: BodyKind::Text(Language::Text),
    },
];

/// First matching rule wins; nothing matching is unsupported
pub fn classify(payload: &Payload) -> BodyKind {
    RULES
        .iter()
        .find(|rule| (rule.matches)(payload))
        .map(|rule| rule.kind)
        .unwrap_or(BodyKind::Unsupported)
}

fn url_encoded_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^=&]+=[^&]*(?:&[^=&]+=[^&]*)*$").expect("valid url-encoded regex")
    })
}

fn url_encoded_pair() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^=&]+=[^&]*").expect("valid url-encoded pair regex"))
}

/// Some capture tools (Safari) record URL-encoded forms with no MIME type
/// and no params, only the raw `key=value&...` text.
fn is_legacy_url_encoded(payload: &Payload) -> bool {
    if !payload.mime_type.trim().is_empty() || payload.params.is_some_and(|p| !p.is_empty()) {
        return false;
    }
    let Some(text) = payload.text.filter(|t| !t.is_empty()) else {
        return false;
    };

    url_encoded_shape().is_match(text)
        && url_encoded_pair().find_iter(text).count() == text.split('&').count()
}

/// Re-serialize JSON text with the configured indentation
pub fn format_json(text: &str, indent: &IndentCharacter) -> Result<String> {
    if text.is_empty() {
        return Ok(String::new());
    }

    let value: serde_json::Value = serde_json::from_str(text).map_err(Error::BodyParse)?;
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_str().as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer).map_err(Error::BodyParse)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn json_or_raw(text: &str, options: &ProcessOptions) -> String {
    format_json(text, &options.indent_character).unwrap_or_else(|err| {
        tracing::warn!("{}; keeping the body unformatted", err);
        text.to_string()
    })
}

/// Key/value pairs of a URL-encoded form, from params or from the raw text
pub fn url_encoded_pairs(params: Option<&[PostParam]>, text: &str) -> Vec<KeyValue> {
    match params {
        Some(params) if !params.is_empty() => params
            .iter()
            .map(|p| KeyValue::new(p.name.clone(), p.value.clone().unwrap_or_default()))
            .collect(),
        _ => text
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => KeyValue::new(key, value),
                None => KeyValue::new(pair, ""),
            })
            .collect(),
    }
}

/// Body of a request item, `None` when the request carries no usable body
pub fn request_body(request: &Request, options: &ProcessOptions) -> Option<RequestBody> {
    let post_data = request.post_data.as_ref();
    let payload = Payload {
        mime_type: post_data.and_then(|p| p.mime_type.as_deref()).unwrap_or(""),
        text: post_data.and_then(|p| p.text.as_deref()),
        params: post_data.and_then(|p| p.params.as_deref()),
        size: request.body_size,
    };
    if !payload.has_body() {
        return None;
    }

    let text = payload.text.unwrap_or("");
    match classify(&payload) {
        BodyKind::Json => Some(RequestBody::raw(json_or_raw(text, options), Language::Json)),
        BodyKind::Xml => Some(RequestBody::raw(text, Language::Xml)),
        BodyKind::Text(language) => Some(RequestBody::raw(text, language)),
        BodyKind::FormData => Some(RequestBody::Formdata {
            formdata: form_data_from_request(request),
        }),
        BodyKind::UrlEncoded => Some(RequestBody::Urlencoded {
            urlencoded: url_encoded_pairs(payload.params, text),
        }),
        BodyKind::Unsupported => {
            tracing::debug!("No body mapping for request MIME type '{}'", payload.mime_type);
            None
        }
    }
}

/// Body of a response example with its preview language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseBody {
    pub text: String,
    pub language: Language,
}

impl ResponseBody {
    fn new(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: text.into(),
            language,
        }
    }
}

pub fn unsupported_message(mime_type: &str) -> String {
    format!("{} content type is not supported in the response body", mime_type)
}

/// Body of a response example, `None` when the response has no content
pub fn response_body(response: &Response, options: &ProcessOptions) -> Option<ResponseBody> {
    let content = response.content.as_ref()?;
    let text = content.text_content();
    let payload = Payload {
        mime_type: content.mime_type.as_deref().unwrap_or(""),
        text: text.as_deref(),
        params: None,
        size: content.size,
    };
    if !payload.has_body() {
        return None;
    }

    // Form kinds only describe request payloads
    let language = match classify(&payload) {
        BodyKind::Json => Language::Json,
        BodyKind::Xml => Language::Xml,
        BodyKind::Text(language) => language,
        BodyKind::FormData | BodyKind::UrlEncoded | BodyKind::Unsupported => {
            return Some(ResponseBody::new(
                unsupported_message(payload.mime_type),
                Language::Text,
            ));
        }
    };

    let text = payload.text?;
    Some(match language {
        Language::Json => ResponseBody::new(json_or_raw(text, options), Language::Json),
        _ => ResponseBody::new(text, language),
    })
}
