//! Postman Collection v2.1 document model.
//!
//! Only the parts the mapper produces are modeled. Everything serializes to
//! the collection JSON layout Postman imports.

use serde::Serialize;

pub const COLLECTION_SCHEMA: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection {
    pub info: Info,
    pub item: Vec<Item>,
    pub variable: Vec<Variable>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    pub name: String,
    pub description: String,
    pub version: String,
    pub schema: String,
}

/// A folder or a request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Item {
    Folder(Folder),
    Request(RequestItem),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Folder {
    pub name: String,
    pub description: String,
    pub item: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestItem {
    pub name: String,
    pub request: RequestSpec,
    pub response: Vec<ResponseSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestSpec {
    pub method: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Vec<KeyValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormParam {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FormParam {
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            kind: "text".to_string(),
        }
    }
}

/// Syntax highlighting hint for a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Json,
    Xml,
    Html,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawOptions {
    pub raw: RawLanguage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawLanguage {
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RequestBody {
    Raw { raw: String, options: RawOptions },
    Formdata { formdata: Vec<FormParam> },
    Urlencoded { urlencoded: Vec<KeyValue> },
}

impl RequestBody {
    pub fn raw(text: impl Into<String>, language: Language) -> Self {
        RequestBody::Raw {
            raw: text.into(),
            options: RawOptions {
                raw: RawLanguage { language },
            },
        }
    }
}

/// Echo of the request a response answered
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OriginalRequest {
    pub method: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Vec<KeyValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
}

impl From<&RequestSpec> for OriginalRequest {
    fn from(request: &RequestSpec) -> Self {
        Self {
            method: request.method.clone(),
            url: request.url.clone(),
            header: request.header.clone(),
            body: request.body.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSpec {
    pub name: String,
    pub code: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub header: Vec<KeyValue>,
    pub original_request: OriginalRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(
        rename = "_postman_previewlanguage",
        skip_serializing_if = "Option::is_none"
    )]
    pub preview_language: Option<Language>,
    pub cookie: Vec<Cookie>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Expiry as seconds since the Unix epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<i64>,
    pub http_only: bool,
    pub secure: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub same_site: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub key: String,
    pub value: String,
}

impl Collection {
    /// Every request item, descending into folders
    pub fn requests(&self) -> Vec<&RequestItem> {
        fn walk<'a>(items: &'a [Item], out: &mut Vec<&'a RequestItem>) {
            for item in items {
                match item {
                    Item::Folder(folder) => walk(&folder.item, out),
                    Item::Request(request) => out.push(request),
                }
            }
        }

        let mut out = Vec::new();
        walk(&self.item, &mut out);
        out
    }
}
