//! `multipart/form-data` bodies: boundary lookup and part splitting.

use crate::collection::FormParam;
use crate::error::{Error, Result};
use crate::har::{PostParam, Request};
use regex::Regex;
use std::sync::OnceLock;

fn disposition_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)content-disposition:[^\r\n]*?\bname="([^"]*)""#)
            .expect("valid content-disposition regex")
    })
}

/// Boundary parameter of a `Content-Type` value, empty when there is none
pub fn boundary_from_content_type(value: &str) -> String {
    value
        .split(';')
        .map(str::trim)
        .find(|item| item.contains("boundary"))
        .and_then(|item| item.split('=').nth(1))
        .map(|boundary| boundary.trim().trim_matches('"').to_string())
        .unwrap_or_default()
}

/// Boundary declared by the request, read from its `Content-Type` header
/// and, failing that, from the post data MIME type
pub fn boundary_from_request(request: &Request) -> String {
    let from_header = request
        .header("content-type")
        .map(boundary_from_content_type)
        .unwrap_or_default();
    if !from_header.is_empty() {
        return from_header;
    }

    request
        .post_data
        .as_ref()
        .and_then(|p| p.mime_type.as_deref())
        .map(boundary_from_content_type)
        .unwrap_or_default()
}

pub fn params_to_form_data(params: &[PostParam]) -> Vec<FormParam> {
    params
        .iter()
        .map(|p| FormParam::text(p.name.clone(), p.value.clone().unwrap_or_default()))
        .collect()
}

/// Split a multipart body into its named text parts
pub fn parse_multipart(body: &str, boundary: &str) -> Result<Vec<FormParam>> {
    if boundary.is_empty() {
        return Err(Error::multipart("no boundary declared"));
    }

    // Delimiters start a line; the leading newline lets the first one open the body
    let delimiter = format!("\n--{}", boundary);
    let framed = format!("\n{}", body);
    let mut sections = framed.split(delimiter.as_str());
    // Preamble before the first delimiter
    sections.next();

    let mut parts = Vec::new();
    let mut closed = false;
    for section in sections {
        if section.starts_with("--") {
            closed = true;
            break;
        }
        let section = section.strip_prefix("\r\n").or_else(|| section.strip_prefix('\n'));
        let Some(section) = section else {
            return Err(Error::multipart("delimiter not followed by a line break"));
        };

        let (headers, content) = section
            .split_once("\r\n\r\n")
            .or_else(|| section.split_once("\n\n"))
            .ok_or_else(|| Error::multipart("part without header separator"))?;

        let name = disposition_name()
            .captures(headers)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| Error::multipart("part without a content-disposition name"))?;

        let value = content.strip_suffix('\r').unwrap_or(content);
        parts.push(FormParam::text(name, value));
    }

    if !closed && parts.is_empty() {
        return Err(Error::multipart(format!("boundary '{}' not found in body", boundary)));
    }
    Ok(parts)
}

/// Form fields of a multipart request.
///
/// Declared params win; an empty params list means the capture tool only
/// kept the raw text, which is then parsed with the request's boundary.
pub fn form_data_from_request(request: &Request) -> Vec<FormParam> {
    let Some(post_data) = request.post_data.as_ref() else {
        return Vec::new();
    };

    match post_data.params.as_deref() {
        Some(params) if !params.is_empty() => params_to_form_data(params),
        Some(_) => {
            let text = post_data.text.as_deref().unwrap_or("");
            let boundary = boundary_from_request(request);
            parse_multipart(text, &boundary).unwrap_or_else(|err| {
                tracing::warn!("{}; sending an empty form instead", err);
                Vec::new()
            })
        }
        None => Vec::new(),
    }
}
