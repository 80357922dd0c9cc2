use crate::collection::{Cookie, KeyValue};
use crate::har::{self, Header};
use crate::options::ProcessOptions;
use chrono::DateTime;

pub const REQUEST_COOKIE_HEADER: &str = "Cookie";
pub const RESPONSE_COOKIE_HEADER: &str = "Set-Cookie";

/// HTTP/2 pseudo-headers, which have no HTTP/1.1 header equivalent
pub const PSEUDO_HEADERS: [&str; 4] = [":method", ":scheme", ":authority", ":path"];

/// Map HAR headers to collection key/value pairs
pub fn to_key_values(headers: &[Header]) -> Vec<KeyValue> {
    headers
        .iter()
        .map(|h| KeyValue::new(h.name.clone(), h.value()))
        .collect()
}

/// Remove every header named `name`, ignoring case
pub fn exclude_header(headers: Vec<KeyValue>, name: &str) -> Vec<KeyValue> {
    headers
        .into_iter()
        .filter(|h| !h.key.eq_ignore_ascii_case(name))
        .collect()
}

/// Keep cookie headers only when the options ask for them
pub fn filter_cookies(
    headers: Vec<KeyValue>,
    options: Option<&ProcessOptions>,
    cookie_header_name: &str,
) -> Vec<KeyValue> {
    let include = options.is_some_and(|o| o.include_cookies);
    if include && !headers.is_empty() {
        headers
    } else {
        exclude_header(headers, cookie_header_name)
    }
}

/// Drop HTTP/2 pseudo-headers
pub fn exclude_pseudo_headers(headers: Vec<KeyValue>) -> Vec<KeyValue> {
    PSEUDO_HEADERS
        .iter()
        .fold(headers, |headers, name| exclude_header(headers, name))
}

fn filtered(headers: &[Header], options: &ProcessOptions, cookie_header_name: &str) -> Vec<KeyValue> {
    let headers = filter_cookies(to_key_values(headers), Some(options), cookie_header_name);
    exclude_pseudo_headers(headers)
}

pub fn request_headers(request: &har::Request, options: &ProcessOptions) -> Vec<KeyValue> {
    filtered(&request.headers, options, REQUEST_COOKIE_HEADER)
}

pub fn response_headers(response: &har::Response, options: &ProcessOptions) -> Vec<KeyValue> {
    filtered(&response.headers, options, RESPONSE_COOKIE_HEADER)
}

/// Cookies set by a response, empty unless cookies are included.
///
/// `secure` is always written as `false`, whatever the capture says.
pub fn response_cookies(response: &har::Response, options: &ProcessOptions) -> Vec<Cookie> {
    if !options.include_cookies {
        return Vec::new();
    }

    response
        .cookies
        .iter()
        .map(|cookie| Cookie {
            name: cookie.name.clone(),
            value: cookie.value.clone().unwrap_or_default(),
            domain: cookie.domain.clone(),
            path: cookie.path.clone(),
            expires: cookie.expires.as_deref().and_then(epoch_seconds),
            http_only: cookie.http_only.unwrap_or(false),
            secure: false,
            same_site: cookie.same_site.clone(),
        })
        .collect()
}

/// Parse a cookie expiry (ISO 8601, RFC 2822 or plain seconds)
fn epoch_seconds(expires: &str) -> Option<i64> {
    let expires = expires.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(expires) {
        return Some(date.timestamp());
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(expires) {
        return Some(date.timestamp());
    }
    match expires.parse::<f64>() {
        Ok(seconds) if seconds.is_finite() => Some(seconds as i64),
        _ => {
            tracing::warn!("Ignoring unparseable cookie expiry: {}", expires);
            None
        }
    }
}
