//! Small URL helpers used for names, folders and variables.

use crate::error::{Error, Result};
use percent_encoding::percent_decode_str;
use url::Url;

/// Scheme and host of a URL, as written in the source string
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProtocolAndHost {
    /// `"http://"`-style prefix, empty when the URL has no `//`
    pub protocol: String,
    pub host: String,
}

impl ProtocolAndHost {
    /// The `scheme://host` prefix this URL starts with
    pub fn base(&self) -> String {
        format!("{}{}", self.protocol, self.host)
    }
}

/// Split a URL on its first `//` into protocol and host.
///
/// Never fails: without `//` the protocol is empty and the host is the
/// leading segment up to the first `/`.
pub fn split_protocol_and_host(url: &str) -> ProtocolAndHost {
    let leading_segment = |rest: &str| rest.split('/').next().unwrap_or("").to_string();

    match url.split_once("//") {
        Some((scheme, rest)) => ProtocolAndHost {
            protocol: format!("{}//", scheme),
            host: leading_segment(rest),
        },
        None => ProtocolAndHost {
            protocol: String::new(),
            host: leading_segment(url),
        },
    }
}

fn parse(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|source| Error::MalformedUrl {
        url: url.to_string(),
        source,
    })
}

/// Normalized URL without its `scheme://` prefix
pub fn strip_protocol(url: &str) -> Result<String> {
    let parsed = parse(url)?;
    let prefix = format!("{}://", parsed.scheme());
    let href = parsed.as_str();
    Ok(href.strip_prefix(&prefix).unwrap_or(href).to_string())
}

/// `host:port` of a URL, or just `host` when the port is the scheme default
pub fn host_of(url: &str) -> Result<String> {
    let parsed = parse(url)?;
    let host = parsed.host_str().unwrap_or("");
    Ok(match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Decode `%XX` escapes, reading `+` as a space.
///
/// Malformed escapes or escapes that do not form UTF-8 leave the input
/// untouched.
pub fn percent_decode(text: &str) -> String {
    let spaced = text.replace('+', " ");
    if has_malformed_escape(&spaced) {
        return text.to_string();
    }
    match percent_decode_str(&spaced).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => text.to_string(),
    }
}

fn has_malformed_escape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !(bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    })
}

/// Protocol-stripped, percent-decoded form of a URL used for display names.
/// Falls back to the raw string when it is not an absolute URL.
pub fn display_name(url: &str) -> String {
    match strip_protocol(url) {
        Ok(stripped) => percent_decode(&stripped),
        Err(err) => {
            tracing::debug!("Using raw text as name: {}", err);
            url.to_string()
        }
    }
}
