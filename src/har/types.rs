use super::de;
use serde::{Deserialize, Serialize};

/// Root HAR structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Har {
    #[serde(default, deserialize_with = "de::lenient")]
    pub log: Option<Log>,
}

/// Log object - the main container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    #[serde(default, deserialize_with = "de::lenient_opt_seq")]
    pub pages: Option<Vec<Page>>,
    #[serde(default, deserialize_with = "de::lenient_seq")]
    pub entries: Vec<Entry>,
    #[serde(default, deserialize_with = "de::text")]
    pub comment: Option<String>,
}

/// Page info
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default, deserialize_with = "de::text")]
    pub started_date_time: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub comment: Option<String>,
}

/// HTTP request/response entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(default, deserialize_with = "de::text")]
    pub pageref: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub started_date_time: Option<String>,
    #[serde(default, deserialize_with = "de::lenient")]
    pub request: Option<Request>,
    #[serde(default, deserialize_with = "de::lenient")]
    pub response: Option<Response>,
}

/// HTTP Request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(default, deserialize_with = "de::text")]
    pub method: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_seq")]
    pub headers: Vec<Header>,
    #[serde(default, deserialize_with = "de::lenient")]
    pub post_data: Option<PostData>,
    #[serde(default, deserialize_with = "de::number")]
    pub body_size: Option<f64>,
}

/// HTTP Response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default, deserialize_with = "de::number")]
    pub status: Option<f64>,
    #[serde(default, deserialize_with = "de::text")]
    pub status_text: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_seq")]
    pub headers: Vec<Header>,
    #[serde(default, deserialize_with = "de::lenient_seq")]
    pub cookies: Vec<Cookie>,
    #[serde(default, deserialize_with = "de::lenient")]
    pub content: Option<Content>,
}

/// Cookie
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    pub name: String,
    #[serde(default, deserialize_with = "de::text")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub path: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub domain: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub expires: Option<String>,
    #[serde(default, deserialize_with = "de::lenient")]
    pub http_only: Option<bool>,
    #[serde(default, deserialize_with = "de::lenient")]
    pub secure: Option<bool>,
    #[serde(default, deserialize_with = "de::text")]
    pub same_site: Option<String>,
}

/// Header
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    #[serde(default, deserialize_with = "de::text")]
    pub value: Option<String>,
}

/// POST data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    #[serde(default, deserialize_with = "de::text")]
    pub mime_type: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_opt_seq")]
    pub params: Option<Vec<PostParam>>,
    #[serde(default, deserialize_with = "de::text")]
    pub text: Option<String>,
}

/// POST parameter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostParam {
    pub name: String,
    #[serde(default, deserialize_with = "de::text")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub file_name: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub content_type: Option<String>,
}

/// Response content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default, deserialize_with = "de::number")]
    pub size: Option<f64>,
    #[serde(default, deserialize_with = "de::text")]
    pub mime_type: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub encoding: Option<String>,
}

// Helper implementations

impl Har {
    pub fn entries(&self) -> &[Entry] {
        self.log.as_ref().map(|l| l.entries.as_slice()).unwrap_or(&[])
    }

    pub fn pages(&self) -> &[Page] {
        self.log
            .as_ref()
            .and_then(|l| l.pages.as_deref())
            .unwrap_or(&[])
    }

    pub fn comment(&self) -> Option<&str> {
        self.log
            .as_ref()
            .and_then(|l| l.comment.as_deref())
            .filter(|c| !c.is_empty())
    }
}

impl Header {
    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

impl Request {
    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }

    pub fn method(&self) -> &str {
        self.method.as_deref().unwrap_or("")
    }

    /// Get a header value, matching the name case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value())
    }
}

impl Response {
    /// Status code as an integer, 0 when absent
    pub fn code(&self) -> i64 {
        self.status.map(|s| s as i64).unwrap_or(0)
    }
}

impl Content {
    /// Decode content if base64 encoded
    pub fn decoded_text(&self) -> Option<Vec<u8>> {
        let text = self.text.as_ref()?;

        if self.encoding.as_deref() == Some("base64") {
            use base64::{engine::general_purpose::STANDARD, Engine as _};
            STANDARD.decode(text.trim()).ok()
        } else {
            Some(text.as_bytes().to_vec())
        }
    }

    /// Get text content as string (decoding base64 if needed), falling back
    /// to the raw text when the payload is not UTF-8
    pub fn text_content(&self) -> Option<String> {
        self.decoded_text()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .or_else(|| self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_entry() {
        let har: Har = serde_json::from_str(
            r#"{"log": {"entries": [{"request": {"method": "GET", "url": "http://a.test/"}}]}}"#,
        )
        .unwrap();
        assert_eq!(har.entries().len(), 1);
        let entry = &har.entries()[0];
        assert_eq!(entry.request.as_ref().unwrap().url(), "http://a.test/");
        assert!(entry.response.is_none());
        assert!(har.pages().is_empty());
    }

    #[test]
    fn test_null_numbers_are_tolerated() {
        let har: Har = serde_json::from_str(
            r#"{"log": {"entries": [{
                "request": {"method": "GET", "url": "http://a.test/", "bodySize": null},
                "response": {"status": 200, "bodySize": null, "content": {"size": null}}
            }]}}"#,
        )
        .unwrap();
        let entry = &har.entries()[0];
        assert_eq!(entry.request.as_ref().unwrap().body_size, None);
        let response = entry.response.as_ref().unwrap();
        assert_eq!(response.code(), 200);
        assert_eq!(response.content.as_ref().unwrap().size, None);
    }

    #[test]
    fn test_unread_fields_are_ignored() {
        let har: Har = serde_json::from_str(
            r#"{"log": {"entries": [{
                "request": {"url": "http://a.test/", "cookies": "not a list", "bodySize": 3},
                "response": {"status": 200, "bodySize": "n/a",
                    "cookies": [{"name": "sid", "value": "1"}]}
            }]}}"#,
        )
        .unwrap();
        let entry = &har.entries()[0];
        assert_eq!(entry.request.as_ref().unwrap().body_size, Some(3.0));
        let response = entry.response.as_ref().unwrap();
        assert_eq!(response.cookies.len(), 1);
        assert_eq!(response.cookies[0].name, "sid");
    }

    #[test]
    fn test_malformed_header_is_dropped() {
        let request: Request = serde_json::from_str(
            r#"{"headers": [{"name": "Accept", "value": "*/*"}, {"value": "nameless"}]}"#,
        )
        .unwrap();
        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.header("accept"), Some("*/*"));
    }

    #[test]
    fn test_base64_content_is_decoded() {
        let content = Content {
            text: Some("aGVsbG8=".to_string()),
            encoding: Some("base64".to_string()),
            ..Default::default()
        };
        assert_eq!(content.text_content().as_deref(), Some("hello"));

        let broken = Content {
            text: Some("not base64!".to_string()),
            encoding: Some("base64".to_string()),
            ..Default::default()
        };
        assert_eq!(broken.text_content().as_deref(), Some("not base64!"));
    }
}
