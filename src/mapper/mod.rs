//! HAR to collection mapping.
//!
//! `map` is a single pass over the parsed document: sort entries, derive
//! host variables, group into page folders and project every entry into a
//! request item with its response example.

pub mod body;
pub mod form_data;
pub mod grouping;
pub mod headers;
pub mod variables;

use crate::collection::{
    Collection, Folder, Info, Item, OriginalRequest, RequestItem, RequestSpec, ResponseSpec,
    COLLECTION_SCHEMA,
};
use crate::har::{Entry, Har, Response};
use crate::options::ProcessOptions;
use crate::urls::{display_name, host_of};
use chrono::{DateTime, FixedOffset};
use grouping::group_by_option;
use variables::UrlVariables;

pub const DEFAULT_COLLECTION_NAME: &str = "HAR To Postman Generated";
pub const DEFAULT_COLLECTION_DESCRIPTION: &str = "HAR To Postman Generated Collection";
pub const DEFAULT_COLLECTION_VERSION: &str = "2.0.0";
pub const DEFAULT_ITEM_NAME: &str = "Generated without pathname and method";
pub const NO_RESPONSE_CODE: &str = "no response code found";

/// Word used in response example names for well-known status codes
pub fn status_word(code: i64) -> &'static str {
    match code {
        200 => "successfully",
        201 => "created",
        202 => "accepted",
        204 => "no-content",
        304 => "not modified",
        403 => "forbidden",
        404 => "not found",
        _ => "",
    }
}

pub fn response_name(code: i64) -> String {
    if code == 0 {
        NO_RESPONSE_CODE.to_string()
    } else {
        format!("{} / {}", status_word(code), code)
    }
}

/// Collection name: the host of the first page title, then `fallback`,
/// then the default name
pub fn collection_name(har: &Har, fallback: Option<&str>) -> String {
    let from_pages = har.pages().first().and_then(|page| {
        let title = page.title.as_deref().unwrap_or("");
        match host_of(title) {
            Ok(host) => Some(host),
            Err(_) => Some(title.to_string()),
        }
    });

    from_pages
        .filter(|name| !name.is_empty())
        .or_else(|| fallback.filter(|f| !f.is_empty()).map(str::to_string))
        .unwrap_or_else(|| DEFAULT_COLLECTION_NAME.to_string())
}

pub fn collection_description(har: &Har) -> String {
    har.comment()
        .unwrap_or(DEFAULT_COLLECTION_DESCRIPTION)
        .to_string()
}

/// Start time of an entry. RFC 3339 first, then ISO 8601 with a basic
/// `+hhmm` offset.
fn started_at(entry: &Entry) -> Option<DateTime<FixedOffset>> {
    let s = entry.started_date_time.as_deref()?.trim();
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .ok()
}

/// Entries by start time; ties and unparseable times keep input order
pub fn sorted_entries(entries: &[Entry]) -> Vec<&Entry> {
    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by_key(|entry| started_at(entry));
    sorted
}

/// Maps one HAR document with fixed options and variables
struct Mapper<'a> {
    options: &'a ProcessOptions,
    variables: &'a UrlVariables,
}

impl Mapper<'_> {
    fn request_item(&self, entry: &Entry) -> RequestItem {
        let request = entry.request.clone().unwrap_or_default();
        let name = match entry.request.as_ref() {
            Some(r) => display_name(r.url()),
            None => DEFAULT_ITEM_NAME.to_string(),
        };

        let header = headers::request_headers(&request, self.options);
        let spec = RequestSpec {
            method: request.method().to_string(),
            url: self.variables.substitute(request.url()),
            header: (!header.is_empty()).then_some(header),
            body: body::request_body(&request, self.options),
        };

        let response = if self.options.include_responses {
            let default_response = Response::default();
            let har_response = entry.response.as_ref().unwrap_or(&default_response);
            vec![self.response(har_response, &spec)]
        } else {
            Vec::new()
        };

        RequestItem {
            name,
            request: spec,
            response,
        }
    }

    fn response(&self, response: &Response, request: &RequestSpec) -> ResponseSpec {
        let code = response.code();
        let body = body::response_body(response, self.options);

        ResponseSpec {
            name: response_name(code),
            code,
            status: response.status_text.clone(),
            header: headers::response_headers(response, self.options),
            original_request: OriginalRequest::from(request),
            preview_language: body.as_ref().map(|b| b.language),
            body: body.map(|b| b.text),
            cookie: headers::response_cookies(response, self.options),
        }
    }

    fn items(&self, entries: &[&Entry]) -> Vec<Item> {
        entries
            .iter()
            .map(|entry| Item::Request(self.request_item(entry)))
            .collect()
    }
}

/// Build the collection for a parsed HAR document
pub fn map(har: &Har, options: &ProcessOptions, fallback_name: Option<&str>) -> Collection {
    let entries = sorted_entries(har.entries());
    let variables = UrlVariables::from_entries(har.entries());
    let groups = group_by_option(&entries, har.pages(), options);
    tracing::debug!(
        "Mapping {} entries into {} folders with {} host variables",
        entries.len(),
        groups.len(),
        variables.variables().len()
    );

    let mapper = Mapper {
        options,
        variables: &variables,
    };

    let item = if groups.is_empty() {
        mapper.items(&entries)
    } else {
        groups
            .into_iter()
            .map(|group| {
                Item::Folder(Folder {
                    item: mapper.items(&group.entries),
                    name: group.name,
                    description: group.description,
                })
            })
            .collect()
    };

    Collection {
        info: Info {
            name: collection_name(har, fallback_name),
            description: collection_description(har),
            version: DEFAULT_COLLECTION_VERSION.to_string(),
            schema: COLLECTION_SCHEMA.to_string(),
        },
        item,
        variable: variables.into_variables(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::har::parse_str;
    use crate::options::FolderStrategy;

    const TWO_ENTRIES: &str = r#"{
        "log": {
            "comment": "captured locally",
            "pages": [{"id": "page_1", "title": "http://localhost:3000/", "startedDateTime": "2021-01-01T00:00:00Z"}],
            "entries": [
                {
                    "pageref": "page_1",
                    "startedDateTime": "2021-01-01T00:00:02Z",
                    "request": {"method": "POST", "url": "http://localhost:3000/users", "headers": [], "bodySize": 7,
                        "postData": {"mimeType": "application/json", "text": "{\"a\":1}"}},
                    "response": {"status": 201, "statusText": "Created", "headers": [],
                        "content": {"size": 2, "mimeType": "application/json", "text": "{}"}}
                },
                {
                    "pageref": "page_1",
                    "startedDateTime": "2021-01-01T00:00:01Z",
                    "request": {"method": "GET", "url": "http://localhost:3000/users?page=2", "headers": [], "bodySize": 0},
                    "response": {"status": 200, "headers": [], "content": {"size": 0}}
                }
            ]
        }
    }"#;

    #[test]
    fn test_status_names() {
        assert_eq!(response_name(200), "successfully / 200");
        assert_eq!(response_name(404), "not found / 404");
        assert_eq!(response_name(900), " / 900");
        assert_eq!(response_name(0), NO_RESPONSE_CODE);
    }

    #[test]
    fn test_map_sorts_and_groups() {
        let har = parse_str(TWO_ENTRIES).unwrap();
        let collection = map(&har, &ProcessOptions::default(), None);

        assert_eq!(collection.info.name, "localhost:3000");
        assert_eq!(collection.info.description, "captured locally");
        assert_eq!(collection.info.version, "2.0.0");
        assert_eq!(collection.variable.len(), 1);

        let Item::Folder(folder) = &collection.item[0] else {
            panic!("expected a folder");
        };
        assert_eq!(folder.name, "localhost:3000/");

        let requests = collection.requests();
        assert_eq!(requests[0].name, "localhost:3000/users?page=2");
        assert_eq!(requests[0].request.url, "{{baseUrl0}}/users?page=2");
        assert!(requests[0].request.header.is_none());
        assert!(requests[0].request.body.is_none());
        assert!(requests[0].response[0].body.is_none());
        assert_eq!(requests[1].response[0].name, "created / 201");
        assert_eq!(requests[1].response[0].status.as_deref(), Some("Created"));
    }

    #[test]
    fn test_flat_list_without_folders() {
        let har = parse_str(TWO_ENTRIES).unwrap();
        let options = ProcessOptions {
            folder_strategy: FolderStrategy::None,
            include_responses: false,
            ..Default::default()
        };
        let collection = map(&har, &options, None);
        assert_eq!(collection.item.len(), 2);
        assert!(collection.requests().iter().all(|r| r.response.is_empty()));
    }

    #[test]
    fn test_missing_request_and_response() {
        let har = parse_str(r#"{"log": {"entries": [{}]}}"#).unwrap();
        let collection = map(&har, &ProcessOptions::default(), Some("fallback"));
        assert_eq!(collection.info.name, "fallback");
        assert_eq!(collection.info.description, DEFAULT_COLLECTION_DESCRIPTION);

        let requests = collection.requests();
        assert_eq!(requests[0].name, DEFAULT_ITEM_NAME);
        assert_eq!(requests[0].response[0].name, NO_RESPONSE_CODE);
        assert!(requests[0].response[0].cookie.is_empty());
    }

    #[test]
    fn test_empty_log_degrades_to_empty_collection() {
        let collection = map(&Har::default(), &ProcessOptions::default(), None);
        assert_eq!(collection.info.name, DEFAULT_COLLECTION_NAME);
        assert!(collection.item.is_empty());
        assert!(collection.variable.is_empty());
    }

    #[test]
    fn test_collection_name_from_plain_title() {
        let har = parse_str(r#"{"log": {"pages": [{"id": "p", "title": "My page"}], "entries": []}}"#)
            .unwrap();
        assert_eq!(collection_name(&har, Some("file")), "My page");
    }

    #[test]
    fn test_sort_keeps_ties_and_unparseable_first() {
        let har = parse_str(
            r#"{"log": {"entries": [
                {"startedDateTime": "2021-01-01T00:00:01Z", "request": {"url": "http://a.test/1"}},
                {"startedDateTime": "not a date", "request": {"url": "http://a.test/2"}},
                {"startedDateTime": "2021-01-01T00:00:01Z", "request": {"url": "http://a.test/3"}}
            ]}}"#,
        )
        .unwrap();
        let urls: Vec<&str> = sorted_entries(har.entries())
            .iter()
            .map(|e| e.request.as_ref().map(|r| r.url()).unwrap_or(""))
            .collect();
        assert_eq!(urls, vec!["http://a.test/2", "http://a.test/1", "http://a.test/3"]);
    }

    #[test]
    fn test_sort_accepts_basic_offsets() {
        let har = parse_str(
            r#"{"log": {"entries": [
                {"startedDateTime": "2021-01-01T00:00:05.000+0000", "request": {"url": "http://a.test/later"}},
                {"startedDateTime": "2021-01-01T00:00:01Z", "request": {"url": "http://a.test/first"}},
                {"startedDateTime": "2021-01-01T02:00:03+0200", "request": {"url": "http://a.test/middle"}}
            ]}}"#,
        )
        .unwrap();
        let urls: Vec<&str> = sorted_entries(har.entries())
            .iter()
            .map(|e| e.request.as_ref().map(|r| r.url()).unwrap_or(""))
            .collect();
        assert_eq!(
            urls,
            vec!["http://a.test/first", "http://a.test/middle", "http://a.test/later"]
        );
    }
}
