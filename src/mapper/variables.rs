//! `scheme://host` collection variables.
//!
//! Every distinct host prefix across the request URLs becomes one variable,
//! numbered by the position of the first URL that introduced it. Request
//! URLs then reference the variable instead of repeating the host.

use crate::collection::Variable;
use crate::har::Entry;
use crate::urls::split_protocol_and_host;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlVariables {
    variables: Vec<Variable>,
}

impl UrlVariables {
    /// Collect variables from entries in their recorded order
    pub fn from_entries(entries: &[Entry]) -> Self {
        let urls = entries
            .iter()
            .filter_map(|e| e.request.as_ref())
            .map(|r| r.url());
        Self::from_urls(urls)
    }

    pub fn from_urls<'a>(urls: impl IntoIterator<Item = &'a str>) -> Self {
        let mut seen_urls = HashSet::new();
        let mut seen_hosts = HashSet::new();
        let mut variables = Vec::new();

        let distinct = urls.into_iter().filter(|url| seen_urls.insert(*url));
        for (index, url) in distinct.enumerate() {
            let parts = split_protocol_and_host(url);
            if parts.host.is_empty() {
                continue;
            }
            let base = parts.base();
            if seen_hosts.insert(base.clone()) {
                variables.push(Variable {
                    key: format!("baseUrl{}", index),
                    value: base,
                });
            }
        }

        Self { variables }
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn into_variables(self) -> Vec<Variable> {
        self.variables
    }

    /// Replace the host prefix of `url` with its `{{key}}` reference.
    ///
    /// A prefix only matches on a host boundary, so `http://a.test` never
    /// rewrites `http://a.test.evil/`. Unmatched URLs come back unchanged.
    pub fn substitute(&self, url: &str) -> String {
        self.variables
            .iter()
            .find_map(|var| {
                let rest = url.strip_prefix(var.value.as_str())?;
                let on_boundary = rest.is_empty()
                    || rest.starts_with('/')
                    || rest.starts_with('?')
                    || rest.starts_with('#');
                on_boundary.then(|| format!("{{{{{}}}}}{}", var.key, rest))
            })
            .unwrap_or_else(|| url.to_string())
    }
}
