//! Folder grouping of entries by HAR page.

use crate::har::{Entry, Page};
use crate::options::{FolderStrategy, ProcessOptions};
use crate::urls::display_name;

#[derive(Debug, Clone)]
pub struct Group<'a> {
    pub name: String,
    pub description: String,
    pub entries: Vec<&'a Entry>,
}

/// One group per page, in page order.
///
/// Entries whose `pageref` matches no page belong to no group.
pub fn group_by_page<'a>(entries: &[&'a Entry], pages: &[Page]) -> Vec<Group<'a>> {
    pages
        .iter()
        .map(|page| {
            let members = entries
                .iter()
                .copied()
                .filter(|e| page.id.is_some() && e.pageref == page.id)
                .collect();
            Group {
                name: display_name(page.title.as_deref().unwrap_or("")),
                description: page.comment.clone().unwrap_or_default(),
                entries: members,
            }
        })
        .collect()
}

/// Groups for the configured folder strategy, empty for a flat list
pub fn group_by_option<'a>(
    entries: &[&'a Entry],
    pages: &[Page],
    options: &ProcessOptions,
) -> Vec<Group<'a>> {
    match options.folder_strategy {
        FolderStrategy::Page => group_by_page(entries, pages),
        FolderStrategy::None => Vec::new(),
    }
}
