//! # Sorting and Cursor Pagination
//!
//! Pages are cut from a freshly scanned, filtered and sorted entry list. A
//! cursor is just the id of the last item of the previous page, so it stays
//! meaningful across calls without any server-side state.
//!
//! Two leniencies are part of the contract:
//! - an unknown cursor restarts from the first page instead of failing;
//! - a limit of zero means [`DEFAULT_LIMIT`].

use crate::error::{Result, SnippetError};
use crate::model::FsEntry;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

pub const DEFAULT_LIMIT: usize = 100;
pub const MAX_LIMIT: usize = 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    /// File modification time. Anything that is not `name` sorts by this.
    #[default]
    UpdatedAt,
}

impl FromStr for SortField {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(if s == "name" {
            SortField::Name
        } else {
            SortField::UpdatedAt
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(if s == "desc" {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        })
    }
}

/// Parameters of a snippet listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Case-insensitive name substring. When non-empty, `folder` is ignored
    /// and every folder is searched.
    pub search: Option<String>,
    /// Page size; `0` means [`DEFAULT_LIMIT`].
    pub limit: usize,
    pub cursor: Option<Uuid>,
    pub sort: SortField,
    pub order: SortOrder,
    /// Exact folder membership; `None` selects root snippets only.
    pub folder: Option<Uuid>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn after(mut self, cursor: Option<Uuid>) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn sorted_by(mut self, sort: SortField, order: SortOrder) -> Self {
        self.sort = sort;
        self.order = order;
        self
    }

    pub fn in_folder(mut self, folder: Option<Uuid>) -> Self {
        self.folder = folder;
        self
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|t| !t.is_empty())
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Id of the last returned item, present only when more items follow.
    pub next_cursor: Option<Uuid>,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
        }
    }
}

/// Resolves the effective page size, rejecting anything above [`MAX_LIMIT`].
pub fn effective_limit(limit: usize) -> Result<usize> {
    match limit {
        0 => Ok(DEFAULT_LIMIT),
        n if n > MAX_LIMIT => Err(SnippetError::LimitExceeded(n)),
        n => Ok(n),
    }
}

/// Stable sort; descending order is the ascending order reversed, so ties
/// come out in reverse scan order too.
pub fn sort_entries(entries: &mut [FsEntry], sort: SortField, order: SortOrder) {
    match sort {
        SortField::Name => entries.sort_by_cached_key(|e| e.name.to_lowercase()),
        SortField::UpdatedAt => entries.sort_by_key(|e| e.modified_at),
    }
    if order == SortOrder::Desc {
        entries.reverse();
    }
}

/// Cuts one page out of an already filtered and sorted list.
pub fn paginate(entries: Vec<FsEntry>, cursor: Option<&Uuid>, limit: usize) -> Page<FsEntry> {
    let start = cursor
        .and_then(|c| entries.iter().position(|e| &e.id == c))
        .map(|idx| idx + 1)
        .unwrap_or(0);

    let mut items: Vec<FsEntry> = entries.into_iter().skip(start).collect();
    let next_cursor = if items.len() > limit {
        items.truncate(limit);
        items.last().map(|e| e.id)
    } else {
        None
    };

    Page { items, next_cursor }
}
