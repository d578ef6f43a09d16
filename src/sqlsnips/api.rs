//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every snippet operation, whatever the client.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs**: ids arrive as strings and leave as `Uuid`s
//! - **Returns structured types** (`Snippet`, `Folder`, `Page<Snippet>`, ...)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **I/O operations**: no stdout, stderr, or formatting
//!
//! ## Id Parsing
//!
//! Clients hand over whatever id string they were given. A string that is not
//! a UUID cannot name any entry, so it is treated exactly like an unknown id:
//!
//! - snippet and folder lookups fail with `NotFound`
//! - a folder id used as a *target* (create, move) fails with `FolderNotFound`
//! - a cursor restarts from the first page
//! - a folder filter matches nothing
//! - bulk deletes skip it
//!
//! Parsing is lenient about case and braces, matching `Uuid::parse_str`.
//! Every method checks that the backend is configured before parsing, so an
//! unconfigured backend reports `NotConfigured` whatever the input.
//!
//! ## Generic Over StorageBackend
//!
//! `SnippetsApi<B: StorageBackend>`:
//! - Production: `SnippetsApi<FsBackend>`
//! - Testing: `SnippetsApi<MemBackend>`

use crate::commands::{self, browse::FolderContents};
use crate::error::{Result, SnippetError};
use crate::model::{Folder, Snippet, SnippetCount, SnippetDraft, SnippetPatch};
use crate::pagination::{ListQuery, Page, SortField, SortOrder};
use crate::store::StorageBackend;
use std::path::PathBuf;
use uuid::Uuid;

/// Listing parameters as clients send them: everything optional, ids and
/// enums still strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub search: Option<String>,
    pub limit: usize,
    pub cursor: Option<String>,
    /// `"name"`, anything else sorts by modification time.
    pub sort: Option<String>,
    /// `"desc"`, anything else is ascending.
    pub order: Option<String>,
    pub folder: Option<String>,
}

impl ListParams {
    pub fn to_query(&self) -> ListQuery {
        let sort = self
            .sort
            .as_deref()
            .and_then(|s| s.parse::<SortField>().ok())
            .unwrap_or_default();
        let order = self
            .order
            .as_deref()
            .and_then(|s| s.parse::<SortOrder>().ok())
            .unwrap_or_default();

        let mut query = ListQuery::new()
            .limit(self.limit)
            .after(self.cursor.as_deref().and_then(parse_id))
            .sorted_by(sort, order)
            .in_folder(self.folder.as_deref().map(folder_filter));
        if let Some(search) = &self.search {
            query = query.search(search.as_str());
        }
        query
    }
}

/// The main API facade for snippet operations.
pub struct SnippetsApi<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> SnippetsApi<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn list_snippets(&self, params: &ListParams) -> Result<Page<Snippet>> {
        self.backend.ensure_configured()?;
        commands::list::run(&self.backend, &params.to_query())
    }

    pub fn get_snippet(&self, id: &str) -> Result<Snippet> {
        self.backend.ensure_configured()?;
        let id = snippet_id(id)?;
        commands::get::run(&self.backend, &id)
    }

    pub fn create_snippet(&self, name: &str, sql: &str, folder: Option<&str>) -> Result<Snippet> {
        self.backend.ensure_configured()?;
        let draft = draft(name, sql, folder)?;
        commands::create::run(&self.backend, &draft)
    }

    /// `folder`: `None` keeps the current folder, `Some(None)` moves to the
    /// root, `Some(Some(id))` moves into folder `id`.
    pub fn update_snippet(
        &self,
        id: &str,
        name: Option<&str>,
        folder: Option<Option<&str>>,
        sql: Option<&str>,
    ) -> Result<Snippet> {
        self.backend.ensure_configured()?;
        let id = snippet_id(id)?;
        let patch = SnippetPatch {
            name: name.map(str::to_string),
            folder_id: folder.map(|f| f.map(target_folder_id).transpose()).transpose()?,
            sql: sql.map(str::to_string),
        };
        commands::update::run(&self.backend, &id, &patch)
    }

    /// Replaces snippet `id` if it exists, otherwise creates the snippet.
    pub fn put_snippet(
        &self,
        id: &str,
        name: &str,
        sql: &str,
        folder: Option<&str>,
    ) -> Result<Snippet> {
        self.backend.ensure_configured()?;
        let draft = draft(name, sql, folder)?;
        commands::update::create_or_replace(&self.backend, parse_id(id).as_ref(), &draft)
    }

    pub fn delete_snippet(&self, id: &str) -> Result<bool> {
        self.backend.ensure_configured()?;
        match parse_id(id) {
            Some(id) => commands::delete::run(&self.backend, &id),
            None => Ok(false),
        }
    }

    /// Each item may itself hold several comma-separated ids.
    pub fn delete_snippets<I: AsRef<str>>(&self, ids: &[I]) -> Result<Vec<Uuid>> {
        self.backend.ensure_configured()?;
        commands::delete::run_many(&self.backend, &parse_id_list(ids))
    }

    pub fn list_folders(&self, parent: Option<&str>) -> Result<Vec<Folder>> {
        self.backend.ensure_configured()?;
        let parent = parent.map(folder_filter);
        commands::folders::list(&self.backend, parent.as_ref())
    }

    pub fn create_folder(&self, name: &str) -> Result<Folder> {
        self.backend.ensure_configured()?;
        commands::folders::create(&self.backend, name)
    }

    pub fn delete_folder(&self, id: &str) -> Result<()> {
        self.backend.ensure_configured()?;
        let id = parse_id(id).ok_or_else(|| SnippetError::folder_not_found(id))?;
        commands::folders::delete(&self.backend, &id)
    }

    pub fn delete_folders<I: AsRef<str>>(&self, ids: &[I]) -> Result<Vec<Uuid>> {
        self.backend.ensure_configured()?;
        commands::folders::delete_many(&self.backend, &parse_id_list(ids))
    }

    /// Browses the root or one folder. `params.folder` is ignored in favor of
    /// `folder`.
    pub fn folder_contents(
        &self,
        folder: Option<&str>,
        params: &ListParams,
    ) -> Result<FolderContents> {
        self.backend.ensure_configured()?;
        let folder = folder.map(folder_filter);
        commands::browse::run(&self.backend, folder.as_ref(), &params.to_query())
    }

    pub fn count(&self, search: Option<&str>) -> Result<SnippetCount> {
        self.backend.ensure_configured()?;
        commands::count::run(&self.backend, search)
    }

    pub fn snippet_paths<I: AsRef<str>>(&self, ids: &[I]) -> Result<Vec<PathBuf>> {
        self.backend.ensure_configured()?;
        let ids = ids
            .iter()
            .map(|id| snippet_id(id.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        commands::paths::run(&self.backend, &ids)
    }
}

fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

fn snippet_id(raw: &str) -> Result<Uuid> {
    parse_id(raw).ok_or_else(|| SnippetError::snippet_not_found(raw))
}

fn target_folder_id(raw: &str) -> Result<Uuid> {
    parse_id(raw).ok_or_else(|| SnippetError::FolderNotFound(raw.to_string()))
}

/// Unparsable filters become the nil UUID, which no derived id ever equals.
fn folder_filter(raw: &str) -> Uuid {
    parse_id(raw).unwrap_or(Uuid::nil())
}

fn draft(name: &str, sql: &str, folder: Option<&str>) -> Result<SnippetDraft> {
    let mut draft = SnippetDraft::new(name, sql);
    if let Some(folder) = folder {
        draft = draft.in_folder(target_folder_id(folder)?);
    }
    Ok(draft)
}

fn parse_id_list<I: AsRef<str>>(ids: &[I]) -> Vec<Uuid> {
    ids.iter()
        .flat_map(|item| item.as_ref().split(','))
        .filter(|s| !s.trim().is_empty())
        .filter_map(parse_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity;
    use crate::store::memory::MemBackend;

    fn api() -> SnippetsApi<MemBackend> {
        SnippetsApi::new(MemBackend::new())
    }

    #[test]
    fn garbage_ids_are_not_found() {
        let api = api();
        assert!(api.get_snippet("not-a-uuid").unwrap_err().is_not_found());
        assert!(api
            .update_snippet("nope", Some("x"), None, None)
            .unwrap_err()
            .is_not_found());
        assert!(api.delete_folder("nope").unwrap_err().is_not_found());
        assert!(!api.delete_snippet("nope").unwrap());
    }

    #[test]
    fn garbage_target_folder_is_folder_not_found() {
        let api = api();
        let err = api.create_snippet("a", "", Some("nope")).unwrap_err();
        assert!(matches!(err, SnippetError::FolderNotFound(_)));
    }

    #[test]
    fn ids_parse_case_insensitively() {
        let api = api();
        let snippet = api.create_snippet("a", "select 1", None).unwrap();
        let upper = snippet.id.to_string().to_uppercase();
        assert_eq!(api.get_snippet(&upper).unwrap().id, snippet.id);
    }

    #[test]
    fn update_moves_between_folders() {
        let api = api();
        let folder = api.create_folder("reports").unwrap();
        let snippet = api.create_snippet("a", "q", None).unwrap();
        let folder_id = folder.id.to_string();

        let moved = api
            .update_snippet(&snippet.id.to_string(), None, Some(Some(&folder_id)), None)
            .unwrap();
        assert_eq!(moved.folder_id, Some(folder.id));

        let back = api
            .update_snippet(&moved.id.to_string(), None, Some(None), None)
            .unwrap();
        assert_eq!(back.id, snippet.id);
    }

    #[test]
    fn list_params_map_to_query() {
        let params = ListParams {
            search: Some("x".into()),
            limit: 5,
            cursor: Some("garbage".into()),
            sort: Some("name".into()),
            order: Some("desc".into()),
            folder: Some("garbage".into()),
        };
        let query = params.to_query();
        assert_eq!(query.search_term(), Some("x"));
        assert_eq!(query.limit, 5);
        assert_eq!(query.cursor, None);
        assert_eq!(query.sort, SortField::Name);
        assert_eq!(query.order, SortOrder::Desc);
        assert_eq!(query.folder, Some(Uuid::nil()));
    }

    #[test]
    fn garbage_folder_filter_lists_nothing() {
        let api = api();
        api.create_snippet("a", "", None).unwrap();
        let params = ListParams {
            folder: Some("garbage".into()),
            ..Default::default()
        };
        assert!(api.list_snippets(&params).unwrap().items.is_empty());
    }

    #[test]
    fn bulk_delete_splits_commas() {
        let api = api();
        let a = api.create_snippet("a", "", None).unwrap();
        let b = api.create_snippet("b", "", None).unwrap();
        let c = api.create_snippet("c", "", None).unwrap();

        let joined = format!("{},,{}", a.id, b.id);
        let removed = api.delete_snippets(&[joined.as_str(), "junk"]).unwrap();
        assert_eq!(removed, vec![a.id, b.id]);
        assert!(api.get_snippet(&c.id.to_string()).is_ok());
    }

    #[test]
    fn put_creates_then_replaces() {
        let api = api();
        let id = identity::snippet_id(None, "a").to_string();
        let created = api.put_snippet(&id, "a", "one", None).unwrap();
        assert_eq!(created.id.to_string(), id);

        let replaced = api.put_snippet(&id, "a", "two", None).unwrap();
        assert_eq!(replaced.content.sql, "two");
    }

    #[test]
    fn browse_root_and_folder() {
        let api = api();
        let folder = api.create_folder("reports").unwrap();
        api.create_snippet("inner", "", Some(&folder.id.to_string()))
            .unwrap();

        let root = api.folder_contents(None, &ListParams::default()).unwrap();
        assert_eq!(root.folders.len(), 1);
        assert!(root.contents.items.is_empty());

        let inside = api
            .folder_contents(Some(&folder.id.to_string()), &ListParams::default())
            .unwrap();
        assert_eq!(inside.contents.items.len(), 1);
    }
}
