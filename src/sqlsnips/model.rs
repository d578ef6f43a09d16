use crate::identity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// File extension of every snippet file.
pub const SNIPPET_EXT: &str = ".sql";

/// Schema version reported on snippet content.
pub const CONTENT_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Folder,
    File,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Folder => write!(f, "folder"),
            EntryKind::File => write!(f, "snippet"),
        }
    }
}

/// One node of a scanned tree. Rebuilt from disk on every call and dropped
/// afterwards; never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEntry {
    pub id: Uuid,
    pub name: String,
    pub kind: EntryKind,
    pub folder_id: Option<Uuid>,
    /// Directory the file lives in, `None` for root files and for folders.
    pub folder_name: Option<String>,
    pub content: String,
    /// False when the file held bytes that are not UTF-8 and `content` is a
    /// lossy rendering of them.
    pub content_is_utf8: bool,
    pub modified_at: DateTime<Utc>,
}

impl FsEntry {
    pub fn folder(name: impl Into<String>, modified_at: DateTime<Utc>) -> Self {
        let name = name.into();
        Self {
            id: identity::folder_id(&name),
            name,
            kind: EntryKind::Folder,
            folder_id: None,
            folder_name: None,
            content: String::new(),
            content_is_utf8: true,
            modified_at,
        }
    }

    /// `name` is the file name without the `.sql` extension.
    pub fn snippet(
        folder_name: Option<&str>,
        name: impl Into<String>,
        content: impl Into<String>,
        modified_at: DateTime<Utc>,
    ) -> Self {
        let name = name.into();
        let folder_id = folder_name.map(identity::folder_id);
        Self {
            id: identity::snippet_id(folder_id.as_ref(), &name),
            name,
            kind: EntryKind::File,
            folder_id,
            folder_name: folder_name.map(str::to_string),
            content: content.into(),
            content_is_utf8: true,
            modified_at,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Files carry no sharing metadata, so every snippet is `user`.
pub enum Visibility {
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetContent {
    pub sql: String,
    pub schema_version: String,
}

impl SnippetContent {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            schema_version: CONTENT_SCHEMA_VERSION.to_string(),
        }
    }
}

/// A named SQL text backed by one `.sql` file.
///
/// No creation time is tracked on disk, so `inserted_at` and `updated_at`
/// are both the file's modification time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub content: SnippetContent,
    pub folder_id: Option<Uuid>,
    pub visibility: Visibility,
    pub favorite: bool,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Snippet {
    pub fn from_entry(entry: &FsEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.clone(),
            description: String::new(),
            content: SnippetContent::new(entry.content.clone()),
            folder_id: entry.folder_id,
            visibility: Visibility::User,
            favorite: false,
            inserted_at: entry.modified_at,
            updated_at: entry.modified_at,
        }
    }
}

/// A one-level grouping of snippets backed by one subdirectory of the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: Uuid,
    pub name: String,
    /// Always `None`: folders never nest.
    pub parent_id: Option<Uuid>,
}

impl Folder {
    pub fn from_entry(entry: &FsEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.clone(),
            parent_id: None,
        }
    }
}

/// Input for creating a snippet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetDraft {
    pub name: String,
    pub sql: String,
    pub folder_id: Option<Uuid>,
}

impl SnippetDraft {
    pub fn new(name: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql: sql.into(),
            folder_id: None,
        }
    }

    pub fn in_folder(mut self, folder_id: Uuid) -> Self {
        self.folder_id = Some(folder_id);
        self
    }
}

/// Partial update of a snippet. Absent fields keep their current value.
///
/// `folder_id` is doubly optional: `Some(None)` moves the snippet to the root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetPatch {
    pub name: Option<String>,
    pub folder_id: Option<Option<Uuid>>,
    pub sql: Option<String>,
}

impl SnippetPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_folder(mut self, folder_id: Option<Uuid>) -> Self {
        self.folder_id = Some(folder_id);
        self
    }

    pub fn with_sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = Some(sql.into());
        self
    }
}

impl From<SnippetDraft> for SnippetPatch {
    fn from(draft: SnippetDraft) -> Self {
        Self {
            name: Some(draft.name),
            folder_id: Some(draft.folder_id),
            sql: Some(draft.sql),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SnippetCount {
    pub total: usize,
    pub private: usize,
    pub shared: usize,
    pub favorites: usize,
}
