use crate::model::EntryKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnippetError {
    #[error(
        "snippets folder is not configured; set SNIPPETS_MANAGEMENT_FOLDER, pass --root, or run `sqlsnips config root <dir>`"
    )]
    NotConfigured,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{kind} not found: {id}")]
    NotFound { kind: EntryKind, id: String },

    #[error("{kind} already exists: {name}")]
    AlreadyExists { kind: EntryKind, name: String },

    #[error("snippet already exists in target folder: {0}")]
    ConflictInTargetFolder(String),

    #[error("folder not found: {0}")]
    FolderNotFound(String),

    #[error("a valid name is required")]
    NameRequired,

    #[error("snippet {0} is not valid UTF-8; supply new SQL to rewrite it")]
    NotUtf8(String),

    #[error("limit cannot exceed 1000 (got {0})")]
    LimitExceeded(usize),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl SnippetError {
    pub fn snippet_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: EntryKind::File,
            id: id.into(),
        }
    }

    pub fn folder_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: EntryKind::Folder,
            id: id.into(),
        }
    }

    /// True for the "absent" failures (`NotFound`), the ones a create-or-replace
    /// falls back on.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, SnippetError>;
