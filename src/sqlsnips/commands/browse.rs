use crate::error::Result;
use crate::model::{Folder, Snippet};
use crate::pagination::{ListQuery, Page};
use crate::store::StorageBackend;
use serde::Serialize;
use uuid::Uuid;

use super::{folders, list};

/// One level of the tree: its subfolders plus a page of its own snippets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderContents {
    pub folders: Vec<Folder>,
    pub contents: Page<Snippet>,
}

/// Browses the root (`folder = None`) or one folder. An unknown folder id is
/// simply empty. The search term of `query` still spans every folder.
pub fn run<B: StorageBackend>(
    backend: &B,
    folder: Option<&Uuid>,
    query: &ListQuery,
) -> Result<FolderContents> {
    let folders = folders::list(backend, folder)?;
    let query = query.clone().in_folder(folder.copied());
    let contents = list::run(backend, &query)?;
    Ok(FolderContents { folders, contents })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, folders};
    use crate::model::SnippetDraft;
    use crate::store::memory::MemBackend;

    #[test]
    fn root_shows_folders_and_root_snippets() {
        let backend = MemBackend::new();
        let folder = folders::create(&backend, "reports").unwrap();
        create::run(&backend, &SnippetDraft::new("top", "")).unwrap();
        create::run(&backend, &SnippetDraft::new("inner", "").in_folder(folder.id)).unwrap();

        let root = run(&backend, None, &ListQuery::new()).unwrap();
        assert_eq!(root.folders, vec![folder.clone()]);
        assert_eq!(root.contents.items.len(), 1);
        assert_eq!(root.contents.items[0].name, "top");

        let inside = run(&backend, Some(&folder.id), &ListQuery::new()).unwrap();
        assert!(inside.folders.is_empty());
        assert_eq!(inside.contents.items[0].name, "inner");
    }

    #[test]
    fn unknown_folder_is_empty() {
        let backend = MemBackend::new();
        let contents = run(&backend, Some(&Uuid::new_v4()), &ListQuery::new()).unwrap();
        assert!(contents.folders.is_empty());
        assert!(contents.contents.items.is_empty());
    }
}
