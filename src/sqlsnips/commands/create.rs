use crate::error::{Result, SnippetError};
use crate::identity;
use crate::model::{EntryKind, FsEntry, Snippet, SnippetDraft};
use crate::sanitize::sanitize;
use crate::store::StorageBackend;

use super::helpers::{find_snippet, target_folder};

pub fn run<B: StorageBackend>(backend: &B, draft: &SnippetDraft) -> Result<Snippet> {
    // Rejected names never reach the disk, not even for a scan
    backend.ensure_configured()?;
    if sanitize(&draft.name).is_empty() {
        return Err(SnippetError::NameRequired);
    }
    let entries = backend.scan()?;
    write_new(backend, &entries, draft)
}

/// Writes `draft` as a new file against an already scanned tree.
pub(super) fn write_new<B: StorageBackend>(
    backend: &B,
    entries: &[FsEntry],
    draft: &SnippetDraft,
) -> Result<Snippet> {
    let name = sanitize(&draft.name);
    if name.is_empty() {
        return Err(SnippetError::NameRequired);
    }
    let folder = target_folder(entries, draft.folder_id.as_ref())?;

    let id = identity::snippet_id(draft.folder_id.as_ref(), &name);
    if find_snippet(entries, &id).is_some() {
        return Err(SnippetError::AlreadyExists {
            kind: EntryKind::File,
            name,
        });
    }

    let modified_at = backend.write_snippet(folder, &name, &draft.sql)?;
    Ok(Snippet::from_entry(&FsEntry::snippet(
        folder,
        name,
        draft.sql.as_str(),
        modified_at,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::get;
    use crate::store::memory::MemBackend;
    use uuid::Uuid;

    #[test]
    fn creates_at_root_with_derived_id() {
        let backend = MemBackend::new();
        let snippet = run(&backend, &SnippetDraft::new("a", "select 1")).unwrap();

        assert_eq!(
            snippet.id.to_string(),
            "6acd8c03-4c0e-4e34-8202-00dca1e2ccd6"
        );
        assert_eq!(snippet.folder_id, None);
        assert_eq!(get::run(&backend, &snippet.id).unwrap(), snippet);
    }

    #[test]
    fn creates_inside_folder() {
        let backend = MemBackend::new();
        backend.create_folder("reports").unwrap();
        let folder = identity::folder_id("reports");

        let snippet = run(&backend, &SnippetDraft::new("a", "select 1").in_folder(folder)).unwrap();
        assert_eq!(
            snippet.id.to_string(),
            "46880f18-d328-4b29-be78-d346d72e74e0"
        );
        assert_eq!(snippet.folder_id, Some(folder));
    }

    #[test]
    fn duplicate_name_in_same_place_fails() {
        let backend = MemBackend::new();
        run(&backend, &SnippetDraft::new("a", "one")).unwrap();
        let err = run(&backend, &SnippetDraft::new("a", "two")).unwrap_err();
        assert!(matches!(
            err,
            SnippetError::AlreadyExists {
                kind: EntryKind::File,
                ..
            }
        ));
        assert_eq!(get::run(&backend, &identity::snippet_id(None, "a")).unwrap().content.sql, "one");
    }

    #[test]
    fn same_name_in_other_folder_is_fine() {
        let backend = MemBackend::new();
        backend.create_folder("f").unwrap();
        run(&backend, &SnippetDraft::new("a", "")).unwrap();
        run(&backend, &SnippetDraft::new("a", "").in_folder(identity::folder_id("f"))).unwrap();
        assert_eq!(backend.file_count(), 2);
    }

    #[test]
    fn invalid_names_write_nothing() {
        let backend = MemBackend::new();
        for name in ["", "..", "../../etc/passwd", "a/b"] {
            let err = run(&backend, &SnippetDraft::new(name, "")).unwrap_err();
            assert!(matches!(err, SnippetError::NameRequired), "{name}");
        }
        assert_eq!(backend.file_count(), 0);
    }

    #[test]
    fn unknown_folder_is_rejected() {
        let backend = MemBackend::new();
        let err = run(&backend, &SnippetDraft::new("a", "").in_folder(Uuid::new_v4())).unwrap_err();
        assert!(matches!(err, SnippetError::FolderNotFound(_)));
        assert_eq!(backend.file_count(), 0);
    }

    #[test]
    fn write_failure_propagates() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let err = run(&backend, &SnippetDraft::new("a", "")).unwrap_err();
        assert!(matches!(err, SnippetError::Io(_)));
    }
}
