use crate::error::Result;
use crate::store::StorageBackend;
use std::collections::HashSet;
use uuid::Uuid;

use super::helpers::find_snippet;

/// Deletes the snippet `id`. Returns whether a file was removed.
///
/// Deleting something that is already gone succeeds, so repeating a delete
/// (or racing another client doing the same) is never an error.
pub fn run<B: StorageBackend>(backend: &B, id: &Uuid) -> Result<bool> {
    let entries = backend.scan()?;
    match find_snippet(&entries, id) {
        Some(entry) => {
            backend.remove_snippet(entry.folder_name.as_deref(), &entry.name)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Deletes every snippet in `ids` against a single scan and returns the ids
/// whose files were removed, each once. The first I/O failure stops the batch.
pub fn run_many<B: StorageBackend>(backend: &B, ids: &[Uuid]) -> Result<Vec<Uuid>> {
    let entries = backend.scan()?;
    let mut seen = HashSet::new();
    let mut removed = Vec::new();
    for id in ids {
        if !seen.insert(id) {
            continue;
        }
        if let Some(entry) = find_snippet(&entries, id) {
            backend.remove_snippet(entry.folder_name.as_deref(), &entry.name)?;
            removed.push(*id);
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, get};
    use crate::error::SnippetError;
    use crate::model::SnippetDraft;
    use crate::store::memory::MemBackend;

    #[test]
    fn removes_the_file() {
        let backend = MemBackend::new();
        let snippet = create::run(&backend, &SnippetDraft::new("a", "")).unwrap();
        assert!(run(&backend, &snippet.id).unwrap());
        assert!(get::run(&backend, &snippet.id).unwrap_err().is_not_found());
    }

    #[test]
    fn deleting_twice_succeeds() {
        let backend = MemBackend::new();
        let snippet = create::run(&backend, &SnippetDraft::new("a", "")).unwrap();
        assert!(run(&backend, &snippet.id).unwrap());
        assert!(!run(&backend, &snippet.id).unwrap());
    }

    #[test]
    fn bulk_skips_unknown_ids() {
        let backend = MemBackend::new();
        let a = create::run(&backend, &SnippetDraft::new("a", "")).unwrap();
        let b = create::run(&backend, &SnippetDraft::new("b", "")).unwrap();
        create::run(&backend, &SnippetDraft::new("c", "")).unwrap();

        let removed = run_many(&backend, &[a.id, Uuid::new_v4(), b.id, a.id]).unwrap();
        assert_eq!(removed, vec![a.id, b.id]);
        assert_eq!(backend.file_count(), 1);
    }

    #[test]
    fn io_failure_propagates() {
        let backend = MemBackend::new();
        let snippet = create::run(&backend, &SnippetDraft::new("a", "")).unwrap();
        backend.set_simulate_write_error(true);
        assert!(matches!(run(&backend, &snippet.id), Err(SnippetError::Io(_))));
    }
}
