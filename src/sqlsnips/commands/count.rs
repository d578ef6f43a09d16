use crate::error::Result;
use crate::model::{FsEntry, SnippetCount};
use crate::store::StorageBackend;

/// Counts snippets across the whole tree, or only those whose name contains
/// `search` (case-insensitive) when a non-empty term is given.
///
/// Every file-backed snippet is private to the user and never a favorite, so
/// `private` always equals `total`.
pub fn run<B: StorageBackend>(backend: &B, search: Option<&str>) -> Result<SnippetCount> {
    let needle = search.filter(|t| !t.is_empty()).map(str::to_lowercase);
    let files: Vec<FsEntry> = backend
        .scan()?
        .into_iter()
        .filter(FsEntry::is_file)
        .filter(|e| match &needle {
            Some(needle) => e.name.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .collect();

    Ok(SnippetCount {
        total: files.len(),
        private: files.len(),
        shared: 0,
        favorites: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, folders};
    use crate::model::SnippetDraft;
    use crate::store::memory::MemBackend;

    fn seeded() -> MemBackend {
        let backend = MemBackend::new();
        let folder = folders::create(&backend, "reports").unwrap();
        create::run(&backend, &SnippetDraft::new("daily", "")).unwrap();
        create::run(&backend, &SnippetDraft::new("Weekly", "")).unwrap();
        create::run(&backend, &SnippetDraft::new("weekly", "").in_folder(folder.id)).unwrap();
        backend
    }

    #[test]
    fn counts_every_folder() {
        let count = run(&seeded(), None).unwrap();
        assert_eq!(
            count,
            SnippetCount {
                total: 3,
                private: 3,
                shared: 0,
                favorites: 0
            }
        );
    }

    #[test]
    fn search_narrows_count() {
        assert_eq!(run(&seeded(), Some("WEEK")).unwrap().total, 2);
        assert_eq!(run(&seeded(), Some("")).unwrap().total, 3);
        assert_eq!(run(&seeded(), Some("nothing")).unwrap().total, 0);
    }
}
