use crate::error::Result;
use crate::model::{FsEntry, Snippet};
use crate::pagination::{effective_limit, paginate, sort_entries, ListQuery, Page};
use crate::store::StorageBackend;

/// Lists snippets matching `query`.
///
/// A non-empty search term matches names case-insensitively across every
/// folder and ignores `query.folder`. Without one, only snippets whose folder
/// is exactly `query.folder` are returned (`None` meaning the root).
pub fn run<B: StorageBackend>(backend: &B, query: &ListQuery) -> Result<Page<Snippet>> {
    let mut files: Vec<FsEntry> = backend.scan()?.into_iter().filter(FsEntry::is_file).collect();

    match query.search_term() {
        Some(term) => {
            let needle = term.to_lowercase();
            files.retain(|e| e.name.to_lowercase().contains(&needle));
        }
        None => files.retain(|e| e.folder_id == query.folder),
    }

    sort_entries(&mut files, query.sort, query.order);
    let limit = effective_limit(query.limit)?;

    Ok(paginate(files, query.cursor.as_ref(), limit).map(|e| Snippet::from_entry(&e)))
}
