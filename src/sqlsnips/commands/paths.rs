use crate::error::Result;
use crate::store::StorageBackend;
use std::path::PathBuf;
use uuid::Uuid;

use super::helpers::require_snippet;

/// Resolves each snippet id to the file backing it. Fails on the first id
/// that names no snippet.
pub fn run<B: StorageBackend>(backend: &B, ids: &[Uuid]) -> Result<Vec<PathBuf>> {
    let entries = backend.scan()?;
    ids.iter()
        .map(|id| {
            let entry = require_snippet(&entries, id)?;
            backend.snippet_path(entry.folder_name.as_deref(), &entry.name)
        })
        .collect()
}
