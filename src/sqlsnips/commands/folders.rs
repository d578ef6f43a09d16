use crate::error::{Result, SnippetError};
use crate::model::{EntryKind, Folder};
use crate::sanitize::sanitize;
use crate::store::StorageBackend;
use tracing::debug;
use uuid::Uuid;

use super::helpers::{find_folder, require_folder};

/// Lists folders under `parent`. Folders only exist at the top level, so any
/// parent yields an empty list and `None` yields every folder in scan order.
pub fn list<B: StorageBackend>(backend: &B, parent: Option<&Uuid>) -> Result<Vec<Folder>> {
    backend.ensure_configured()?;
    if parent.is_some() {
        return Ok(Vec::new());
    }
    Ok(backend
        .scan()?
        .iter()
        .filter(|e| e.is_folder())
        .map(Folder::from_entry)
        .collect())
}

pub fn create<B: StorageBackend>(backend: &B, name: &str) -> Result<Folder> {
    backend.ensure_configured()?;
    let name = sanitize(name);
    if name.is_empty() {
        return Err(SnippetError::NameRequired);
    }

    let entries = backend.scan()?;
    if entries.iter().any(|e| e.is_folder() && e.name == name) {
        return Err(SnippetError::AlreadyExists {
            kind: EntryKind::Folder,
            name,
        });
    }

    backend.create_folder(&name)?;
    Ok(Folder {
        id: crate::identity::folder_id(&name),
        name,
        parent_id: None,
    })
}

/// Deletes folder `id` together with every snippet inside it.
pub fn delete<B: StorageBackend>(backend: &B, id: &Uuid) -> Result<()> {
    let entries = backend.scan()?;
    let folder = require_folder(&entries, id)?;
    let contained = entries
        .iter()
        .filter(|e| e.folder_id.as_ref() == Some(id))
        .count();
    backend.remove_folder(&folder.name)?;
    debug!(folder = %folder.name, snippets = contained, "deleted folder");
    Ok(())
}

/// Deletes every folder in `ids` against a single scan. Unlike the single
/// form, unknown ids are skipped; returns the ids of the removed folders.
pub fn delete_many<B: StorageBackend>(backend: &B, ids: &[Uuid]) -> Result<Vec<Uuid>> {
    let entries = backend.scan()?;
    let mut removed = Vec::new();
    for id in ids {
        if removed.contains(id) {
            continue;
        }
        if let Some(folder) = find_folder(&entries, id) {
            backend.remove_folder(&folder.name)?;
            removed.push(*id);
        }
    }
    Ok(removed)
}
