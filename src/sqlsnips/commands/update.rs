use crate::error::{Result, SnippetError};
use crate::identity;
use crate::model::{FsEntry, Snippet, SnippetDraft, SnippetPatch};
use crate::sanitize::sanitize;
use crate::store::StorageBackend;
use uuid::Uuid;

use super::create;
use super::helpers::{find_snippet, require_snippet, target_folder};

/// Renames, moves and/or rewrites the snippet `id`.
///
/// Since a snippet's id is derived from where it lives, this is a delete
/// followed by a create: the returned snippet carries the id of the new
/// location. Name and target folder are validated before anything is removed,
/// but the pair is not atomic and a crash between the two loses the snippet.
pub fn run<B: StorageBackend>(backend: &B, id: &Uuid, patch: &SnippetPatch) -> Result<Snippet> {
    let entries = backend.scan()?;
    let current = require_snippet(&entries, id)?;

    // An empty name in a patch keeps the current one
    let requested = match patch.name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => current.name.as_str(),
    };
    let name = sanitize(requested);
    if name.is_empty() {
        return Err(SnippetError::NameRequired);
    }

    let folder_id = patch.folder_id.unwrap_or(current.folder_id);
    let folder = target_folder(&entries, folder_id.as_ref())?;

    let new_id = identity::snippet_id(folder_id.as_ref(), &name);
    if new_id != current.id && find_snippet(&entries, &new_id).is_some() {
        return Err(SnippetError::ConflictInTargetFolder(name));
    }

    // Writing back a lossy rendering would corrupt the file
    let sql = match patch.sql.as_deref() {
        Some(sql) => sql,
        None if current.content_is_utf8 => current.content.as_str(),
        None => return Err(SnippetError::NotUtf8(current.name.clone())),
    };

    backend.remove_snippet(current.folder_name.as_deref(), &current.name)?;
    let modified_at = backend.write_snippet(folder, &name, sql)?;

    Ok(Snippet::from_entry(&FsEntry::snippet(
        folder,
        name,
        sql,
        modified_at,
    )))
}

/// Replaces the snippet `id` with `draft`, or creates `draft` when there is
/// no such snippet. An empty draft name keeps the existing name.
pub fn create_or_replace<B: StorageBackend>(
    backend: &B,
    id: Option<&Uuid>,
    draft: &SnippetDraft,
) -> Result<Snippet> {
    if let Some(id) = id {
        match run(backend, id, &SnippetPatch::from(draft.clone())) {
            Err(e) if e.is_not_found() => {}
            other => return other,
        }
    }
    let entries = backend.scan()?;
    create::write_new(backend, &entries, draft)
}
