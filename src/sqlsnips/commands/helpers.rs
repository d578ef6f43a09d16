use crate::error::{Result, SnippetError};
use crate::model::FsEntry;
use uuid::Uuid;

pub fn find_snippet<'a>(entries: &'a [FsEntry], id: &Uuid) -> Option<&'a FsEntry> {
    entries.iter().find(|e| e.is_file() && &e.id == id)
}

pub fn find_folder<'a>(entries: &'a [FsEntry], id: &Uuid) -> Option<&'a FsEntry> {
    entries.iter().find(|e| e.is_folder() && &e.id == id)
}

pub fn require_snippet<'a>(entries: &'a [FsEntry], id: &Uuid) -> Result<&'a FsEntry> {
    find_snippet(entries, id).ok_or_else(|| SnippetError::snippet_not_found(id.to_string()))
}

pub fn require_folder<'a>(entries: &'a [FsEntry], id: &Uuid) -> Result<&'a FsEntry> {
    find_folder(entries, id).ok_or_else(|| SnippetError::folder_not_found(id.to_string()))
}

/// Maps an optional folder id to the directory name snippets are written to.
/// A set id that matches no scanned folder is `FolderNotFound`.
pub fn target_folder<'a>(entries: &'a [FsEntry], folder_id: Option<&Uuid>) -> Result<Option<&'a str>> {
    match folder_id {
        None => Ok(None),
        Some(id) => find_folder(entries, id)
            .map(|folder| Some(folder.name.as_str()))
            .ok_or_else(|| SnippetError::FolderNotFound(id.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entries() -> Vec<FsEntry> {
        vec![
            FsEntry::folder("reports", Utc::now()),
            FsEntry::snippet(Some("reports"), "weekly", "select 1", Utc::now()),
        ]
    }

    #[test]
    fn lookups_respect_kind() {
        let entries = entries();
        let folder_id = entries[0].id;
        let snippet_id = entries[1].id;

        assert!(find_folder(&entries, &folder_id).is_some());
        assert!(find_snippet(&entries, &folder_id).is_none());
        assert!(find_snippet(&entries, &snippet_id).is_some());
        assert!(find_folder(&entries, &snippet_id).is_none());
    }

    #[test]
    fn require_reports_not_found() {
        let entries = entries();
        let missing = Uuid::new_v4();
        assert!(require_snippet(&entries, &missing).unwrap_err().is_not_found());
        assert!(require_folder(&entries, &missing).unwrap_err().is_not_found());
    }

    #[test]
    fn target_folder_resolves_names() {
        let entries = entries();
        assert_eq!(target_folder(&entries, None).unwrap(), None);
        assert_eq!(
            target_folder(&entries, Some(&entries[0].id)).unwrap(),
            Some("reports")
        );
        assert!(matches!(
            target_folder(&entries, Some(&Uuid::new_v4())),
            Err(SnippetError::FolderNotFound(_))
        ));
    }
}
