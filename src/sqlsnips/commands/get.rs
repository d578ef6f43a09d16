use crate::error::Result;
use crate::model::Snippet;
use crate::store::StorageBackend;
use uuid::Uuid;

use super::helpers::require_snippet;

pub fn run<B: StorageBackend>(backend: &B, id: &Uuid) -> Result<Snippet> {
    let entries = backend.scan()?;
    require_snippet(&entries, id).map(Snippet::from_entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity;
    use crate::store::memory::MemBackend;

    #[test]
    fn fetches_by_derived_id() {
        let backend = MemBackend::new();
        backend.create_folder("reports").unwrap();
        backend.write_snippet(Some("reports"), "weekly", "select 1").unwrap();

        let id = identity::snippet_id(Some(&identity::folder_id("reports")), "weekly");
        let snippet = run(&backend, &id).unwrap();
        assert_eq!(snippet.name, "weekly");
        assert_eq!(snippet.content.sql, "select 1");
        assert_eq!(snippet.folder_id, Some(identity::folder_id("reports")));
    }

    #[test]
    fn folder_id_is_not_a_snippet() {
        let backend = MemBackend::new();
        backend.create_folder("reports").unwrap();
        let err = run(&backend, &identity::folder_id("reports")).unwrap_err();
        assert!(err.is_not_found());
    }
}
