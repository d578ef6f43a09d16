use crate::error::Result;
use crate::model::FsEntry;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Raw tree I/O. Backends know where bytes live; commands decide what the
/// bytes mean.
///
/// Folder arguments are folder *names* (directory names), never ids. Callers
/// pass names that already went through [`crate::sanitize::sanitize`].
pub trait StorageBackend {
    /// Fails with `NotConfigured` when the backend has nowhere to store
    /// snippets. Does no I/O, so it can run ahead of input validation.
    fn ensure_configured(&self) -> Result<()>;

    /// Walks the tree once: top-level folders and `.sql` files at depth ≤ 2.
    fn scan(&self) -> Result<Vec<FsEntry>>;

    /// Writes `<root>[/folder]/<name>.sql`, replacing any existing file.
    /// Returns the modification time of the file just written.
    fn write_snippet(&self, folder: Option<&str>, name: &str, sql: &str) -> Result<DateTime<Utc>>;

    /// Removes a snippet file. A file that is already gone is not an error.
    fn remove_snippet(&self, folder: Option<&str>, name: &str) -> Result<()>;

    /// Creates a top-level folder.
    fn create_folder(&self, name: &str) -> Result<()>;

    /// Removes a folder and every snippet inside it.
    fn remove_folder(&self, name: &str) -> Result<()>;

    /// Where a snippet lives (a virtual location for non-disk backends).
    fn snippet_path(&self, folder: Option<&str>, name: &str) -> Result<PathBuf>;
}
