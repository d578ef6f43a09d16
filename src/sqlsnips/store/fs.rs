use super::backend::StorageBackend;
use super::scan::{modified_at, scan};
use crate::error::{Result, SnippetError};
use crate::model::{FsEntry, SNIPPET_EXT};
use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

/// Filesystem backend rooted at the configured snippets folder.
///
/// Holds nothing but the root path. A backend built without a root is valid
/// but every operation on it fails with [`SnippetError::NotConfigured`]
/// before touching the disk.
#[derive(Debug, Clone)]
pub struct FsBackend {
    root: Option<PathBuf>,
}

impl FsBackend {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    /// Resolves the root, creating it if needed.
    pub fn ensure_root(&self) -> Result<PathBuf> {
        let root = self.root.as_ref().ok_or(SnippetError::NotConfigured)?;
        if !root.exists() {
            fs::create_dir_all(root).map_err(SnippetError::Io)?;
            debug!(root = %root.display(), "created snippets root");
        }
        Ok(root.clone())
    }

    fn dir_for(&self, folder: Option<&str>) -> Result<PathBuf> {
        let root = self.ensure_root()?;
        Ok(match folder {
            Some(name) => root.join(name),
            None => root,
        })
    }
}

fn snippet_filename(name: &str) -> String {
    format!("{}{}", name, SNIPPET_EXT)
}

impl StorageBackend for FsBackend {
    fn ensure_configured(&self) -> Result<()> {
        match self.root {
            Some(_) => Ok(()),
            None => Err(SnippetError::NotConfigured),
        }
    }

    fn scan(&self) -> Result<Vec<FsEntry>> {
        let root = self.ensure_root()?;
        scan(&root)
    }

    fn write_snippet(&self, folder: Option<&str>, name: &str, sql: &str) -> Result<DateTime<Utc>> {
        let dir = self.dir_for(folder)?;
        let target = dir.join(snippet_filename(name));

        // Atomic write: the scanner never sees a half-written .sql file
        let tmp = dir.join(format!(".snippet-{}.tmp", Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp, sql).and_then(|()| fs::rename(&tmp, &target)) {
            let _ = fs::remove_file(&tmp);
            return Err(SnippetError::Io(e));
        }
        debug!(path = %target.display(), bytes = sql.len(), "wrote snippet");

        Ok(modified_at(&target)?)
    }

    fn remove_snippet(&self, folder: Option<&str>, name: &str) -> Result<()> {
        let path = self.dir_for(folder)?.join(snippet_filename(name));
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "removed snippet");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SnippetError::Io(e)),
        }
    }

    fn create_folder(&self, name: &str) -> Result<()> {
        let path = self.dir_for(Some(name))?;
        fs::create_dir_all(&path).map_err(SnippetError::Io)?;
        debug!(path = %path.display(), "created folder");
        Ok(())
    }

    fn remove_folder(&self, name: &str) -> Result<()> {
        let path = self.dir_for(Some(name))?;
        match fs::remove_dir_all(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "removed folder and its snippets");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SnippetError::Io(e)),
        }
    }

    fn snippet_path(&self, folder: Option<&str>, name: &str) -> Result<PathBuf> {
        Ok(self.dir_for(folder)?.join(snippet_filename(name)))
    }
}
