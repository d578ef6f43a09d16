use super::backend::StorageBackend;
use crate::error::{Result, SnippetError};
use crate::model::{FsEntry, SNIPPET_EXT};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

type FileKey = (Option<String>, String);

#[derive(Clone)]
struct MemFile {
    sql: String,
    mtime: DateTime<Utc>,
}

/// In-memory tree for testing.
///
/// Holds the simulated *disk*, not a cache of derived entries: `scan` rebuilds
/// entries from it on every call, the same way `FsBackend` walks the real tree.
/// Uses `RefCell` since commands only need `&self` and tests are single-threaded.
///
/// Modification times come from a fake clock that advances one second per
/// write, so ordering by time is deterministic in tests.
pub struct MemBackend {
    folders: RefCell<BTreeMap<String, DateTime<Utc>>>,
    files: RefCell<BTreeMap<FileKey, MemFile>>,
    clock: Cell<DateTime<Utc>>,
    simulate_write_error: Cell<bool>,
}

impl Default for MemBackend {
    fn default() -> Self {
        Self {
            folders: RefCell::new(BTreeMap::new()),
            files: RefCell::new(BTreeMap::new()),
            clock: Cell::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            simulate_write_error: Cell::new(false),
        }
    }
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Test helper to pin a file's mtime. Returns true if the file existed.
    pub fn set_mtime(&self, folder: Option<&str>, name: &str, mtime: DateTime<Utc>) -> bool {
        let key = (folder.map(str::to_string), name.to_string());
        match self.files.borrow_mut().get_mut(&key) {
            Some(file) => {
                file.mtime = mtime;
                true
            }
            None => false,
        }
    }

    /// Number of stored snippet files across root and all folders.
    pub fn file_count(&self) -> usize {
        self.files.borrow().len()
    }

    fn tick(&self) -> DateTime<Utc> {
        let now = self.clock.get() + Duration::seconds(1);
        self.clock.set(now);
        now
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(SnippetError::Io(io::Error::other("simulated write error")));
        }
        Ok(())
    }
}

enum RootItem<'a> {
    Folder(&'a String, DateTime<Utc>),
    File(&'a String, &'a MemFile),
}

impl StorageBackend for MemBackend {
    fn ensure_configured(&self) -> Result<()> {
        Ok(())
    }

    fn scan(&self) -> Result<Vec<FsEntry>> {
        let folders = self.folders.borrow();
        let files = self.files.borrow();

        // Same order as a lexical directory walk: root names sorted as they
        // would appear on disk, each folder followed by its own files.
        let mut root_items: Vec<(String, RootItem)> = folders
            .iter()
            .map(|(name, mtime)| (name.clone(), RootItem::Folder(name, *mtime)))
            .collect();
        root_items.extend(
            files
                .iter()
                .filter(|((folder, _), _)| folder.is_none())
                .map(|((_, name), file)| {
                    (format!("{}{}", name, SNIPPET_EXT), RootItem::File(name, file))
                }),
        );
        root_items.sort_by(|a, b| a.0.cmp(&b.0));

        let mut entries = Vec::new();
        for (_, item) in root_items {
            match item {
                RootItem::Folder(folder_name, mtime) => {
                    entries.push(FsEntry::folder(folder_name.clone(), mtime));
                    let mut children: Vec<(&String, &MemFile)> = files
                        .iter()
                        .filter(|((folder, _), _)| folder.as_ref() == Some(folder_name))
                        .map(|((_, name), file)| (name, file))
                        .collect();
                    children.sort_by_key(|(name, _)| format!("{}{}", name, SNIPPET_EXT));
                    for (name, file) in children {
                        entries.push(FsEntry::snippet(
                            Some(folder_name.as_str()),
                            name.clone(),
                            file.sql.clone(),
                            file.mtime,
                        ));
                    }
                }
                RootItem::File(name, file) => {
                    entries.push(FsEntry::snippet(
                        None,
                        name.clone(),
                        file.sql.clone(),
                        file.mtime,
                    ));
                }
            }
        }
        Ok(entries)
    }

    fn write_snippet(&self, folder: Option<&str>, name: &str, sql: &str) -> Result<DateTime<Utc>> {
        self.check_writable()?;
        if let Some(folder) = folder {
            if !self.folders.borrow().contains_key(folder) {
                return Err(SnippetError::Io(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such folder: {}", folder),
                )));
            }
        }
        let mtime = self.tick();
        self.files.borrow_mut().insert(
            (folder.map(str::to_string), name.to_string()),
            MemFile {
                sql: sql.to_string(),
                mtime,
            },
        );
        Ok(mtime)
    }

    fn remove_snippet(&self, folder: Option<&str>, name: &str) -> Result<()> {
        self.check_writable()?;
        self.files
            .borrow_mut()
            .remove(&(folder.map(str::to_string), name.to_string()));
        Ok(())
    }

    fn create_folder(&self, name: &str) -> Result<()> {
        self.check_writable()?;
        let mtime = self.tick();
        self.folders
            .borrow_mut()
            .entry(name.to_string())
            .or_insert(mtime);
        Ok(())
    }

    fn remove_folder(&self, name: &str) -> Result<()> {
        self.check_writable()?;
        self.folders.borrow_mut().remove(name);
        self.files
            .borrow_mut()
            .retain(|(folder, _), _| folder.as_deref() != Some(name));
        Ok(())
    }

    fn snippet_path(&self, folder: Option<&str>, name: &str) -> Result<PathBuf> {
        Ok(match folder {
            Some(folder) => PathBuf::from(format!("memory://{}/{}{}", folder, name, SNIPPET_EXT)),
            None => PathBuf::from(format!("memory://{}{}", name, SNIPPET_EXT)),
        })
    }
}
