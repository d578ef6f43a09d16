use crate::error::Result;
use crate::model::{FsEntry, SNIPPET_EXT};
use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Walks `root` one level deep and returns every folder and snippet found.
///
/// Order is lexical by file name, each folder directly followed by its own
/// snippets. Directories below the first level are skipped entirely, as are
/// non-`.sql` files and names that are not valid UTF-8. Entries that vanish
/// between listing and reading (a concurrent delete) are skipped; any other
/// I/O failure is returned.
///
/// The root itself must exist; callers create it first.
pub fn scan(root: &Path) -> Result<Vec<FsEntry>> {
    let mut entries = Vec::new();

    for dirent in sorted_dir(root)? {
        let Some(name) = dirent.file_name().to_str().map(str::to_string) else {
            continue;
        };
        let path = dirent.path();
        let Some(file_type) = skip_missing(dirent.file_type())? else {
            continue;
        };

        if file_type.is_dir() {
            let Some(modified_at) = skip_missing(modified_at(&path))? else {
                continue;
            };
            entries.push(FsEntry::folder(name.clone(), modified_at));

            let Some(children) = skip_missing(sorted_dir(&path))? else {
                continue;
            };
            for child in children {
                let is_dir = skip_missing(child.file_type())?.map_or(true, |t| t.is_dir());
                if is_dir {
                    continue;
                }
                if let Some(entry) = read_snippet(Some(&name), &child.path())? {
                    entries.push(entry);
                }
            }
        } else if let Some(entry) = read_snippet(None, &path)? {
            entries.push(entry);
        }
    }

    Ok(entries)
}

/// Strips `.sql` from a file name, or `None` for files the scanner ignores.
pub fn snippet_stem(file_name: &str) -> Option<&str> {
    if IGNORED_FILES.contains(&file_name) {
        return None;
    }
    file_name.strip_suffix(SNIPPET_EXT)
}

pub fn modified_at(path: &Path) -> io::Result<DateTime<Utc>> {
    Ok(mtime(fs::metadata(path)?.modified()))
}

/// Platforms without mtimes report the epoch, so repeated scans agree.
fn mtime(modified: io::Result<SystemTime>) -> DateTime<Utc> {
    modified.unwrap_or(SystemTime::UNIX_EPOCH).into()
}

fn read_snippet(folder: Option<&str>, path: &Path) -> Result<Option<FsEntry>> {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return Ok(None);
    };
    let Some(stem) = snippet_stem(file_name) else {
        return Ok(None);
    };
    let Some(meta) = skip_missing(fs::metadata(path))? else {
        return Ok(None);
    };
    if !meta.is_file() {
        return Ok(None);
    }
    let Some(bytes) = skip_missing(fs::read(path))? else {
        return Ok(None);
    };

    let (content, content_is_utf8) = match String::from_utf8(bytes) {
        Ok(text) => (text, true),
        Err(e) => (String::from_utf8_lossy(e.as_bytes()).into_owned(), false),
    };
    let mut entry = FsEntry::snippet(folder, stem, content, mtime(meta.modified()));
    entry.content_is_utf8 = content_is_utf8;
    Ok(Some(entry))
}

fn sorted_dir(dir: &Path) -> io::Result<Vec<fs::DirEntry>> {
    let mut children = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    children.sort_by_key(|d| d.file_name());
    Ok(children)
}

fn skip_missing<T>(result: io::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity;
    use crate::model::EntryKind;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("top.sql"), "select 1").unwrap();
        fs::write(root.join("notes.txt"), "not sql").unwrap();
        fs::write(root.join(".DS_Store"), "junk").unwrap();
        fs::create_dir(root.join("reports")).unwrap();
        fs::write(root.join("reports/weekly.sql"), "select 2").unwrap();
        fs::create_dir(root.join("reports/archive")).unwrap();
        fs::write(root.join("reports/archive/old.sql"), "select 3").unwrap();
        dir
    }

    #[test]
    fn finds_folders_and_sql_files_only() {
        let dir = tree();
        let entries = scan(dir.path()).unwrap();

        let summary: Vec<(EntryKind, &str)> =
            entries.iter().map(|e| (e.kind, e.name.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                (EntryKind::Folder, "reports"),
                (EntryKind::File, "weekly"),
                (EntryKind::File, "top"),
            ]
        );
    }

    #[test]
    fn assigns_deterministic_ids() {
        let dir = tree();
        let entries = scan(dir.path()).unwrap();
        let folder = identity::folder_id("reports");

        assert_eq!(entries[0].id, folder);
        assert_eq!(entries[1].folder_id, Some(folder));
        assert_eq!(entries[1].id, identity::snippet_id(Some(&folder), "weekly"));
        assert_eq!(entries[2].id, identity::snippet_id(None, "top"));
        assert_eq!(entries[2].content, "select 1");

        let again = scan(dir.path()).unwrap();
        assert_eq!(entries, again);
    }

    #[test]
    fn skips_nested_directories() {
        let dir = tree();
        let entries = scan(dir.path()).unwrap();
        assert!(entries.iter().all(|e| e.name != "old" && e.name != "archive"));
    }

    #[test]
    fn empty_root_scans_empty() {
        let dir = TempDir::new().unwrap();
        assert!(scan(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_root_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let result = scan(&dir.path().join("nope"));
        assert!(matches!(result, Err(crate::error::SnippetError::Io(_))));
    }

    #[test]
    fn non_utf8_content_is_flagged() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("latin1.sql"), b"select '\xe9'").unwrap();
        fs::write(dir.path().join("plain.sql"), "select 1").unwrap();

        let entries = scan(dir.path()).unwrap();
        assert!(!entries[0].content_is_utf8);
        assert_eq!(entries[0].content, "select '\u{fffd}'");
        assert!(entries[1].content_is_utf8);
    }

    #[test]
    fn missing_mtime_falls_back_to_epoch() {
        let unsupported = Err(io::Error::from(io::ErrorKind::Unsupported));
        assert_eq!(mtime(unsupported), DateTime::<Utc>::from(SystemTime::UNIX_EPOCH));
    }

    #[test]
    fn stem_rules() {
        assert_eq!(snippet_stem("a.sql"), Some("a"));
        assert_eq!(snippet_stem("a.sql.tmp"), None);
        assert_eq!(snippet_stem("a.SQL"), None);
        assert_eq!(snippet_stem(".DS_Store"), None);
    }
}
