//! # Storage Layer
//!
//! The directory tree IS the database. There is no index file and no cache:
//! every repository call asks the backend for a fresh [`scan`](StorageBackend::scan)
//! and derives everything else (ids, folder membership, timestamps) from it.
//!
//! ## Layout
//!
//! ```text
//! <root>/
//! ├── top-level.sql        # root snippet, folder_id = None
//! ├── reports/             # folder, id = identify(["reports"])
//! │   ├── weekly.sql       # foldered snippet
//! │   └── deeper/          # ignored: folders never nest
//! └── notes.txt            # ignored: not .sql
//! ```
//!
//! ## Implementations
//!
//! - [`fs::FsBackend`]: production backend over a configured root directory.
//!   Uses [`scan::scan`] for reads and atomic tmp-then-rename writes.
//! - [`memory::MemBackend`]: in-memory tree for command tests, no filesystem.
//!
//! ## Concurrency
//!
//! Nothing here locks. Each single write, rename or removal is atomic at the OS
//! level, but two calls racing on the same tree interleave freely and the last
//! writer wins.

pub mod backend;
pub mod fs;
pub mod memory;
pub mod scan;

pub use backend::StorageBackend;
