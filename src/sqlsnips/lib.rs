//! # sqlsnips Architecture
//!
//! sqlsnips keeps SQL snippets as plain `.sql` files in a directory tree and
//! exposes them as records with stable ids. It is a library first; the
//! `sqlsnips` binary is one client of it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Parses id strings into UUIDs                             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - list/get/create/update/delete, folders, browse, count    │
//! │  - Operates on Rust types, returns Rust types               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageBackend trait, tree scanner                       │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//!
//! Nothing is stored besides the files themselves. Ids are recomputed from
//! names on every scan by [`identity`]: a folder's id depends on its name, a
//! snippet's on its name and its folder's id. Renaming or moving a snippet
//! therefore changes its id.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes and returns plain Rust types, never
//! writes to stdout/stderr and never exits the process. Filesystem mutations
//! emit `tracing` debug events; subscribing is up to the client.
//!
//! ## Module Overview
//!
//! - [`api`]: facade, the entry point for clients
//! - [`commands`]: one module per operation
//! - [`store`]: backends and the tree scanner
//! - [`identity`]: deterministic UUID-shaped ids
//! - [`sanitize`]: path-traversal guard for names
//! - [`pagination`]: sorting and cursor paging
//! - [`model`]: snippets, folders and scanned entries
//! - [`config`], [`init`]: settings and context wiring
//! - [`error`]: the error type

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod identity;
pub mod init;
pub mod model;
pub mod pagination;
pub mod sanitize;
pub mod store;
