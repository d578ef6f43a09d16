//! # Command Layer
//!
//! The repository logic: one submodule per operation, each a plain function
//! generic over [`StorageBackend`](crate::store::StorageBackend).
//!
//! Every command starts from a fresh `backend.scan()` and throws the entries
//! away when it returns. Nothing is cached between calls, so edits made
//! directly on disk are visible to the very next call.
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: no stdout, stderr or exit codes
//! - **String parsing of ids**: the API layer turns strings into `Uuid`s
//! - **Locking**: concurrent calls may interleave; last write wins
//! - **Logging errors**: failures are returned, the caller decides
//!
//! ## Testing Strategy
//!
//! Command tests run against `MemBackend`, which rebuilds entries from its
//! simulated tree on every scan just like the filesystem backend does.
//!
//! ## Command Modules
//!
//! - [`list`]: search, folder filter, sort and cursor pagination
//! - [`get`]: fetch one snippet
//! - [`create`]: write a new snippet file
//! - [`update`]: rename/move/edit as delete-then-create, plus create-or-replace
//! - [`delete`]: remove snippet files, idempotently
//! - [`folders`]: list, create and delete folders
//! - [`browse`]: folders plus one page of their snippets
//! - [`count`]: snippet totals
//! - [`paths`]: where snippet files live on disk
//! - [`helpers`]: entry lookups shared by the commands

pub mod browse;
pub mod count;
pub mod create;
pub mod delete;
pub mod folders;
pub mod get;
pub mod helpers;
pub mod list;
pub mod paths;
pub mod update;
