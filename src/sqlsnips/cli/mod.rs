//! # CLI Behavior
//!
//! This is **one possible client** for sqlsnips, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes and
//! output formatting. For the overall architecture, see the library docs.
//!
//! ## Naked Execution
//!
//! Running `sqlsnips` with no arguments lists the root snippets, newest first.
//!
//! ## Where the Root Comes From
//!
//! 1. `--root DIR`
//! 2. `SNIPPETS_MANAGEMENT_FOLDER`
//! 3. `root` in `config.json` (`sqlsnips config root DIR`)
//!
//! Without any of these every snippet command fails with a message naming
//! all three. `id`, `config` and `help` work regardless.
//!
//! ## SQL Input
//!
//! `create`, `update` and `put` take SQL from `--sql`, falling back to piped
//! stdin. Empty stdin means "no SQL given", so `update` then keeps the
//! current text.
//!
//! ## Output
//!
//! Human output is colored and truncated to the display width. `--json`
//! prints the structured result instead; logs always go to stderr.
//!
//! ## Module Structure
//!
//! - `commands`: dispatch and per-command handlers
//! - `print`: terminal formatting
//! - `setup`: argument parsing via clap, help text

mod commands;
mod print;
pub mod setup;

pub use commands::run;
