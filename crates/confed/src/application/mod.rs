//! Application layer use cases for the confed command.
//!
//! Use cases here orchestrate `confed-core` to fulfil one user goal and
//! depend on the [`edit_file::ConfigFileStore`] abstraction rather than on
//! the file system, so they can be tested against an in-memory store.
//!
//! # Sub-modules
//!
//! - **`edit_file`** – Reads a config file, applies one setting edit and
//!   either prints, writes back, or diffs the result.
//! - **`diff`** – Renders a unified diff for test (dry-run) mode.

pub mod diff;
pub mod edit_file;
