//! Storage infrastructure: config files and presets.
//!
//! - **`file`** – [`file::FsConfigFileStore`], reading and rewriting the
//!   edited config file on disk (or stdin).
//! - **`memory`** – [`memory::MemoryConfigFileStore`], an in-memory store for
//!   tests.
//! - **`presets`** – Named grammar presets: the built-in table and the
//!   optional user presets TOML file.

pub mod file;
pub mod memory;
pub mod presets;
