//! Infrastructure layer for the confed command.
//!
//! Contains the file-system adapters: the config file store and the preset
//! table (built-in presets plus the user presets file).
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `confed_core`, but MUST NOT be imported by the `application` layer.

pub mod storage;
