//! Line grammar: recognising a single setting definition.
//!
//! A line is recognised as
//!
//! ```text
//! [indent] [comment-char] name [assign] value [comment-char trailing-comment]
//! ```
//!
//! where the legal characters of `name` and `value`, the assignment operator
//! and the comment character all come from a [`config::GrammarConfig`].
//! The grammar is compiled once per configuration into a
//! [`matcher::LineGrammar`] and reused for every line of the file.
//!
//! Lines that do not match are not an error: they simply pass through the
//! edit untouched.

/// Character classes and operators describing one config file dialect.
pub mod config;

/// The compiled matcher and the [`matcher::ParsedLine`] it produces.
pub mod matcher;

/// Quoted-string detection and value quoting.
pub mod quoting;
