//! # confed-core
//!
//! Edits a single named setting inside a line-oriented configuration file
//! while leaving every other byte of the file alone.
//!
//! The crate has no file-system access and never prints.  Callers hand in the
//! file as a sequence of lines (each keeping its own terminator) and get back
//! the complete updated sequence, or an [`EditError`].
//!
//! # Architecture overview
//!
//! One call to [`update_setting`] runs four stages, each in its own module:
//!
//! ```text
//! GrammarConfig ──► LineGrammar (built once)
//!                        │
//! lines ──► scanner ──► ScanState ──► planner ──► EditPlan ──► mutator ──► lines'
//! ```
//!
//! - **`grammar`** – How a single line is recognised as
//!   `[comment] name [assign] value [trailing comment]`.  The character
//!   classes come from a [`GrammarConfig`], so the same engine handles
//!   `postgresql.conf`, `sshd_config`, `php.ini` and friends.
//!
//! - **`domain`** – Plain value types shared by the stages: the
//!   [`OperationRequest`], the running [`ScanState`] and the final
//!   [`EditPlan`].
//!
//! - **`edit`** – The scanner, the planner and the line mutator, plus the
//!   [`update_setting`] entry point that chains them.
//!
//! # Example
//!
//! ```rust
//! use confed_core::{split_lines, update_setting, GrammarConfig, OperationRequest};
//!
//! let lines = split_lines("port = 5432\nmax_connections = 100\n");
//! let request = OperationRequest::update("port", "5433");
//! let updated = update_setting(&lines, &GrammarConfig::default(), &request).unwrap();
//! assert_eq!(updated.concat(), "port = 5433\nmax_connections = 100\n");
//! ```

pub mod domain;
pub mod edit;
pub mod grammar;
pub mod lines;

pub use domain::plan::EditPlan;
pub use domain::request::{OperationRequest, RequestError};
pub use domain::scan_state::ScanState;
pub use edit::{update_setting, update_setting_with_plan, EditError, EditOutcome};
pub use grammar::config::{GrammarConfig, GrammarConfigError};
pub use grammar::matcher::{LineGrammar, ParsedLine};
pub use lines::split_lines;
