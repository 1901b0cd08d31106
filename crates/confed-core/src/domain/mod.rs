//! Domain value types shared by the edit stages.
//!
//! Nothing in here touches a line of text directly; these are the inputs,
//! the running state and the decisions of one edit operation:
//!
//! - **`request`** – what the caller wants done ([`request::OperationRequest`]).
//! - **`setting_matcher`** – literal or regex matching of names and values.
//! - **`scan_state`** – candidates and insertion point gathered while scanning.
//! - **`plan`** – the single edit chosen from the scan state.

pub mod plan;
pub mod request;
pub mod scan_state;
pub mod setting_matcher;
