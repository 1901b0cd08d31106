//! Edit planner: turns the scan result into exactly one [`EditPlan`].
//!
//! Decision order:
//!
//! 1. An active definition exists: delete it, comment it out, comment it out
//!    and insert after it, or replace it in place, depending on
//!    `delete`/`keep`.
//! 2. A delete found nothing active: nothing to do.
//! 3. An explicit insertion index was captured (`before`/`after`/multiple):
//!    insert there.
//! 4. A commented-out definition exists: insert right after it.
//! 5. Otherwise append at the end of the file.

use tracing::debug;

use crate::domain::plan::EditPlan;
use crate::domain::request::OperationRequest;
use crate::domain::scan_state::ScanState;

/// Chooses the edit for `request` given the finished scan `state`.
pub fn plan(state: ScanState, request: &OperationRequest) -> EditPlan {
    let ScanState {
        active,
        commented,
        insert_at,
        insert_prefix,
        trailing_blank_lines,
        line_count,
        ..
    } = state;

    let plan = if let Some(target) = active {
        match (request.delete, request.keep) {
            (true, false) => EditPlan::Delete(target),
            (true, true) => EditPlan::CommentOut(target),
            (false, true) => EditPlan::CommentOutAndInsert(target),
            (false, false) => EditPlan::ReplaceInPlace(target),
        }
    } else if request.delete {
        EditPlan::Unchanged
    } else if let Some(index) = insert_at {
        EditPlan::InsertAt {
            index,
            prefix: insert_prefix,
        }
    } else if let Some(candidate) = commented {
        EditPlan::InsertAt {
            index: candidate.index + 1,
            prefix: candidate.indent,
        }
    } else {
        EditPlan::Append {
            blank_separator: line_count > 0 && trailing_blank_lines == 0,
        }
    };

    debug!(setting = %request.setting, plan = %plan.describe(), "edit planned");
    plan
}

// ── Tests ─────────────────────────────────────────────────────────────────────
