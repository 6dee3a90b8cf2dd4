//! Leave request model and lifecycle.
//!
//! A request is created Pending and moves to exactly one terminal state:
//! Approved or Rejected by admin action, or Cancelled while still Pending.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// Approval status of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting an admin decision.
    Pending,
    /// Approved by an admin. Terminal.
    Approved,
    /// Rejected by an admin. Terminal.
    Rejected,
    /// Withdrawn by the owner or an admin while Pending. Terminal.
    Cancelled,
}

impl LeaveStatus {
    /// Returns true if no further transition is allowed from this status.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LeaveStatus::Pending)
    }

    /// Returns true if requests in this status consume leave entitlement.
    ///
    /// Pending requests are counted so a second request cannot overdraw a
    /// balance before the first is decided; Rejected and Cancelled requests
    /// never consume days.
    pub fn counts_toward_balance(&self) -> bool {
        matches!(self, LeaveStatus::Pending | LeaveStatus::Approved)
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
            LeaveStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// A leave request for a contiguous date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The requesting employee.
    pub employee_id: String,
    /// Leave type code resolved against the leave-type reference data.
    pub leave_type: String,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Number of days this request consumes. Derived at intake unless
    /// explicitly overridden; trusted as stored afterwards.
    pub day_count: u32,
    /// Current approval status.
    pub status: LeaveStatus,
}

impl LeaveRequest {
    fn transition(&mut self, to: LeaveStatus) -> EngineResult<()> {
        if self.status.is_terminal() {
            return Err(EngineError::InvalidTransition {
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }
        self.status = to;
        Ok(())
    }

    /// Approves a Pending request. Fails on terminal states.
    pub fn approve(&mut self) -> EngineResult<()> {
        self.transition(LeaveStatus::Approved)
    }

    /// Rejects a Pending request. Fails on terminal states.
    pub fn reject(&mut self) -> EngineResult<()> {
        self.transition(LeaveStatus::Rejected)
    }

    /// Cancels a Pending request. Fails on terminal states.
    pub fn cancel(&mut self) -> EngineResult<()> {
        self.transition(LeaveStatus::Cancelled)
    }
}
