//! Candidate tracking model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stage of a candidate in the hiring pipeline.
///
/// There are no automatic transitions; every change is an explicit admin
/// edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    /// Application received.
    Received,
    /// Interview scheduled or in progress.
    Interview,
    /// Offer extended.
    Offer,
    /// Application rejected.
    Rejected,
    /// Candidate hired.
    Hired,
}

/// An applicant being tracked for a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique identifier.
    pub id: Uuid,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Target position code.
    pub position_code: String,
    /// Date the application was received.
    pub application_date: NaiveDate,
    /// Interview date, once scheduled.
    #[serde(default)]
    pub interview_date: Option<NaiveDate>,
    /// Current pipeline stage.
    pub status: CandidateStatus,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}
