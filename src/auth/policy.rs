//! Role-based access policy.
//!
//! A pure decision table: given a role, a resource, and an action, it
//! answers allow or deny. Handlers translate a deny into a 403; nothing
//! here knows about HTTP.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Role;

/// Resources the policy governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// Employee records.
    Employees,
    /// Leave requests and balances.
    LeaveRequests,
    /// Daily attendance records.
    Attendance,
    /// Payroll breakdowns and records.
    Payroll,
    /// Recruitment candidates.
    Candidates,
    /// Company announcements.
    Announcements,
    /// User accounts.
    Accounts,
}

impl Resource {
    /// Stable lowercase name, used in error payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Employees => "employees",
            Resource::LeaveRequests => "leave_requests",
            Resource::Attendance => "attendance",
            Resource::Payroll => "payroll",
            Resource::Candidates => "candidates",
            Resource::Announcements => "announcements",
            Resource::Accounts => "accounts",
        }
    }
}

/// Actions a caller can attempt against a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Read records owned by any employee.
    ReadAny,
    /// Read records belonging to the caller's own employee.
    ReadOwn,
    /// Create records for any employee.
    CreateAny,
    /// Create records belonging to the caller's own employee.
    CreateOwn,
    /// Update or transition records of any employee.
    UpdateAny,
    /// Cancel the caller's own pending leave request.
    CancelOwn,
    /// Remove records.
    Delete,
}

impl Action {
    /// Stable lowercase name, used in error payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ReadAny => "read_any",
            Action::ReadOwn => "read_own",
            Action::CreateAny => "create_any",
            Action::CreateOwn => "create_own",
            Action::UpdateAny => "update_any",
            Action::CancelOwn => "cancel_own",
            Action::Delete => "delete",
        }
    }
}

/// Returns whether `role` may perform `action` on `resource`.
///
/// Admins may do everything. Employees may read announcements, read
/// their own employee, leave, attendance, and payroll records, create
/// their own leave requests, and cancel their own pending requests.
pub fn is_allowed(role: Role, resource: Resource, action: Action) -> bool {
    match role {
        Role::Admin => true,
        Role::Employee => match (resource, action) {
            (Resource::Announcements, Action::ReadAny) => true,
            (
                Resource::Employees
                | Resource::LeaveRequests
                | Resource::Attendance
                | Resource::Payroll,
                Action::ReadOwn,
            ) => true,
            (Resource::LeaveRequests, Action::CreateOwn | Action::CancelOwn) => true,
            _ => false,
        },
    }
}

/// Like [`is_allowed`], but a deny becomes a `Forbidden` error carrying
/// the attempted role, resource, and action.
pub fn authorize(role: Role, resource: Resource, action: Action) -> EngineResult<()> {
    if is_allowed(role, resource, action) {
        Ok(())
    } else {
        Err(EngineError::Forbidden {
            role: role.as_str().to_string(),
            resource: resource.as_str().to_string(),
            action: action.as_str().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_allowed_everywhere() {
        let resources = [
            Resource::Employees,
            Resource::LeaveRequests,
            Resource::Attendance,
            Resource::Payroll,
            Resource::Candidates,
            Resource::Announcements,
            Resource::Accounts,
        ];
        let actions = [
            Action::ReadAny,
            Action::ReadOwn,
            Action::CreateAny,
            Action::CreateOwn,
            Action::UpdateAny,
            Action::CancelOwn,
            Action::Delete,
        ];
        for resource in resources {
            for action in actions {
                assert!(is_allowed(Role::Admin, resource, action));
            }
        }
    }

    #[test]
    fn test_employee_reads_announcements() {
        assert!(is_allowed(Role::Employee, Resource::Announcements, Action::ReadAny));
    }

    #[test]
    fn test_employee_reads_own_records_only() {
        assert!(is_allowed(Role::Employee, Resource::Payroll, Action::ReadOwn));
        assert!(!is_allowed(Role::Employee, Resource::Payroll, Action::ReadAny));
        assert!(is_allowed(Role::Employee, Resource::Employees, Action::ReadOwn));
        assert!(!is_allowed(Role::Employee, Resource::Employees, Action::ReadAny));
    }

    #[test]
    fn test_employee_manages_own_leave_requests() {
        assert!(is_allowed(Role::Employee, Resource::LeaveRequests, Action::CreateOwn));
        assert!(is_allowed(Role::Employee, Resource::LeaveRequests, Action::CancelOwn));
        assert!(!is_allowed(Role::Employee, Resource::LeaveRequests, Action::UpdateAny));
    }

    #[test]
    fn test_employee_denied_admin_surfaces() {
        assert!(!is_allowed(Role::Employee, Resource::Candidates, Action::ReadAny));
        assert!(!is_allowed(Role::Employee, Resource::Accounts, Action::ReadAny));
        assert!(!is_allowed(Role::Employee, Resource::Employees, Action::CreateAny));
        assert!(!is_allowed(Role::Employee, Resource::Payroll, Action::UpdateAny));
    }

    #[test]
    fn test_authorize_error_carries_context() {
        match authorize(Role::Employee, Resource::Candidates, Action::ReadAny) {
            Err(EngineError::Forbidden { role, resource, action }) => {
                assert_eq!(role, "employee");
                assert_eq!(resource, "candidates");
                assert_eq!(action, "read_any");
            }
            other => panic!("Expected Forbidden, got {:?}", other),
        }
    }
}
