//! Decision authorization for change requests.
//!
//! KPI requests are decided by a manager of the requester's department
//! (never the requester themselves) or by an admin. KRA requests are
//! decided by admins only.

use uuid::Uuid;

use trackify_entity::request::RequestTarget;
use trackify_entity::user::UserRole;

/// Identity of a prospective decider.
#[derive(Debug, Clone)]
pub struct Decider<'a> {
    pub user_id: Uuid,
    pub role: UserRole,
    /// The decider's department name, if any.
    pub dept: Option<&'a str>,
}

/// Whether `decider` may decide a request with the given target,
/// requester and requester department.
pub fn can_decide(
    decider: &Decider<'_>,
    target: RequestTarget,
    requester_id: Uuid,
    requester_dept: Option<&str>,
) -> bool {
    match target {
        RequestTarget::Kra => decider.role == UserRole::Admin,
        RequestTarget::Kpi => match decider.role {
            UserRole::Admin => true,
            UserRole::Manager => {
                decider.user_id != requester_id
                    && match (decider.dept, requester_dept) {
                        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
                        _ => false,
                    }
            }
            UserRole::Employee => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decider(role: UserRole, dept: Option<&str>) -> Decider<'_> {
        Decider {
            user_id: Uuid::new_v4(),
            role,
            dept,
        }
    }

    #[test]
    fn test_admin_decides_everything() {
        let d = decider(UserRole::Admin, None);
        assert!(can_decide(&d, RequestTarget::Kpi, Uuid::new_v4(), Some("Sales")));
        assert!(can_decide(&d, RequestTarget::Kra, Uuid::new_v4(), None));
    }

    #[test]
    fn test_manager_decides_own_department_kpi_only() {
        let d = decider(UserRole::Manager, Some("Sales"));
        assert!(can_decide(&d, RequestTarget::Kpi, Uuid::new_v4(), Some("Sales")));
        assert!(can_decide(&d, RequestTarget::Kpi, Uuid::new_v4(), Some("sales")));
        assert!(!can_decide(&d, RequestTarget::Kpi, Uuid::new_v4(), Some("Support")));
        assert!(!can_decide(&d, RequestTarget::Kpi, Uuid::new_v4(), None));
        assert!(!can_decide(&d, RequestTarget::Kra, Uuid::new_v4(), Some("Sales")));
    }

    #[test]
    fn test_manager_cannot_decide_own_request() {
        let d = decider(UserRole::Manager, Some("Sales"));
        assert!(!can_decide(&d, RequestTarget::Kpi, d.user_id, Some("Sales")));
    }

    #[test]
    fn test_employee_decides_nothing() {
        let d = decider(UserRole::Employee, Some("Sales"));
        assert!(!can_decide(&d, RequestTarget::Kpi, Uuid::new_v4(), Some("Sales")));
        assert!(!can_decide(&d, RequestTarget::Kra, Uuid::new_v4(), Some("Sales")));
    }
}
