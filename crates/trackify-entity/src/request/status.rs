//! Request status and target enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle states of a change request.
///
/// `Pending` is the initial state; `Approved` and `Rejected` are terminal.
/// No transition leaves a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting a decision.
    Pending,
    /// Accepted by an authorized decider.
    Approved,
    /// Declined by an authorized decider (with a comment).
    Rejected,
}

impl RequestStatus {
    /// Whether the transition from `self` to `to` is legal.
    pub fn can_transition_to(&self, to: RequestStatus) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }

    /// Title-case display name ("Pending", "Approved", "Rejected").
    pub fn as_title(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_title())
    }
}

/// What kind of entity a change request proposes to modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_target", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestTarget {
    /// A KPI-level change.
    Kpi,
    /// A KRA-level change.
    Kra,
}

impl fmt::Display for RequestTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kpi => write!(f, "kpi"),
            Self::Kra => write!(f, "kra"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pending_transitions() {
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Approved));
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Rejected));
        assert!(!RequestStatus::Approved.can_transition_to(RequestStatus::Rejected));
        assert!(!RequestStatus::Rejected.can_transition_to(RequestStatus::Approved));
        assert!(!RequestStatus::Pending.can_transition_to(RequestStatus::Pending));
    }

    #[test]
    fn test_status_serde_shape() {
        let json = serde_json::to_string(&RequestStatus::Pending).unwrap();
        assert_eq!(json, "\"Pending\"");
        let back: RequestStatus = serde_json::from_str("\"Rejected\"").unwrap();
        assert_eq!(back, RequestStatus::Rejected);
    }
}
