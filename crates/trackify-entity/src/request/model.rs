//! Change-request entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::{RequestStatus, RequestTarget};
use crate::user::UserRole;

/// A proposed change to a KPI or KRA, awaiting (or past) a decision.
///
/// The requester's role, name and department are denormalized at submit
/// time so visibility rules keep working even if the user record later
/// changes. `requested_changes` is stored verbatim as submitted; payloads
/// that fail to parse degrade at display time rather than being rejected
/// at write time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChangeRequest {
    /// Unique request identifier.
    pub id: Uuid,
    /// What kind of entity the request targets.
    pub target: RequestTarget,
    /// The targeted KPI, for KPI requests.
    pub kpi_id: Option<Uuid>,
    /// The KRA the request relates to (the parent KRA for KPI requests).
    pub kra_id: Uuid,
    /// Who submitted the request.
    pub requester_id: Uuid,
    /// Requester role at submit time.
    pub requester_role: UserRole,
    /// Requester display name at submit time.
    pub requester_name: String,
    /// Requester department name at submit time.
    pub requester_dept: Option<String>,
    /// The proposed changes, stored verbatim as submitted.
    pub requested_changes: String,
    /// Free-text comment from the requester.
    pub request_comment: Option<String>,
    /// Current lifecycle state.
    pub status: RequestStatus,
    /// Who decided the request, once decided.
    pub decided_by: Option<Uuid>,
    /// Decision comment; required for rejections.
    pub decision_comment: Option<String>,
    /// When the decision was made.
    pub decided_at: Option<DateTime<Utc>>,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
}

/// Fields needed to submit a new change request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChangeRequest {
    pub target: RequestTarget,
    pub kpi_id: Option<Uuid>,
    pub kra_id: Uuid,
    pub requester_id: Uuid,
    pub requester_role: UserRole,
    pub requester_name: String,
    pub requester_dept: Option<String>,
    pub requested_changes: String,
    pub request_comment: Option<String>,
}

/// A request row joined with the target/decider display fields the
/// listing pages render. Joined names that no longer resolve come back
/// as `None` and render as a dash.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RequestSummary {
    pub id: Uuid,
    pub target: RequestTarget,
    pub kpi_id: Option<Uuid>,
    pub kra_id: Uuid,
    /// Name of the targeted KPI, if it still exists.
    pub kpi_name: Option<String>,
    /// KRA name, if the KRA still exists.
    pub kra_name: Option<String>,
    pub requester_id: Uuid,
    pub requester_role: UserRole,
    pub requester_name: String,
    pub requester_dept: Option<String>,
    pub requested_changes: String,
    pub request_comment: Option<String>,
    pub status: RequestStatus,
    pub decided_by: Option<Uuid>,
    /// Decider display name, once decided.
    pub decided_by_name: Option<String>,
    pub decision_comment: Option<String>,
    pub decided_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl RequestSummary {
    /// Best-effort parse of the stored change payload. `None` means the
    /// payload is not valid JSON and should render as invalid.
    pub fn parsed_changes(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.requested_changes).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn request(changes: &str) -> RequestSummary {
        RequestSummary {
            id: Uuid::new_v4(),
            target: RequestTarget::Kpi,
            kpi_id: Some(Uuid::new_v4()),
            kra_id: Uuid::new_v4(),
            kpi_name: Some("Demos".to_string()),
            kra_name: Some("Growth".to_string()),
            requester_id: Uuid::new_v4(),
            requester_role: UserRole::Employee,
            requester_name: "Alice".to_string(),
            requester_dept: Some("Sales".to_string()),
            requested_changes: changes.to_string(),
            request_comment: None,
            status: RequestStatus::Pending,
            decided_by: None,
            decided_by_name: None,
            decision_comment: None,
            decided_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_parsed_changes_valid_json() {
        let r = request(r#"{"percentage":{"from":40,"to":60}}"#);
        let parsed = r.parsed_changes().unwrap();
        assert_eq!(parsed["percentage"]["to"], 60);
    }

    #[test]
    fn test_parsed_changes_malformed_is_none() {
        assert!(request("{not json").parsed_changes().is_none());
    }
}
