//! HTTP DTOs for likes, subscriptions and channel statistics.

use serde::Serialize;

use crate::domain::interaction::{Interaction, ToggleOutcome, ToggleState};
use crate::domain::relationship::MemberSummary;

/// Outcome of a like or follow toggle.
#[derive(Debug, Clone, Serialize)]
pub struct ToggleResponse<R> {
    pub state: ToggleState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<R>,
}

impl<R> From<ToggleOutcome<R>> for ToggleResponse<R> {
    fn from(outcome: ToggleOutcome<R>) -> Self {
        Self {
            state: outcome.state,
            record: outcome.record,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InteractionListResponse {
    pub items: Vec<Interaction>,
    pub count: usize,
}

impl From<Vec<Interaction>> for InteractionListResponse {
    fn from(items: Vec<Interaction>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberListResponse {
    pub members: Vec<MemberSummary>,
    pub count: usize,
}

impl From<Vec<MemberSummary>> for MemberListResponse {
    fn from(members: Vec<MemberSummary>) -> Self {
        Self {
            count: members.len(),
            members,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{PrincipalId, TargetId};
    use crate::domain::interaction::{InteractionKey, TargetKind};

    #[test]
    fn removed_toggle_serializes_without_record() {
        let response: ToggleResponse<Interaction> = ToggleOutcome::removed().into();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({"state": "removed"}));
    }

    #[test]
    fn added_toggle_carries_kind_tag() {
        let key = InteractionKey::new(PrincipalId::new(), TargetId::new(), TargetKind::ContentItem);
        let response: ToggleResponse<Interaction> =
            ToggleOutcome::added(Some(Interaction::new(key))).into();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["state"], "added");
        assert_eq!(json["record"]["target_kind"], "content_item");
    }
}
