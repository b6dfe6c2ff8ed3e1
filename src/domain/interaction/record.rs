//! Interaction records and toggle outcomes.

use serde::Serialize;

use super::TargetKind;
use crate::domain::foundation::{InteractionId, PrincipalId, TargetId, Timestamp};

/// Unique key of an interaction. At most one record exists per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InteractionKey {
    pub principal_id: PrincipalId,
    pub target_id: TargetId,
    pub target_kind: TargetKind,
}

impl InteractionKey {
    pub fn new(principal_id: PrincipalId, target_id: TargetId, target_kind: TargetKind) -> Self {
        Self {
            principal_id,
            target_id,
            target_kind,
        }
    }
}

/// An active reaction. Its existence is the state; there is no flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interaction {
    pub id: InteractionId,
    pub principal_id: PrincipalId,
    pub target_id: TargetId,
    pub target_kind: TargetKind,
    pub created_at: Timestamp,
}

impl Interaction {
    pub fn new(key: InteractionKey) -> Self {
        Self {
            id: InteractionId::new(),
            principal_id: key.principal_id,
            target_id: key.target_id,
            target_kind: key.target_kind,
            created_at: Timestamp::now(),
        }
    }

    pub fn key(&self) -> InteractionKey {
        InteractionKey::new(self.principal_id, self.target_id, self.target_kind)
    }
}

/// Which way a toggle went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleState {
    Added,
    Removed,
}

/// Result of a toggle: the new state and, when added, the record.
///
/// `record` may be `None` on `Added` when a concurrent caller created the
/// record and it could not be read back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome<R> {
    pub state: ToggleState,
    pub record: Option<R>,
}

impl<R> ToggleOutcome<R> {
    pub fn added(record: Option<R>) -> Self {
        Self {
            state: ToggleState::Added,
            record,
        }
    }

    pub fn removed() -> Self {
        Self {
            state: ToggleState::Removed,
            record: None,
        }
    }

    pub fn is_added(&self) -> bool {
        self.state == ToggleState::Added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interaction_key_round_trips_through_record() {
        let key = InteractionKey::new(PrincipalId::new(), TargetId::new(), TargetKind::Post);
        let record = Interaction::new(key);
        assert_eq!(record.key(), key);
    }

    #[test]
    fn toggle_state_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ToggleState::Added).unwrap(), "\"added\"");
        assert_eq!(serde_json::to_string(&ToggleState::Removed).unwrap(), "\"removed\"");
    }

    #[test]
    fn removed_outcome_has_no_record() {
        let outcome: ToggleOutcome<Interaction> = ToggleOutcome::removed();
        assert!(!outcome.is_added());
        assert!(outcome.record.is_none());
    }
}
