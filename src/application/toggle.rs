//! Generic add/remove toggle over a uniquely keyed store.
//!
//! Likes and follows share the same semantics: if a record exists for the
//! key it is removed, otherwise one is created. Two concurrent toggles that
//! both see "absent" race on the store's unique key; the loser's insert
//! fails with `ErrorCode::Conflict`, which means the record exists, so the
//! loser reports `Added` as well.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::interaction::ToggleOutcome;

/// A store keyed by a unique `Key`, seen through the lens of toggling.
#[async_trait]
pub trait ToggleStore: Send + Sync {
    type Key: Send + Sync;
    type Record: Send + Sync;

    async fn find(&self, key: &Self::Key) -> Result<Option<Self::Record>, DomainError>;

    /// Create a record for `key`. Must fail with `ErrorCode::Conflict` if one
    /// already exists.
    async fn create(&self, key: &Self::Key) -> Result<Self::Record, DomainError>;

    /// Remove `record`. Removing an already-removed record succeeds.
    async fn remove(&self, record: &Self::Record) -> Result<(), DomainError>;
}

/// Flip the presence of the record at `key`.
pub async fn toggle<S>(store: &S, key: &S::Key) -> Result<ToggleOutcome<S::Record>, DomainError>
where
    S: ToggleStore + ?Sized,
{
    if let Some(existing) = store.find(key).await? {
        store.remove(&existing).await?;
        return Ok(ToggleOutcome::removed());
    }

    match store.create(key).await {
        Ok(record) => Ok(ToggleOutcome::added(Some(record))),
        Err(err) if err.is_conflict() => {
            tracing::debug!("Toggle lost insert race; treating as added");
            let winner = store.find(key).await?;
            Ok(ToggleOutcome::added(winner))
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::interaction::ToggleState;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Set of keys. `phantom_insert` makes the next create fail with
    /// Conflict after inserting, as if a concurrent caller had won.
    #[derive(Default)]
    struct KeySet {
        keys: Mutex<HashSet<u32>>,
        phantom_insert: Mutex<bool>,
        fail_find: bool,
    }

    #[async_trait]
    impl ToggleStore for KeySet {
        type Key = u32;
        type Record = u32;

        async fn find(&self, key: &u32) -> Result<Option<u32>, DomainError> {
            if self.fail_find {
                return Err(DomainError::upstream("store down"));
            }
            Ok(self.keys.lock().unwrap().get(key).copied())
        }

        async fn create(&self, key: &u32) -> Result<u32, DomainError> {
            let mut keys = self.keys.lock().unwrap();
            let mut phantom = self.phantom_insert.lock().unwrap();
            if *phantom {
                *phantom = false;
                keys.insert(*key);
                return Err(DomainError::conflict("duplicate"));
            }
            if !keys.insert(*key) {
                return Err(DomainError::conflict("duplicate"));
            }
            Ok(*key)
        }

        async fn remove(&self, record: &u32) -> Result<(), DomainError> {
            self.keys.lock().unwrap().remove(record);
            Ok(())
        }
    }

    #[tokio::test]
    async fn toggling_twice_returns_to_absent() {
        let store = KeySet::default();

        let first = toggle(&store, &7).await.unwrap();
        assert_eq!(first.state, ToggleState::Added);
        assert_eq!(first.record, Some(7));

        let second = toggle(&store, &7).await.unwrap();
        assert_eq!(second.state, ToggleState::Removed);
        assert!(store.find(&7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn conflict_on_create_reports_added_with_winner() {
        let store = KeySet::default();
        *store.phantom_insert.lock().unwrap() = true;

        let outcome = toggle(&store, &3).await.unwrap();
        assert!(outcome.is_added());
        assert_eq!(outcome.record, Some(3));
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let store = KeySet {
            fail_find: true,
            ..KeySet::default()
        };
        let err = toggle(&store, &1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Upstream);
    }
}
