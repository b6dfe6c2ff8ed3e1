//! PostgreSQL implementation of InteractionRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{storage_error, unique_violation};
use crate::domain::foundation::{
    DomainError, InteractionId, PrincipalId, TargetId, Timestamp,
};
use crate::domain::interaction::{Interaction, InteractionKey, TargetKind};
use crate::ports::InteractionRepository;

pub struct PostgresInteractionRepository {
    pool: PgPool,
}

impl PostgresInteractionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct InteractionRow {
    id: Uuid,
    principal_id: Uuid,
    target_id: Uuid,
    target_kind: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<InteractionRow> for Interaction {
    type Error = DomainError;

    fn try_from(row: InteractionRow) -> Result<Self, Self::Error> {
        let target_kind: TargetKind = row.target_kind.parse().map_err(|_| {
            DomainError::upstream(format!("Invalid target_kind value: {}", row.target_kind))
        })?;

        Ok(Interaction {
            id: InteractionId::from_uuid(row.id),
            principal_id: PrincipalId::from_uuid(row.principal_id),
            target_id: TargetId::from_uuid(row.target_id),
            target_kind,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl InteractionRepository for PostgresInteractionRepository {
    async fn find(&self, key: &InteractionKey) -> Result<Option<Interaction>, DomainError> {
        let row: Option<InteractionRow> = sqlx::query_as(
            r#"
            SELECT id, principal_id, target_id, target_kind, created_at
            FROM interactions
            WHERE principal_id = $1 AND target_id = $2 AND target_kind = $3
            "#,
        )
        .bind(key.principal_id.as_uuid())
        .bind(key.target_id.as_uuid())
        .bind(key.target_kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("load interaction", e))?;

        row.map(Interaction::try_from).transpose()
    }

    async fn insert(&self, interaction: &Interaction) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO interactions (id, principal_id, target_id, target_kind, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(interaction.id.as_uuid())
        .bind(interaction.principal_id.as_uuid())
        .bind(interaction.target_id.as_uuid())
        .bind(interaction.target_kind.as_str())
        .bind(interaction.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| match unique_violation(&e).as_deref() {
            Some("interactions_principal_target_kind_key") => {
                DomainError::conflict("Interaction already exists")
                    .with_detail("constraint", "interactions_principal_target_kind_key")
            }
            _ => storage_error("insert interaction", e),
        })?;

        Ok(())
    }

    async fn delete(&self, id: &InteractionId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM interactions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete interaction", e))?;

        Ok(())
    }

    async fn list_by_principal(
        &self,
        principal_id: &PrincipalId,
        kind: TargetKind,
    ) -> Result<Vec<Interaction>, DomainError> {
        let rows: Vec<InteractionRow> = sqlx::query_as(
            r#"
            SELECT id, principal_id, target_id, target_kind, created_at
            FROM interactions
            WHERE principal_id = $1 AND target_kind = $2
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(principal_id.as_uuid())
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("list interactions", e))?;

        rows.into_iter().map(Interaction::try_from).collect()
    }

    async fn count_for_targets(
        &self,
        kind: TargetKind,
        target_ids: &[TargetId],
    ) -> Result<u64, DomainError> {
        if target_ids.is_empty() {
            return Ok(0);
        }
        let uuids: Vec<Uuid> = target_ids.iter().map(|id| *id.as_uuid()).collect();

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM interactions WHERE target_kind = $1 AND target_id = ANY($2)",
        )
        .bind(kind.as_str())
        .bind(&uuids)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error("count interactions", e))?;

        Ok(count.max(0) as u64)
    }
}
