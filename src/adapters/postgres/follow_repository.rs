//! PostgreSQL implementation of FollowRepository.
//!
//! The `follow_edges_pair_key` constraint arbitrates concurrent follows of
//! the same pair. Counts are always computed from the edges.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{storage_error, unique_violation};
use crate::domain::foundation::{DomainError, FollowEdgeId, PrincipalId, Timestamp};
use crate::domain::relationship::{FollowEdge, FollowKey};
use crate::ports::FollowRepository;

pub struct PostgresFollowRepository {
    pool: PgPool,
}

impl PostgresFollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count_where(&self, column: &str, id: &PrincipalId) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM follow_edges WHERE {} = $1",
            column
        ))
        .bind(id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error("count follow edges", e))?;

        Ok(count.max(0) as u64)
    }

    async fn list_where(&self, column: &str, id: &PrincipalId) -> Result<Vec<FollowEdge>, DomainError> {
        let rows: Vec<FollowRow> = sqlx::query_as(&format!(
            r#"
            SELECT id, follower_id, followee_id, created_at
            FROM follow_edges
            WHERE {} = $1
            ORDER BY created_at DESC, id DESC
            "#,
            column
        ))
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("list follow edges", e))?;

        Ok(rows.into_iter().map(FollowEdge::from).collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FollowRow {
    id: Uuid,
    follower_id: Uuid,
    followee_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<FollowRow> for FollowEdge {
    fn from(row: FollowRow) -> Self {
        FollowEdge {
            id: FollowEdgeId::from_uuid(row.id),
            follower_id: PrincipalId::from_uuid(row.follower_id),
            followee_id: PrincipalId::from_uuid(row.followee_id),
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[async_trait]
impl FollowRepository for PostgresFollowRepository {
    async fn find(&self, key: &FollowKey) -> Result<Option<FollowEdge>, DomainError> {
        let row: Option<FollowRow> = sqlx::query_as(
            r#"
            SELECT id, follower_id, followee_id, created_at
            FROM follow_edges
            WHERE follower_id = $1 AND followee_id = $2
            "#,
        )
        .bind(key.follower_id().as_uuid())
        .bind(key.followee_id().as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("load follow edge", e))?;

        Ok(row.map(FollowEdge::from))
    }

    async fn insert(&self, edge: &FollowEdge) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO follow_edges (id, follower_id, followee_id, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(edge.id.as_uuid())
        .bind(edge.follower_id.as_uuid())
        .bind(edge.followee_id.as_uuid())
        .bind(edge.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| match unique_violation(&e).as_deref() {
            Some("follow_edges_pair_key") => DomainError::conflict("Already following")
                .with_detail("constraint", "follow_edges_pair_key"),
            _ => storage_error("insert follow edge", e),
        })?;

        Ok(())
    }

    async fn delete(&self, id: &FollowEdgeId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM follow_edges WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete follow edge", e))?;

        Ok(())
    }

    async fn list_followers(&self, channel_id: &PrincipalId) -> Result<Vec<FollowEdge>, DomainError> {
        self.list_where("followee_id", channel_id).await
    }

    async fn list_following(
        &self,
        follower_id: &PrincipalId,
    ) -> Result<Vec<FollowEdge>, DomainError> {
        self.list_where("follower_id", follower_id).await
    }

    async fn count_followers(&self, channel_id: &PrincipalId) -> Result<u64, DomainError> {
        self.count_where("followee_id", channel_id).await
    }

    async fn count_following(&self, follower_id: &PrincipalId) -> Result<u64, DomainError> {
        self.count_where("follower_id", follower_id).await
    }
}
