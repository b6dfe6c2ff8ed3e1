//! PostgreSQL-backed content catalog.
//!
//! Reads the `content_items`, `comments` and `posts` tables that the
//! content subsystems own.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::storage_error;
use crate::domain::channel::ChannelContent;
use crate::domain::foundation::{DomainError, PrincipalId, TargetId};
use crate::domain::interaction::TargetKind;
use crate::ports::ContentCatalog;

pub struct PostgresContentCatalog {
    pool: PgPool,
}

impl PostgresContentCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn table_for(kind: TargetKind) -> &'static str {
    match kind {
        TargetKind::ContentItem => "content_items",
        TargetKind::Comment => "comments",
        TargetKind::Post => "posts",
    }
}

#[async_trait]
impl ContentCatalog for PostgresContentCatalog {
    async fn target_exists(&self, kind: TargetKind, id: &TargetId) -> Result<bool, DomainError> {
        let exists: bool = sqlx::query_scalar(&format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)",
            table_for(kind)
        ))
        .bind(id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error("check target", e))?;

        Ok(exists)
    }

    async fn channel_content(&self, owner_id: &PrincipalId) -> Result<ChannelContent, DomainError> {
        let rows: Vec<(Uuid, i64)> =
            sqlx::query_as("SELECT id, views FROM content_items WHERE owner_id = $1")
                .bind(owner_id.as_uuid())
                .fetch_all(&self.pool)
                .await
                .map_err(|e| storage_error("load channel content", e))?;

        let mut content = ChannelContent::default();
        for (id, views) in rows {
            content.item_ids.push(TargetId::from_uuid(id));
            content.total_views += views.max(0) as u64;
        }
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_table() {
        for kind in TargetKind::ALL {
            assert!(!table_for(kind).is_empty());
        }
        assert_eq!(table_for(TargetKind::ContentItem), "content_items");
    }
}
