//! PostgreSQL implementation of PrincipalRepository.
//!
//! Username and email uniqueness come from the `principals_username_key` and
//! `principals_email_key` constraints. Refresh rotation is a conditional
//! `UPDATE` keyed on the previous fingerprint. Profile updates each write
//! only their own columns in a single statement.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{storage_error, unique_violation};
use crate::domain::foundation::{DomainError, PrincipalId, Timestamp, ValidationError};
use crate::domain::principal::{
    CredentialHash, Email, FullName, Principal, PrincipalSummary, RefreshFingerprint, Username,
};
use crate::ports::PrincipalRepository;

pub struct PostgresPrincipalRepository {
    pool: PgPool,
}

impl PostgresPrincipalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PrincipalRow {
    id: Uuid,
    username: String,
    email: String,
    full_name: String,
    avatar_url: String,
    cover_image_url: Option<String>,
    credential_hash: String,
    refresh_fingerprint: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PrincipalRow> for Principal {
    type Error = DomainError;

    fn try_from(row: PrincipalRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = move |e: ValidationError| {
            DomainError::upstream(format!("Stored principal {} is invalid: {}", id, e))
        };

        Ok(Principal {
            id: PrincipalId::from_uuid(row.id),
            username: Username::new(&row.username).map_err(corrupt)?,
            email: Email::new(&row.email).map_err(corrupt)?,
            full_name: FullName::new(&row.full_name).map_err(corrupt)?,
            avatar_url: row.avatar_url,
            cover_image_url: row.cover_image_url,
            credential: CredentialHash::from_encoded(row.credential_hash),
            refresh_fingerprint: row.refresh_fingerprint.map(RefreshFingerprint::from_hex),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    id: Uuid,
    username: String,
    full_name: String,
    avatar_url: String,
}

impl From<SummaryRow> for PrincipalSummary {
    fn from(row: SummaryRow) -> Self {
        PrincipalSummary {
            id: PrincipalId::from_uuid(row.id),
            username: row.username,
            full_name: row.full_name,
            avatar_url: row.avatar_url,
        }
    }
}

const PRINCIPAL_COLUMNS: &str = r#"
    id, username, email, full_name, avatar_url, cover_image_url,
    credential_hash, refresh_fingerprint, created_at, updated_at
"#;

fn select_principal(filter: &str) -> String {
    format!("SELECT {} FROM principals WHERE {}", PRINCIPAL_COLUMNS, filter)
}

fn map_unique(e: sqlx::Error, action: &str) -> DomainError {
    match unique_violation(&e).as_deref() {
        Some("principals_username_key") => DomainError::conflict("Username is already taken")
            .with_detail("constraint", "principals_username_key"),
        Some("principals_email_key") => DomainError::conflict("Email is already registered")
            .with_detail("constraint", "principals_email_key"),
        _ => storage_error(action, e),
    }
}

fn missing(id: &PrincipalId) -> DomainError {
    DomainError::not_found(format!("Principal {} not found", id))
}

fn into_principal(row: Option<PrincipalRow>) -> Result<Option<Principal>, DomainError> {
    row.map(Principal::try_from).transpose()
}

#[async_trait]
impl PrincipalRepository for PostgresPrincipalRepository {
    async fn insert(&self, principal: &Principal) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO principals (
                id, username, email, full_name, avatar_url, cover_image_url,
                credential_hash, refresh_fingerprint, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(principal.id.as_uuid())
        .bind(principal.username.as_str())
        .bind(principal.email.as_str())
        .bind(principal.full_name.as_str())
        .bind(&principal.avatar_url)
        .bind(&principal.cover_image_url)
        .bind(principal.credential().as_str())
        .bind(principal.refresh_fingerprint().map(|f| f.as_str().to_string()))
        .bind(principal.created_at.as_datetime())
        .bind(principal.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique(e, "insert principal"))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &PrincipalId) -> Result<Option<Principal>, DomainError> {
        let row: Option<PrincipalRow> = sqlx::query_as(&select_principal("id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("load principal", e))?;

        into_principal(row)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Principal>, DomainError> {
        let row: Option<PrincipalRow> =
            sqlx::query_as(&select_principal("username = $1"))
                .bind(username.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| storage_error("load principal", e))?;

        into_principal(row)
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<Principal>, DomainError> {
        let row: Option<PrincipalRow> =
            sqlx::query_as(&select_principal("username = $1 OR email = $1"))
                .bind(login)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| storage_error("load principal", e))?;

        into_principal(row)
    }

    async fn find_summaries(
        &self,
        ids: &[PrincipalId],
    ) -> Result<Vec<PrincipalSummary>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows: Vec<SummaryRow> = sqlx::query_as(
            "SELECT id, username, full_name, avatar_url FROM principals WHERE id = ANY($1)",
        )
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("load principal summaries", e))?;

        Ok(rows.into_iter().map(PrincipalSummary::from).collect())
    }

    async fn update_account_details(
        &self,
        id: &PrincipalId,
        email: Option<&Email>,
        full_name: Option<&FullName>,
    ) -> Result<Principal, DomainError> {
        let row: Option<PrincipalRow> = sqlx::query_as(&format!(
            r#"
            UPDATE principals SET
                email = COALESCE($2, email),
                full_name = COALESCE($3, full_name),
                updated_at = now()
            WHERE id = $1
            RETURNING {}
            "#,
            PRINCIPAL_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(email.map(Email::as_str))
        .bind(full_name.map(FullName::as_str))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique(e, "update account details"))?;

        into_principal(row)?.ok_or_else(|| missing(id))
    }

    async fn swap_avatar(&self, id: &PrincipalId, url: &str) -> Result<String, DomainError> {
        // The row lock makes the returned previous value the one overwritten
        let previous: Option<String> = sqlx::query_scalar(
            r#"
            UPDATE principals AS p SET avatar_url = $2, updated_at = now()
            FROM (SELECT id, avatar_url FROM principals WHERE id = $1 FOR UPDATE) AS previous
            WHERE p.id = previous.id
            RETURNING previous.avatar_url
            "#,
        )
        .bind(id.as_uuid())
        .bind(url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("swap avatar", e))?;

        previous.ok_or_else(|| missing(id))
    }

    async fn swap_cover_image(
        &self,
        id: &PrincipalId,
        url: &str,
    ) -> Result<Option<String>, DomainError> {
        let previous: Option<Option<String>> = sqlx::query_scalar(
            r#"
            UPDATE principals AS p SET cover_image_url = $2, updated_at = now()
            FROM (SELECT id, cover_image_url FROM principals WHERE id = $1 FOR UPDATE) AS previous
            WHERE p.id = previous.id
            RETURNING previous.cover_image_url
            "#,
        )
        .bind(id.as_uuid())
        .bind(url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("swap cover image", e))?;

        previous.ok_or_else(|| missing(id))
    }

    async fn update_credential(
        &self,
        id: &PrincipalId,
        credential: &CredentialHash,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE principals SET credential_hash = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id.as_uuid())
        .bind(credential.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("update credential", e))?;

        if result.rows_affected() == 0 {
            return Err(missing(id));
        }
        Ok(())
    }

    async fn set_refresh_fingerprint(
        &self,
        id: &PrincipalId,
        fingerprint: Option<&RefreshFingerprint>,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE principals SET refresh_fingerprint = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(fingerprint.map(|f| f.as_str().to_string()))
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("set refresh fingerprint", e))?;

        if result.rows_affected() == 0 {
            return Err(missing(id));
        }
        Ok(())
    }

    async fn replace_refresh_fingerprint(
        &self,
        id: &PrincipalId,
        expected: &RefreshFingerprint,
        next: &RefreshFingerprint,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE principals SET refresh_fingerprint = $3
            WHERE id = $1 AND refresh_fingerprint = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(expected.as_str())
        .bind(next.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("rotate refresh fingerprint", e))?;

        Ok(result.rows_affected() == 1)
    }
}
