use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::errors::ModelError;
use crate::domain::password_reset::models::PasswordReset;
use crate::domain::password_reset::models::PasswordResetId;
use crate::domain::password_reset::ports::PasswordResetRepository;
use crate::domain::user::models::UserId;

pub struct PostgresPasswordResetRepository {
    pool: PgPool,
}

impl PostgresPasswordResetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PasswordResetRow {
    id: Uuid,
    user_id: Uuid,
    token_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PasswordResetRow> for PasswordReset {
    fn from(row: PasswordResetRow) -> Self {
        Self {
            id: PasswordResetId(row.id),
            user_id: UserId(row.user_id),
            token: None,
            token_hash: row.token_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl PasswordResetRepository for PostgresPasswordResetRepository {
    async fn get_by_token(&self, token_hash: &str) -> Result<PasswordReset, ModelError> {
        sqlx::query_as::<_, PasswordResetRow>(
            r#"
            SELECT id, user_id, token_hash, created_at, updated_at
            FROM password_resets
            WHERE token_hash = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(token_hash)
        .fetch_one(&self.pool)
        .await
        .map(PasswordReset::from)
        .map_err(ModelError::from)
    }

    async fn create(&self, reset: PasswordReset) -> Result<PasswordReset, ModelError> {
        // One live request per user: a new request supersedes the old one.
        sqlx::query(
            r#"
            INSERT INTO password_resets (id, user_id, token_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) WHERE deleted_at IS NULL
            DO UPDATE SET id = EXCLUDED.id,
                          token_hash = EXCLUDED.token_hash,
                          created_at = EXCLUDED.created_at,
                          updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(reset.id.0)
        .bind(reset.user_id.0)
        .bind(&reset.token_hash)
        .bind(reset.created_at)
        .bind(reset.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ModelError::Unexpected(e.to_string()))?;

        Ok(reset)
    }

    async fn delete(&self, id: &PasswordResetId) -> Result<(), ModelError> {
        sqlx::query(
            "UPDATE password_resets SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| ModelError::Unexpected(e.to_string()))?;

        Ok(())
    }
}
