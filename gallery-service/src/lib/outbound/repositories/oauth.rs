use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::errors::ModelError;
use crate::domain::oauth::models::OAuthCredential;
use crate::domain::oauth::models::OAuthId;
use crate::domain::oauth::models::OAuthToken;
use crate::domain::oauth::ports::OAuthRepository;
use crate::domain::user::models::UserId;

pub struct PostgresOAuthRepository {
    pool: PgPool,
}

impl PostgresOAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OAuthRow {
    id: Uuid,
    user_id: Uuid,
    provider: String,
    token: Json<OAuthToken>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OAuthRow> for OAuthCredential {
    fn from(row: OAuthRow) -> Self {
        Self {
            id: OAuthId(row.id),
            user_id: UserId(row.user_id),
            provider: row.provider,
            token: row.token.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl OAuthRepository for PostgresOAuthRepository {
    async fn find(&self, user_id: &UserId, provider: &str) -> Result<OAuthCredential, ModelError> {
        sqlx::query_as::<_, OAuthRow>(
            r#"
            SELECT id, user_id, provider, token, created_at, updated_at
            FROM oauth_credentials
            WHERE user_id = $1 AND provider = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(user_id.0)
        .bind(provider)
        .fetch_one(&self.pool)
        .await
        .map(OAuthCredential::from)
        .map_err(ModelError::from)
    }

    async fn create(&self, credential: OAuthCredential) -> Result<OAuthCredential, ModelError> {
        sqlx::query(
            r#"
            INSERT INTO oauth_credentials (id, user_id, provider, token, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(credential.id.0)
        .bind(credential.user_id.0)
        .bind(&credential.provider)
        .bind(Json(&credential.token))
        .bind(credential.created_at)
        .bind(credential.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ModelError::Unexpected(e.to_string()))?;

        Ok(credential)
    }

    async fn delete(&self, id: &OAuthId) -> Result<(), ModelError> {
        sqlx::query(
            "UPDATE oauth_credentials SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| ModelError::Unexpected(e.to_string()))?;

        Ok(())
    }
}
