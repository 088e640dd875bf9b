use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::errors::ModelError;
use crate::domain::errors::ValidationError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

const USER_COLUMNS: &str = "id, first_name, last_name, email, password_hash, \
                            remember_token_hash, created_at, updated_at, deleted_at";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<User, ModelError> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE {column} = $1 AND deleted_at IS NULL"
        );

        sqlx::query_as::<_, UserRow>(&query)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map(User::from)
            .map_err(ModelError::from)
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    remember_token_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            password: None,
            password_hash: row.password_hash,
            remember_token: None,
            remember_token_hash: row.remember_token_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

fn map_write_error(e: sqlx::Error) -> ModelError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
            return ValidationError::EmailTaken.into();
        }
    }
    ModelError::Unexpected(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, ModelError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, first_name, last_name, email, password_hash,
                               remember_token_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id.0)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.remember_token_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, ModelError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL");

        sqlx::query_as::<_, UserRow>(&query)
            .bind(id.0)
            .fetch_one(&self.pool)
            .await
            .map(User::from)
            .map_err(ModelError::from)
    }

    async fn find_by_email(&self, email: &str) -> Result<User, ModelError> {
        self.find_one("email", email).await
    }

    async fn find_by_remember_token(&self, token_hash: &str) -> Result<User, ModelError> {
        self.find_one("remember_token_hash", token_hash).await
    }

    async fn update(&self, user: User) -> Result<User, ModelError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, email = $4, password_hash = $5,
                remember_token_hash = $6, updated_at = $7
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(user.id.0)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.remember_token_hash)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(ModelError::NotFound);
        }

        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), ModelError> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| ModelError::Unexpected(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ModelError::NotFound);
        }

        Ok(())
    }
}
