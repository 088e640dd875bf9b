use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::errors::ModelError;
use crate::domain::gallery::models::Gallery;
use crate::domain::gallery::models::GalleryId;
use crate::domain::gallery::ports::GalleryRepository;
use crate::domain::user::models::UserId;

pub struct PostgresGalleryRepository {
    pool: PgPool,
}

impl PostgresGalleryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct GalleryRow {
    id: Uuid,
    title: String,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<GalleryRow> for Gallery {
    fn from(row: GalleryRow) -> Self {
        Self {
            id: GalleryId(row.id),
            title: row.title,
            user_id: UserId(row.user_id),
            images: Vec::new(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl GalleryRepository for PostgresGalleryRepository {
    async fn create(&self, gallery: Gallery) -> Result<Gallery, ModelError> {
        sqlx::query(
            r#"
            INSERT INTO galleries (id, title, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(gallery.id.0)
        .bind(&gallery.title)
        .bind(gallery.user_id.0)
        .bind(gallery.created_at)
        .bind(gallery.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ModelError::Unexpected(e.to_string()))?;

        Ok(gallery)
    }

    async fn find_by_id(&self, id: &GalleryId) -> Result<Gallery, ModelError> {
        sqlx::query_as::<_, GalleryRow>(
            r#"
            SELECT id, title, user_id, created_at, updated_at
            FROM galleries
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .fetch_one(&self.pool)
        .await
        .map(Gallery::from)
        .map_err(ModelError::from)
    }

    async fn find_by_user_id(&self, owner: &UserId) -> Result<Vec<Gallery>, ModelError> {
        let rows = sqlx::query_as::<_, GalleryRow>(
            r#"
            SELECT id, title, user_id, created_at, updated_at
            FROM galleries
            WHERE user_id = $1 AND deleted_at IS NULL
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ModelError::Unexpected(e.to_string()))?;

        Ok(rows.into_iter().map(Gallery::from).collect())
    }

    async fn update(&self, gallery: Gallery) -> Result<Gallery, ModelError> {
        let result = sqlx::query(
            r#"
            UPDATE galleries
            SET title = $2, user_id = $3, updated_at = $4
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(gallery.id.0)
        .bind(&gallery.title)
        .bind(gallery.user_id.0)
        .bind(gallery.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ModelError::Unexpected(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ModelError::NotFound);
        }

        Ok(gallery)
    }

    async fn delete(&self, id: &GalleryId) -> Result<(), ModelError> {
        sqlx::query("UPDATE galleries SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| ModelError::Unexpected(e.to_string()))?;

        Ok(())
    }
}
