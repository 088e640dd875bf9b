use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::ModelError;
use crate::domain::user::models::UserId;

/// Photo gallery owned by a single user.
///
/// `images` is never persisted; it is filled from the image store on read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    pub id: GalleryId,
    pub title: String,
    pub user_id: UserId,
    pub images: Vec<Image>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Gallery {
    pub fn new(title: String, user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: GalleryId::new(),
            title,
            user_id,
            images: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn owned_by(&self, user_id: &UserId) -> bool {
        self.user_id == *user_id
    }

    /// Split images into `n` columns, dealing them out round-robin.
    pub fn image_columns(&self, n: usize) -> Vec<Vec<Image>> {
        if n == 0 {
            return Vec::new();
        }

        let mut columns = vec![Vec::new(); n];
        for (i, image) in self.images.iter().enumerate() {
            columns[i % n].push(image.clone());
        }
        columns
    }
}

/// Gallery unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GalleryId(pub Uuid);

impl GalleryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a gallery ID from string.
    ///
    /// # Errors
    /// * `InvalidId` - String is not a UUID
    pub fn from_string(s: &str) -> Result<Self, ModelError> {
        Uuid::parse_str(s)
            .map(GalleryId)
            .map_err(|_| ModelError::InvalidId)
    }

    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for GalleryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GalleryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Image file stored under a gallery directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub gallery_id: GalleryId,
    pub file_name: String,
}

impl Image {
    pub fn new(gallery_id: GalleryId, file_name: String) -> Self {
        Self {
            gallery_id,
            file_name,
        }
    }

    /// Path relative to the image root, e.g. `galleries/{id}/{file}`.
    pub fn relative_path(&self) -> String {
        format!("galleries/{}/{}", self.gallery_id, self.file_name)
    }

    /// URL path the image is served under.
    pub fn path(&self) -> String {
        format!("/images/{}", self.relative_path())
    }
}
