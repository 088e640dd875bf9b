use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::domain::errors::ModelError;
use crate::domain::errors::ValidationError;
use crate::domain::gallery::models::GalleryId;
use crate::domain::gallery::models::Image;
use crate::domain::gallery::ports::ImageStore;

/// Image files on local disk under `{root}/galleries/{gallery_id}/`.
#[derive(Debug, Clone)]
pub struct FilesystemImageStore {
    root: PathBuf,
}

impl FilesystemImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn gallery_dir(&self, gallery_id: &GalleryId) -> PathBuf {
        self.root.join("galleries").join(gallery_id.to_string())
    }
}

/// Reduce a client supplied name to its final path component.
fn sanitize_file_name(file_name: &str) -> Result<String, ModelError> {
    let name = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err(ValidationError::ImageNameInvalid.into());
    }
    Ok(name.to_string())
}

#[async_trait]
impl ImageStore for FilesystemImageStore {
    async fn create(
        &self,
        gallery_id: &GalleryId,
        file_name: &str,
        contents: &[u8],
    ) -> Result<Image, ModelError> {
        let file_name = sanitize_file_name(file_name)?;
        let dir = self.gallery_dir(gallery_id);

        fs::create_dir_all(&dir)
            .await
            .map_err(|e| ModelError::Unexpected(format!("Failed to create image directory: {}", e)))?;
        fs::write(dir.join(&file_name), contents)
            .await
            .map_err(|e| ModelError::Unexpected(format!("Failed to write image: {}", e)))?;

        tracing::debug!(gallery_id = %gallery_id, file_name = %file_name, "Image stored");
        Ok(Image::new(*gallery_id, file_name))
    }

    async fn list(&self, gallery_id: &GalleryId) -> Result<Vec<Image>, ModelError> {
        let mut entries = match fs::read_dir(self.gallery_dir(gallery_id)).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(ModelError::Unexpected(format!(
                    "Failed to read image directory: {}",
                    e
                )))
            }
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ModelError::Unexpected(e.to_string()))?
        {
            let is_file = entry
                .file_type()
                .await
                .map(|t| t.is_file())
                .unwrap_or(false);
            if is_file {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();

        Ok(names
            .into_iter()
            .map(|name| Image::new(*gallery_id, name))
            .collect())
    }

    async fn delete(&self, image: &Image) -> Result<(), ModelError> {
        let file_name = sanitize_file_name(&image.file_name)?;
        let path = self.gallery_dir(&image.gallery_id).join(file_name);

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ModelError::NotFound),
            Err(e) => Err(ModelError::Unexpected(format!(
                "Failed to delete image: {}",
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_last_component() {
        assert_eq!(sanitize_file_name("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_file_name("C:\\photos\\cat.png").unwrap(), "cat.png");
        assert_eq!(sanitize_file_name("dog.jpg").unwrap(), "dog.jpg");
    }

    #[test]
    fn test_sanitize_rejects_empty_names() {
        for name in ["", "..", "photos/", "  "] {
            assert!(matches!(
                sanitize_file_name(name),
                Err(ModelError::Validation(ValidationError::ImageNameInvalid))
            ));
        }
    }

    #[tokio::test]
    async fn test_list_missing_gallery_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilesystemImageStore::new(dir.path());

        let images = store.list(&GalleryId::new()).await.unwrap();

        assert!(images.is_empty());
    }

    #[tokio::test]
    async fn test_create_list_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilesystemImageStore::new(dir.path());
        let gallery_id = GalleryId::new();

        store.create(&gallery_id, "b.png", b"bbb").await.unwrap();
        store.create(&gallery_id, "a.png", b"aaa").await.unwrap();

        let images = store.list(&gallery_id).await.unwrap();
        let names: Vec<_> = images.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.png"]);

        store.delete(&images[0]).await.unwrap();
        assert_eq!(store.list(&gallery_id).await.unwrap().len(), 1);

        assert!(matches!(
            store.delete(&images[0]).await,
            Err(ModelError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_create_same_name_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilesystemImageStore::new(dir.path());
        let gallery_id = GalleryId::new();

        store.create(&gallery_id, "a.png", b"first").await.unwrap();
        store.create(&gallery_id, "a.png", b"second").await.unwrap();

        let path = dir
            .path()
            .join("galleries")
            .join(gallery_id.to_string())
            .join("a.png");
        assert_eq!(std::fs::read(path).unwrap(), b"second");
        assert_eq!(store.list(&gallery_id).await.unwrap().len(), 1);
    }
}
