//! Category image replacement
//!
//! A new category image is uploaded and awaited before the metadata commit,
//! so the stored reference always points at an image that exists. The
//! superseded image is removed only after the commit succeeds.

use crate::config::EngineConfig;
use crate::context::RequestContext;
use crate::error::{FilesError, QuizError, RepositoryError};
use crate::files::{Files, ImagePath, ImageStream, UploadedImage};
use crate::repository::{CategoryId, CategoryRecord, CategoryRepository, CategoryUpdate};
use std::fmt;
use std::io::Cursor;
use std::sync::Arc;

/// Metadata changes for a category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    /// New name
    pub name: Option<String>,
}

impl CategoryPatch {
    /// Patch renaming the category
    #[inline]
    #[must_use]
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// Replacement image for a category
pub struct CategoryImage {
    /// File name used as last path segment
    pub name: String,
    /// Image bytes
    pub stream: ImageStream,
}

impl CategoryImage {
    /// Create from a stream
    pub fn new(name: impl Into<String>, stream: ImageStream) -> Self {
        Self {
            name: name.into(),
            stream,
        }
    }

    /// Create from in-memory bytes
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(name, Box::new(Cursor::new(bytes.into())))
    }
}

impl fmt::Debug for CategoryImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoryImage")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Category metadata and image updates
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
    files: Arc<dyn Files>,
    domain: String,
    max_pixels: u32,
}

impl CategoryService {
    /// Create service
    pub fn new(
        config: &EngineConfig,
        repository: Arc<dyn CategoryRepository>,
        files: Arc<dyn Files>,
    ) -> Self {
        Self {
            repository,
            files,
            domain: config.category_image_domain.clone(),
            max_pixels: config.category_image_max_pixels,
        }
    }

    /// Update category metadata, optionally replacing its image
    ///
    /// # Workflow
    /// 1. Fetch the category
    /// 2. Upload the new image and wait for it
    /// 3. Commit metadata and image reference together
    /// 4. Delete the superseded image
    ///
    /// If the commit fails the new image is deleted again. A failed delete of
    /// the superseded image is logged and does not fail the update.
    ///
    /// # Errors
    /// - `QuizError::CategoryNotFound` if the category does not exist
    /// - `QuizError::InvalidImageType` if the files service rejects the image
    /// - `QuizError::ImageOperationFailed` on any other upload failure
    /// - `QuizError::Repository` if the commit fails
    pub async fn update_category(
        &self,
        ctx: &RequestContext,
        id: CategoryId,
        patch: CategoryPatch,
        image: Option<CategoryImage>,
    ) -> Result<CategoryRecord, QuizError> {
        let current = self
            .repository
            .get_category(id)
            .await?
            .ok_or(QuizError::CategoryNotFound(id))?;

        let uploaded = match image {
            Some(image) => Some(self.upload(ctx, id, image).await?),
            None => None,
        };

        let update = CategoryUpdate {
            name: patch.name,
            image: uploaded.clone(),
        };
        let updated = match self.repository.update_category(id, update).await {
            Ok(updated) => updated,
            Err(err) => {
                if let Some(image) = &uploaded {
                    self.discard(ctx, &image.id, "uncommitted category image").await;
                }
                return Err(match err {
                    RepositoryError::NotFound => QuizError::CategoryNotFound(id),
                    other => other.into(),
                });
            }
        };

        if let (Some(new), Some(old)) = (&uploaded, &current.image_id) {
            if !old.is_empty() && *old != new.id {
                self.discard(ctx, old, "superseded category image").await;
            }
        }

        tracing::info!(
            request_id = %ctx.request_id(),
            category_id = %id,
            image_replaced = uploaded.is_some(),
            "category updated"
        );
        Ok(updated)
    }

    async fn upload(
        &self,
        ctx: &RequestContext,
        id: CategoryId,
        image: CategoryImage,
    ) -> Result<UploadedImage, QuizError> {
        let path = ImagePath::category_image(&self.domain, id, &image.name);
        ctx.bounded(self.files.upload_image(ctx, image.stream, self.max_pixels, &path))
            .await
            .map_err(QuizError::from_upload)
    }

    async fn discard(&self, ctx: &RequestContext, image_id: &str, what: &'static str) {
        match ctx.bounded(self.files.delete_image(ctx, image_id)).await {
            Ok(()) => {}
            Err(FilesError::NotFound(_)) => {
                tracing::debug!(image_id = %image_id, "{what} already gone");
            }
            Err(err) => {
                tracing::warn!(
                    request_id = %ctx.request_id(),
                    image_id = %image_id,
                    error = %err,
                    "failed to delete {what}"
                );
            }
        }
    }
}

impl fmt::Debug for CategoryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoryService")
            .field("domain", &self.domain)
            .field("max_pixels", &self.max_pixels)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCategoryRepository;
    use std::sync::Mutex;

    #[derive(Default)]
    struct ScriptedFiles {
        reject_uploads: bool,
        uploads: Mutex<Vec<String>>,
        deletes: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl Files for ScriptedFiles {
        async fn upload_image(
            &self,
            _ctx: &RequestContext,
            _image: ImageStream,
            _max_pixels: u32,
            path: &ImagePath,
        ) -> Result<UploadedImage, FilesError> {
            if self.reject_uploads {
                return Err(FilesError::InvalidImageType);
            }
            self.uploads.lock().unwrap().push(path.to_string());
            Ok(UploadedImage {
                id: "new".to_string(),
                url: "http://x/new".to_string(),
            })
        }

        async fn delete_image(&self, _ctx: &RequestContext, image_id: &str) -> Result<(), FilesError> {
            self.deletes.lock().unwrap().push(image_id.to_string());
            Ok(())
        }
    }

    fn category(id: CategoryId) -> CategoryRecord {
        CategoryRecord {
            id,
            name: "Science".to_string(),
            image_id: Some("old".to_string()),
            image_url: Some("http://x/old".to_string()),
        }
    }

    #[tokio::test]
    async fn missing_category_uploads_nothing() {
        let mut repository = MockCategoryRepository::new();
        repository.expect_get_category().returning(|_| Ok(None));
        repository.expect_update_category().never();
        let files = Arc::new(ScriptedFiles::default());
        let service = CategoryService::new(&EngineConfig::default(), Arc::new(repository), files.clone());

        let id = CategoryId::new();
        let err = service
            .update_category(
                &RequestContext::new(),
                id,
                CategoryPatch::default(),
                Some(CategoryImage::from_bytes("cover.png", vec![1u8])),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::CategoryNotFound(c) if c == id));
        assert!(files.uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejected_image_skips_commit() {
        let mut repository = MockCategoryRepository::new();
        repository.expect_get_category().returning(|id| Ok(Some(category(id))));
        repository.expect_update_category().never();
        let files = Arc::new(ScriptedFiles {
            reject_uploads: true,
            ..ScriptedFiles::default()
        });
        let service = CategoryService::new(&EngineConfig::default(), Arc::new(repository), files.clone());

        let err = service
            .update_category(
                &RequestContext::new(),
                CategoryId::new(),
                CategoryPatch::rename("Physics"),
                Some(CategoryImage::from_bytes("cover.txt", b"text".to_vec())),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::InvalidImageType));
        assert!(files.deletes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn commit_carries_uploaded_image_then_old_is_removed() {
        let mut repository = MockCategoryRepository::new();
        repository.expect_get_category().returning(|id| Ok(Some(category(id))));
        repository
            .expect_update_category()
            .withf(|_, update| {
                update.name.as_deref() == Some("Physics")
                    && update.image.as_ref().map(|i| i.id.as_str()) == Some("new")
            })
            .times(1)
            .returning(|id, update| {
                let image = update.image.unwrap();
                Ok(CategoryRecord {
                    id,
                    name: update.name.unwrap(),
                    image_id: Some(image.id),
                    image_url: Some(image.url),
                })
            });
        let files = Arc::new(ScriptedFiles::default());
        let service = CategoryService::new(&EngineConfig::default(), Arc::new(repository), files.clone());

        let id = CategoryId::new();
        let updated = service
            .update_category(
                &RequestContext::new(),
                id,
                CategoryPatch::rename("Physics"),
                Some(CategoryImage::from_bytes("cover.png", vec![1u8])),
            )
            .await
            .unwrap();

        assert_eq!(updated.image_id.as_deref(), Some("new"));
        assert_eq!(*files.uploads.lock().unwrap(), vec![format!("categories/{id}/cover.png")]);
        assert_eq!(*files.deletes.lock().unwrap(), vec!["old"]);
    }

    #[tokio::test]
    async fn failed_commit_removes_new_image() {
        let mut repository = MockCategoryRepository::new();
        repository.expect_get_category().returning(|id| Ok(Some(category(id))));
        repository
            .expect_update_category()
            .returning(|_, _| Err(RepositoryError::Backend(anyhow::anyhow!("conflict"))));
        let files = Arc::new(ScriptedFiles::default());
        let service = CategoryService::new(&EngineConfig::default(), Arc::new(repository), files.clone());

        let err = service
            .update_category(
                &RequestContext::new(),
                CategoryId::new(),
                CategoryPatch::default(),
                Some(CategoryImage::from_bytes("cover.png", vec![1u8])),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::Repository(_)));
        assert_eq!(*files.deletes.lock().unwrap(), vec!["new"]);
    }
}
