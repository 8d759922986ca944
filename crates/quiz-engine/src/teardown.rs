//! Teardown of stored option documents
//!
//! Before a question record is removed, every image its document references
//! is deleted through the files service. Deletion is sequential and stops at
//! the first failure, so the record is kept whenever an image may survive.

use crate::codec::OptionCodec;
use crate::context::RequestContext;
use crate::error::{FilesError, QuizError};
use crate::files::Files;
use std::fmt;
use std::sync::Arc;

/// Deletes the images a stored document owns
#[derive(Clone)]
pub struct TeardownWalker {
    files: Arc<dyn Files>,
}

impl TeardownWalker {
    /// Create walker deleting through `files`
    pub fn new(files: Arc<dyn Files>) -> Self {
        Self { files }
    }

    /// Image ids referenced by a stored document, in document order
    ///
    /// Types that never own images are not decoded at all.
    ///
    /// # Errors
    /// `QuizError::DeletionFailed` if the document cannot be decoded
    pub fn owned_images(codec: &dyn OptionCodec, stored: &str) -> Result<Vec<String>, QuizError> {
        if !codec.question_type().owns_images() {
            return Ok(Vec::new());
        }
        let document = codec
            .decode(stored)
            .map_err(|err| QuizError::DeletionFailed(err.to_string()))?;
        Ok(document.image_ids().map(str::to_string).collect())
    }

    /// Delete every image of `stored`, returning how many were deleted
    ///
    /// An image the files service no longer knows counts as already deleted,
    /// so a teardown that stopped halfway can be retried to completion. Such
    /// images are not counted.
    ///
    /// # Errors
    /// `QuizError::DeletionFailed` on an undecodable document or the first
    /// failed delete; images before it stay deleted
    pub async fn teardown(
        &self,
        ctx: &RequestContext,
        codec: &dyn OptionCodec,
        stored: &str,
    ) -> Result<usize, QuizError> {
        let image_ids = Self::owned_images(codec, stored)?;
        let mut deleted = 0;

        for image_id in &image_ids {
            match ctx.bounded(self.files.delete_image(ctx, image_id)).await {
                Ok(()) => deleted += 1,
                Err(FilesError::NotFound(_)) => {
                    tracing::debug!(
                        request_id = %ctx.request_id(),
                        image_id = %image_id,
                        "option image already gone"
                    );
                }
                Err(err) => {
                    tracing::error!(
                        request_id = %ctx.request_id(),
                        question_type = %codec.question_type(),
                        image_id = %image_id,
                        deleted,
                        error = %err,
                        "option image delete failed"
                    );
                    return Err(QuizError::DeletionFailed(format!(
                        "image {image_id}: {err}"
                    )));
                }
            }
        }

        tracing::debug!(
            request_id = %ctx.request_id(),
            question_type = %codec.question_type(),
            deleted,
            referenced = image_ids.len(),
            "option images deleted"
        );
        Ok(deleted)
    }
}

impl fmt::Debug for TeardownWalker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeardownWalker").finish_non_exhaustive()
    }
}
