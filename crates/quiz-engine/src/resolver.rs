//! Image resolution fan-out
//!
//! Turns an ordered list of placeholders into an equal-length list of
//! canonical entries:
//! - Entries are pre-built at their input position, so ordinals never depend
//!   on which upload finishes first
//! - Every image-bearing entry gets its own upload future; all of them run
//!   concurrently and are joined before returning
//! - Each upload result is written back to the index it was claimed for
//! - A missing attachment or a failed upload leaves the entry without an image
//!
//! Uploads are futures owned by the caller's task, so dropping the caller
//! cancels them. Images already stored when that happens are not rolled back.

use crate::context::RequestContext;
use crate::files::{Attachments, Files, ImagePath, ImageStream};
use crate::repository::{QuestionId, QuizId};
use futures::future::join_all;
use quiz_options::{OptionEntry, Placeholder};
use std::fmt;
use std::sync::Arc;

/// Question whose option images are being stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageTarget {
    /// Quiz the question belongs to
    pub quiz_id: QuizId,
    /// Question owning the images
    pub question_id: QuestionId,
}

struct PendingImage {
    index: usize,
    name: String,
    stream: ImageStream,
}

/// One sequence of entries with its attachments already claimed
///
/// Claiming is synchronous, so several sequences of one request can claim from
/// the same [`Attachments`] and then resolve concurrently.
pub struct ClaimedBatch {
    entries: Vec<OptionEntry>,
    pending: Vec<PendingImage>,
}

impl ClaimedBatch {
    /// Build entries at their input positions and take the streams they name
    #[allow(clippy::cast_possible_truncation)]
    pub fn claim(placeholders: Vec<Placeholder>, attachments: &mut Attachments) -> Self {
        let mut entries = Vec::with_capacity(placeholders.len());
        let mut pending = Vec::new();

        for (index, placeholder) in placeholders.into_iter().enumerate() {
            let name = placeholder.image_name().map(str::to_string);
            entries.push(OptionEntry::new(index as u32, placeholder.text));

            let Some(name) = name else { continue };
            match attachments.take(&name) {
                Some(stream) => pending.push(PendingImage {
                    index,
                    name,
                    stream,
                }),
                None => tracing::debug!(image = %name, index, "no attachment for option image"),
            }
        }

        Self { entries, pending }
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the sequence is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of uploads this batch will start
    #[inline]
    #[must_use]
    pub fn upload_count(&self) -> usize {
        self.pending.len()
    }
}

impl fmt::Debug for ClaimedBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimedBatch")
            .field("entries", &self.entries)
            .field(
                "pending",
                &self.pending.iter().map(|p| (p.index, &p.name)).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Fan-out coordinator for option images
#[derive(Clone)]
pub struct ImageResolver {
    files: Arc<dyn Files>,
    domain: String,
    max_pixels: u32,
}

impl ImageResolver {
    /// Create resolver storing under `domain` with the given pixel budget
    pub fn new(files: Arc<dyn Files>, domain: impl Into<String>, max_pixels: u32) -> Self {
        Self {
            files,
            domain: domain.into(),
            max_pixels,
        }
    }

    /// Claim and resolve a single sequence
    pub async fn resolve_sequence(
        &self,
        ctx: &RequestContext,
        target: &ImageTarget,
        placeholders: Vec<Placeholder>,
        attachments: &mut Attachments,
    ) -> Vec<OptionEntry> {
        let batch = ClaimedBatch::claim(placeholders, attachments);
        self.resolve(ctx, target, batch).await
    }

    /// Upload every claimed image concurrently and join them
    ///
    /// Never fails: an upload error only drops that entry's image.
    pub async fn resolve(
        &self,
        ctx: &RequestContext,
        target: &ImageTarget,
        batch: ClaimedBatch,
    ) -> Vec<OptionEntry> {
        let ClaimedBatch {
            mut entries,
            pending,
        } = batch;
        if pending.is_empty() {
            return entries;
        }

        tracing::debug!(
            request_id = %ctx.request_id(),
            quiz_id = %target.quiz_id,
            question_id = %target.question_id,
            uploads = pending.len(),
            "resolving option images"
        );

        let uploads = pending.into_iter().map(|PendingImage { index, name, stream }| {
            let path = ImagePath::question_image(&self.domain, target.quiz_id, target.question_id, &name);
            async move {
                let result = ctx
                    .bounded(self.files.upload_image(ctx, stream, self.max_pixels, &path))
                    .await;
                (index, name, result)
            }
        });

        for (index, name, result) in join_all(uploads).await {
            match (result, entries.get_mut(index)) {
                (Ok(image), Some(entry)) => {
                    tracing::debug!(image = %name, index, image_id = %image.id, "option image stored");
                    entry.attach_image(image.id, image.url);
                }
                (Ok(image), None) => {
                    tracing::warn!(image = %name, index, image_id = %image.id, "option image resolved outside its sequence");
                }
                (Err(err), _) => {
                    tracing::warn!(image = %name, index, error = %err, "option image upload failed, storing entry without image");
                }
            }
        }

        entries
    }
}

impl fmt::Debug for ImageResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageResolver")
            .field("domain", &self.domain)
            .field("max_pixels", &self.max_pixels)
            .finish_non_exhaustive()
    }
}
