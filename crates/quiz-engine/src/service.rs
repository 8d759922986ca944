//! Question lifecycle orchestration
//!
//! Coordinates the codec registry, the image fan-out and the teardown walker
//! with the repository and files collaborators:
//! - Creates questions from raw option payloads plus attachments
//! - Deletes questions together with every image their documents own
//! - Lists the images a stored question owns

use crate::codec::{CodecRegistry, EncodeScope, OptionCodec};
use crate::config::EngineConfig;
use crate::context::RequestContext;
use crate::error::{FilesError, QuizError};
use crate::files::{Attachments, Files};
use crate::repository::{
    NewQuestionRecord, QuestionFilter, QuestionId, QuestionRecord, QuestionRepository, QuizId,
};
use crate::resolver::{ImageResolver, ImageTarget};
use crate::teardown::TeardownWalker;
use quiz_options::StoredOptions;
use std::fmt;
use std::sync::Arc;

/// Create request for one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    /// Raw type tag, e.g. `MULTIPLE_CH`
    pub question_type: String,
    /// Question text
    pub text: String,
    /// Raw options payload
    pub options: String,
}

impl NewQuestion {
    /// Create request
    pub fn new(
        question_type: impl Into<String>,
        text: impl Into<String>,
        options: impl Into<String>,
    ) -> Self {
        Self {
            question_type: question_type.into(),
            text: text.into(),
            options: options.into(),
        }
    }
}

/// Outcome of a deletion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletionSummary {
    /// Question records removed
    pub questions: u64,
    /// Images deleted
    pub images: usize,
}

/// Question lifecycle orchestrator
pub struct QuestionService {
    repository: Arc<dyn QuestionRepository>,
    files: Arc<dyn Files>,
    codecs: CodecRegistry,
    resolver: ImageResolver,
    walker: TeardownWalker,
}

impl QuestionService {
    /// Create service with the default codecs
    pub fn new(
        config: &EngineConfig,
        repository: Arc<dyn QuestionRepository>,
        files: Arc<dyn Files>,
    ) -> Self {
        Self {
            resolver: ImageResolver::new(
                Arc::clone(&files),
                config.question_image_domain.clone(),
                config.question_image_max_pixels,
            ),
            walker: TeardownWalker::new(Arc::clone(&files)),
            codecs: CodecRegistry::with_defaults(),
            repository,
            files,
        }
    }

    /// With codec registry
    #[inline]
    #[must_use]
    pub fn with_codecs(mut self, codecs: CodecRegistry) -> Self {
        self.codecs = codecs;
        self
    }

    /// Codec registry in use
    #[inline]
    #[must_use]
    pub fn codecs(&self) -> &CodecRegistry {
        &self.codecs
    }

    /// Create a question
    ///
    /// # Workflow
    /// 1. Resolve the type tag to a codec
    /// 2. Check the quiz exists
    /// 3. Parse and validate the options payload
    /// 4. Resolve option images and build the canonical document
    /// 5. Serialize and persist, deleting this request's images on failure
    ///
    /// Steps 1 to 3 have no side effects. Images whose upload fails are left
    /// out of the document without failing the request.
    ///
    /// # Errors
    /// - `QuizError::InvalidQuestionType` for an unknown tag
    /// - `QuizError::QuizNotFound` if the quiz does not exist
    /// - `QuizError::InvalidOptions` if the payload is rejected
    /// - `QuizError::CreationFailed` or `QuizError::Repository` if the
    ///   document cannot be serialized or persisted
    pub async fn create_question(
        &self,
        ctx: &RequestContext,
        quiz_id: QuizId,
        question: NewQuestion,
        mut attachments: Attachments,
    ) -> Result<QuestionRecord, QuizError> {
        // 1. Dispatch
        let codec = self.codecs.resolve(&question.question_type)?;
        let question_type = codec.question_type();

        // 2. Quiz
        if !self.repository.quiz_exists(quiz_id).await? {
            return Err(QuizError::QuizNotFound(quiz_id));
        }

        // 3. Parse
        let input = codec.parse(&question.options)?;

        // 4. Encode
        let question_id = QuestionId::new();
        let scope = EncodeScope {
            ctx,
            target: ImageTarget {
                quiz_id,
                question_id,
            },
            resolver: &self.resolver,
        };
        let document = codec.encode(&scope, input, &mut attachments).await?;

        // 5. Persist
        let options_json = match document.to_json() {
            Ok(json) => json,
            Err(err) => {
                self.compensate(ctx, &document).await;
                return Err(QuizError::CreationFailed(err.to_string()));
            }
        };

        let record = NewQuestionRecord {
            id: question_id,
            quiz_id,
            question_type,
            text: question.text,
            options_json,
        };
        match self.repository.insert_question(record).await {
            Ok(stored) => {
                tracing::info!(
                    request_id = %ctx.request_id(),
                    quiz_id = %quiz_id,
                    question_id = %stored.id,
                    question_type = %question_type,
                    images = document.image_ids().count(),
                    "question created"
                );
                Ok(stored)
            }
            Err(err) => {
                self.compensate(ctx, &document).await;
                Err(err.into())
            }
        }
    }

    /// Delete one question of a quiz with all its images
    ///
    /// # Errors
    /// - `QuizError::QuestionNotFound` if the quiz holds no such question
    /// - `QuizError::DeletionFailed` if teardown stops; the record is kept
    pub async fn delete_question(
        &self,
        ctx: &RequestContext,
        quiz_id: QuizId,
        question_id: QuestionId,
    ) -> Result<DeletionSummary, QuizError> {
        let records = self
            .repository
            .find_questions(&QuestionFilter::question(quiz_id, question_id))
            .await?;
        if records.is_empty() {
            return Err(QuizError::QuestionNotFound(question_id));
        }
        self.remove_records(ctx, records).await
    }

    /// Delete every matching question with all its images
    ///
    /// The filter must name a quiz, a question or both; an empty filter is
    /// rejected instead of matching every question of every quiz. Records are
    /// torn down and removed one at a time. On failure, records already
    /// processed stay deleted and the failing one is kept.
    ///
    /// # Errors
    /// - `QuizError::EmptyFilter` if `filter` names nothing
    /// - `QuizError::DeletionFailed` or `QuizError::Repository` from the
    ///   first record that could not be removed
    pub async fn delete_questions(
        &self,
        ctx: &RequestContext,
        filter: QuestionFilter,
    ) -> Result<DeletionSummary, QuizError> {
        if filter.is_empty() {
            return Err(QuizError::EmptyFilter);
        }
        let records = self.repository.find_questions(&filter).await?;
        self.remove_records(ctx, records).await
    }

    /// Image ids a stored question owns
    ///
    /// # Errors
    /// - `QuizError::QuestionNotFound` if the quiz holds no such question
    /// - `QuizError::DeletionFailed` if its document cannot be decoded
    pub async fn question_images(
        &self,
        quiz_id: QuizId,
        question_id: QuestionId,
    ) -> Result<Vec<String>, QuizError> {
        let record = self
            .repository
            .find_questions(&QuestionFilter::question(quiz_id, question_id))
            .await?
            .into_iter()
            .next()
            .ok_or(QuizError::QuestionNotFound(question_id))?;
        let codec = self.codec_for(&record)?;
        TeardownWalker::owned_images(codec.as_ref(), &record.options_json)
    }

    async fn remove_records(
        &self,
        ctx: &RequestContext,
        records: Vec<QuestionRecord>,
    ) -> Result<DeletionSummary, QuizError> {
        let mut summary = DeletionSummary::default();

        for record in records {
            let codec = self.codec_for(&record)?;
            let images = self
                .walker
                .teardown(ctx, codec.as_ref(), &record.options_json)
                .await?;
            let removed = self
                .repository
                .delete_questions(&QuestionFilter::id(record.id))
                .await?;

            tracing::info!(
                request_id = %ctx.request_id(),
                quiz_id = %record.quiz_id,
                question_id = %record.id,
                images,
                "question deleted"
            );
            summary.questions += removed;
            summary.images += images;
        }

        Ok(summary)
    }

    fn codec_for(&self, record: &QuestionRecord) -> Result<Arc<dyn OptionCodec>, QuizError> {
        self.codecs.get(record.question_type).ok_or_else(|| {
            QuizError::DeletionFailed(format!(
                "no codec for stored type {}",
                record.question_type
            ))
        })
    }

    /// Best-effort removal of images uploaded for a request that failed
    async fn compensate(&self, ctx: &RequestContext, document: &StoredOptions) {
        for image_id in document.image_ids() {
            match ctx.bounded(self.files.delete_image(ctx, image_id)).await {
                Ok(()) => {}
                Err(FilesError::NotFound(_)) => {
                    tracing::debug!(image_id = %image_id, "compensated image already gone");
                }
                Err(err) => {
                    tracing::warn!(
                        request_id = %ctx.request_id(),
                        image_id = %image_id,
                        error = %err,
                        "compensating image delete failed"
                    );
                }
            }
        }
    }
}

impl fmt::Debug for QuestionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionService")
            .field("codecs", &self.codecs)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}
