//! Error types for the engine
//!
//! Provides error handling for:
//! - Question creation (type, options, images, persistence)
//! - Question teardown
//! - The files and repository collaborators

use crate::repository::{CategoryId, QuestionId, QuizId};
use quiz_options::{OptionsError, UnknownQuestionType};

/// Main engine error type
///
/// None of these are retried by the engine itself. [`QuizError::is_retryable`]
/// only tells the caller which ones are worth retrying.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    /// Quiz does not exist
    #[error("quiz not found: {0}")]
    QuizNotFound(QuizId),

    /// Question does not exist in the quiz
    #[error("question not found: {0}")]
    QuestionNotFound(QuestionId),

    /// Category does not exist
    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// Type tag names no registered codec
    #[error("invalid question type: '{0}'")]
    InvalidQuestionType(String),

    /// Options payload failed parsing or validation
    #[error("invalid options: {0}")]
    InvalidOptions(#[from] OptionsError),

    /// Files service rejected the image format
    #[error("invalid image type")]
    InvalidImageType,

    /// Any other files service failure on a surfaced upload
    #[error("image operation failed: {0}")]
    ImageOperationFailed(String),

    /// Options document could not be produced or persisted
    #[error("question creation failed: {0}")]
    CreationFailed(String),

    /// Stored document could not be torn down
    #[error("question deletion failed: {0}")]
    DeletionFailed(String),

    /// Bulk deletion filter names neither a quiz nor a question
    #[error("deletion filter must name a quiz or a question")]
    EmptyFilter,

    /// Repository failure
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl QuizError {
    /// Map a surfaced upload failure onto the local taxonomy
    #[must_use]
    pub fn from_upload(err: FilesError) -> Self {
        match err {
            FilesError::InvalidImageType => Self::InvalidImageType,
            other => Self::ImageOperationFailed(other.to_string()),
        }
    }

    /// Check if the caller may retry the operation unchanged
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::DeletionFailed(_)
                | Self::ImageOperationFailed(_)
                | Self::Repository(RepositoryError::Backend(_))
        )
    }

    /// Check if the request itself was at fault
    #[inline]
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::QuizNotFound(_)
                | Self::QuestionNotFound(_)
                | Self::CategoryNotFound(_)
                | Self::InvalidQuestionType(_)
                | Self::InvalidOptions(_)
                | Self::InvalidImageType
                | Self::EmptyFilter
        )
    }
}

impl From<UnknownQuestionType> for QuizError {
    fn from(err: UnknownQuestionType) -> Self {
        Self::InvalidQuestionType(err.0)
    }
}

/// Errors reported by the files collaborator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilesError {
    /// Stream is not an accepted image format
    #[error("invalid image type")]
    InvalidImageType,

    /// No image with this id
    #[error("image not found: {0}")]
    NotFound(String),

    /// Caller deadline passed before the call finished
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// Storage backend failure
    #[error("files backend failed: {0}")]
    Backend(String),
}

/// Errors reported by repository collaborators
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Record to update does not exist
    #[error("record not found")]
    NotFound,

    /// Storage backend failure
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}
