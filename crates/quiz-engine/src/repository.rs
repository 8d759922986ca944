//! Repository collaborator contracts
//!
//! The engine hands canonical documents to the repository as opaque text and
//! gets them back unopened. Ordering, scoring and transactions live behind
//! these traits.

use crate::error::RepositoryError;
use crate::files::UploadedImage;
use quiz_options::QuestionType;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate new id
            #[inline]
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Quiz identifier
    QuizId
);
uuid_id!(
    /// Question identifier
    QuestionId
);
uuid_id!(
    /// Category identifier
    CategoryId
);

/// Question ready to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestionRecord {
    /// Id chosen before images were stored under it
    pub id: QuestionId,
    /// Owning quiz
    pub quiz_id: QuizId,
    /// Type tag selecting the codec
    pub question_type: QuestionType,
    /// Question text
    pub text: String,
    /// Serialized canonical options document
    pub options_json: String,
}

/// Persisted question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    /// Question id
    pub id: QuestionId,
    /// Owning quiz
    pub quiz_id: QuizId,
    /// Type tag selecting the codec
    pub question_type: QuestionType,
    /// Question text
    pub text: String,
    /// Serialized canonical options document, exactly as stored
    pub options_json: String,
    /// Position within the quiz, assigned by the repository
    pub position: u32,
}

/// Selects questions by id and/or quiz
///
/// An empty filter matches every question at the repository level;
/// bulk deletion through the service refuses it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    /// Only this question
    pub id: Option<QuestionId>,
    /// Only questions of this quiz
    pub quiz_id: Option<QuizId>,
}

impl QuestionFilter {
    /// Every question of a quiz
    #[inline]
    #[must_use]
    pub fn quiz(quiz_id: QuizId) -> Self {
        Self {
            id: None,
            quiz_id: Some(quiz_id),
        }
    }

    /// One question of a quiz
    #[inline]
    #[must_use]
    pub fn question(quiz_id: QuizId, id: QuestionId) -> Self {
        Self {
            id: Some(id),
            quiz_id: Some(quiz_id),
        }
    }

    /// One question, whatever quiz holds it
    #[inline]
    #[must_use]
    pub fn id(id: QuestionId) -> Self {
        Self {
            id: Some(id),
            quiz_id: None,
        }
    }

    /// Whether the filter names neither a question nor a quiz
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.quiz_id.is_none()
    }

    /// Whether `record` satisfies this filter
    #[must_use]
    pub fn matches(&self, record: &QuestionRecord) -> bool {
        self.id.map_or(true, |id| id == record.id)
            && self.quiz_id.map_or(true, |quiz_id| quiz_id == record.quiz_id)
    }
}

/// Question storage
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Whether the quiz exists
    async fn quiz_exists(&self, quiz_id: QuizId) -> Result<bool, RepositoryError>;

    /// Persist a question and assign its position
    async fn insert_question(
        &self,
        question: NewQuestionRecord,
    ) -> Result<QuestionRecord, RepositoryError>;

    /// Fetch matching questions
    async fn find_questions(
        &self,
        filter: &QuestionFilter,
    ) -> Result<Vec<QuestionRecord>, RepositoryError>;

    /// Remove matching questions, returning how many were removed
    async fn delete_questions(&self, filter: &QuestionFilter) -> Result<u64, RepositoryError>;
}

/// Persisted category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    /// Category id
    pub id: CategoryId,
    /// Display name
    pub name: String,
    /// Files service id of the cover image
    pub image_id: Option<String>,
    /// Public URL of the cover image
    pub image_url: Option<String>,
}

/// Metadata change applied to a category in one commit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryUpdate {
    /// New name
    pub name: Option<String>,
    /// New image, already uploaded
    pub image: Option<UploadedImage>,
}

/// Category storage
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Fetch a category
    async fn get_category(&self, id: CategoryId) -> Result<Option<CategoryRecord>, RepositoryError>;

    /// Apply `update` and return the new state
    async fn update_category(
        &self,
        id: CategoryId,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, RepositoryError>;
}
