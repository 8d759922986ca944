//! In-memory repository double

use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use quiz_engine::{
    CategoryId, CategoryRecord, CategoryRepository, CategoryUpdate, NewQuestionRecord,
    QuestionFilter, QuestionId, QuestionRecord, QuestionRepository, QuizId, RepositoryError,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory question and category storage
///
/// Every trait call increments [`MemoryRepository::calls`].
#[derive(Default)]
pub struct MemoryRepository {
    quizzes: DashSet<QuizId>,
    questions: DashMap<QuestionId, QuestionRecord>,
    categories: DashMap<CategoryId, CategoryRecord>,
    calls: AtomicUsize,
    fail_inserts: AtomicBool,
    fail_updates: AtomicBool,
}

impl MemoryRepository {
    /// Empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a quiz and return its id
    pub fn add_quiz(&self) -> QuizId {
        let id = QuizId::new();
        self.quizzes.insert(id);
        id
    }

    /// Store a question record as-is
    pub fn seed_question(&self, record: QuestionRecord) {
        self.quizzes.insert(record.quiz_id);
        self.questions.insert(record.id, record);
    }

    /// Store a category as-is
    pub fn seed_category(&self, record: CategoryRecord) {
        self.categories.insert(record.id, record);
    }

    /// Make question inserts fail with a backend error
    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Make category updates fail with a backend error
    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Number of trait calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of stored questions
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Stored question by id
    pub fn question(&self, id: QuestionId) -> Option<QuestionRecord> {
        self.questions.get(&id).map(|r| r.value().clone())
    }

    /// Stored category by id
    pub fn category(&self, id: CategoryId) -> Option<CategoryRecord> {
        self.categories.get(&id).map(|r| r.value().clone())
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl QuestionRepository for MemoryRepository {
    async fn quiz_exists(&self, quiz_id: QuizId) -> Result<bool, RepositoryError> {
        self.record_call();
        Ok(self.quizzes.contains(&quiz_id))
    }

    async fn insert_question(
        &self,
        question: NewQuestionRecord,
    ) -> Result<QuestionRecord, RepositoryError> {
        self.record_call();
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("insert rejected").into());
        }
        let position = u32::try_from(
            self.questions
                .iter()
                .filter(|r| r.quiz_id == question.quiz_id)
                .count(),
        )
        .map_err(anyhow::Error::from)?;
        let record = QuestionRecord {
            id: question.id,
            quiz_id: question.quiz_id,
            question_type: question.question_type,
            text: question.text,
            options_json: question.options_json,
            position,
        };
        self.questions.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_questions(
        &self,
        filter: &QuestionFilter,
    ) -> Result<Vec<QuestionRecord>, RepositoryError> {
        self.record_call();
        let mut records: Vec<QuestionRecord> = self
            .questions
            .iter()
            .filter(|r| filter.matches(r.value()))
            .map(|r| r.value().clone())
            .collect();
        records.sort_by_key(|r| r.position);
        Ok(records)
    }

    async fn delete_questions(&self, filter: &QuestionFilter) -> Result<u64, RepositoryError> {
        self.record_call();
        let before = self.questions.len();
        self.questions.retain(|_, r| !filter.matches(r));
        Ok((before - self.questions.len()) as u64)
    }
}

#[async_trait]
impl CategoryRepository for MemoryRepository {
    async fn get_category(&self, id: CategoryId) -> Result<Option<CategoryRecord>, RepositoryError> {
        self.record_call();
        Ok(self.category(id))
    }

    async fn update_category(
        &self,
        id: CategoryId,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, RepositoryError> {
        self.record_call();
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("update rejected").into());
        }
        let mut record = self.categories.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        if let Some(name) = update.name {
            record.name = name;
        }
        if let Some(image) = update.image {
            record.image_id = Some(image.id);
            record.image_url = Some(image.url);
        }
        Ok(record.value().clone())
    }
}
