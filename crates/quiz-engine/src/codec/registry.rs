//! Codec registry
//!
//! Provides [`CodecRegistry`] for looking up the codec of a type tag.

use super::{
    DragAndDropCodec, MatchingCodec, MultipleChoiceCodec, NoOptionsCodec, OpenCodec, OptionCodec,
    OrderingCodec,
};
use crate::error::QuizError;
use quiz_options::QuestionType;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Registry of option codecs keyed by question type
#[derive(Clone, Default)]
pub struct CodecRegistry {
    codecs: HashMap<QuestionType, Arc<dyn OptionCodec>>,
}

impl CodecRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            codecs: HashMap::new(),
        }
    }

    /// Create registry with a codec for every question type
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(NoOptionsCodec::true_false()));
        registry.register(Arc::new(NoOptionsCodec::slider()));
        registry.register(Arc::new(OpenCodec));
        registry.register(Arc::new(MultipleChoiceCodec));
        registry.register(Arc::new(OrderingCodec));
        registry.register(Arc::new(MatchingCodec));
        registry.register(Arc::new(DragAndDropCodec));
        registry
    }

    /// Register a codec, replacing any previous one for its type
    pub fn register(&mut self, codec: Arc<dyn OptionCodec>) {
        self.codecs.insert(codec.question_type(), codec);
    }

    /// Codec for a question type
    #[inline]
    #[must_use]
    pub fn get(&self, question_type: QuestionType) -> Option<Arc<dyn OptionCodec>> {
        self.codecs.get(&question_type).cloned()
    }

    /// Codec for a raw type tag
    ///
    /// # Errors
    /// `QuizError::InvalidQuestionType` if the tag is unknown or has no codec
    pub fn resolve(&self, tag: &str) -> Result<Arc<dyn OptionCodec>, QuizError> {
        let question_type: QuestionType = tag.parse()?;
        self.get(question_type)
            .ok_or_else(|| QuizError::InvalidQuestionType(tag.to_string()))
    }

    /// Check if a codec is registered for `question_type`
    #[inline]
    #[must_use]
    pub fn contains(&self, question_type: QuestionType) -> bool {
        self.codecs.contains_key(&question_type)
    }

    /// Get number of registered codecs
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&str> = self.codecs.keys().map(QuestionType::as_str).collect();
        types.sort_unstable();
        f.debug_struct("CodecRegistry").field("types", &types).finish()
    }
}
