//! Codecs for types without option sequences

use super::{mismatched, EncodeScope, OptionCodec};
use crate::error::QuizError;
use crate::files::Attachments;
use quiz_options::{
    parse_input, OpenInput, OpenOptions, OptionsError, ParsedOptions, QuestionType, StoredOptions,
};

/// `TRUE_FALSE` and `SLIDER`
///
/// The payload is ignored and the document is always `{}`.
#[derive(Debug, Clone, Copy)]
pub struct NoOptionsCodec {
    question_type: QuestionType,
}

impl NoOptionsCodec {
    /// Codec for `TRUE_FALSE`
    #[inline]
    #[must_use]
    pub fn true_false() -> Self {
        Self {
            question_type: QuestionType::TrueFalse,
        }
    }

    /// Codec for `SLIDER`
    #[inline]
    #[must_use]
    pub fn slider() -> Self {
        Self {
            question_type: QuestionType::Slider,
        }
    }
}

#[async_trait::async_trait]
impl OptionCodec for NoOptionsCodec {
    fn question_type(&self) -> QuestionType {
        self.question_type
    }

    fn parse(&self, _raw: &str) -> Result<ParsedOptions, OptionsError> {
        Ok(ParsedOptions::NoOptions)
    }

    async fn encode(
        &self,
        _scope: &EncodeScope<'_>,
        input: ParsedOptions,
        _attachments: &mut Attachments,
    ) -> Result<StoredOptions, QuizError> {
        match input {
            ParsedOptions::NoOptions => Ok(StoredOptions::NoOptions),
            other => Err(mismatched(self.question_type, &other)),
        }
    }
}

/// `OPEN`
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenCodec;

#[async_trait::async_trait]
impl OptionCodec for OpenCodec {
    fn question_type(&self) -> QuestionType {
        QuestionType::Open
    }

    fn parse(&self, raw: &str) -> Result<ParsedOptions, OptionsError> {
        parse_input::<OpenInput>(raw).map(ParsedOptions::Open)
    }

    async fn encode(
        &self,
        _scope: &EncodeScope<'_>,
        input: ParsedOptions,
        _attachments: &mut Attachments,
    ) -> Result<StoredOptions, QuizError> {
        match input {
            ParsedOptions::Open(input) => Ok(StoredOptions::Open(OpenOptions {
                num_answers: input.num_answers,
            })),
            other => Err(mismatched(QuestionType::Open, &other)),
        }
    }
}
