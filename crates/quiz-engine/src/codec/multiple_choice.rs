//! Codec for `MULTIPLE_CH` questions

use super::{mismatched, EncodeScope, OptionCodec};
use crate::error::QuizError;
use crate::files::Attachments;
use quiz_options::{
    parse_input, MultipleChoiceInput, MultipleChoiceOptions, OptionsError, ParsedOptions,
    QuestionType, StoredOptions,
};

/// `MULTIPLE_CH`
#[derive(Debug, Clone, Copy, Default)]
pub struct MultipleChoiceCodec;

#[async_trait::async_trait]
impl OptionCodec for MultipleChoiceCodec {
    fn question_type(&self) -> QuestionType {
        QuestionType::MultipleChoice
    }

    fn parse(&self, raw: &str) -> Result<ParsedOptions, OptionsError> {
        parse_input::<MultipleChoiceInput>(raw).map(ParsedOptions::MultipleChoice)
    }

    async fn encode(
        &self,
        scope: &EncodeScope<'_>,
        input: ParsedOptions,
        attachments: &mut Attachments,
    ) -> Result<StoredOptions, QuizError> {
        let input = match input {
            ParsedOptions::MultipleChoice(input) => input,
            other => return Err(mismatched(QuestionType::MultipleChoice, &other)),
        };
        let options = scope
            .resolver
            .resolve_sequence(scope.ctx, &scope.target, input.options, attachments)
            .await;
        Ok(StoredOptions::MultipleChoice(MultipleChoiceOptions {
            multiple_answer: input.multiple_answer,
            options,
        }))
    }
}
