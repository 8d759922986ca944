//! Codec for `ORDERING` questions

use super::{mismatched, EncodeScope, OptionCodec};
use crate::error::QuizError;
use crate::files::Attachments;
use quiz_options::{
    parse_input, OptionsError, OrderingInput, OrderingOptions, ParsedOptions, QuestionType,
    StoredOptions,
};

/// `ORDERING`
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderingCodec;

#[async_trait::async_trait]
impl OptionCodec for OrderingCodec {
    fn question_type(&self) -> QuestionType {
        QuestionType::Ordering
    }

    fn parse(&self, raw: &str) -> Result<ParsedOptions, OptionsError> {
        parse_input::<OrderingInput>(raw).map(ParsedOptions::Ordering)
    }

    async fn encode(
        &self,
        scope: &EncodeScope<'_>,
        input: ParsedOptions,
        attachments: &mut Attachments,
    ) -> Result<StoredOptions, QuizError> {
        let input = match input {
            ParsedOptions::Ordering(input) => input,
            other => return Err(mismatched(QuestionType::Ordering, &other)),
        };
        let options = scope
            .resolver
            .resolve_sequence(scope.ctx, &scope.target, input.options, attachments)
            .await;
        Ok(StoredOptions::Ordering(OrderingOptions {
            sorting_type: input.sorting_type,
            options,
        }))
    }
}
