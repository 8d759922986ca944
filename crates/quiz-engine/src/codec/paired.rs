//! Codecs for types with two option sequences
//!
//! Both sequences claim their attachments up front and then resolve together,
//! so every image of the question uploads concurrently. Ordinals restart at 0
//! in each sequence.

use super::{mismatched, EncodeScope, OptionCodec};
use crate::error::QuizError;
use crate::files::Attachments;
use crate::resolver::ClaimedBatch;
use quiz_options::{
    parse_input, DragAndDropInput, DragAndDropOptions, MatchingInput, MatchingOptions,
    OptionEntry, OptionsError, ParsedOptions, Placeholder, QuestionType, StoredOptions,
};

async fn resolve_pair(
    scope: &EncodeScope<'_>,
    first: Vec<Placeholder>,
    second: Vec<Placeholder>,
    attachments: &mut Attachments,
) -> (Vec<OptionEntry>, Vec<OptionEntry>) {
    let first = ClaimedBatch::claim(first, attachments);
    let second = ClaimedBatch::claim(second, attachments);
    tokio::join!(
        scope.resolver.resolve(scope.ctx, &scope.target, first),
        scope.resolver.resolve(scope.ctx, &scope.target, second),
    )
}

/// `MATCHING`
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchingCodec;

#[async_trait::async_trait]
impl OptionCodec for MatchingCodec {
    fn question_type(&self) -> QuestionType {
        QuestionType::Matching
    }

    fn parse(&self, raw: &str) -> Result<ParsedOptions, OptionsError> {
        parse_input::<MatchingInput>(raw).map(ParsedOptions::Matching)
    }

    async fn encode(
        &self,
        scope: &EncodeScope<'_>,
        input: ParsedOptions,
        attachments: &mut Attachments,
    ) -> Result<StoredOptions, QuizError> {
        let input = match input {
            ParsedOptions::Matching(input) => input,
            other => return Err(mismatched(QuestionType::Matching, &other)),
        };
        let (left, right) = resolve_pair(scope, input.options1, input.options2, attachments).await;
        Ok(StoredOptions::Matching(MatchingOptions { left, right }))
    }
}

/// `DRAG_AND_DROP`
#[derive(Debug, Clone, Copy, Default)]
pub struct DragAndDropCodec;

#[async_trait::async_trait]
impl OptionCodec for DragAndDropCodec {
    fn question_type(&self) -> QuestionType {
        QuestionType::DragAndDrop
    }

    fn parse(&self, raw: &str) -> Result<ParsedOptions, OptionsError> {
        parse_input::<DragAndDropInput>(raw).map(ParsedOptions::DragAndDrop)
    }

    async fn encode(
        &self,
        scope: &EncodeScope<'_>,
        input: ParsedOptions,
        attachments: &mut Attachments,
    ) -> Result<StoredOptions, QuizError> {
        let input = match input {
            ParsedOptions::DragAndDrop(input) => input,
            other => return Err(mismatched(QuestionType::DragAndDrop, &other)),
        };
        let (boxes, options) = resolve_pair(scope, input.boxes, input.options, attachments).await;
        Ok(StoredOptions::DragAndDrop(DragAndDropOptions { boxes, options }))
    }
}
