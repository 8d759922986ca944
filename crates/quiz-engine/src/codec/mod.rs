//! Per-type option codecs
//!
//! Every question type is served by one [`OptionCodec`]:
//! - `parse` turns the raw payload into validated input, touching nothing external
//! - `encode` resolves option images and builds the canonical document
//! - `decode` reads a stored document back
//!
//! Codecs are looked up through [`CodecRegistry`], so adding a type means
//! registering a codec rather than editing the orchestrator.

mod multiple_choice;
mod ordering;
mod paired;
mod registry;
mod scalar;

pub use multiple_choice::MultipleChoiceCodec;
pub use ordering::OrderingCodec;
pub use paired::{DragAndDropCodec, MatchingCodec};
pub use registry::CodecRegistry;
pub use scalar::{NoOptionsCodec, OpenCodec};

use crate::context::RequestContext;
use crate::error::QuizError;
use crate::files::Attachments;
use crate::resolver::{ImageResolver, ImageTarget};
use quiz_options::{OptionsError, ParsedOptions, QuestionType, StoredOptions};

/// Everything an encode call may use besides its input
#[derive(Debug, Clone, Copy)]
pub struct EncodeScope<'a> {
    /// Caller request
    pub ctx: &'a RequestContext,
    /// Question the images belong to
    pub target: ImageTarget,
    /// Fan-out coordinator
    pub resolver: &'a ImageResolver,
}

/// Codec for one question type
#[async_trait::async_trait]
pub trait OptionCodec: Send + Sync {
    /// Question type served
    fn question_type(&self) -> QuestionType;

    /// Parse and validate a raw options payload
    ///
    /// # Errors
    /// `OptionsError` if the payload is malformed or violates a constraint
    fn parse(&self, raw: &str) -> Result<ParsedOptions, OptionsError>;

    /// Build the canonical document, resolving images through `scope`
    ///
    /// # Errors
    /// `QuizError::CreationFailed` if `input` was parsed by another codec
    async fn encode(
        &self,
        scope: &EncodeScope<'_>,
        input: ParsedOptions,
        attachments: &mut Attachments,
    ) -> Result<StoredOptions, QuizError>;

    /// Decode a stored document
    ///
    /// # Errors
    /// `OptionsError::Undecodable` if the text does not fit this type's layout
    fn decode(&self, stored: &str) -> Result<StoredOptions, OptionsError> {
        StoredOptions::decode(self.question_type(), stored)
    }
}

fn mismatched(question_type: QuestionType, input: &ParsedOptions) -> QuizError {
    QuizError::CreationFailed(format!(
        "{question_type} codec cannot encode {input:?}"
    ))
}
