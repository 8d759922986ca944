//! Quiz Engine - Question Option Processing
//!
//! Turns untyped per-type option payloads plus named image attachments into
//! canonical, persisted options documents, and tears those documents down
//! again when a question is removed:
//! - Resolves option images concurrently, keeping ordinals input-stable
//! - Dispatches parse/encode/decode through a per-type codec registry
//! - Deletes every image a stored document owns before its record goes
//! - Replaces category images synchronously before committing metadata
//!
//! # Architecture
//!
//! ```text
//! create: QuestionService → CodecRegistry → OptionCodec → ImageResolver → Files
//!                                                 ↓
//!                                       StoredOptions → QuestionRepository
//!
//! delete: QuestionRepository → TeardownWalker → Files → QuestionRepository
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use quiz_engine::{Attachments, EngineConfig, NewQuestion, QuestionService, RequestContext};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = QuestionService::new(&EngineConfig::default(), repository, files);
//!
//! let mut attachments = Attachments::new();
//! attachments.insert_bytes("imgA", png_bytes);
//!
//! let request = NewQuestion::new(
//!     "ORDERING",
//!     "Sort these",
//!     r#"{"sortingType":"LEAST_TO_MOST","options":[{"text":"Left","imageName":"imgA"},{"text":"Right"}]}"#,
//! );
//! let record = service
//!     .create_question(&RequestContext::new(), quiz_id, request, attachments)
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod category;
pub mod codec;
pub mod config;
pub mod context;
pub mod error;
pub mod files;
pub mod repository;
pub mod resolver;
pub mod service;
pub mod teardown;

// Re-exports for convenience
pub use category::{CategoryImage, CategoryPatch, CategoryService};
pub use codec::{CodecRegistry, EncodeScope, OptionCodec};
pub use config::{ConfigError, EngineConfig};
pub use context::RequestContext;
pub use error::{FilesError, QuizError, RepositoryError};
pub use files::{Attachments, Files, ImagePath, ImageStream, UploadedImage};
pub use repository::{
    CategoryId, CategoryRecord, CategoryRepository, CategoryUpdate, NewQuestionRecord,
    QuestionFilter, QuestionId, QuestionRecord, QuestionRepository, QuizId,
};
pub use resolver::{ClaimedBatch, ImageResolver, ImageTarget};
pub use service::{DeletionSummary, NewQuestion, QuestionService};
pub use teardown::TeardownWalker;

pub use quiz_options::{OptionEntry, OptionsError, Placeholder, QuestionType, StoredOptions};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the engine
    pub use crate::{
        Attachments, CategoryService, EngineConfig, Files, NewQuestion, QuestionFilter,
        QuestionRepository, QuestionService, QuizError, RequestContext,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
