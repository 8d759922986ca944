//! Quiz Options Wire Model
//!
//! Untyped per-type payloads in, canonical options documents out.
//!
//! # Core Concepts
//!
//! - [`QuestionType`]: Discriminator selecting one of the seven question behaviors
//! - [`Placeholder`]: Raw input entry `{text, imageName?}`
//! - [`OptionEntry`]: Persisted entry `{optId, txt, imId?, imUrl?}`
//! - [`StoredOptions`]: Canonical document for any question type, enumerable for image ids
//!
//! The short JSON keys (`optId`, `txt`, `imId`, `imUrl`, `sortTp`, `multAns`,
//! `nAnsw`, `opts`, `opts1`, `opts2`, `boxes`) are a durable storage contract.
//! Documents written by earlier versions must keep decoding.
//!
//! # Example
//!
//! ```rust
//! use quiz_options::{OrderingInput, QuestionType, StoredOptions, parse_input};
//!
//! let raw = r#"{"sortingType":"LEAST_TO_MOST","options":[{"text":"Left"}]}"#;
//! let input: OrderingInput = parse_input(raw).unwrap();
//! assert_eq!(input.options.len(), 1);
//!
//! let stored = r#"{"sortTp":"LEAST_TO_MOST","opts":[{"optId":0,"txt":"Left","imId":"U1","imUrl":"http://x/U1"}]}"#;
//! let doc = StoredOptions::decode(QuestionType::Ordering, stored).unwrap();
//! assert_eq!(doc.image_ids().collect::<Vec<_>>(), vec!["U1"]);
//! ```

#![warn(unreachable_pub)]

mod document;
mod entry;
mod error;
mod input;
mod question_type;

pub use document::{
    DragAndDropOptions, MatchingOptions, MultipleChoiceOptions, NoOptions, OpenOptions,
    OrderingOptions, StoredOptions,
};
pub use entry::{OptionEntry, Placeholder};
pub use error::OptionsError;
pub use input::{
    parse_input, DragAndDropInput, MatchingInput, MultipleChoiceInput, OpenInput, OrderingInput,
    ParsedOptions, SortingType, Validate,
};
pub use question_type::{QuestionType, UnknownQuestionType};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
