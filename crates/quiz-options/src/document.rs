//! Canonical options documents
//!
//! One struct per question type, plus [`StoredOptions`] to carry any of them.
//! Sequences default to empty when decoding so that older documents missing a
//! sequence still yield their remaining image ids.

use crate::entry::OptionEntry;
use crate::error::OptionsError;
use crate::input::SortingType;
use crate::question_type::QuestionType;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Empty document of `TRUE_FALSE` and `SLIDER` questions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoOptions {}

/// `OPEN` document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenOptions {
    /// Number of accepted answers
    #[serde(rename = "nAnsw")]
    pub num_answers: u32,
}

/// `MULTIPLE_CH` document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipleChoiceOptions {
    /// Whether more than one option may be correct
    #[serde(rename = "multAns", default)]
    pub multiple_answer: bool,
    /// Choices in input order
    #[serde(rename = "opts", default)]
    pub options: Vec<OptionEntry>,
}

/// `ORDERING` document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingOptions {
    /// Direction the options are sorted in
    #[serde(rename = "sortTp")]
    pub sorting_type: SortingType,
    /// Options in input order
    #[serde(rename = "opts", default)]
    pub options: Vec<OptionEntry>,
}

/// `MATCHING` document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingOptions {
    /// Left-hand column
    #[serde(rename = "opts1", default)]
    pub left: Vec<OptionEntry>,
    /// Right-hand column
    #[serde(rename = "opts2", default)]
    pub right: Vec<OptionEntry>,
}

/// `DRAG_AND_DROP` document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragAndDropOptions {
    /// Drop targets
    #[serde(default)]
    pub boxes: Vec<OptionEntry>,
    /// Draggable items
    #[serde(rename = "opts", default)]
    pub options: Vec<OptionEntry>,
}

/// Canonical document of any question type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredOptions {
    /// `TRUE_FALSE` or `SLIDER`, stored as `{}`
    NoOptions,
    /// `OPEN`
    Open(OpenOptions),
    /// `MULTIPLE_CH`
    MultipleChoice(MultipleChoiceOptions),
    /// `ORDERING`
    Ordering(OrderingOptions),
    /// `MATCHING`
    Matching(MatchingOptions),
    /// `DRAG_AND_DROP`
    DragAndDrop(DragAndDropOptions),
}

fn decode_as<T: DeserializeOwned>(stored: &str) -> Result<T, OptionsError> {
    serde_json::from_str(stored).map_err(OptionsError::Undecodable)
}

fn encode_as<T: Serialize>(doc: &T) -> Result<String, OptionsError> {
    serde_json::to_string(doc).map_err(OptionsError::Unserializable)
}

impl StoredOptions {
    /// Decode stored text using the layout of `question_type`
    ///
    /// Types without options never look at the text.
    ///
    /// # Errors
    /// `OptionsError::Undecodable` if the text does not fit the type's layout
    pub fn decode(question_type: QuestionType, stored: &str) -> Result<Self, OptionsError> {
        Ok(match question_type {
            QuestionType::TrueFalse | QuestionType::Slider => StoredOptions::NoOptions,
            QuestionType::Open => StoredOptions::Open(decode_as(stored)?),
            QuestionType::MultipleChoice => StoredOptions::MultipleChoice(decode_as(stored)?),
            QuestionType::Ordering => StoredOptions::Ordering(decode_as(stored)?),
            QuestionType::Matching => StoredOptions::Matching(decode_as(stored)?),
            QuestionType::DragAndDrop => StoredOptions::DragAndDrop(decode_as(stored)?),
        })
    }

    /// Serialize to the persisted text form
    ///
    /// # Errors
    /// `OptionsError::Unserializable` on an internal inconsistency
    pub fn to_json(&self) -> Result<String, OptionsError> {
        match self {
            StoredOptions::NoOptions => encode_as(&NoOptions::default()),
            StoredOptions::Open(doc) => encode_as(doc),
            StoredOptions::MultipleChoice(doc) => encode_as(doc),
            StoredOptions::Ordering(doc) => encode_as(doc),
            StoredOptions::Matching(doc) => encode_as(doc),
            StoredOptions::DragAndDrop(doc) => encode_as(doc),
        }
    }

    /// Every entry sequence, in document order
    #[must_use]
    pub fn sequences(&self) -> Vec<&[OptionEntry]> {
        match self {
            StoredOptions::NoOptions | StoredOptions::Open(_) => Vec::new(),
            StoredOptions::MultipleChoice(doc) => vec![doc.options.as_slice()],
            StoredOptions::Ordering(doc) => vec![doc.options.as_slice()],
            StoredOptions::Matching(doc) => vec![doc.left.as_slice(), doc.right.as_slice()],
            StoredOptions::DragAndDrop(doc) => vec![doc.boxes.as_slice(), doc.options.as_slice()],
        }
    }

    /// Ids of every image this document references
    pub fn image_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.sequences()
            .into_iter()
            .flat_map(|seq| seq.iter().filter_map(OptionEntry::image_id))
    }
}
