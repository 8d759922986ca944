//! Per-type input schemas
//!
//! Raw payloads are parsed with serde and then validated. Both steps are
//! pure, so a rejected payload never reaches the image fan-out.

use crate::entry::Placeholder;
use crate::error::OptionsError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Post-parse validation of an input schema
pub trait Validate {
    /// Check constraints serde cannot express
    fn validate(&self) -> Result<(), OptionsError>;
}

/// Parse and validate a raw options payload
///
/// # Errors
/// - `OptionsError::Malformed` if the JSON does not fit the schema
/// - any validation error raised by [`Validate::validate`]
pub fn parse_input<T>(raw: &str) -> Result<T, OptionsError>
where
    T: DeserializeOwned + Validate,
{
    let input: T = serde_json::from_str(raw)?;
    input.validate()?;
    Ok(input)
}

fn validate_sequence(field: &'static str, items: &[Placeholder]) -> Result<(), OptionsError> {
    if items.is_empty() {
        return Err(OptionsError::EmptySequence(field));
    }
    if let Some(index) = items.iter().position(|p| p.text.is_empty()) {
        return Err(OptionsError::EmptyText { field, index });
    }
    Ok(())
}

/// Direction an ordering question is sorted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortingType {
    /// Smallest first
    LeastToMost,
    /// Largest first
    MostToLeast,
}

/// `OPEN` input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenInput {
    /// How many answers the respondent gives
    pub num_answers: u32,
}

impl Validate for OpenInput {
    fn validate(&self) -> Result<(), OptionsError> {
        if self.num_answers == 0 {
            return Err(OptionsError::invalid_value("numAnswers", "must be at least 1"));
        }
        Ok(())
    }
}

/// `MULTIPLE_CH` input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceInput {
    /// Whether more than one option may be chosen
    #[serde(default)]
    pub multiple_answer: bool,
    /// Choices in display order
    pub options: Vec<Placeholder>,
}

impl Validate for MultipleChoiceInput {
    fn validate(&self) -> Result<(), OptionsError> {
        validate_sequence("options", &self.options)
    }
}

/// `ORDERING` input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderingInput {
    /// Expected sort direction
    pub sorting_type: SortingType,
    /// Items to order
    pub options: Vec<Placeholder>,
}

impl Validate for OrderingInput {
    fn validate(&self) -> Result<(), OptionsError> {
        validate_sequence("options", &self.options)
    }
}

/// `MATCHING` input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingInput {
    /// Left column
    pub options1: Vec<Placeholder>,
    /// Right column
    pub options2: Vec<Placeholder>,
}

impl Validate for MatchingInput {
    fn validate(&self) -> Result<(), OptionsError> {
        if self.options1.len() != self.options2.len() {
            return Err(OptionsError::LengthMismatch {
                left: "options1",
                left_len: self.options1.len(),
                right: "options2",
                right_len: self.options2.len(),
            });
        }
        validate_sequence("options1", &self.options1)?;
        validate_sequence("options2", &self.options2)
    }
}

/// `DRAG_AND_DROP` input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragAndDropInput {
    /// Drop targets
    pub boxes: Vec<Placeholder>,
    /// Draggable items
    pub options: Vec<Placeholder>,
}

impl Validate for DragAndDropInput {
    fn validate(&self) -> Result<(), OptionsError> {
        validate_sequence("boxes", &self.boxes)?;
        validate_sequence("options", &self.options)
    }
}

/// Validated input of any question type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedOptions {
    /// `TRUE_FALSE` and `SLIDER` carry nothing
    NoOptions,
    /// `OPEN`
    Open(OpenInput),
    /// `MULTIPLE_CH`
    MultipleChoice(MultipleChoiceInput),
    /// `ORDERING`
    Ordering(OrderingInput),
    /// `MATCHING`
    Matching(MatchingInput),
    /// `DRAG_AND_DROP`
    DragAndDrop(DragAndDropInput),
}

impl ParsedOptions {
    /// Number of placeholders that name an image
    #[must_use]
    pub fn image_count(&self) -> usize {
        fn count(items: &[Placeholder]) -> usize {
            items.iter().filter(|p| p.image_name().is_some()).count()
        }

        match self {
            ParsedOptions::NoOptions | ParsedOptions::Open(_) => 0,
            ParsedOptions::MultipleChoice(input) => count(&input.options),
            ParsedOptions::Ordering(input) => count(&input.options),
            ParsedOptions::Matching(input) => count(&input.options1) + count(&input.options2),
            ParsedOptions::DragAndDrop(input) => count(&input.boxes) + count(&input.options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiple_answer_defaults_to_false() {
        let input: MultipleChoiceInput =
            parse_input(r#"{"options":[{"text":"a"},{"text":"b"}]}"#).unwrap();
        assert!(!input.multiple_answer);
        assert_eq!(input.options.len(), 2);
    }

    #[test]
    fn multiple_choice_needs_an_option() {
        let err = parse_input::<MultipleChoiceInput>(r#"{"options":[]}"#).unwrap_err();
        assert!(matches!(err, OptionsError::EmptySequence("options")));
    }

    #[test]
    fn missing_options_is_malformed() {
        let err = parse_input::<MultipleChoiceInput>(r#"{"multipleAnswer":true}"#).unwrap_err();
        assert!(matches!(err, OptionsError::Malformed(_)));
    }

    #[test]
    fn unknown_sorting_type_is_rejected() {
        let err = parse_input::<OrderingInput>(
            r#"{"sortingType":"RANDOM","options":[{"text":"a"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, OptionsError::Malformed(_)));
    }

    #[test]
    fn sorting_types_parse() {
        let input: OrderingInput = parse_input(
            r#"{"sortingType":"MOST_TO_LEAST","options":[{"text":"a","imageName":"i"}]}"#,
        )
        .unwrap();
        assert_eq!(input.sorting_type, SortingType::MostToLeast);
        assert_eq!(input.options[0].image_name(), Some("i"));
    }

    #[test]
    fn matching_lengths_must_agree() {
        let err = parse_input::<MatchingInput>(
            r#"{"options1":[{"text":"a"},{"text":"b"}],"options2":[{"text":"c"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            OptionsError::LengthMismatch {
                left_len: 2,
                right_len: 1,
                ..
            }
        ));
    }

    #[test]
    fn open_needs_positive_answer_count() {
        assert!(parse_input::<OpenInput>(r#"{"numAnswers":0}"#).is_err());
        assert!(parse_input::<OpenInput>(r#"{"numAnswers":-1}"#).is_err());
        assert!(parse_input::<OpenInput>(r#"{}"#).is_err());
        let input: OpenInput = parse_input(r#"{"numAnswers":3}"#).unwrap();
        assert_eq!(input.num_answers, 3);
    }

    #[test]
    fn empty_text_is_rejected() {
        let err = parse_input::<DragAndDropInput>(
            r#"{"boxes":[{"text":"box"}],"options":[{"text":"x"},{"text":""}]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            OptionsError::EmptyText {
                field: "options",
                index: 1
            }
        ));
    }

    #[test]
    fn image_count_spans_both_sequences() {
        let input: DragAndDropInput = parse_input(
            r#"{"boxes":[{"text":"b","imageName":"b1"}],"options":[{"text":"o","imageName":"o1"},{"text":"p","imageName":""}]}"#,
        )
        .unwrap();
        assert_eq!(ParsedOptions::DragAndDrop(input).image_count(), 2);
    }
}
