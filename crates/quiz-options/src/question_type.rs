//! Question type tags

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Interaction type of a question
///
/// Serialized with the same tags callers send (`TRUE_FALSE`, `MULTIPLE_CH`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    /// Binary answer, no options
    TrueFalse,
    /// Numeric range, no options
    Slider,
    /// Free text with a fixed number of answers
    Open,
    /// Pick one or more options
    #[serde(rename = "MULTIPLE_CH")]
    MultipleChoice,
    /// Arrange options in order
    Ordering,
    /// Pair options across two columns
    Matching,
    /// Drop options into boxes
    DragAndDrop,
}

impl QuestionType {
    /// All known question types
    pub const ALL: [QuestionType; 7] = [
        QuestionType::TrueFalse,
        QuestionType::Slider,
        QuestionType::Open,
        QuestionType::MultipleChoice,
        QuestionType::Ordering,
        QuestionType::Matching,
        QuestionType::DragAndDrop,
    ];

    /// Wire tag of this type
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::TrueFalse => "TRUE_FALSE",
            QuestionType::Slider => "SLIDER",
            QuestionType::Open => "OPEN",
            QuestionType::MultipleChoice => "MULTIPLE_CH",
            QuestionType::Ordering => "ORDERING",
            QuestionType::Matching => "MATCHING",
            QuestionType::DragAndDrop => "DRAG_AND_DROP",
        }
    }

    /// Whether documents of this type can reference images
    #[inline]
    #[must_use]
    pub fn owns_images(&self) -> bool {
        matches!(
            self,
            QuestionType::MultipleChoice
                | QuestionType::Ordering
                | QuestionType::Matching
                | QuestionType::DragAndDrop
        )
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag that names no known question type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown question type: '{0}'")]
pub struct UnknownQuestionType(pub String);

impl FromStr for QuestionType {
    type Err = UnknownQuestionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownQuestionType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_from_str() {
        for ty in QuestionType::ALL {
            assert_eq!(ty.as_str().parse::<QuestionType>().unwrap(), ty);
        }
    }

    #[test]
    fn serde_tag_matches_as_str() {
        for ty in QuestionType::ALL {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = "ESSAY".parse::<QuestionType>().unwrap_err();
        assert_eq!(err, UnknownQuestionType("ESSAY".to_string()));
        // Tags are case sensitive
        assert!("ordering".parse::<QuestionType>().is_err());
    }

    #[test]
    fn image_owning_types() {
        assert!(!QuestionType::TrueFalse.owns_images());
        assert!(!QuestionType::Slider.owns_images());
        assert!(!QuestionType::Open.owns_images());
        assert!(QuestionType::Matching.owns_images());
    }
}
