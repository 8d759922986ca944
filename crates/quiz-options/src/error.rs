//! Error types for option payloads and stored documents

/// Errors raised while parsing, validating or decoding options
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    /// Payload is not valid JSON for the question type
    #[error("malformed options payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A sequence that needs at least one entry was empty
    #[error("'{0}' must contain at least one option")]
    EmptySequence(&'static str),

    /// An entry in a sequence carries no text
    #[error("'{field}[{index}]' has empty text")]
    EmptyText {
        /// Sequence the entry belongs to
        field: &'static str,
        /// Position of the entry
        index: usize,
    },

    /// Paired sequences differ in length
    #[error("'{left}' has {left_len} options but '{right}' has {right_len}")]
    LengthMismatch {
        /// Name of the first sequence
        left: &'static str,
        /// Length of the first sequence
        left_len: usize,
        /// Name of the second sequence
        right: &'static str,
        /// Length of the second sequence
        right_len: usize,
    },

    /// A scalar field is outside its allowed range
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// A stored canonical document could not be decoded
    #[error("stored options document is not decodable: {0}")]
    Undecodable(#[source] serde_json::Error),

    /// A canonical document could not be serialized
    #[error("options document could not be serialized: {0}")]
    Unserializable(#[source] serde_json::Error),
}

impl OptionsError {
    /// Create an invalid value error
    pub fn invalid_value(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}
