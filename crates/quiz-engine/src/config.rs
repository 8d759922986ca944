//! Engine configuration

use serde::{Deserialize, Serialize};

/// Default pixel budget for option images (1024x1024)
pub const QUESTION_IMAGE_MAX_PIXELS: u32 = 1024 * 1024;

/// Default pixel budget for category images (512x512)
pub const CATEGORY_IMAGE_MAX_PIXELS: u32 = 512 * 512;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML could not be parsed into the config shape
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field holds an unusable value
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: &'static str,
    },
}

/// Engine configuration
///
/// Every field has a default, so a partial TOML table is enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// First path segment of option images
    pub question_image_domain: String,
    /// First path segment of category images
    pub category_image_domain: String,
    /// Pixel budget passed with every option image upload
    pub question_image_max_pixels: u32,
    /// Pixel budget passed with every category image upload
    pub category_image_max_pixels: u32,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a TOML document
    ///
    /// # Errors
    /// `ConfigError` if the TOML is malformed or a value is unusable
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot
    ///
    /// # Errors
    /// `ConfigError::InvalidValue` on an empty domain or a zero pixel budget
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.question_image_domain.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "question_image_domain",
                reason: "must not be empty",
            });
        }
        if self.category_image_domain.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "category_image_domain",
                reason: "must not be empty",
            });
        }
        if self.question_image_max_pixels == 0 {
            return Err(ConfigError::InvalidValue {
                field: "question_image_max_pixels",
                reason: "must be positive",
            });
        }
        if self.category_image_max_pixels == 0 {
            return Err(ConfigError::InvalidValue {
                field: "category_image_max_pixels",
                reason: "must be positive",
            });
        }
        Ok(())
    }

    /// With option image domain
    #[inline]
    #[must_use]
    pub fn with_question_image_domain(mut self, domain: impl Into<String>) -> Self {
        self.question_image_domain = domain.into();
        self
    }

    /// With option image pixel budget
    #[inline]
    #[must_use]
    pub fn with_question_image_max_pixels(mut self, max_pixels: u32) -> Self {
        self.question_image_max_pixels = max_pixels;
        self
    }

    /// With category image pixel budget
    #[inline]
    #[must_use]
    pub fn with_category_image_max_pixels(mut self, max_pixels: u32) -> Self {
        self.category_image_max_pixels = max_pixels;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            question_image_domain: "quizzes".to_string(),
            category_image_domain: "categories".to_string(),
            question_image_max_pixels: QUESTION_IMAGE_MAX_PIXELS,
            category_image_max_pixels: CATEGORY_IMAGE_MAX_PIXELS,
        }
    }
}
