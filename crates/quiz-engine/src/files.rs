//! Files collaborator contract and request attachments

use crate::context::RequestContext;
use crate::error::FilesError;
use crate::repository::{CategoryId, QuestionId, QuizId};
use std::collections::HashMap;
use std::fmt;
use std::io::Cursor;
use tokio::io::AsyncRead;

/// Readable image bytes supplied with a request
pub type ImageStream = Box<dyn AsyncRead + Send + Unpin>;

/// Image stored by the files service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Id used for later deletion
    pub id: String,
    /// Public URL
    pub url: String,
}

/// Storage path of an uploaded image
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImagePath {
    segments: Vec<String>,
}

impl ImagePath {
    /// Create from raw segments
    #[inline]
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// `{domain}/{quiz}/{question}/{image}`
    #[must_use]
    pub fn question_image(domain: &str, quiz_id: QuizId, question_id: QuestionId, image: &str) -> Self {
        Self::new([
            domain.to_string(),
            quiz_id.to_string(),
            question_id.to_string(),
            image.to_string(),
        ])
    }

    /// `{domain}/{category}/{image}`
    #[must_use]
    pub fn category_image(domain: &str, category_id: CategoryId, image: &str) -> Self {
        Self::new([domain.to_string(), category_id.to_string(), image.to_string()])
    }

    /// Path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment
    #[inline]
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl fmt::Display for ImagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// Image storage used by the engine
///
/// Implementations resize to the pixel budget and own the stored bytes.
/// Documents only keep the returned id and URL.
#[async_trait::async_trait]
pub trait Files: Send + Sync {
    /// Store an image under `path`, shrunk to at most `max_pixels`
    async fn upload_image(
        &self,
        ctx: &RequestContext,
        image: ImageStream,
        max_pixels: u32,
        path: &ImagePath,
    ) -> Result<UploadedImage, FilesError>;

    /// Delete a stored image
    async fn delete_image(&self, ctx: &RequestContext, image_id: &str) -> Result<(), FilesError>;
}

/// Named image streams supplied with one request
///
/// Each stream can be taken once; a second lookup of the same name finds nothing.
#[derive(Default)]
pub struct Attachments {
    streams: HashMap<String, ImageStream>,
}

impl Attachments {
    /// Create empty attachment set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stream under `name`, replacing any previous one
    pub fn insert(&mut self, name: impl Into<String>, stream: ImageStream) {
        self.streams.insert(name.into(), stream);
    }

    /// Add in-memory bytes under `name`
    pub fn insert_bytes(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.insert(name, Box::new(Cursor::new(bytes.into())));
    }

    /// Remove and return the stream for `name`
    pub fn take(&mut self, name: &str) -> Option<ImageStream> {
        self.streams.remove(name)
    }

    /// Whether a stream is still available under `name`
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.streams.contains_key(name)
    }

    /// Number of streams not yet taken
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Whether every stream has been taken
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}

impl fmt::Debug for Attachments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.streams.keys().collect();
        names.sort();
        f.debug_struct("Attachments").field("names", &names).finish()
    }
}

impl<S: Into<String>> FromIterator<(S, ImageStream)> for Attachments {
    fn from_iter<I: IntoIterator<Item = (S, ImageStream)>>(iter: I) -> Self {
        Self {
            streams: iter.into_iter().map(|(name, stream)| (name.into(), stream)).collect(),
        }
    }
}
