//! Per-request context passed to every collaborator call

use crate::error::FilesError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

/// Identity and deadline of one caller request
///
/// Cancellation follows the caller's future: dropping a create operation drops
/// every upload it is awaiting. The deadline is the only time bound applied.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: Uuid,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Create context with a fresh request id and no deadline
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            deadline: None,
        }
    }

    /// With deadline `timeout` from now
    #[inline]
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// With absolute deadline
    #[inline]
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Request id
    #[inline]
    #[must_use]
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Deadline, if any
    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Run a files call under this context's deadline
    ///
    /// # Errors
    /// `FilesError::DeadlineExceeded` if the deadline passes first, otherwise
    /// whatever the call returns
    pub async fn bounded<T, F>(&self, call: F) -> Result<T, FilesError>
    where
        F: Future<Output = Result<T, FilesError>>,
    {
        match self.deadline {
            Some(deadline) => match tokio::time::timeout_at(deadline, call).await {
                Ok(result) => result,
                Err(_) => Err(FilesError::DeadlineExceeded),
            },
            None => call.await,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
