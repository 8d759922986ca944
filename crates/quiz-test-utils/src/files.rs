//! Recording files service double

use async_trait::async_trait;
use parking_lot::Mutex;
use quiz_engine::{FilesError, Files, ImagePath, ImageStream, RequestContext, UploadedImage};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tokio::io::AsyncReadExt;

/// One recorded upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCall {
    /// Full storage path the image was uploaded to
    pub path: String,
    /// Last path segment, the image name
    pub image: String,
    /// Pixel budget passed by the caller
    pub max_pixels: u32,
    /// Bytes read from the attachment stream
    pub bytes: Vec<u8>,
}

#[derive(Default)]
struct State {
    uploads: Vec<UploadCall>,
    completed: Vec<String>,
    deletes: Vec<String>,
    stored: HashSet<String>,
}

/// Files service double
///
/// Images are keyed by the last path segment. Ids default to `img-{name}` with
/// URL `http://x/{id}`.
#[derive(Default)]
pub struct FakeFiles {
    ids: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    upload_failures: HashMap<String, FilesError>,
    delete_failures: HashSet<String>,
    state: Mutex<State>,
}

impl FakeFiles {
    /// Double with default ids and no scripted behavior
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `id` for uploads of `image`
    #[must_use]
    pub fn with_image_id(mut self, image: &str, id: &str) -> Self {
        self.ids.insert(image.to_string(), id.to_string());
        self
    }

    /// Delay uploads of `image`
    #[must_use]
    pub fn with_delay(mut self, image: &str, delay: Duration) -> Self {
        self.delays.insert(image.to_string(), delay);
        self
    }

    /// Fail uploads of `image`
    #[must_use]
    pub fn with_upload_failure(mut self, image: &str, error: FilesError) -> Self {
        self.upload_failures.insert(image.to_string(), error);
        self
    }

    /// Fail deletes of `id`
    #[must_use]
    pub fn with_delete_failure(mut self, id: &str) -> Self {
        self.delete_failures.insert(id.to_string());
        self
    }

    /// Pretend `id` is already stored
    pub fn seed_image(&self, id: &str) {
        self.state.lock().stored.insert(id.to_string());
    }

    /// Every upload attempt, in call order
    pub fn uploads(&self) -> Vec<UploadCall> {
        self.state.lock().uploads.clone()
    }

    /// Number of upload attempts
    pub fn upload_count(&self) -> usize {
        self.state.lock().uploads.len()
    }

    /// Image names of successful uploads, in completion order
    pub fn completed(&self) -> Vec<String> {
        self.state.lock().completed.clone()
    }

    /// Ids of attempted deletes, in call order
    pub fn deletes(&self) -> Vec<String> {
        self.state.lock().deletes.clone()
    }

    /// Ids currently stored, sorted
    pub fn stored(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.state.lock().stored.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Id an upload of `image` is stored under
    pub fn id_for(&self, image: &str) -> String {
        self.ids
            .get(image)
            .cloned()
            .unwrap_or_else(|| format!("img-{image}"))
    }
}

#[async_trait]
impl Files for FakeFiles {
    async fn upload_image(
        &self,
        _ctx: &RequestContext,
        mut image: ImageStream,
        max_pixels: u32,
        path: &ImagePath,
    ) -> Result<UploadedImage, FilesError> {
        let name = path.file_name().unwrap_or_default().to_string();
        let mut bytes = Vec::new();
        image
            .read_to_end(&mut bytes)
            .await
            .map_err(|err| FilesError::Backend(err.to_string()))?;

        self.state.lock().uploads.push(UploadCall {
            path: path.to_string(),
            image: name.clone(),
            max_pixels,
            bytes,
        });

        if let Some(delay) = self.delays.get(&name) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(err) = self.upload_failures.get(&name) {
            return Err(err.clone());
        }

        let id = self.id_for(&name);
        let mut state = self.state.lock();
        state.completed.push(name);
        state.stored.insert(id.clone());
        Ok(UploadedImage {
            url: format!("http://x/{id}"),
            id,
        })
    }

    async fn delete_image(&self, _ctx: &RequestContext, image_id: &str) -> Result<(), FilesError> {
        let mut state = self.state.lock();
        state.deletes.push(image_id.to_string());
        if self.delete_failures.contains(image_id) {
            return Err(FilesError::Backend(format!("cannot delete {image_id}")));
        }
        if state.stored.remove(image_id) {
            Ok(())
        } else {
            Err(FilesError::NotFound(image_id.to_string()))
        }
    }
}
