use super::ImageHost;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Host that hands out a fresh fake Imgur link per upload.
#[derive(Clone)]
pub struct MockImageHost {
    failure: Arc<Mutex<Option<(u16, String)>>>,
    upload_count: Arc<Mutex<usize>>,
    last_upload: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MockImageHost {
    pub fn new() -> Self {
        Self {
            failure: Arc::new(Mutex::new(None)),
            upload_count: Arc::new(Mutex::new(0)),
            last_upload: Arc::new(Mutex::new(None)),
        }
    }

    /// Fail every upload as if Imgur answered with `status` and `body`.
    pub fn with_failure(self, status: u16, body: &str) -> Self {
        *self.failure.lock().unwrap() = Some((status, body.to_string()));
        self
    }

    pub fn get_upload_count(&self) -> usize {
        *self.upload_count.lock().unwrap()
    }

    pub fn get_last_upload(&self) -> Option<Vec<u8>> {
        self.last_upload.lock().unwrap().clone()
    }
}

impl Default for MockImageHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageHost for MockImageHost {
    async fn upload(&self, image: &[u8]) -> AppResult<String> {
        *self.upload_count.lock().unwrap() += 1;
        *self.last_upload.lock().unwrap() = Some(image.to_vec());

        if let Some((status, body)) = self.failure.lock().unwrap().clone() {
            return Err(AppError::Imgur { status, body });
        }
        Ok(format!("https://i.imgur.com/{}.png", Uuid::new_v4().simple()))
    }
}
