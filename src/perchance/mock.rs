use super::ImageGenerator;
use crate::error::{AppError, AppResult};
use crate::generation::GenerationRequest;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory generator that returns fixed bytes or a fixed failure.
#[derive(Clone)]
pub struct MockImageGenerator {
    image: Arc<Mutex<Vec<u8>>>,
    failure: Arc<Mutex<Option<String>>>,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<GenerationRequest>>>,
}

impl MockImageGenerator {
    pub fn new() -> Self {
        Self {
            image: Arc::new(Mutex::new(vec![0x89, 0x50, 0x4E, 0x47])),
            failure: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_image_response(self, image: Vec<u8>) -> Self {
        *self.image.lock().unwrap() = image;
        self
    }

    pub fn with_failure(self, message: &str) -> Self {
        *self.failure.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn get_last_request(&self) -> Option<GenerationRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl Default for MockImageGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate(&self, request: &GenerationRequest) -> AppResult<Vec<u8>> {
        *self.call_count.lock().unwrap() += 1;
        *self.last_request.lock().unwrap() = Some(request.clone());

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(AppError::Perchance(message));
        }
        Ok(self.image.lock().unwrap().clone())
    }
}
