//! Image generation through the Perchance text-to-image service.
//!
//! The handler only depends on `ImageGenerator`; `PerchanceClient` is the
//! real adapter and `MockImageGenerator` stands in for it in tests.

pub mod client;
pub mod mock;

pub use client::PerchanceClient;
pub use mock::MockImageGenerator;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::generation::GenerationRequest;

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate a single image and return its raw bytes.
    async fn generate(&self, request: &GenerationRequest) -> AppResult<Vec<u8>>;
}
