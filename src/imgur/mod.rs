//! Image hosting through the Imgur upload API.

pub mod client;
pub mod mock;

pub use client::ImgurClient;
pub use mock::MockImageHost;

use async_trait::async_trait;

use crate::error::AppResult;

#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload raw image bytes and return the public URL.
    async fn upload(&self, image: &[u8]) -> AppResult<String>;
}
