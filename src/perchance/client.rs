//! Thin HTTP client for the Perchance image generation API.
//!
//! - `generate` asks `/api/generate` for one image and gets back an image id.
//! - `download` fetches `/api/downloadTemporaryImage?imageId=...` as raw bytes.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use uuid::Uuid;

use super::ImageGenerator;
use crate::error::{AppError, AppResult};
use crate::generation::GenerationRequest;

const CHANNEL: &str = "ai-text-to-image-generator";
const SUB_CHANNEL: &str = "public";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    status: String,
    #[serde(rename = "imageId")]
    image_id: Option<String>,
}

#[derive(Clone)]
pub struct PerchanceClient {
    client: Client,
    base_url: String,
    user_key: String,
    max_wait_polls: u32,
    poll_interval: Duration,
}

impl PerchanceClient {
    pub fn new(base_url: String, user_key: String, max_wait_polls: u32) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        PerchanceClient {
            client: Client::new(),
            base_url: base,
            user_key,
            max_wait_polls,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    fn query(&self, request: &GenerationRequest) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("prompt", request.prompt.clone()),
            ("seed", request.seed.to_string()),
            ("resolution", request.shape.resolution().to_string()),
            ("guidanceScale", request.guidance_scale.to_string()),
            ("channel", CHANNEL.to_string()),
            ("subChannel", SUB_CHANNEL.to_string()),
            ("userKey", self.user_key.clone()),
            ("requestId", Uuid::new_v4().to_string()),
            ("__cacheBust", Uuid::new_v4().to_string()),
        ];
        if let Some(negative) = &request.negative_prompt {
            query.push(("negativePrompt", negative.clone()));
        }
        query
    }

    /// Request one image and return the id the provider assigned to it.
    ///
    /// While the provider is still busy with an earlier request for the same
    /// key it answers `waiting_for_prev_request_to_finish`; that is polled at
    /// most `max_wait_polls` times before giving up.
    pub async fn request_image(&self, request: &GenerationRequest) -> AppResult<String> {
        let url = format!("{}/api/generate", self.base_url);
        let query = self.query(request);
        tracing::info!("Requesting image from Perchance at URL: {}", url);
        tracing::debug!("Generation parameters: {:?}", request);

        let mut polls = 0;
        loop {
            let response = self.client.get(&url)
                .query(&query)
                .send()
                .await
                .map_err(AppError::HttpClient)?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_else(|_| "Unable to read error body".to_string());
                return Err(AppError::Perchance(format!("Generate request failed. Status: {}, Body: {}", status, body)));
            }

            let body: GenerateResponse = response.json().await.map_err(AppError::HttpClient)?;
            match body.status.as_str() {
                "success" => {
                    return body.image_id
                        .ok_or_else(|| AppError::Decode("Perchance reported success without an imageId".to_string()));
                }
                "waiting_for_prev_request_to_finish" if polls < self.max_wait_polls => {
                    polls += 1;
                    tracing::debug!("Perchance busy with a previous request, waiting ({}/{})", polls, self.max_wait_polls);
                    tokio::time::sleep(self.poll_interval).await;
                }
                "waiting_for_prev_request_to_finish" => {
                    return Err(AppError::Perchance(format!(
                        "Previous request still running after {} polls", self.max_wait_polls
                    )));
                }
                "invalid_key" => {
                    return Err(AppError::Perchance("User key was rejected (invalid_key); check PERCHANCE_USER_KEY".to_string()));
                }
                other => {
                    return Err(AppError::Perchance(format!("Generation failed with status '{}'", other)));
                }
            }
        }
    }

    /// Fetch the bytes of a previously generated image.
    pub async fn download(&self, image_id: &str) -> AppResult<Vec<u8>> {
        let url = format!("{}/api/downloadTemporaryImage", self.base_url);
        let response = self.client.get(&url)
            .query(&[("imageId", image_id)])
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        if !response.status().is_success() {
            return Err(AppError::Perchance(format!("Failed to download image: {:?}", response.status())));
        }
        let bytes = response.bytes().await.map_err(AppError::HttpClient)?;
        if bytes.is_empty() {
            return Err(AppError::Perchance(format!("Downloaded image {} is empty", image_id)));
        }
        tracing::info!("Downloaded image {} ({} bytes)", image_id, bytes.len());
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ImageGenerator for PerchanceClient {
    async fn generate(&self, request: &GenerationRequest) -> AppResult<Vec<u8>> {
        let image_id = self.request_image(request).await?;
        self.download(&image_id).await
    }
}
