//! Anonymous uploads to Imgur's `/3/image` endpoint.
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::ImageHost;
use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
struct UploadResponse {
    data: UploadData,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    link: Option<String>,
}

#[derive(Clone)]
pub struct ImgurClient {
    client: Client,
    base_url: String,
    client_id: String,
}

impl ImgurClient {
    pub fn new(base_url: String, client_id: String) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        ImgurClient { client: Client::new(), base_url: base, client_id }
    }

    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty()
    }
}

#[async_trait]
impl ImageHost for ImgurClient {
    async fn upload(&self, image: &[u8]) -> AppResult<String> {
        if !self.is_configured() {
            return Err(AppError::Configuration(
                "IMGUR_CLIENT_ID not configured. Please set it in environment variables.".to_string(),
            ));
        }

        let encoded = STANDARD.encode(image);
        let url = format!("{}/3/image", self.base_url);
        tracing::info!("Uploading {} bytes to Imgur at URL: {}", image.len(), url);

        let response = self.client.post(&url)
            .header("Authorization", format!("Client-ID {}", self.client_id))
            .form(&[("image", encoded.as_str()), ("type", "base64")])
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read error body".to_string());
            tracing::error!("Imgur upload failed. Status: {}, Body: {}", status, body);
            return Err(AppError::Imgur { status: status.as_u16(), body });
        }

        let body: UploadResponse = response.json().await.map_err(AppError::HttpClient)?;
        let link = body.data.link
            .ok_or_else(|| AppError::Decode("Imgur response did not contain data.link".to_string()))?;
        tracing::info!("Uploaded image to {}", link);
        Ok(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_upload_sends_base64_form_and_returns_link() {
        let server = MockServer::start().await;
        // base64("hello") = aGVsbG8=, form-encoded as aGVsbG8%3D
        Mock::given(method("POST"))
            .and(path("/3/image"))
            .and(header("Authorization", "Client-ID client-123"))
            .and(body_string_contains("image=aGVsbG8%3D"))
            .and(body_string_contains("type=base64"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "link": "https://i.imgur.com/abc.png" },
                "success": true,
                "status": 200
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ImgurClient::new(server.uri(), "client-123".to_string());
        let link = client.upload(b"hello").await.unwrap();
        assert_eq!(link, "https://i.imgur.com/abc.png");
    }

    #[tokio::test]
    async fn test_missing_client_id_fails_before_any_request() {
        let server = MockServer::start().await;
        Mock::given(path("/3/image"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = ImgurClient::new(server.uri(), String::new());
        let err = client.upload(b"hello").await.unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains("IMGUR_CLIENT_ID not configured"));
    }

    #[tokio::test]
    async fn test_non_200_status_carries_body() {
        let server = MockServer::start().await;
        Mock::given(path("/3/image"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .mount(&server)
            .await;

        let client = ImgurClient::new(server.uri(), "client-123".to_string());
        let err = client.upload(b"hello").await.unwrap_err();
        assert_eq!(err.to_string(), "Imgur upload failed: 429 - Too Many Requests");
    }

    #[tokio::test]
    async fn test_missing_link_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(path("/3/image"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": {} })))
            .mount(&server)
            .await;

        let client = ImgurClient::new(server.uri(), "client-123".to_string());
        let err = client.upload(b"hello").await.unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }
}
