//! Request and result types for a single generate call.
//!
//! `GenerateImageDto` is the raw body as sent by the caller. `validate` turns
//! it into a `GenerationRequest` with every default resolved, checking fields
//! in a fixed order and stopping at the first failure.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{AppError, AppResult};
use crate::imgur::ImageHost;
use crate::perchance::ImageGenerator;

pub const DEFAULT_SEED: i64 = -1;
pub const DEFAULT_GUIDANCE_SCALE: f64 = 7.0;
pub const MIN_GUIDANCE_SCALE: f64 = 0.0;
pub const MAX_GUIDANCE_SCALE: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Portrait,
    Landscape,
    #[default]
    Square,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Portrait, Shape::Landscape, Shape::Square];

    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Portrait => "portrait",
            Shape::Landscape => "landscape",
            Shape::Square => "square",
        }
    }

    /// Output size requested from the generator, `WIDTHxHEIGHT`.
    pub fn resolution(&self) -> &'static str {
        match self {
            Shape::Portrait => "512x768",
            Shape::Landscape => "768x512",
            Shape::Square => "768x768",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shape {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Shape::ALL
            .into_iter()
            .find(|shape| shape.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Shape::ALL.iter().map(Shape::as_str).collect();
                AppError::Validation(format!("Invalid shape. Must be one of: {}", names.join(", ")))
            })
    }
}

/// Body of `POST /generate` before validation.
///
/// `shape` and `guidance_scale` keep an explicit `null` apart from a missing
/// key: the outer `Option` is presence, the inner one the value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateImageDto {
    pub prompt: Option<String>,
    pub seed: Option<i64>,
    #[serde(default, deserialize_with = "present")]
    pub guidance_scale: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub shape: Option<Option<String>>,
    pub negative_prompt: Option<String>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl GenerateImageDto {
    pub fn validate(self) -> AppResult<GenerationRequest> {
        let prompt = match self.prompt {
            Some(prompt) if !prompt.is_empty() => prompt,
            _ => return Err(AppError::Validation("Missing required field: prompt".to_string())),
        };

        // null is present but matches no shape
        let shape = match self.shape {
            Some(shape) => shape.unwrap_or_default().parse()?,
            None => Shape::default(),
        };

        let guidance_scale = match self.guidance_scale {
            Some(scale) => scale.unwrap_or(f64::NAN),
            None => DEFAULT_GUIDANCE_SCALE,
        };
        if !(MIN_GUIDANCE_SCALE..=MAX_GUIDANCE_SCALE).contains(&guidance_scale) {
            return Err(AppError::Validation("Guidance scale must be between 0 and 20".to_string()));
        }

        Ok(GenerationRequest {
            prompt,
            seed: self.seed.unwrap_or(DEFAULT_SEED),
            guidance_scale,
            shape,
            negative_prompt: self.negative_prompt.filter(|n| !n.is_empty()),
        })
    }
}

/// A validated request. Seeds are passed through untouched, `-1` asks the
/// generator to pick one.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub seed: i64,
    pub guidance_scale: f64,
    pub shape: Shape,
    pub negative_prompt: Option<String>,
}

impl GenerationRequest {
    pub fn into_result(self, image_url: String) -> GenerationResult {
        GenerationResult {
            image_url,
            prompt: self.prompt,
            seed: self.seed,
            shape: self.shape,
            guidance_scale: self.guidance_scale,
            negative_prompt: self.negative_prompt,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub image_url: String,
    pub prompt: String,
    pub seed: i64,
    pub shape: Shape,
    pub guidance_scale: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
}

/// Generate one image, then host it. Either step failing fails the whole
/// call; nothing generated is returned without a hosted URL.
pub async fn generate_and_host(
    generator: &dyn ImageGenerator,
    host: &dyn ImageHost,
    request: GenerationRequest,
) -> AppResult<GenerationResult> {
    tracing::info!(shape = %request.shape, seed = request.seed, "Generating image");
    let image = generator.generate(&request).await?;
    let image_url = host.upload(&image).await?;
    Ok(request.into_result(image_url))
}
