//! Perchance worker library
//!
//! Modules:
//! - `api`: Axum HTTP handlers and router setup used by the binary.
//! - `generation`: Request validation, result shaping, and the generate-then-host pipeline.
//! - `perchance`: Image generation client for the Perchance API.
//! - `imgur`: Image hosting client for the Imgur API.
//! - `config`: Env-driven configuration loader.
//! - `error`: Common error type, alias, and HTTP error responses.
//!
//! Re-exports are provided for common types: `Config`, `PerchanceClient`,
//! `ImgurClient`, and the `ImageGenerator` / `ImageHost` traits.
pub mod api;
pub mod config;
pub mod error;
pub mod generation;
pub mod imgur;
pub mod perchance;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use imgur::{ImageHost, ImgurClient};
pub use perchance::{ImageGenerator, PerchanceClient};
