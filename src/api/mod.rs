//! HTTP surface: shared state, router, body extractor, and handlers.
pub mod extract;
pub mod handlers;
pub mod routes;

pub use routes::{router, AppState};
