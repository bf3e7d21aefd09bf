//! Custom extractors for Axum handlers.
//!
//! Both reject through [`AppError`](crate::AppError), so request-boundary
//! failures share the error body used everywhere else.

pub mod id_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
