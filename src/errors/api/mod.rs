// API-facing error types
pub mod error;

pub use error::ApiError;
