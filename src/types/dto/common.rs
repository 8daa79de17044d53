use poem_openapi::{ApiResponse, Object};

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service ("healthy" or "degraded")
    pub status: String,

    /// Whether the database answered a ping
    pub database: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Standardized error response model
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Machine-readable reason code
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Empty success response
#[derive(ApiResponse)]
pub enum NoContentResponse {
    /// Done; nothing to return
    #[oai(status = 204)]
    NoContent,
}
