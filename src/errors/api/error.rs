use crate::errors::internal::{ErrorKind, InternalError};
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Error responses shared by every endpoint
///
/// Each internal failure kind maps to exactly one status code and carries a
/// machine-readable `error` code in the body.
#[derive(ApiResponse, Debug)]
#[oai(bad_request_handler = "request_rejected")]
pub enum ApiError {
    /// Malformed input or unresolvable references
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// Missing, invalid or terminated session
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Authenticated but not permitted
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Entity does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Uniqueness or in-use violation
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),

    /// Backing store unavailable
    #[oai(status = 503)]
    Unavailable(Json<ErrorResponse>),
}

fn body(error: &str, message: impl Into<String>, status_code: u16) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code,
    })
}

impl ApiError {
    pub fn bad_request(error: &str, message: impl Into<String>) -> Self {
        ApiError::BadRequest(body(error, message, 400))
    }

    pub fn unauthorized(error: &str, message: impl Into<String>) -> Self {
        ApiError::Unauthorized(body(error, message, 401))
    }

    pub fn forbidden(error: &str, message: impl Into<String>) -> Self {
        ApiError::Forbidden(body(error, message, 403))
    }

    pub fn not_found(error: &str, message: impl Into<String>) -> Self {
        ApiError::NotFound(body(error, message, 404))
    }

    pub fn conflict(error: &str, message: impl Into<String>) -> Self {
        ApiError::Conflict(body(error, message, 409))
    }

    /// Always a generic message; details stay in the logs
    fn internal_server_error() -> Self {
        ApiError::InternalError(body("internal_error", "An internal error occurred", 500))
    }

    fn unavailable() -> Self {
        ApiError::Unavailable(body(
            "unavailable",
            "The service is temporarily unavailable",
            503,
        ))
    }

    /// Convert InternalError to ApiError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Infrastructure details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::Unavailable => {
                if let InternalError::Database(db_err) = &err {
                    tracing::error!(operation = db_err.operation(), "Store failure: {}", db_err);
                } else {
                    tracing::error!("Store failure: {}", err);
                }
                Self::unavailable()
            }
            ErrorKind::Internal => {
                tracing::error!("Internal failure: {}", err);
                Self::internal_server_error()
            }
            ErrorKind::Unauthenticated => Self::unauthorized(reason_code(&err), message),
            ErrorKind::Forbidden => Self::forbidden(reason_code(&err), message),
            ErrorKind::NotFound => Self::not_found(reason_code(&err), message),
            ErrorKind::Conflict => Self::conflict(reason_code(&err), message),
            ErrorKind::Validation => Self::bad_request(reason_code(&err), message),
        }
    }

    fn payload(&self) -> &ErrorResponse {
        match self {
            ApiError::BadRequest(json)
            | ApiError::Unauthorized(json)
            | ApiError::Forbidden(json)
            | ApiError::NotFound(json)
            | ApiError::Conflict(json)
            | ApiError::InternalError(json)
            | ApiError::Unavailable(json) => &json.0,
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> &str {
        &self.payload().message
    }

    /// Get the machine-readable reason code
    pub fn error_code(&self) -> &str {
        &self.payload().error
    }

    /// Get the HTTP status code from the error variant
    pub fn status_code(&self) -> u16 {
        self.payload().status_code
    }
}

/// Request rejected before reaching a handler
///
/// A missing bearer header surfaces here as a 401; everything else is a
/// body or parameter that failed to parse.
pub(crate) fn request_rejected(err: poem::Error) -> ApiError {
    if err.status() == poem::http::StatusCode::UNAUTHORIZED {
        return ApiError::unauthorized("no_session", "Authentication required");
    }
    ApiError::bad_request("validation_failed", err.to_string())
}

/// Machine-readable reason string for domain errors
fn reason_code(err: &InternalError) -> &'static str {
    use crate::errors::internal::{
        AuthorizationError, CredentialError, LocationError, RoleError, SessionError, UserError,
        ValidationError,
    };

    match err {
        InternalError::Credential(CredentialError::InvalidCredentials) => "invalid_credentials",
        InternalError::Credential(_) => "credential_error",
        InternalError::Session(SessionError::NoSession) => "no_session",
        InternalError::Session(SessionError::InvalidToken { .. }) => "invalid_token",
        InternalError::Session(SessionError::ExpiredToken) => "expired_token",
        InternalError::Authorization(AuthorizationError::Unauthenticated { .. }) => {
            "unauthenticated"
        }
        InternalError::Authorization(AuthorizationError::Forbidden { .. }) => "forbidden",
        InternalError::User(UserError::DuplicateUsername { .. }) => "duplicate_username",
        InternalError::User(UserError::ManagesLocations { .. }) => "user_manages_locations",
        InternalError::User(_) => "user_not_found",
        InternalError::Role(RoleError::DuplicateName { .. }) => "duplicate_role_name",
        InternalError::Role(RoleError::RoleInUse { .. }) => "role_in_use",
        InternalError::Role(_) => "role_not_found",
        InternalError::Location(LocationError::LocationNotFound { .. }) => "location_not_found",
        InternalError::Location(LocationError::UnknownOwner { .. }) => "unknown_owner",
        InternalError::Validation(ValidationError::EmptyRoleList) => "empty_role_list",
        InternalError::Validation(ValidationError::UnknownRole { .. }) => "unknown_role",
        InternalError::Validation(_) => "validation_failed",
        InternalError::Database(_) => "unavailable",
        InternalError::Parse { .. } | InternalError::Crypto { .. } => "internal_error",
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        ApiError::from_internal_error(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
