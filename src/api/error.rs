use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Registration conflict: {0}")]
    RegistrationConflict(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Session refresh failed: {0}")]
    RefreshFailed(String),

    #[error("Unauthorized - credential rejected after refresh")]
    Unauthorized,

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let detail = extract_detail(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(detail),
            404 => ApiError::NotFound(detail),
            409 => ApiError::RegistrationConflict(detail),
            422 => ApiError::ValidationFailed(detail),
            500..=599 => ApiError::ServerError(detail),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, detail)),
        }
    }
}

/// Pull the human-readable message out of an error body.
/// The server wraps errors as `{"detail": "..."}`; fall back to the raw
/// (truncated) body when it doesn't parse that way.
pub(crate) fn extract_detail(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct Wrapper {
        detail: String,
    }

    match serde_json::from_str::<Wrapper>(body) {
        Ok(wrapper) => wrapper.detail,
        Err(_) => ApiError::truncate_body(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            ApiError::from_status(reqwest::StatusCode::UNAUTHORIZED, ""),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from_status(reqwest::StatusCode::NOT_FOUND, "missing"),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from_status(reqwest::StatusCode::CONFLICT, "dup"),
            ApiError::RegistrationConflict(_)
        ));
        assert!(matches!(
            ApiError::from_status(reqwest::StatusCode::UNPROCESSABLE_ENTITY, "bad"),
            ApiError::ValidationFailed(_)
        ));
        assert!(matches!(
            ApiError::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            ApiError::ServerError(_)
        ));
    }

    #[test]
    fn test_extract_detail_from_wrapper() {
        assert_eq!(
            extract_detail(r#"{"detail": "Email already registered"}"#),
            "Email already registered"
        );
    }

    #[test]
    fn test_extract_detail_falls_back_to_body() {
        assert_eq!(extract_detail("plain text error"), "plain text error");
    }

    #[test]
    fn test_truncate_body() {
        let long = "x".repeat(600);
        let truncated = ApiError::truncate_body(&long);
        assert!(truncated.starts_with(&"x".repeat(500)));
        assert!(truncated.contains("600 total bytes"));
    }
}
