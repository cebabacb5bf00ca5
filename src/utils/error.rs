use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    DatabaseError(String),
    NotFound(String),
    InvalidId(String),
    InvalidRequest(String),
    Duplicate(String),
    ConfigError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::InvalidId(msg) => write!(f, "Invalid id: {}", msg),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            AppError::Duplicate(msg) => write!(f, "Duplicate: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidId(_) | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Duplicate(_) => StatusCode::CONFLICT,
            AppError::DatabaseError(_) | AppError::ConfigError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Not-found answers carry `message`; everything else exposes the raw cause as `error`.
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::NotFound(msg) => serde_json::json!({
                "success": false,
                "message": msg
            }),
            AppError::DatabaseError(msg)
            | AppError::InvalidId(msg)
            | AppError::InvalidRequest(msg)
            | AppError::Duplicate(msg)
            | AppError::ConfigError(msg) => serde_json::json!({
                "success": false,
                "error": msg
            }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::InvalidId("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Duplicate("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::DatabaseError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_not_found_body_uses_message() {
        let res = AppError::NotFound("Medicine not found".into()).error_response();
        let bytes = to_bytes(res.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Medicine not found");
        assert!(body.get("error").is_none());
    }

    #[actix_web::test]
    async fn test_database_error_exposes_cause() {
        let res = AppError::DatabaseError("connection refused".into()).error_response();
        let bytes = to_bytes(res.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "connection refused");
    }
}
