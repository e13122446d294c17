use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mealflo_shopping::ShoppingError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Shopping(#[from] ShoppingError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Week not found")]
    WeekNotFound,

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Stored week is not valid JSON: {0}")]
    CorruptSnapshot(#[from] serde_json::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Shopping(ShoppingError::InvalidInput(_)) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::WeekNotFound => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::CorruptSnapshot(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            tracing::error!("{}", self);
            "An unexpected error occurred. Please try again later.".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Shopping(ShoppingError::InvalidInput("null".to_string())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::BadRequest("weekId is required".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::WeekNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Storage(std::io::Error::other("disk")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_errors_keep_their_message() {
        assert_eq!(
            AppError::BadRequest("weekId is required".to_string()).to_string(),
            "weekId is required"
        );
        assert_eq!(
            AppError::Shopping(ShoppingError::InvalidInput("week snapshot is missing".to_string()))
                .to_string(),
            "Invalid input: week snapshot is missing"
        );
    }
}
