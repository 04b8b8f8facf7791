use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::dto::StatusResponse;

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("Provide valid {field}")]
    Validation { field: &'static str },
    #[error("User with {field}: {value} exists already.")]
    DuplicateKey { field: String, value: String },
    #[error("Server Error: {detail}")]
    UnexpectedPersistence { detail: String },
}

impl RegisterError {
    pub fn unexpected(detail: impl ToString) -> Self {
        Self::UnexpectedPersistence {
            detail: detail.to_string(),
        }
    }

    // Client defects and conflicts share 401.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::DuplicateKey { .. } => StatusCode::UNAUTHORIZED,
            Self::UnexpectedPersistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RegisterError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(StatusResponse::failure(self.to_string())),
        )
            .into_response()
    }
}
