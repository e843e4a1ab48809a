use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Club ID is required.")]
    MissingClubId,

    #[error("Club ID must be a number.")]
    InvalidClubId,

    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

#[derive(Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::MissingClubId | AppError::InvalidClubId => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::Db(_) => {
                // Detail stays in the server log only
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(MessageBody { message })).into_response()
    }
}
