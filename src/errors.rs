use crate::progress::ProgressError;
use crate::source::FetchError;
use crate::storage::StoreError;
use axum::http::StatusCode;

pub const LOAD_FAILED_MESSAGE: &str = "Could not load daily devotional data.";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<FetchError> for AppError {
    fn from(_: FetchError) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: LOAD_FAILED_MESSAGE.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::internal(err)
    }
}

impl From<ProgressError> for AppError {
    fn from(err: ProgressError) -> Self {
        match err {
            ProgressError::NotCheckable(_) => Self::bad_request(err.to_string()),
            ProgressError::Store(err) => Self::internal(err),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
