use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nerkh_market_data::MarketDataError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    MarketData(#[from] MarketDataError),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Wire error body: `{"detail": "<message>"}`.
#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            // A failed crypto fetch reports the upstream status code;
            // every other upstream failure is a plain server error.
            ApiError::MarketData(MarketDataError::UpstreamStatus { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::MarketData(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ErrorBody {
            detail: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
