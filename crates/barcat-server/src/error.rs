//! HTTP error envelope.
//!
//! Every handler failure renders as
//! `{ "code": <http status>, "status": <error kind>, "message": <text> }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use barcat_catalog::{CatalogError, CsvError};

use crate::service::{ArgsError, FilterError};

/// Any failure a handler can surface.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("service filter: {0}")]
    Filter(#[from] FilterError),

    #[error("service arguments: {0}")]
    Args(#[from] ArgsError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: u16,
    status: &'static str,
    message: String,
}

impl ApiError {
    fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Catalog(CatalogError::Csv(CsvError::InvalidWorkerArgs(_))) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "RepositoryWorkerPoolError",
            ),
            ApiError::Catalog(CatalogError::Csv(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "RepositoryCSVError")
            },
            ApiError::Catalog(CatalogError::DataApi(_)) => {
                (StatusCode::BAD_GATEWAY, "RepositoryDataAPIError")
            },
            ApiError::Filter(_) => (StatusCode::UNPROCESSABLE_ENTITY, "ServiceFilterError"),
            ApiError::Args(_) => (StatusCode::UNPROCESSABLE_ENTITY, "ServiceArgumentsError"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, status) = self.classify();
        if code.is_server_error() {
            tracing::error!(status, error = %self, "request failed");
        } else {
            tracing::debug!(status, error = %self, "request rejected");
        }

        let body = ErrorBody {
            code: code.as_u16(),
            status,
            message: self.to_string(),
        };
        (code, Json(body)).into_response()
    }
}
