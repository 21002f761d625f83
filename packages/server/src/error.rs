//! Mapping of request and upstream failures to HTTP responses.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use crime_nearby_query_models::RequestError;
use crime_nearby_server_models::ApiErrorBody;
use crime_nearby_source::SourceError;

/// Errors a handler can return.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body was malformed or incomplete.
    #[error(transparent)]
    BadRequest(#[from] RequestError),

    /// The data API could not be reached or answered with an error.
    ///
    /// The upstream detail is logged but never sent to the client.
    #[error("Failed to query incidents")]
    Upstream(#[from] SourceError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiErrorBody {
            error: self.to_string(),
        })
    }
}
