use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use search_collector::ProviderError;
use serde_json::json;

pub mod form;
pub mod search;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/cogsearch",
        get(search::cogsearch_handler).post(search::cogsearch_handler),
    )
}

#[derive(Debug)]
pub enum ServiceError {
    SearchFailed(String),
}

impl From<ProviderError> for ServiceError {
    fn from(e: ProviderError) -> Self {
        ServiceError::SearchFailed(e.to_string())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ServiceError::SearchFailed(e) => (StatusCode::BAD_GATEWAY, e),
        };

        (status, Json(json!({ "error": msg }))).into_response()
    }
}
