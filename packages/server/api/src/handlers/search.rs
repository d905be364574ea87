use crate::export::{render_csv, ATTACHMENT_FILENAME};
use crate::handlers::{form, ServiceError};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use search_collector::ResultCollector;
use std::collections::HashMap;

pub const NO_RESULTS_MESSAGE: &str = "No results found matching search term";

/// Finds the search term: `term` query parameter first, then a JSON body
/// field, then a urlencoded form field. Empty values count as missing.
pub fn extract_term(params: &HashMap<String, String>, body: &[u8]) -> Option<String> {
    if let Some(term) = params.get("term").filter(|t| !t.is_empty()) {
        return Some(term.clone());
    }

    if body.is_empty() {
        return None;
    }

    let term = match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(json) => json
            .get("term")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string),
        Err(_) => url::form_urlencoded::parse(body)
            .find(|(key, _)| key == "term")
            .map(|(_, value)| value.into_owned()),
    };

    term.filter(|t| !t.is_empty())
}

pub async fn cogsearch_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<Response, ServiceError> {
    let Some(term) = extract_term(&params, &body) else {
        return Ok(form::input_form(&state.settings.public_base_url).into_response());
    };

    tracing::info!(term = %term, "Processing search export request");

    let result = ResultCollector::new(state.search_provider.as_ref())
        .collect(&term, state.settings.page_size)
        .await
        .map_err(|e| {
            tracing::error!("Search failed: {}", e);
            ServiceError::from(e)
        })?;

    if result.is_empty() {
        return Ok(NO_RESULTS_MESSAGE.into_response());
    }

    let headers = [
        (header::CONTENT_TYPE, "application/octet-stream".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", ATTACHMENT_FILENAME),
        ),
    ];

    Ok((headers, render_csv(&result)).into_response())
}
