use crate::services::secrets::SearchCredential;
use reqwest::StatusCode;
use search_collector::{
    PageRequest, ProviderError, SearchOrder, SearchPage, SearchProvider, SearchRecord,
};
use serde::{Deserialize, Serialize};

const SELECT_FIELDS: &str =
    "metadata_storage_name,metadata_storage_path,metadata_creation_date,metadata_last_modified";

/// Azure Cognitive Search over the REST `docs/search` endpoint.
pub struct AzureSearchProvider {
    client: reqwest::Client,
    search_url: String,
    credential: SearchCredential,
}

#[derive(Serialize, Debug, PartialEq)]
struct SearchBody<'a> {
    search: &'a str,
    top: usize,
    skip: usize,
    count: bool,
    orderby: &'static str,
    select: &'static str,
}

#[derive(Deserialize, Debug)]
struct SearchResponseBody {
    #[serde(rename = "@odata.count")]
    count: Option<usize>,
    #[serde(default)]
    value: Vec<IndexDocument>,
}

#[derive(Deserialize, Debug)]
struct IndexDocument {
    #[serde(default)]
    metadata_storage_name: String,
    metadata_storage_path: String,
    metadata_creation_date: Option<String>,
    metadata_last_modified: Option<String>,
}

impl From<IndexDocument> for SearchRecord {
    fn from(doc: IndexDocument) -> Self {
        Self {
            storage_name: doc.metadata_storage_name,
            storage_path: doc.metadata_storage_path,
            creation_date: doc.metadata_creation_date,
            last_modified_date: doc.metadata_last_modified,
        }
    }
}

fn order_clause(order: SearchOrder) -> &'static str {
    match order {
        SearchOrder::RelevanceDesc => "search.score() desc",
    }
}

impl AzureSearchProvider {
    pub fn new(
        client: reqwest::Client,
        endpoint: &str,
        index_name: &str,
        api_version: &str,
        credential: SearchCredential,
    ) -> Self {
        Self {
            client,
            search_url: format!(
                "{}/indexes/{}/docs/search?api-version={}",
                endpoint.trim_end_matches('/'),
                index_name,
                api_version
            ),
            credential,
        }
    }

    fn body<'a>(request: &'a PageRequest) -> SearchBody<'a> {
        SearchBody {
            search: &request.query_text,
            top: request.top,
            skip: request.skip,
            count: request.include_total_count,
            orderby: order_clause(request.order),
            select: SELECT_FIELDS,
        }
    }
}

fn parse_page(body: &[u8]) -> Result<SearchPage, ProviderError> {
    let parsed: SearchResponseBody = serde_json::from_slice(body)
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

    let total_count = parsed.count.ok_or_else(|| {
        ProviderError::MalformedResponse("response did not include @odata.count".to_string())
    })?;

    Ok(SearchPage {
        records: parsed.value.into_iter().map(SearchRecord::from).collect(),
        total_count,
    })
}

fn status_error(status: StatusCode, message: String) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Unauthorized(message),
        _ => ProviderError::Rejected {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait::async_trait]
impl SearchProvider for AzureSearchProvider {
    async fn query(&self, request: &PageRequest) -> Result<SearchPage, ProviderError> {
        let response = self
            .client
            .post(&self.search_url)
            .header("api-key", self.credential.expose())
            .json(&Self::body(request))
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = String::from_utf8_lossy(&bytes).into_owned();
            return Err(status_error(status, message));
        }

        parse_page(&bytes)
    }
}
