use crate::record::SearchRecord;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Search service unreachable: {0}")]
    Transport(String),
    #[error("Search service rejected the credential: {0}")]
    Unauthorized(String),
    #[error("Search request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("Malformed search response: {0}")]
    MalformedResponse(String),
}

/// Result ordering requested from the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOrder {
    #[default]
    RelevanceDesc,
}

/// One page request. `query_text` is forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub query_text: String,
    pub top: usize,
    pub skip: usize,
    pub order: SearchOrder,
    pub include_total_count: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub records: Vec<SearchRecord>,
    /// Total number of matches the index reports for the query.
    pub total_count: usize,
}

#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    async fn query(&self, request: &PageRequest) -> Result<SearchPage, ProviderError>;
}
