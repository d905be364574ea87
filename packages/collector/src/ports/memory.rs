use super::search_provider::{PageRequest, ProviderError, SearchPage, SearchProvider};
use crate::record::SearchRecord;
use std::sync::{Arc, Mutex};

/// An in-memory index.
/// Serves pages out of a fixed record list and records every request it sees,
/// so paging behaviour can be asserted without a network.
#[derive(Default, Clone)]
pub struct InMemoryProvider {
    records: Vec<SearchRecord>,
    reported_total: Option<usize>,
    failure: Option<(usize, ProviderError)>,
    requests: Arc<Mutex<Vec<PageRequest>>>,
}

impl InMemoryProvider {
    pub fn new(records: Vec<SearchRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// A provider whose first call fails.
    pub fn failing(error: ProviderError) -> Self {
        Self::default().fail_at(0, error)
    }

    /// Report `total` as the match count regardless of the stored records.
    pub fn with_reported_total(mut self, total: usize) -> Self {
        self.reported_total = Some(total);
        self
    }

    /// Fail the request with the given zero-based index.
    pub fn fail_at(mut self, request_index: usize, error: ProviderError) -> Self {
        self.failure = Some((request_index, error));
        self
    }

    /// Every request issued so far, in order.
    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl SearchProvider for InMemoryProvider {
    async fn query(&self, request: &PageRequest) -> Result<SearchPage, ProviderError> {
        let index = {
            let mut requests = self
                .requests
                .lock()
                .map_err(|e| ProviderError::Transport(e.to_string()))?;
            requests.push(request.clone());
            requests.len() - 1
        };

        if let Some((fail_index, error)) = &self.failure {
            if *fail_index == index {
                return Err(error.clone());
            }
        }

        let start = request.skip.min(self.records.len());
        let end = request.skip.saturating_add(request.top).min(self.records.len());

        Ok(SearchPage {
            records: self.records[start..end].to_vec(),
            total_count: self.reported_total.unwrap_or(self.records.len()),
        })
    }
}
