use crate::ports::search_provider::{
    PageRequest, ProviderError, SearchOrder, SearchProvider,
};
use crate::record::{PageSize, SearchRecord};

/// Walks every page of a query, `skip = 0, P, 2P, ...`, until the reported
/// total is covered.
///
/// A driver is single use: once exhausted (or failed) it keeps returning
/// `Ok(None)` without calling the provider again.
pub struct PagedQueryDriver<'a, P: SearchProvider + ?Sized> {
    provider: &'a P,
    query_text: String,
    page_size: PageSize,
    next_skip: usize,
    exhausted: bool,
    requests_issued: usize,
}

impl<'a, P: SearchProvider + ?Sized> PagedQueryDriver<'a, P> {
    pub fn new(provider: &'a P, query_text: impl Into<String>, page_size: PageSize) -> Self {
        Self {
            provider,
            query_text: query_text.into(),
            page_size,
            next_skip: 0,
            exhausted: false,
            requests_issued: 0,
        }
    }

    pub fn requests_issued(&self) -> usize {
        self.requests_issued
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Fetches the next page. The most recently reported total decides whether
    /// another page follows.
    pub async fn next_page(&mut self) -> Result<Option<Vec<SearchRecord>>, ProviderError> {
        if self.exhausted {
            return Ok(None);
        }

        let skip = self.next_skip;
        let top = self.page_size.get();
        let request = PageRequest {
            query_text: self.query_text.clone(),
            top,
            skip,
            order: SearchOrder::RelevanceDesc,
            include_total_count: true,
        };

        self.requests_issued += 1;
        let page = match self.provider.query(&request).await {
            Ok(page) => page,
            Err(e) => {
                self.exhausted = true;
                return Err(e);
            }
        };

        let covered = skip.saturating_add(top);
        if page.total_count <= covered {
            self.exhausted = true;
        } else {
            self.next_skip = covered;
        }

        tracing::debug!(
            skip,
            top,
            total = page.total_count,
            returned = page.records.len(),
            "Fetched search page"
        );

        Ok(Some(page.records))
    }
}
