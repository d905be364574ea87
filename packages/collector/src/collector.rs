use crate::accumulator::DeduplicatingAccumulator;
use crate::driver::PagedQueryDriver;
use crate::ports::search_provider::{ProviderError, SearchProvider};
use crate::record::{DecodedRecord, PageSize, ResultSet};

/// Runs one full collection sweep for a query.
pub struct ResultCollector<'a, P: SearchProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: SearchProvider + ?Sized> ResultCollector<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Fetches every page for `query_text`, decodes and deduplicates the hits.
    ///
    /// A provider failure on any page aborts the sweep; nothing collected so
    /// far is returned.
    pub async fn collect(
        &self,
        query_text: &str,
        page_size: PageSize,
    ) -> Result<ResultSet, ProviderError> {
        let mut driver = PagedQueryDriver::new(self.provider, query_text, page_size);
        let mut accumulator = DeduplicatingAccumulator::new();
        let mut visited = 0usize;

        while let Some(page) = driver.next_page().await? {
            visited += page.len();
            accumulator.extend(page.into_iter().map(DecodedRecord::from));
        }

        let duplicates = accumulator.duplicates();
        let result = accumulator.finish();

        tracing::info!(
            pages = driver.requests_issued(),
            visited,
            duplicates,
            records = result.records.len(),
            undecoded = result.undecoded.len(),
            "Search sweep complete"
        );

        Ok(result)
    }
}
