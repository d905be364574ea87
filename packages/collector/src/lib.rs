//! Paged retrieval and result normalization for full-text search exports.
//!
//! A [`ResultCollector`] sweeps every page a [`SearchProvider`] holds for a
//! query, decodes each record's storage path and folds the stream into a
//! [`ResultSet`] of unique decoded records plus the paths that could not be
//! decoded.

pub mod accumulator;
pub mod collector;
pub mod decoder;
pub mod driver;
pub mod ports;
pub mod record;

pub use accumulator::{Admission, DeduplicatingAccumulator};
pub use collector::ResultCollector;
pub use decoder::{decode_storage_path, restore_padding, DecodedPath};
pub use driver::PagedQueryDriver;
pub use ports::memory::InMemoryProvider;
pub use ports::search_provider::{
    PageRequest, ProviderError, SearchOrder, SearchPage, SearchProvider,
};
pub use record::{DecodedRecord, PageSize, ResultSet, SearchRecord};
