use std::num::NonZeroUsize;

/// Page size used when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 500;

/// One hit as returned by the search index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRecord {
    pub storage_name: String,
    /// Raw path as stored in the index, possibly base64 with digit-suffix padding.
    pub storage_path: String,
    pub creation_date: Option<String>,
    pub last_modified_date: Option<String>,
}

impl SearchRecord {
    pub fn new(storage_name: impl Into<String>, storage_path: impl Into<String>) -> Self {
        Self {
            storage_name: storage_name.into(),
            storage_path: storage_path.into(),
            creation_date: None,
            last_modified_date: None,
        }
    }

    pub fn with_dates(mut self, created: Option<&str>, modified: Option<&str>) -> Self {
        self.creation_date = created.map(str::to_string);
        self.last_modified_date = modified.map(str::to_string);
        self
    }
}

/// A [`SearchRecord`] whose storage path went through the path decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    pub storage_name: String,
    /// Decoded path, or the padding-fixed raw path when decoding failed. Dedup key.
    pub canonical_path: String,
    pub creation_date: Option<String>,
    pub last_modified_date: Option<String>,
    pub decode_succeeded: bool,
}

impl DecodedRecord {
    /// Creation date, empty when the index had none.
    pub fn creation_date_or_empty(&self) -> &str {
        self.creation_date.as_deref().unwrap_or_default()
    }

    /// Last modification date, empty when the index had none.
    pub fn last_modified_or_empty(&self) -> &str {
        self.last_modified_date.as_deref().unwrap_or_default()
    }
}

/// Output of one collection sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    /// Unique, successfully decoded records in first-seen order.
    pub records: Vec<DecodedRecord>,
    /// Paths that failed to decode, in visit order. Not deduplicated.
    pub undecoded: Vec<String>,
}

impl ResultSet {
    /// True when the sweep produced neither records nor undecoded paths.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.undecoded.is_empty()
    }
}

/// Number of records requested per page. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    pub fn new(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN))
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
