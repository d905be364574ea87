pub mod memory;
pub mod search_provider;
