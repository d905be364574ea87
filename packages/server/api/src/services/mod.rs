pub mod search;
pub mod secrets;
