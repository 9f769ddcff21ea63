pub mod cache;
pub mod handlers;
pub mod jsearch;
pub mod search;
