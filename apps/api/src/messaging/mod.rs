pub mod handlers;
pub mod hub;
