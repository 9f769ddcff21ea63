pub mod handlers;
pub mod predictor;
pub mod prompts;
pub mod recommendations;
pub mod scoring;
