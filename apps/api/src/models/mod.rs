pub mod career;
pub mod job;
pub mod mentor;
pub mod message;
pub mod profile;
pub mod quiz;
pub mod roadmap;
