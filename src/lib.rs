pub mod apis;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod types;

// Layered boundaries for application ports and their adapters
pub mod app;
pub mod infra;
