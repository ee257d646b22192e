pub mod types;
pub mod config;
pub mod error;
pub mod stats;
pub mod utils;
pub mod engine;
