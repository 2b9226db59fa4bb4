pub mod api;
pub mod chart;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod enrich;
pub mod error;
pub mod export;

pub use error::Error;
