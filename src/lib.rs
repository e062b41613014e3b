//! Team Results - cached competition results for a robotics team website
//!
//! Fetches rankings, match results and awards from the FTCScout API and serves
//! them through JSON endpoints backed by a day-of-week TTL cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod service;

pub use api::AppState;
pub use config::Config;
pub use service::ResultsService;
