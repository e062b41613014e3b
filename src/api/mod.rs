//! API Module
//!
//! HTTP handlers and routing for the results REST API.
//!
//! # Endpoints
//! - `GET /api/rankings` - Current event rankings
//! - `GET /api/team-stats` - Operating team's headline stats
//! - `GET /api/achievements` - Award history
//! - `GET /api/cache/stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
