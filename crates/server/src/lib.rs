//! Provec Server - HTTP REST API for profile similarity matching
//!
//! Exposes the profile vectorization pipeline over HTTP:
//!
//! - **Matching**: find stored profiles similar to a submitted one
//! - **Registration**: store a profile and return its matches in one call
//! - **Profile management**: fetch and delete stored profiles
//! - **Health**: liveness/readiness probes and index statistics
//!
//! # Features
//!
//! - API key authentication with per-key rate limiting
//! - Compression, CORS, request ID tracking, structured logging
//! - Environment variable and file-based configuration (`.env` supported)
//! - JSON error envelopes with stable error codes
//! - Graceful shutdown on SIGTERM / Ctrl+C
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! ## Public (no authentication)
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe (reports index name and vector dim)
//! - `GET /ready` - Readiness probe
//!
//! ## Protected (API key required)
//!
//! - `POST /api/v1/match` - Find similar profiles without storing
//! - `POST /api/v1/profiles` - Register a profile and return its matches
//! - `GET /api/v1/profiles/{id}` - Get stored profile metadata
//! - `DELETE /api/v1/profiles/{id}` - Delete a stored profile
//! - `GET /api/v1/index/stats` - Index statistics

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
