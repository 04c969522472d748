//! API route handlers
//!
//! Routes are organized by functionality:
//!
//! - `health`: Health checks, readiness, and index stats
//! - `matching`: Similarity queries without storing the profile
//! - `profiles`: Register-and-match plus stored-profile management

pub mod health;
pub mod matching;
pub mod profiles;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info. Root endpoint (GET /), no authentication.
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Provec Server",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "endpoints": [
            "/api/v1/match",
            "/api/v1/profiles",
            "/api/v1/profiles/{profile_id}",
            "/api/v1/index/stats",
            "/health",
            "/ready"
        ]
    })))
}

/// 404 Not Found handler for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
