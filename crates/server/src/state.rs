use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use dashmap::DashMap;
use matcher::{MatchConfig, MatchEngine};
use provec::ProvecConfig;
use std::sync::Arc;

/// Shared application state
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Rate limit tracking: API key -> (count, window_start)
    pub rate_limiter: Arc<DashMap<String, (u32, std::time::Instant)>>,

    /// Match engine (shared across requests; owns the index and the
    /// embedding lookup)
    pub engine: Arc<MatchEngine>,

    /// Matcher defaults applied when a request leaves them unset
    pub match_defaults: MatchConfig,
}

impl ServerState {
    /// Create new server state.
    ///
    /// Builds the whole pipeline from configuration: field specs,
    /// embedding lookup (word-vector table or stub), in-memory index, and
    /// the match engine on top. The lookup is loaded once here and never
    /// mutated afterwards.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let pipeline = match &config.pipeline_config {
            Some(path) => ProvecConfig::from_file(path)
                .map_err(|e| ServerError::Config(e.to_string()))?,
            None => ProvecConfig::default(),
        };
        Self::with_pipeline(config, pipeline)
    }

    /// Create state from an already-built pipeline config. Used by tests
    /// that construct the pipeline in code.
    pub fn with_pipeline(config: ServerConfig, pipeline: ProvecConfig) -> ServerResult<Self> {
        pipeline
            .validate()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        let lookup = pipeline
            .embedding
            .build_lookup()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        tracing::info!(
            dimension = lookup.dimension(),
            mode = %pipeline.embedding.mode,
            "embedding lookup ready"
        );

        let engine = Arc::new(
            MatchEngine::in_memory(lookup, pipeline.field_specs.clone(), pipeline.intake.clone())
                .map_err(ServerError::Match)?,
        );

        Ok(Self {
            config: Arc::new(config),
            rate_limiter: Arc::new(DashMap::new()),
            engine,
            match_defaults: pipeline.matcher.clone(),
        })
    }

    /// Check if API key is valid
    pub fn is_valid_api_key(&self, key: &str) -> bool {
        self.config.api_keys.contains(key)
    }

    /// Check rate limit for API key
    pub fn check_rate_limit(&self, key: &str) -> bool {
        let now = std::time::Instant::now();
        let window = std::time::Duration::from_secs(60);
        let limit = self.config.rate_limit_per_minute;

        let mut entry = self.rate_limiter.entry(key.to_string()).or_insert((0, now));
        let (count, window_start) = entry.value_mut();

        // Reset if window has passed
        if now.duration_since(*window_start) > window {
            *count = 0;
            *window_start = now;
        }

        if *count >= limit {
            return false;
        }

        *count += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ServerState {
        let mut config = ServerConfig::default();
        config.api_keys.insert("test-key".into());
        config.rate_limit_per_minute = 2;
        ServerState::new(config).unwrap()
    }

    #[test]
    fn default_pipeline_builds_an_engine() {
        let state = state();
        // Stub embedding defaults to dimension 100.
        assert_eq!(state.engine.dimension(), 100);
        assert_eq!(state.match_defaults.max_results, 10);
    }

    #[test]
    fn api_key_validation() {
        let state = state();
        assert!(state.is_valid_api_key("test-key"));
        assert!(!state.is_valid_api_key("wrong-key"));
    }

    #[test]
    fn rate_limit_window_counts_per_key() {
        let state = state();
        assert!(state.check_rate_limit("test-key"));
        assert!(state.check_rate_limit("test-key"));
        assert!(!state.check_rate_limit("test-key"));
        // A different key has its own window.
        assert!(state.check_rate_limit("other-key"));
    }
}
