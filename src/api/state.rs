//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::chat::Dispatcher;
use crate::engine::{ClassificationEngine, LogAggregator, ScoreEngine};
use crate::store::Store;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
pub struct AppState {
    /// Store backing every engine
    pub store: Arc<dyn Store>,
    /// Daily log upserts and windows
    pub aggregator: LogAggregator,
    /// Wellness score recomputation
    pub scores: ScoreEngine,
    /// Profile updates and dosha classification
    pub classifier: ClassificationEngine,
    /// Chat rule table, built once
    pub dispatcher: Dispatcher,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state over a store; engines share the same store handle
    pub fn new(store: Arc<dyn Store>, config: ApiConfig) -> Self {
        Self {
            aggregator: LogAggregator::new(Arc::clone(&store)),
            scores: ScoreEngine::new(Arc::clone(&store)),
            classifier: ClassificationEngine::new(Arc::clone(&store)),
            dispatcher: Dispatcher::new(),
            store,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Allowed CORS origins; empty means any origin
    pub cors_origins: Vec<String>,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8090,
            cors_origins: Vec::new(),
            request_timeout_ms: 30_000,
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
