//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::adapters::OtpRegistry;
use crate::config::Config;
use productr_core::ports::ProductStore;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all
/// handlers. The verification-code registry lives here, not in a module
/// global, so every test can have its own.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
    pub otp: Arc<OtpRegistry>,
    pub config: Arc<Config>,
}

#[cfg(test)]
impl AppState {
    /// An `AppState` over the in-memory store, for handler tests.
    pub fn for_tests() -> Arc<Self> {
        use crate::adapters::MemoryStore;
        use std::time::Duration;

        let config = Config {
            bind_address: "127.0.0.1:0".parse().expect("loopback address"),
            database_url: String::new(),
            log_level: tracing::Level::INFO,
            cors_allow_origin: None,
            otp_ttl: Duration::from_secs(60),
        };
        Arc::new(Self {
            store: Arc::new(MemoryStore::new()),
            otp: Arc::new(OtpRegistry::new(config.otp_ttl)),
            config: Arc::new(config),
        })
    }
}
