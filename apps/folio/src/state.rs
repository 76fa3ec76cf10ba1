use std::sync::Arc;

use crate::config::Config;
use crate::contact::{ContactNotifier, RateLimiter};
use crate::content::ContentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Raw markdown loaded at startup; parsed per request.
    pub content: Arc<ContentStore>,
    pub rate_limiter: Arc<RateLimiter>,
    /// Pluggable delivery. Default: LogNotifier.
    pub notifier: Arc<dyn ContactNotifier>,
}

impl AppState {
    pub fn new(config: Config, content: ContentStore, notifier: Arc<dyn ContactNotifier>) -> Self {
        let rate_limiter = RateLimiter::new(
            config.contact_max_requests,
            config.contact_window,
            config.contact_max_tracked,
        );
        Self {
            config,
            content: Arc::new(content),
            rate_limiter: Arc::new(rate_limiter),
            notifier,
        }
    }
}
