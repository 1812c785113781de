//! Router state: configuration plus the clock handlers read time from.

use std::sync::Arc;

use backend_core::{Clock, SystemClock};
use chrono::{DateTime, Utc};

use crate::config::GatewayConfig;

/// State shared by all handlers. Cheap to clone; never mutated.
#[derive(Debug, Clone)]
pub struct AppState<C = SystemClock> {
    config: Arc<GatewayConfig>,
    clock: C,
}

impl<C: Clock> AppState<C> {
    /// Creates state from a configuration and a clock.
    pub fn new(config: GatewayConfig, clock: C) -> Self {
        Self {
            config: Arc::new(config),
            clock,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Current time according to the injected clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

impl AppState<SystemClock> {
    /// State backed by the system clock.
    #[must_use]
    pub fn with_system_clock(config: GatewayConfig) -> Self {
        Self::new(config, SystemClock)
    }
}
