//! HTTP gateway for the `backend-api` sample service.
//!
//! Serves health, status and sample user endpoints. Every route is
//! stateless; configuration is read once and shared read-only.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::{ConfigError, GatewayConfig};
pub use error::GatewayError;
pub use routes::create_router;
pub use state::AppState;
