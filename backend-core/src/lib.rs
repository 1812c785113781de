//! Domain types for the `backend-api` sample service.
//!
//! Defines the response payloads (health, status, users, errors), the
//! deployment mode, and the clock seam. Nothing in this crate stores state
//! between requests.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod clock;
pub mod environment;
pub mod error;
pub mod health;
pub mod id;
pub mod timestamp;
pub mod user;

pub use clock::{Clock, FixedClock, SystemClock};
pub use environment::Environment;
pub use error::CoreError;
pub use health::{ApiStatus, ErrorResponse, HealthStatus, SERVICE_NAME};
pub use id::UserId;
pub use user::{seed_users, CreatedUser, NewUser, UserList, UserRecord};
