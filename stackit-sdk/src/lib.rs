//! STACKIT SDK
//!
//! API models and async HTTP clients for the STACKIT services used by the
//! provider.
//!
//! ## Module Structure
//!
//! - `client` - Shared HTTP client (base URL, bearer token, status handling)
//! - `error` - API error type
//! - `observability` - Scrape config models and client
//! - `secretsmanager` - User models and client

pub mod client;
pub mod error;
pub mod observability;
pub mod secretsmanager;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
