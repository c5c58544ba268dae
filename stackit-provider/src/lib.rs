//! STACKIT Provider
//!
//! Resources and data sources for the STACKIT cloud.
//!
//! ## Module Structure
//!
//! - `config` - Provider configuration (region, token, endpoints)
//! - `provider` - StackitProvider implementation
//! - `resources` - Type registry
//! - `observability` - Scrape config resource
//! - `secretsmanager` - User data source
//! - `utils` - API error translation and validation helpers
//! - `wait` - Wait handlers for asynchronous operations

pub mod config;
pub mod observability;
pub mod provider;
pub mod resources;
pub mod secretsmanager;
pub mod utils;
pub mod wait;

#[cfg(test)]
mod testing;

// Re-export main types
pub use config::{ConfigError, ProviderConfig};
pub use provider::StackitProvider;

use stackit_core::provider::{Provider, ResourceType};

impl Provider for StackitProvider {
    fn name(&self) -> &'static str {
        "stackit"
    }

    fn resource_types(&self) -> Vec<Box<dyn ResourceType>> {
        resources::resource_types()
    }
}
