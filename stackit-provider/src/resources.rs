//! Type registry of the STACKIT provider
//!
//! Lightweight descriptors for every resource and data source, usable
//! without API clients (schema listing, documentation).

use stackit_core::provider::{ResourceType, TypeKind};
use stackit_core::schema::ResourceSchema;

use crate::observability::scrapeconfig;
use crate::secretsmanager::user;

macro_rules! define_type {
    ($name:ident, $module:ident, $kind:expr) => {
        pub struct $name;
        impl ResourceType for $name {
            fn name(&self) -> &'static str {
                $module::TYPE_NAME
            }
            fn kind(&self) -> TypeKind {
                $kind
            }
            fn schema(&self) -> ResourceSchema {
                $module::schema()
            }
        }
    };
}

define_type!(ScrapeConfigType, scrapeconfig, TypeKind::Resource);
define_type!(SecretsManagerUserType, user, TypeKind::DataSource);

/// Returns all resource and data source types supported by this provider
pub fn resource_types() -> Vec<Box<dyn ResourceType>> {
    vec![Box::new(ScrapeConfigType), Box::new(SecretsManagerUserType)]
}

/// Look up a type by its full name
pub fn find_type(name: &str) -> Option<Box<dyn ResourceType>> {
    resource_types().into_iter().find(|t| t.name() == name)
}
