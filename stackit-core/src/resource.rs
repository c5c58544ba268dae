//! Resource - Resource identity and composite Terraform identifiers

use std::fmt;

/// Separator between the parts of an internal Terraform identifier
pub const ID_SEPARATOR: &str = ",";

/// Unique identifier for a resource instance, used for error context
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    /// Resource type (e.g., "stackit_observability_scrapeconfig")
    pub resource_type: String,
    /// Composite identifier of the instance (e.g., "pid,iid,name")
    pub name: String,
}

impl ResourceId {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource_type, self.name)
    }
}

/// Build the internal Terraform identifier by joining `parts` with [`ID_SEPARATOR`]
///
/// The order of the parts is significant: project id, instance id, entity id.
pub fn build_internal_terraform_id(parts: &[&str]) -> String {
    parts.join(ID_SEPARATOR)
}

/// Split an internal Terraform identifier into exactly `expected` non-empty parts
///
/// Returns `None` if the identifier has a different number of parts or any
/// part is empty.
pub fn split_internal_terraform_id(id: &str, expected: usize) -> Option<Vec<&str>> {
    let parts: Vec<&str> = id.split(ID_SEPARATOR).collect();
    if parts.len() != expected || parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    Some(parts)
}
