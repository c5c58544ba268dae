//! Schema - Attribute schemas for resources and data sources
//!
//! Providers declare a schema for each type. Besides documenting the
//! attributes, the schema validates caller-supplied string values (such as
//! identifiers) before any API call is made.

use std::fmt;

use crate::resource::ID_SEPARATOR;

/// Attribute type
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeType {
    String,
    Int64,
    Bool,
    List(Box<AttributeType>),
    Map(Box<AttributeType>),
    /// Nested object with its own attributes
    Object(Vec<AttributeSchema>),
}

impl AttributeType {
    fn type_name(&self) -> String {
        match self {
            AttributeType::String => "String".to_string(),
            AttributeType::Int64 => "Int64".to_string(),
            AttributeType::Bool => "Bool".to_string(),
            AttributeType::List(inner) => format!("List<{}>", inner.type_name()),
            AttributeType::Map(inner) => format!("Map<{}>", inner.type_name()),
            AttributeType::Object(attributes) => {
                let names: Vec<&str> = attributes.iter().map(|a| a.name.as_str()).collect();
                format!("Object{{{}}}", names.join(", "))
            }
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Validator for string attributes
#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    /// Value must be a UUID
    Uuid,
    /// Value must not contain the identifier separator
    NoSeparator,
    /// Value length (in characters) must be within the inclusive bounds
    LengthBetween(usize, usize),
    /// Value must be one of the listed values
    OneOf(Vec<String>),
}

impl Validator {
    pub fn validate(&self, value: &str) -> Result<(), String> {
        match self {
            Validator::Uuid => uuid::Uuid::parse_str(value)
                .map(|_| ())
                .map_err(|_| format!("'{}' is not a valid UUID", value)),
            Validator::NoSeparator => {
                if value.contains(ID_SEPARATOR) {
                    Err(format!(
                        "'{}' must not contain the separator '{}'",
                        value, ID_SEPARATOR
                    ))
                } else {
                    Ok(())
                }
            }
            Validator::LengthBetween(min, max) => {
                let len = value.chars().count();
                if len < *min || len > *max {
                    Err(format!(
                        "length must be between {} and {}, got {}",
                        min, max, len
                    ))
                } else {
                    Ok(())
                }
            }
            Validator::OneOf(values) => {
                if values.iter().any(|v| v == value) {
                    Ok(())
                } else {
                    Err(format!(
                        "'{}' must be one of: {}",
                        value,
                        values.join(", ")
                    ))
                }
            }
        }
    }
}

/// Validation error for a single attribute
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeError {
    #[error("Attribute '{name}': {message}")]
    ValidationFailed { name: String, message: String },

    #[error("Required attribute '{name}' is missing")]
    MissingRequired { name: String },

    #[error("Unknown attribute '{name}'")]
    UnknownAttribute { name: String },
}

/// Attribute schema
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSchema {
    pub name: String,
    pub attr_type: AttributeType,
    pub required: bool,
    pub computed: bool,
    pub sensitive: bool,
    pub description: Option<String>,
    pub validators: Vec<Validator>,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            required: false,
            computed: false,
            sensitive: false,
            description: None,
            validators: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    fn validate(&self, value: &str) -> Result<(), TypeError> {
        for validator in &self.validators {
            validator
                .validate(value)
                .map_err(|message| TypeError::ValidationFailed {
                    name: self.name.clone(),
                    message,
                })?;
        }
        Ok(())
    }
}

/// Resource schema
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSchema {
    pub resource_type: String,
    /// Attributes in declaration order
    pub attributes: Vec<AttributeSchema>,
    pub description: Option<String>,
}

impl ResourceSchema {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            attributes: Vec::new(),
            description: None,
        }
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.push(schema);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Validate string attribute values given as `(name, value)` pairs
    ///
    /// `None` marks an unset value, which is only an error for required
    /// attributes.
    pub fn validate_strings(&self, values: &[(&str, Option<&str>)]) -> Result<(), Vec<TypeError>> {
        let mut errors = Vec::new();

        for (name, value) in values {
            let Some(schema) = self.get(name) else {
                errors.push(TypeError::UnknownAttribute {
                    name: name.to_string(),
                });
                continue;
            };
            match value {
                Some(v) => {
                    if let Err(e) = schema.validate(v) {
                        errors.push(e);
                    }
                }
                None if schema.required => errors.push(TypeError::MissingRequired {
                    name: name.to_string(),
                }),
                None => {}
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Helper constructors for common attribute schemas
pub mod types {
    use super::*;

    /// Required identifier attribute: UUID without separator
    pub fn uuid_id(name: &str, description: &str) -> AttributeSchema {
        AttributeSchema::new(name, AttributeType::String)
            .required()
            .with_description(description)
            .with_validator(Validator::Uuid)
            .with_validator(Validator::NoSeparator)
    }

    /// Computed internal Terraform identifier
    pub fn internal_id(description: &str) -> AttributeSchema {
        AttributeSchema::new("id", AttributeType::String)
            .computed()
            .with_description(description)
    }

    pub fn string_list() -> AttributeType {
        AttributeType::List(Box::new(AttributeType::String))
    }

    pub fn string_map() -> AttributeType {
        AttributeType::Map(Box::new(AttributeType::String))
    }
}
