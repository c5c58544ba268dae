//! Mapping - Failures of response/model conversions

/// Error returned when an API object cannot be mapped to or from a model
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("response input is nil")]
    ResponseNil,

    #[error("model input is nil")]
    ModelNil,

    /// The entity's identifier is neither in the model nor in the response
    #[error("{0} not present")]
    IdNotPresent(&'static str),

    #[error("invalid {attribute}: {message}")]
    InvalidValue {
        attribute: &'static str,
        message: String,
    },
}

pub type MappingResult<T> = Result<T, MappingError>;
