//! Error types and result handling for random population.

use thiserror::Error;

use crate::config::ConfigError;

/// Reasons an instance of a type could not be constructed.
///
/// Inside an object graph these are absorbed by the instantiation guard and
/// the affected field is left at its default. They only reach the caller when
/// the root type itself cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstantiationError {
    /// The type declares no parameterless construction path
    #[error("no parameterless constructor is defined")]
    NoConstructor,

    /// The constructor panicked
    #[error("constructor panicked: {0}")]
    Panicked(String),

    /// A generated value did not have the type the descriptor promised
    #[error("expected a value of type {expected}")]
    TypeMismatch { expected: &'static str },

    /// A hand-written constructor reported its own failure
    #[error("{0}")]
    Failed(String),
}

impl InstantiationError {
    /// Create a failure carrying a custom message
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Create a type mismatch error for `T`
    pub fn type_mismatch<T: ?Sized>() -> Self {
        Self::TypeMismatch {
            expected: std::any::type_name::<T>(),
        }
    }
}

/// Errors surfaced by the public [`RandomValues`](crate::RandomValues) API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PopulateError {
    /// The requested root type could not be constructed
    #[error("unable to create a {type_name} instance: {source}")]
    Instantiation {
        type_name: &'static str,
        #[source]
        source: InstantiationError,
    },

    /// An enumeration was requested for a type that is not one
    #[error("{type_name} is not an enum type")]
    NotAnEnum { type_name: &'static str },

    /// The enumeration has no declared values to pick from
    #[error("{type_name} declares no values")]
    EmptyEnum { type_name: &'static str },

    /// No generation strategy applies to the requested type
    #[error("{type_name} is not a supported type")]
    Unsupported { type_name: &'static str },

    /// The configuration was rejected before generation started
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PopulateError {
    /// Create an instantiation error for the given root type
    pub fn instantiation(type_name: &'static str, source: InstantiationError) -> Self {
        Self::Instantiation { type_name, source }
    }
}

/// Result alias used throughout the public API
pub type Result<T> = std::result::Result<T, PopulateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instantiation_error_display() {
        assert_eq!(
            InstantiationError::NoConstructor.to_string(),
            "no parameterless constructor is defined"
        );
        assert_eq!(
            InstantiationError::Panicked("boom".to_string()).to_string(),
            "constructor panicked: boom"
        );
        assert_eq!(
            InstantiationError::type_mismatch::<u32>().to_string(),
            "expected a value of type u32"
        );
    }

    #[test]
    fn test_populate_error_display() {
        let error = PopulateError::instantiation("demo::Widget", InstantiationError::NoConstructor);
        assert_eq!(
            error.to_string(),
            "unable to create a demo::Widget instance: no parameterless constructor is defined"
        );

        let error = PopulateError::NotAnEnum { type_name: "i32" };
        assert_eq!(error.to_string(), "i32 is not an enum type");
    }

    #[test]
    fn test_config_error_converts() {
        let error: PopulateError = ConfigError::InvalidMaxCollectionSize(0).into();
        assert!(matches!(error, PopulateError::Config(_)));
    }
}
