//! Error types for the version service
//!
//! Every fallible operation in the crate returns [`ServiceResult`]. Binaries
//! wrap these in `anyhow` at the top level and exit non-zero.

use thiserror::Error;

/// Main error type for the version service
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid version '{input}': {message}")]
    Version { input: String, message: String },

    #[error("Discovery error for {key}: {message}")]
    Discovery { key: String, message: String },

    #[error("I/O operation failed: {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Network operation failed: {operation}")]
    Network {
        operation: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Smoke check failed: {message}")]
    Smoke { message: String },
}

/// Type alias for Result with ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a version parse error
    pub fn version(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Version {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create a discovery error
    pub fn discovery(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Discovery {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Create a serialization error
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }

    /// Create a network error
    pub fn network(operation: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            operation: operation.into(),
            source,
        }
    }

    /// Create a smoke check failure
    pub fn smoke(message: impl Into<String>) -> Self {
        Self::Smoke {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::serialization("json_operation", err)
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::network("http_request", err)
    }
}

impl From<figment::Error> for ServiceError {
    fn from(err: figment::Error) -> Self {
        ServiceError::config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = ServiceError::config("name must not be empty");
        assert!(config_err.to_string().contains("Configuration error"));

        let version_err = ServiceError::version("1.x", "minor is not a number");
        assert_eq!(
            version_err.to_string(),
            "Invalid version '1.x': minor is not a number"
        );
    }

    #[test]
    fn test_error_chaining() {
        use std::error::Error;

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "No such directory");
        let err = ServiceError::io("writing openapi/api.swagger.json", io_err);

        assert!(err.source().is_some());
        assert!(err.to_string().contains("I/O operation failed"));
    }
}
