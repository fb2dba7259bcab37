//! Unified error handling for redshiftctl-core
//!
//! Remote failures arrive as [`ApiError`] and are carried verbatim. The only
//! rewrite the engine performs is for name-resolution failures, which gain
//! the endpoint and region they were trying to reach.
//!
//! # Example
//!
//! ```rust
//! use redshiftctl_core::{ApiError, CoreError};
//!
//! let err: CoreError = ApiError::Service {
//!     code: "ClusterNotFound".to_string(),
//!     message: "Cluster analytics not found.".to_string(),
//! }
//! .into();
//! assert!(err.is_not_found());
//! ```

use thiserror::Error;

use crate::api::ApiError;

/// Core error type for operation execution
#[derive(Error, Debug)]
pub enum CoreError {
    /// Error reported by the remote client, unchanged
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The service endpoint host name could not be resolved
    #[error(
        "Name resolution failure attempting to reach service at {endpoint} (region: {region}). \
         Check the region and endpoint URL configured for this profile. Cause: {message}"
    )]
    NameResolution {
        endpoint: String,
        region: String,
        message: String,
    },

    /// A client could not be created for the requested settings
    #[error("Failed to create Redshift client: {0}")]
    Client(String),

    /// The operator could not be asked for confirmation
    #[error("Failed to read confirmation: {0}")]
    Prompt(String),

    /// A payload could not be converted for output
    #[error("Failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Returns true if the service reported a missing resource
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            CoreError::Api(ApiError::Service { code, .. }) => code.ends_with("NotFound")
                || code.ends_with("NotFoundFault")
                || code == "ResourceNotFoundFault",
            _ => false,
        }
    }

    /// Returns true if the service rejected the caller's credentials or permissions
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        match self {
            CoreError::Api(ApiError::Service { code, .. }) => matches!(
                code.as_str(),
                "AccessDenied"
                    | "AccessDeniedException"
                    | "UnauthorizedOperation"
                    | "InvalidClientTokenId"
                    | "SignatureDoesNotMatch"
                    | "ExpiredToken"
            ),
            _ => false,
        }
    }

    /// Returns true if the service throttled the request
    #[must_use]
    pub fn is_throttled(&self) -> bool {
        match self {
            CoreError::Api(ApiError::Service { code, .. }) => {
                code == "Throttling" || code == "ThrottlingException"
            }
            _ => false,
        }
    }

    /// Returns true if the request never got a response from the service
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CoreError::NameResolution { .. }
                | CoreError::Api(ApiError::Transport { .. })
                | CoreError::Api(ApiError::Timeout { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(code: &str) -> CoreError {
        ApiError::Service {
            code: code.to_string(),
            message: "message".to_string(),
        }
        .into()
    }

    #[test]
    fn test_not_found_codes() {
        assert!(service("ClusterNotFound").is_not_found());
        assert!(service("ClusterSubnetGroupNotFoundFault").is_not_found());
        assert!(service("ResourceNotFoundFault").is_not_found());
        assert!(!service("InvalidSubnet").is_not_found());
    }

    #[test]
    fn test_unauthorized_and_throttled() {
        assert!(service("AccessDenied").is_unauthorized());
        assert!(service("ExpiredToken").is_unauthorized());
        assert!(!service("AccessDenied").is_throttled());
        assert!(service("Throttling").is_throttled());
    }

    #[test]
    fn test_transport_classification() {
        let err: CoreError = ApiError::Transport {
            message: "connection refused".to_string(),
        }
        .into();
        assert!(err.is_transport());
        assert!(!err.is_not_found());

        let err = CoreError::NameResolution {
            endpoint: "https://redshift.us-east-1.amazonaws.com".to_string(),
            region: "us-east-1".to_string(),
            message: "dns error".to_string(),
        };
        assert!(err.is_transport());
        assert!(err.to_string().contains("redshift.us-east-1.amazonaws.com"));
    }

    #[test]
    fn test_service_error_display_is_verbatim() {
        let err: CoreError = ApiError::Service {
            code: "InvalidSubnet".to_string(),
            message: "Subnet subnet-123 does not exist.".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "InvalidSubnet: Subnet subnet-123 does not exist."
        );
    }
}
