//! Error types for the Forgeop CLI

use thiserror::Error;

/// Result type alias for Forgeop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors, one variant per HTTP status class.
///
/// The server reports failures as a JSON body with a `msg` field; the
/// request layer extracts it and stores it in the variant. A 409 keeps the
/// raw response body instead: it carries the server's current version of the
/// resource, which the caller needs in order to reload its state.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not authenticated or session expired. Run `forgeop login` to authenticate.")]
    Unauthorized,

    #[error("Access denied. You don't have permission to access this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: the resource has been modified since it was loaded")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// The message the server attached to the failure, when there is one.
    pub fn message(&self) -> &str {
        match self {
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::ServerError(msg)
            | ApiError::Network(msg)
            | ApiError::InvalidResponse(msg) => msg,
            _ => "",
        }
    }

    /// True for failures caused by the request itself (4xx class).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized
                | ApiError::Forbidden
                | ApiError::NotFound(_)
                | ApiError::Conflict(_)
                | ApiError::BadRequest(_)
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to the server".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `forgeop login` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Not logged in. Run `forgeop login` to authenticate.")]
    MissingToken,

    #[error("Server not configured. Run `forgeop login --server <URL>` or set FORGEOP_SERVER.")]
    MissingServer,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_unauthorized_message() {
        let err = ApiError::Unauthorized;
        assert!(err.to_string().contains("forgeop login"));
    }

    #[test]
    fn test_api_error_forbidden_message() {
        let err = ApiError::Forbidden;
        assert!(err.to_string().contains("permission"));
    }

    #[test]
    fn test_api_error_not_found() {
        let err = ApiError::NotFound("Registry abc-123".to_string());
        assert!(err.to_string().contains("abc-123"));
    }

    #[test]
    fn test_api_error_conflict_keeps_body() {
        let err = ApiError::Conflict(r#"{"name":"current"}"#.to_string());
        assert!(err.to_string().contains("Conflict"));
        match err {
            ApiError::Conflict(body) => assert!(body.contains("current")),
            _ => panic!("Expected ApiError::Conflict"),
        }
    }

    #[test]
    fn test_api_error_bad_request() {
        let err = ApiError::BadRequest("Invalid job".to_string());
        assert!(err.to_string().contains("Invalid job"));
    }

    #[test]
    fn test_api_error_server_error() {
        let err = ApiError::ServerError("Internal error".to_string());
        assert!(err.to_string().contains("Internal error"));
    }

    #[test]
    fn test_api_error_message_accessor() {
        assert_eq!(
            ApiError::BadRequest("some error".to_string()).message(),
            "some error"
        );
        assert_eq!(ApiError::Unauthorized.message(), "");
    }

    #[test]
    fn test_api_error_client_error_classes() {
        assert!(ApiError::Unauthorized.is_client_error());
        assert!(ApiError::NotFound("x".to_string()).is_client_error());
        assert!(ApiError::Conflict(String::new()).is_client_error());
        assert!(!ApiError::ServerError("boom".to_string()).is_client_error());
        assert!(!ApiError::Network("down".to_string()).is_client_error());
    }

    #[test]
    fn test_config_error_not_found() {
        let err = ConfigError::NotFound;
        assert!(err.to_string().contains("forgeop login"));
    }

    #[test]
    fn test_config_error_parse() {
        let err = ConfigError::ParseError("unexpected key".to_string());
        assert!(err.to_string().contains("unexpected key"));
    }

    #[test]
    fn test_config_error_missing_token() {
        let err = ConfigError::MissingToken;
        assert!(err.to_string().contains("forgeop login"));
    }

    #[test]
    fn test_config_error_missing_server() {
        let err = ConfigError::MissingServer;
        assert!(err.to_string().contains("FORGEOP_SERVER"));
    }

    #[test]
    fn test_error_from_api_error() {
        let api_err = ApiError::Unauthorized;
        let err: Error = api_err.into();

        match err {
            Error::Api(ApiError::Unauthorized) => (),
            _ => panic!("Expected Error::Api(ApiError::Unauthorized)"),
        }
    }

    #[test]
    fn test_error_from_config_error() {
        let cfg_err = ConfigError::NotFound;
        let err: Error = cfg_err.into();

        match err {
            Error::Config(ConfigError::NotFound) => (),
            _ => panic!("Expected Error::Config(ConfigError::NotFound)"),
        }
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_str = "invalid: [yaml: content";
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }
}
