// Error types for caption metadata lookups

use thiserror::Error;

use super::models::Platform;

/// Why a caption lookup could not produce a definitive track list
#[derive(Debug, Clone, Error)]
pub enum CaptionError {
    /// API key (or Kaltura account) blank after trimming
    #[error("no {0} credentials configured")]
    MissingCredentials(Platform),

    /// Platform did not answer within the configured bound
    #[error("request timed out after {secs}s")]
    Timeout { secs: u64 },

    /// Connection refused, DNS failure, proxy error...
    #[error("transport error: {0}")]
    Transport(String),

    /// HTTP status >= 400: bad key, private, deleted or unlisted video
    #[error("{platform} rejected the request (HTTP {status})")]
    AccessDenied { platform: Platform, status: u16 },

    /// Error object returned in an otherwise successful response
    #[error("{platform} API error {code}: {message}")]
    Api {
        platform: Platform,
        code: String,
        message: String,
    },

    /// Body did not have the expected shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Coarse classification used in logs and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConfigurationMissing,
    TransportFailure,
    AuthOrAccessFailure,
    MalformedResponse,
}

impl CaptionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredentials(_) => ErrorKind::ConfigurationMissing,
            Self::Timeout { .. } | Self::Transport(_) => ErrorKind::TransportFailure,
            Self::AccessDenied { .. } | Self::Api { .. } => ErrorKind::AuthOrAccessFailure,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
        }
    }

    /// Transport error with the timeout bound filled in
    pub fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            return Self::Timeout { secs: timeout_secs };
        }
        Self::from(err)
    }
}

impl From<reqwest::Error> for CaptionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::MalformedResponse(err.to_string());
        }
        if err.is_timeout() {
            return Self::Timeout { secs: 0 };
        }
        // Strip the URL: it carries the API key as a query parameter
        Self::Transport(err.without_url().to_string())
    }
}

impl From<serde_json::Error> for CaptionError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            CaptionError::MissingCredentials(Platform::YouTube).kind(),
            ErrorKind::ConfigurationMissing
        );
        assert_eq!(CaptionError::Timeout { secs: 5 }.kind(), ErrorKind::TransportFailure);
        assert_eq!(
            CaptionError::AccessDenied { platform: Platform::YouTube, status: 404 }.kind(),
            ErrorKind::AuthOrAccessFailure
        );
        assert_eq!(
            CaptionError::Api {
                platform: Platform::Kaltura,
                code: "INVALID_KS".to_string(),
                message: "Invalid KS".to_string(),
            }
            .kind(),
            ErrorKind::AuthOrAccessFailure
        );
    }

    #[test]
    fn test_json_error_is_malformed() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert_eq!(CaptionError::from(err).kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn test_display() {
        let err = CaptionError::AccessDenied { platform: Platform::YouTube, status: 403 };
        assert_eq!(err.to_string(), "youtube rejected the request (HTTP 403)");
    }
}
