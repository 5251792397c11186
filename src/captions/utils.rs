// Helper functions for caption source implementations

use super::config::VerifierConfig;
use super::errors::CaptionError;
use super::models::Platform;

/// Build a one-off HTTP client with the configured timeout and proxy
pub fn build_http_client(config: &VerifierConfig) -> Result<reqwest::Client, CaptionError> {
    let mut builder = reqwest::Client::builder().timeout(config.timeout());

    // Only the configured proxy is used, never HTTP_PROXY & co. from the environment
    builder = builder.no_proxy();
    if let Some(proxy_url) = config.proxy.as_deref().filter(|p| !p.trim().is_empty()) {
        let proxy = reqwest::Proxy::all(proxy_url)
            .map_err(|e| CaptionError::Transport(format!("invalid proxy {}: {}", proxy_url, e)))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| CaptionError::Transport(format!("failed to build HTTP client: {}", e)))
}

/// Map a status code >= 400 to an access error
pub fn check_status(
    platform: Platform,
    status: reqwest::StatusCode,
) -> Result<(), CaptionError> {
    if status.as_u16() >= 400 {
        return Err(CaptionError::AccessDenied {
            platform,
            status: status.as_u16(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captions::errors::ErrorKind;

    #[test]
    fn test_client_builds_with_defaults() {
        assert!(build_http_client(&VerifierConfig::default()).is_ok());
    }

    #[test]
    fn test_blank_proxy_is_ignored() {
        let config = VerifierConfig::default().with_proxy(Some("  ".to_string()));
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn test_socks_proxy_accepted() {
        let config =
            VerifierConfig::default().with_proxy(Some("socks5h://127.0.0.1:1080".to_string()));
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn test_status_mapping() {
        assert!(check_status(Platform::YouTube, reqwest::StatusCode::OK).is_ok());
        assert!(check_status(Platform::YouTube, reqwest::StatusCode::FOUND).is_ok());

        let err = check_status(Platform::YouTube, reqwest::StatusCode::NOT_FOUND).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AuthOrAccessFailure);

        let err = check_status(Platform::Kaltura, reqwest::StatusCode::BAD_GATEWAY).unwrap_err();
        assert!(matches!(err, CaptionError::AccessDenied { status: 502, .. }));
    }
}
