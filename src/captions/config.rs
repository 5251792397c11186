// Verifier configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 5;
pub const YOUTUBE_CAPTIONS_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/captions";
pub const KALTURA_SERVICE_URL: &str = "https://www.kaltura.com";

/// Settings shared by every platform verifier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Course language the captions should be in
    pub language: String,
    /// Bound on each outbound API request
    pub timeout_seconds: u64,
    /// SOCKS5/HTTP proxy URL
    pub proxy: Option<String>,
    /// YouTube Data API captions.list endpoint
    pub youtube_endpoint: String,
    /// Kaltura API host (without /api_v3)
    pub kaltura_service_url: String,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            proxy: None,
            youtube_endpoint: YOUTUBE_CAPTIONS_ENDPOINT.to_string(),
            kaltura_service_url: KALTURA_SERVICE_URL.to_string(),
        }
    }
}

impl VerifierConfig {
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn with_youtube_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.youtube_endpoint = endpoint.into();
        self
    }

    pub fn with_kaltura_service_url(mut self, url: impl Into<String>) -> Self {
        self.kaltura_service_url = url.into();
        self
    }

    /// Configured language, or "en" when blank
    pub fn target_language(&self) -> &str {
        effective_language(&self.language)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Blank language codes fall back to English
pub fn effective_language(language: &str) -> &str {
    let trimmed = language.trim();
    if trimmed.is_empty() {
        DEFAULT_LANGUAGE
    } else {
        trimmed
    }
}
